//! Web-Mercator tile arithmetic for drawing a slippy map.

use shared::Coordinates;

pub const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Fill `{z}`, `{x}` and `{y}` in a tile URL template.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// A tile and the offset of its top-left corner from the viewport's top-left, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub offset: (f64, f64),
}

/// Global pixel position of a coordinate at `zoom`.
pub fn world_pixel(coords: Coordinates, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE * f64::from(1u32 << zoom);
    let lat = coords.lat.clamp(-85.051_128_78, 85.051_128_78).to_radians();
    let x = (coords.lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;
    (x, y)
}

pub fn tile_at(coords: Coordinates, zoom: u8) -> TileId {
    let (x, y) = world_pixel(coords, zoom);
    let max = (1u32 << zoom) - 1;
    TileId {
        z: zoom,
        x: ((x / TILE_SIZE) as u32).min(max),
        y: ((y / TILE_SIZE) as u32).min(max),
    }
}

/// Tiles needed to cover a `width` x `height` viewport centred on `center`.
pub fn covering(center: Coordinates, zoom: u8, width: f64, height: f64) -> Vec<PlacedTile> {
    let (cx, cy) = world_pixel(center, zoom);
    let left = cx - width / 2.0;
    let top = cy - height / 2.0;
    let count = 1i64 << zoom;

    let first_x = (left / TILE_SIZE).floor() as i64;
    let last_x = ((left + width) / TILE_SIZE).floor() as i64;
    let first_y = (top / TILE_SIZE).floor() as i64;
    let last_y = ((top + height) / TILE_SIZE).floor() as i64;

    let mut tiles = Vec::new();
    for ty in first_y.max(0)..=last_y.min(count - 1) {
        for tx in first_x..=last_x {
            // Wrap around the antimeridian
            let wrapped = tx.rem_euclid(count);
            tiles.push(PlacedTile {
                id: TileId {
                    z: zoom,
                    x: wrapped as u32,
                    y: ty as u32,
                },
                offset: (tx as f64 * TILE_SIZE - left, ty as f64 * TILE_SIZE - top),
            });
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_at_known_position() {
        // Zoom 0 has one tile
        assert_eq!(tile_at(Coordinates::FALLBACK, 0), TileId { z: 0, x: 0, y: 0 });

        // North-east quadrant at zoom 1
        assert_eq!(tile_at(Coordinates::FALLBACK, 1), TileId { z: 1, x: 1, y: 0 });
        assert_eq!(tile_at(Coordinates::FALLBACK, 10).x, 732);
    }

    #[test]
    fn test_url_template() {
        let id = TileId { z: 18, x: 1, y: 2 };
        assert_eq!(id.url("https://t/{z}/{y}/{x}"), "https://t/18/2/1");
    }

    #[test]
    fn test_covering_contains_center_tile() {
        let tiles = covering(Coordinates::FALLBACK, 18, 600.0, 400.0);
        let center = tile_at(Coordinates::FALLBACK, 18);
        assert!(tiles.iter().any(|t| t.id == center));
        // 600x400 spans at most 4x3 tiles
        assert!(tiles.len() <= 12);
        assert!(tiles.iter().all(|t| t.offset.0 > -TILE_SIZE && t.offset.1 > -TILE_SIZE));
    }
}
