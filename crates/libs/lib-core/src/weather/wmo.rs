//! WMO weather interpretation codes.

/// Human-readable label for a WMO weather code. Unlisted codes are `"Unknown"`.
pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        80 => "Slight showers",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Like [`describe`] for codes that may be missing from a response.
pub fn describe_opt(code: Option<u16>) -> &'static str {
    code.map(describe).unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(63), "Moderate rain");
        assert_eq!(describe(95), "Thunderstorm");
    }

    #[test]
    fn test_unknown_codes() {
        for code in [4, 99, 1000, u16::MAX] {
            assert_eq!(describe(code), "Unknown");
        }
        assert_eq!(describe_opt(None), "Unknown");
    }

    #[test]
    fn test_deterministic() {
        for code in 0..=100 {
            assert_eq!(describe(code), describe(code));
        }
    }
}
