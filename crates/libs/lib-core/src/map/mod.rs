//! # Farm Map
//!
//! Satellite map of the user's farm. [`cascade`] decides the provider and load
//! order, [`driver`] runs it against the network, [`tiles`] turns the chosen
//! view into tile positions for drawing.

pub mod cascade;
pub mod driver;
pub mod tiles;

pub use cascade::{MapCascade, MapCommand, MapEvent, MapPhase, MapResource, MapView, Provider};
pub use driver::{HttpResourceLoader, MapDriver, MapHandle, MapSnapshot, ResourceLoader};
