//! Tile documents: metadata extraction and SVG length units.

pub mod extract;
pub mod units;

pub use extract::TileDocument;
