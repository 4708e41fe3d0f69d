pub mod feature;
pub mod wkt;

pub use wkt::{ParcelGeometry, ParcelPolygon, WktError};
