pub mod error;
pub mod geo_info;
pub mod resolver;

pub use error::{GeoError, Result};
pub use geo_info::GeoInfo;
pub use resolver::{DisabledGeoResolver, GeoResolver, HttpGeoResolver};
