pub mod config;
pub mod core;
pub mod domain;
pub mod geom;
pub mod utils;

pub use config::{cli::LocalStorage, AppConfig, CliConfig};
pub use core::{client::ParcelClient, engine::SearchEngine, pipeline::SearchPipeline};
pub use domain::model::{ParcelRecord, SearchKind, SearchQuery};
pub use geom::wkt::{ParcelGeometry, WktError};
pub use utils::error::{Result, ScoutError};
