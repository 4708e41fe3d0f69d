pub mod client;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{
    ParcelRecord, SearchArtifacts, SearchKind, SearchQuery, SearchResponse,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
