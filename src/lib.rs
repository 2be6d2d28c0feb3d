pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, BuildConfig, DatasetConfig};

pub use crate::core::{etl::EtlEngine, fetch::HttpSource, pipeline::DistPipeline};
pub use domain::model::{BuildSummary, CityRecord, StateRecord, UNKNOWN_STATE_CODE};
pub use utils::error::{EtlError, Result};
