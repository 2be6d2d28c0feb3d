pub mod etl;
pub mod fetch;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{BuildSummary, DistBundle, RawDatasets};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, Storage};
pub use crate::utils::error::Result;
