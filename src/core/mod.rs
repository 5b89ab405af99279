pub mod etl;
pub mod export;
pub mod pipeline;

pub use crate::domain::model::RecordSet;
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, Storage};
pub use crate::utils::error::Result;
