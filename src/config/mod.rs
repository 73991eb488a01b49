mod pipeline;

pub use pipeline::{ApiConfig, PipelineConfig, WarehouseConfig};
