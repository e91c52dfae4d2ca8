pub mod engine;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod sampler;
pub mod stats;
pub mod table;

pub use crate::domain::model::{
    BoxStats, ChartSpec, ExportSpec, RenderedChart, SampleRecord, SampleTable, Segment,
    SegmentSamples, SegmentSpec, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
