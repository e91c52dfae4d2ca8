use crate::domain::model::{ChartSpec, ExportSpec, SegmentSamples, SegmentSpec, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn seed(&self) -> u64;
    /// Segments in generation order.
    fn segments(&self) -> &[SegmentSpec];
    fn chart(&self) -> &ChartSpec;
    fn export(&self) -> &ExportSpec;
}

/// Sample, tabulate, then render and write.
pub trait Pipeline {
    fn extract(&self) -> Result<Vec<SegmentSamples>>;
    fn transform(&self, samples: Vec<SegmentSamples>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
