use crate::core::export::export_chart;
use crate::core::render::{palette_for, render_chart};
use crate::core::sampler::sample_segments;
use crate::core::stats::summarize;
use crate::core::{
    ConfigProvider, Pipeline, SampleTable, SegmentSamples, Storage, TransformResult,
};
use crate::utils::error::Result;

pub struct BoxPlotPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BoxPlotPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for BoxPlotPipeline<S, C> {
    fn extract(&self) -> Result<Vec<SegmentSamples>> {
        tracing::debug!(
            "Sampling {} segments with seed {}",
            self.config.segments().len(),
            self.config.seed()
        );
        sample_segments(self.config.segments(), self.config.seed())
    }

    fn transform(&self, samples: Vec<SegmentSamples>) -> Result<TransformResult> {
        let table = SampleTable::from_samples(&samples);
        let stats = summarize(&table, &self.config.chart().display_order)?;

        for s in &stats {
            tracing::debug!(
                "{}: n={}, median={:.2}, IQR=[{:.2}, {:.2}], outliers={}",
                s.segment,
                s.count,
                s.median,
                s.q1,
                s.q3,
                s.outliers.len()
            );
        }

        Ok(TransformResult { table, stats })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let export = self.config.export();

        if let Some(path) = &export.table_csv {
            let csv = result.table.to_csv_bytes()?;
            self.storage.write_file(path, &csv)?;
            tracing::debug!("Sample table written to {}", path);
        }

        if let Some(path) = &export.summary_json {
            let json = serde_json::to_string_pretty(&result.stats)?;
            self.storage.write_file(path, json.as_bytes())?;
            tracing::debug!("Summary written to {}", path);
        }

        let palette = palette_for(self.config.segments())?;
        let rendered = render_chart(&result.stats, self.config.chart(), &palette)?;
        export_chart(&self.storage, rendered, &export.chart_file)?;

        Ok(export.chart_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartJob;
    use crate::core::Segment;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_extract_uses_configured_counts() {
        let pipeline = BoxPlotPipeline::new(MockStorage::default(), ChartJob::default());
        let samples = pipeline.extract().unwrap();
        let total: usize = samples.iter().map(|s| s.values.len()).sum();
        assert_eq!(total, 750);
    }

    #[test]
    fn test_transform_orders_stats_for_display() {
        let pipeline = BoxPlotPipeline::new(MockStorage::default(), ChartJob::default());
        let samples = pipeline.extract().unwrap();
        let result = pipeline.transform(samples).unwrap();

        assert_eq!(result.table.len(), 750);
        // Generation order is High, Medium, Low; the table keeps it.
        assert_eq!(result.table.records()[0].segment, Segment::HighValue);
        let order: Vec<Segment> = result.stats.iter().map(|s| s.segment).collect();
        assert_eq!(
            order,
            vec![Segment::LowValue, Segment::MediumValue, Segment::HighValue]
        );
    }

    #[test]
    fn test_load_writes_chart_and_side_outputs() {
        let mut job = ChartJob::default();
        job.export.table_csv = Some("samples.csv".to_string());
        job.export.summary_json = Some("summary.json".to_string());

        let pipeline = BoxPlotPipeline::new(MockStorage::default(), job);
        let samples = pipeline.extract().unwrap();
        let result = pipeline.transform(samples).unwrap();
        let path = pipeline.load(result).unwrap();
        assert_eq!(path, "chart.png");

        let png = pipeline.storage.get_file("chart.png").unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (512, 512));

        let csv = String::from_utf8(pipeline.storage.get_file("samples.csv").unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 751);

        let summary: Vec<serde_json::Value> =
            serde_json::from_slice(&pipeline.storage.get_file("summary.json").unwrap()).unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0]["segment"], "Low-Value");
        assert_eq!(summary[2]["count"], 100);
    }
}
