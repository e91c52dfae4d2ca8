use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ChartEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting chart generation...");

        tracing::info!("Sampling segments...");
        let samples = self.pipeline.extract()?;
        let drawn: usize = samples.iter().map(|s| s.values.len()).sum();
        tracing::info!("Drew {} samples across {} segments", drawn, samples.len());
        self.monitor.log_stats("Sampling");

        tracing::info!("Building table and statistics...");
        let result = self.pipeline.transform(samples)?;
        tracing::info!(
            "Tabulated {} records, summarized {} segments",
            result.table.len(),
            result.stats.len()
        );
        self.monitor.log_stats("Tabulation");

        tracing::info!("Rendering chart...");
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Chart saved to: {}", output_path);
        self.monitor.log_stats("Rendering");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
