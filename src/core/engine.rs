use crate::domain::model::RunReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

/// Drives the pipeline through extract → transform → load.
///
/// A load failure is logged and tolerated; the run still returns its strains
/// so the recommendation loop can use them.
pub struct Engine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();

        println!("Starting strain analysis...");
        println!("{}", "=".repeat(50));

        let listings = self.pipeline.extract().await?;
        tracing::info!("📊 Extracted {} strain listings", listings.len());
        self.monitor.log_stats("Extract");

        let strains = self.pipeline.transform(listings).await?;
        tracing::info!("✅ Analyzed {} strains", strains.len());
        self.monitor.log_stats("Transform");

        println!("\nAnalysis Complete!");
        println!("Total strains analyzed: {}", strains.len());

        let output_path = match self.pipeline.load(&strains).await {
            Ok(path) => {
                tracing::info!("📁 Report saved to: {}", path);
                Some(path)
            }
            Err(e) => {
                tracing::error!("❌ Error saving results: {}", e);
                println!("Error saving results: {}", e);
                None
            }
        };
        self.monitor.log_final_stats();

        Ok(RunReport {
            strains,
            output_path,
            duration: started.elapsed(),
        })
    }
}
