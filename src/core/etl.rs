use crate::core::{BuildSummary, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a [`Pipeline`] end to end: extract, transform, then load (or only
/// plan, in dry-run mode). Any error aborts the run and is returned as is.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    dry_run: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<BuildSummary> {
        tracing::info!("Starting build");

        let raw = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} state and {} city records",
            raw.states.len(),
            raw.cities.len()
        );
        self.monitor.log_stats("Extract");

        let bundle = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Derived {} states and {} cities in {} groups",
            bundle.states.len(),
            bundle.city_count(),
            bundle.city_groups.len()
        );
        self.monitor.log_stats("Transform");

        let summary = if self.dry_run {
            tracing::info!("Dry run: skipping writes");
            self.pipeline.plan(&bundle)?
        } else {
            let summary = self.pipeline.load(bundle).await?;
            tracing::info!("Output saved to: {}", summary.output_path);
            summary
        };
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DistBundle, RawDatasets};
    use crate::domain::model::{RawRecord, StateRecord};
    use crate::utils::error::EtlError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records which phases ran; optionally fails extract.
    #[derive(Default)]
    struct ScriptedPipeline {
        fail_extract: bool,
        loads: AtomicUsize,
        transforms: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for ScriptedPipeline {
        async fn extract(&self) -> Result<RawDatasets> {
            if self.fail_extract {
                return Err(EtlError::NonJsonResponse {
                    url: "http://upstream.test/states.json".to_string(),
                    snippet: "<html>".to_string(),
                });
            }
            Ok(RawDatasets {
                states: vec![RawRecord {
                    country_code: Some("IN".to_string()),
                    state_code: Some("KA".to_string()),
                    name: Some("Karnataka".to_string()),
                    id: Some(1),
                }],
                cities: vec![],
            })
        }

        async fn transform(&self, data: RawDatasets) -> Result<DistBundle> {
            self.transforms.fetch_add(1, Ordering::SeqCst);
            Ok(DistBundle {
                states: data
                    .states
                    .into_iter()
                    .map(|s| StateRecord {
                        state_code: s.state_code,
                        name: s.name.unwrap_or_default(),
                        id: s.id.unwrap_or_default(),
                    })
                    .collect(),
                city_groups: Default::default(),
            })
        }

        fn plan(&self, bundle: &DistBundle) -> Result<BuildSummary> {
            Ok(BuildSummary {
                output_path: "dist".to_string(),
                states_file: "dist/states.json".to_string(),
                state_count: bundle.states.len(),
                city_files: vec![],
                city_count: bundle.city_count(),
                written: false,
            })
        }

        async fn load(&self, bundle: DistBundle) -> Result<BuildSummary> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let mut summary = self.plan(&bundle)?;
            summary.written = true;
            Ok(summary)
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_phases() {
        let engine = EtlEngine::new(ScriptedPipeline::default());

        let summary = engine.run().await.unwrap();

        assert!(summary.written);
        assert_eq!(summary.state_count, 1);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dry_run_skips_load() {
        let engine = EtlEngine::new(ScriptedPipeline::default()).dry_run(true);

        let summary = engine.run().await.unwrap();

        assert!(!summary.written);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_failure_aborts_before_transform() {
        let pipeline = ScriptedPipeline {
            fail_extract: true,
            ..Default::default()
        };
        let engine = EtlEngine::new_with_monitoring(pipeline, false);

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, EtlError::NonJsonResponse { .. }));
        assert_eq!(engine.pipeline.transforms.load(Ordering::SeqCst), 0);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
