use crate::core::fetch::HttpSource;
use crate::core::transform::{derive_city_groups, derive_states};
use crate::domain::model::{
    BuildSummary, CityRecord, DistBundle, RawDatasets, StateRecord, UNKNOWN_STATE_CODE,
};
use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_file_stem;

pub const STATES_FILE: &str = "states.json";
pub const CITIES_DIR: &str = "cities";

pub fn city_file_path(state_code: &str) -> String {
    format!("{}/{}.json", CITIES_DIR, state_code)
}

/// Fetch both datasets, filter to one country, write states.json and one
/// cities/<STATE_CODE>.json per group.
pub struct DistPipeline<S: Storage, F: RecordSource, C: ConfigProvider> {
    storage: S,
    source: F,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DistPipeline<S, HttpSource, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_source(storage, HttpSource::new(), config)
    }
}

impl<S: Storage, F: RecordSource, C: ConfigProvider> DistPipeline<S, F, C> {
    pub fn with_source(storage: S, source: F, config: C) -> Self {
        Self {
            storage,
            source,
            config,
        }
    }

    pub async fn write_states(&self, states: &[StateRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(states)?;
        self.storage.write_file(STATES_FILE, json.as_bytes()).await
    }

    pub async fn write_city_group(&self, state_code: &str, cities: &[CityRecord]) -> Result<()> {
        validate_file_stem("state_code", state_code)?;
        let json = serde_json::to_string_pretty(cities)?;
        self.storage
            .write_file(&city_file_path(state_code), json.as_bytes())
            .await
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: RecordSource, C: ConfigProvider> Pipeline for DistPipeline<S, F, C> {
    async fn extract(&self) -> Result<RawDatasets> {
        tracing::info!("Fetching states from {}", self.config.states_url());
        tracing::info!("Fetching cities from {}", self.config.cities_url());

        // First error wins; the other request is dropped.
        let (states, cities) = tokio::try_join!(
            self.source.fetch(self.config.states_url()),
            self.source.fetch(self.config.cities_url()),
        )?;

        tracing::debug!(
            "Fetched {} state rows and {} city rows",
            states.len(),
            cities.len()
        );
        Ok(RawDatasets { states, cities })
    }

    async fn transform(&self, data: RawDatasets) -> Result<DistBundle> {
        let country = self.config.country_code();
        let states = derive_states(&data.states, country)?;
        let city_groups = derive_city_groups(&data.cities, country)?;

        if let Some(unknown) = city_groups.get(UNKNOWN_STATE_CODE) {
            tracing::warn!(
                "{} cities in {} have no state_code; grouped as UNKNOWN",
                unknown.len(),
                country
            );
        }

        Ok(DistBundle {
            states,
            city_groups,
        })
    }

    fn plan(&self, bundle: &DistBundle) -> Result<BuildSummary> {
        let mut city_files = Vec::with_capacity(bundle.city_groups.len());
        for state_code in bundle.city_groups.keys() {
            validate_file_stem("state_code", state_code)?;
            city_files.push(self.storage.display_path(&city_file_path(state_code)));
        }

        Ok(BuildSummary {
            output_path: self.storage.display_path(""),
            states_file: self.storage.display_path(STATES_FILE),
            state_count: bundle.states.len(),
            city_files,
            city_count: bundle.city_count(),
            written: false,
        })
    }

    async fn load(&self, bundle: DistBundle) -> Result<BuildSummary> {
        // Reject unusable state codes before anything reaches disk.
        let mut summary = self.plan(&bundle)?;
        tracing::info!("Writing output under {}", self.config.output_path());

        self.storage.ensure_dir(CITIES_DIR).await?;

        self.write_states(&bundle.states).await?;
        tracing::debug!("Wrote {} states", bundle.states.len());

        for (state_code, cities) in &bundle.city_groups {
            self.write_city_group(state_code, cities).await?;
            tracing::debug!("Wrote {} cities for {}", cities.len(), state_code);
        }

        summary.written = true;
        Ok(summary)
    }
}
