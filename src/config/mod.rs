pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// Release tag of the upstream dataset the build is pinned to.
pub const DATASET_REF: &str = "v3.0";
pub const COUNTRY_CODE: &str = "IN";
pub const DEFAULT_OUTPUT_PATH: &str = "dist";

const DATASET_BASE_URL: &str =
    "https://raw.githubusercontent.com/dr5hn/countries-states-cities-database";

/// Upstream dataset and the country it is filtered to. Fixed at build time;
/// tests construct their own to point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub states_url: String,
    pub cities_url: String,
    pub country_code: String,
}

impl DatasetConfig {
    pub fn for_ref(dataset_ref: &str, country_code: &str) -> Self {
        Self {
            states_url: format!("{}/{}/json/states.json", DATASET_BASE_URL, dataset_ref),
            cities_url: format!("{}/{}/json/cities.json", DATASET_BASE_URL, dataset_ref),
            country_code: country_code.to_string(),
        }
    }

    pub fn with_urls(states_url: String, cities_url: String, country_code: &str) -> Self {
        Self {
            states_url,
            cities_url,
            country_code: country_code.to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::for_ref(DATASET_REF, COUNTRY_CODE)
    }
}

/// Everything one build needs, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub dataset: DatasetConfig,
    pub output_path: String,
}

impl BuildConfig {
    pub fn new(dataset: DatasetConfig, output_path: impl Into<String>) -> Self {
        Self {
            dataset,
            output_path: output_path.into(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(DatasetConfig::default(), DEFAULT_OUTPUT_PATH)
    }
}

impl ConfigProvider for BuildConfig {
    fn states_url(&self) -> &str {
        &self.dataset.states_url
    }

    fn cities_url(&self) -> &str {
        &self.dataset.cities_url
    }

    fn country_code(&self) -> &str {
        &self.dataset.country_code
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("dataset.states_url", &self.dataset.states_url)?;
        validation::validate_url("dataset.cities_url", &self.dataset.cities_url)?;
        validation::validate_non_empty_string("dataset.country_code", &self.dataset.country_code)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

/// Command-line front end. The dataset and country are deliberately not
/// flags; every flag is optional and the bare invocation writes to `dist/`.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "state-city-dist")]
#[command(about = "Generate static states/cities JSON files for one country")]
pub struct CliConfig {
    /// Root directory for states.json and cities/
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Fetch and transform, but write nothing")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::new(DatasetConfig::default(), self.output_path.clone())
    }
}
