use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved group for cities whose upstream `state_code` is missing or empty.
pub const UNKNOWN_STATE_CODE: &str = "UNKNOWN";

/// One upstream row from either `states.json` or `cities.json`. Only the
/// fields the build needs are decoded; everything else is ignored. Decoding
/// never fails on a field's type: a value of the wrong type reads as absent,
/// so rows from other countries cannot break the build.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
}

impl RawRecord {
    /// Decodes one array element; anything that is not an object becomes an
    /// empty record, which no country filter matches.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// Numeric codes are kept as their decimal text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Field order here is the key order in `states.json`. A state without an
/// upstream code keeps it as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state_code: Option<String>,
    pub name: String,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub id: u64,
}

/// state_code (or [`UNKNOWN_STATE_CODE`]) -> cities sorted by name.
pub type CityGroups = BTreeMap<String, Vec<CityRecord>>;

#[derive(Debug, Clone, Default)]
pub struct RawDatasets {
    pub states: Vec<RawRecord>,
    pub cities: Vec<RawRecord>,
}

/// Everything the writer persists for one run.
#[derive(Debug, Clone, Default)]
pub struct DistBundle {
    pub states: Vec<StateRecord>,
    pub city_groups: CityGroups,
}

impl DistBundle {
    pub fn city_count(&self) -> usize {
        self.city_groups.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_path: String,
    pub states_file: String,
    pub state_count: usize,
    pub city_files: Vec<String>,
    pub city_count: usize,
    pub written: bool,
}
