use crate::domain::model::{CityGroups, CityRecord, RawRecord, StateRecord, UNKNOWN_STATE_CODE};
use crate::utils::collation::sort_by_name;
use crate::utils::error::{EtlError, Result};

fn in_country(record: &RawRecord, country_code: &str) -> bool {
    record.country_code.as_deref() == Some(country_code)
}

/// Grouping key for a city: its state_code, or the reserved `UNKNOWN` group
/// when the code is absent or empty.
pub fn group_key(state_code: Option<&str>) -> &str {
    match state_code {
        Some(code) if !code.is_empty() => code,
        _ => UNKNOWN_STATE_CODE,
    }
}

/// Name and id of a row that passed the country filter. Only these rows are
/// required to carry both.
fn name_and_id(record: &RawRecord, kind: &str) -> Result<(String, u64)> {
    match (&record.name, record.id) {
        (Some(name), Some(id)) => Ok((name.clone(), id)),
        _ => Err(EtlError::ProcessingError {
            message: format!(
                "{} record (name: {:?}, id: {:?}, state_code: {:?}) lacks a usable name or id",
                kind, record.name, record.id, record.state_code
            ),
        }),
    }
}

/// States of `country_code`, projected and sorted by name.
pub fn derive_states(raw_states: &[RawRecord], country_code: &str) -> Result<Vec<StateRecord>> {
    let mut states = raw_states
        .iter()
        .filter(|s| in_country(s, country_code))
        .map(|s| {
            let (name, id) = name_and_id(s, "state")?;
            Ok(StateRecord {
                state_code: s.state_code.clone(),
                name,
                id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    sort_by_name(&mut states, |s| s.name.as_str());
    Ok(states)
}

/// Cities of `country_code` grouped by state_code, each group sorted by name.
/// Every matching city lands in exactly one group.
pub fn derive_city_groups(raw_cities: &[RawRecord], country_code: &str) -> Result<CityGroups> {
    let mut groups = CityGroups::new();

    for city in raw_cities.iter().filter(|c| in_country(c, country_code)) {
        let (name, id) = name_and_id(city, "city")?;
        groups
            .entry(group_key(city.state_code.as_deref()).to_string())
            .or_default()
            .push(CityRecord { name, id });
    }

    for cities in groups.values_mut() {
        sort_by_name(cities, |c| c.name.as_str());
    }

    Ok(groups)
}
