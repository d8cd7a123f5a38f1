//! Answer values and the payload shapes sent to the server.

use super::SessionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single collected answer. Radios report the literal `"on"`/`"off"`
/// codes as text, checkboxes report their boolean state, multi-selects
/// report the ordered list of selected option values.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Multi(Vec<String>),
    Text(String),
}

impl Answer {
    pub fn text(value: &str) -> Answer {
        Answer::Text(value.to_owned())
    }
}

/// Answers of one accordion section, keyed by field name.
pub type SectionAnswers = HashMap<String, Answer>;

/// Answers of one card, keyed by section key.
pub type FormAnswers = HashMap<String, SectionAnswers>;

/// Mine location as the overview endpoint expects it.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLocation {
    pub latitude: String,
    pub longitude: String,
}

/// Body of `/update-overview/`.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewPayload {
    pub fingerprint: String,
    pub project_name: String,
    pub company_name: String,
    pub mine_ubication: MineLocation,
    pub phase: String,
}

/// Body of the dimension update endpoints: the fingerprint next to the
/// aggregated section answers.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionPayload {
    pub fingerprint: String,
    #[serde(flatten)]
    pub sections: FormAnswers,
}

/// Parse a stored multi-select value back into its value list. Accepts a
/// well-formed JSON string array or a comma-separated string; anything
/// else is rejected rather than repaired.
///
pub fn parse_multi_values(raw: &str) -> Result<Vec<String>, SessionError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|_| SessionError::MalformedValueList(raw.to_owned()));
    }
    Ok(trimmed
        .split(',')
        .map(|value| value.trim().to_owned())
        .collect())
}
