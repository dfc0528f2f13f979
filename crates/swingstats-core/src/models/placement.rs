use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lookup payloads for unknown ids carry only a couple of bookkeeping keys.
/// Anything at or below this key count is treated as "no such dancer".
const MIN_DANCER_KEYS: usize = 2;

/// Placements keyed by dance style ("West Coast Swing", "Lindy Hop", ...)
pub type Placements = BTreeMap<String, Vec<DivisionEntry>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub dancer: Dancer,
    // The registry sends `[]` instead of `{}` for dancers without placements
    #[serde(default, deserialize_with = "deserialize_placements", skip_serializing_if = "Option::is_none")]
    pub placements: Option<Placements>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dancer {
    pub wscid: u32,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionEntry {
    pub division: DivisionRef,
    #[serde(default)]
    pub total_points: i64,
    /// Newest first, as returned by the registry
    #[serde(default)]
    pub competitions: Vec<CompetitionResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionRef {
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionResult {
    #[serde(default)]
    pub points: i64,
    /// Finishing place as text: "1".."5", or "F" for finalist
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub role: String,
    pub event: EventRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Month and year, e.g. "June 2016"
    #[serde(default)]
    pub date: String,
}

fn deserialize_placements<'de, D>(deserializer: D) -> Result<Option<Placements>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PlacementsWire {
        Styles(Placements),
        Empty(Vec<Value>),
    }

    Ok(match Option::<PlacementsWire>::deserialize(deserializer)? {
        Some(PlacementsWire::Styles(styles)) => Some(styles),
        Some(PlacementsWire::Empty(_)) | None => None,
    })
}

impl LookupResponse {
    /// Returns true when the payload looks like a real dancer record.
    pub fn is_dancer_payload(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|fields| fields.len() > MIN_DANCER_KEYS)
    }

    /// Returns true when the payload carries a `placements` key at all,
    /// even an empty one.
    pub fn has_placements_key(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|fields| fields.contains_key("placements"))
    }

    /// Parse a raw lookup payload. Returns `Ok(None)` for ids the registry
    /// does not know about.
    pub fn from_value(value: Value) -> Result<Option<Self>, serde_json::Error> {
        if !Self::is_dancer_payload(&value) {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some)
    }

    pub fn wscid(&self) -> u32 {
        self.dancer.wscid
    }

    /// Division entries recorded for one dance style, in registry order
    pub fn style(&self, dance_style: &str) -> Option<&[DivisionEntry]> {
        self.placements
            .as_ref()
            .and_then(|styles| styles.get(dance_style))
            .map(|entries| entries.as_slice())
    }
}

impl DivisionEntry {
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.competitions.iter().map(|c| c.event.location.as_str())
    }
}
