use serde_json::{Map, Value};
use tourbook_shared::ScheduleField;

/// The only status value with meaning; everything else counts as open.
pub const SOLD_OUT: &str = "sold_out";

/// Ways a CMS-authored schedule can be unusable.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("schedule is not a JSON object")]
    NotAnObject,

    #[error("schedule has no `departures` field")]
    MissingDepartures,

    #[error("schedule `departures` is not a list")]
    DeparturesNotAList,
}

/// A decoded `departure_schedule` payload.
///
/// Every field is read through a defaulted lookup, so a schedule only fails to
/// parse when its overall shape is wrong. Individual bad values degrade to
/// zero/empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSchedule {
    /// Source order is kept; non-object entries are already dropped.
    pub departures: Vec<RawDeparture>,
    pub metadata: ScheduleMetadata,
}

impl RawSchedule {
    /// Returns `Ok(None)` for an absent schedule (blank text, JSON `null` or `false`).
    pub fn parse(field: &ScheduleField) -> Result<Option<Self>, ScheduleError> {
        let value = match field {
            ScheduleField::Text(text) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let decoded: Value = serde_json::from_str(text)?;
                // ACF exports occasionally encode the blob twice
                match decoded {
                    Value::String(inner) if !inner.trim().is_empty() => serde_json::from_str(&inner)?,
                    Value::String(_) => return Ok(None),
                    other => other,
                }
            }
            ScheduleField::Structured(value) => value.clone(),
        };

        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Option<Self>, ScheduleError> {
        let obj = match value {
            // ACF reports an empty field as `false`
            Value::Null | Value::Bool(false) => return Ok(None),
            Value::Object(obj) => obj,
            _ => return Err(ScheduleError::NotAnObject),
        };

        let entries = match obj.get("departures") {
            None | Some(Value::Null) => return Err(ScheduleError::MissingDepartures),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(ScheduleError::DeparturesNotAList),
        };

        let departures = entries.iter().filter_map(RawDeparture::from_value).collect();
        let metadata = obj
            .get("metadata")
            .and_then(Value::as_object)
            .map(ScheduleMetadata::from_object)
            .unwrap_or_default();

        Ok(Some(Self { departures, metadata }))
    }
}

/// One authored departure, with every field defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDeparture {
    pub date: Option<String>,
    pub status: Option<String>,
    pub available_seats: u64,
    pub total_seats: u64,
    pub price_per_person: f64,
    pub pricing_tiers: Vec<Value>,
    pub child_with_bed: f64,
    pub child_without_bed: f64,
    pub extra_adult_same_room: f64,
    pub single_room_supplement: f64,
    pub addons: Vec<Value>,
}

impl RawDeparture {
    /// `None` when the entry is not an object at all.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            date: read_text(obj, "date"),
            status: obj.get("status").and_then(Value::as_str).map(str::to_string),
            available_seats: read_count(obj, "availableSeats"),
            total_seats: read_count(obj, "totalSeats"),
            price_per_person: read_amount(obj, "pricePerPerson"),
            pricing_tiers: read_list(obj, "pricingTiers"),
            child_with_bed: read_amount(obj, "childWithBed"),
            child_without_bed: read_amount(obj, "childWithoutBed"),
            extra_adult_same_room: read_amount(obj, "extraAdultSameRoom"),
            single_room_supplement: read_amount(obj, "singleRoomSupplement"),
            addons: read_list(obj, "addons"),
        })
    }

    /// Literal comparison: `"Sold_Out"` or `" sold_out"` are still open.
    pub fn is_sold_out(&self) -> bool {
        self.status.as_deref() == Some(SOLD_OUT)
    }
}

/// Tour-level values authored alongside the departures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleMetadata {
    pub location: Option<String>,
    pub duration: Option<String>,
    pub currency: Option<String>,
    pub min_travelers: Option<u32>,
    pub max_travelers: Option<u32>,
}

impl ScheduleMetadata {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            location: read_text(obj, "location"),
            duration: read_text(obj, "duration"),
            currency: read_text(obj, "currency"),
            min_travelers: read_traveler_limit(obj, "minTravelers"),
            max_travelers: read_traveler_limit(obj, "maxTravelers"),
        }
    }
}

/// Non-blank text, trimmed. Bare numbers are accepted (`"duration": 7`).
fn read_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative finite number; numeric strings accepted, anything else is 0.
fn read_amount(obj: &Map<String, Value>, key: &str) -> f64 {
    let amount = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match amount {
        Some(a) if a.is_finite() && a > 0.0 => a,
        _ => 0.0,
    }
}

/// Seat counts truncate fractional input and clamp negatives to 0.
fn read_count(obj: &Map<String, Value>, key: &str) -> u64 {
    read_amount(obj, key).trunc() as u64
}

fn read_list(obj: &Map<String, Value>, key: &str) -> Vec<Value> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Reads the leading integer the way editors write it: `2.5` is 2 and
/// `"10 people"` is 10. Zero is treated like a missing limit so the configured
/// default applies.
fn read_traveler_limit(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    let limit = match obj.get(key)? {
        Value::Number(n) => n
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(|n| n.trunc() as u32),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        }
        _ => None,
    };
    limit.filter(|&n| n > 0)
}
