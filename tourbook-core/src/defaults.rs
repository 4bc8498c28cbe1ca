use serde::Deserialize;

/// Fallbacks used when a schedule (or the tour around it) leaves a field unset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverDefaults {
    pub location: String,
    pub duration: String,
    pub currency: String,
    pub min_travelers: u32,
    pub max_travelers: u32,
    /// Drop departures dated before today when resolving a tour.
    pub hide_past_departures: bool,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            location: "India".to_string(),
            duration: "Multiple Days".to_string(),
            currency: "INR".to_string(),
            min_travelers: 1,
            max_travelers: 30,
            hide_past_departures: false,
        }
    }
}
