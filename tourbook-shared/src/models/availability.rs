use serde::{Deserialize, Serialize};

/// Bookable view of a tour's departure schedule.
///
/// Built fresh on every resolution and never mutated afterwards. When
/// `available_dates` is empty, seats, prices, tiers and addons are all at
/// their zero/empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourAvailability {
    pub available_dates: Vec<String>,
    pub seats_available: u64,
    pub departures: Vec<AvailableDeparture>,

    // Taken from the anchor departure
    pub price_per_person: f64,
    pub pricing_tiers: Vec<serde_json::Value>,
    pub child_with_bed: f64,
    pub child_without_bed: f64,
    pub extra_adult_same_room: f64,
    pub single_room_supplement: f64,
    pub addons: Vec<serde_json::Value>,

    pub location: String,
    pub duration: String,
    pub currency: String,
    pub min_travelers: u32,
    pub max_travelers: u32,
}

impl TourAvailability {
    /// Availability with nothing bookable, carrying only the descriptive fields.
    pub fn empty(
        location: impl Into<String>,
        duration: impl Into<String>,
        currency: impl Into<String>,
        min_travelers: u32,
        max_travelers: u32,
    ) -> Self {
        Self {
            available_dates: Vec::new(),
            seats_available: 0,
            departures: Vec::new(),
            price_per_person: 0.0,
            pricing_tiers: Vec::new(),
            child_with_bed: 0.0,
            child_without_bed: 0.0,
            extra_adult_same_room: 0.0,
            single_room_supplement: 0.0,
            addons: Vec::new(),
            location: location.into(),
            duration: duration.into(),
            currency: currency.into(),
            min_travelers,
            max_travelers,
        }
    }

    pub fn has_departures(&self) -> bool {
        !self.available_dates.is_empty()
    }

    pub fn departure_on(&self, date: &str) -> Option<&AvailableDeparture> {
        self.departures.iter().find(|d| d.date == date)
    }
}

/// One bookable departure, kept so a booking can be checked against the seats of its own date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDeparture {
    pub date: String,
    pub available_seats: u64,
    pub total_seats: u64,
    pub price_per_person: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_availability_serializes_camel_case() {
        let availability = TourAvailability::empty("India", "Multiple Days", "INR", 1, 30);
        let value = serde_json::to_value(&availability).unwrap();

        assert_eq!(value["availableDates"], serde_json::json!([]));
        assert_eq!(value["seatsAvailable"], 0);
        assert_eq!(value["minTravelers"], 1);
        assert_eq!(value["maxTravelers"], 30);
        assert!(!availability.has_departures());
    }

    #[test]
    fn test_departure_lookup() {
        let mut availability = TourAvailability::empty("India", "5 Days", "INR", 1, 30);
        availability.available_dates.push("2025-05-01".to_string());
        availability.departures.push(AvailableDeparture {
            date: "2025-05-01".to_string(),
            available_seats: 4,
            total_seats: 12,
            price_per_person: 15000.0,
        });

        assert_eq!(availability.departure_on("2025-05-01").unwrap().available_seats, 4);
        assert!(availability.departure_on("2025-06-01").is_none());
    }
}
