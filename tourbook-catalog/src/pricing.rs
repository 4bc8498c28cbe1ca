use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tourbook_shared::{AvailableDeparture, TourAvailability};
use uuid::Uuid;

/// Traveler mix and extras for a prospective booking.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub date: String,
    pub adults: u32,
    #[serde(default)]
    pub children_with_bed: u32,
    #[serde(default)]
    pub children_without_bed: u32,
    #[serde(default)]
    pub extra_adults_same_room: u32,
    #[serde(default)]
    pub single_rooms: u32,
    /// Addon ids or names, charged per traveler
    #[serde(default)]
    pub addons: Vec<String>,
}

impl QuoteRequest {
    pub fn travelers(&self) -> u32 {
        self.adults
            .saturating_add(self.children_with_bed)
            .saturating_add(self.children_without_bed)
            .saturating_add(self.extra_adults_same_room)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub label: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingQuote {
    pub quote_id: Uuid,
    pub date: String,
    pub currency: String,
    pub travelers: u32,
    pub lines: Vec<QuoteLine>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QuoteError {
    #[error("No departure available on {0}")]
    DateUnavailable(String),

    #[error("Traveler count {requested} outside allowed range {min}-{max}")]
    TravelerCount {
        requested: u32,
        min: u32,
        max: u32,
    },

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats {
        requested: u32,
        available: u64,
    },

    #[error("Tour has no price for the selected departure")]
    PriceUnavailable,

    #[error("Unknown addon: {0}")]
    UnknownAddon(String),

    #[error("Invalid quote request: {0}")]
    InvalidRequest(String),
}

/// Validates a booking request against resolved availability and prices it.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine;

impl QuoteEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn quote(
        &self,
        availability: &TourAvailability,
        request: &QuoteRequest,
    ) -> Result<BookingQuote, QuoteError> {
        if request.adults == 0 {
            return Err(QuoteError::InvalidRequest("at least one adult is required".to_string()));
        }
        if request.single_rooms > request.adults {
            return Err(QuoteError::InvalidRequest(format!(
                "{} single rooms requested for {} adults",
                request.single_rooms, request.adults
            )));
        }

        let departure = availability
            .departure_on(&request.date)
            .ok_or_else(|| QuoteError::DateUnavailable(request.date.clone()))?;

        let travelers = request.travelers();
        if travelers < availability.min_travelers || travelers > availability.max_travelers {
            return Err(QuoteError::TravelerCount {
                requested: travelers,
                min: availability.min_travelers,
                max: availability.max_travelers,
            });
        }

        if u64::from(travelers) > departure.available_seats {
            return Err(QuoteError::InsufficientSeats {
                requested: travelers,
                available: departure.available_seats,
            });
        }

        let unit_price = self.unit_price(availability, departure, travelers);
        if unit_price <= 0.0 {
            return Err(QuoteError::PriceUnavailable);
        }

        let mut lines = vec![line("Adult", request.adults, unit_price)];
        let supplements = [
            ("Child with bed", request.children_with_bed, availability.child_with_bed),
            ("Child without bed", request.children_without_bed, availability.child_without_bed),
            ("Extra adult (same room)", request.extra_adults_same_room, availability.extra_adult_same_room),
            ("Single room supplement", request.single_rooms, availability.single_room_supplement),
        ];
        lines.extend(
            supplements
                .into_iter()
                .filter(|(_, quantity, _)| *quantity > 0)
                .map(|(label, quantity, unit)| line(label, quantity, unit)),
        );

        for requested in &request.addons {
            let addon = find_addon(&availability.addons, requested)
                .ok_or_else(|| QuoteError::UnknownAddon(requested.clone()))?;
            let label = addon
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(requested.as_str());
            lines.push(line(label, travelers, amount_of(addon.get("price"))));
        }

        let total = round_currency(lines.iter().map(|l| l.amount).sum());

        tracing::info!(
            "Quoted {} {} for {} travelers on {}",
            total,
            availability.currency,
            travelers,
            request.date
        );

        Ok(BookingQuote {
            quote_id: Uuid::new_v4(),
            date: request.date.clone(),
            currency: availability.currency.clone(),
            travelers,
            lines,
            total,
            created_at: Utc::now(),
        })
    }

    /// Per-adult price for a group booked on `departure`.
    ///
    /// Pricing tiers belong to the anchor departure, so they only apply when
    /// that is the date being booked: the first tier whose bounds contain the
    /// group size wins. Every other date is charged its own price.
    pub fn unit_price(
        &self,
        availability: &TourAvailability,
        departure: &AvailableDeparture,
        group_size: u32,
    ) -> f64 {
        let is_anchor = availability.departures.first() == Some(departure);
        if !is_anchor {
            return departure.price_per_person;
        }

        availability
            .pricing_tiers
            .iter()
            .find_map(|tier| tier_price(tier, group_size))
            .unwrap_or(departure.price_per_person)
    }
}

fn tier_price(tier: &Value, group_size: u32) -> Option<f64> {
    let tier = tier.as_object()?;
    let min = tier.get("minTravelers").and_then(Value::as_u64);
    let max = tier.get("maxTravelers").and_then(Value::as_u64);
    if min.is_none() && max.is_none() {
        return None;
    }

    let size = u64::from(group_size);
    let fits = min.map_or(true, |m| size >= m) && max.map_or(true, |m| size <= m);
    let price = amount_of(tier.get("pricePerPerson"));

    (fits && price > 0.0).then_some(price)
}

fn find_addon<'a>(addons: &'a [Value], requested: &str) -> Option<&'a Value> {
    addons.iter().find(|addon| {
        ["id", "name"]
            .iter()
            .any(|key| addon.get(*key).and_then(Value::as_str) == Some(requested))
    })
}

fn amount_of(value: Option<&Value>) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(a) if a.is_finite() && a > 0.0 => a,
        _ => 0.0,
    }
}

fn line(label: &str, quantity: u32, unit_price: f64) -> QuoteLine {
    QuoteLine {
        label: label.to_string(),
        quantity,
        unit_price,
        amount: round_currency(unit_price * f64::from(quantity)),
    }
}

fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn availability() -> TourAvailability {
        let mut availability = TourAvailability::empty("Leh", "6 Days", "INR", 2, 8);
        for (date, seats, price) in [("2099-06-01", 6, 20000.0), ("2099-07-01", 2, 22000.0)] {
            availability.available_dates.push(date.to_string());
            availability.seats_available += seats;
            availability.departures.push(AvailableDeparture {
                date: date.to_string(),
                available_seats: seats,
                total_seats: 12,
                price_per_person: price,
            });
        }
        availability.price_per_person = 20000.0;
        availability.child_with_bed = 15000.0;
        availability.single_room_supplement = 6000.0;
        availability.addons = vec![json!({ "id": "rafting", "name": "River rafting", "price": 1500 })];
        availability
    }

    fn request(date: &str, adults: u32) -> QuoteRequest {
        QuoteRequest {
            date: date.to_string(),
            adults,
            children_with_bed: 0,
            children_without_bed: 0,
            extra_adults_same_room: 0,
            single_rooms: 0,
            addons: vec![],
        }
    }

    #[test]
    fn test_quote_with_supplements_and_addons() {
        let engine = QuoteEngine::new();
        let mut req = request("2099-06-01", 2);
        req.children_with_bed = 1;
        req.single_rooms = 1;
        req.addons = vec!["rafting".to_string()];

        let quote = engine.quote(&availability(), &req).unwrap();

        assert_eq!(quote.travelers, 3);
        assert_eq!(quote.currency, "INR");
        assert_eq!(quote.lines.len(), 4);
        assert_eq!(quote.lines[3].label, "River rafting");
        assert_eq!(quote.lines[3].amount, 4500.0);
        // 2 x 20000 + 15000 + 6000 + 3 x 1500
        assert_eq!(quote.total, 65500.0);
    }

    #[test]
    fn test_unavailable_date() {
        let engine = QuoteEngine::new();
        let err = engine.quote(&availability(), &request("2099-08-01", 2)).unwrap_err();
        assert_eq!(err, QuoteError::DateUnavailable("2099-08-01".to_string()));
    }

    #[test]
    fn test_traveler_limits() {
        let engine = QuoteEngine::new();
        let err = engine.quote(&availability(), &request("2099-06-01", 1)).unwrap_err();
        assert!(matches!(err, QuoteError::TravelerCount { requested: 1, min: 2, max: 8 }));
    }

    #[test]
    fn test_seats_checked_per_date() {
        let engine = QuoteEngine::new();
        let err = engine.quote(&availability(), &request("2099-07-01", 3)).unwrap_err();
        assert_eq!(err, QuoteError::InsufficientSeats { requested: 3, available: 2 });
    }

    #[test]
    fn test_unknown_addon() {
        let engine = QuoteEngine::new();
        let mut req = request("2099-06-01", 2);
        req.addons = vec!["paragliding".to_string()];

        let err = engine.quote(&availability(), &req).unwrap_err();
        assert_eq!(err, QuoteError::UnknownAddon("paragliding".to_string()));
    }

    #[test]
    fn test_missing_price() {
        let engine = QuoteEngine::new();
        let mut unpriced = availability();
        unpriced.price_per_person = 0.0;
        unpriced.departures[0].price_per_person = 0.0;

        let err = engine.quote(&unpriced, &request("2099-06-01", 2)).unwrap_err();
        assert_eq!(err, QuoteError::PriceUnavailable);
    }

    #[test]
    fn test_tier_pricing() {
        let engine = QuoteEngine::new();
        let mut tiered = availability();
        tiered.pricing_tiers = vec![
            json!({ "label": "opaque" }),
            json!({ "minTravelers": 4, "maxTravelers": 6, "pricePerPerson": 17500 }),
            json!({ "minTravelers": 2, "pricePerPerson": 19000 }),
        ];

        let anchor = &tiered.departures[0];
        assert_eq!(engine.unit_price(&tiered, anchor, 5), 17500.0);
        assert_eq!(engine.unit_price(&tiered, anchor, 3), 19000.0);
        assert_eq!(engine.unit_price(&tiered, anchor, 1), 20000.0);

        // tiers are authored on the anchor only
        let later = &tiered.departures[1];
        assert_eq!(engine.unit_price(&tiered, later, 5), 22000.0);
    }

    #[test]
    fn test_later_date_uses_its_own_price() {
        let engine = QuoteEngine::new();
        let quote = engine.quote(&availability(), &request("2099-07-01", 2)).unwrap();

        assert_eq!(quote.lines[0].unit_price, 22000.0);
        assert_eq!(quote.total, 44000.0);
    }

    #[test]
    fn test_request_validation() {
        let engine = QuoteEngine::new();
        let mut req = request("2099-06-01", 0);
        req.children_with_bed = 2;
        assert!(matches!(
            engine.quote(&availability(), &req),
            Err(QuoteError::InvalidRequest(_))
        ));

        let mut req = request("2099-06-01", 2);
        req.single_rooms = 3;
        assert!(matches!(
            engine.quote(&availability(), &req),
            Err(QuoteError::InvalidRequest(_))
        ));
    }
}
