use chrono::{NaiveDate, Utc};
use tourbook_shared::{AvailableDeparture, RawTour, ScheduleField, TourAvailability};
use tracing::{debug, warn};

use crate::defaults::ResolverDefaults;
use crate::schedule::{RawDeparture, RawSchedule, ScheduleError, ScheduleMetadata};

/// Values known about a tour outside its schedule, used as the second
/// precedence level after schedule metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHints {
    /// Only used to label log lines.
    pub slug: Option<String>,
    /// Destination taxonomy terms, already joined for display.
    pub location: Option<String>,
    pub duration: Option<String>,
}

impl SourceHints {
    pub fn from_tour(tour: &RawTour) -> Self {
        Self {
            slug: Some(tour.slug.clone()),
            location: tour.destination_label(),
            duration: tour
                .acf
                .duration
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }

    fn label(&self) -> &str {
        self.slug.as_deref().unwrap_or("<unknown>")
    }
}

/// Turns a raw `departure_schedule` field into a [`TourAvailability`].
///
/// Resolution is total: malformed input is logged and degrades to an
/// availability with no departures, so tour pages keep rendering whatever an
/// editor typed into the CMS.
#[derive(Debug, Clone, Default)]
pub struct ScheduleResolver {
    defaults: ResolverDefaults,
}

impl ScheduleResolver {
    pub fn new(defaults: ResolverDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ResolverDefaults {
        &self.defaults
    }

    /// Resolve a tour record, honouring `hide_past_departures` against today's UTC date.
    pub fn resolve_tour(&self, tour: &RawTour) -> TourAvailability {
        let today = self
            .defaults
            .hide_past_departures
            .then(|| Utc::now().date_naive());

        self.resolve_at(
            tour.acf.departure_schedule.as_ref(),
            &SourceHints::from_tour(tour),
            today,
        )
    }

    pub fn resolve(&self, raw: Option<&ScheduleField>, hints: &SourceHints) -> TourAvailability {
        self.resolve_at(raw, hints, None)
    }

    /// Like [`resolve`](Self::resolve), additionally dropping departures dated before `today`.
    pub fn resolve_at(
        &self,
        raw: Option<&ScheduleField>,
        hints: &SourceHints,
        today: Option<NaiveDate>,
    ) -> TourAvailability {
        let schedule = raw.and_then(|field| self.load(field, hints));
        let mut availability = self.describe(schedule.as_ref().map(|s| &s.metadata), hints);

        let Some(schedule) = schedule else {
            return availability;
        };

        let bookable: Vec<&RawDeparture> = schedule
            .departures
            .iter()
            .filter(|d| self.is_bookable(d, today, hints))
            .collect();

        for departure in &bookable {
            // is_bookable guarantees a date
            let date = departure.date.clone().unwrap_or_default();
            availability.available_dates.push(date.clone());
            availability.seats_available = availability
                .seats_available
                .saturating_add(departure.available_seats);
            availability.departures.push(AvailableDeparture {
                date,
                available_seats: departure.available_seats,
                total_seats: departure.total_seats,
                price_per_person: departure.price_per_person,
            });
        }

        if let Some(anchor) = bookable.first() {
            availability.price_per_person = anchor.price_per_person;
            if !anchor.pricing_tiers.is_empty() {
                availability.pricing_tiers = anchor.pricing_tiers.clone();
            }
            availability.child_with_bed = anchor.child_with_bed;
            availability.child_without_bed = anchor.child_without_bed;
            availability.extra_adult_same_room = anchor.extra_adult_same_room;
            availability.single_room_supplement = anchor.single_room_supplement;
            availability.addons = anchor.addons.clone();
        }

        availability
    }

    fn load(&self, field: &ScheduleField, hints: &SourceHints) -> Option<RawSchedule> {
        match RawSchedule::parse(field) {
            Ok(schedule) => schedule,
            Err(ScheduleError::MissingDepartures) => {
                debug!("Departure schedule for tour {} has no departures field", hints.label());
                None
            }
            Err(e) => {
                warn!("Ignoring malformed departure schedule for tour {}: {}", hints.label(), e);
                None
            }
        }
    }

    fn is_bookable(
        &self,
        departure: &RawDeparture,
        today: Option<NaiveDate>,
        hints: &SourceHints,
    ) -> bool {
        if departure.is_sold_out() {
            return false;
        }

        let Some(date) = departure.date.as_deref() else {
            debug!("Skipping undated departure for tour {}", hints.label());
            return false;
        };

        match (today, parse_departure_date(date)) {
            (Some(today), Some(day)) if day < today => {
                debug!("Skipping past departure {} for tour {}", date, hints.label());
                false
            }
            _ => true,
        }
    }

    /// Descriptive fields by precedence: schedule metadata, then the tour itself, then configuration.
    fn describe(&self, metadata: Option<&ScheduleMetadata>, hints: &SourceHints) -> TourAvailability {
        let defaults = &self.defaults;
        let meta = metadata.cloned().unwrap_or_default();

        let location = meta
            .location
            .or_else(|| hints.location.clone())
            .unwrap_or_else(|| defaults.location.clone());
        let duration = meta
            .duration
            .or_else(|| hints.duration.clone())
            .unwrap_or_else(|| defaults.duration.clone());
        let currency = meta.currency.unwrap_or_else(|| defaults.currency.clone());
        let min_travelers = meta.min_travelers.unwrap_or(defaults.min_travelers);
        let max_travelers = meta.max_travelers.unwrap_or(defaults.max_travelers);

        if max_travelers < min_travelers {
            warn!(
                "Tour {} allows at most {} travelers but requires at least {}; no booking can be quoted",
                hints.label(),
                max_travelers,
                min_travelers
            );
        }

        TourAvailability::empty(location, duration, currency, min_travelers, max_travelers)
    }
}

/// Accepts `2025-05-01` and timestamps that start with it.
fn parse_departure_date(date: &str) -> Option<NaiveDate> {
    let day = date.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
