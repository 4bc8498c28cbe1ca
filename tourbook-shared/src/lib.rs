pub mod models;

pub use models::availability::{AvailableDeparture, TourAvailability};
pub use models::tour::{AcfFields, RawTour, RenderedText, ScheduleField, TaxonomyTerm};
