pub mod listing;
pub mod pricing;

pub use listing::{TourFormatter, TourPresentation};
pub use pricing::{BookingQuote, QuoteEngine, QuoteError, QuoteLine, QuoteRequest};
