pub mod defaults;
pub mod schedule;
pub mod resolver;
pub mod source;

pub use defaults::ResolverDefaults;
pub use resolver::{ScheduleResolver, SourceHints};
pub use schedule::{RawDeparture, RawSchedule, ScheduleError, ScheduleMetadata};
pub use source::{MemoryTourSource, TourSource};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Tour content source failed: {0}")]
    SourceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
