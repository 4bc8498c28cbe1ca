use async_trait::async_trait;
use tourbook_shared::RawTour;

use crate::CoreResult;

/// Read access to published tour content (the CMS, an export file, a fixture).
#[async_trait]
pub trait TourSource: Send + Sync {
    /// All published tours, in the order the source lists them
    async fn list_tours(&self) -> CoreResult<Vec<RawTour>>;

    async fn get_tour(&self, slug: &str) -> CoreResult<Option<RawTour>>;
}

/// Tours held in memory, e.g. for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTourSource {
    tours: Vec<RawTour>,
}

impl MemoryTourSource {
    pub fn new(tours: Vec<RawTour>) -> Self {
        Self { tours }
    }
}

#[async_trait]
impl TourSource for MemoryTourSource {
    async fn list_tours(&self) -> CoreResult<Vec<RawTour>> {
        Ok(self.tours.clone())
    }

    async fn get_tour(&self, slug: &str) -> CoreResult<Option<RawTour>> {
        Ok(self.tours.iter().find(|t| t.slug == slug).cloned())
    }
}
