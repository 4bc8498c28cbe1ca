use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tourbook_core::{CoreError, CoreResult, TourSource};
use tourbook_shared::RawTour;

/// Tour content read from a WordPress REST export on disk.
///
/// The file is re-read on every call so edits to the export show up without
/// a restart. Records that do not look like tours are skipped with a warning.
pub struct FileTourSource {
    path: PathBuf,
}

impl FileTourSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_export(&self) -> CoreResult<Vec<RawTour>> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::SourceError(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let records: Vec<Value> = serde_json::from_str(&data).map_err(|e| {
            CoreError::SourceError(format!("{} is not a JSON array: {}", self.path.display(), e))
        })?;

        let tours = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<RawTour>(record) {
                Ok(tour) => Some(tour),
                Err(e) => {
                    tracing::warn!("Skipping tour record {} in {}: {}", index, self.path.display(), e);
                    None
                }
            })
            .collect();

        Ok(tours)
    }
}

#[async_trait]
impl TourSource for FileTourSource {
    async fn list_tours(&self) -> CoreResult<Vec<RawTour>> {
        self.read_export().await
    }

    async fn get_tour(&self, slug: &str) -> CoreResult<Option<RawTour>> {
        let tours = self.read_export().await?;
        Ok(tours.into_iter().find(|t| t.slug == slug))
    }
}
