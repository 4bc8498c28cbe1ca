use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tourbook_core::ScheduleResolver;
use tourbook_shared::{RawTour, TourAvailability};

/// Tour record as shown on listing and detail pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPresentation {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub featured_image: Option<String>,
    pub gallery: Vec<String>,
    pub destinations: Vec<String>,
    pub categories: Vec<String>,
    pub overview: Option<String>,
    pub highlights: Vec<String>,
    /// Anchor departure price, `None` when nothing is priced
    pub starting_price: Option<f64>,
    pub is_bookable: bool,
    pub availability: TourAvailability,
}

/// Merges raw CMS tours with their resolved availability.
#[derive(Debug, Clone)]
pub struct TourFormatter {
    resolver: Arc<ScheduleResolver>,
}

impl TourFormatter {
    pub fn new(resolver: Arc<ScheduleResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ScheduleResolver {
        &self.resolver
    }

    pub fn format(&self, tour: &RawTour) -> TourPresentation {
        let availability = self.resolver.resolve_tour(tour);
        present(tour, availability)
    }

    /// Format a batch of tours, one task per tour. Output keeps input order.
    ///
    /// A tour whose task panics is logged at `error` and left out, so the
    /// result can be shorter than the input.
    pub async fn format_many(&self, tours: Vec<RawTour>) -> Vec<TourPresentation> {
        let handles = tours.into_iter().map(|tour| {
            let resolver = Arc::clone(&self.resolver);
            tokio::spawn(async move {
                let availability = resolver.resolve_tour(&tour);
                present(&tour, availability)
            })
        });

        join_all(handles)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(presentation) => Some(presentation),
                Err(e) => {
                    tracing::error!("Tour formatting task failed: {}", e);
                    None
                }
            })
            .collect()
    }
}

fn present(tour: &RawTour, availability: TourAvailability) -> TourPresentation {
    let starting_price = (availability.price_per_person > 0.0).then_some(availability.price_per_person);
    let is_bookable = availability.has_departures() && availability.seats_available > 0;

    TourPresentation {
        id: tour.id,
        slug: tour.slug.clone(),
        title: decode_entities(tour.title.as_str()),
        featured_image: tour.featured_image.clone(),
        gallery: tour.gallery.clone(),
        destinations: tour.destinations.iter().map(|t| t.name.clone()).collect(),
        categories: tour.categories.iter().map(|t| t.name.clone()).collect(),
        overview: tour.acf.overview.clone(),
        highlights: tour.acf.highlights.clone(),
        starting_price,
        is_bookable,
        availability,
    }
}

/// WordPress escapes a handful of characters in rendered titles.
fn decode_entities(text: &str) -> String {
    text.replace("&#8211;", "\u{2013}")
        .replace("&#8217;", "\u{2019}")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
