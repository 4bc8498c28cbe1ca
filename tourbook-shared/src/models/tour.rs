use serde::{Deserialize, Serialize};

/// A tour post as delivered by the WordPress REST API (with ACF fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTour {
    pub id: u64,
    pub slug: String,
    pub title: RenderedText,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<TaxonomyTerm>,
    #[serde(default)]
    pub categories: Vec<TaxonomyTerm>,
    #[serde(default)]
    pub acf: AcfFields,
}

impl RawTour {
    /// Destination term names joined for display, `None` when the tour is untagged.
    pub fn destination_label(&self) -> Option<String> {
        let names: Vec<&str> = self
            .destinations
            .iter()
            .map(|t| t.name.trim())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }
}

/// WordPress renders titles either as a bare string or as `{ "rendered": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RenderedText {
    Plain(String),
    Rendered { rendered: String },
}

impl RenderedText {
    pub fn as_str(&self) -> &str {
        match self {
            RenderedText::Plain(s) => s,
            RenderedText::Rendered { rendered } => rendered,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonomyTerm {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Custom fields authored in the CMS. Everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcfFields {
    #[serde(default)]
    pub departure_schedule: Option<ScheduleField>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// The raw `departure_schedule` field: ACF stores it as JSON text, but some
/// exports hand it over already decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScheduleField {
    Text(String),
    Structured(serde_json::Value),
}
