use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tourbook_catalog::{QuoteEngine, QuoteRequest, TourFormatter};
use tourbook_core::{ScheduleResolver, TourSource};

#[derive(Debug, Parser)]
#[command(name = "tourbook", about = "Resolve tour availability and price bookings")]
pub struct Cli {
    /// Tours export to read instead of `content.tours_path`
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format every published tour
    List,
    /// Format a single tour
    Show { slug: String },
    /// Validate and price a booking
    Quote {
        slug: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children_with_bed: u32,
        #[arg(long, default_value_t = 0)]
        children_without_bed: u32,
        #[arg(long, default_value_t = 0)]
        extra_adults: u32,
        #[arg(long, default_value_t = 0)]
        single_rooms: u32,
        #[arg(long = "addon")]
        addons: Vec<String>,
    },
}

/// Wires a tour source to the formatter and quote engine.
pub struct App {
    source: Arc<dyn TourSource>,
    formatter: TourFormatter,
    quotes: QuoteEngine,
}

impl App {
    pub fn new(source: Arc<dyn TourSource>, resolver: ScheduleResolver) -> Self {
        Self {
            source,
            formatter: TourFormatter::new(Arc::new(resolver)),
            quotes: QuoteEngine::new(),
        }
    }

    pub async fn execute(&self, command: Command) -> anyhow::Result<Value> {
        match command {
            Command::List => {
                let tours = self.source.list_tours().await?;
                tracing::info!("Formatting {} tours", tours.len());
                let presentations = self.formatter.format_many(tours).await;
                Ok(serde_json::to_value(presentations)?)
            }
            Command::Show { slug } => {
                let tour = self.find(&slug).await?;
                Ok(serde_json::to_value(self.formatter.format(&tour))?)
            }
            Command::Quote {
                slug,
                date,
                adults,
                children_with_bed,
                children_without_bed,
                extra_adults,
                single_rooms,
                addons,
            } => {
                let tour = self.find(&slug).await?;
                let availability = self.formatter.resolver().resolve_tour(&tour);
                let request = QuoteRequest {
                    date,
                    adults,
                    children_with_bed,
                    children_without_bed,
                    extra_adults_same_room: extra_adults,
                    single_rooms,
                    addons,
                };
                let quote = self
                    .quotes
                    .quote(&availability, &request)
                    .with_context(|| format!("Cannot quote tour {}", slug))?;
                Ok(serde_json::to_value(quote)?)
            }
        }
    }

    async fn find(&self, slug: &str) -> anyhow::Result<tourbook_shared::RawTour> {
        self.source
            .get_tour(slug)
            .await?
            .ok_or_else(|| anyhow!("Tour not found: {}", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourbook_core::MemoryTourSource;
    use tourbook_shared::RawTour;

    fn app() -> App {
        let tours: Vec<RawTour> = serde_json::from_value(serde_json::json!([
            {
                "id": 5,
                "slug": "sandakphu",
                "title": "Sandakphu Phalut",
                "acf": {
                    "departure_schedule": {
                        "departures": [
                            { "date": "2099-04-02", "availableSeats": 4, "pricePerPerson": 14000 }
                        ],
                        "metadata": { "location": "Darjeeling" }
                    }
                }
            }
        ]))
        .unwrap();

        App::new(Arc::new(MemoryTourSource::new(tours)), ScheduleResolver::default())
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "tourbook",
            "quote",
            "sandakphu",
            "--date",
            "2099-04-02",
            "--adults",
            "2",
            "--addon",
            "porter",
            "--file",
            "tours.json",
        ]);

        assert_eq!(cli.file, Some(PathBuf::from("tours.json")));
        match cli.command {
            Command::Quote { slug, adults, addons, children_with_bed, .. } => {
                assert_eq!(slug, "sandakphu");
                assert_eq!(adults, 2);
                assert_eq!(children_with_bed, 0);
                assert_eq!(addons, vec!["porter"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_and_show() {
        let app = app();

        let listed = app.execute(Command::List).await.unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["availability"]["location"], "Darjeeling");

        let shown = app.execute(Command::Show { slug: "sandakphu".to_string() }).await.unwrap();
        assert_eq!(shown["availability"]["seatsAvailable"], 4);
        assert_eq!(shown["isBookable"], true);

        assert!(app.execute(Command::Show { slug: "goechala".to_string() }).await.is_err());
    }

    #[tokio::test]
    async fn test_quote_command() {
        let quote = app()
            .execute(Command::Quote {
                slug: "sandakphu".to_string(),
                date: "2099-04-02".to_string(),
                adults: 2,
                children_with_bed: 0,
                children_without_bed: 0,
                extra_adults: 0,
                single_rooms: 0,
                addons: vec![],
            })
            .await
            .unwrap();

        assert_eq!(quote["total"], 28000.0);
        assert_eq!(quote["currency"], "INR");
    }
}
