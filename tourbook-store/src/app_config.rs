use serde::Deserialize;
use std::env;
use tourbook_core::ResolverDefaults;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverDefaults,
    pub content: ContentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// WordPress REST export (a JSON array of tour posts)
    pub tours_path: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `TOURBOOK__RESOLVER__CURRENCY=USD`
            .add_source(config::Environment::with_prefix("TOURBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
