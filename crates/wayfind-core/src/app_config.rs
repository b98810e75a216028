use crate::coordinate::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which Overpass output statement terminates a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `out center;`: ways and relations carry a `center` point.
    #[default]
    Center,
    /// `out geom;`: full geometry, no `center`.
    Geom,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Center => write!(f, "center"),
            OutputMode::Geom => write!(f, "geom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub overpass_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius_m: u32,
    pub query_timeout_secs: u32,
    pub result_limit: usize,
    pub debounce_ms: u64,
    pub output_mode: OutputMode,
    /// ip-api compatible endpoint; `None` disables IP geolocation.
    pub geolocation_url: Option<String>,
    /// Fixed user position, takes precedence over any lookup.
    pub location: Option<Coordinate>,
    pub fallback_location: Coordinate,
}
