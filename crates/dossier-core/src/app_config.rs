use std::net::SocketAddr;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Search API credential. Checked per request, not at startup.
    pub search_api_key: Option<String>,
    pub search_base_url: String,
    /// Completion API credential. Checked per request, not at startup.
    pub completion_api_key: Option<String>,
    pub completion_base_url: String,
    pub completion_model: String,
    pub geocode_base_url: String,
    pub geocode_country: String,
    pub user_agent: String,
    pub strict_schema: bool,
}

impl AppConfig {
    /// Whether error responses may carry upstream diagnostic detail.
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.env != Environment::Production
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "search_api_key",
                &self.search_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_base_url", &self.search_base_url)
            .field(
                "completion_api_key",
                &self.completion_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_model", &self.completion_model)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("geocode_country", &self.geocode_country)
            .field("user_agent", &self.user_agent)
            .field("strict_schema", &self.strict_schema)
            .finish()
    }
}
