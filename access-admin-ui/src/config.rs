use shared_http::api::paths::USER_API_PREFIX;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub http_server: String,
    pub api_base_url: String,
    /// Token to start the session with, skipping the login form.
    pub api_token: Option<String>,
}

const DEFAULT_HTTP_SERVER: &str = "http://localhost:5000";

impl Config {
    /// Runtime environment first, then values baked in at build time (the
    /// only source available in the browser), then defaults.
    pub fn from_env() -> Self {
        let http_server = std::env::var("ACCESS_API_SERVER")
            .ok()
            .or_else(|| option_env!("ACCESS_API_SERVER").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());

        let api_token = std::env::var("ACCESS_API_TOKEN")
            .ok()
            .or_else(|| option_env!("ACCESS_API_TOKEN").map(str::to_string));

        Self::new(http_server, api_token)
    }

    pub fn new(http_server: impl Into<String>, api_token: Option<String>) -> Self {
        let http_server = http_server.into().trim().trim_end_matches('/').to_string();
        let api_base_url = format!("{}{}", http_server, USER_API_PREFIX);
        Self {
            http_server,
            api_base_url,
            api_token: api_token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    /// Absolute URL of an endpoint under the user API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
