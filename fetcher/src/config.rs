/// Where the upstream events API lives and how to authenticate against it
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub api_key: String,
}

impl FetcherConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// `{base_url}/events/`, without doubling a trailing slash
    pub fn events_url(&self) -> String {
        format!("{}/events/", self.base_url.trim_end_matches('/'))
    }
}
