use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Connection settings for the `DashScope` service
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API key for bearer authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (defaults to the public `DashScope` endpoint)
    #[serde(default)]
    pub base_url: Option<Url>,
}
