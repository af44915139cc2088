use anyhow::{Context, bail};
use quill::PostId;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const BASE_URL_VAR: &str = "QUILL_BASE_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// No trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `QUILL_BASE_URL`, after loading a `.env` file if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            return Err(e).context("Failed to load .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        match lookup(BASE_URL_VAR) {
            None => Ok(Self::default()),
            Some(url) => Self::with_base_url(&url).with_context(|| format!("{BASE_URL_VAR} is invalid")),
        }
    }

    pub fn with_base_url(url: &str) -> anyhow::Result<Self> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            bail!("base url is empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("base url must start with http:// or https://, got {url:?}");
        }
        Ok(Self {
            base_url: url.to_string(),
        })
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn post_url(&self, id: &PostId) -> String {
        format!("{}/posts/{id}", self.base_url)
    }
}
