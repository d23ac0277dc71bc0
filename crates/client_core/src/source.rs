use async_trait::async_trait;
use reqwest::Client;
use shared::domain::Post;
use tracing::debug;

use crate::error::LoadError;

#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, LoadError>;
}

/// Reads the post list with a plain GET against a fixed URL.
pub struct HttpPostSource {
    http: Client,
    posts_url: String,
}

impl HttpPostSource {
    pub fn new(posts_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), posts_url)
    }

    pub fn with_client(http: Client, posts_url: impl Into<String>) -> Self {
        Self {
            http,
            posts_url: posts_url.into(),
        }
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, LoadError> {
        debug!(url = %self.posts_url, "fetching posts");
        let posts: Vec<Post> = self
            .http
            .get(&self.posts_url)
            .send()
            .await
            .map_err(LoadError::from_reqwest)?
            .error_for_status()
            .map_err(LoadError::from_reqwest)?
            .json()
            .await
            .map_err(LoadError::from_reqwest)?;
        debug!(count = posts.len(), "fetched posts");
        Ok(posts)
    }
}
