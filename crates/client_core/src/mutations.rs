//! Create/update/delete backends for the post list.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::domain::{NewPost, Post, PostId, PostUpdate};
use tracing::debug;

use crate::error::MutationError;

#[async_trait]
pub trait PostMutations: Send + Sync {
    async fn create(&self, draft: NewPost) -> Result<Post, MutationError>;
    async fn update(&self, update: PostUpdate) -> Result<Post, MutationError>;
    async fn delete(&self, id: PostId) -> Result<PostId, MutationError>;
}

/// Answers every mutation locally without any outbound call.
pub struct LocalPostMutations;

#[async_trait]
impl PostMutations for LocalPostMutations {
    async fn create(&self, draft: NewPost) -> Result<Post, MutationError> {
        Ok(draft.into())
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, MutationError> {
        Ok(Post::new(update.id, update.title))
    }

    async fn delete(&self, id: PostId) -> Result<PostId, MutationError> {
        Ok(id)
    }
}

/// Sends mutations to the same collection the posts were loaded from.
pub struct HttpPostMutations {
    http: Client,
    posts_url: String,
}

impl HttpPostMutations {
    pub fn new(posts_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), posts_url)
    }

    pub fn with_client(http: Client, posts_url: impl Into<String>) -> Self {
        Self {
            http,
            posts_url: posts_url.into(),
        }
    }

    fn item_url(&self, id: PostId) -> String {
        format!("{}/{}", self.posts_url, id)
    }
}

fn check_status(response: Response, id: PostId) -> Result<Response, MutationError> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(MutationError::NotFound(id)),
        StatusCode::CONFLICT => Err(MutationError::Conflict(id)),
        status if !status.is_success() => Err(MutationError::Status(status.as_u16())),
        _ => Ok(response),
    }
}

#[async_trait]
impl PostMutations for HttpPostMutations {
    async fn create(&self, draft: NewPost) -> Result<Post, MutationError> {
        debug!(url = %self.posts_url, local_id = %draft.id, "creating post");
        let response = self
            .http
            .post(&self.posts_url)
            .json(&draft)
            .send()
            .await
            .map_err(MutationError::from_reqwest)?;
        let created: Post = check_status(response, draft.id)?
            .json()
            .await
            .map_err(MutationError::from_reqwest)?;
        Ok(created)
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, MutationError> {
        debug!(post_id = %update.id, "updating post");
        let response = self
            .http
            .put(self.item_url(update.id))
            .json(&update)
            .send()
            .await
            .map_err(MutationError::from_reqwest)?;
        let mut updated: Post = check_status(response, update.id)?
            .json()
            .await
            .map_err(MutationError::from_reqwest)?;
        // Patch whichever post was asked for, even if the echo disagrees.
        updated.id = update.id;
        Ok(updated)
    }

    async fn delete(&self, id: PostId) -> Result<PostId, MutationError> {
        debug!(post_id = %id, "deleting post");
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(MutationError::from_reqwest)?;
        check_status(response, id)?;
        Ok(id)
    }
}
