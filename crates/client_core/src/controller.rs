use std::sync::Arc;

use shared::domain::{Post, PostId, PostUpdate};
use tracing::info;

use crate::{
    config::{ClientSettings, MutationMode},
    error::{LoadError, MutationError},
    mutations::{HttpPostMutations, LocalPostMutations, PostMutations},
    source::{HttpPostSource, PostSource},
    state::PostListState,
};

/// Owns the post list and routes load and mutations through its backends.
pub struct PostListController {
    state: PostListState,
    source: Arc<dyn PostSource>,
    mutations: Arc<dyn PostMutations>,
}

impl PostListController {
    pub fn new(source: Arc<dyn PostSource>, mutations: Arc<dyn PostMutations>) -> Self {
        Self {
            state: PostListState::new(),
            source,
            mutations,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        let (source, mutations) = backends_for(settings);
        Self::new(source, mutations)
    }

    pub fn state(&self) -> &PostListState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PostListState {
        &mut self.state
    }

    pub fn posts(&self) -> &[Post] {
        self.state.posts()
    }

    pub async fn load(&mut self) -> Result<&[Post], LoadError> {
        self.state.begin_load()?;
        self.fetch_into_state().await
    }

    pub async fn reload(&mut self) -> Result<&[Post], LoadError> {
        self.state.begin_reload()?;
        self.fetch_into_state().await
    }

    async fn fetch_into_state(&mut self) -> Result<&[Post], LoadError> {
        let result = self.source.fetch_posts().await;
        self.state.finish_load(result);
        match self.state.load_state().error() {
            Some(err) => Err(err.clone()),
            None => Ok(self.state.posts()),
        }
    }

    pub async fn add(&mut self, title: impl Into<String>) -> Result<PostId, MutationError> {
        self.ensure_loaded()?;
        let draft = self.state.prepare_create(title);
        let created = self.mutations.create(draft).await?;
        let id = self.state.apply_created(created);
        info!(post_id = %id, "post added");
        Ok(id)
    }

    /// Adds a post titled with the pending input buffer.
    pub async fn add_from_input(&mut self) -> Result<PostId, MutationError> {
        let title = self.state.new_title().to_string();
        self.add(title).await
    }

    /// Returns whether a cached post was patched.
    pub async fn rename(
        &mut self,
        id: PostId,
        title: impl Into<String>,
    ) -> Result<bool, MutationError> {
        self.ensure_loaded()?;
        if !self.state.cache().contains(id) {
            return Ok(false);
        }
        let updated = self
            .mutations
            .update(PostUpdate {
                id,
                title: title.into(),
            })
            .await?;
        let patched = self.state.apply_updated(updated);
        info!(post_id = %id, patched, "post renamed");
        Ok(patched)
    }

    /// Saves the active edit session. `Ok(false)` when nothing is being edited.
    pub async fn save_edit(&mut self) -> Result<bool, MutationError> {
        let Some(update) = self.state.edit_submission() else {
            return Ok(false);
        };
        self.rename(update.id, update.title).await
    }

    /// Returns whether a cached post was removed.
    pub async fn delete(&mut self, id: PostId) -> Result<bool, MutationError> {
        self.ensure_loaded()?;
        if !self.state.cache().contains(id) {
            return Ok(false);
        }
        let deleted = self.mutations.delete(id).await?;
        let removed = self.state.apply_deleted(deleted);
        info!(post_id = %id, removed, "post deleted");
        Ok(removed)
    }

    fn ensure_loaded(&self) -> Result<(), MutationError> {
        if self.state.load_state().is_loaded() {
            Ok(())
        } else {
            Err(MutationError::NotLoaded)
        }
    }
}

pub fn backends_for(settings: &ClientSettings) -> (Arc<dyn PostSource>, Arc<dyn PostMutations>) {
    let source: Arc<dyn PostSource> = Arc::new(HttpPostSource::new(settings.posts_url.clone()));
    let mutations: Arc<dyn PostMutations> = match settings.mutation_mode {
        MutationMode::Local => Arc::new(LocalPostMutations),
        MutationMode::Remote => Arc::new(HttpPostMutations::new(settings.posts_url.clone())),
    };
    (source, mutations)
}
