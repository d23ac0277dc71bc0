//! Ordered in-memory post list and the patches applied to it.

use shared::domain::{Post, PostId};

/// Number of remote records kept from the initial load.
pub const INITIAL_POST_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCache {
    posts: Vec<Post>,
}

impl PostCache {
    pub fn from_loaded(mut posts: Vec<Post>) -> Self {
        posts.truncate(INITIAL_POST_LIMIT);
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> Option<PostId> {
        self.posts.iter().map(|post| post.id).max()
    }

    pub fn append(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Patches the matching post with the title and fields of `updated`.
    /// Fields absent from `updated` keep their cached values.
    pub fn merge_update(&mut self, updated: Post) -> bool {
        let Some(existing) = self.posts.iter_mut().find(|post| post.id == updated.id) else {
            return false;
        };
        existing.title = updated.title;
        existing.extra.extend(updated.extra);
        true
    }

    pub fn remove(&mut self, id: PostId) -> Option<Post> {
        let index = self.posts.iter().position(|post| post.id == id)?;
        Some(self.posts.remove(index))
    }
}
