//! Owned post list state: cache, load lifecycle and UI-local drafts.
//!
//! Every method here is synchronous. Callers that perform I/O (the
//! controller, or a GUI backend worker) feed results back through
//! `finish_load` and the `apply_*` methods.

use shared::domain::{NewPost, Post, PostId, PostUpdate};
use tracing::{debug, info, warn};

use crate::{cache::PostCache, error::LoadError};

#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(LoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Errored(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub post_id: PostId,
    pub draft_title: String,
}

/// Hands out ids for locally created posts, always above anything loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalIdAllocator {
    next: i64,
}

impl Default for LocalIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl LocalIdAllocator {
    pub fn observe(&mut self, id: PostId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }

    pub fn allocate(&mut self) -> PostId {
        let id = PostId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Default)]
pub struct PostListState {
    cache: PostCache,
    load: LoadState,
    new_title: String,
    editing: Option<EditSession>,
    ids: LocalIdAllocator,
}

impl PostListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        self.cache.posts()
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// `Idle -> Loading`. Terminal states need `begin_reload`.
    pub fn begin_load(&mut self) -> Result<(), LoadError> {
        match self.load {
            LoadState::Idle => {
                self.load = LoadState::Loading;
                Ok(())
            }
            _ => Err(LoadError::AlreadyStarted),
        }
    }

    /// Explicit re-trigger from a terminal state. Refused while in flight.
    pub fn begin_reload(&mut self) -> Result<(), LoadError> {
        if self.load.is_loading() {
            return Err(LoadError::AlreadyStarted);
        }
        self.load = LoadState::Loading;
        Ok(())
    }

    pub fn finish_load(&mut self, result: Result<Vec<Post>, LoadError>) {
        if !self.load.is_loading() {
            warn!("dropping post load result that arrived outside of a load");
            return;
        }

        match result {
            Ok(posts) => {
                let fetched = posts.len();
                self.cache = PostCache::from_loaded(posts);
                if self.cache.is_empty() {
                    debug!("post source returned no posts");
                }
                if let Some(max_id) = self.cache.max_id() {
                    self.ids.observe(max_id);
                }
                self.editing = None;
                self.load = LoadState::Loaded;
                info!(fetched, kept = self.cache.len(), "post list loaded");
            }
            Err(err) => {
                warn!(error = %err, "post list load failed");
                self.load = LoadState::Errored(err);
            }
        }
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_title = title.into();
    }

    pub fn new_title_mut(&mut self) -> &mut String {
        &mut self.new_title
    }

    pub fn prepare_create(&mut self, title: impl Into<String>) -> NewPost {
        NewPost {
            id: self.ids.allocate(),
            title: title.into(),
        }
    }

    /// Appends a created post and returns the id it is cached under. A
    /// server id that is already cached is swapped for a fresh local id.
    pub fn apply_created(&mut self, mut post: Post) -> PostId {
        self.ids.observe(post.id);
        if self.cache.contains(post.id) {
            let local_id = self.ids.allocate();
            warn!(
                server_id = %post.id,
                %local_id,
                "created post id already cached; re-keying"
            );
            post.id = local_id;
        }
        let id = post.id;
        debug!(post_id = %id, "appending created post");
        self.cache.append(post);
        self.new_title.clear();
        id
    }

    pub fn apply_updated(&mut self, post: Post) -> bool {
        let id = post.id;
        let patched = self.cache.merge_update(post);
        if patched {
            debug!(post_id = %id, "patched post title");
        } else {
            debug!(post_id = %id, "update for uncached post ignored");
        }
        if self.editing.as_ref().is_some_and(|session| session.post_id == id) {
            self.editing = None;
        }
        patched
    }

    pub fn apply_deleted(&mut self, id: PostId) -> bool {
        let removed = self.cache.remove(id).is_some();
        if removed {
            debug!(post_id = %id, "removed post");
        }
        if self.editing.as_ref().is_some_and(|session| session.post_id == id) {
            self.editing = None;
        }
        removed
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: PostId) -> bool {
        self.editing.as_ref().is_some_and(|session| session.post_id == id)
    }

    /// Seeds the scratch buffer from the cached title. False if `id` is unknown.
    pub fn begin_edit(&mut self, id: PostId) -> bool {
        let Some(post) = self.cache.get(id) else {
            return false;
        };
        self.editing = Some(EditSession {
            post_id: id,
            draft_title: post.title.clone(),
        });
        true
    }

    pub fn edit_title_mut(&mut self) -> Option<&mut String> {
        self.editing.as_mut().map(|session| &mut session.draft_title)
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.draft_title = title.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Rename request for the active edit session. The session stays open
    /// until the update is applied.
    pub fn edit_submission(&self) -> Option<PostUpdate> {
        self.editing.as_ref().map(|session| PostUpdate {
            id: session.post_id,
            title: session.draft_title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pairs: &[(i64, &str)]) -> PostListState {
        let mut state = PostListState::new();
        state.begin_load().expect("begin");
        state.finish_load(Ok(pairs
            .iter()
            .map(|(id, title)| Post::new(PostId(*id), *title))
            .collect()));
        state
    }

    #[test]
    fn load_transitions_idle_loading_loaded() {
        let mut state = PostListState::new();
        assert!(matches!(state.load_state(), LoadState::Idle));
        state.begin_load().expect("begin");
        assert!(state.load_state().is_loading());
        assert!(matches!(state.begin_load(), Err(LoadError::AlreadyStarted)));
        state.finish_load(Ok(vec![Post::new(PostId(1), "a")]));
        assert!(state.load_state().is_loaded());
        assert!(matches!(state.begin_load(), Err(LoadError::AlreadyStarted)));
    }

    #[test]
    fn failed_load_is_terminal_until_reload() {
        let mut state = PostListState::new();
        state.begin_load().expect("begin");
        state.finish_load(Err(LoadError::Status(503)));
        assert!(matches!(
            state.load_state().error(),
            Some(LoadError::Status(503))
        ));
        assert!(state.posts().is_empty());

        state.begin_reload().expect("reload");
        assert!(state.load_state().is_loading());
        assert!(matches!(state.begin_reload(), Err(LoadError::AlreadyStarted)));
    }

    #[test]
    fn late_result_without_load_is_ignored() {
        let mut state = PostListState::new();
        state.finish_load(Ok(vec![Post::new(PostId(1), "a")]));
        assert!(matches!(state.load_state(), LoadState::Idle));
        assert!(state.posts().is_empty());
    }

    #[test]
    fn allocated_ids_start_above_loaded_ids() {
        let mut state = loaded(&[(3, "a"), (41, "b"), (7, "c")]);
        let first = state.prepare_create("x");
        let second = state.prepare_create("y");
        assert_eq!(first.id, PostId(42));
        assert_eq!(second.id, PostId(43));
    }

    #[test]
    fn created_post_is_appended_and_input_cleared() {
        let mut state = loaded(&[(1, "a")]);
        state.set_new_title("fresh");
        let draft = state.prepare_create(state.new_title().to_string());
        state.apply_created(draft.into());

        assert_eq!(state.posts().len(), 2);
        assert_eq!(state.posts()[1].title, "fresh");
        assert_eq!(state.new_title(), "");
    }

    #[test]
    fn server_assigned_id_bumps_allocator() {
        let mut state = loaded(&[(1, "a")]);
        state.apply_created(Post::new(PostId(101), "remote"));
        assert_eq!(state.prepare_create("next").id, PostId(102));
    }

    #[test]
    fn colliding_server_ids_are_rekeyed_and_appended() {
        let mut state = loaded(&[(1, "a"), (2, "b")]);
        let first = state.apply_created(Post::new(PostId(101), "first"));
        let second = state.apply_created(Post::new(PostId(101), "second"));

        assert_eq!(first, PostId(101));
        assert_ne!(second, first);
        assert_eq!(state.posts().len(), 4);
        assert_eq!(state.posts()[2].title, "first");
        assert_eq!(state.posts()[3].title, "second");
        assert_eq!(state.posts()[3].id, second);
    }

    #[test]
    fn edit_session_seeds_draft_and_closes_on_update() {
        let mut state = loaded(&[(1, "A"), (2, "B")]);
        assert!(!state.begin_edit(PostId(9)));
        assert!(state.begin_edit(PostId(2)));
        assert_eq!(
            state.editing(),
            Some(&EditSession {
                post_id: PostId(2),
                draft_title: "B".into()
            })
        );

        state.set_edit_title("C");
        let update = state.edit_submission().expect("submission");
        assert_eq!(update.id, PostId(2));
        assert_eq!(update.title, "C");

        assert!(state.apply_updated(Post::new(update.id, update.title)));
        assert!(state.editing().is_none());
        assert_eq!(state.posts()[1].title, "C");
    }

    #[test]
    fn deleting_edited_post_ends_session() {
        let mut state = loaded(&[(1, "A"), (2, "B")]);
        state.begin_edit(PostId(1));
        assert!(state.apply_deleted(PostId(1)));
        assert!(state.editing().is_none());
        assert!(!state.apply_deleted(PostId(1)));
        assert_eq!(state.posts().len(), 1);
    }

    #[test]
    fn starting_another_edit_replaces_session() {
        let mut state = loaded(&[(1, "A"), (2, "B")]);
        state.begin_edit(PostId(1));
        state.set_edit_title("scratch");
        state.begin_edit(PostId(2));
        assert!(state.is_editing(PostId(2)));
        assert!(!state.is_editing(PostId(1)));
        assert_eq!(state.editing().map(|s| s.draft_title.as_str()), Some("B"));
        state.cancel_edit();
        assert!(state.editing().is_none());
    }
}
