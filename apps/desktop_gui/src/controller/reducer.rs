//! Reducer-like transitions of the post list state for UI actions and backend events.

use client_core::{LoadError, PostListState};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_load_failure, UiAction, UiEvent};

pub fn start_initial_load(state: &mut PostListState) -> Option<BackendCommand> {
    state.begin_load().ok().map(|()| BackendCommand::LoadPosts)
}

/// Settles a load whose command never reached the worker, so the view
/// offers Reload instead of spinning.
pub fn fail_pending_load(state: &mut PostListState, reason: &str) {
    state.finish_load(Err(LoadError::Transport(reason.to_string())));
}

/// Applies the local part of an action and returns the backend work it needs.
pub fn reduce_action(state: &mut PostListState, action: UiAction) -> Option<BackendCommand> {
    match action {
        UiAction::Add => {
            if !state.load_state().is_loaded() {
                return None;
            }
            let title = state.new_title().to_string();
            Some(BackendCommand::CreatePost {
                draft: state.prepare_create(title),
            })
        }
        UiAction::BeginEdit(post_id) => {
            state.begin_edit(post_id);
            None
        }
        UiAction::SaveEdit => state
            .edit_submission()
            .map(|update| BackendCommand::UpdatePost { update }),
        UiAction::CancelEdit => {
            state.cancel_edit();
            None
        }
        UiAction::Delete(post_id) => state
            .cache()
            .contains(post_id)
            .then_some(BackendCommand::DeletePost { post_id }),
        UiAction::Reload => state
            .begin_reload()
            .ok()
            .map(|()| BackendCommand::LoadPosts),
    }
}

pub fn reduce_event(state: &mut PostListState, event: UiEvent, status: &mut String) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::PostsLoaded(result) => {
            *status = match &result {
                Ok(_) => String::new(),
                Err(err) => classify_load_failure(&err.to_string()),
            };
            state.finish_load(result);
        }
        UiEvent::PostCreated(post) => {
            state.apply_created(post);
            status.clear();
        }
        UiEvent::PostUpdated(post) => {
            state.apply_updated(post);
            status.clear();
        }
        UiEvent::PostDeleted(post_id) => {
            state.apply_deleted(post_id);
            status.clear();
        }
        UiEvent::Error(err) => {
            tracing::warn!(category = ?err.category(), "{}", err.message());
            *status = err.status_line();
        }
    }
}
