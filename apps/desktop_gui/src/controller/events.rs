//! UI/backend events and error modeling for the post list GUI.

use client_core::LoadError;
use shared::domain::{Post, PostId};

/// Input the user produced during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Add,
    BeginEdit(PostId),
    SaveEdit,
    CancelEdit,
    Delete(PostId),
    Reload,
}

/// Results delivered by the backend worker.
#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    PostsLoaded(Result<Vec<Post>, LoadError>),
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(PostId),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Conflict,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadPosts,
    CreatePost,
    UpdatePost,
    DeletePost,
}

pub fn classify_load_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to reach")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Error fetching posts! Server unreachable; check the posts URL and network.".to_string()
    } else if lower.contains("malformed") {
        "Error fetching posts! The server returned an unexpected payload.".to_string()
    } else {
        format!("Error fetching posts! {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("not found") || message_lower.contains("404") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("conflict") || message_lower.contains("409") {
            UiErrorCategory::Conflict
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("not loaded")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("failed to reach")
            || message_lower.contains("connection")
            || message_lower.contains("timeout")
            || message_lower.contains("network")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::LoadPosts => "Loading posts failed",
            UiErrorContext::CreatePost => "Adding post failed",
            UiErrorContext::UpdatePost => "Saving post failed",
            UiErrorContext::DeletePost => "Deleting post failed",
        };
        format!("{action}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_mutation_failures() {
        let err = UiError::from_message(UiErrorContext::UpdatePost, "post 3 not found");
        assert_eq!(err.category(), UiErrorCategory::NotFound);
        assert_eq!(err.status_line(), "Saving post failed: post 3 not found");

        let err = UiError::from_message(
            UiErrorContext::CreatePost,
            "failed to reach post service: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::CreatePost);

        let err = UiError::from_message(
            UiErrorContext::DeletePost,
            "post 1 conflicts with the server copy",
        );
        assert_eq!(err.category(), UiErrorCategory::Conflict);
    }

    #[test]
    fn unknown_messages_fall_through() {
        let err = UiError::from_message(UiErrorContext::LoadPosts, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
    }

    #[test]
    fn load_failure_text_points_at_cause() {
        assert!(classify_load_failure("failed to reach post source: dns error")
            .contains("Server unreachable"));
        assert!(classify_load_failure("malformed post payload: eof")
            .contains("unexpected payload"));
        assert_eq!(
            classify_load_failure("post source responded with status 500"),
            "Error fetching posts! post source responded with status 500"
        );
    }
}
