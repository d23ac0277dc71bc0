//! Backend commands queued from UI to backend worker.

use shared::domain::{NewPost, PostId, PostUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadPosts,
    CreatePost { draft: NewPost },
    UpdatePost { update: PostUpdate },
    DeletePost { post_id: PostId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadPosts => "load_posts",
            BackendCommand::CreatePost { .. } => "create_post",
            BackendCommand::UpdatePost { .. } => "update_post",
            BackendCommand::DeletePost { .. } => "delete_post",
        }
    }
}
