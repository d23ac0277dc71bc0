pub mod domain;

pub use domain::{NewPost, Post, PostId, PostUpdate};
