//! UI layer for the post list GUI.

pub mod app;

pub use app::PostsApp;
