pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod mutations;
pub mod source;
pub mod state;

pub use cache::{PostCache, INITIAL_POST_LIMIT};
pub use config::{load_settings, ClientSettings, MutationMode};
pub use controller::{backends_for, PostListController};
pub use error::{LoadError, MutationError};
pub use mutations::{HttpPostMutations, LocalPostMutations, PostMutations};
pub use source::{HttpPostSource, PostSource};
pub use state::{EditSession, LoadState, LocalIdAllocator, PostListState};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
