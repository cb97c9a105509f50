//! Command handlers for the WikiQA CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod article;
pub mod ask;
pub mod db;
pub mod search;
pub mod suggest;

// Re-export command types for convenience
pub use article::ArticleCommand;
pub use ask::AskCommand;
pub use db::DbCommand;
pub use search::SearchCommand;
pub use suggest::SuggestCommand;
