/// State management module
///
/// This module handles all application state, including:
/// - Database connection and queries (library.rs)
/// - Shared data structures (data.rs)
/// - Filter parameters (edit.rs)
/// - The editor controller that ties them to the filter pipeline (editor.rs)

pub mod data;
pub mod edit;
pub mod editor;
pub mod library;
