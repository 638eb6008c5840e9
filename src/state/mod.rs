/// State management module
///
/// This module handles all application state, including:
/// - Course records and their display text (course.rs)
/// - Parsing catalog files (catalog.rs)
/// - Semester ordinals used for chronological sorting (semester.rs)
/// - Filter option sets (options.rs)
/// - Filtering and sorting (query.rs)
/// - The store that owns it all and handles commands (app.rs)

pub mod app;
pub mod catalog;
pub mod course;
pub mod options;
pub mod query;
pub mod semester;
