//! Application state for the web layer.

use std::time::Instant;

use crate::directory::SchoolDirectory;
use crate::school_data::SchoolData;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<A> {
    /// Searchable school directory
    pub directory: SchoolDirectory<A>,

    /// Cached meal and timetable lookups
    pub school_data: SchoolData<A>,

    /// When the server started, for uptime reporting
    pub started_at: Instant,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            school_data: self.school_data.clone(),
            started_at: self.started_at,
        }
    }
}

impl<A> AppState<A> {
    /// Create a new app state.
    pub fn new(directory: SchoolDirectory<A>, school_data: SchoolData<A>) -> Self {
        Self {
            directory,
            school_data,
            started_at: Instant::now(),
        }
    }
}
