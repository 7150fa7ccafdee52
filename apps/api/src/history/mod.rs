// History and lookup API: read-only projections over stored analyses and resumes.

pub mod handlers;
pub mod preview;
