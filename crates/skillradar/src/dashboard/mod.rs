//! Dashboard building blocks: the competency table, filter queries, radar
//! rendering, profile summaries, PDF export, and the splash/dashboard page
//! state.

pub mod chart;
pub mod dataset;
pub mod profile;
pub mod report;
pub mod session;
