//! prelims-report: HTML and Markdown stats reports.

pub mod html;
pub mod markdown;
pub mod snapshot;

pub use snapshot::StatsReport;

#[cfg(test)]
pub(crate) mod fixtures;
