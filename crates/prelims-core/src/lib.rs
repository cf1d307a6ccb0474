//! prelims-core: question normalization, scoring, and history aggregation.
//!
//! This crate holds the data model and every rule that decides a score or a
//! statistic. Storage is abstracted behind [`store::KeyValueStore`] and bank
//! fetching behind [`traits::BankSource`], so the same logic serves the CLI
//! and the tests.

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod export;
pub mod history;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod scoring;
pub mod session;
pub mod state;
pub mod statistics;
pub mod store;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;
