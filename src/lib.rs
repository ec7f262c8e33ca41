//! DOM capture and heuristic description engine.
//!
//! Scans a page snapshot for visible elements, labels them, derives
//! best-effort selectors, keeps the latest capture in a key-value store, and
//! patches model-generated test code against what was captured.

pub mod capture;
pub mod cli;
pub mod dom;
pub mod error;
pub mod generate;
pub mod inspector;
pub mod logging;
pub mod matcher;
pub mod messaging;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod trace;
