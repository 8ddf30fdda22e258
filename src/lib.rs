//! daisy — medicinal plant remedies and plant care lookup.
//!
//! Terminal client for the incremental plant/symptom search pipeline. This
//! crate re-exports the workspace layers so integration tests can import
//! them from one place, and hosts the headless entry points used by the
//! `search` and `blog` subcommands.
//!
//! # Architecture
//!
//! ```text
//! daisy-tui ──► daisy-core (SearchSession) ──► daisy-provider (HttpProvider)
//!                      │
//!                      └──► LocalRecordStore (per-catalog cache file)
//! ```

pub mod headless;

pub use daisy_core;
pub use daisy_provider;
pub use daisy_tui;
