//! daisy-core — plant search pipeline core library.
//!
//! This crate holds everything the presentation layer needs that is not
//! rendering: the data model, the per-catalog reference lists, the debouncer,
//! the local record cache, and the search state machine.
//!
//! # Architecture
//!
//! ```text
//! keystrokes ──► QueryDebouncer ──► SearchSession ──► ReferenceIndex (suggestions)
//!                                        │
//!                                        ├──► PlantDataProvider (submitted search)
//!                                        └──► RecordStore (common-plants cache)
//! ```
//!
//! State transitions are a pure reducer ([`controller::reduce`]); the
//! [`session::SearchSession`] performs the effects it returns on `tokio`
//! tasks and feeds the outcomes back in as events.

pub mod blog;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod provider;
pub mod reference;
pub mod session;
pub mod store;
pub mod types;

pub use catalog::Catalog;
pub use error::{ProviderError, StoreError};
pub use provider::PlantDataProvider;
pub use types::{PlantRecord, ReferenceTerm, Usage};
