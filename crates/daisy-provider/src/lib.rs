//! daisy-provider — the HTTP side of the search pipeline.
//!
//! [`HttpProvider`] implements [`daisy_core::PlantDataProvider`] against a
//! chat-completions endpoint (record synthesis) and an image-search endpoint
//! (one thumbnail per record). The pieces that do not need a network are
//! exposed separately so they can be tested and benchmarked on their own:
//!
//! - [`prompt`] — the instruction text sent for each catalog and operation.
//! - [`extract`] — pulls the JSON array out of free-form model output.
//! - [`schema`] — turns that array into [`PlantRecord`](daisy_core::PlantRecord)s.

pub mod extract;
pub mod http;
pub mod prompt;
pub mod schema;
pub mod types;

pub use extract::extract_json_array;
pub use http::{HttpProvider, ProviderConfig};
