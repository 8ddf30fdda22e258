//! Shared test utilities for daisy integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod fake_provider;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
