//! Test helpers shared by the `ancestry_config` integration tests.
//!
//! - [`spy`] records every per-node fetch an extractor receives.
//! - [`hierarchy`] declares a small type hierarchy with metadata for the
//!   reference kinds.
//! - [`figment`] runs settings loads inside a [`figment::Jail`].

pub mod figment;
pub mod hierarchy;
pub mod spy;
