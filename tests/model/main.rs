//! Reference Model Integration Tests
//!
//! End-to-end tests through the `wikiref` facade: resolving strings against
//! a context, compacting references, and the properties tying the two
//! together.

mod common;

mod config_files;
mod properties;
mod resolution;
mod serialization;
