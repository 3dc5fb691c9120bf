//! Domain types and rules shared by the storage and HTTP layers.
//!
//! This crate has no I/O; it only defines identifiers, timestamps, the
//! error taxonomy and the to-do validation rules.

pub mod error;
pub mod todo;
pub mod types;
