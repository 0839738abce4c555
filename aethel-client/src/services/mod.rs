//! Service client implementations
//!
//! This module contains the Aethel backend client and the HTTP plumbing
//! it shares across operations.

pub mod aethel;
mod common;

pub use common::UserAgent;
