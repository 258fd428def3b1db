//! # Core Models Module
//!
//! Plain data structures passed between the I/O adapters and the analysis engine.
//!
//! ## Key Components
//!
//! - [`matrices`] - Validated NAO-basis input matrices ([`matrices::SourceMatrices`]),
//!   their CLPO-basis counterparts ([`matrices::TransformedMatrices`]) and orbital labels
//! - [`interaction`] - Donor→acceptor interaction records and the ordered result table
//!
//! All structures are immutable once built; shape invariants are checked on construction
//! so the engine can index matrices without further validation.

pub mod interaction;
pub mod matrices;
