//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) data structures and the
//! [`engine`](crate::engine) steps together.
//!
//! - **E2 Workflow** ([`e2`]) - Basis transformation followed by the donor→acceptor
//!   interaction scan, with progress reporting

pub mod e2;
