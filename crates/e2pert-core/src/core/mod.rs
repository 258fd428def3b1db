//! # Core Module
//!
//! Stateless building blocks shared by the engine and by callers of the library.
//!
//! ## Architecture
//!
//! - **Data** ([`models`]) - Validated input matrices, orbital labels, interaction records
//!   and the ordered interaction table
//! - **File I/O** ([`io`]) - JANPA matrix reader and table writers (text, CSV)
//!
//! Nothing in this module performs numerical analysis; see [`crate::engine`] for the
//! basis transformation and the donor→acceptor scan.

pub mod io;
pub mod models;
