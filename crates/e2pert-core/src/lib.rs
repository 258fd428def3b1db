//! # E2PERT Core Library
//!
//! Second-order perturbation (E2) analysis of donor→acceptor interactions between
//! localized orbitals, computed from the NAO-basis Fock and density matrices and the
//! CLPO→LHO and LHO→NAO transformation matrices written by the JANPA program.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Validated matrix containers, orbital labels, interaction
//!   records, and the file adapters (JANPA matrix reader, text/CSV table writers).
//!
//! - **[`engine`]: The Logic Core.** The basis transformation (`transform`) and the ordered
//!   all-pairs interaction scan (`analysis`), both pure functions of their inputs, plus
//!   configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** [`workflows::e2::run`] chains the two engine steps
//!   for a complete analysis.

pub mod core;
pub mod engine;
pub mod workflows;
