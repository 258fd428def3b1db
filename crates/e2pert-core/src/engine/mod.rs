//! # Engine Module
//!
//! The numerical part of E2PERT: re-expressing JANPA's NAO-basis matrices in the
//! localized CLPO basis and scanning the result for donor→acceptor interactions.
//!
//! ## Architecture
//!
//! - **Basis Transformation** ([`transform`]) - Inversion and composition of the CLPO→LHO and
//!   LHO→NAO matrices, congruence transform of the Fock and density matrices
//! - **Interaction Scan** ([`analysis`]) - Ordered all-pairs second-order perturbation scan
//!   with occupancy and charge-transfer filtering
//! - **Configuration** ([`config`]) - Thresholds and the degenerate-energy policy
//! - **Progress Monitoring** ([`progress`]) - Callback-based phase and task reporting
//! - **Error Handling** ([`error`]) - Shape, singularity and degeneracy failures
//!
//! Both computational steps are pure functions of their inputs; they perform no I/O and
//! keep no state between calls.

pub mod analysis;
pub mod config;
pub mod error;
pub mod progress;
pub mod transform;
