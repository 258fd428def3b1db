//! Provides input/output adapters around the analysis engine.
//!
//! Reading covers the plain-text matrix files written by the JANPA orbital-analysis
//! program; writing covers the interaction table as aligned text or CSV. Both sides
//! go through small traits so the engine itself never touches files.

pub mod janpa;
pub mod table;
pub mod traits;
