//! Solvers for transient (time-dependent) problems.
//!
//! # Solvers
//!
//! - [`dopri5`]: adaptive Dormand–Prince 5(4) integration over an output grid

pub mod dopri5;
