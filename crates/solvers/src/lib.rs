//! Numerical integrators for the Crema workspace.
//!
//! Integrators drive a [`Model`] through an [`OdeProblem`] and report progress
//! to an [`Observer`] at every output point.
//!
//! # Modules
//!
//! - [`transient`]: time integration of ODE problems
//!
//! [`Model`]: crema_core::Model
//! [`OdeProblem`]: crema_core::OdeProblem
//! [`Observer`]: crema_core::Observer

pub mod transient;
