//! Core traits and types for the Crema workspace.
//!
//! This crate defines the shared abstractions that solvers and models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model to a system of `N` ordinary differential
//!   equations so generic integrators can drive it
//! - [`constraint`]: numeric invariants checked before a model is evaluated

mod model;
mod observer;
mod problems;

pub mod constraint;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use {model::Model, model::Snapshot};
