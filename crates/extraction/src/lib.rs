//! Espresso extraction kinetics.
//!
//! Models how soluble coffee compounds move from the grounds into the water
//! over one shot. The state is the dissolved concentration `C` and the
//! soluble mass still in the grounds `S`, driven by a rate law that combines
//! Arrhenius kinetics, the particle surface area, and Darcy flow through the
//! packed bed.
//!
//! # Example
//!
//! ```
//! use crema_extraction::{BrewParameters, run_simulation};
//! use uom::si::{f64::Length, length::micrometer};
//!
//! let params = BrewParameters::new(Length::new::<micrometer>(250.0));
//! let result = run_simulation(&params)?;
//!
//! assert_eq!(result.len(), 100);
//! assert!(result.final_concentration().is_some_and(|c| c > 0.0));
//! # Ok::<(), crema_extraction::Error>(())
//! ```
//!
//! Runs are pure functions of their parameters. Compound profiles and
//! physical constants are shared read-only.

mod composition;
mod compound;
mod constants;
mod error;
mod params;
mod rate;
mod simulation;
mod sweep;
mod system;
mod viscosity;

pub use composition::{Composition, CompoundCurve, compose, compose_all, simulate_compound};
pub use compound::{CompoundProfile, DisplayTag, compound, compound_profiles};
pub use constants::{PhysicalConstants, physical_constants};
pub use error::Error;
pub use params::BrewParameters;
pub use rate::{RateTerms, extraction_rate, rate_terms};
pub use simulation::{
    GRID_POINTS, GRID_START, SimulationResult, linspace, run_simulation, run_simulation_with,
    time_grid,
};
pub use sweep::{GrindSweep, YieldSurface, gradient, grind_sweep, yield_surface};
pub use system::{
    ExtractionInput, ExtractionModel, ExtractionOutput, ExtractionProblem, ExtractionState,
    derivatives,
};
pub use viscosity::viscosity;

pub use crema_solvers::transient::dopri5::Config as SolverConfig;
