//! `epi-sim` — timestep driver for the epi workspace.
//!
//! # Three-phase timestep loop
//!
//! ```text
//! for each timestep:
//!   ① ProcessInfectionOutcomes — every agent ingests last round's exposure
//!                                events and advances its health chain.
//!   ② ComputeVisits            — every agent plans, splits, and publishes
//!                                its visits for the window.
//!   ③ UpdateContactReports     — every agent folds in tracing reports,
//!                                maybe tests, and notifies its contacts.
//! ```
//!
//! Each phase completes for all agents before the next phase starts (the
//! barrier the per-agent contract requires).  Contact reports produced in
//! phase ③ are routed to their addressees at the *next* timestep's phase ③.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs each phase across agents on Rayon's thread pool|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_sim::{NoopObserver, Simulation};
//!
//! let mut sim = Simulation::builder(config)
//!     .agents(population)
//!     .build()?;
//! sim.seed_infections(initial_infections);
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use observer::{HealthCensus, NoopObserver, SimObserver};
pub use sim::{Simulation, StepInputs, StepOutputs};
