//! `epi-visit` — visit-generation policies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`generator`] | `VisitGenerator` trait                                     |
//! | [`duration`]  | `DurationSpecifiedVisitGenerator` — sampled-duration plans |
//! | [`indexed`]   | `IndexedLocationVisitGenerator` — uniform convenience wrap |
//!
//! # Design notes
//!
//! A visit generator answers "where is this agent during the timestep" with
//! a chronological, gap-free partition of the window.  Health-state
//! annotation and uuid assignment are deliberately *not* its job: generators
//! emit [`Visit::unassigned`][epi_core::Visit::unassigned] intervals and the
//! owning agent fills in the rest, so one generator implementation serves
//! agents in any health state.

pub mod duration;
pub mod generator;
pub mod indexed;

#[cfg(test)]
mod tests;

pub use duration::{DurationSpecifiedVisitGenerator, LocationDuration};
pub use generator::VisitGenerator;
pub use indexed::IndexedLocationVisitGenerator;
