//! `epi-model` — disease progression and transmission policies.
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`transition`]   | `TransitionModel` trait                               |
//! | [`ptts`]         | `PttsTransitionModel` — gamma-dwell timed FSM         |
//! | [`transmission`] | `TransmissionModel` trait                             |
//! | [`aggregated`]   | `AggregatedTransmissionModel` — log-hazard aggregation|
//!
//! # Design notes
//!
//! Both traits are stateless in the RNG sense: every stochastic draw goes
//! through the calling agent's `&mut AgentRng`, so a single model instance
//! can be shared across agents (the transmission model is shared behind an
//! `Arc` by design) while runs stay reproducible regardless of thread
//! ordering.

pub mod aggregated;
pub mod ptts;
pub mod transition;
pub mod transmission;


pub use aggregated::AggregatedTransmissionModel;
pub use ptts::{PttsTransitionModel, PttsTransitionModelBuilder};
pub use transition::TransitionModel;
pub use transmission::TransmissionModel;
