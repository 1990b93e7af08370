//! `epi-core` — foundational types for the `epi` epidemic simulation workspace.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentUuid`, `LocationUuid`                                |
//! | [`time`]   | `SimTime`, `SimDuration`, `Timestep`, `SimConfig`          |
//! | [`rng`]    | `AgentRng` — per-agent deterministic streams               |
//! | [`health`] | `HealthState`, `HealthTransition`                          |
//! | [`event`]  | `Exposure`, `InfectionOutcome`, `Visit`, `Contact`, `TestResult`, `ContactReport`, micro-exposure helper |
//! | [`broker`] | `Broker<T>` publish trait, `QueueBroker`, `NullBroker`     |
//! | [`error`]  | `EpiError`, `EpiResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod broker;
pub mod error;
pub mod event;
pub mod health;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use broker::{Broker, NullBroker, QueueBroker};
pub use error::{EpiError, EpiResult};
pub use event::{
    Contact, ContactReport, Exposure, ExposureType, InfectionOutcome, TestResult, Visit,
    generate_micro_exposures, MICRO_EXPOSURE_BUCKETS,
};
pub use health::{HealthState, HealthTransition};
pub use ids::{AgentUuid, LocationUuid};
pub use rng::AgentRng;
pub use time::{SimConfig, SimDuration, SimTime, Timestep};
