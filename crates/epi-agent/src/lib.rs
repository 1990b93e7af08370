//! `epi-agent` — the per-agent simulation engine.
//!
//! # Crate layout
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`agent`] | `SeirAgent` — the orchestrating state machine   |
//!
//! # Per-timestep contract
//!
//! The driver invokes each agent three times per timestep, in this order,
//! with all agents completing one phase before any agent starts the next:
//!
//! 1. [`SeirAgent::process_infection_outcomes`] — ingest last round's
//!    exposures, advance the health chain.
//! 2. [`SeirAgent::compute_visits`] — plan visits, split them at
//!    health-state boundaries, publish them.
//! 3. [`SeirAgent::update_contact_reports`] — fold in contact-tracing
//!    notifications, maybe run a diagnostic test, notify contacts.
//!
//! Agents hold no references to each other; distinct agents' calls within a
//! phase may run in parallel.

pub mod agent;


pub use agent::SeirAgent;
