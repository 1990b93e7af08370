//! `epi-risk` — per-agent risk-score policy.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`score`]  | `RiskScore` trait, policy value objects, `RiskScoreGenerator`|
//! | [`null`]   | `NullRiskScore` — the inert default policy                   |
//!
//! # Design notes
//!
//! A `RiskScore` is the one policy object an agent *feeds* as well as
//! queries: the agent pushes everything it observes (health transitions,
//! exposures, exposure notifications, test results) into the score, and the
//! score answers four questions — how to adjust visits, whether to test,
//! whether to trace contacts, and how long contacts stay relevant.  Belief
//! lives in the policy; ground truth lives in the agent.

pub mod null;
pub mod score;


pub use null::NullRiskScore;
pub use score::{
    ContactTracingPolicy, RiskScore, RiskScoreGenerator, TestPolicy, VisitAdjustment,
};
