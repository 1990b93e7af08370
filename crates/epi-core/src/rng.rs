//! Deterministic per-agent RNG streams.
//!
//! # Determinism strategy
//!
//! Each agent owns its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_uuid * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive uuids uniformly across the seed space.  This
//! means:
//!
//! - Agents never share RNG state (no contention, no ordering dependency), so
//!   per-phase parallel evaluation of distinct agents is reproducible.
//! - Stochastic policy objects (transition, transmission, visit sampling) are
//!   themselves stateless: every draw goes through the calling agent's
//!   `&mut AgentRng`, never through global mutable state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentUuid;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at construction time.  The type is `!Sync` to prevent
/// accidental sharing across threads — each worker must hold its own.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent uuid.
    pub fn new(global_seed: u64, agent: AgentUuid) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`dist.sample(rng.inner())`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
