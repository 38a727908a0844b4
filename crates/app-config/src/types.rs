// In crates/app-config/src/types.rs

/// The immutable parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for any pseudo-random step. Nothing in the pipeline consumes
    /// randomness today, but the seed is part of the result record.
    pub seed: i64,
    /// The trailing-mean window length. Always at least 1.
    pub window: usize,
    /// A free-form version tag echoed into the result record.
    pub version: String,
}
