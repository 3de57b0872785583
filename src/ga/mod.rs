pub mod builder;
pub mod driver;
pub mod evaluator;
pub mod operators;

pub use driver::{run, CancellationToken, GaRunResult, GenerationStats, StopReason};
pub use evaluator::{evaluate, Conflict, ConflictKind, FitnessReport, PenaltyBreakdown};
