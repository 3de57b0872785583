use thiserror::Error;

/// Domain-specific errors for the scheduler and substitution engine.
///
/// Only `CatalogConsistency` and `StoreFailure` are meant to abort a run via
/// `?`. The others are carried as data inside reports (`GaStats`,
/// `FitnessReport`, substitution/repair results) because they describe a
/// partial, still-usable outcome rather than a failure to produce one.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Invalid constraint or configuration: {0}")]
    InvalidConstraint(String),

    /// The catalog snapshot is internally inconsistent (dangling reference,
    /// duplicate id). Fatal — there is no candidate to build against.
    #[error("Catalog is inconsistent: {0}")]
    CatalogConsistency(String),

    /// A class's required hours exceed its available slots; reported, not
    /// thrown, so the builder can still place what it can.
    #[error("Class '{class_id}' requires more hours than it has slots for: needs {needed}, has {available}")]
    InfeasibleRequirement {
        class_id: String,
        needed: u32,
        available: u32,
    },

    /// A single required session could not be placed anywhere during
    /// construction; carried in the builder's report.
    #[error("Could not place a session for class '{class_id}' subject '{subject_id}'")]
    UnplaceableSession {
        class_id: String,
        subject_id: String,
    },

    /// The evaluator found conflicts remaining in a candidate; carried in
    /// `FitnessReport`/`GaStats`, not thrown.
    #[error("{0} conflicts remain in the candidate")]
    ConflictResidual(usize),

    /// The substitute finder found no eligible candidate; the caller gets
    /// `None` back, this variant exists for contexts that need to log it.
    #[error("No eligible substitute found for staff '{staff_id}' on {date}")]
    NoSubstituteFound { staff_id: String, date: String },

    /// Conflict repair could not resolve every detected conflict; carried
    /// in the repair report.
    #[error("Repair left {0} conflicts unresolved")]
    RepairFailure(usize),

    /// The injected catalog/schedule store returned an error.
    #[error("Store operation failed: {0}")]
    StoreFailure(String),
}

/// Use anyhow::Result at application boundaries, matching the rest of the
/// pipeline's error handling.
pub type Result<T> = anyhow::Result<T>;
