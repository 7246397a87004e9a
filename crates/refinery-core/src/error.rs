//! Error types for the refinery-core crate.
//!
//! Three families, kept separate because callers treat them differently:
//!
//! - [`ValidationError`] -- malformed construction arguments, surfaced
//!   immediately at construction and never recovered internally.
//! - [`PlanError`] -- a plan operation violated the step/completion state
//!   machine; the caller decides whether to retry with different arguments.
//! - [`OutcomeError`] -- an outcome draw matched no probability band. This is
//!   a band configuration bug, fatal, and must not be retried.

/// Errors raised while constructing a formula or a plan.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// An input or output resource name was empty or all whitespace.
    #[error("resource names must not be empty or blank")]
    BlankResourceName,

    /// The input name and quantity sequences differ in length.
    #[error("input resource names ({names}) and quantities ({quantities}) differ in length")]
    InputLengthMismatch {
        /// Number of input resource names supplied.
        names: usize,
        /// Number of input quantities supplied.
        quantities: usize,
    },

    /// The output name and quantity sequences differ in length.
    #[error("output resource names ({names}) and quantities ({quantities}) differ in length")]
    OutputLengthMismatch {
        /// Number of output resource names supplied.
        names: usize,
        /// Number of output quantities supplied.
        quantities: usize,
    },

    /// The proficiency level exceeds the supported maximum.
    #[error("proficiency level {level} exceeds the maximum of {max}")]
    ProficiencyOutOfRange {
        /// The rejected level.
        level: u8,
        /// The highest level a formula accepts.
        max: u8,
    },

    /// A plan was constructed from an empty formula sequence.
    #[error("a plan requires at least one formula")]
    EmptyPlan,

    /// An executable plan was constructed with a starting step outside the
    /// formula sequence.
    #[error("starting step {step} is out of range for a plan of length {len}")]
    StepOutOfRange {
        /// The rejected starting step.
        step: usize,
        /// The plan length at construction.
        len: usize,
    },
}

/// Fatal internal-consistency failure of the outcome engine.
#[derive(Debug, thiserror::Error)]
pub enum OutcomeError {
    /// The uniform draw satisfied none of the four band conditions.
    ///
    /// The band thresholds deliberately leave gaps at exact boundary values,
    /// so this can only be reached through a boundary draw or a broken band
    /// configuration. Either way the draw is not retried.
    #[error("outcome draw {roll} matched no probability band")]
    UncoveredDraw {
        /// The uniform value that fell outside every band.
        roll: f64,
    },
}

/// Errors raised by plan and executable-plan operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Attempted to remove a formula from an empty plan.
    #[error("cannot remove a formula from an empty plan")]
    Empty,

    /// A slot index fell outside the formula sequence.
    #[error("index {index} is out of range for a plan of length {len}")]
    IndexOutOfRange {
        /// The rejected slot index.
        index: usize,
        /// The plan length at the time of the call.
        len: usize,
    },

    /// The step cursor is past the last slot; there is no current step.
    #[error("step {step} is past the end of the plan; nothing left to apply")]
    Exhausted {
        /// The cursor position at the time of the call.
        step: usize,
    },

    /// The slot was already applied and cannot be applied or replaced again.
    #[error("the formula at slot {index} was already applied")]
    AlreadyApplied {
        /// The slot whose completion flag is set.
        index: usize,
    },

    /// Attempted to replace a slot the step cursor has already passed.
    #[error("cannot replace slot {index}: the cursor already passed it (step {step})")]
    BehindCursor {
        /// The rejected slot index.
        index: usize,
        /// The cursor position at the time of the call.
        step: usize,
    },

    /// Attempted to remove the last formula after it was applied as the
    /// terminal step.
    #[error("cannot remove the last formula: it was already applied as the terminal step")]
    RemoveAppliedTerminal,

    /// The outcome engine failed while applying a formula.
    #[error(transparent)]
    Outcome(#[from] OutcomeError),
}
