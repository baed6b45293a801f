use std::fmt;

use thiserror::Error;

/// Which of the three quest sub-record sequences an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Condition,
    Goal,
    Reward,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequenceKind::Condition => "condition",
            SequenceKind::Goal => "goal",
            SequenceKind::Reward => "reward",
        };
        f.write_str(name)
    }
}

/// Errors raised by field access and sequence mutation on a `QuestRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The name is not one of the 24 fixed quest fields.
    #[error("unknown quest field '{0}'")]
    UnknownField(String),
    /// A replace/remove targeted a position outside `[0, len)`.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange { kind: SequenceKind, index: usize, len: usize },
}
