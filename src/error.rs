use std::fmt;

/// Construction and parse errors. A plain enum with a hand-written
/// `Display`, in the style of `lacker-acorn::compilation::Error` — this
/// teacher has no use for an error-derive crate, so neither do we.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// A contract violation at the boundary: malformed surface syntax, a
    /// non-`Sequent` top level, or a quantifier whose bound slot is not a
    /// `Variable`. Per spec.md §7, the core fails fast and does not retry.
    Malformed(String),
}

impl fmt::Display for ProverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProverError::Malformed(msg) => write!(f, "malformed input: {}", msg),
        }
    }
}

impl std::error::Error for ProverError {}
