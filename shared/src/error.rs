//! Error-kind taxonomy
//!
//! Every rejected mutation maps to exactly one [`ErrorKind`]. The wire body
//! carries the kind string alongside a stable `Exxxx` code and a human
//! message, so the UI can render a form error without re-deriving it.

use serde::{Deserialize, Serialize};

/// Machine-readable error kind returned by the API.
///
/// | Code | Kind | Meaning |
/// |------|------|---------|
/// | E0002 | Validation | malformed or out-of-bounds input |
/// | E0003 | NotFound | entity does not exist |
/// | E0004 | Conflict | duplicate name or similar |
/// | E1001 | NoChange | salary change is a no-op |
/// | E1002 | OutOfPolicyRange | percentage change outside policy band |
/// | E1003 | InvalidValue | non-positive salary |
/// | E1004 | InvalidReference | approver/manager reference is dangling |
/// | E1005 | InactiveEntity | target employee is soft-deleted |
/// | E1006 | CyclicManagement | manager chain would form a cycle |
/// | E1007 | ConcurrentModification | lost a write conflict |
/// | E9001 | Internal | unexpected server error |
/// | E9002 | PersistenceFailure | storage or audit write failed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    InactiveEntity,
    InvalidValue,
    InvalidReference,
    NoChange,
    OutOfPolicyRange,
    CyclicManagement,
    ConcurrentModification,
    Validation,
    Conflict,
    PersistenceFailure,
    Internal,
}

impl ErrorKind {
    /// Stable wire string, identical to the variant name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InactiveEntity => "InactiveEntity",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::InvalidReference => "InvalidReference",
            ErrorKind::NoChange => "NoChange",
            ErrorKind::OutOfPolicyRange => "OutOfPolicyRange",
            ErrorKind::CyclicManagement => "CyclicManagement",
            ErrorKind::ConcurrentModification => "ConcurrentModification",
            ErrorKind::Validation => "Validation",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::PersistenceFailure => "PersistenceFailure",
            ErrorKind::Internal => "Internal",
        }
    }

    /// Stable error code for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "E0002",
            ErrorKind::NotFound => "E0003",
            ErrorKind::Conflict => "E0004",
            ErrorKind::NoChange => "E1001",
            ErrorKind::OutOfPolicyRange => "E1002",
            ErrorKind::InvalidValue => "E1003",
            ErrorKind::InvalidReference => "E1004",
            ErrorKind::InactiveEntity => "E1005",
            ErrorKind::CyclicManagement => "E1006",
            ErrorKind::ConcurrentModification => "E1007",
            ErrorKind::Internal => "E9001",
            ErrorKind::PersistenceFailure => "E9002",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
