use std::fmt;

/// A value crossing the host/shader boundary that does not fit the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// An integer that names no member of a slot namespace.
    UnknownSlot {
        /// Namespace the value was decoded against (e.g. `"BufferIndex"`).
        kind: &'static str,
        value: u32,
    },
    /// A byte slice whose length differs from the fixed block size.
    ByteLength { expected: usize, actual: usize },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot { kind, value } => {
                write!(f, "{value} is not a valid {kind} slot")
            }
            Self::ByteLength { expected, actual } => {
                write!(f, "uniform block must be {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for ContractError {}
