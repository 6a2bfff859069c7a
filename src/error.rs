use core::fmt;
use std::io;

/// Benchmark result type alias
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// A sizing parameter is out of range; carries the parameter name.
    InvalidConfig(&'static str),
    /// A corpus shape does not fit in `usize`; names the product.
    Overflow(&'static str),
    /// A strategy wrote a different element count than the source holds.
    LengthMismatch(usize, usize),
    PartitionOverflow {
        partition: usize,
        offset: usize,
        len: usize,
        capacity: usize,
    },
    /// Partition codes are not aligned for the element type.
    Misaligned(usize),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(param) => write!(f, "Invalid configuration: {} must be non-zero", param),
            Error::Overflow(what) => write!(f, "Numeric overflow computing {}", what),
            Error::LengthMismatch(expected, actual) => {
                write!(f, "Destination length mismatch: expected {}, got {}", expected, actual)
            }
            Error::PartitionOverflow { partition, offset, len, capacity } => write!(
                f,
                "Partition {} overflows destination: offset {} + {} > {}",
                partition, offset, len, capacity
            ),
            Error::Misaligned(partition) => write!(f, "Partition {} codes are misaligned", partition),
            Error::Io(e) => write!(f, "I/O: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
