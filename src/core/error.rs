/*!
# Unified Error Type

A single error enum covering every failure kind a `tournet` operation can
raise: one variant per kind, each carrying a human-readable message, with
`Display` producing the sentence callers show to users.
*/

use std::error::Error;
use std::fmt;

/// Unified error type for all `tournet` operations.
#[derive(Debug)]
pub enum TourError {
    /// The uploaded OSM XML could not be parsed, or contained no usable data.
    BadNetworkFile(String),
    /// The uploaded points file was missing columns or contained unparseable values.
    BadPointsFile(String),
    /// The road graph has zero nodes.
    EmptyGraph(String),
    /// A solver was invoked with no snapped points.
    EmptyInput(String),
    /// The cost matrix contains an unreachable pair; no tour exists.
    Disconnected(String),
    /// The input size exceeds what the requested algorithm can handle.
    SizeExceeded(String),
    /// Unclassified failure.
    Internal(String),
}

impl TourError {
    pub fn bad_network_file(message: impl Into<String>) -> Self {
        TourError::BadNetworkFile(message.into())
    }

    pub fn bad_points_file(message: impl Into<String>) -> Self {
        TourError::BadPointsFile(message.into())
    }

    pub fn empty_graph(message: impl Into<String>) -> Self {
        TourError::EmptyGraph(message.into())
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        TourError::EmptyInput(message.into())
    }

    pub fn disconnected(message: impl Into<String>) -> Self {
        TourError::Disconnected(message.into())
    }

    pub fn size_exceeded(message: impl Into<String>) -> Self {
        TourError::SizeExceeded(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TourError::Internal(message.into())
    }

    /// Short machine-readable name of the variant, for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TourError::BadNetworkFile(_) => "BadNetworkFile",
            TourError::BadPointsFile(_) => "BadPointsFile",
            TourError::EmptyGraph(_) => "EmptyGraph",
            TourError::EmptyInput(_) => "EmptyInput",
            TourError::Disconnected(_) => "Disconnected",
            TourError::SizeExceeded(_) => "SizeExceeded",
            TourError::Internal(_) => "Internal",
        }
    }
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TourError::BadNetworkFile(msg) => write!(f, "bad network file: {}", msg),
            TourError::BadPointsFile(msg) => write!(f, "bad points file: {}", msg),
            TourError::EmptyGraph(msg) => write!(f, "empty graph: {}", msg),
            TourError::EmptyInput(msg) => write!(f, "empty input: {}", msg),
            TourError::Disconnected(msg) => write!(f, "disconnected: {}", msg),
            TourError::SizeExceeded(msg) => write!(f, "size exceeded: {}", msg),
            TourError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl Error for TourError {}

/// Crate-wide result alias; every fallible `tournet` operation returns this.
pub type Result<T> = std::result::Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TourError::empty_input("no snapped points supplied");
        assert_eq!(format!("{}", err), "empty input: no snapped points supplied");
        assert_eq!(err.kind(), "EmptyInput");
    }

    #[test]
    fn test_size_exceeded_display() {
        let err = TourError::size_exceeded("n = 13 exceeds exhaustive cap of 12");
        assert!(format!("{}", err).starts_with("size exceeded:"));
    }
}
