//! Error types for guide-scan

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for guide-scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors surfaced to the caller. The automaton itself never fails at scan
/// time; everything here comes from inputs or from the output sink.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Malformed guide set: empty guide, or a symbol outside the alphabet
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unreadable guide or genome source, with the offending path
    #[error("I/O error on '{}': {}", path.display(), source)]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Result sink could not take the data (create/write/flush failed)
    #[error("cannot write results to '{}': {}", path.display(), source)]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Result sink rejected the data
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanError {
    pub fn at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Path { path: path.into(), source }
    }

    pub fn sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Sink { path: path.into(), source }
    }

    /// 输出阶段的错误：此时扫描结果仍在调用方手里
    pub fn is_sink(&self) -> bool {
        matches!(self, ScanError::Sink { .. } | ScanError::Serialization(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScanError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_error_names_path() {
        let e = ScanError::at(
            "genome.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = e.to_string();
        assert!(msg.contains("genome.txt"), "{}", msg);
        assert!(msg.contains("missing"), "{}", msg);
        assert!(!e.is_invalid_input());
        assert!(!e.is_sink());
    }

    #[test]
    fn sink_error_is_classified() {
        let e = ScanError::sink("out.json", std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(e.is_sink());
        assert_eq!(e.to_string(), "cannot write results to 'out.json': disk full");
    }

    #[test]
    fn invalid_input_is_classified() {
        let e = ScanError::InvalidInput("empty guide".into());
        assert!(e.is_invalid_input());
        assert_eq!(e.to_string(), "invalid input: empty guide");
    }
}
