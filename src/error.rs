//! Error types for the medir benchmark harness
//!
//! Every failure here is fatal by policy: a corrupted or missing sample
//! cannot be skipped without silently producing misleading comparative
//! statistics, so errors abort the whole run rather than the offending
//! trial.

use thiserror::Error;

/// Errors that abort a benchmark run.
#[derive(Debug, Error)]
pub enum MedirError {
    /// The pipeline tool's diagnostic output contained no recognizable fps
    /// token.
    #[error("unable to determine FPS from stderr: {stderr}")]
    FpsUnparseable {
        /// Full captured diagnostic output, attached for diagnosis.
        stderr: String,
    },

    /// The external pipeline process could not be launched.
    #[error("failed to launch {program}: {source}")]
    PipelineSpawn {
        /// Program name that failed to start.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Statistics were requested over an empty sample set.
    #[error("cannot reduce an empty sample set")]
    EmptySampleSet,

    /// A report artifact could not be written.
    #[error("failed to write {path}: {source}")]
    ReportWrite {
        /// Destination path of the artifact.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, MedirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_error_carries_diagnostic_text() {
        let err = MedirError::FpsUnparseable {
            stderr: "Script evaluation failed".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("unable to determine FPS"));
        assert!(message.contains("Script evaluation failed"));
    }

    #[test]
    fn test_spawn_error_names_the_program() {
        let err = MedirError::PipelineSpawn {
            program: "vspipe".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("vspipe"));
    }

    #[test]
    fn test_empty_sample_set_message() {
        assert_eq!(
            MedirError::EmptySampleSet.to_string(),
            "cannot reduce an empty sample set"
        );
    }
}
