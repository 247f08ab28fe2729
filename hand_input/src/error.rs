use thiserror::Error;

/// Failures while reading or recording hand landmark data
#[derive(Debug, Error)]
pub enum InputError {
    #[error("landmark I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("landmark source unavailable: {0}")]
    Unavailable(String),

    #[error("{name} landmark index {index} out of range (hands have 21 landmarks)")]
    LandmarkIndex { name: &'static str, index: usize },
}
