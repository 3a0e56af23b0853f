use thiserror::Error;

/// Errors returned by this crate.
#[derive(Error, Debug)]
pub enum KMeansError {
    /// A caller-supplied value is unusable (bad command-line value, bad path, `k` out of range, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input data could not be turned into a point set
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Drawing a weighted random sample failed (e.g. non-finite distances)
    #[error("sampling failed: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KMeansError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, KMeansError::InvalidArgument(_))
    }

    /// The message without its category prefix, for callers that print their own heading.
    pub fn reason(&self) -> String {
        match self {
            KMeansError::InvalidArgument(msg) | KMeansError::InvalidData(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KMeansError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_drops_the_category() {
        let err = KMeansError::InvalidArgument("max_iter: expected a positive integer, got \"0\"".into());
        assert_eq!(err.to_string(), "invalid argument: max_iter: expected a positive integer, got \"0\"");
        assert_eq!(err.reason(), "max_iter: expected a positive integer, got \"0\"");

        let err = KMeansError::InvalidData("no rows".into());
        assert_eq!(err.reason(), "no rows");

        let err = KMeansError::Sampling(rand::distributions::WeightedError::NoItem);
        assert_eq!(err.reason(), err.to_string());
    }
}
