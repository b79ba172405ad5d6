use thiserror::Error;

/// Errors raised by the fake-yield estimator.
///
/// A zero enriched count is not an error: it yields a zero contribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// A count or extrapolated yield is negative or not a finite number.
    #[error("invalid input: {field} = {value} (must be a finite, non-negative number)")]
    InvalidInput { field: String, value: f64 },

    /// A per-bin failure inside a histogram estimate.
    #[error("bin {bin}: {source}")]
    Bin {
        bin: usize,
        #[source]
        source: Box<EstimateError>,
    },
}

impl EstimateError {
    pub fn invalid(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value,
        }
    }

    /// Attach the histogram bin index to an estimator error.
    pub fn in_bin(self, bin: usize) -> Self {
        Self::Bin {
            bin,
            source: Box::new(self),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::new(4, format!("Fake yield estimation failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_error_maps_to_exit_code_four() {
        let err: AppError = EstimateError::invalid("double_signal_estimate", -1.0)
            .in_bin(3)
            .into();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("bin 3"));
        assert!(err.message().contains("double_signal_estimate"));
    }
}
