use thiserror::Error;

/// Failures talking to the upstream weather provider.
///
/// The run halts on any of these; there is no retry and no partial result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    /// Short message suitable for showing to the person running the tool
    pub fn user_message(&self) -> String {
        match self {
            FetchError::DataUnavailable(msg) => format!("No historic data available ({msg})"),
            FetchError::UnexpectedResponse(msg) => {
                format!("Weather service returned data in an unexpected format ({msg})")
            }
            FetchError::Http(e) => format!("No historic data available (request failed: {e})"),
        }
    }
}

/// Failures while training, applying or persisting the irradiance model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot train on empty dataset")]
    EmptyDataset,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Model persistence failed: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_distinguishes_kinds() {
        let unavailable = FetchError::DataUnavailable("HTTP 422".to_string());
        let shape = FetchError::UnexpectedResponse("missing properties".to_string());

        assert!(unavailable.user_message().starts_with("No historic data available"));
        assert!(shape.user_message().contains("unexpected format"));
    }

    #[tokio::test]
    async fn test_transport_failure_reads_as_data_unavailable() {
        // Nothing listens on port 9 of the loopback interface
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/api/temporal/hourly/point")
            .send()
            .await
            .unwrap_err();

        let message = FetchError::from(err).user_message();
        assert!(message.starts_with("No historic data available"));
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::DimensionMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 4, got 3");
    }
}
