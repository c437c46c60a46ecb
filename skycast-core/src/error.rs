use thiserror::Error;

/// Shown when no API key is available; the only failure the UI distinguishes.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Missing API key. Run `skycast configure` or set SKYCAST_API_KEY.";

/// Every other failure collapses to this. Detail goes to the log only.
pub const FETCH_FAILED_MESSAGE: &str = "Could not load weather. Try another city.";

/// Why a fetch failed. Variants carry diagnostic detail for logging; the
/// user-facing string comes from [`FetchError::user_message`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured")]
    MissingCredential,

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status; carries the truncated response body.
    #[error("unexpected status {0}: {1}")]
    BadStatus(u16, String),

    /// The body was not the expected timeline JSON shape.
    #[error("malformed payload: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_has_its_own_message() {
        assert_eq!(
            FetchError::MissingCredential.user_message(),
            MISSING_CREDENTIAL_MESSAGE
        );
    }

    #[test]
    fn all_other_failures_collapse_to_one_message() {
        let errors = [
            FetchError::Network("connection refused".into()),
            FetchError::BadStatus(500, "internal".into()),
            FetchError::Parse("expected value".into()),
        ];
        for err in errors {
            assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
        }
    }
}
