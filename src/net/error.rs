use std::fmt;

/// Errors produced by the transport client.
/// Closed set: every failure path in `HttpClient::send` maps to exactly one
/// variant, and nothing else is ever delivered.
#[derive(Debug)]
pub enum NetworkError {
    /// Request descriptor is unusable (missing or malformed endpoint). Never retried.
    Configuration(String),
    /// Request body could not be serialized to JSON.
    Encoding(String),
    /// Network-level failure (timeout, DNS, connection refused, TLS).
    Transport(String),
    /// Server answered with a non-2xx status. `message` holds a bounded
    /// snippet of the error body for diagnostics.
    Http { status: u16, message: String },
    /// Response body did not match the expected payload shape.
    Decoding(String),
}

impl NetworkError {
    /// Short stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkError::Configuration(_) => "configuration",
            NetworkError::Encoding(_) => "encoding",
            NetworkError::Transport(_) => "transport",
            NetworkError::Http { .. } => "http",
            NetworkError::Decoding(_) => "decoding",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            NetworkError::Encoding(msg) => write!(f, "encoding error: {msg}"),
            NetworkError::Transport(msg) => write!(f, "transport error: {msg}"),
            NetworkError::Http { status, message } => {
                write!(f, "HTTP error ({status}): {message}")
            }
            NetworkError::Decoding(msg) => write!(f, "decoding error: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_code() {
        let err = NetworkError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error (404): not found");
    }

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = [
            NetworkError::Configuration(String::new()),
            NetworkError::Encoding(String::new()),
            NetworkError::Transport(String::new()),
            NetworkError::Http {
                status: 500,
                message: String::new(),
            },
            NetworkError::Decoding(String::new()),
        ];
        let mut kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), 5);
    }
}
