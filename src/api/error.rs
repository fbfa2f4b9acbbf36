use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the DNS API client. None of them are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("encoding request payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("http request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decoding response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The provider answered with `success: false`. `code` is `None` when the
    /// response carried no error objects at all.
    #[error("{}", api_failure(.code, .message))]
    Api { code: Option<i64>, message: String },

    #[error("no zone found for domain: {domain}")]
    NotFound { domain: String },

    #[error("token status: {status}")]
    TokenInvalid { status: String },
}

fn api_failure(code: &Option<i64>, message: &str) -> String {
    match code {
        Some(code) => format!("cloudflare error: {message} (code {code})"),
        None => "cloudflare request failed".to_string(),
    }
}
