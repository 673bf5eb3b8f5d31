/// Core error type for the air quality bot.
///
/// Adapter crates map their specific errors into this type. Upstream data
/// errors never travel past the fetch boundary: sources log them and report
/// the source as unavailable instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(String),

    #[error("upstream {source_name} returned an unusable payload: {reason}")]
    Upstream {
        source_name: &'static str,
        reason: String,
    },

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
