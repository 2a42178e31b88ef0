use reqwest::StatusCode;
use thiserror::Error;

/// Failure reported by the fetch collaborator. Propagated to callers unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure turning a fetched document into model types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not well-formed XML.
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// The document parsed, but a section every valid document carries is absent or unusable.
    #[error("Missing required section: {0}")]
    MissingRequiredSection(&'static str),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No site with this name found.")]
    SiteNotFound {
        name: String,
        province: Option<String>,
    },
}
