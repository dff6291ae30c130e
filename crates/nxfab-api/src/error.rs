use thiserror::Error;

/// Top-level error type for the `nxfab-api` crate.
///
/// Covers every failure mode of the NX-API endpoint: transport,
/// HTTP-level rejection, malformed bodies, and query replies missing
/// the expected output path. `nxfab-core` maps these into run-level
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The switch rejected the configured credentials.
    #[error("Authentication rejected by {device} -- check NX-API credentials")]
    Authentication { device: String },

    /// Non-success HTTP status outside the auth case.
    #[error("HTTP {status} from {device}: {body}")]
    Http {
        device: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not the JSON shape we expect, with a preview
    /// of the offending body for debugging.
    #[error("Deserialization error from {device}: {message}")]
    Deserialization { device: String, message: String },

    /// An `ins_api` show reply carried no usable output body.
    #[error("Show query '{command}' on {device} returned no output body")]
    MissingOutput { device: String, command: String },

    /// `cli_show_ascii` returned a non-string body.
    #[error("Show query '{command}' on {device} returned a non-text body")]
    NotText { device: String, command: String },
}

impl Error {
    /// Returns `true` if this is a connectivity-level failure (the
    /// device was never reached or never answered), as opposed to the
    /// device answering with something we could not use.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
