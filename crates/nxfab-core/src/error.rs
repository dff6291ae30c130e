use thiserror::Error;

/// Failures surfaced by the core layer.
///
/// Input-file problems terminate a run before anything touches the
/// network; discovery failures abort a decommission run. Per-command
/// and per-request failures during execution are NOT errors at this
/// level -- they are recorded in the device reports and the run
/// continues.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tenant file {path}: {reason}")]
    TenantParse { path: String, reason: String },

    #[error("device file {path} contains no device addresses")]
    EmptyDeviceList { path: String },

    /// A discovery query failed. Unlike execution-path transport
    /// errors, this aborts the whole run: the decommission batch
    /// cannot be assembled without the discovered state.
    #[error("discovery failed on {device}: {source}")]
    Discovery {
        device: String,
        #[source]
        source: nxfab_api::Error,
    },

    /// Building the shared HTTP client failed.
    #[error(transparent)]
    Api(#[from] nxfab_api::Error),
}
