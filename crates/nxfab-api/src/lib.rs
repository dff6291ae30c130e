//! Async client for the Cisco NX-API management endpoint.
//!
//! Two wire surfaces share the fixed `http://<device>/ins` endpoint:
//!
//! - **Configuration** ([`SwitchClient::run_commands`]) — JSON-RPC 2.0
//!   batches of `cli` calls, one call object per command, sequential
//!   integer ids, posted with `content-type: application/json-rpc`.
//!   Replies are reconciled back to their originating command text and
//!   classified as [`CommandOutcome`]s.
//! - **Show queries** ([`SwitchClient::show_json`] /
//!   [`SwitchClient::show_ascii`]) — single `ins_api` envelope objects
//!   posted with `content-type: application/json`, returning the
//!   `outputs.output.body` payload either structured or as raw text.
//!
//! All I/O is a single synchronous-in-spirit POST per call: no retry,
//! no backoff, no pipelining. `nxfab-core` drives the sequencing.

pub mod client;
pub mod error;
pub mod rpc;
pub mod show;
pub mod transport;

pub use client::SwitchClient;
pub use error::Error;
pub use rpc::{CommandOutcome, Disposition, RpcReply, RpcRequest, reconcile};
pub use show::ShowRequest;
pub use transport::TransportConfig;
