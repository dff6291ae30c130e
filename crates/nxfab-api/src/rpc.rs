//! JSON-RPC envelopes for the NX-API `cli` method, plus reply
//! reconciliation.
//!
//! A configuration batch is a JSON list of call objects, one per CLI
//! command, each tagged with a sequential integer id. The switch
//! answers with a list of reply elements keyed by the same ids; the
//! reconciler maps every reply back to the command text that produced
//! it and classifies it for reporting.

use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Request side ────────────────────────────────────────────────────

/// One JSON-RPC call object: `{"jsonrpc":"2.0","method":"cli",
/// "params":{"cmd":...,"version":1},"id":N}`.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: RpcParams,
    pub id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcParams {
    pub cmd: String,
    pub version: u32,
}

impl RpcRequest {
    /// Wrap an ordered command list as a request batch with sequential
    /// 1-based ids. Ids are scoped to this batch only and exist purely
    /// for reply correlation.
    pub fn batch(commands: &[String]) -> Vec<Self> {
        commands
            .iter()
            .enumerate()
            .map(|(idx, cmd)| Self {
                jsonrpc: "2.0",
                method: "cli",
                params: RpcParams {
                    cmd: cmd.clone(),
                    version: 1,
                },
                id: u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1),
            })
            .collect()
    }
}

// ── Reply side ──────────────────────────────────────────────────────

/// One reply element. Carries either a `result` (possibly null) or an
/// `error`; both absent means a silent success.
#[derive(Debug, Deserialize)]
pub struct RpcReply {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub result: Option<RpcResult>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcResult {
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorData {
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Outcomes ────────────────────────────────────────────────────────

/// Classification of one reply element, in spec precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "kebab-case")]
pub enum Disposition {
    /// Empty result, no error: the command was accepted silently.
    Applied,
    /// The device attached an informational message to the command.
    Info(String),
    /// The device rejected the command.
    Failed(String),
    /// The reply id matched no request in the batch.
    Unmatched,
}

impl Disposition {
    /// Short status label for table output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Info(_) => "info",
            Self::Failed(_) => "failed",
            Self::Unmatched => "unmatched",
        }
    }
}

/// One reconciled reply: the originating command text and what the
/// device said about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub command: String,
    #[serde(flatten)]
    pub disposition: Disposition,
}

impl CommandOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.disposition, Disposition::Failed(_))
    }

    /// The device-supplied message, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.disposition {
            Disposition::Info(msg) | Disposition::Failed(msg) => Some(msg),
            Disposition::Applied | Disposition::Unmatched => None,
        }
    }
}

// ── Reconciliation ──────────────────────────────────────────────────

/// Map every reply element back to the command text that produced it
/// and classify it.
///
/// Lookup is a linear scan over the request batch; if a duplicate id
/// were ever produced (it must not be), the last match wins. A reply
/// id with no matching request violates the batch invariant and is
/// surfaced as [`Disposition::Unmatched`] rather than dropped.
///
/// Classification precedence per element:
/// 1. non-empty `result` with a `msg` field → `Info`
/// 2. `error` with a structured `data.msg` → `Failed`
/// 3. `error` with only a top-level `message` → `Failed`
/// 4. empty/absent result, no error → `Applied`
pub fn reconcile(requests: &[RpcRequest], replies: &[RpcReply]) -> Vec<CommandOutcome> {
    replies
        .iter()
        .map(|reply| {
            let mut command = None;
            for req in requests {
                if Some(req.id) == reply.id {
                    command = Some(req.params.cmd.as_str());
                }
            }

            let Some(command) = command else {
                warn!(id = ?reply.id, "reply id matched no request in the batch");
                return CommandOutcome {
                    command: reply
                        .id
                        .map_or_else(|| "(no id)".to_owned(), |id| format!("(id {id})")),
                    disposition: Disposition::Unmatched,
                };
            };

            let disposition = classify(reply);
            CommandOutcome {
                command: command.to_owned(),
                disposition,
            }
        })
        .collect()
}

fn classify(reply: &RpcReply) -> Disposition {
    if let Some(msg) = reply.result.as_ref().and_then(|r| r.msg.as_deref()) {
        if !msg.is_empty() {
            return Disposition::Info(msg.to_owned());
        }
    }

    if let Some(err) = &reply.error {
        if let Some(msg) = err.data.as_ref().and_then(|d| d.msg.as_deref()) {
            return Disposition::Failed(msg.to_owned());
        }
        if let Some(msg) = err.message.as_deref() {
            return Disposition::Failed(msg.to_owned());
        }
        // Neither message shape present. The reference behavior was to
        // print nothing here; report the code instead of going silent.
        return Disposition::Failed(match err.code {
            Some(code) => format!("device error (code {code})"),
            None => "device error (no message)".to_owned(),
        });
    }

    Disposition::Applied
}

// ── Tests ───────────────────────────────────────────────────────────
