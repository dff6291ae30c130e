//! The sequential execution loop: one device at a time, one request
//! at a time, no shared state across iterations.
//!
//! Device-reported command failures and per-request transport errors
//! are recorded in the device's report and never abort the run by
//! themselves; the failure policy only decides whether the *rest of
//! that device's* blocks are still attempted.

use nxfab_api::{CommandOutcome, Disposition};
use serde::Serialize;
use tracing::{info, warn};

use crate::plan::Plan;
use crate::target::FabricTarget;

/// What to do with a device's remaining blocks after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep going: attempt every remaining block regardless of earlier
    /// failures on this device (reference behavior).
    #[default]
    BestEffort,
    /// Skip the device's remaining blocks after the first failed
    /// command or transport error. The next device still runs.
    Abort,
}

/// Everything observed while applying a plan to one device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device: String,
    /// Per-command outcomes in transmission order.
    pub outcomes: Vec<CommandOutcome>,
    /// Requests that never produced outcomes (connection refused,
    /// timeout, malformed reply), as display strings.
    pub transport_errors: Vec<String>,
    /// True if the abort policy cut this device's run short.
    pub aborted: bool,
}

impl DeviceReport {
    fn new(device: &str) -> Self {
        Self {
            device: device.to_owned(),
            outcomes: Vec::new(),
            transport_errors: Vec::new(),
            aborted: false,
        }
    }

    /// Count of device-rejected commands.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// True if anything went wrong on this device.
    pub fn has_failures(&self) -> bool {
        self.failures() > 0 || !self.transport_errors.is_empty()
    }
}

/// Apply a plan to every device in order.
///
/// Always returns one report per device, in device-list order, even
/// when every request to a device failed.
pub async fn apply_plan<T: FabricTarget>(
    target: &T,
    devices: &[String],
    plan: &Plan,
    policy: FailurePolicy,
) -> Vec<DeviceReport> {
    let requests = plan.requests();
    let mut reports = Vec::with_capacity(devices.len());

    for device in devices {
        info!(%device, requests = requests.len(), "processing device");
        let mut report = DeviceReport::new(device);

        for commands in &requests {
            match target.apply(device, commands).await {
                Ok(outcomes) => {
                    log_outcomes(device, &outcomes);
                    let failed = outcomes.iter().any(CommandOutcome::is_failure);
                    report.outcomes.extend(outcomes);
                    if failed && policy == FailurePolicy::Abort {
                        warn!(%device, "aborting remaining blocks for this device");
                        report.aborted = true;
                        break;
                    }
                }
                Err(err) => {
                    warn!(%device, error = %err, "request failed");
                    report.transport_errors.push(err.to_string());
                    if policy == FailurePolicy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        reports.push(report);
    }

    reports
}

fn log_outcomes(device: &str, outcomes: &[CommandOutcome]) {
    for outcome in outcomes {
        match &outcome.disposition {
            Disposition::Failed(msg) => {
                warn!(%device, command = %outcome.command, %msg, "command failed");
            }
            Disposition::Info(msg) => {
                info!(%device, command = %outcome.command, %msg, "device message");
            }
            Disposition::Unmatched => {
                warn!(%device, id = %outcome.command, "reply matched no command");
            }
            Disposition::Applied => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use nxfab_api::Error as ApiError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::intent::CommandBlock;
    use crate::plan::Batching;

    /// In-memory target: records every request, fails on command by
    /// text, and refuses connections per device.
    struct ScriptedTarget {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        reject_command: Option<String>,
        unreachable_device: Option<String>,
    }

    impl ScriptedTarget {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_command: None,
                unreachable_device: None,
            }
        }

        fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FabricTarget for ScriptedTarget {
        async fn apply(
            &self,
            device: &str,
            commands: &[String],
        ) -> Result<Vec<CommandOutcome>, ApiError> {
            if self.unreachable_device.as_deref() == Some(device) {
                return Err(ApiError::Http {
                    device: device.to_owned(),
                    status: 503,
                    body: "connection refused".into(),
                });
            }
            self.calls
                .lock()
                .unwrap()
                .push((device.to_owned(), commands.to_vec()));
            Ok(commands
                .iter()
                .map(|cmd| CommandOutcome {
                    command: cmd.clone(),
                    disposition: if self.reject_command.as_deref() == Some(cmd) {
                        Disposition::Failed("rejected".into())
                    } else {
                        Disposition::Applied
                    },
                })
                .collect())
        }

        async fn show_json(
            &self,
            _device: &str,
            _command: &str,
        ) -> Result<serde_json::Value, ApiError> {
            unreachable!("run loop never issues show queries")
        }

        async fn show_ascii(&self, _device: &str, _command: &str) -> Result<String, ApiError> {
            unreachable!("run loop never issues show queries")
        }
    }

    fn plan(batching: Batching) -> Plan {
        Plan {
            blocks: vec![
                CommandBlock::group(["interface nve1".to_owned(), "no member vni 10100".to_owned()]),
                CommandBlock::single("no interface vlan 100"),
                CommandBlock::single("no vlan 100"),
            ],
            batching,
        }
    }

    fn devices(list: &[&str]) -> Vec<String> {
        list.iter().map(|d| (*d).to_owned()).collect()
    }

    #[tokio::test]
    async fn single_shot_plan_is_one_request_per_device() {
        let target = ScriptedTarget::new();
        let reports = apply_plan(
            &target,
            &devices(&["leaf1", "leaf2"]),
            &plan(Batching::SingleShot),
            FailurePolicy::BestEffort,
        )
        .await;

        assert_eq!(reports.len(), 2);
        let calls = target.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "leaf1");
        assert_eq!(calls[0].1.len(), 4);
        assert_eq!(calls[1].0, "leaf2");
    }

    #[tokio::test]
    async fn per_block_plan_is_one_request_per_block() {
        let target = ScriptedTarget::new();
        let reports = apply_plan(
            &target,
            &devices(&["leaf1"]),
            &plan(Batching::PerBlock),
            FailurePolicy::BestEffort,
        )
        .await;

        let calls = target.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1, ["interface nve1", "no member vni 10100"]);
        assert_eq!(calls[2].1, ["no vlan 100"]);
        assert_eq!(reports[0].outcomes.len(), 4);
        assert!(!reports[0].has_failures());
    }

    #[tokio::test]
    async fn best_effort_continues_past_failures() {
        let mut target = ScriptedTarget::new();
        target.reject_command = Some("no interface vlan 100".to_owned());

        let reports = apply_plan(
            &target,
            &devices(&["leaf1"]),
            &plan(Batching::PerBlock),
            FailurePolicy::BestEffort,
        )
        .await;

        // All three blocks were attempted despite the failure.
        assert_eq!(target.calls().len(), 3);
        assert_eq!(reports[0].failures(), 1);
        assert!(!reports[0].aborted);
    }

    #[tokio::test]
    async fn abort_policy_skips_remaining_blocks() {
        let mut target = ScriptedTarget::new();
        target.reject_command = Some("no interface vlan 100".to_owned());

        let reports = apply_plan(
            &target,
            &devices(&["leaf1"]),
            &plan(Batching::PerBlock),
            FailurePolicy::Abort,
        )
        .await;

        // Block 3 was never attempted.
        assert_eq!(target.calls().len(), 2);
        assert!(reports[0].aborted);
    }

    #[tokio::test]
    async fn unreachable_device_does_not_block_the_next() {
        let mut target = ScriptedTarget::new();
        target.unreachable_device = Some("leaf1".to_owned());

        let reports = apply_plan(
            &target,
            &devices(&["leaf1", "leaf2"]),
            &plan(Batching::PerBlock),
            FailurePolicy::BestEffort,
        )
        .await;

        assert_eq!(reports[0].transport_errors.len(), 3);
        assert!(reports[0].has_failures());
        assert!(reports[0].outcomes.is_empty());
        // leaf2 processed normally.
        assert_eq!(reports[1].outcomes.len(), 4);
        assert!(!reports[1].has_failures());
    }
}
