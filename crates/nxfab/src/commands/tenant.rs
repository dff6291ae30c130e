//! Tenant command handlers: the provision and decommission batch jobs.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use tabled::Tabled;

use nxfab_core::{
    Batching, DeviceReport, Discovery, Disposition, NxapiTarget, Plan, apply_plan,
    decommission_plan, discover, load_device_file, load_tenant_file, provision_plan,
};

use crate::cli::{GlobalOpts, JobArgs, OutputFormat, TenantArgs, TenantCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: TenantArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TenantCommand::Provision(job) => provision(&job, global).await,
        TenantCommand::Decommission(job) => decommission(&job, global).await,
    }
}

// ── Provision ───────────────────────────────────────────────────────

async fn provision(job: &JobArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let spec = load_tenant_file(&job.tenant_file)?;
    let plan = provision_plan(&spec);
    tracing::info!(tenant = %spec.name, commands = plan.command_count(), "provision plan built");

    if job.dry_run {
        output::print_output(&render_plan(&global.output, &plan), global.quiet);
        return Ok(());
    }

    let resolved = config::resolve_run(global)?;
    let devices = load_device_file(&device_path(job, &resolved))?;
    let target = new_target(resolved)?;

    let reports = apply_plan(&target, &devices, &plan, job.on_error.into()).await;
    report(global, &reports)
}

// ── Decommission ────────────────────────────────────────────────────

async fn decommission(job: &JobArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let spec = load_tenant_file(&job.tenant_file)?;

    if job.dry_run {
        // Discovery needs the fabric; preview only the fixed base
        // teardown without touching the network.
        let plan = decommission_plan(&spec, &Discovery::default());
        output::print_output(&render_plan(&global.output, &plan), global.quiet);
        return Ok(());
    }

    if !global.yes {
        return Err(CliError::ConfirmationRequired {
            action: format!("tenant decommission ({})", spec.name),
        });
    }

    let resolved = config::resolve_run(global)?;
    let devices = load_device_file(&device_path(job, &resolved))?;
    let target = new_target(resolved)?;

    let discovery = discover(&target, &devices, &spec.name).await?;
    tracing::info!(
        tenant = %spec.name,
        vlans = discovery.vlans.len(),
        "discovery complete"
    );

    let plan = decommission_plan(&spec, &discovery);
    let reports = apply_plan(&target, &devices, &plan, job.on_error.into()).await;
    report(global, &reports)
}

// ── Shared helpers ──────────────────────────────────────────────────

fn new_target(resolved: config::ResolvedRun) -> Result<NxapiTarget, CliError> {
    NxapiTarget::new(resolved.transport).map_err(|e| CliError::Transport {
        message: e.to_string(),
    })
}

fn device_path(job: &JobArgs, resolved: &config::ResolvedRun) -> PathBuf {
    job.devices
        .clone()
        .or_else(|| resolved.devices_file.clone())
        .unwrap_or_else(|| PathBuf::from("leaf.csv"))
}

/// Render a plan for `--dry-run`: the exact request bodies that would
/// be posted, one block per request in per-block mode.
fn render_plan(format: &OutputFormat, plan: &Plan) -> String {
    let requests = plan.requests();
    output::render_structured(format, &requests, || match plan.batching {
        Batching::SingleShot => plan.flattened().join("\n"),
        Batching::PerBlock => requests
            .iter()
            .map(|block| block.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n"),
    })
}

// ── Report rendering ────────────────────────────────────────────────

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn status_cell(label: &str, color: bool) -> String {
    if !color {
        return label.to_owned();
    }
    match label {
        "failed" | "error" => label.red().to_string(),
        "info" => label.yellow().to_string(),
        "unmatched" => label.magenta().to_string(),
        _ => label.green().to_string(),
    }
}

/// Build table rows for everything noteworthy: silent successes are
/// omitted, matching the console behavior of only reporting commands
/// the device had something to say about.
fn noteworthy_rows(reports: &[DeviceReport], color: bool) -> Vec<OutcomeRow> {
    let mut rows = Vec::new();
    for report in reports {
        for outcome in &report.outcomes {
            if outcome.disposition == Disposition::Applied {
                continue;
            }
            rows.push(OutcomeRow {
                device: report.device.clone(),
                command: outcome.command.clone(),
                status: status_cell(outcome.disposition.label(), color),
                message: outcome.message().unwrap_or_default().to_owned(),
            });
        }
        for err in &report.transport_errors {
            rows.push(OutcomeRow {
                device: report.device.clone(),
                command: "(request)".into(),
                status: status_cell("error", color),
                message: err.clone(),
            });
        }
    }
    rows
}

fn report(global: &GlobalOpts, reports: &[DeviceReport]) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let rendered = match global.output {
        OutputFormat::Table => {
            let rows = noteworthy_rows(reports, color);
            if rows.is_empty() {
                format!(
                    "All commands applied silently on {} device(s).",
                    reports.len()
                )
            } else {
                output::render_table(&rows)
            }
        }
        OutputFormat::Plain => noteworthy_rows(reports, false)
            .iter()
            .map(|row| {
                format!(
                    "{}\t{}\t{}\t{}",
                    row.device, row.status, row.command, row.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => output::render_json_pretty(reports),
        OutputFormat::JsonCompact => output::render_json_compact(reports),
        OutputFormat::Yaml => output::render_yaml(reports),
    };
    output::print_output(&rendered, global.quiet);

    let failures: usize = reports
        .iter()
        .map(|r| r.failures() + r.transport_errors.len())
        .sum();
    if failures > 0 {
        let devices = reports.iter().filter(|r| r.has_failures()).count();
        return Err(CliError::CommandsFailed { failures, devices });
    }
    Ok(())
}
