#![allow(clippy::unwrap_used)]
// End-to-end CLI tests. Everything here stays off the network: dry
// runs, input-file failures, and confirmation gating.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TENANT_CSV: &str = "TENANT_NAME,VLAN_ID,L2_VNID,L3_VNI_VLAN,L3_VNID,IP_ADDR,BGP_AS\n\
                          blue,100,10100,200,20100,10.1.1.1,65001\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tenant.csv"), TENANT_CSV).unwrap();
    fs::write(dir.path().join("leaf.csv"), "10.255.139.185\n10.255.139.186\n").unwrap();
    dir
}

fn nxfab(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nxfab").unwrap();
    // Keep the user's real config out of the tests.
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("NXFAB_PROFILE")
        .env_remove("NXFAB_USERNAME")
        .env_remove("NXFAB_PASSWORD");
    cmd
}

// ── Provision dry run ───────────────────────────────────────────────

#[test]
fn provision_dry_run_prints_the_37_command_batch() {
    let dir = workspace();
    let output = nxfab(&dir)
        .args(["tenant", "provision", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 37, "batch:\n{stdout}");
    assert_eq!(lines[0], "vlan 100");
    assert!(lines.contains(&"  vn-segment 10100"));
    assert!(lines.contains(&"  ip address 10.1.1.1/24"));
    assert!(lines.contains(&"router bgp 65001"));
    assert!(lines.contains(&"    route-target export auto"));
}

#[test]
fn provision_dry_run_json_is_one_request() {
    let dir = workspace();
    let output = nxfab(&dir)
        .args(["tenant", "provision", "--dry-run", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let requests: Vec<Vec<String>> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].len(), 37);
    assert_eq!(requests[0][0], "vlan 100");
}

#[test]
fn provision_accepts_the_create_alias() {
    let dir = workspace();
    nxfab(&dir)
        .args(["tenant", "create", "--dry-run", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── Decommission dry run & confirmation ─────────────────────────────

#[test]
fn decommission_dry_run_shows_base_teardown_blocks() {
    let dir = workspace();
    let output = nxfab(&dir)
        .args(["tenant", "decommission", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("no member vni 20100 associate-vrf"));
    assert!(stdout.contains("router bgp 65001\nno vrf blue"));
    assert!(stdout.contains("no vrf context blue"));
    // Per-VLAN teardown depends on discovery; not present in a dry run.
    assert!(!stdout.contains("no vni 10100 l2"));
}

#[test]
fn decommission_refuses_to_run_without_yes() {
    let dir = workspace();
    nxfab(&dir)
        .args(["tenant", "decommission"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Input-file failures ─────────────────────────────────────────────

#[test]
fn missing_tenant_file_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    nxfab_bare(&dir)
        .args(["tenant", "provision", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tenant.csv"));
}

#[test]
fn malformed_tenant_row_names_the_expected_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tenant.csv"),
        "TENANT_NAME,VLAN_ID\nblue,100\n",
    )
    .unwrap();

    nxfab_bare(&dir)
        .args(["tenant", "provision", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("7"));
}

fn nxfab_bare(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nxfab").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"));
    cmd
}

// ── Misc surface ────────────────────────────────────────────────────

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    nxfab_bare(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nxfab"));
}

#[test]
fn config_show_prints_defaults_without_a_file() {
    let dir = TempDir::new().unwrap();
    nxfab_bare(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}
