// CLASSIFICATION: COMMUNITY
// Filename: test_cli.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

use std::io;
use std::path::PathBuf;

use clap::Parser;
use debugcc::binlib::debugcc_main::{execute, Cli};
use debugcc::config::DebugccConfig;
use debugcc::platforms::msm8994::{self, MMSS_PHYS};
use debugcc::sim::{SimHardware, Signal};

fn config() -> DebugccConfig {
    DebugccConfig {
        platform: "msm8994".into(),
        dev_mem: PathBuf::from("/dev/null"),
        max_polls: 64,
    }
}

fn sim() -> SimHardware {
    let catalog = msm8994::catalog().unwrap();
    SimHardware::for_catalog(&catalog, Signal::Rate(1_000_000))
}

fn run(args: &[&str], hw: SimHardware) -> (anyhow::Result<bool>, String) {
    let cli = Cli::parse_from(std::iter::once("debugcc").chain(args.iter().copied()));
    let mut out = Vec::new();
    let result = execute(&cli, &cli.config(config()), hw, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn list_prints_every_clock() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (result, out) = run(&["--list"], sim());
    assert!(result.unwrap());
    assert_eq!(out.lines().count(), 166);
    assert!(out.lines().any(|l| l.starts_with("mdss_mdp_clk") && l.ends_with(" mm")));

    let (_, keyword) = run(&["list"], sim());
    assert_eq!(keyword, out);
}

#[test]
fn list_filtered_by_block() {
    let (result, out) = run(&["-l", "-b", "mm"], sim());
    assert!(result.unwrap());
    assert_eq!(out.lines().count(), 82);
    assert!(out.lines().all(|l| l.ends_with(" mm")));
}

#[test]
fn named_clock_measured() {
    let (result, out) = run(&["gcc_sdcc1_apps_clk", "mdss_mdp_clk"], sim());
    assert!(result.unwrap());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].trim_start().starts_with("gcc_sdcc1_apps_clk: 3.99"));
    assert!(lines[1].ends_with("Hz)"));
}

#[test]
fn unknown_clock_reported_and_fails() {
    let (result, out) = run(&["no_such_clk", "gcc_sdcc1_apps_clk"], sim());
    assert!(!result.unwrap());
    assert!(out.contains("no_such_clk: error: unknown clock"));
    assert!(out.contains("gcc_sdcc1_apps_clk: 3.99"));
}

#[test]
fn json_output_for_block() {
    let (result, out) = run(&["--all", "--json", "--block", "gcc"], sim());
    assert!(result.unwrap());
    let records: serde_json::Value = serde_json::from_str(&out).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 84);
    assert!(records.iter().all(|r| r["block"] == "gcc" && r["hz"].is_u64()));
}

#[test]
fn permission_error_aborts() {
    let hw = sim();
    hw.refuse(MMSS_PHYS, io::ErrorKind::PermissionDenied);
    let (result, _) = run(&["mdss_mdp_clk"], hw);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn permission_error_keeps_earlier_results() {
    let hw = sim();
    hw.refuse(MMSS_PHYS, io::ErrorKind::PermissionDenied);
    let (result, out) = run(&["--all"], hw.clone());
    assert!(format!("{:#}", result.unwrap_err()).contains("permission denied"));
    assert_eq!(out.lines().count(), 84);
    assert!(out.lines().all(|l| l.contains("MHz")));

    let names = ["gcc_sdcc1_apps_clk", "mdss_mdp_clk", "gcc_sys_noc_usb3_axi_clk"];
    let (result, out) = run(&names, hw);
    assert!(result.is_err());
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("gcc_sdcc1_apps_clk: 3.99"));
}

#[test]
fn block_rejected_for_named_clocks() {
    let (result, out) = run(&["-b", "mm", "gcc_sdcc1_apps_clk"], sim());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("--block"), "{err}");
    assert!(out.is_empty());
}

#[test]
fn usage_errors() {
    let (result, _) = run(&[], sim());
    assert!(result.is_err());

    let (result, _) = run(&["-p", "msm8996", "-l"], sim());
    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("unknown platform \"msm8996\""), "{err}");

    let (result, _) = run(&["-l", "-b", "gpu"], sim());
    assert!(result.is_err());

    assert!(Cli::try_parse_from(["debugcc", "--max-polls", "0", "x"]).is_err());
    assert!(Cli::try_parse_from(["debugcc", "--all", "--list"]).is_err());
}

#[test]
fn flags_override_config() {
    let cli = Cli::parse_from(["debugcc", "--max-polls", "5", "--dev-mem", "/tmp/mem", "x"]);
    let merged = cli.config(config());
    assert_eq!(merged.max_polls, 5);
    assert_eq!(merged.dev_mem, PathBuf::from("/tmp/mem"));
    assert_eq!(merged.platform, "msm8994");
}
