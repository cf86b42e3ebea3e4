// CLASSIFICATION: COMMUNITY
// Filename: test_session_windows.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

use std::io;

use debugcc::measure::CounterConfig;
use debugcc::platforms::msm8994::{self, GCC_PHYS, MMSS_PHYS};
use debugcc::sim::{SimEvent, SimHardware, Signal};
use debugcc::{DebugccError, Session};

#[test]
fn windows_released_after_success() {
    let _ = env_logger::builder().is_test(true).try_init();
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    let mut session = Session::new(&catalog, sim.clone());

    session.measure("mdss_mdp_clk").unwrap();
    assert_eq!(sim.open_windows(), 0);
    assert_eq!(sim.lifecycle(), (2, 2));

    session.measure("gcc_sdcc1_apps_clk").unwrap();
    assert_eq!(sim.open_windows(), 0);
    assert_eq!(sim.lifecycle(), (3, 3));
}

#[test]
fn windows_released_after_timeout() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Stuck);
    let config = CounterConfig {
        max_polls: 8,
        ..CounterConfig::default()
    };
    let mut session = Session::new(&catalog, sim.clone()).with_config(config);

    let err = session.measure("mdss_mdp_clk").unwrap_err();
    assert!(matches!(err, DebugccError::MeasurementTimeout { polls: 8, .. }));
    assert_eq!(sim.open_windows(), 0);
    assert_eq!(sim.lifecycle(), (2, 2));
}

#[test]
fn partial_open_is_rolled_back() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    sim.refuse(GCC_PHYS, io::ErrorKind::NotFound);
    let mut session = Session::new(&catalog, sim.clone());

    let err = session.measure("mdss_mdp_clk").unwrap_err();
    assert!(matches!(err, DebugccError::MapFailed { phys, .. } if phys == GCC_PHYS));
    // The MMSS window was mapped first and must not leak.
    assert_eq!(sim.lifecycle(), (1, 1));
    assert_eq!(sim.open_windows(), 0);
}

#[test]
fn unknown_clock_touches_nothing() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    let mut session = Session::new(&catalog, sim.clone());

    let err = session.measure("GCC_SDCC1_APPS_CLK").unwrap_err();
    assert!(matches!(err, DebugccError::UnknownClock(ref name) if name == "GCC_SDCC1_APPS_CLK"));
    assert!(sim.events().is_empty());
}

#[test]
fn each_window_mapped_once_per_call() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    let mut session = Session::new(&catalog, sim.clone());
    session.measure("venus0_vcodec0_clk").unwrap();

    let opens: Vec<u64> = sim
        .events()
        .into_iter()
        .filter_map(|e| match e {
            SimEvent::Open { phys, .. } => Some(phys),
            _ => None,
        })
        .collect();
    assert_eq!(opens, vec![MMSS_PHYS, GCC_PHYS]);
}

#[test]
fn batch_continues_past_failures() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    sim.refuse(MMSS_PHYS, io::ErrorKind::NotFound);
    let mut session = Session::new(&catalog, sim.clone());

    let outcomes = session.measure_all(None).unwrap();
    assert_eq!(outcomes.len(), catalog.entries().len());

    let (gcc, mm): (Vec<_>, Vec<_>) = outcomes.iter().partition(|o| o.block == "gcc");
    assert!(gcc.iter().all(|o| o.result.is_ok()));
    assert!(!mm.is_empty());
    assert!(mm
        .iter()
        .all(|o| matches!(o.result, Err(DebugccError::MapFailed { .. }))));
    assert_eq!(sim.open_windows(), 0);
}

#[test]
fn batch_stops_without_privilege() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    sim.refuse(MMSS_PHYS, io::ErrorKind::PermissionDenied);
    let mut session = Session::new(&catalog, sim.clone());

    let err = session.measure_all(None).unwrap_err();
    assert!(matches!(err, DebugccError::PermissionDenied { phys } if phys == MMSS_PHYS));
    assert_eq!(sim.open_windows(), 0);
}

#[test]
fn streamed_batch_keeps_outcomes_before_abort() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    sim.refuse(MMSS_PHYS, io::ErrorKind::PermissionDenied);
    let mut session = Session::new(&catalog, sim);

    let mut seen = Vec::new();
    let err = session
        .measure_each(None, |outcome| seen.push(outcome))
        .unwrap_err();
    assert!(err.is_permission());
    assert_eq!(seen.len(), 84);
    assert!(seen.iter().all(|o| o.block == "gcc" && o.result.is_ok()));
}

#[test]
fn batch_filters_by_block() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(500_000));
    let mut session = Session::new(&catalog, sim);

    let outcomes = session.measure_all(Some("mm")).unwrap();
    assert!(!outcomes.is_empty());
    assert!(outcomes.iter().all(|o| o.block == "mm" && o.result.is_ok()));
    let expected = catalog
        .entries()
        .iter()
        .filter(|e| catalog.block_of(e) == "mm")
        .count();
    assert_eq!(outcomes.len(), expected);
}
