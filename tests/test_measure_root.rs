// CLASSIFICATION: COMMUNITY
// Filename: test_measure_root.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

use std::cell::Cell;
use std::rc::Rc;

use debugcc::catalog::{Catalog, CatalogBuilder};
use debugcc::measure::{CounterConfig, Pacer, CTL_ARM, FULL_GATE_TICKS, XO_DIV4_HZ};
use debugcc::mux::{MuxLayout, RootCounter};
use debugcc::platforms::msm8994::{self, GCC_PHYS};
use debugcc::sim::{SimEvent, SimHardware, Signal};
use debugcc::{DebugccError, Session};

const ROOT_PHYS: u64 = 0x1000_0000;

const COUNTER: RootCounter = RootCounter {
    ref_enable_reg: 0x10c8,
    ctl_reg: 0x1884,
    status_reg: 0x1888,
};

/// GCC-shaped root without a post divider.
fn undivided_root() -> Catalog {
    let mut builder = CatalogBuilder::new("bench");
    let root = builder.add_root(
        MuxLayout::new("gcc", ROOT_PHYS, 0x2000)
            .enable(0x1880, 1 << 16)
            .select(0x1880, 0x3ff),
        COUNTER,
    );
    builder.add_clock("gcc_sdcc1_apps_clk", root, 0x68);
    builder.add_clock("gcc_sdcc2_apps_clk", root, 0x70);
    builder.build().unwrap()
}

struct CountingPacer(Rc<Cell<u32>>);

impl Pacer for CountingPacer {
    fn pause(&mut self, _attempt: u32) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn fixed_count_scales_exactly() {
    let _ = env_logger::builder().is_test(true).try_init();
    let catalog = undivided_root();
    let full = 0x1234u32;
    let sim = SimHardware::for_catalog(&catalog, Signal::Counts { short: 0x100, full });

    let mut session = Session::new(&catalog, sim.clone());
    let reading = session.measure("gcc_sdcc1_apps_clk").unwrap();

    let expected = u64::from(full) * XO_DIV4_HZ / u64::from(FULL_GATE_TICKS);
    assert_eq!(reading.hz, expected);
    assert_eq!(reading.block, "gcc");
    assert_eq!(sim.peek(ROOT_PHYS, 0x1880) & 0x3ff, 0x68);
}

#[test]
fn root_divider_is_undone() {
    let catalog = msm8994::catalog().unwrap();
    let full = 0x1234u32;
    let sim = SimHardware::for_catalog(&catalog, Signal::Counts { short: 0x100, full });

    let mut session = Session::new(&catalog, sim);
    let reading = session.measure("gcc_sdcc1_apps_clk").unwrap();

    assert_eq!(reading.hz, u64::from(full) * XO_DIV4_HZ * 4 / u64::from(FULL_GATE_TICKS));
}

#[test]
fn equal_gate_counts_read_as_off() {
    let catalog = undivided_root();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(0));

    let mut session = Session::new(&catalog, sim);
    let reading = session.measure("gcc_sdcc2_apps_clk").unwrap();
    assert_eq!(reading.hz, 0);
    assert!(reading.is_off());
}

#[test]
fn repeated_measurements_agree() {
    let catalog = msm8994::catalog().unwrap();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(1_000_000));
    let mut session = Session::new(&catalog, sim);

    let first = session.measure("gcc_blsp1_ahb_clk").unwrap().hz;
    let second = session.measure("gcc_blsp1_ahb_clk").unwrap().hz;

    let quantum = session.config().quantum_hz(4);
    assert!(first.abs_diff(second) <= quantum);
    // 1 MHz at the counter is 4 MHz before the divide-by-4.
    assert!(first.abs_diff(4_000_000) <= quantum, "{first}");
}

#[test]
fn stuck_counter_times_out_within_budget() {
    let catalog = undivided_root();
    let sim = SimHardware::for_catalog(&catalog, Signal::Stuck);
    sim.poke(ROOT_PHYS, COUNTER.ref_enable_reg, 0xa0);
    let pauses = Rc::new(Cell::new(0));

    let config = CounterConfig {
        max_polls: 50,
        ..CounterConfig::default()
    };
    let mut session = Session::new(&catalog, sim.clone())
        .with_config(config)
        .with_pacer(CountingPacer(Rc::clone(&pauses)));

    let err = session.measure("gcc_sdcc1_apps_clk").unwrap_err();
    assert!(matches!(
        err,
        DebugccError::MeasurementTimeout { ref block, polls: 50 } if block == "gcc"
    ));
    assert_eq!(pauses.get(), 50);

    let status_reads = sim
        .events()
        .iter()
        .filter(|e| matches!(e, SimEvent::Read { offset, .. } if *offset == COUNTER.status_reg))
        .count();
    // One read sees the counter idle, then the armed wait spends its budget.
    assert_eq!(status_reads, 51);

    assert_eq!(sim.peek(ROOT_PHYS, COUNTER.ref_enable_reg), 0xa0, "reference gate restored");
    assert_eq!(sim.peek(ROOT_PHYS, 0x1880) & (1 << 16), 0, "mux disabled");
    assert_eq!(sim.open_windows(), 0);
}

#[test]
fn counter_protocol_sequence() {
    let catalog = undivided_root();
    let sim = SimHardware::for_catalog(&catalog, Signal::Rate(2_000_000));
    let mut session = Session::new(&catalog, sim.clone());
    session.measure("gcc_sdcc1_apps_clk").unwrap();

    let ctl_writes: Vec<u32> = sim
        .events()
        .into_iter()
        .filter_map(|event| match event {
            SimEvent::Write {
                phys,
                offset,
                value,
            } if phys == ROOT_PHYS && offset == COUNTER.ctl_reg => Some(value),
            _ => None,
        })
        .collect();
    assert_eq!(
        ctl_writes,
        vec![
            0x1000,
            0x1000 | CTL_ARM,
            0x1000,
            0x10000,
            0x10000 | CTL_ARM,
            0x10000,
        ]
    );
}

#[test]
fn gcc_counter_lives_in_gcc_block() {
    let catalog = msm8994::catalog().unwrap();
    let root = catalog.muxes().iter().find(|m| m.is_root()).unwrap();
    assert_eq!(root.layout.phys, GCC_PHYS);
}
