//! 감압 구동 물질수지 계산 검증.
use depletion_drive_toolbox::reservoir::{
    cumulative_withdrawal_at, linspace, simulate_depletion, DepletionError, ReservoirParameters,
    SimulationParameters,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "{label}: expected {expected}, got {actual}"
    );
}

fn reference_reservoir() -> ReservoirParameters {
    ReservoirParameters {
        ooip: 1_000_000.0,
        initial_pressure: 3000.0,
        bubble_point_pressure: 2000.0,
        initial_formation_volume_factor: 1.2,
        oil_compressibility: 1e-5,
        formation_compressibility: 1e-5,
    }
}

fn steps(num_steps: usize, final_pressure: f64) -> SimulationParameters {
    SimulationParameters {
        num_steps,
        final_pressure,
    }
}

#[test]
fn reference_scenario_matches_hand_calculation() {
    let series = simulate_depletion(&reference_reservoir(), &steps(10, 1000.0)).expect("series");
    assert_eq!(series.len(), 10);
    assert_eq!(series.pressures[0], 3000.0);
    assert_eq!(series.pressures[9], 1000.0);
    assert_close("p1", series.pressures[1], 2777.777_777_777_778, 1e-12);
    assert_close("p2", series.pressures[2], 2555.555_555_555_556, 1e-12);
    for w in series.pressures.windows(2) {
        assert_close("step", w[0] - w[1], 2000.0 / 9.0, 1e-9);
    }
    assert_eq!(series.cumulative_withdrawal[0], 0.0);
    assert_close("F_end", series.cumulative_withdrawal[9], 44_000.0, 1e-9);

    // 압력 강하량에 비례: F = N · (B_oi·c_o + c_r) · Δp = 22 STB/psi · Δp
    for (p, f) in series.pressures.iter().zip(series.cumulative_withdrawal.iter()) {
        assert_close("linear", *f, 22.0 * (3000.0 - p), 1e-9);
    }
}

#[test]
fn intermediate_terms_are_reported_per_step() {
    let series = simulate_depletion(&reference_reservoir(), &steps(10, 1000.0)).unwrap();
    assert_close("B_o end", series.oil_fvf[9], 1.224, 1e-12);
    assert_close("E_o end", series.oil_expansion[9], 0.024, 1e-9);
    assert_close("E_f end", series.formation_expansion[9], 0.02, 1e-12);
    assert_eq!(series.oil_fvf[0], 1.2);
}

#[test]
fn withdrawal_vanishes_at_initial_pressure() {
    let mut reservoir = reference_reservoir();
    for (pi, boi) in [(100.0, 0.1), (4500.0, 1.65), (12_000.0, 2.3)] {
        reservoir.initial_pressure = pi;
        reservoir.initial_formation_volume_factor = boi;
        let series = simulate_depletion(&reservoir, &steps(20, 100.0)).unwrap();
        assert_eq!(series.pressures[0], pi);
        assert!(series.cumulative_withdrawal[0].abs() < 1e-9);
        assert!(cumulative_withdrawal_at(&reservoir, pi).abs() < 1e-9);
    }
}

#[test]
fn withdrawal_grows_as_pressure_declines() {
    let series = simulate_depletion(&reference_reservoir(), &steps(100, 100.0)).unwrap();
    for w in series.cumulative_withdrawal.windows(2) {
        assert!(w[1] >= w[0], "{} then {}", w[0], w[1]);
    }
    for w in series.pressures.windows(2) {
        assert!(w[1] < w[0]);
    }
}

#[test]
fn series_lengths_follow_step_count() {
    for n in [1usize, 2, 3, 10, 50, 100, 257] {
        let s = simulate_depletion(&reference_reservoir(), &steps(n, 1000.0)).unwrap();
        assert_eq!(s.pressures.len(), n);
        assert_eq!(s.cumulative_withdrawal.len(), n);
        assert_eq!(s.oil_fvf.len(), n);
        assert_eq!(s.oil_expansion.len(), n);
        assert_eq!(s.formation_expansion.len(), n);
        assert_eq!(s.rows().count(), n);
    }
}

#[test]
fn endpoints_are_included_exactly() {
    for (n, final_p) in [(2usize, 1000.0), (7, 123.4), (33, 2999.9), (100, 100.0)] {
        let s = simulate_depletion(&reference_reservoir(), &steps(n, final_p)).unwrap();
        assert_eq!(s.pressures[0], 3000.0);
        assert_eq!(*s.pressures.last().unwrap(), final_p);
    }
}

#[test]
fn single_step_is_initial_pressure_only() {
    let s = simulate_depletion(&reference_reservoir(), &steps(1, 1000.0)).unwrap();
    assert_eq!(s.pressures, vec![3000.0]);
    assert_eq!(s.cumulative_withdrawal, vec![0.0]);
}

#[test]
fn zero_steps_is_rejected() {
    let err = simulate_depletion(&reference_reservoir(), &steps(0, 1000.0)).unwrap_err();
    assert!(matches!(
        err,
        DepletionError::InvalidParameter {
            name: "num_steps",
            ..
        }
    ));
}

#[test]
fn doubling_ooip_doubles_every_value() {
    let base = reference_reservoir();
    let doubled = ReservoirParameters {
        ooip: base.ooip * 2.0,
        ..base
    };
    let a = simulate_depletion(&base, &steps(37, 812.5)).unwrap();
    let b = simulate_depletion(&doubled, &steps(37, 812.5)).unwrap();
    for (x, y) in a.cumulative_withdrawal.iter().zip(b.cumulative_withdrawal.iter()) {
        assert_eq!(*y, 2.0 * x);
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let a = simulate_depletion(&reference_reservoir(), &steps(50, 1000.0)).unwrap();
    let b = simulate_depletion(&reference_reservoir(), &steps(50, 1000.0)).unwrap();
    assert_eq!(a, b);
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a.cumulative_withdrawal), bits(&b.cumulative_withdrawal));
}

#[test]
fn pressure_build_up_gives_negative_withdrawal() {
    let s = simulate_depletion(&reference_reservoir(), &steps(5, 4000.0)).unwrap();
    assert_eq!(*s.pressures.last().unwrap(), 4000.0);
    assert!(s.cumulative_withdrawal[1..].iter().all(|f| *f < 0.0));
    assert_close("F_end", *s.cumulative_withdrawal.last().unwrap(), -22_000.0, 1e-9);
}

#[test]
fn bubble_point_does_not_affect_result() {
    let base = reference_reservoir();
    let other = ReservoirParameters {
        bubble_point_pressure: 2900.0,
        ..base
    };
    assert_eq!(
        simulate_depletion(&base, &steps(30, 500.0)).unwrap(),
        simulate_depletion(&other, &steps(30, 500.0)).unwrap()
    );
}

#[test]
fn linspace_matches_inclusive_spacing() {
    assert!(linspace(1.0, 2.0, 0).is_empty());
    assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}
