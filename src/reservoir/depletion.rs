//! 용해가스 구동(depletion drive) 물질수지 계산.
//!
//! F = N · (E_o + E_f)
//! - B_o(p) = B_oi · (1 + c_o · (p_i − p))
//! - E_o(p) = B_o(p) − B_oi
//! - E_f(p) = c_r · (p_i − p)
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::params::{ReservoirParameters, SimulationParameters};

/// 물질수지 계산 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepletionError {
    /// 계산이 정의되지 않는 입력값
    #[error("잘못된 입력값 {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

/// 압력 단계별 계산 결과. 모든 시퀀스는 같은 인덱스끼리 짝을 이룬다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSeries {
    /// 압력 [psi]
    pub pressures: Vec<f64>,
    /// 누적 유체 인출량 F [STB]
    pub cumulative_withdrawal: Vec<f64>,
    /// 오일 용적계수 B_o [rb/STB]
    pub oil_fvf: Vec<f64>,
    /// 오일 팽창항 E_o [rb/STB]
    pub oil_expansion: Vec<f64>,
    /// 암석 팽창항 E_f
    pub formation_expansion: Vec<f64>,
}

/// 결과 테이블의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRow {
    pub pressure: f64,
    pub cumulative_withdrawal: f64,
    pub oil_fvf: f64,
    pub oil_expansion: f64,
    pub formation_expansion: f64,
}

impl ResultSeries {
    pub fn len(&self) -> usize {
        self.pressures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressures.is_empty()
    }

    /// 압력-인출량 쌍을 행 단위로 반환한다.
    pub fn rows(&self) -> impl Iterator<Item = ResultRow> + '_ {
        (0..self.len()).map(move |i| ResultRow {
            pressure: self.pressures[i],
            cumulative_withdrawal: self.cumulative_withdrawal[i],
            oil_fvf: self.oil_fvf[i],
            oil_expansion: self.oil_expansion[i],
            formation_expansion: self.formation_expansion[i],
        })
    }

    /// 최종 압력에서의 누적 인출량.
    pub fn final_withdrawal(&self) -> Option<f64> {
        self.cumulative_withdrawal.last().copied()
    }
}

/// `start`에서 `stop`까지 양 끝점을 포함해 `n`개로 등분한다.
/// 마지막 값은 누적 오차 없이 `stop`으로 고정한다.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// 초기 압력 대비 압력 강하량 (p_i − p) [psi].
pub fn pressure_drop(reservoir: &ReservoirParameters, pressure: f64) -> f64 {
    reservoir.initial_pressure - pressure
}

/// 압력 p에서의 오일 용적계수 B_o.
pub fn oil_formation_volume_factor(reservoir: &ReservoirParameters, pressure: f64) -> f64 {
    reservoir.initial_formation_volume_factor
        * (1.0 + reservoir.oil_compressibility * pressure_drop(reservoir, pressure))
}

/// 오일 팽창항 E_o = B_o − B_oi.
pub fn oil_expansion(reservoir: &ReservoirParameters, pressure: f64) -> f64 {
    oil_formation_volume_factor(reservoir, pressure) - reservoir.initial_formation_volume_factor
}

/// 암석 팽창항 E_f = c_r · (p_i − p).
pub fn formation_expansion(reservoir: &ReservoirParameters, pressure: f64) -> f64 {
    reservoir.formation_compressibility * pressure_drop(reservoir, pressure)
}

/// 압력 p에서의 누적 인출량 F = N · (E_o + E_f).
pub fn cumulative_withdrawal_at(reservoir: &ReservoirParameters, pressure: f64) -> f64 {
    let e_o = oil_expansion(reservoir, pressure);
    let e_f = formation_expansion(reservoir, pressure);
    reservoir.ooip * (e_o + e_f)
}

/// 초기 압력에서 최종 압력까지 선형 감압하며 누적 인출량을 계산한다.
///
/// 입력의 물리적 타당성은 검사하지 않는다. 범위를 벗어난 값도 수식대로 계산되며
/// 최종 압력이 초기 압력보다 높으면 인출량은 음수가 된다.
/// `num_steps`가 0이면 빈 결과 대신 오류를 돌려준다.
pub fn simulate_depletion(
    reservoir: &ReservoirParameters,
    simulation: &SimulationParameters,
) -> Result<ResultSeries, DepletionError> {
    if simulation.num_steps == 0 {
        return Err(DepletionError::InvalidParameter {
            name: "num_steps",
            reason: "압력 단계 수는 1 이상이어야 합니다.",
        });
    }

    let pressures = linspace(
        reservoir.initial_pressure,
        simulation.final_pressure,
        simulation.num_steps,
    );

    let oil_fvf: Vec<f64> = pressures
        .iter()
        .map(|&p| oil_formation_volume_factor(reservoir, p))
        .collect();
    let oil_expansion: Vec<f64> = oil_fvf
        .iter()
        .map(|b_o| b_o - reservoir.initial_formation_volume_factor)
        .collect();
    let formation_expansion: Vec<f64> = pressures
        .iter()
        .map(|&p| formation_expansion(reservoir, p))
        .collect();
    let cumulative_withdrawal: Vec<f64> = oil_expansion
        .iter()
        .zip(formation_expansion.iter())
        .map(|(e_o, e_f)| reservoir.ooip * (e_o + e_f))
        .collect();

    debug!(
        steps = pressures.len(),
        initial_pressure = reservoir.initial_pressure,
        final_pressure = simulation.final_pressure,
        final_withdrawal = cumulative_withdrawal.last().copied().unwrap_or_default(),
        "depletion series computed"
    );

    Ok(ResultSeries {
        pressures,
        cumulative_withdrawal,
        oil_fvf,
        oil_expansion,
        formation_expansion,
    })
}
