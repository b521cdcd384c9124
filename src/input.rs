//! 입력 폼 경계. 위젯의 기본값과 최소값을 정의하고 계산기에 넘길 파라미터로 정리한다.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::reservoir::{ReservoirParameters, SimulationParameters};

/// 입력 필드별 하한과 단계 수 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub ooip_min: f64,
    pub initial_pressure_min: f64,
    pub bubble_point_min: f64,
    pub initial_fvf_min: f64,
    pub oil_compressibility_min: f64,
    pub formation_compressibility_min: f64,
    pub steps_min: usize,
    pub steps_max: usize,
    pub final_pressure_min: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            ooip_min: 1_000.0,
            initial_pressure_min: 100.0,
            bubble_point_min: 100.0,
            initial_fvf_min: 0.1,
            oil_compressibility_min: 1e-6,
            formation_compressibility_min: 1e-6,
            steps_min: 10,
            steps_max: 100,
            final_pressure_min: 100.0,
        }
    }
}

/// 위젯 증감 단위. GUI 드래그 속도로도 쓴다.
pub mod step {
    pub const OOIP: f64 = 1_000.0;
    pub const PRESSURE: f64 = 10.0;
    pub const FVF: f64 = 0.01;
    pub const COMPRESSIBILITY: f64 = 1e-6;
}

/// 사용자가 편집하는 입력값 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputForm {
    /// OOIP [STB]
    pub ooip: f64,
    /// 초기 압력 [psi]
    pub initial_pressure: f64,
    /// 기포점 압력 [psi]
    pub bubble_point_pressure: f64,
    /// 초기 오일 용적계수 [rb/STB]
    pub initial_fvf: f64,
    /// 오일 압축률 [1/psi]
    pub oil_compressibility: f64,
    /// 암석 압축률 [1/psi]
    pub formation_compressibility: f64,
    /// 압력 단계 수
    pub num_steps: usize,
    /// 최종 압력 [psi]
    pub final_pressure: f64,
}

impl Default for InputForm {
    fn default() -> Self {
        Self {
            ooip: 1_000_000.0,
            initial_pressure: 3_000.0,
            bubble_point_pressure: 2_000.0,
            initial_fvf: 1.2,
            oil_compressibility: 1e-5,
            formation_compressibility: 1e-5,
            num_steps: 50,
            final_pressure: 1_000.0,
        }
    }
}

/// 하한 보정 결과와 경고 목록.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampedInput {
    pub form: InputForm,
    pub warnings: Vec<String>,
}

fn clamp_min(name: &str, value: f64, min: f64, fallback: f64, warnings: &mut Vec<String>) -> f64 {
    if !value.is_finite() {
        warnings.push(format!("{name}: 유효하지 않은 값 {value} → 기본값 {fallback}"));
        return fallback;
    }
    if value < min {
        warnings.push(format!("{name}: {value} → 최소값 {min}"));
        return min;
    }
    value
}

impl InputForm {
    /// 기본 범위로 보정한다.
    pub fn clamped(&self) -> ClampedInput {
        self.clamped_with(&InputBounds::default())
    }

    /// 위젯과 같은 방식으로 하한 미만은 하한으로, 단계 수는 범위 안으로 맞춘다.
    /// 비유한(NaN/inf) 값은 기본값으로 되돌린다.
    pub fn clamped_with(&self, bounds: &InputBounds) -> ClampedInput {
        let d = InputForm::default();
        let mut warnings = Vec::new();
        let w = &mut warnings;
        let num_steps = self.num_steps.clamp(bounds.steps_min, bounds.steps_max);
        if num_steps != self.num_steps {
            w.push(format!(
                "num_steps: {} → {} ({}~{})",
                self.num_steps, num_steps, bounds.steps_min, bounds.steps_max
            ));
        }
        let form = InputForm {
            ooip: clamp_min("ooip", self.ooip, bounds.ooip_min, d.ooip, w),
            initial_pressure: clamp_min(
                "initial_pressure",
                self.initial_pressure,
                bounds.initial_pressure_min,
                d.initial_pressure,
                w,
            ),
            bubble_point_pressure: clamp_min(
                "bubble_point_pressure",
                self.bubble_point_pressure,
                bounds.bubble_point_min,
                d.bubble_point_pressure,
                w,
            ),
            initial_fvf: clamp_min(
                "initial_fvf",
                self.initial_fvf,
                bounds.initial_fvf_min,
                d.initial_fvf,
                w,
            ),
            oil_compressibility: clamp_min(
                "oil_compressibility",
                self.oil_compressibility,
                bounds.oil_compressibility_min,
                d.oil_compressibility,
                w,
            ),
            formation_compressibility: clamp_min(
                "formation_compressibility",
                self.formation_compressibility,
                bounds.formation_compressibility_min,
                d.formation_compressibility,
                w,
            ),
            num_steps,
            final_pressure: clamp_min(
                "final_pressure",
                self.final_pressure,
                bounds.final_pressure_min,
                d.final_pressure,
                w,
            ),
        };
        for msg in &warnings {
            warn!("입력 보정: {msg}");
        }
        ClampedInput { form, warnings }
    }

    /// 보정 없이 계산기 입력으로 옮긴다.
    pub fn as_parameters(&self) -> (ReservoirParameters, SimulationParameters) {
        (
            ReservoirParameters {
                ooip: self.ooip,
                initial_pressure: self.initial_pressure,
                bubble_point_pressure: self.bubble_point_pressure,
                initial_formation_volume_factor: self.initial_fvf,
                oil_compressibility: self.oil_compressibility,
                formation_compressibility: self.formation_compressibility,
            },
            SimulationParameters {
                num_steps: self.num_steps,
                final_pressure: self.final_pressure,
            },
        )
    }

    /// 기본 범위로 보정한 뒤 계산기 입력으로 변환한다.
    pub fn to_parameters(&self) -> (ReservoirParameters, SimulationParameters, Vec<String>) {
        let ClampedInput { form, warnings } = self.clamped();
        let (reservoir, simulation) = form.as_parameters();
        (reservoir, simulation, warnings)
    }
}
