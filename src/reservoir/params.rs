use serde::{Deserialize, Serialize};

/// 저류층 물성 입력. 압력은 psi, 체적은 STB 기준이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirParameters {
    /// 원시 부존량 OOIP [STB]
    pub ooip: f64,
    /// 초기 저류층 압력 [psi]
    pub initial_pressure: f64,
    /// 기포점 압력 [psi]. 미포화 가정이므로 계산식에는 쓰이지 않는다.
    pub bubble_point_pressure: f64,
    /// 초기 오일 용적계수 B_oi [rb/STB]
    pub initial_formation_volume_factor: f64,
    /// 오일 압축률 c_o [1/psi]
    pub oil_compressibility: f64,
    /// 암석(공극+연결수) 압축률 c_r [1/psi]
    pub formation_compressibility: f64,
}

/// 압력 강하 시뮬레이션 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// 압력 샘플 개수 (양 끝점 포함)
    pub num_steps: usize,
    /// 최종 압력 [psi]. 초기 압력보다 높으면 압력 회복으로 해석된다.
    pub final_pressure: f64,
}
