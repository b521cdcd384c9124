use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnitParseError;

/// 표시용 압력 단위. 계산은 항상 psi로 수행한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Psi,
    Bar,
    KiloPascal,
    MegaPascal,
    KgPerCm2,
}

const BAR_PER_PSI: f64 = 0.0689476;

/// psi 값을 원하는 단위로 변환한다.
pub fn from_psi(value_psi: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Psi => value_psi,
        PressureUnit::Bar => value_psi * BAR_PER_PSI,
        PressureUnit::KiloPascal => value_psi * BAR_PER_PSI * 100.0,
        PressureUnit::MegaPascal => value_psi * BAR_PER_PSI / 10.0,
        PressureUnit::KgPerCm2 => value_psi * BAR_PER_PSI / 0.980665,
    }
}

/// 주어진 단위의 압력을 psi로 변환한다.
pub fn to_psi(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Psi => value,
        PressureUnit::Bar => value / BAR_PER_PSI,
        PressureUnit::KiloPascal => value / 100.0 / BAR_PER_PSI,
        PressureUnit::MegaPascal => value * 10.0 / BAR_PER_PSI,
        PressureUnit::KgPerCm2 => value * 0.980665 / BAR_PER_PSI,
    }
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 5] = [
        PressureUnit::Psi,
        PressureUnit::Bar,
        PressureUnit::KiloPascal,
        PressureUnit::MegaPascal,
        PressureUnit::KgPerCm2,
    ];

    /// 표/축 라벨에 쓰는 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Psi => "psi",
            PressureUnit::Bar => "bar",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::KgPerCm2 => "kgf/cm²",
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PressureUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "psi" | "psia" => Ok(PressureUnit::Psi),
            "bar" => Ok(PressureUnit::Bar),
            "kpa" => Ok(PressureUnit::KiloPascal),
            "mpa" => Ok(PressureUnit::MegaPascal),
            "kgf/cm2" | "kgf/cm²" | "kg/cm2" => Ok(PressureUnit::KgPerCm2),
            _ => Err(UnitParseError::UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_to_bar_uses_reference_factor() {
        assert!((from_psi(1000.0, PressureUnit::Bar) - 68.9476).abs() < 1e-9);
    }

    #[test]
    fn convert_back_to_psi() {
        for unit in PressureUnit::ALL {
            let v = from_psi(3000.0, unit);
            assert!((to_psi(v, unit) - 3000.0).abs() < 1e-9, "{unit}");
        }
    }

    #[test]
    fn parses_symbols_case_insensitively() {
        assert_eq!("PSI".parse::<PressureUnit>().unwrap(), PressureUnit::Psi);
        assert_eq!("kPa".parse::<PressureUnit>().unwrap(), PressureUnit::KiloPascal);
        assert!("torr".parse::<PressureUnit>().is_err());
    }
}
