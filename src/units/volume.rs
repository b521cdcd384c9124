use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnitParseError;

/// 표시용 체적 단위. 내부 기준은 stock-tank barrel(STB)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    Stb,
    ThousandStb,
    MillionStb,
    CubicMeter,
}

const CUBIC_METER_PER_BBL: f64 = 0.158_987_294_928;

/// STB 값을 원하는 단위로 변환한다.
pub fn from_stb(value_stb: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Stb => value_stb,
        VolumeUnit::ThousandStb => value_stb / 1_000.0,
        VolumeUnit::MillionStb => value_stb / 1_000_000.0,
        VolumeUnit::CubicMeter => value_stb * CUBIC_METER_PER_BBL,
    }
}

/// 주어진 단위의 체적을 STB로 변환한다.
pub fn to_stb(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Stb => value,
        VolumeUnit::ThousandStb => value * 1_000.0,
        VolumeUnit::MillionStb => value * 1_000_000.0,
        VolumeUnit::CubicMeter => value / CUBIC_METER_PER_BBL,
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    from_stb(to_stb(value, from), to)
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 4] = [
        VolumeUnit::Stb,
        VolumeUnit::ThousandStb,
        VolumeUnit::MillionStb,
        VolumeUnit::CubicMeter,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Stb => "STB",
            VolumeUnit::ThousandStb => "MSTB",
            VolumeUnit::MillionStb => "MMSTB",
            VolumeUnit::CubicMeter => "m³",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for VolumeUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stb" | "bbl" => Ok(VolumeUnit::Stb),
            "mstb" => Ok(VolumeUnit::ThousandStb),
            "mmstb" => Ok(VolumeUnit::MillionStb),
            "m3" | "m³" => Ok(VolumeUnit::CubicMeter),
            _ => Err(UnitParseError::UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_barrel_in_cubic_meters() {
        assert!((from_stb(1.0, VolumeUnit::CubicMeter) - 0.158987294928).abs() < 1e-12);
    }

    #[test]
    fn thousand_and_million_prefixes() {
        assert_eq!(from_stb(44_000.0, VolumeUnit::ThousandStb), 44.0);
        assert_eq!(convert_volume(2.0, VolumeUnit::MillionStb, VolumeUnit::ThousandStb), 2_000.0);
    }
}
