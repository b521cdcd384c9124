//! 표시 단위 정의 및 변환 모듈 모음.

pub mod pressure;
pub mod volume;

use thiserror::Error;

pub use pressure::PressureUnit;
pub use volume::{convert_volume, VolumeUnit};

/// 단위 문자열 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitParseError {
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}
