//! 저류층 물질수지 계산 모듈 모음.

pub mod depletion;
pub mod params;

pub use depletion::*;
pub use params::*;
