//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산기를 쓰도록 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod input;
pub mod report;
pub mod reservoir;
pub mod ui_cli;
pub mod units;
