//! 결과 표/차트 라벨과 CSV·JSON 내보내기.
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::reservoir::ResultSeries;
use crate::units::{pressure, volume, PressureUnit, VolumeUnit};

pub const PAGE_TITLE: &str = "Material Balance Simulator: Depletion Drive";
pub const RESULTS_HEADING: &str = "Simulation Results";
pub const RESULTS_CAPTION: &str = "Cumulative Withdrawals (F) vs. Pressure:";
pub const VISUALIZATION_HEADING: &str = "Visualization";
pub const CHART_TITLE: &str = "Depletion Drive: Pressure vs. Cumulative Withdrawals";
pub const LEGEND_LABEL: &str = "Cumulative Withdrawals (F)";

/// 내보내기 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 표시 단위 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnits {
    pub pressure: PressureUnit,
    pub volume: VolumeUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            pressure: PressureUnit::Psi,
            volume: VolumeUnit::Stb,
        }
    }
}

impl DisplayUnits {
    /// 표 압력 열 제목. 예: "Pressure (psi)"
    pub fn pressure_column(&self) -> String {
        format!("Pressure ({})", self.pressure.symbol())
    }

    /// 표 인출량 열 제목. 예: "Cumulative Withdrawals (F) [STB]"
    pub fn withdrawal_column(&self) -> String {
        format!("Cumulative Withdrawals (F) [{}]", self.volume.symbol())
    }

    /// 차트 x축 라벨.
    pub fn pressure_axis(&self) -> String {
        format!("Pressure (P) [{}]", self.pressure.symbol())
    }

    /// 차트 y축 라벨.
    pub fn withdrawal_axis(&self) -> String {
        self.withdrawal_column()
    }
}

pub const BREAKDOWN_COLUMNS: [&str; 3] = ["B_o [rb/STB]", "E_o [rb/STB]", "E_f"];

/// 표시 단위로 변환된 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayRow {
    pub pressure: f64,
    pub cumulative_withdrawal: f64,
    pub oil_fvf: f64,
    pub oil_expansion: f64,
    pub formation_expansion: f64,
}

/// 결과 시리즈를 표시 단위 기준 행 목록으로 바꾼다.
pub fn display_rows(series: &ResultSeries, units: DisplayUnits) -> Vec<DisplayRow> {
    series
        .rows()
        .map(|r| DisplayRow {
            pressure: pressure::from_psi(r.pressure, units.pressure),
            cumulative_withdrawal: volume::from_stb(r.cumulative_withdrawal, units.volume),
            oil_fvf: r.oil_fvf,
            oil_expansion: r.oil_expansion,
            formation_expansion: r.formation_expansion,
        })
        .collect()
}

/// 차트용 점 목록(표시 단위).
pub fn chart_points(series: &ResultSeries, units: DisplayUnits) -> Vec<[f64; 2]> {
    display_rows(series, units)
        .iter()
        .map(|r| [r.pressure, r.cumulative_withdrawal])
        .collect()
}

/// 고정폭 텍스트 표를 만든다.
pub fn render_table(series: &ResultSeries, units: DisplayUnits, breakdown: bool) -> String {
    let p_head = units.pressure_column();
    let f_head = units.withdrawal_column();
    let p_w = p_head.chars().count().max(14);
    let f_w = f_head.chars().count().max(14);
    let mut out = String::new();
    let _ = write!(out, "{:>5}  {:>p_w$}  {:>f_w$}", "#", p_head, f_head);
    if breakdown {
        for col in BREAKDOWN_COLUMNS {
            let _ = write!(out, "  {col:>14}");
        }
    }
    out.push('\n');
    for (i, r) in display_rows(series, units).iter().enumerate() {
        let _ = write!(
            out,
            "{:>5}  {:>p_w$.4}  {:>f_w$.4}",
            i, r.pressure, r.cumulative_withdrawal
        );
        if breakdown {
            let _ = write!(
                out,
                "  {:>14.6}  {:>14.6e}  {:>14.6e}",
                r.oil_fvf, r.oil_expansion, r.formation_expansion
            );
        }
        out.push('\n');
    }
    out
}

/// CSV 문자열. 값은 반올림하지 않는다.
pub fn to_csv(series: &ResultSeries, units: DisplayUnits, breakdown: bool) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{},{}",
        csv_field(&units.pressure_column()),
        csv_field(&units.withdrawal_column())
    );
    if breakdown {
        for col in BREAKDOWN_COLUMNS {
            let _ = write!(out, ",{}", csv_field(col));
        }
    }
    out.push('\n');
    for r in display_rows(series, units) {
        let _ = write!(out, "{},{}", r.pressure, r.cumulative_withdrawal);
        if breakdown {
            let _ = write!(out, ",{},{},{}", r.oil_fvf, r.oil_expansion, r.formation_expansion);
        }
        out.push('\n');
    }
    out
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    pressure_unit: &'a str,
    volume_unit: &'a str,
    rows: Vec<DisplayRow>,
}

/// JSON 문자열(pretty).
pub fn to_json(series: &ResultSeries, units: DisplayUnits) -> Result<String, ReportError> {
    let report = JsonReport {
        pressure_unit: units.pressure.symbol(),
        volume_unit: units.volume.symbol(),
        rows: display_rows(series, units),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// 내보내기 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// 파일 확장자로 형식을 추정한다. 알 수 없으면 CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// 결과를 파일로 저장한다.
pub fn export_to_file(
    path: &Path,
    series: &ResultSeries,
    units: DisplayUnits,
    format: ExportFormat,
    breakdown: bool,
) -> Result<(), ReportError> {
    let content = match format {
        ExportFormat::Csv => to_csv(series, units, breakdown),
        ExportFormat::Json => to_json(series, units)?,
    };
    fs::write(path, content)?;
    info!(path = %path.display(), rows = series.len(), "결과 내보내기 완료");
    Ok(())
}
