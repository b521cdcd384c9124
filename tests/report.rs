//! 결과 표/내보내기 형식 검증.
use depletion_drive_toolbox::input::InputForm;
use depletion_drive_toolbox::report::{self, DisplayUnits, ExportFormat};
use depletion_drive_toolbox::reservoir::{simulate_depletion, ResultSeries};
use depletion_drive_toolbox::units::{PressureUnit, VolumeUnit};
use std::path::Path;

fn scenario(num_steps: usize) -> ResultSeries {
    let form = InputForm {
        num_steps,
        ..InputForm::default()
    };
    let (r, s) = form.as_parameters();
    simulate_depletion(&r, &s).unwrap()
}

#[test]
fn default_column_and_axis_labels() {
    let u = DisplayUnits::default();
    assert_eq!(u.pressure_column(), "Pressure (psi)");
    assert_eq!(u.withdrawal_column(), "Cumulative Withdrawals (F) [STB]");
    assert_eq!(u.pressure_axis(), "Pressure (P) [psi]");
    assert_eq!(u.withdrawal_axis(), "Cumulative Withdrawals (F) [STB]");
    assert_eq!(report::LEGEND_LABEL, "Cumulative Withdrawals (F)");
}

#[test]
fn csv_has_header_and_one_line_per_step() {
    let series = scenario(10);
    let csv = report::to_csv(&series, DisplayUnits::default(), false);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "Pressure (psi),Cumulative Withdrawals (F) [STB]");
    assert_eq!(lines[1], "3000,0");
    assert!(lines[10].starts_with("1000,"));
}

#[test]
fn csv_breakdown_adds_three_columns() {
    let series = scenario(10);
    let csv = report::to_csv(&series, DisplayUnits::default(), true);
    for line in csv.lines() {
        assert_eq!(line.split(',').count(), 5, "{line}");
    }
}

#[test]
fn display_units_convert_values_only() {
    let series = scenario(10);
    let units = DisplayUnits {
        pressure: PressureUnit::Bar,
        volume: VolumeUnit::ThousandStb,
    };
    let rows = report::display_rows(&series, units);
    assert!((rows[0].pressure - 3000.0 * 0.0689476).abs() < 1e-9);
    assert!((rows[9].cumulative_withdrawal - 44.0).abs() < 1e-9);
    assert_eq!(units.pressure_column(), "Pressure (bar)");
    assert_eq!(units.withdrawal_column(), "Cumulative Withdrawals (F) [MSTB]");
    assert_eq!(report::chart_points(&series, units).len(), 10);
}

#[test]
fn json_lists_rows_with_units() {
    let series = scenario(12);
    let json = report::to_json(&series, DisplayUnits::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pressure_unit"], "psi");
    assert_eq!(value["volume_unit"], "STB");
    assert_eq!(value["rows"].as_array().unwrap().len(), 12);
    assert_eq!(value["rows"][0]["cumulative_withdrawal"], 0.0);
}

#[test]
fn text_table_has_header_and_rows() {
    let series = scenario(10);
    let table = report::render_table(&series, DisplayUnits::default(), true);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].contains("Pressure (psi)"));
    assert!(lines[0].contains("Cumulative Withdrawals (F) [STB]"));
    assert!(lines[0].contains("B_o [rb/STB]"));
}

#[test]
fn export_writes_file_by_extension() {
    let series = scenario(10);
    let dir = std::env::temp_dir();
    let csv_path = dir.join(format!("ddt_report_{}.csv", std::process::id()));
    let json_path = dir.join(format!("ddt_report_{}.json", std::process::id()));
    assert_eq!(ExportFormat::from_path(&csv_path), ExportFormat::Csv);
    assert_eq!(ExportFormat::from_path(&json_path), ExportFormat::Json);
    assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);

    let units = DisplayUnits::default();
    report::export_to_file(&csv_path, &series, units, ExportFormat::Csv, false).unwrap();
    report::export_to_file(&json_path, &series, units, ExportFormat::Json, false).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(csv.starts_with("Pressure (psi),"));
    assert!(json.trim_start().starts_with('{'));
    let _ = std::fs::remove_file(csv_path);
    let _ = std::fs::remove_file(json_path);
}
