use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::input::InputForm;
use crate::report::{self, ExportFormat, ReportError};
use crate::reservoir::{simulate_depletion, DepletionError};
use crate::ui_cli;
use crate::units::{volume, PressureUnit, VolumeUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 물질수지 계산 오류
    #[error("계산 오류: {0}")]
    Depletion(#[from] DepletionError),
    /// 결과 출력 오류
    #[error("출력 오류: {0}")]
    Report(#[from] ReportError),
}

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// 감압 구동 물질수지 계산기 (CLI)
#[derive(Debug, Parser)]
#[command(name = "depletion_drive_toolbox_cli", version, about)]
pub struct CliArgs {
    /// 원시 부존량 OOIP [STB]
    #[arg(long)]
    pub ooip: Option<f64>,
    /// 초기 압력 [psi]
    #[arg(long)]
    pub initial_pressure: Option<f64>,
    /// 기포점 압력 [psi]
    #[arg(long)]
    pub bubble_point: Option<f64>,
    /// 초기 오일 용적계수 B_oi [rb/STB]
    #[arg(long = "boi")]
    pub initial_fvf: Option<f64>,
    /// 오일 압축률 c_o [1/psi]
    #[arg(long = "co")]
    pub oil_compressibility: Option<f64>,
    /// 암석 압축률 c_r [1/psi]
    #[arg(long = "cr")]
    pub formation_compressibility: Option<f64>,
    /// 압력 단계 수 (10~100)
    #[arg(long)]
    pub steps: Option<usize>,
    /// 최종 압력 [psi]
    #[arg(long)]
    pub final_pressure: Option<f64>,
    /// 값을 하나씩 입력받는다
    #[arg(short, long)]
    pub interactive: bool,
    /// 출력 형식
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// 결과 파일 경로 (생략 시 표준 출력). 내용은 --format 을 따르며 확장자는 보지 않는다
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// 표시 압력 단위 (psi, bar, kPa, MPa, kgf/cm2)
    #[arg(long)]
    pub pressure_unit: Option<PressureUnit>,
    /// 표시 체적 단위 (STB, MSTB, MMSTB, m3)
    #[arg(long)]
    pub volume_unit: Option<VolumeUnit>,
    /// B_o/E_o/E_f 열을 함께 출력한다
    #[arg(long)]
    pub breakdown: bool,
    /// 언어 (auto/ko/en-us)
    #[arg(short = 'L', long, default_value = "auto")]
    pub lang: String,
    /// 사용한 입력값과 단위를 config.toml에 저장한다
    #[arg(long)]
    pub save: bool,
}

impl CliArgs {
    /// 설정값 위에 명령행 값을 덮어쓴다.
    pub fn apply_to(&self, form: &mut InputForm) {
        let overrides = [
            (self.ooip, &mut form.ooip),
            (self.initial_pressure, &mut form.initial_pressure),
            (self.bubble_point, &mut form.bubble_point_pressure),
            (self.initial_fvf, &mut form.initial_fvf),
            (self.oil_compressibility, &mut form.oil_compressibility),
            (self.formation_compressibility, &mut form.formation_compressibility),
            (self.final_pressure, &mut form.final_pressure),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(n) = self.steps {
            form.num_steps = n;
        }
    }
}

/// CLI 한 번 실행: 입력 정리 → 계산 → 출력.
pub fn run(args: &CliArgs, config: &mut Config) -> Result<(), AppError> {
    let lang = i18n::resolve_language(&args.lang, Some(config.language.as_str()));
    let tr = Translator::new(&lang);

    let mut form = config.inputs;
    args.apply_to(&mut form);
    if args.interactive {
        form = ui_cli::prompt_form(&tr, form)?;
    }

    let clamped = form.clamped();
    if !clamped.warnings.is_empty() {
        eprintln!("{}", tr.t(i18n::keys::WARNING_ADJUSTED));
        for w in &clamped.warnings {
            eprintln!("  - {w}");
        }
    }
    let (reservoir, simulation) = clamped.form.as_parameters();
    let series = simulate_depletion(&reservoir, &simulation)?;

    let mut units = config.display_units();
    if let Some(p) = args.pressure_unit {
        units.pressure = p;
    }
    if let Some(v) = args.volume_unit {
        units.volume = v;
    }
    let breakdown = args.breakdown || config.show_breakdown;

    let rendered = match args.format {
        OutputFormat::Table => report::render_table(&series, units, breakdown),
        OutputFormat::Csv => report::to_csv(&series, units, breakdown),
        OutputFormat::Json => report::to_json(&series, units)?,
    };

    match &args.output {
        Some(path) => {
            match args.format {
                OutputFormat::Table => fs::write(path, &rendered)?,
                OutputFormat::Csv => {
                    report::export_to_file(path, &series, units, ExportFormat::Csv, breakdown)?
                }
                OutputFormat::Json => {
                    report::export_to_file(path, &series, units, ExportFormat::Json, breakdown)?
                }
            }
            println!("{} {}", tr.t(i18n::keys::GUI_EXPORTED), path.display());
        }
        None => {
            if args.format == OutputFormat::Table {
                println!("{}", report::PAGE_TITLE);
                println!("\n{}", report::RESULTS_HEADING);
                println!("{}", report::RESULTS_CAPTION);
            }
            print!("{rendered}");
        }
    }

    if args.format == OutputFormat::Table {
        if let Some(f) = series.final_withdrawal() {
            println!(
                "\n{} {:.2} {}",
                tr.t(i18n::keys::RESULT_FINAL_WITHDRAWAL),
                volume::from_stb(f, units.volume),
                units.volume.symbol()
            );
        }
        println!("{}", tr.t(i18n::keys::NOTE_BUBBLE_POINT));
    }

    if args.save {
        config.inputs = clamped.form;
        config.pressure_unit = units.pressure;
        config.volume_unit = units.volume;
        config.save()?;
        info!("입력값을 설정에 저장");
    }
    Ok(())
}
