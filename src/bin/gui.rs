#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use depletion_drive_toolbox::{
    config,
    i18n::{self, keys, Translator},
    input::{self, InputBounds, InputForm},
    report::{self, DisplayUnits, ExportFormat},
    reservoir::{simulate_depletion, DepletionError, ResultSeries},
    units::{PressureUnit, VolumeUnit},
};
use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path};
use tracing::{error, warn};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("설정 로드 실패, 기본값 사용: {e}");
            config::Config::default()
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(report::PAGE_TITLE)
        .with_inner_size([1180.0, 780.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        report::PAGE_TITLE,
        options,
        Box::new(move |cc| {
            setup_fonts(&cc.egui_ctx);
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 라벨을 위해 프로젝트/시스템 폰트를 찾아 등록한다. 없으면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) {
    let mut candidates = vec![
        "assets/fonts/malgun.ttf".to_string(),
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".to_string(),
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf".to_string(),
        "/System/Library/Fonts/AppleSDGothicNeo.ttc".to_string(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand).to_string_lossy().into_owned());
        }
    }
    for cand in candidates {
        if let Ok(bytes) = fs::read(&cand) {
            apply_font_bytes(ctx, bytes, "korean_font");
            return;
        }
    }
    warn!("한글 폰트를 찾지 못해 기본 폰트를 사용합니다.");
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 압축률처럼 작은 값은 지수 표기로 편집한다.
fn scientific_drag(value: &mut f64, min: f64) -> egui::DragValue<'_> {
    egui::DragValue::new(value)
        .speed(input::step::COMPRESSIBILITY)
        .clamp_range(min..=f64::MAX)
        .custom_formatter(|n, _| format!("{n:.3e}"))
        .custom_parser(|s| s.trim().parse::<f64>().ok())
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    bounds: InputBounds,
    form: InputForm,
    computed_for: Option<InputForm>,
    series: Result<ResultSeries, DepletionError>,
    show_settings: bool,
    show_formula: bool,
    lang_input: String,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang = i18n::resolve_language(&config.language, None);
        let form = config.inputs.clamped().form;
        Self {
            tr: Translator::new(&lang),
            bounds: InputBounds::default(),
            lang_input: config.language.clone(),
            form,
            computed_for: None,
            series: Ok(ResultSeries::default()),
            config,
            show_settings: false,
            show_formula: false,
            status: None,
        }
    }

    fn units(&self) -> DisplayUnits {
        self.config.display_units()
    }

    /// 입력이 바뀐 경우에만 처음부터 다시 계산한다.
    fn recompute_if_changed(&mut self) {
        if self.computed_for == Some(self.form) {
            return;
        }
        let (reservoir, simulation) = self.form.as_parameters();
        self.series = simulate_depletion(&reservoir, &simulation);
        self.computed_for = Some(self.form);
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr;
        let b = self.bounds;
        ui.heading(tr.t(keys::SECTION_RESERVOIR));
        egui::Grid::new("reservoir_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                label_with_tip(ui, tr.t(keys::FIELD_OOIP), "N");
                ui.add(
                    egui::DragValue::new(&mut self.form.ooip)
                        .speed(input::step::OOIP)
                        .clamp_range(b.ooip_min..=f64::MAX),
                );
                ui.end_row();

                label_with_tip(ui, tr.t(keys::FIELD_INITIAL_PRESSURE), "P_i");
                ui.add(
                    egui::DragValue::new(&mut self.form.initial_pressure)
                        .speed(input::step::PRESSURE)
                        .clamp_range(b.initial_pressure_min..=f64::MAX),
                );
                ui.end_row();

                label_with_tip(ui, tr.t(keys::FIELD_BUBBLE_POINT), tr.t(keys::NOTE_BUBBLE_POINT));
                ui.add(
                    egui::DragValue::new(&mut self.form.bubble_point_pressure)
                        .speed(input::step::PRESSURE)
                        .clamp_range(b.bubble_point_min..=f64::MAX),
                );
                ui.end_row();

                label_with_tip(ui, tr.t(keys::FIELD_INITIAL_FVF), "B_oi");
                ui.add(
                    egui::DragValue::new(&mut self.form.initial_fvf)
                        .speed(input::step::FVF)
                        .clamp_range(b.initial_fvf_min..=f64::MAX)
                        .max_decimals(4),
                );
                ui.end_row();

                label_with_tip(ui, tr.t(keys::FIELD_OIL_COMPRESSIBILITY), "c_o");
                ui.add(scientific_drag(
                    &mut self.form.oil_compressibility,
                    b.oil_compressibility_min,
                ));
                ui.end_row();

                label_with_tip(ui, tr.t(keys::FIELD_FORMATION_COMPRESSIBILITY), "c_r");
                ui.add(scientific_drag(
                    &mut self.form.formation_compressibility,
                    b.formation_compressibility_min,
                ));
                ui.end_row();
            });

        ui.add_space(10.0);
        ui.heading(tr.t(keys::SECTION_SIMULATION));
        egui::Grid::new("simulation_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::FIELD_NUM_STEPS));
                ui.add(egui::Slider::new(&mut self.form.num_steps, b.steps_min..=b.steps_max));
                ui.end_row();

                ui.label(tr.t(keys::FIELD_FINAL_PRESSURE));
                ui.add(
                    egui::DragValue::new(&mut self.form.final_pressure)
                        .speed(input::step::PRESSURE)
                        .clamp_range(b.final_pressure_min..=f64::MAX),
                );
                ui.end_row();
            });

        ui.add_space(10.0);
        ui.heading(tr.t(keys::SECTION_DISPLAY));
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source("pressure_unit")
                .selected_text(self.config.pressure_unit.symbol())
                .show_ui(ui, |ui| {
                    for unit in PressureUnit::ALL {
                        ui.selectable_value(&mut self.config.pressure_unit, unit, unit.symbol());
                    }
                });
            egui::ComboBox::from_id_source("volume_unit")
                .selected_text(self.config.volume_unit.symbol())
                .show_ui(ui, |ui| {
                    for unit in VolumeUnit::ALL {
                        ui.selectable_value(&mut self.config.volume_unit, unit, unit.symbol());
                    }
                });
        });
        ui.checkbox(&mut self.config.show_breakdown, tr.t(keys::GUI_SHOW_BREAKDOWN));

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_RESET)).clicked() {
                self.form = InputForm::default();
            }
            if ui.button(tr.t(keys::GUI_EXPORT)).clicked() {
                self.export();
            }
        });
        if let Some(msg) = &self.status {
            ui.small(msg);
        }
    }

    fn export(&mut self) {
        let Ok(series) = &self.series else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .set_file_name("depletion_drive.csv")
            .save_file()
        else {
            return;
        };
        let format = ExportFormat::from_path(&path);
        let breakdown = self.config.show_breakdown;
        match report::export_to_file(&path, series, self.units(), format, breakdown) {
            Ok(()) => {
                let saved = self.tr.t(keys::GUI_EXPORTED);
                self.status = Some(format!("{saved} {}", path.display()));
            }
            Err(e) => {
                error!("내보내기 실패: {e}");
                self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let series = match &self.series {
            Ok(s) => s,
            Err(e) => {
                let msg = format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX));
                ui.colored_label(egui::Color32::RED, msg);
                return;
            }
        };
        let units = self.units();
        let breakdown = self.config.show_breakdown;

        ui.heading(report::RESULTS_HEADING);
        ui.label(report::RESULTS_CAPTION);
        egui::ScrollArea::vertical()
            .id_source("results_table")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("results_grid")
                    .striped(true)
                    .min_col_width(90.0)
                    .show(ui, |ui| {
                        ui.strong("#");
                        ui.strong(units.pressure_column());
                        ui.strong(units.withdrawal_column());
                        if breakdown {
                            for col in report::BREAKDOWN_COLUMNS {
                                ui.strong(col);
                            }
                        }
                        ui.end_row();
                        for (i, row) in report::display_rows(series, units).iter().enumerate() {
                            ui.label(i.to_string());
                            ui.monospace(format!("{:.4}", row.pressure));
                            ui.monospace(format!("{:.4}", row.cumulative_withdrawal));
                            if breakdown {
                                ui.monospace(format!("{:.6}", row.oil_fvf));
                                ui.monospace(format!("{:.6e}", row.oil_expansion));
                                ui.monospace(format!("{:.6e}", row.formation_expansion));
                            }
                            ui.end_row();
                        }
                    });
            });

        ui.add_space(12.0);
        ui.heading(report::VISUALIZATION_HEADING);
        ui.label(egui::RichText::new(report::CHART_TITLE).strong());
        let line = Line::new(PlotPoints::new(report::chart_points(series, units)))
            .name(report::LEGEND_LABEL)
            .color(egui::Color32::BLUE);
        Plot::new("depletion_chart")
            .legend(Legend::default())
            .x_axis_label(units.pressure_axis())
            .y_axis_label(units.withdrawal_axis())
            .show_grid(true)
            .height(340.0)
            .show(ui, |plot_ui| plot_ui.line(line));

        ui.small(self.tr.t(keys::NOTE_BUBBLE_POINT));
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr;
        let mut open = self.show_settings;
        egui::Window::new(tr.t(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_ALPHA));
                let alpha_range = config::WINDOW_ALPHA_MIN..=config::WINDOW_ALPHA_MAX;
                let alpha = egui::Slider::new(&mut self.config.window_alpha, alpha_range);
                ui.add(alpha.text("alpha"));
                ui.separator();
                ui.label(tr.t(keys::GUI_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                    });
                if ui.button(tr.t(keys::GUI_SAVE_SETTINGS)).clicked() {
                    self.config.language = self.lang_input.clone();
                    self.config.inputs = self.form;
                    self.tr = Translator::new(&i18n::resolve_language(&self.config.language, None));
                    self.status = Some(match self.config.save() {
                        Ok(()) => self.tr.t(keys::GUI_SAVED).to_string(),
                        Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
                    });
                }
                if let Some(msg) = &self.status {
                    ui.label(msg);
                }
            });
        self.show_settings = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도는 기본 비주얼 기준으로 매 프레임 적용
        let mut visuals = egui::Visuals::default();
        visuals.window_fill = visuals.window_fill.linear_multiply(self.config.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.config.window_alpha);
        ctx.set_visuals(visuals);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(report::PAGE_TITLE);
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_FORMULA)).clicked() {
                    self.show_formula = true;
                }
                if ui.button(self.tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = true;
                }
            });
        });

        if self.show_settings {
            self.ui_settings(ctx);
        }

        if self.show_formula {
            egui::Window::new(self.tr.t(keys::GUI_FORMULA))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula)
                .show(ctx, |ui| {
                    ui.monospace("B_o = B_oi · (1 + c_o · (P_i − P))");
                    ui.monospace("E_o = B_o − B_oi");
                    ui.monospace("E_f = c_r · (P_i − P)");
                    ui.monospace("F   = N · (E_o + E_f)");
                });
        }

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(260.0)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_inputs(ui));
            });

        self.recompute_if_changed();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_results(ui));
        });
    }
}
