#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use process_sizing_toolbox::{
    config::{self, ranges, InputRange},
    conversion,
    flow::{self, FlowInputs, FlowMode, FlowResult},
    i18n::{self, keys},
    nozzle::{self, NozzleGeometry, NozzleGeometryProfile, NozzleInputs, SurfaceGrid},
    quantity::QuantityKind,
    ui_cli::{format_area, format_time, material_weight_key},
    units::{AreaUnit, TimeUnit},
};
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1100.0, 760.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "config unusable, using defaults");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Process Sizing Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png", "../../assets/icon.png"];
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

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
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
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) 시스템 폰트(Windows 맑은 고딕, Linux Noto CJK)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    let mut candidates = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(name));
        }
    }
    for p in [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(Path::new(p).to_path_buf());
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 범위 표를 따르는 숫자 입력 위젯.
fn range_drag(ui: &mut egui::Ui, value: &mut f64, range: InputRange, suffix: &str) -> egui::Response {
    ui.add(
        egui::DragValue::new(value)
            .speed(range.step)
            .clamp_range(range.min..=range.max.unwrap_or(f64::MAX))
            .suffix(suffix),
    )
}

/// 입력 라벨 + 위젯을 Grid 한 줄로 배치한다.
fn input_row(ui: &mut egui::Ui, label: &str, value: &mut f64, range: InputRange, suffix: &str) {
    ui.label(label);
    range_drag(ui, value, range, suffix);
    ui.end_row();
}

fn result_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(label);
    ui.strong(value);
    ui.end_row();
}

fn warnings_ui(ui: &mut egui::Ui, prefix: &str, warnings: &[String]) {
    for w in warnings {
        ui.colored_label(ui.visuals().warn_fg_color, format!("{prefix}: {w}"));
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    ui_scale: f32,
    show_settings_modal: bool,
    custom_font_path: String,
    font_load_error: Option<String>,
    // 물질수지
    flow_mode: FlowMode,
    flow_input: FlowInputs,
    flow_material_weight: f64,
    flow_water: f64,
    // 노즐
    nozzle_input: NozzleInputs,
    nozzle_channel_auto: bool,
    nozzle_channel_len: f64,
    view_yaw: f32,
    view_pitch: f32,
    // 단위 변환
    conv_value: f64,
    conv_from: String,
    conv_to: String,
    conv_kind: QuantityKind,
    conv_result: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Flow,
    Nozzle,
    UnitConv,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = %lang_code, "GUI language resolved");

        let mut flow_input = config.flow.clone();
        flow_input.liquid_inputs_kg_per_h.resize(3, 0.0);
        let nozzle_input = config.nozzle.clone();
        let (conv_from, conv_to) = default_units_for_kind(QuantityKind::Length);
        Self {
            tr,
            lang_input: config.language.clone(),
            lang_save_status: None,
            tab: Tab::Flow,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            ui_scale: config.ui_scale.clamp(0.8, 1.6),
            show_settings_modal: false,
            custom_font_path: String::new(),
            font_load_error: None,
            flow_mode: config.effective_flow_mode(),
            flow_material_weight: flow_input.material_weight_kg.unwrap_or(0.0),
            flow_water: flow_input.water_input_kg_per_h.unwrap_or(0.0),
            flow_input,
            nozzle_channel_auto: nozzle_input.channel_length_mm.is_none(),
            nozzle_channel_len: nozzle_input.effective_channel_length_mm(),
            nozzle_input,
            view_yaw: 0.6,
            view_pitch: 0.5,
            conv_value: 1.0,
            conv_from: conv_from.into(),
            conv_to: conv_to.into(),
            conv_kind: QuantityKind::Length,
            conv_result: None,
            config,
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Flow, txt("gui.tab.flow", "Flow Balance")),
            (Tab::Nozzle, txt("gui.tab.nozzle", "Nozzle Perforation")),
            (Tab::UnitConv, txt("gui.tab.unit_conv", "Unit Converter")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    /// 현재 모드에 맞춰 선택 입력을 채운 물질수지 입력값.
    fn flow_inputs(&self) -> FlowInputs {
        let mut input = self.flow_input.clone();
        match self.flow_mode {
            FlowMode::MassReference => input.material_weight_kg = Some(self.flow_material_weight),
            FlowMode::DensityVolume => input.water_input_kg_per_h = Some(self.flow_water),
        }
        input
    }

    fn ui_flow(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &tr.t(keys::FLOW_HEADING).trim().trim_matches('-').trim().to_string(),
            &txt(
                "gui.flow.tip",
                "Wet throughput, fill degree and retention time of a continuously fed vessel.",
            ),
        );
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.flow_mode,
                FlowMode::MassReference,
                tr.t(keys::RESULT_MODE_A),
            );
            ui.selectable_value(
                &mut self.flow_mode,
                FlowMode::DensityVolume,
                tr.t(keys::RESULT_MODE_B),
            );
        });
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("flow_inputs")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    input_row(
                        ui,
                        &tr.t(keys::FLOW_DRY_FEED),
                        &mut self.flow_input.dry_feed_kg_per_h,
                        ranges::DRY_FEED_KG_PER_H,
                        " kg/h",
                    );
                    match self.flow_mode {
                        FlowMode::MassReference => {
                            for (i, v) in self.flow_input.liquid_inputs_kg_per_h.iter_mut().enumerate() {
                                let label = format!("{} {} [kg/h]", tr.t(keys::FLOW_LIQUID), i + 1);
                                input_row(ui, &label, v, ranges::LIQUID_KG_PER_H, " kg/h");
                            }
                            input_row(
                                ui,
                                &tr.t(keys::FLOW_MATERIAL_WEIGHT),
                                &mut self.flow_material_weight,
                                ranges::MATERIAL_WEIGHT_KG,
                                " kg",
                            );
                        }
                        FlowMode::DensityVolume => {
                            input_row(
                                ui,
                                &tr.t(keys::FLOW_MOISTURE),
                                &mut self.flow_input.moisture_content_pct,
                                ranges::MOISTURE_PCT,
                                " %",
                            );
                            input_row(
                                ui,
                                &tr.t(keys::FLOW_VESSEL_VOLUME),
                                &mut self.flow_input.vessel_volume_m3,
                                ranges::VESSEL_VOLUME_M3,
                                " m³",
                            );
                            input_row(
                                ui,
                                &tr.t(keys::FLOW_BULK_DENSITY),
                                &mut self.flow_input.bulk_density_g_per_l,
                                ranges::BULK_DENSITY_G_PER_L,
                                " g/L",
                            );
                            input_row(
                                ui,
                                &tr.t(keys::FLOW_WATER_INPUT),
                                &mut self.flow_water,
                                ranges::WATER_KG_PER_H,
                                " kg/h",
                            );
                        }
                    }
                });
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(txt("gui.flow.time_unit", "Retention time unit"));
            let unit = &mut self.config.display_units.retention_time;
            egui::ComboBox::from_id_source("flow_time_unit")
                .selected_text(unit.symbol())
                .show_ui(ui, |ui| {
                    for u in [TimeUnit::Second, TimeUnit::Minute, TimeUnit::Hour] {
                        ui.selectable_value(unit, u, u.symbol());
                    }
                });
        });

        match flow::compute_flow_balance(&self.flow_inputs(), self.flow_mode) {
            Ok(result) => self.flow_result_ui(ui, &result),
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, format!("{}: {e}", tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    fn flow_result_ui(&self, ui: &mut egui::Ui, result: &FlowResult) {
        let tr = &self.tr;
        let throughput_key = match result.mode {
            FlowMode::MassReference => keys::RESULT_WET_THROUGHPUT,
            FlowMode::DensityVolume => keys::RESULT_TOTAL_MASS_INPUT,
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("flow_results")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    result_row(
                        ui,
                        &tr.t(throughput_key),
                        format!("{:.2} kg/h", result.wet_throughput_kg_per_h),
                    );
                    if let Some(v) = result.dry_volume_m3_per_h {
                        result_row(ui, &tr.t(keys::RESULT_DRY_VOLUME), format!("{v:.3} m³/h"));
                    }
                    if let Some(v) = result.total_volume_m3_per_h {
                        result_row(ui, &tr.t(keys::RESULT_TOTAL_VOLUME), format!("{v:.3} m³/h"));
                    }
                    result_row(
                        ui,
                        &tr.t(material_weight_key(result.mode)),
                        format!("{:.2} kg", result.material_weight_kg),
                    );
                    result_row(
                        ui,
                        &tr.t(keys::RESULT_RETENTION_TIME),
                        format_time(result.retention_time_s, self.config.display_units.retention_time),
                    );
                });
            if let Some(fill) = result.fill_degree_pct {
                ui.add_space(6.0);
                ui.label(tr.t(keys::RESULT_FILL_DEGREE));
                ui.add(
                    egui::ProgressBar::new((fill / 100.0) as f32)
                        .text(format!("{fill:.1} %")),
                );
            }
            warnings_ui(ui, &tr.t(keys::WARNING_PREFIX), &result.warnings);
        });
    }

    /// 채널 길이 자동 여부를 반영한 노즐 입력값.
    fn nozzle_inputs(&self) -> NozzleInputs {
        let mut input = self.nozzle_input.clone();
        input.channel_length_mm = if self.nozzle_channel_auto {
            None
        } else {
            Some(self.nozzle_channel_len)
        };
        input
    }

    fn ui_nozzle(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &tr.t(keys::NOZZLE_HEADING).trim().trim_matches('-').trim().to_string(),
            &txt(
                "gui.nozzle.tip",
                "Open area of a perforated plate with cone + cylindrical channel holes.",
            ),
        );
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            let ui = &mut cols[0];
            egui::Frame::group(ui.style()).show(ui, |ui| {
                egui::Grid::new("nozzle_inputs")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        let n = &mut self.nozzle_input;
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_PLATE_THICKNESS),
                            &mut n.plate_thickness_mm,
                            ranges::PLATE_THICKNESS_MM,
                            " mm",
                        );
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_CONE_DIAMETER),
                            &mut n.cone_diameter_mm,
                            ranges::CONE_DIAMETER_MM,
                            " mm",
                        );
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_FINAL_DIAMETER),
                            &mut n.final_diameter_mm,
                            ranges::FINAL_DIAMETER_MM,
                            " mm",
                        );
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_CONE_ANGLE),
                            &mut n.cone_angle_deg,
                            ranges::CONE_ANGLE_DEG,
                            "°",
                        );
                        let section = ranges::section_length_mm(n.plate_thickness_mm);
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_CONE_LENGTH),
                            &mut n.cone_length_mm,
                            section,
                            " mm",
                        );

                        ui.label(tr.t(keys::NOZZLE_CHANNEL_LENGTH));
                        ui.horizontal(|ui| {
                            ui.checkbox(
                                &mut self.nozzle_channel_auto,
                                txt("gui.nozzle.channel_auto", "auto"),
                            )
                            .on_hover_text(txt(
                                "gui.nozzle.channel_auto_tip",
                                "Use plate thickness minus cone length",
                            ));
                            if self.nozzle_channel_auto {
                                self.nozzle_channel_len =
                                    (n.plate_thickness_mm - n.cone_length_mm).max(0.0);
                                ui.label(format!("{:.1} mm", self.nozzle_channel_len));
                            } else {
                                range_drag(ui, &mut self.nozzle_channel_len, section, " mm");
                            }
                        });
                        ui.end_row();

                        ui.label(tr.t(keys::NOZZLE_NUM_HOLES));
                        ui.add(
                            egui::DragValue::new(&mut n.num_holes)
                                .speed(ranges::NUM_HOLES.step)
                                .clamp_range(ranges::NUM_HOLES.min..=1.0e9),
                        );
                        ui.end_row();
                        input_row(
                            ui,
                            &tr.t(keys::NOZZLE_THROUGHPUT),
                            &mut n.throughput_t_per_h,
                            ranges::THROUGHPUT_T_PER_H,
                            " t/h",
                        );
                    });
            });

            let ui = &mut cols[1];
            ui.horizontal(|ui| {
                ui.label(txt("gui.nozzle.area_unit", "Open area unit"));
                let unit = &mut self.config.display_units.open_area;
                egui::ComboBox::from_id_source("nozzle_area_unit")
                    .selected_text(unit.symbol())
                    .show_ui(ui, |ui| {
                        for u in [
                            AreaUnit::SquareMillimeter,
                            AreaUnit::SquareCentimeter,
                            AreaUnit::SquareMeter,
                            AreaUnit::SquareInch,
                        ] {
                            ui.selectable_value(unit, u, u.symbol());
                        }
                    });
            });
            match nozzle::compute_nozzle_geometry_with(
                &self.nozzle_inputs(),
                self.config.solid_resolution,
            ) {
                Ok(geometry) => self.nozzle_metrics_ui(ui, &geometry),
                Err(e) => {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                    );
                }
            }
        });

        ui.add_space(8.0);
        if let Ok(geometry) =
            nozzle::compute_nozzle_geometry_with(&self.nozzle_inputs(), self.config.solid_resolution)
        {
            ui.columns(2, |cols| {
                cols[0].label(txt("gui.nozzle.section", "Cross-section"));
                draw_profile(&mut cols[0], &geometry.profile, self.nozzle_input.plate_thickness_mm);
                cols[1].horizontal(|ui| {
                    ui.label(txt("gui.nozzle.solid", "3D view"));
                    ui.add(
                        egui::Slider::new(&mut self.view_yaw, -std::f32::consts::PI..=std::f32::consts::PI)
                            .text("yaw"),
                    );
                    ui.add(egui::Slider::new(&mut self.view_pitch, 0.0..=1.5).text("pitch"));
                });
                draw_solid(&mut cols[1], &geometry, self.view_yaw, self.view_pitch);
            });
        }
    }

    fn nozzle_metrics_ui(&self, ui: &mut egui::Ui, geometry: &NozzleGeometry) {
        let tr = &self.tr;
        let m = &geometry.metrics;
        let area = self.config.display_units.open_area;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("nozzle_results")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    result_row(ui, &tr.t(keys::RESULT_OPEN_AREA_ONE), format_area(m.open_area_one_hole_mm2, area));
                    result_row(ui, &tr.t(keys::RESULT_TOTAL_OPEN_AREA), format_area(m.total_open_area_mm2, area));
                    result_row(
                        ui,
                        &tr.t(keys::RESULT_OPEN_AREA_PER_THROUGHPUT),
                        format!("{}/(t/h)", format_area(m.open_area_per_throughput, area)),
                    );
                    result_row(ui, &tr.t(keys::RESULT_HOLE_VOLUME), format!("{:.1} mm³", m.hole_volume_mm3));
                    if let Some(angle) = m.implied_cone_half_angle_deg {
                        result_row(ui, &tr.t(keys::RESULT_IMPLIED_ANGLE), format!("{angle:.1}°"));
                    }
                });
            warnings_ui(ui, &tr.t(keys::WARNING_PREFIX), &m.warnings);
        });
    }

    fn ui_unit_conv(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.unit.heading", "Unit Converter"),
            &txt("gui.unit.tip", "Convert lengths, areas, flows and densities between units."),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.unit.quantity.label", "Quantity"),
                        &txt("gui.unit.quantity_tip", "Select the quantity type"),
                    );
                    let before = self.conv_kind;
                    egui::ComboBox::from_id_source("conv_kind")
                        .selected_text(kind_label(self.conv_kind, &txt))
                        .show_ui(ui, |ui| {
                            for k in QuantityKind::ALL {
                                ui.selectable_value(&mut self.conv_kind, k, kind_label(k, &txt));
                            }
                        });
                    if before != self.conv_kind {
                        let (f, t) = default_units_for_kind(self.conv_kind);
                        self.conv_from = f.to_string();
                        self.conv_to = t.to_string();
                        self.conv_result = None;
                    }
                    ui.end_row();

                    ui.label(txt("gui.unit.value", "Value"));
                    ui.add(egui::DragValue::new(&mut self.conv_value).speed(1.0));
                    ui.end_row();

                    ui.label(txt("gui.unit.from", "From unit"));
                    unit_combo(ui, "conv_from", &mut self.conv_from, self.conv_kind);
                    ui.end_row();

                    ui.label(txt("gui.unit.to", "To unit"));
                    unit_combo(ui, "conv_to", &mut self.conv_to, self.conv_kind);
                    ui.end_row();
                });
            ui.add_space(8.0);
            if ui.button(txt("gui.unit.run", "Convert")).clicked() {
                self.conv_result = Some(
                    match conversion::convert(self.conv_kind, self.conv_value, &self.conv_from, &self.conv_to) {
                        Ok(v) => format!("{v:.6} {}", self.conv_to),
                        Err(e) => format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                    },
                );
            }
            if let Some(res) = &self.conv_result {
                ui.label(res);
            }
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt("gui.settings.ui_scale", "UI scale"));
                if ui
                    .add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x"))
                    .changed()
                {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.separator();
                ui.label(txt("gui.settings.alpha", "Window transparency"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                ui.separator();
                ui.label(txt("gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            txt("gui.settings.lang.auto", "System"),
                        );
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                    });

                ui.separator();
                ui.label(txt("gui.settings.font", "User font (.ttf/.ttc)"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.custom_font_path);
                    if ui.button(txt("gui.settings.font_browse", "Browse...")).clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Font", &["ttf", "ttc", "otf"])
                            .pick_file()
                        {
                            self.custom_font_path = path.display().to_string();
                        }
                    }
                    if ui.button(txt("gui.settings.font_apply", "Apply")).clicked() {
                        self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
                    }
                });
                if let Some(err) = &self.font_load_error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }

                ui.separator();
                if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                    self.config.language = self.lang_input.clone();
                    self.config.window_alpha = self.window_alpha;
                    self.config.ui_scale = self.ui_scale;
                    self.config.flow = self.flow_inputs();
                    self.config.flow_mode = Some(self.flow_mode);
                    self.config.nozzle = self.nozzle_inputs();
                    let resolved = i18n::resolve_language(&self.config.language, None);
                    self.tr = i18n::Translator::new_with_pack(
                        &resolved,
                        self.config.language_pack_dir.as_deref(),
                    );
                    self.lang_save_status = Some(match self.config.save() {
                        Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
                        Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
                    });
                }
                if let Some(msg) = &self.lang_save_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Process Sizing Toolbox"));
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Flow => self.ui_flow(ui),
                    Tab::Nozzle => self.ui_nozzle(ui),
                    Tab::UnitConv => self.ui_unit_conv(ui),
                });
        });
    }
}

/// 판 단면 위에 원뿔/채널 다각형을 그린다. 깊이는 화면 아래 방향.
fn draw_profile(ui: &mut egui::Ui, profile: &NozzleGeometryProfile, plate_thickness: f64) {
    let size = egui::vec2(ui.available_width().min(420.0), 300.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect.shrink(16.0);

    let half_width = profile.max_radius() * 1.6;
    let depth = plate_thickness.max(profile.depth());
    if half_width <= 0.0 || depth <= 0.0 {
        return;
    }
    let scale = (rect.width() as f64 / (2.0 * half_width)).min(rect.height() as f64 / depth);
    let origin = egui::pos2(rect.center().x, rect.top());
    let to_screen = |r: f64, d: f64| origin + egui::vec2((r * scale) as f32, (d * scale) as f32);

    let plate = egui::Rect::from_min_max(
        to_screen(-half_width, 0.0),
        to_screen(half_width, plate_thickness),
    );
    painter.rect_filled(plate, 0.0, egui::Color32::from_gray(150));

    let stroke = egui::Stroke::new(1.0, ui.visuals().text_color());
    for (poly, color) in [
        (&profile.cone, egui::Color32::from_rgb(90, 150, 230)),
        (&profile.channel, egui::Color32::from_rgb(240, 150, 70)),
    ] {
        let points = poly.iter().map(|p| to_screen(p.radius, p.depth)).collect();
        painter.add(egui::Shape::convex_polygon(points, color, stroke));
    }
}

/// 축(z) 회전 후 기울여 화면 평면으로 투영한다.
fn project(p: [f64; 3], yaw: f32, pitch: f32) -> egui::Vec2 {
    let (sy, cy) = (yaw as f64).sin_cos();
    let (sp, cp) = (pitch as f64).sin_cos();
    let x = p[0] * cy - p[1] * sy;
    let y = p[0] * sy + p[1] * cy;
    egui::vec2(x as f32, (p[2] * cp + y * sp) as f32)
}

/// 격자의 `vertices()`/`triangle_indices()`로 반투명 면 메쉬를 만든다.
fn solid_mesh(
    grid: &SurfaceGrid,
    to_screen: impl Fn(egui::Vec2) -> egui::Pos2,
    yaw: f32,
    pitch: f32,
    color: egui::Color32,
) -> egui::Mesh {
    let fill = color.gamma_multiply(0.35);
    let mut mesh = egui::Mesh::default();
    for p in grid.vertices() {
        mesh.colored_vertex(to_screen(project(p, yaw, pitch)), fill);
    }
    for [a, b, c] in grid.triangle_indices() {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    mesh
}

/// 회전체 격자를 반투명 면과 와이어프레임으로 그린다.
fn draw_solid(ui: &mut egui::Ui, geometry: &NozzleGeometry, yaw: f32, pitch: f32) {
    let size = egui::vec2(ui.available_width().min(420.0), 300.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect.shrink(16.0);

    let grids: [(&SurfaceGrid, egui::Color32); 2] = [
        (&geometry.solid.cone, egui::Color32::from_rgb(90, 150, 230)),
        (&geometry.solid.channel, egui::Color32::from_rgb(240, 150, 70)),
    ];

    let mut bounds = egui::Rect::NOTHING;
    for (grid, _) in &grids {
        for p in grid.points.iter().flatten() {
            bounds.extend_with(project(*p, yaw, pitch).to_pos2());
        }
    }
    if !bounds.is_positive() {
        return;
    }
    let scale = (rect.width() / bounds.width()).min(rect.height() / bounds.height());
    let offset = rect.center() - bounds.center().to_vec2() * scale;
    let to_screen = |v: egui::Vec2| offset + v * scale;

    for (grid, color) in &grids {
        painter.add(egui::Shape::mesh(solid_mesh(grid, to_screen, yaw, pitch, *color)));
    }
    for (grid, color) in &grids {
        let stroke = egui::Stroke::new(1.0, *color);
        for row in &grid.points {
            let line: Vec<egui::Pos2> =
                row.iter().map(|p| to_screen(project(*p, yaw, pitch))).collect();
            painter.add(egui::Shape::line(line, stroke));
        }
        for j in 0..grid.cols() {
            let ring: Vec<egui::Pos2> = grid
                .points
                .iter()
                .map(|row| to_screen(project(row[j], yaw, pitch)))
                .collect();
            painter.add(egui::Shape::line(ring, stroke));
        }
    }
}

fn kind_label(kind: QuantityKind, txt: &impl Fn(&str, &str) -> String) -> String {
    match kind {
        QuantityKind::Length => txt("gui.unit.quantity.length", "Length"),
        QuantityKind::Area => txt("gui.unit.quantity.area", "Area"),
        QuantityKind::Volume => txt("gui.unit.quantity.volume", "Volume"),
        QuantityKind::Mass => txt("gui.unit.quantity.mass", "Mass"),
        QuantityKind::MassFlow => txt("gui.unit.quantity.mass_flow", "Mass flow"),
        QuantityKind::Density => txt("gui.unit.quantity.density", "Density"),
        QuantityKind::Time => txt("gui.unit.quantity.time", "Time"),
    }
}

fn default_units_for_kind(kind: QuantityKind) -> (&'static str, &'static str) {
    match kind {
        QuantityKind::Length => ("mm", "in"),
        QuantityKind::Area => ("mm2", "cm2"),
        QuantityKind::Volume => ("m3", "L"),
        QuantityKind::Mass => ("kg", "lb"),
        QuantityKind::MassFlow => ("t/h", "kg/h"),
        QuantityKind::Density => ("g/L", "kg/m3"),
        QuantityKind::Time => ("s", "min"),
    }
}

fn unit_combo(ui: &mut egui::Ui, id: &str, value: &mut String, kind: QuantityKind) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for code in kind.unit_codes() {
                ui.selectable_value(value, code.to_string(), *code);
            }
        });
}
