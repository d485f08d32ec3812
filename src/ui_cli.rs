use std::io::{self, BufRead, Write};

use crate::app::{AppError, Session};
use crate::config::{ranges, DisplayUnits, InputRange};
use crate::conversion::{self, parse_area_unit, parse_time_unit};
use crate::flow::{self, FlowInputs, FlowMode, FlowResult};
use crate::i18n::{keys, Translator};
use crate::nozzle::{self, NozzleGeometry, NozzleInputs, ProfilePoint};
use crate::quantity::QuantityKind;
use crate::units::{convert_area, convert_time, AreaUnit, TimeUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FlowBalance,
    Nozzle,
    UnitConversion,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    main_menu_from(tr, &mut io::stdin().lock())
}

/// 주어진 입력에서 메뉴 선택을 읽는다. 입력이 끝나면(EOF) 종료로 본다.
pub fn main_menu_from(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_FLOW,
        keys::MAIN_MENU_NOZZLE,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line_from(input, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                return Ok(MenuChoice::Exit);
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::FlowBalance),
            "2" => return Ok(MenuChoice::Nozzle),
            "3" => return Ok(MenuChoice::UnitConversion),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 용기 물질수지 메뉴를 처리한다. 엔터를 누르면 설정의 기본값을 그대로 쓴다.
pub fn handle_flow_balance(session: &mut Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::FLOW_HEADING));
    println!("{}", tr.t(keys::FLOW_MODE_OPTIONS));
    let default_mode = session.config.effective_flow_mode();
    let mode = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => FlowMode::MassReference,
        "2" => FlowMode::DensityVolume,
        _ => default_mode,
    };

    let d = &session.config.flow;
    let mut input = FlowInputs {
        dry_feed_kg_per_h: read_f64_or(
            tr,
            &tr.t(keys::FLOW_DRY_FEED),
            d.dry_feed_kg_per_h,
            ranges::DRY_FEED_KG_PER_H,
        )?,
        ..d.clone()
    };
    match mode {
        FlowMode::MassReference => {
            let mut liquids = Vec::with_capacity(3);
            for i in 0..3 {
                let default = d.liquid_inputs_kg_per_h.get(i).copied().unwrap_or(0.0);
                let label = format!("{} {} [kg/h]", tr.t(keys::FLOW_LIQUID), i + 1);
                liquids.push(read_f64_or(tr, &label, default, ranges::LIQUID_KG_PER_H)?);
            }
            input.liquid_inputs_kg_per_h = liquids;
            input.material_weight_kg = Some(read_f64_or(
                tr,
                &tr.t(keys::FLOW_MATERIAL_WEIGHT),
                d.material_weight_kg.unwrap_or(0.0),
                ranges::MATERIAL_WEIGHT_KG,
            )?);
        }
        FlowMode::DensityVolume => {
            input.moisture_content_pct = read_f64_or(
                tr,
                &tr.t(keys::FLOW_MOISTURE),
                d.moisture_content_pct,
                ranges::MOISTURE_PCT,
            )?;
            input.vessel_volume_m3 = read_f64_or(
                tr,
                &tr.t(keys::FLOW_VESSEL_VOLUME),
                d.vessel_volume_m3,
                ranges::VESSEL_VOLUME_M3,
            )?;
            input.bulk_density_g_per_l = read_f64_or(
                tr,
                &tr.t(keys::FLOW_BULK_DENSITY),
                d.bulk_density_g_per_l,
                ranges::BULK_DENSITY_G_PER_L,
            )?;
            input.water_input_kg_per_h = Some(read_f64_or(
                tr,
                &tr.t(keys::FLOW_WATER_INPUT),
                d.water_input_kg_per_h.unwrap_or(0.0),
                ranges::WATER_KG_PER_H,
            )?);
        }
    }

    let result = flow::compute_flow_balance(&input, mode)?;
    print_flow_result(tr, &session.config.display_units, &result);
    Ok(())
}

/// 노즐형 타공 메뉴를 처리한다.
pub fn handle_nozzle(session: &mut Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::NOZZLE_HEADING));
    let d = &session.config.nozzle;

    let plate = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_PLATE_THICKNESS),
        d.plate_thickness_mm,
        ranges::PLATE_THICKNESS_MM,
    )?;
    let section = ranges::section_length_mm(plate);
    let cone_diameter = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_CONE_DIAMETER),
        d.cone_diameter_mm,
        ranges::CONE_DIAMETER_MM,
    )?;
    let final_diameter = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_FINAL_DIAMETER),
        d.final_diameter_mm,
        ranges::FINAL_DIAMETER_MM,
    )?;
    let angle = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_CONE_ANGLE),
        d.cone_angle_deg,
        ranges::CONE_ANGLE_DEG,
    )?;
    let cone_length = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_CONE_LENGTH),
        section.clamp(d.cone_length_mm),
        section,
    )?;
    let channel_length = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_CHANNEL_LENGTH),
        section.clamp(d.channel_length_mm.unwrap_or(plate - cone_length)),
        section,
    )?;
    let holes = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_NUM_HOLES),
        f64::from(d.num_holes),
        ranges::NUM_HOLES,
    )?;
    let throughput = read_f64_or(
        tr,
        &tr.t(keys::NOZZLE_THROUGHPUT),
        d.throughput_t_per_h,
        ranges::THROUGHPUT_T_PER_H,
    )?;

    let input = NozzleInputs {
        plate_thickness_mm: plate,
        cone_diameter_mm: cone_diameter,
        final_diameter_mm: final_diameter,
        cone_angle_deg: angle,
        cone_length_mm: cone_length,
        channel_length_mm: Some(channel_length),
        num_holes: holes.round() as u32,
        throughput_t_per_h: throughput,
    };
    let geometry = nozzle::compute_nozzle_geometry_with(&input, session.config.solid_resolution)?;
    print_nozzle_geometry(tr, &session.config.display_units, &input, &geometry);
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Some(kind) = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| QuantityKind::ALL.get(i).copied())
        {
            break kind;
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    println!("({})", kind.unit_codes().join(", "));
    let value = read_f64(tr, &tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        to_unit.trim()
    );
    Ok(())
}

/// 설정 메뉴를 처리한다. 빈 입력은 현재 값을 유지한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        session.config.language,
        tr.language_code()
    );

    let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    let time_unit = read_line(&tr.t(keys::SETTINGS_PROMPT_TIME_UNIT))?;
    let area_unit = read_line(&tr.t(keys::SETTINGS_PROMPT_AREA_UNIT))?;

    if !lang.trim().is_empty() {
        session.config.language = lang.trim().to_string();
    }
    if !time_unit.trim().is_empty() {
        session.config.display_units.retention_time = parse_time_unit(&time_unit)?;
    }
    if !area_unit.trim().is_empty() {
        session.config.display_units.open_area = parse_area_unit(&area_unit)?;
    }
    Ok(())
}

/// 물질수지 결과를 출력한다.
pub fn print_flow_result(tr: &Translator, units: &DisplayUnits, result: &FlowResult) {
    for line in flow_result_lines(tr, units, result) {
        println!("{line}");
    }
    print_warnings(tr, &result.warnings);
}

/// 재료 질량 표시 라벨. Mode A는 입력한 용기 내 질량, Mode B는 수분 보정 질량이다.
pub fn material_weight_key(mode: FlowMode) -> &'static str {
    match mode {
        FlowMode::MassReference => keys::RESULT_VESSEL_MATERIAL_WEIGHT,
        FlowMode::DensityVolume => keys::RESULT_MATERIAL_WEIGHT,
    }
}

/// 물질수지 결과를 표시 단위에 맞춘 출력 줄로 만든다. 경고는 포함하지 않는다.
pub fn flow_result_lines(tr: &Translator, units: &DisplayUnits, result: &FlowResult) -> Vec<String> {
    let (mode_key, throughput_key) = match result.mode {
        FlowMode::MassReference => (keys::RESULT_MODE_A, keys::RESULT_WET_THROUGHPUT),
        FlowMode::DensityVolume => (keys::RESULT_MODE_B, keys::RESULT_TOTAL_MASS_INPUT),
    };
    let mut lines = vec![
        format!("[{}]", tr.t(mode_key)),
        format!(
            "{}: {:.2} kg/h",
            tr.t(throughput_key),
            result.wet_throughput_kg_per_h
        ),
    ];
    if let Some(v) = result.dry_volume_m3_per_h {
        lines.push(format!("{}: {:.3} m3/h", tr.t(keys::RESULT_DRY_VOLUME), v));
    }
    if let Some(v) = result.total_volume_m3_per_h {
        lines.push(format!("{}: {:.3} m3/h", tr.t(keys::RESULT_TOTAL_VOLUME), v));
    }
    if let Some(fill) = result.fill_degree_pct {
        lines.push(format!("{}: {:.1} %", tr.t(keys::RESULT_FILL_DEGREE), fill));
    }
    lines.push(format!(
        "{}: {:.2} kg",
        tr.t(material_weight_key(result.mode)),
        result.material_weight_kg
    ));
    lines.push(format!(
        "{}: {}",
        tr.t(keys::RESULT_RETENTION_TIME),
        format_time(result.retention_time_s, units.retention_time)
    ));
    lines
}

/// 노즐 형상 결과(지표, 단면 꼭짓점, 3D 격자 크기)를 출력한다.
pub fn print_nozzle_geometry(
    tr: &Translator,
    units: &DisplayUnits,
    input: &NozzleInputs,
    geometry: &NozzleGeometry,
) {
    let m = &geometry.metrics;
    let area = units.open_area;
    println!(
        "{}: {}",
        tr.t(keys::RESULT_OPEN_AREA_ONE),
        format_area(m.open_area_one_hole_mm2, area)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_TOTAL_OPEN_AREA),
        format_area(m.total_open_area_mm2, area)
    );
    println!(
        "{}: {}/(t/h)",
        tr.t(keys::RESULT_OPEN_AREA_PER_THROUGHPUT),
        format_area(m.open_area_per_throughput, area)
    );
    println!(
        "{}: {:.1} mm3",
        tr.t(keys::RESULT_HOLE_VOLUME),
        m.hole_volume_mm3
    );
    if let Some(angle) = m.implied_cone_half_angle_deg {
        println!(
            "{}: {:.1}° ({} {:.0}°)",
            tr.t(keys::RESULT_IMPLIED_ANGLE),
            angle,
            tr.t(keys::NOZZLE_CONE_ANGLE),
            input.cone_angle_deg
        );
    }
    println!(
        "{}: {}",
        tr.t(keys::RESULT_PROFILE_CONE),
        format_polygon(&geometry.profile.cone)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_PROFILE_CHANNEL),
        format_polygon(&geometry.profile.channel)
    );
    println!(
        "{}: {}x{} + {}x{}",
        tr.t(keys::RESULT_SOLID_GRID),
        geometry.solid.cone.rows(),
        geometry.solid.cone.cols(),
        geometry.solid.channel.rows(),
        geometry.solid.channel.cols()
    );
    print_warnings(tr, &m.warnings);
}

fn print_warnings(tr: &Translator, warnings: &[String]) {
    for w in warnings {
        println!("{}: {w}", tr.t(keys::WARNING_PREFIX));
    }
}

/// 초 단위 시간을 표시 단위로 바꿔 문자열로 만든다.
pub fn format_time(seconds: f64, unit: TimeUnit) -> String {
    format!(
        "{:.2} {}",
        convert_time(seconds, TimeUnit::Second, unit),
        unit.symbol()
    )
}

/// mm² 면적을 표시 단위로 바꿔 문자열로 만든다.
pub fn format_area(mm2: f64, unit: AreaUnit) -> String {
    let v = convert_area(mm2, AreaUnit::SquareMillimeter, unit);
    if v.abs() >= 0.01 || v == 0.0 {
        format!("{v:.2} {}", unit.symbol())
    } else {
        format!("{v:.3e} {}", unit.symbol())
    }
}

fn format_polygon(points: &[ProfilePoint]) -> String {
    points
        .iter()
        .map(|p| format!("({:.2}, {:.2})", p.radius, p.depth))
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 한 줄을 읽는다. 0바이트(EOF)는 빈 줄이 아니라 `UnexpectedEof` 오류다.
fn read_line_from(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "입력이 끝났습니다").into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// `label [기본값]: ` 형식으로 묻고, 빈 입력이면 기본값을 쓴다. 범위를 벗어나면 다시 묻는다.
fn read_f64_or(
    tr: &Translator,
    label: &str,
    default: f64,
    range: InputRange,
) -> Result<f64, AppError> {
    let prompt = format!("{label} [{default}]: ");
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) if range.contains(v) => return Ok(v),
            Ok(_) => println!("{}", tr.t(keys::ERROR_OUT_OF_RANGE)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_formats_in_minutes() {
        assert_eq!(format_time(2640.0, TimeUnit::Minute), "44.00 min");
    }

    #[test]
    fn tiny_areas_use_scientific_notation() {
        assert_eq!(format_area(78.54, AreaUnit::SquareMillimeter), "78.54 mm²");
        assert!(format_area(78.54, AreaUnit::SquareMeter).contains('e'));
    }

    #[test]
    fn closed_stdin_exits_the_menu() {
        let tr = Translator::new("en");
        let choice = main_menu_from(&tr, &mut &b""[..]).unwrap();
        assert_eq!(choice, MenuChoice::Exit);
    }

    #[test]
    fn menu_retries_until_valid_selection() {
        let tr = Translator::new("en");
        let choice = main_menu_from(&tr, &mut &b"9\n\n1\n"[..]).unwrap();
        assert_eq!(choice, MenuChoice::FlowBalance);
    }

    #[test]
    fn end_of_input_is_not_an_empty_line() {
        let err = read_line_from(&mut &b""[..], "> ").unwrap_err();
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert_eq!(read_line_from(&mut &b"\n"[..], "> ").unwrap(), "\n");
    }

    #[test]
    fn material_weight_label_follows_mode() {
        let tr = Translator::new("en");
        let units = DisplayUnits::default();
        let input = FlowInputs::default();

        let mass = flow::compute_flow_balance(&input, FlowMode::MassReference).unwrap();
        let lines = flow_result_lines(&tr, &units, &mass);
        assert!(lines.iter().any(|l| l == "Material weight in vessel: 1000.00 kg"));
        assert!(!lines.iter().any(|l| l.contains("incl. moisture")));

        let density = flow::compute_flow_balance(&input, FlowMode::DensityVolume).unwrap();
        let lines = flow_result_lines(&tr, &units, &density);
        assert!(lines.iter().any(|l| l == "Material weight incl. moisture: 550.00 kg"));
    }
}
