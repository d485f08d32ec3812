use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const WARNING_PREFIX: &str = "general.warning_prefix";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FLOW: &str = "main_menu.flow";
    pub const MAIN_MENU_NOZZLE: &str = "main_menu.nozzle";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_OUT_OF_RANGE: &str = "error.out_of_range";

    pub const FLOW_HEADING: &str = "flow.heading";
    pub const FLOW_MODE_OPTIONS: &str = "flow.mode_options";
    pub const FLOW_DRY_FEED: &str = "flow.dry_feed";
    pub const FLOW_MOISTURE: &str = "flow.moisture";
    pub const FLOW_VESSEL_VOLUME: &str = "flow.vessel_volume";
    pub const FLOW_BULK_DENSITY: &str = "flow.bulk_density";
    pub const FLOW_LIQUID: &str = "flow.liquid";
    pub const FLOW_MATERIAL_WEIGHT: &str = "flow.material_weight";
    pub const FLOW_WATER_INPUT: &str = "flow.water_input";

    pub const RESULT_MODE_A: &str = "result.mode_a";
    pub const RESULT_MODE_B: &str = "result.mode_b";
    pub const RESULT_WET_THROUGHPUT: &str = "result.wet_throughput";
    pub const RESULT_TOTAL_MASS_INPUT: &str = "result.total_mass_input";
    pub const RESULT_DRY_VOLUME: &str = "result.dry_volume";
    pub const RESULT_TOTAL_VOLUME: &str = "result.total_volume";
    pub const RESULT_FILL_DEGREE: &str = "result.fill_degree";
    pub const RESULT_MATERIAL_WEIGHT: &str = "result.material_weight";
    pub const RESULT_VESSEL_MATERIAL_WEIGHT: &str = "result.vessel_material_weight";
    pub const RESULT_RETENTION_TIME: &str = "result.retention_time";

    pub const NOZZLE_HEADING: &str = "nozzle.heading";
    pub const NOZZLE_PLATE_THICKNESS: &str = "nozzle.plate_thickness";
    pub const NOZZLE_CONE_DIAMETER: &str = "nozzle.cone_diameter";
    pub const NOZZLE_FINAL_DIAMETER: &str = "nozzle.final_diameter";
    pub const NOZZLE_CONE_ANGLE: &str = "nozzle.cone_angle";
    pub const NOZZLE_CONE_LENGTH: &str = "nozzle.cone_length";
    pub const NOZZLE_CHANNEL_LENGTH: &str = "nozzle.channel_length";
    pub const NOZZLE_NUM_HOLES: &str = "nozzle.num_holes";
    pub const NOZZLE_THROUGHPUT: &str = "nozzle.throughput";

    pub const RESULT_OPEN_AREA_ONE: &str = "result.open_area_one";
    pub const RESULT_TOTAL_OPEN_AREA: &str = "result.total_open_area";
    pub const RESULT_OPEN_AREA_PER_THROUGHPUT: &str = "result.open_area_per_throughput";
    pub const RESULT_HOLE_VOLUME: &str = "result.hole_volume";
    pub const RESULT_IMPLIED_ANGLE: &str = "result.implied_angle";
    pub const RESULT_PROFILE_CONE: &str = "result.profile_cone";
    pub const RESULT_PROFILE_CHANNEL: &str = "result.profile_channel";
    pub const RESULT_SOLID_GRID: &str = "result.solid_grid";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_TIME_UNIT: &str = "settings.prompt_time_unit";
    pub const SETTINGS_PROMPT_AREA_UNIT: &str = "settings.prompt_area_unit";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            tracing::debug!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 키 자체 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        builtin.unwrap_or(key).to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        WARNING_PREFIX => "주의",
        MAIN_MENU_TITLE => "\n=== Process Sizing Toolbox ===",
        MAIN_MENU_FLOW => "1) 용기 물질수지 / 체류시간",
        MAIN_MENU_NOZZLE => "2) 노즐형 타공 개구면적",
        MAIN_MENU_UNIT_CONVERSION => "3) 단위 변환기",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_OUT_OF_RANGE => "허용 범위를 벗어났습니다.",
        FLOW_HEADING => "\n-- 용기 물질수지 --",
        FLOW_MODE_OPTIONS => "1) 재료 질량 기준(모드 A)  2) 밀도/체적 기준(모드 B)",
        FLOW_DRY_FEED => "건조 원료 투입량 [kg/h]",
        FLOW_MOISTURE => "원료 함수율 [%]",
        FLOW_VESSEL_VOLUME => "용기 체적 [m3]",
        FLOW_BULK_DENSITY => "벌크 밀도 [g/L]",
        FLOW_LIQUID => "액체 투입량",
        FLOW_MATERIAL_WEIGHT => "용기 내 재료 질량 [kg]",
        FLOW_WATER_INPUT => "물 투입량 [kg/h]",
        RESULT_MODE_A => "모드 A (재료 질량 기준)",
        RESULT_MODE_B => "모드 B (밀도/체적 기준)",
        RESULT_WET_THROUGHPUT => "습량 처리량",
        RESULT_TOTAL_MASS_INPUT => "총 질량 투입량",
        RESULT_DRY_VOLUME => "건조 원료 체적",
        RESULT_TOTAL_VOLUME => "총 투입 체적",
        RESULT_FILL_DEGREE => "충전율",
        RESULT_MATERIAL_WEIGHT => "수분 포함 재료 질량",
        RESULT_VESSEL_MATERIAL_WEIGHT => "용기 내 재료 질량",
        RESULT_RETENTION_TIME => "체류시간",
        NOZZLE_HEADING => "\n-- 노즐형 타공 --",
        NOZZLE_PLATE_THICKNESS => "판 두께 [mm]",
        NOZZLE_CONE_DIAMETER => "원뿔 입구 직경 [mm]",
        NOZZLE_FINAL_DIAMETER => "최종 구멍 직경 [mm]",
        NOZZLE_CONE_ANGLE => "원뿔 각도 [°]",
        NOZZLE_CONE_LENGTH => "원뿔 길이 [mm]",
        NOZZLE_CHANNEL_LENGTH => "채널(랜드) 길이 [mm]",
        NOZZLE_NUM_HOLES => "필요 구멍 수",
        NOZZLE_THROUGHPUT => "건조 원료 처리량 [t/h]",
        RESULT_OPEN_AREA_ONE => "구멍 1개 개구면적",
        RESULT_TOTAL_OPEN_AREA => "전체 개구면적",
        RESULT_OPEN_AREA_PER_THROUGHPUT => "처리량당 개구면적",
        RESULT_HOLE_VOLUME => "구멍 1개 체적",
        RESULT_IMPLIED_ANGLE => "형상 기준 원뿔 반각",
        RESULT_PROFILE_CONE => "단면 - 원뿔",
        RESULT_PROFILE_CHANNEL => "단면 - 채널",
        RESULT_SOLID_GRID => "3D 격자(각도×깊이)",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => {
            "1) 길이  2) 면적  3) 체적  4) 질량  5) 질량유량  6) 밀도  7) 시간"
        }
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위: ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위: ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어(auto/ko/en, 엔터=유지): ",
        SETTINGS_PROMPT_TIME_UNIT => "체류시간 표시 단위(s/min/h, 엔터=유지): ",
        SETTINGS_PROMPT_AREA_UNIT => "개구면적 표시 단위(mm2/cm2/m2/in2, 엔터=유지): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        WARNING_PREFIX => "Warning",
        MAIN_MENU_TITLE => "\n=== Process Sizing Toolbox ===",
        MAIN_MENU_FLOW => "1) Vessel flow balance / retention",
        MAIN_MENU_NOZZLE => "2) Nozzle perforation open area",
        MAIN_MENU_UNIT_CONVERSION => "3) Unit converter",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_OUT_OF_RANGE => "Value is out of the allowed range.",
        FLOW_HEADING => "\n-- Vessel Flow Balance --",
        FLOW_MODE_OPTIONS => "1) Material-mass reference (mode A)  2) Density/volume reference (mode B)",
        FLOW_DRY_FEED => "Dry feed rate [kg/h]",
        FLOW_MOISTURE => "Moisture content [%]",
        FLOW_VESSEL_VOLUME => "Vessel volume [m3]",
        FLOW_BULK_DENSITY => "Bulk density [g/L]",
        FLOW_LIQUID => "Liquid input",
        FLOW_MATERIAL_WEIGHT => "Material weight in vessel [kg]",
        FLOW_WATER_INPUT => "Water input [kg/h]",
        RESULT_MODE_A => "Mode A (material-mass reference)",
        RESULT_MODE_B => "Mode B (density/volume reference)",
        RESULT_WET_THROUGHPUT => "Wet throughput",
        RESULT_TOTAL_MASS_INPUT => "Total mass input",
        RESULT_DRY_VOLUME => "Dry material volume",
        RESULT_TOTAL_VOLUME => "Total volume input",
        RESULT_FILL_DEGREE => "Fill degree",
        RESULT_MATERIAL_WEIGHT => "Material weight incl. moisture",
        RESULT_VESSEL_MATERIAL_WEIGHT => "Material weight in vessel",
        RESULT_RETENTION_TIME => "Retention time",
        NOZZLE_HEADING => "\n-- Nozzle-Shaped Perforation --",
        NOZZLE_PLATE_THICKNESS => "Plate thickness [mm]",
        NOZZLE_CONE_DIAMETER => "Cone opening diameter [mm]",
        NOZZLE_FINAL_DIAMETER => "Final hole diameter [mm]",
        NOZZLE_CONE_ANGLE => "Cone angle [°]",
        NOZZLE_CONE_LENGTH => "Cone length [mm]",
        NOZZLE_CHANNEL_LENGTH => "Channel (land) length [mm]",
        NOZZLE_NUM_HOLES => "Number of holes",
        NOZZLE_THROUGHPUT => "Dry material throughput [t/h]",
        RESULT_OPEN_AREA_ONE => "Open area of one hole",
        RESULT_TOTAL_OPEN_AREA => "Total plate open area",
        RESULT_OPEN_AREA_PER_THROUGHPUT => "Open area per throughput",
        RESULT_HOLE_VOLUME => "Volume of one hole",
        RESULT_IMPLIED_ANGLE => "Implied cone half-angle",
        RESULT_PROFILE_CONE => "Cross-section - cone",
        RESULT_PROFILE_CHANNEL => "Cross-section - channel",
        RESULT_SOLID_GRID => "3D grid (angle x depth)",
        UNIT_CONVERSION_HEADING => "\n-- Unit Converter --",
        UNIT_CONVERSION_OPTIONS => {
            "1) Length  2) Area  3) Volume  4) Mass  5) Mass flow  6) Density  7) Time"
        }
        UNIT_CONVERSION_PROMPT_KIND => "Enter item number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit: ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit: ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported number.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en, Enter=keep): ",
        SETTINGS_PROMPT_TIME_UNIT => "Retention time unit (s/min/h, Enter=keep): ",
        SETTINGS_PROMPT_AREA_UNIT => "Open area unit (mm2/cm2/m2/in2, Enter=keep): ",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting.");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[result]\nfill_degree = \"Füllgrad\"\n").unwrap();
        assert_eq!(map.get("result.fill_degree").map(String::as_str), Some("Füllgrad"));
    }

    #[test]
    fn bundled_korean_pack_parses() {
        let map = parse_toml_to_map(include_str!("../locales/ko.toml")).unwrap();
        assert_eq!(map.get("gui.settings.lang.auto").map(String::as_str), Some("시스템"));
        assert!(map.contains_key("gui.unit.quantity.mass_flow"));
    }
}
