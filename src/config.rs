use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::flow::{FlowInputs, FlowMode};
use crate::nozzle::{NozzleInputs, SolidResolution};
use crate::units::{AreaUnit, TimeUnit};

/// 기본 설정 파일 경로(작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 결과 표시 단위. 계산은 항상 내부 기준 단위(s, mm²)로 이루어진다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub retention_time: TimeUnit,
    pub open_area: AreaUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            retention_time: TimeUnit::Second,
            open_area: AreaUnit::SquareMillimeter,
        }
    }
}

/// 입력 위젯/프롬프트의 허용 범위. 모델 밖의 표시 계층 설정이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: Option<f64>, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let v = value.max(self.min);
        self.max.map_or(v, |max| v.min(max))
    }
}

/// 입력 항목별 범위 표.
pub mod ranges {
    use super::InputRange;

    pub const DRY_FEED_KG_PER_H: InputRange = InputRange::new(0.0, None, 10.0);
    pub const MOISTURE_PCT: InputRange = InputRange::new(0.0, Some(100.0), 1.0);
    pub const VESSEL_VOLUME_M3: InputRange = InputRange::new(0.1, None, 0.1);
    pub const BULK_DENSITY_G_PER_L: InputRange = InputRange::new(1.0, None, 10.0);
    pub const LIQUID_KG_PER_H: InputRange = InputRange::new(0.0, None, 10.0);
    pub const WATER_KG_PER_H: InputRange = InputRange::new(0.0, None, 10.0);
    pub const MATERIAL_WEIGHT_KG: InputRange = InputRange::new(0.0, None, 10.0);

    pub const PLATE_THICKNESS_MM: InputRange = InputRange::new(5.0, Some(100.0), 1.0);
    pub const CONE_DIAMETER_MM: InputRange = InputRange::new(5.0, Some(50.0), 1.0);
    pub const FINAL_DIAMETER_MM: InputRange = InputRange::new(1.0, Some(30.0), 1.0);
    pub const CONE_ANGLE_DEG: InputRange = InputRange::new(10.0, Some(80.0), 1.0);
    pub const NUM_HOLES: InputRange = InputRange::new(1.0, None, 1.0);
    pub const THROUGHPUT_T_PER_H: InputRange = InputRange::new(0.1, None, 0.1);

    /// 원뿔/채널 길이는 판 두께를 상한으로 한다.
    pub fn section_length_mm(plate_thickness_mm: f64) -> InputRange {
        InputRange::new(1.0, Some(plate_thickness_mm.max(1.0)), 1.0)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en)
    pub language: String,
    /// TOML 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도
    pub window_alpha: f32,
    /// GUI 배율
    pub ui_scale: f32,
    /// 시작 시 사용할 물질수지 모드. 없으면 입력값으로 추론한다
    pub flow_mode: Option<FlowMode>,
    pub display_units: DisplayUnits,
    /// 물질수지 입력 기본값
    pub flow: FlowInputs,
    /// 노즐 형상 입력 기본값
    pub nozzle: NozzleInputs,
    pub solid_resolution: SolidResolution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            ui_scale: 1.0,
            flow_mode: None,
            display_units: DisplayUnits::default(),
            flow: FlowInputs::default(),
            nozzle: NozzleInputs::default(),
            solid_resolution: SolidResolution::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(CONFIG_FILE)
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        tracing::warn!(path = %path.display(), "config not found, writing defaults");
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_FILE)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 설정된 모드, 없으면 기본 입력값에서 추론한 모드.
    pub fn effective_flow_mode(&self) -> FlowMode {
        self.flow_mode.unwrap_or_else(|| FlowMode::infer(&self.flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            language = "ko"
            [nozzle]
            num_holes = 250
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.nozzle.num_holes, 250);
        assert_eq!(cfg.nozzle.final_diameter_mm, 10.0);
        assert_eq!(cfg.solid_resolution.depth_samples, 30);
        assert_eq!(cfg.effective_flow_mode(), FlowMode::MassReference);
    }

    #[test]
    fn default_config_roundtrips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back.flow, FlowInputs::default());
        assert_eq!(back.nozzle, NozzleInputs::default());
    }

    #[test]
    fn range_clamps_one_or_both_sides() {
        assert_eq!(ranges::MOISTURE_PCT.clamp(120.0), 100.0);
        assert_eq!(ranges::VESSEL_VOLUME_M3.clamp(0.0), 0.1);
        assert!(ranges::DRY_FEED_KG_PER_H.contains(1e9));
        assert!(!ranges::section_length_mm(20.0).contains(25.0));
    }
}
