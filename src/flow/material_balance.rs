use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::retention::{
    bulk_density_kg_per_m3, fill_degree_pct, retention_time_s, wet_throughput_kg_per_h,
    WATER_DENSITY_KG_PER_M3,
};

/// 물질수지 계산 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowMode {
    /// 모드 A: 용기 내 재료 질량을 기준으로 체류시간을 구한다.
    MassReference,
    /// 모드 B: 벌크 밀도와 용기 체적으로 충전율과 함수율 보정 체류시간을 구한다.
    DensityVolume,
}

impl FlowMode {
    /// 명시적 모드가 없을 때의 우선순위 규칙. 재료 질량이 주어지면 모드 A, 아니면 모드 B.
    pub fn infer(input: &FlowInputs) -> Self {
        if input.material_weight_kg.is_some() {
            FlowMode::MassReference
        } else {
            FlowMode::DensityVolume
        }
    }
}

/// 두 모드를 모두 담는 물질수지 입력 값. 모드와 관계없는 필드는 무시된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowInputs {
    /// 건조 원료 투입량(kg/h)
    pub dry_feed_kg_per_h: f64,
    /// 원료 함수율(%, 0~100). 모드 B에서만 사용
    pub moisture_content_pct: f64,
    /// 용기 체적(m³). 모드 B에서만 사용
    pub vessel_volume_m3: f64,
    /// 벌크 밀도(g/L). 모드 B에서만 사용
    pub bulk_density_g_per_l: f64,
    /// 액체 투입량 목록(kg/h). 모드 A에서만 사용
    pub liquid_inputs_kg_per_h: Vec<f64>,
    /// 용기 내 재료 질량(kg). 모드 A 기준값, 없으면 0으로 본다
    pub material_weight_kg: Option<f64>,
    /// 물 투입량(kg/h). 모드 B에서만 사용, 없으면 0으로 본다
    pub water_input_kg_per_h: Option<f64>,
}

impl Default for FlowInputs {
    fn default() -> Self {
        Self {
            dry_feed_kg_per_h: 500.0,
            moisture_content_pct: 10.0,
            vessel_volume_m3: 2.0,
            bulk_density_g_per_l: 600.0,
            liquid_inputs_kg_per_h: vec![100.0, 50.0, 25.0],
            material_weight_kg: Some(1000.0),
            water_input_kg_per_h: None,
        }
    }
}

/// 물질수지 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowResult {
    /// 계산에 사용된 모드
    pub mode: FlowMode,
    /// 총 질량 투입량(kg/h). 모드 A는 건조+액체, 모드 B는 건조+물
    pub wet_throughput_kg_per_h: f64,
    /// 건조 원료 체적 유량(m³/h). 모드 B에서만 계산
    pub dry_volume_m3_per_h: Option<f64>,
    /// 총 체적 유량(m³/h). 모드 B에서만 계산
    pub total_volume_m3_per_h: Option<f64>,
    /// 충전율(%). 모드 B에서만 계산, 100에서 잘림
    pub fill_degree_pct: Option<f64>,
    /// 재료 질량(kg). 모드 A는 입력한 용기 내 질량, 모드 B는 수분 보정 질량
    pub material_weight_kg: f64,
    /// 평균 체류시간(s)
    pub retention_time_s: f64,
    /// 경고/주의 메시지
    pub warnings: Vec<String>,
}

/// 물질수지 입력이 허용 범위를 벗어났을 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("입력값 오류: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("모드를 지정하지 않고 모드 A(액체 투입량, 재료 질량)와 모드 B(함수율, 용기 체적, 벌크 밀도, 물 투입량) 입력을 함께 주었습니다")]
    AmbiguousMode,
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), FlowError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlowError::InvalidInput {
            field,
            value,
            reason: "0 이상의 유한한 값이어야 합니다",
        })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), FlowError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlowError::InvalidInput {
            field,
            value,
            reason: "0보다 커야 합니다",
        })
    }
}

impl FlowInputs {
    /// 선택한 모드에서 사용하는 필드만 검사한다.
    pub fn validate(&self, mode: FlowMode) -> Result<(), FlowError> {
        require_non_negative("dry_feed_kg_per_h", self.dry_feed_kg_per_h)?;
        match mode {
            FlowMode::MassReference => {
                for liquid in &self.liquid_inputs_kg_per_h {
                    require_non_negative("liquid_inputs_kg_per_h", *liquid)?;
                }
                if let Some(m) = self.material_weight_kg {
                    require_non_negative("material_weight_kg", m)?;
                }
            }
            FlowMode::DensityVolume => {
                require_positive("vessel_volume_m3", self.vessel_volume_m3)?;
                require_positive("bulk_density_g_per_l", self.bulk_density_g_per_l)?;
                require_non_negative("moisture_content_pct", self.moisture_content_pct)?;
                if self.moisture_content_pct > 100.0 {
                    return Err(FlowError::InvalidInput {
                        field: "moisture_content_pct",
                        value: self.moisture_content_pct,
                        reason: "100%를 넘을 수 없습니다",
                    });
                }
                if let Some(w) = self.water_input_kg_per_h {
                    require_non_negative("water_input_kg_per_h", w)?;
                }
            }
        }
        Ok(())
    }
}

/// 선택한 모드로 물질수지, 충전율, 체류시간을 계산한다.
pub fn compute_flow_balance(input: &FlowInputs, mode: FlowMode) -> Result<FlowResult, FlowError> {
    input.validate(mode)?;
    let result = match mode {
        FlowMode::MassReference => mass_reference(input),
        FlowMode::DensityVolume => density_volume(input),
    };
    tracing::debug!(
        ?mode,
        wet_throughput = result.wet_throughput_kg_per_h,
        retention_s = result.retention_time_s,
        fill_pct = ?result.fill_degree_pct,
        "flow balance computed"
    );
    Ok(result)
}

fn mass_reference(input: &FlowInputs) -> FlowResult {
    let wet = wet_throughput_kg_per_h(input.dry_feed_kg_per_h, &input.liquid_inputs_kg_per_h);
    let material = input.material_weight_kg.unwrap_or(0.0);
    let retention = retention_time_s(material, wet);

    let mut warnings = Vec::new();
    if wet <= 0.0 {
        warnings.push("습량 처리량이 0이므로 체류시간을 0으로 표시합니다.".into());
    }

    FlowResult {
        mode: FlowMode::MassReference,
        wet_throughput_kg_per_h: wet,
        dry_volume_m3_per_h: None,
        total_volume_m3_per_h: None,
        fill_degree_pct: None,
        material_weight_kg: material,
        retention_time_s: retention,
        warnings,
    }
}

fn density_volume(input: &FlowInputs) -> FlowResult {
    let feed = input.dry_feed_kg_per_h;
    let water = input.water_input_kg_per_h.unwrap_or(0.0);
    let total_mass = feed + water;

    let rho_bulk = bulk_density_kg_per_m3(input.bulk_density_g_per_l);
    let dry_volume = feed / rho_bulk;
    let total_volume = dry_volume + water / WATER_DENSITY_KG_PER_M3;
    let fill = fill_degree_pct(total_volume, input.vessel_volume_m3);

    let material = feed * (1.0 + input.moisture_content_pct / 100.0);
    let retention = retention_time_s(material, total_mass);

    let mut warnings = Vec::new();
    if total_volume >= input.vessel_volume_m3 {
        tracing::warn!(
            total_volume,
            vessel_volume = input.vessel_volume_m3,
            "fill degree clamped to 100%"
        );
        warnings.push(format!(
            "투입 체적 {:.3} m³/h가 용기 체적 {:.3} m³ 이상입니다. 충전율을 100%로 제한합니다.",
            total_volume, input.vessel_volume_m3
        ));
    }
    if total_mass <= 0.0 {
        warnings.push("총 투입량이 0이므로 체류시간을 0으로 표시합니다.".into());
    }

    FlowResult {
        mode: FlowMode::DensityVolume,
        wet_throughput_kg_per_h: total_mass,
        dry_volume_m3_per_h: Some(dry_volume),
        total_volume_m3_per_h: Some(total_volume),
        fill_degree_pct: Some(fill),
        material_weight_kg: material,
        retention_time_s: retention,
        warnings,
    }
}
