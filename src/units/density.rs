use serde::{Deserialize, Serialize};

/// 밀도 단위. 내부 기준은 kg/m³이다.
///
/// 벌크 밀도는 현장에서 g/L로 측정되는 경우가 많아 g/L → kg/L → kg/m³ 경로를
/// 그대로 표현할 수 있도록 kg/L도 별도 단위로 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnit {
    KilogramPerCubicMeter,
    GramPerLiter,
    KilogramPerLiter,
    PoundPerCubicFoot,
}

fn to_kg_per_m3(value: f64, unit: DensityUnit) -> f64 {
    match unit {
        DensityUnit::KilogramPerCubicMeter => value,
        DensityUnit::GramPerLiter => value,
        DensityUnit::KilogramPerLiter => value * 1000.0,
        DensityUnit::PoundPerCubicFoot => value * 16.018463,
    }
}

fn from_kg_per_m3(value: f64, unit: DensityUnit) -> f64 {
    match unit {
        DensityUnit::KilogramPerCubicMeter => value,
        DensityUnit::GramPerLiter => value,
        DensityUnit::KilogramPerLiter => value / 1000.0,
        DensityUnit::PoundPerCubicFoot => value / 16.018463,
    }
}

/// 밀도를 변환한다.
pub fn convert_density(value: f64, from: DensityUnit, to: DensityUnit) -> f64 {
    from_kg_per_m3(to_kg_per_m3(value, from), to)
}
