use serde::{Deserialize, Serialize};

/// 질량 유량 단위. 내부 기준은 kg/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassFlowUnit {
    KilogramPerHour,
    KilogramPerSecond,
    TonnePerHour,
    PoundPerHour,
}

fn to_kg_per_h(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerHour => value,
        MassFlowUnit::KilogramPerSecond => value * 3600.0,
        MassFlowUnit::TonnePerHour => value * 1000.0,
        MassFlowUnit::PoundPerHour => value * 0.453592,
    }
}

fn from_kg_per_h(value: f64, unit: MassFlowUnit) -> f64 {
    match unit {
        MassFlowUnit::KilogramPerHour => value,
        MassFlowUnit::KilogramPerSecond => value / 3600.0,
        MassFlowUnit::TonnePerHour => value / 1000.0,
        MassFlowUnit::PoundPerHour => value / 0.453592,
    }
}

/// 질량 유량을 변환한다.
pub fn convert_mass_flow(value: f64, from: MassFlowUnit, to: MassFlowUnit) -> f64 {
    from_kg_per_h(to_kg_per_h(value, from), to)
}
