use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 밀리미터이다 (타공판 치수가 mm 단위로 입력된다).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
}

fn to_millimeter(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value,
        LengthUnit::Centimeter => value * 10.0,
        LengthUnit::Meter => value * 1000.0,
        LengthUnit::Inch => value * 25.4,
    }
}

fn from_millimeter(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Centimeter => value_mm / 10.0,
        LengthUnit::Meter => value_mm / 1000.0,
        LengthUnit::Inch => value_mm / 25.4,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    from_millimeter(to_millimeter(value, from), to)
}
