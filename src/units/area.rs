use serde::{Deserialize, Serialize};

/// 면적 단위. 내부 기준은 제곱밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    SquareInch,
}

impl AreaUnit {
    /// 화면 표시용 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMillimeter => "mm²",
            AreaUnit::SquareCentimeter => "cm²",
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareInch => "in²",
        }
    }
}

fn to_square_millimeter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value,
        AreaUnit::SquareCentimeter => value * 100.0,
        AreaUnit::SquareMeter => value * 1_000_000.0,
        AreaUnit::SquareInch => value * 645.16,
    }
}

fn from_square_millimeter(value_mm2: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMillimeter => value_mm2,
        AreaUnit::SquareCentimeter => value_mm2 / 100.0,
        AreaUnit::SquareMeter => value_mm2 / 1_000_000.0,
        AreaUnit::SquareInch => value_mm2 / 645.16,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    from_square_millimeter(to_square_millimeter(value, from), to)
}
