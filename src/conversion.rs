use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `mm`, `mm2`, `m3`, `t/h`, `g/L`, `min` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
        QuantityKind::Area => {
            let from = parse_area_unit(from_unit_str)?;
            let to = parse_area_unit(to_unit_str)?;
            Ok(convert_area(value, from, to))
        }
        QuantityKind::Volume => {
            let from = parse_volume_unit(from_unit_str)?;
            let to = parse_volume_unit(to_unit_str)?;
            Ok(convert_volume(value, from, to))
        }
        QuantityKind::Mass => {
            let from = parse_mass_unit(from_unit_str)?;
            let to = parse_mass_unit(to_unit_str)?;
            Ok(convert_mass(value, from, to))
        }
        QuantityKind::MassFlow => {
            let from = parse_mass_flow_unit(from_unit_str)?;
            let to = parse_mass_flow_unit(to_unit_str)?;
            Ok(convert_mass_flow(value, from, to))
        }
        QuantityKind::Density => {
            let from = parse_density_unit(from_unit_str)?;
            let to = parse_density_unit(to_unit_str)?;
            Ok(convert_density(value, from, to))
        }
        QuantityKind::Time => {
            let from = parse_time_unit(from_unit_str)?;
            let to = parse_time_unit(to_unit_str)?;
            Ok(convert_time(value, from, to))
        }
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_area_unit(s: &str) -> Result<AreaUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm2" | "mm^2" | "mm²" => Ok(AreaUnit::SquareMillimeter),
        "cm2" | "cm^2" | "cm²" => Ok(AreaUnit::SquareCentimeter),
        "m2" | "m^2" | "m²" | "sqm" => Ok(AreaUnit::SquareMeter),
        "in2" | "in^2" | "in²" | "sqin" => Ok(AreaUnit::SquareInch),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_volume_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m3" | "m^3" | "m³" => Ok(VolumeUnit::CubicMeter),
        "l" | "liter" | "litre" => Ok(VolumeUnit::Liter),
        "mm3" | "mm^3" | "mm³" => Ok(VolumeUnit::CubicMillimeter),
        "ft3" | "ft^3" | "cuft" => Ok(VolumeUnit::CubicFoot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_mass_unit(s: &str) -> Result<MassUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg" => Ok(MassUnit::Kilogram),
        "g" => Ok(MassUnit::Gram),
        "t" | "tonne" | "ton" => Ok(MassUnit::Tonne),
        "lb" | "lbs" | "lbm" => Ok(MassUnit::Pound),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_mass_flow_unit(s: &str) -> Result<MassFlowUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg/h" | "kgh" => Ok(MassFlowUnit::KilogramPerHour),
        "kg/s" | "kgs" => Ok(MassFlowUnit::KilogramPerSecond),
        "t/h" | "tph" => Ok(MassFlowUnit::TonnePerHour),
        "lb/h" | "lb/hr" => Ok(MassFlowUnit::PoundPerHour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_density_unit(s: &str) -> Result<DensityUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg/m3" | "kg/m^3" | "kg/m³" => Ok(DensityUnit::KilogramPerCubicMeter),
        "g/l" => Ok(DensityUnit::GramPerLiter),
        "kg/l" => Ok(DensityUnit::KilogramPerLiter),
        "lb/ft3" | "lb/ft^3" => Ok(DensityUnit::PoundPerCubicFoot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_time_unit(s: &str) -> Result<TimeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "s" | "sec" | "second" => Ok(TimeUnit::Second),
        "min" | "minute" => Ok(TimeUnit::Minute),
        "h" | "hr" | "hour" => Ok(TimeUnit::Hour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
