use crate::units::{convert_density, DensityUnit};

/// 시간당 유량을 초 단위 체류시간으로 바꾸는 계수.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// 물 투입량을 체적으로 환산할 때 쓰는 물 밀도(kg/m³).
pub const WATER_DENSITY_KG_PER_M3: f64 = 1000.0;
/// 충전율 상한(%).
pub const MAX_FILL_DEGREE_PCT: f64 = 100.0;

/// 건조 투입량과 액체 투입량들을 합산한 습량 처리량(kg/h).
pub fn wet_throughput_kg_per_h(dry_feed_kg_per_h: f64, liquids_kg_per_h: &[f64]) -> f64 {
    dry_feed_kg_per_h + liquids_kg_per_h.iter().sum::<f64>()
}

/// 용기 내 재료 질량과 처리량으로 평균 체류시간(s)을 구한다.
///
/// 처리량이 0 이하이면 나눗셈 없이 0을 반환한다.
pub fn retention_time_s(material_kg: f64, throughput_kg_per_h: f64) -> f64 {
    if throughput_kg_per_h > 0.0 {
        (material_kg / throughput_kg_per_h) * SECONDS_PER_HOUR
    } else {
        0.0
    }
}

/// 용기 체적 대비 투입 체적의 백분율. 상한만 100%로 자르고 하한은 두지 않는다.
pub fn fill_degree_pct(total_volume_m3: f64, vessel_volume_m3: f64) -> f64 {
    ((total_volume_m3 / vessel_volume_m3) * 100.0).min(MAX_FILL_DEGREE_PCT)
}

/// g/L로 입력된 벌크 밀도를 kg/L을 거쳐 kg/m³로 환산한다.
///
/// 두 단계 변환의 계수는 서로 상쇄되므로 수치는 입력값과 같다.
pub fn bulk_density_kg_per_m3(bulk_density_g_per_l: f64) -> f64 {
    let kg_per_l = convert_density(
        bulk_density_g_per_l,
        DensityUnit::GramPerLiter,
        DensityUnit::KilogramPerLiter,
    );
    convert_density(
        kg_per_l,
        DensityUnit::KilogramPerLiter,
        DensityUnit::KilogramPerCubicMeter,
    )
}
