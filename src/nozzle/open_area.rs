use std::f64::consts::PI;

/// 노즐형 타공 개구면적 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleResult {
    /// 구멍 1개의 개구면적(mm²). 최종 직경 기준
    pub open_area_one_hole_mm2: f64,
    /// 타공판 전체 개구면적(mm²)
    pub total_open_area_mm2: f64,
    /// 처리량당 개구면적(mm² / (t/h))
    pub open_area_per_throughput: f64,
    /// 구멍 1개의 체적(mm³). 원뿔대 + 원통
    pub hole_volume_mm3: f64,
    /// 형상에서 역산한 원뿔 반각(°). 원뿔 길이가 0이면 None
    pub implied_cone_half_angle_deg: Option<f64>,
    /// 경고/주의 메시지
    pub warnings: Vec<String>,
}

/// 최종 직경 기준 구멍 1개의 개구면적.
pub fn open_area_one_hole(final_diameter_mm: f64) -> f64 {
    let r = final_diameter_mm / 2.0;
    PI * r * r
}

/// 구멍 수만큼 곱한 전체 개구면적.
pub fn total_open_area(open_area_one_hole_mm2: f64, num_holes: u32) -> f64 {
    open_area_one_hole_mm2 * f64::from(num_holes)
}

/// 처리량당 개구면적. 처리량 검증은 호출 측 책임이다.
pub fn open_area_per_throughput(total_open_area_mm2: f64, throughput_t_per_h: f64) -> f64 {
    total_open_area_mm2 / throughput_t_per_h
}

/// 원뿔대(입구 반경 `rc`, 목 반경 `rf`, 길이 `lc`)와 원통(반경 `rf`, 길이 `lch`)의 체적 합.
pub fn hole_volume(rc: f64, rf: f64, lc: f64, lch: f64) -> f64 {
    let frustum = PI * lc / 3.0 * (rc * rc + rc * rf + rf * rf);
    let channel = PI * rf * rf * lch;
    frustum + channel
}

/// 원뿔 테이퍼에서 역산한 반각(°).
pub fn implied_half_angle_deg(rc: f64, rf: f64, lc: f64) -> Option<f64> {
    if lc > 0.0 {
        Some(((rc - rf) / lc).atan().to_degrees())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_cylinder_volume() {
        // 원뿔 구간이 없으면 원통 체적만 남는다.
        let v = hole_volume(5.0, 5.0, 0.0, 10.0);
        assert!((v - PI * 25.0 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn forty_five_degree_taper() {
        let a = implied_half_angle_deg(10.0, 5.0, 5.0).unwrap();
        assert!((a - 45.0).abs() < 1e-9);
        assert!(implied_half_angle_deg(10.0, 5.0, 0.0).is_none());
    }
}
