use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::open_area::{
    hole_volume, implied_half_angle_deg, open_area_one_hole, open_area_per_throughput,
    total_open_area, NozzleResult,
};
use super::profile::NozzleGeometryProfile;
use super::solid::{NozzleSolid, SolidResolution};

/// 노즐형 타공 형상 입력 값. 길이는 모두 mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozzleInputs {
    /// 타공판 총 두께(mm)
    pub plate_thickness_mm: f64,
    /// 원뿔 입구 직경(mm)
    pub cone_diameter_mm: f64,
    /// 최종(채널) 직경(mm)
    pub final_diameter_mm: f64,
    /// 원뿔 반각(°). 참고값으로 면적/체적 계산에는 쓰지 않는다
    pub cone_angle_deg: f64,
    /// 원뿔 길이(mm)
    pub cone_length_mm: f64,
    /// 채널(랜드) 길이(mm). 없으면 `판 두께 - 원뿔 길이`
    pub channel_length_mm: Option<f64>,
    /// 필요한 구멍 수
    pub num_holes: u32,
    /// 건조 원료 처리량(t/h)
    pub throughput_t_per_h: f64,
}

impl Default for NozzleInputs {
    fn default() -> Self {
        Self {
            plate_thickness_mm: 20.0,
            cone_diameter_mm: 20.0,
            final_diameter_mm: 10.0,
            cone_angle_deg: 45.0,
            cone_length_mm: 10.0,
            channel_length_mm: None,
            num_holes: 100,
            throughput_t_per_h: 10.0,
        }
    }
}

impl NozzleInputs {
    /// 채널 길이. 별도 입력이 없으면 판 두께에서 원뿔 길이를 뺀 값.
    pub fn effective_channel_length_mm(&self) -> f64 {
        self.channel_length_mm
            .unwrap_or(self.plate_thickness_mm - self.cone_length_mm)
    }

    /// 치수/구멍 수/처리량의 경계 조건을 검사한다.
    ///
    /// 원뿔 + 채널 길이가 판 두께를 넘는 경우는 오류가 아니라 경고로 처리한다.
    pub fn validate(&self) -> Result<(), NozzleError> {
        let lengths = [
            ("plate_thickness_mm", self.plate_thickness_mm),
            ("cone_diameter_mm", self.cone_diameter_mm),
            ("cone_length_mm", self.cone_length_mm),
            ("channel_length_mm", self.effective_channel_length_mm()),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(NozzleError::InvalidInput {
                    field,
                    value,
                    reason: "음수가 아닌 유한한 길이여야 합니다",
                });
            }
        }
        if !self.final_diameter_mm.is_finite() || self.final_diameter_mm <= 0.0 {
            return Err(NozzleError::InvalidInput {
                field: "final_diameter_mm",
                value: self.final_diameter_mm,
                reason: "0보다 커야 합니다",
            });
        }
        if self.num_holes == 0 {
            return Err(NozzleError::InvalidInput {
                field: "num_holes",
                value: 0.0,
                reason: "구멍은 1개 이상이어야 합니다",
            });
        }
        if !self.throughput_t_per_h.is_finite() || self.throughput_t_per_h <= 0.0 {
            return Err(NozzleError::InvalidInput {
                field: "throughput_t_per_h",
                value: self.throughput_t_per_h,
                reason: "0보다 커야 합니다",
            });
        }
        Ok(())
    }
}

/// 노즐 형상 입력이 허용 범위를 벗어났을 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NozzleError {
    #[error("입력값 오류: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// 개구면적 지표, 2D 단면, 3D 회전체를 한 번에 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleGeometry {
    pub metrics: NozzleResult,
    pub profile: NozzleGeometryProfile,
    pub solid: NozzleSolid,
}

/// 기준 해상도(30×30)로 노즐 형상을 계산한다.
pub fn compute_nozzle_geometry(input: &NozzleInputs) -> Result<NozzleGeometry, NozzleError> {
    compute_nozzle_geometry_with(input, SolidResolution::default())
}

/// 지정한 회전체 해상도로 노즐 형상을 계산한다.
pub fn compute_nozzle_geometry_with(
    input: &NozzleInputs,
    resolution: SolidResolution,
) -> Result<NozzleGeometry, NozzleError> {
    input.validate()?;
    if resolution.depth_samples < 2 || resolution.angle_samples < 2 {
        return Err(NozzleError::InvalidInput {
            field: "solid_resolution",
            value: resolution.depth_samples.min(resolution.angle_samples) as f64,
            reason: "샘플 수는 2 이상이어야 합니다",
        });
    }

    let rc = input.cone_diameter_mm / 2.0;
    let rf = input.final_diameter_mm / 2.0;
    let lc = input.cone_length_mm;
    let lch = input.effective_channel_length_mm();

    let one = open_area_one_hole(input.final_diameter_mm);
    let total = total_open_area(one, input.num_holes);
    let per_throughput = open_area_per_throughput(total, input.throughput_t_per_h);

    let mut warnings = Vec::new();
    if lc + lch > input.plate_thickness_mm {
        tracing::warn!(
            cone_length = lc,
            channel_length = lch,
            plate_thickness = input.plate_thickness_mm,
            "perforation lengths exceed plate thickness"
        );
        warnings.push(format!(
            "원뿔 길이 {:.1} mm + 채널 길이 {:.1} mm가 판 두께 {:.1} mm를 초과합니다.",
            lc, lch, input.plate_thickness_mm
        ));
    }
    if rf > rc {
        warnings.push("최종 직경이 원뿔 입구 직경보다 큽니다. 원뿔이 역방향입니다.".into());
    }

    let metrics = NozzleResult {
        open_area_one_hole_mm2: one,
        total_open_area_mm2: total,
        open_area_per_throughput: per_throughput,
        hole_volume_mm3: hole_volume(rc, rf, lc, lch),
        implied_cone_half_angle_deg: implied_half_angle_deg(rc, rf, lc),
        warnings,
    };
    tracing::debug!(
        open_area_one_hole = metrics.open_area_one_hole_mm2,
        total_open_area = metrics.total_open_area_mm2,
        per_throughput = metrics.open_area_per_throughput,
        "nozzle geometry computed"
    );

    Ok(NozzleGeometry {
        metrics,
        profile: NozzleGeometryProfile::new(rc, rf, lc, lch),
        solid: NozzleSolid::new(rc, rf, lc, input.plate_thickness_mm, resolution),
    })
}
