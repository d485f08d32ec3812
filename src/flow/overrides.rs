use super::material_balance::{FlowError, FlowInputs, FlowMode};

/// 명령행에서 실제로 지정된 물질수지 입력. `None`/빈 목록은 "지정하지 않음"이다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowOverrides {
    pub mode: Option<FlowMode>,
    pub dry_feed_kg_per_h: Option<f64>,
    pub moisture_content_pct: Option<f64>,
    pub vessel_volume_m3: Option<f64>,
    pub bulk_density_g_per_l: Option<f64>,
    pub liquid_inputs_kg_per_h: Vec<f64>,
    pub material_weight_kg: Option<f64>,
    pub water_input_kg_per_h: Option<f64>,
}

impl FlowOverrides {
    /// 모드 A 전용 값(액체 투입량, 재료 질량)이 지정되었는지.
    fn has_mass_reference_fields(&self) -> bool {
        !self.liquid_inputs_kg_per_h.is_empty() || self.material_weight_kg.is_some()
    }

    /// 모드 B 전용 값(함수율, 용기 체적, 벌크 밀도, 물 투입량)이 지정되었는지.
    fn has_density_volume_fields(&self) -> bool {
        self.moisture_content_pct.is_some()
            || self.vessel_volume_m3.is_some()
            || self.bulk_density_g_per_l.is_some()
            || self.water_input_kg_per_h.is_some()
    }

    /// 설정 기본값 위에 지정된 값을 덮어쓰고 계산 모드를 정한다.
    ///
    /// 모드는 명시 모드, 지정된 값의 종류, 설정의 `flow_mode`, `FlowMode::infer` 순으로 결정한다.
    /// 모드를 주지 않고 두 모드의 전용 값을 섞으면 `FlowError::AmbiguousMode`다.
    pub fn apply(
        self,
        base: &FlowInputs,
        configured: Option<FlowMode>,
    ) -> Result<(FlowInputs, FlowMode), FlowError> {
        let from_fields = match (
            self.has_mass_reference_fields(),
            self.has_density_volume_fields(),
        ) {
            (true, true) if self.mode.is_none() => return Err(FlowError::AmbiguousMode),
            (true, false) => Some(FlowMode::MassReference),
            (false, true) => Some(FlowMode::DensityVolume),
            _ => None,
        };

        let mut input = base.clone();
        if let Some(v) = self.dry_feed_kg_per_h {
            input.dry_feed_kg_per_h = v;
        }
        if let Some(v) = self.moisture_content_pct {
            input.moisture_content_pct = v;
        }
        if let Some(v) = self.vessel_volume_m3 {
            input.vessel_volume_m3 = v;
        }
        if let Some(v) = self.bulk_density_g_per_l {
            input.bulk_density_g_per_l = v;
        }
        if !self.liquid_inputs_kg_per_h.is_empty() {
            input.liquid_inputs_kg_per_h = self.liquid_inputs_kg_per_h;
        }
        if self.material_weight_kg.is_some() {
            input.material_weight_kg = self.material_weight_kg;
        }
        if self.water_input_kg_per_h.is_some() {
            input.water_input_kg_per_h = self.water_input_kg_per_h;
        }

        let mode = self
            .mode
            .or(from_fields)
            .or(configured)
            .unwrap_or_else(|| FlowMode::infer(&input));
        // 기본값의 재료 질량이 남아 있으면 이후 `infer`가 모드 A로 되돌아간다.
        if mode == FlowMode::DensityVolume && self.material_weight_kg.is_none() {
            input.material_weight_kg = None;
        }
        tracing::debug!(?mode, ?from_fields, ?configured, "flow mode resolved");
        Ok((input, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_feed_alone_keeps_configured_mode() {
        let o = FlowOverrides {
            dry_feed_kg_per_h: Some(800.0),
            ..FlowOverrides::default()
        };
        let (input, mode) = o
            .apply(&FlowInputs::default(), Some(FlowMode::DensityVolume))
            .unwrap();
        assert_eq!(mode, FlowMode::DensityVolume);
        assert_eq!(input.dry_feed_kg_per_h, 800.0);
    }
}
