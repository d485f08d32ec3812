use approx::assert_relative_eq;
use process_sizing_toolbox::flow::{
    compute_flow_balance, FlowError, FlowInputs, FlowMode, FlowOverrides,
};

#[test]
fn density_flags_select_mode_b_over_default_material_weight() {
    let base = FlowInputs::default();
    assert!(base.material_weight_kg.is_some());
    let overrides = FlowOverrides {
        water_input_kg_per_h: Some(500.0),
        bulk_density_g_per_l: Some(800.0),
        vessel_volume_m3: Some(1.0),
        dry_feed_kg_per_h: Some(1000.0),
        ..FlowOverrides::default()
    };

    let (input, mode) = overrides.apply(&base, None).unwrap();
    assert_eq!(mode, FlowMode::DensityVolume);
    assert_eq!(input.material_weight_kg, None);
    assert_eq!(FlowMode::infer(&input), FlowMode::DensityVolume);

    let res = compute_flow_balance(&input, mode).unwrap();
    assert_relative_eq!(res.wet_throughput_kg_per_h, 1500.0, epsilon = 1e-9);
    assert_relative_eq!(res.fill_degree_pct.unwrap(), 100.0, epsilon = 1e-9);
    assert_relative_eq!(res.retention_time_s, 2640.0, epsilon = 1e-6);
}

#[test]
fn density_flags_beat_configured_mode() {
    let overrides = FlowOverrides {
        water_input_kg_per_h: Some(0.0),
        ..FlowOverrides::default()
    };
    let (_, mode) = overrides
        .apply(&FlowInputs::default(), Some(FlowMode::MassReference))
        .unwrap();
    assert_eq!(mode, FlowMode::DensityVolume);
}

#[test]
fn mass_flags_select_mode_a() {
    let base = FlowInputs {
        material_weight_kg: None,
        ..FlowInputs::default()
    };
    let overrides = FlowOverrides {
        liquid_inputs_kg_per_h: vec![100.0, 50.0, 25.0],
        material_weight_kg: Some(1000.0),
        ..FlowOverrides::default()
    };
    let (input, mode) = overrides
        .apply(&base, Some(FlowMode::DensityVolume))
        .unwrap();
    assert_eq!(mode, FlowMode::MassReference);
    let res = compute_flow_balance(&input, mode).unwrap();
    assert_relative_eq!(res.wet_throughput_kg_per_h, 675.0, epsilon = 1e-9);
    assert_relative_eq!(res.material_weight_kg, 1000.0, epsilon = 1e-9);
}

#[test]
fn mixed_flags_without_mode_are_rejected() {
    let overrides = FlowOverrides {
        material_weight_kg: Some(1000.0),
        water_input_kg_per_h: Some(500.0),
        ..FlowOverrides::default()
    };
    assert_eq!(
        overrides.apply(&FlowInputs::default(), None),
        Err(FlowError::AmbiguousMode)
    );
}

#[test]
fn explicit_mode_settles_mixed_flags() {
    let overrides = FlowOverrides {
        mode: Some(FlowMode::DensityVolume),
        material_weight_kg: Some(1000.0),
        water_input_kg_per_h: Some(500.0),
        ..FlowOverrides::default()
    };
    let (input, mode) = overrides.apply(&FlowInputs::default(), None).unwrap();
    assert_eq!(mode, FlowMode::DensityVolume);
    assert_eq!(input.material_weight_kg, Some(1000.0));
    assert_eq!(input.water_input_kg_per_h, Some(500.0));
}

#[test]
fn no_flags_fall_back_to_config_then_inference() {
    let base = FlowInputs::default();
    let (_, mode) = FlowOverrides::default()
        .apply(&base, Some(FlowMode::DensityVolume))
        .unwrap();
    assert_eq!(mode, FlowMode::DensityVolume);

    let (input, mode) = FlowOverrides::default().apply(&base, None).unwrap();
    assert_eq!(mode, FlowMode::MassReference);
    assert_eq!(input, base);
}
