use approx::assert_relative_eq;
use process_sizing_toolbox::flow::{compute_flow_balance, FlowError, FlowInputs, FlowMode};

fn mode_a(feed: f64, liquids: &[f64], material: Option<f64>) -> FlowInputs {
    FlowInputs {
        dry_feed_kg_per_h: feed,
        liquid_inputs_kg_per_h: liquids.to_vec(),
        material_weight_kg: material,
        ..FlowInputs::default()
    }
}

fn mode_b(feed: f64, water: f64, density: f64, vessel: f64, moisture: f64) -> FlowInputs {
    FlowInputs {
        dry_feed_kg_per_h: feed,
        water_input_kg_per_h: Some(water),
        bulk_density_g_per_l: density,
        vessel_volume_m3: vessel,
        moisture_content_pct: moisture,
        material_weight_kg: None,
        ..FlowInputs::default()
    }
}

#[test]
fn mass_reference_retention() {
    let res = compute_flow_balance(
        &mode_a(500.0, &[100.0, 50.0, 25.0], Some(1000.0)),
        FlowMode::MassReference,
    )
    .expect("mode A");
    assert_eq!(res.mode, FlowMode::MassReference);
    assert_relative_eq!(res.wet_throughput_kg_per_h, 675.0);
    assert_relative_eq!(res.retention_time_s, 1000.0 / 675.0 * 3600.0, max_relative = 1e-12);
    assert_relative_eq!(res.retention_time_s, 5333.33, epsilon = 0.01);
    assert_eq!(res.material_weight_kg, 1000.0);
    assert!(res.fill_degree_pct.is_none());
    assert!(res.dry_volume_m3_per_h.is_none());
    assert!(res.warnings.is_empty());
}

#[test]
fn density_volume_overfilled_vessel() {
    let res = compute_flow_balance(
        &mode_b(1000.0, 500.0, 800.0, 1.0, 10.0),
        FlowMode::DensityVolume,
    )
    .expect("mode B");
    assert_relative_eq!(res.wet_throughput_kg_per_h, 1500.0);
    assert_relative_eq!(res.dry_volume_m3_per_h.unwrap(), 1.25, max_relative = 1e-12);
    assert_relative_eq!(res.total_volume_m3_per_h.unwrap(), 1.75, max_relative = 1e-12);
    assert_eq!(res.fill_degree_pct, Some(100.0));
    assert_relative_eq!(res.material_weight_kg, 1100.0, max_relative = 1e-12);
    assert_relative_eq!(res.retention_time_s, 2640.0, max_relative = 1e-12);
    assert_eq!(res.warnings.len(), 1, "{:?}", res.warnings);
}

#[test]
fn density_volume_partial_fill() {
    let res = compute_flow_balance(
        &mode_b(300.0, 100.0, 600.0, 2.0, 0.0),
        FlowMode::DensityVolume,
    )
    .unwrap();
    // 0.5 + 0.1 = 0.6 m³/h → 30 %
    assert_relative_eq!(res.fill_degree_pct.unwrap(), 30.0, max_relative = 1e-9);
    assert!(res.warnings.is_empty());
}

#[test]
fn zero_throughput_means_zero_retention() {
    let a = compute_flow_balance(&mode_a(0.0, &[], Some(1000.0)), FlowMode::MassReference)
        .unwrap();
    assert_eq!(a.wet_throughput_kg_per_h, 0.0);
    assert_eq!(a.retention_time_s, 0.0);
    assert_eq!(a.warnings.len(), 1);

    let b = compute_flow_balance(&mode_b(0.0, 0.0, 600.0, 2.0, 10.0), FlowMode::DensityVolume)
        .unwrap();
    assert_eq!(b.retention_time_s, 0.0);
}

#[test]
fn missing_optional_values_default_to_zero() {
    let a = compute_flow_balance(&mode_a(500.0, &[], None), FlowMode::MassReference).unwrap();
    assert_eq!(a.material_weight_kg, 0.0);
    assert_eq!(a.retention_time_s, 0.0);

    let mut input = mode_b(600.0, 0.0, 600.0, 2.0, 0.0);
    input.water_input_kg_per_h = None;
    let b = compute_flow_balance(&input, FlowMode::DensityVolume).unwrap();
    assert_relative_eq!(b.total_volume_m3_per_h.unwrap(), 1.0, max_relative = 1e-12);
}

#[test]
fn each_mode_ignores_the_other_modes_fields() {
    // 모드 A는 밀도/체적이 비정상이어도 검사하지 않는다.
    let mut a = mode_a(500.0, &[100.0], Some(600.0));
    a.vessel_volume_m3 = 0.0;
    a.bulk_density_g_per_l = -1.0;
    a.water_input_kg_per_h = Some(9999.0);
    let res = compute_flow_balance(&a, FlowMode::MassReference).unwrap();
    assert_relative_eq!(res.wet_throughput_kg_per_h, 600.0);

    // 모드 B는 액체 목록을 쓰지 않는다.
    let mut b = mode_b(1000.0, 500.0, 800.0, 1.0, 10.0);
    b.liquid_inputs_kg_per_h = vec![-5.0, 1.0e6];
    let res = compute_flow_balance(&b, FlowMode::DensityVolume).unwrap();
    assert_relative_eq!(res.wet_throughput_kg_per_h, 1500.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let cases = [
        (mode_a(-1.0, &[], Some(1.0)), FlowMode::MassReference, "dry_feed_kg_per_h"),
        (mode_a(1.0, &[5.0, -2.0], Some(1.0)), FlowMode::MassReference, "liquid_inputs_kg_per_h"),
        (mode_a(1.0, &[], Some(-3.0)), FlowMode::MassReference, "material_weight_kg"),
        (mode_b(1.0, 0.0, 600.0, 0.0, 10.0), FlowMode::DensityVolume, "vessel_volume_m3"),
        (mode_b(1.0, 0.0, 0.0, 1.0, 10.0), FlowMode::DensityVolume, "bulk_density_g_per_l"),
        (mode_b(1.0, 0.0, 600.0, 1.0, 120.0), FlowMode::DensityVolume, "moisture_content_pct"),
        (mode_b(1.0, -1.0, 600.0, 1.0, 10.0), FlowMode::DensityVolume, "water_input_kg_per_h"),
        (mode_b(f64::NAN, 0.0, 600.0, 1.0, 10.0), FlowMode::DensityVolume, "dry_feed_kg_per_h"),
    ];
    for (input, mode, expected) in cases {
        match compute_flow_balance(&input, mode) {
            Err(FlowError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("{expected}: expected error, got {other:?}"),
        }
    }
}

#[test]
fn mode_inference_prefers_material_weight() {
    assert_eq!(FlowMode::infer(&FlowInputs::default()), FlowMode::MassReference);
    let input = FlowInputs {
        material_weight_kg: None,
        ..FlowInputs::default()
    };
    assert_eq!(FlowMode::infer(&input), FlowMode::DensityVolume);
}
