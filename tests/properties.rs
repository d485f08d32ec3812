use approx::assert_relative_eq;
use process_sizing_toolbox::flow::{
    bulk_density_kg_per_m3, compute_flow_balance, fill_degree_pct, FlowInputs, FlowMode,
};
use process_sizing_toolbox::nozzle::{compute_nozzle_geometry, NozzleInputs};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mode_a_throughput_non_negative(
        feed in 0.0f64..1.0e5,
        liquids in prop::collection::vec(0.0f64..1.0e4, 0..5),
        material in 0.0f64..1.0e5,
    ) {
        let input = FlowInputs {
            dry_feed_kg_per_h: feed,
            liquid_inputs_kg_per_h: liquids,
            material_weight_kg: Some(material),
            ..FlowInputs::default()
        };
        let res = compute_flow_balance(&input, FlowMode::MassReference).unwrap();
        prop_assert!(res.wet_throughput_kg_per_h >= 0.0);
        prop_assert!(res.retention_time_s >= 0.0);
        if res.wet_throughput_kg_per_h == 0.0 {
            prop_assert_eq!(res.retention_time_s, 0.0);
        }
    }

    #[test]
    fn fill_degree_stays_in_range(
        total in 0.0f64..100.0,
        vessel in 0.1f64..50.0,
    ) {
        let fill = fill_degree_pct(total, vessel);
        prop_assert!((0.0..=100.0).contains(&fill));
        if total >= vessel {
            prop_assert_eq!(fill, 100.0);
        }
    }

    #[test]
    fn mode_b_fill_degree_in_range(
        feed in 0.0f64..5.0e3,
        water in 0.0f64..5.0e3,
        density in 1.0f64..2.0e3,
        vessel in 0.1f64..20.0,
        moisture in 0.0f64..100.0,
    ) {
        let input = FlowInputs {
            dry_feed_kg_per_h: feed,
            water_input_kg_per_h: Some(water),
            bulk_density_g_per_l: density,
            vessel_volume_m3: vessel,
            moisture_content_pct: moisture,
            material_weight_kg: None,
            ..FlowInputs::default()
        };
        let res = compute_flow_balance(&input, FlowMode::DensityVolume).unwrap();
        let fill = res.fill_degree_pct.unwrap();
        prop_assert!((0.0..=100.0).contains(&fill));
        if res.wet_throughput_kg_per_h <= 0.0 {
            prop_assert_eq!(res.retention_time_s, 0.0);
        }
    }

    #[test]
    fn bulk_density_two_step_conversion_cancels(x in 1.0f64..1.0e4) {
        assert_relative_eq!(bulk_density_kg_per_m3(x), x, max_relative = 1e-12);
    }

    #[test]
    fn cone_meets_channel_at_throat(
        cone_d in 5.0f64..50.0,
        final_d in 1.0f64..30.0,
        cone_len in 0.0f64..20.0,
    ) {
        let input = NozzleInputs {
            plate_thickness_mm: 40.0,
            cone_diameter_mm: cone_d,
            final_diameter_mm: final_d,
            cone_length_mm: cone_len,
            ..NozzleInputs::default()
        };
        let p = compute_nozzle_geometry(&input).unwrap().profile;
        prop_assert_eq!(p.cone[1], p.channel[0]);
        prop_assert_eq!(p.cone[2], p.channel[3]);
        for pt in p.channel {
            prop_assert_eq!(pt.radius.abs(), final_d / 2.0);
        }
    }

    #[test]
    fn open_area_scales_with_holes_and_throughput(
        final_d in 1.0f64..30.0,
        holes in 1u32..10_000,
        throughput in 0.1f64..100.0,
    ) {
        let input = NozzleInputs {
            final_diameter_mm: final_d,
            num_holes: holes,
            throughput_t_per_h: throughput,
            ..NozzleInputs::default()
        };
        let m = compute_nozzle_geometry(&input).unwrap().metrics;
        prop_assert_eq!(m.total_open_area_mm2, f64::from(holes) * m.open_area_one_hole_mm2);

        let doubled = compute_nozzle_geometry(&NozzleInputs {
            throughput_t_per_h: throughput * 2.0,
            ..input
        })
        .unwrap()
        .metrics;
        assert_relative_eq!(
            doubled.open_area_per_throughput * 2.0,
            m.open_area_per_throughput,
            max_relative = 1e-12
        );
    }
}
