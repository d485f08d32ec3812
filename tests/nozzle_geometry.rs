use approx::{assert_abs_diff_eq, assert_relative_eq};
use process_sizing_toolbox::nozzle::{
    compute_nozzle_geometry, compute_nozzle_geometry_with, NozzleError, NozzleInputs,
    SolidResolution,
};
use std::f64::consts::PI;

fn inputs() -> NozzleInputs {
    NozzleInputs {
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

#[test]
fn open_area_metrics() {
    let g = compute_nozzle_geometry(&inputs()).expect("nozzle");
    let m = &g.metrics;
    assert_relative_eq!(m.open_area_one_hole_mm2, 25.0 * PI, max_relative = 1e-12);
    assert_abs_diff_eq!(m.open_area_one_hole_mm2, 78.54, epsilon = 0.01);
    assert_abs_diff_eq!(m.total_open_area_mm2, 7853.98, epsilon = 0.01);
    assert_abs_diff_eq!(m.open_area_per_throughput, 785.40, epsilon = 0.01);
    assert_eq!(m.total_open_area_mm2, 100.0 * m.open_area_one_hole_mm2);
    assert!(m.warnings.is_empty(), "{:?}", m.warnings);
}

#[test]
fn doubling_throughput_halves_area_per_throughput() {
    let base = compute_nozzle_geometry(&inputs()).unwrap().metrics;
    let doubled = compute_nozzle_geometry(&NozzleInputs {
        throughput_t_per_h: 20.0,
        ..inputs()
    })
    .unwrap()
    .metrics;
    assert_relative_eq!(
        doubled.open_area_per_throughput,
        base.open_area_per_throughput / 2.0,
        max_relative = 1e-12
    );
}

#[test]
fn extra_metrics() {
    let m = compute_nozzle_geometry(&inputs()).unwrap().metrics;
    // 원뿔대 π·10/3·(100+50+25) + 원통 π·25·10
    let expected = PI * 10.0 / 3.0 * 175.0 + PI * 250.0;
    assert_relative_eq!(m.hole_volume_mm3, expected, max_relative = 1e-12);
    assert_relative_eq!(
        m.implied_cone_half_angle_deg.unwrap(),
        (0.5f64).atan().to_degrees(),
        max_relative = 1e-12
    );

    let flat = compute_nozzle_geometry(&NozzleInputs {
        cone_length_mm: 0.0,
        ..inputs()
    })
    .unwrap();
    assert!(flat.metrics.implied_cone_half_angle_deg.is_none());
}

#[test]
fn cross_section_polygons() {
    let p = compute_nozzle_geometry(&inputs()).unwrap().profile;
    let depths: Vec<f64> = p.cone.iter().map(|pt| pt.depth).collect();
    assert_eq!(depths, vec![0.0, 10.0, 10.0, 0.0]);
    let radii: Vec<f64> = p.cone.iter().map(|pt| pt.radius).collect();
    assert_eq!(radii, vec![-10.0, -5.0, 5.0, 10.0]);

    // 원뿔 목과 채널 윗변이 일치한다.
    assert_eq!(p.cone[1], p.channel[0]);
    assert_eq!(p.cone[2], p.channel[3]);
    assert!(p.channel.iter().all(|pt| pt.radius.abs() == 5.0));
    assert_eq!(p.channel[1].depth, 20.0);
    assert_eq!(p.depth(), 20.0);
}

#[test]
fn explicit_channel_length_sets_profile_depth() {
    let g = compute_nozzle_geometry(&NozzleInputs {
        channel_length_mm: Some(4.0),
        ..inputs()
    })
    .unwrap();
    assert_eq!(g.profile.depth(), 14.0);
    // 3D 채널은 판 두께까지 이어진다.
    let last = g.solid.channel.cols() - 1;
    assert_eq!(g.solid.channel.point(0, last)[2], 20.0);
}

#[test]
fn solid_of_revolution() {
    let res = SolidResolution {
        depth_samples: 5,
        angle_samples: 9,
    };
    let g = compute_nozzle_geometry_with(&inputs(), res).unwrap();
    let cone = &g.solid.cone;
    let channel = &g.solid.channel;
    assert_eq!((cone.rows(), cone.cols()), (9, 5));
    assert_eq!((channel.rows(), channel.cols()), (9, 5));

    for i in 0..cone.rows() {
        let top = cone.point(i, 0);
        let throat = cone.point(i, 4);
        assert_abs_diff_eq!(top[0].hypot(top[1]), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(throat[0].hypot(throat[1]), 5.0, epsilon = 1e-9);
        assert_eq!(top[2], 0.0);
        assert_eq!(throat[2], 10.0);
        // 중간 깊이에서 반경은 선형 보간된다.
        let mid = cone.point(i, 2);
        assert_abs_diff_eq!(mid[0].hypot(mid[1]), 7.5, epsilon = 1e-9);
        for j in 0..channel.cols() {
            let p = channel.point(i, j);
            assert_abs_diff_eq!(p[0].hypot(p[1]), 5.0, epsilon = 1e-9);
        }
    }
    assert_eq!(channel.point(0, 0)[2], 10.0);
    assert_eq!(channel.point(0, 4)[2], 20.0);

    // 회전각은 0에서 2π까지 닫힌다.
    let first = cone.point(0, 0);
    let last = cone.point(8, 0);
    assert_abs_diff_eq!(first[0], last[0], epsilon = 1e-9);
    assert_abs_diff_eq!(first[1], last[1], epsilon = 1e-9);
}

#[test]
fn default_resolution_is_thirty_by_thirty() {
    let g = compute_nozzle_geometry(&inputs()).unwrap();
    assert_eq!(g.solid.cone.rows(), 30);
    assert_eq!(g.solid.cone.cols(), 30);
}

#[test]
fn overlapping_lengths_are_warned_not_rejected() {
    let g = compute_nozzle_geometry(&NozzleInputs {
        cone_length_mm: 15.0,
        channel_length_mm: Some(15.0),
        ..inputs()
    })
    .expect("overlap is allowed");
    assert_eq!(g.metrics.warnings.len(), 1);
    assert_eq!(g.profile.depth(), 30.0);
}

#[test]
fn inverted_cone_is_warned() {
    let g = compute_nozzle_geometry(&NozzleInputs {
        cone_diameter_mm: 6.0,
        ..inputs()
    })
    .unwrap();
    assert_eq!(g.metrics.warnings.len(), 1);
    assert!(g.metrics.implied_cone_half_angle_deg.unwrap() < 0.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let cases = [
        (NozzleInputs { final_diameter_mm: 0.0, ..inputs() }, "final_diameter_mm"),
        (NozzleInputs { num_holes: 0, ..inputs() }, "num_holes"),
        (NozzleInputs { throughput_t_per_h: 0.0, ..inputs() }, "throughput_t_per_h"),
        (NozzleInputs { plate_thickness_mm: -1.0, ..inputs() }, "plate_thickness_mm"),
        (NozzleInputs { cone_length_mm: f64::INFINITY, ..inputs() }, "cone_length_mm"),
        // 원뿔이 판보다 길면 기본 채널 길이가 음수가 된다.
        (NozzleInputs { cone_length_mm: 25.0, ..inputs() }, "channel_length_mm"),
    ];
    for (input, expected) in cases {
        match compute_nozzle_geometry(&input) {
            Err(NozzleError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("{expected}: expected error, got {other:?}"),
        }
    }

    let coarse = SolidResolution {
        depth_samples: 1,
        angle_samples: 30,
    };
    assert!(compute_nozzle_geometry_with(&inputs(), coarse).is_err());
}
