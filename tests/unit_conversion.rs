use approx::assert_relative_eq;
use process_sizing_toolbox::{
    conversion::{self, ConversionError},
    flow::bulk_density_kg_per_m3,
    quantity::QuantityKind,
    units::{convert_area, convert_time, AreaUnit, TimeUnit},
};

#[test]
fn throughput_tonnes_to_kilograms() {
    let v = conversion::convert(QuantityKind::MassFlow, 10.0, "t/h", "kg/h").unwrap();
    assert_relative_eq!(v, 10_000.0);
    let v = conversion::convert(QuantityKind::MassFlow, 1.0, "kg/s", "kg/h").unwrap();
    assert_relative_eq!(v, 3600.0);
}

#[test]
fn bulk_density_units() {
    let v = conversion::convert(QuantityKind::Density, 800.0, "g/L", "kg/L").unwrap();
    assert_relative_eq!(v, 0.8);
    let v = conversion::convert(QuantityKind::Density, 800.0, "g/L", "kg/m3").unwrap();
    assert_relative_eq!(v, 800.0);
    assert_relative_eq!(bulk_density_kg_per_m3(600.0), 600.0, max_relative = 1e-12);
}

#[test]
fn open_area_display_units() {
    assert_relative_eq!(
        convert_area(7853.98, AreaUnit::SquareMillimeter, AreaUnit::SquareCentimeter),
        78.5398
    );
    assert_relative_eq!(convert_area(645.16, AreaUnit::SquareMillimeter, AreaUnit::SquareInch), 1.0);
    let v = conversion::convert(QuantityKind::Area, 1.0, "m2", "mm2").unwrap();
    assert_relative_eq!(v, 1.0e6);
}

#[test]
fn retention_time_units() {
    assert_relative_eq!(convert_time(2640.0, TimeUnit::Second, TimeUnit::Minute), 44.0);
    assert_relative_eq!(convert_time(1.5, TimeUnit::Hour, TimeUnit::Second), 5400.0);
}

#[test]
fn lengths_volumes_masses() {
    let v = conversion::convert(QuantityKind::Length, 1.0, "in", "mm").unwrap();
    assert_relative_eq!(v, 25.4);
    let v = conversion::convert(QuantityKind::Volume, 2.0, "m3", "L").unwrap();
    assert_relative_eq!(v, 2000.0);
    let v = conversion::convert(QuantityKind::Mass, 1.0, "t", "kg").unwrap();
    assert_relative_eq!(v, 1000.0);
}

#[test]
fn unit_strings_are_case_and_space_insensitive() {
    let v = conversion::convert(QuantityKind::Time, 120.0, " S ", "MIN\n").unwrap();
    assert_relative_eq!(v, 2.0);
}

#[test]
fn advertised_unit_codes_all_parse() {
    for kind in QuantityKind::ALL {
        for from in kind.unit_codes() {
            for to in kind.unit_codes() {
                assert!(
                    conversion::convert(kind, 1.0, from, to).is_ok(),
                    "{kind:?}: {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn unknown_unit_is_reported() {
    let err = conversion::convert(QuantityKind::Area, 1.0, "acre", "m2").unwrap_err();
    assert_eq!(err, ConversionError::UnknownUnit("acre".into()));
}
