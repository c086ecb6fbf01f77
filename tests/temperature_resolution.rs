use proptest::prelude::*;
use scattering_center_properties::{
    Energy, FileLocation, NuclearDataFile, NuclearDataFileType,
    NuclearDataProperties, NuclideProperties, PropertiesError, Temperature, Zaid,
};
use std::sync::Arc;

const STORED_TEMPERATURES: [f64; 3] = [0.0, 2.5301e-08, 2.1543e-07];

fn h1_record(temperature_mev: f64, version: u32) -> Arc<dyn NuclearDataProperties> {
    Arc::new(NuclearDataFile::new(
        Zaid::new(1001),
        0.999167,
        Energy::from_mev(temperature_mev),
        NuclearDataFileType::AceFile,
        FileLocation::new("neutron/h1.txt", 0, version, "1001.70c"),
    ))
}

fn h1_with_grid() -> NuclideProperties {
    let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
    for temperature in STORED_TEMPERATURES {
        nuclide
            .set_nuclear_data_properties(h1_record(temperature, 0))
            .unwrap();
    }
    nuclide
}

fn resolved_temperature(nuclide: &NuclideProperties, query_mev: f64, exact: bool) -> f64 {
    nuclide
        .nuclear_data_properties(NuclearDataFileType::AceFile, 0, Energy::from_mev(query_mev), exact)
        .unwrap()
        .evaluation_temperature_in_mev()
        .mev()
}

#[test]
fn test_nearest_match_picks_closest_stored_temperature() {
    let nuclide = h1_with_grid();

    assert_eq!(resolved_temperature(&nuclide, 1.26e-8, false), 0.0);
    assert_eq!(resolved_temperature(&nuclide, 1.27e-8, false), 2.5301e-08);
    assert_eq!(resolved_temperature(&nuclide, 1.20e-7, false), 2.5301e-08);
    assert_eq!(resolved_temperature(&nuclide, 1.21e-7, false), 2.1543e-07);
}

#[test]
fn test_nearest_match_extrapolates_beyond_grid() {
    let nuclide = h1_with_grid();
    assert_eq!(resolved_temperature(&nuclide, 3e-7, false), 2.1543e-07);

    let err = nuclide
        .nuclear_data_properties(NuclearDataFileType::AceFile, 0, Energy::from_mev(3e-7), true)
        .unwrap_err();
    assert!(
        matches!(err, PropertiesError::RequestNotSatisfiable { .. }),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_exact_match_returns_stored_records() {
    let nuclide = h1_with_grid();
    for temperature in STORED_TEMPERATURES {
        assert_eq!(resolved_temperature(&nuclide, temperature, true), temperature);
        assert!(nuclide.nuclear_data_available_at(
            NuclearDataFileType::AceFile,
            0,
            Energy::from_mev(temperature)
        ));
    }
}

#[test]
fn test_missing_bucket_is_not_found_in_both_modes() {
    let nuclide = h1_with_grid();
    for exact in [true, false] {
        let err = nuclide
            .nuclear_data_properties(NuclearDataFileType::AceFile, 1, Energy::from_mev(0.0), exact)
            .unwrap_err();
        assert!(matches!(err, PropertiesError::RecordNotFound { .. }));
        let err = nuclide
            .nuclear_data_properties(NuclearDataFileType::NativeFile, 0, Energy::from_mev(0.0), exact)
            .unwrap_err();
        assert!(matches!(err, PropertiesError::RecordNotFound { .. }));
    }
}

#[test]
fn test_room_temperature_in_kelvin_matches_mev_record() {
    let nuclide = h1_with_grid();
    let kelvin = Temperature::from_kelvin(2.936059397103837227e+02);

    assert!(nuclide.nuclear_data_available_at(NuclearDataFileType::AceFile, 0, kelvin));
    let record = nuclide
        .nuclear_data_properties(NuclearDataFileType::AceFile, 0, kelvin, true)
        .unwrap();
    assert_eq!(record.evaluation_temperature_in_mev().mev(), 2.5301e-08);
}

#[test]
fn test_non_finite_record_does_not_capture_nearest_match() {
    let mut nuclide = h1_with_grid();
    for temperature in [f64::NAN, f64::INFINITY, -2.5301e-08] {
        let err = nuclide
            .set_nuclear_data_properties(h1_record(temperature, 0))
            .unwrap_err();
        assert!(matches!(err, PropertiesError::InvalidData(_)), "{}", err);
    }
    assert_eq!(resolved_temperature(&nuclide, 1.1e-8, false), 0.0);
    assert_eq!(
        nuclide
            .nuclear_data_evaluation_temps_in_mev(NuclearDataFileType::AceFile, 0)
            .len(),
        STORED_TEMPERATURES.len()
    );
}

#[test]
fn test_negative_or_nan_query_is_invalid() {
    let nuclide = h1_with_grid();
    for query in [
        Energy::from_mev(f64::NAN),
        Energy::from_mev(-2.5301e-08),
        Temperature::from_kelvin(-300.0).to_energy(),
    ] {
        assert!(!nuclide.nuclear_data_available_at(NuclearDataFileType::AceFile, 0, query));
        for exact in [true, false] {
            let err = nuclide
                .nuclear_data_properties(NuclearDataFileType::AceFile, 0, query, exact)
                .unwrap_err();
            assert!(matches!(err, PropertiesError::InvalidData(_)), "{}", err);
        }
    }
}

#[test]
fn test_evaluation_temperatures_are_ascending() {
    let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
    for temperature in [2.1543e-07, 0.0, 2.5301e-08] {
        nuclide
            .set_nuclear_data_properties(h1_record(temperature, 0))
            .unwrap();
    }
    let temps: Vec<f64> = nuclide
        .nuclear_data_evaluation_temps_in_mev(NuclearDataFileType::AceFile, 0)
        .into_iter()
        .map(Energy::mev)
        .collect();
    assert_eq!(temps, STORED_TEMPERATURES.to_vec());

    let kelvins = nuclide.nuclear_data_evaluation_temps(NuclearDataFileType::AceFile, 0);
    assert_eq!(kelvins.len(), 3);
    assert!((kelvins[1].kelvin() - 293.6059397103837).abs() < 1e-9);
}

#[test]
fn test_recommended_version_is_highest() {
    let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
    for version in [1, 0, 2] {
        nuclide
            .set_nuclear_data_properties(h1_record(2.5301e-08, version))
            .unwrap();
    }
    assert_eq!(
        nuclide
            .recommended_nuclear_data_file_version(NuclearDataFileType::AceFile)
            .unwrap(),
        2
    );
    assert!(matches!(
        nuclide.recommended_nuclear_data_file_version(NuclearDataFileType::NativeFile),
        Err(PropertiesError::RecordNotFound { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_kelvin_and_mev_queries_agree(mev in 0.0f64..1e-5, stored in 0usize..3) {
        let nuclide = h1_with_grid();
        let kelvin = Energy::from_mev(mev).to_temperature();
        prop_assert_eq!(
            nuclide.nuclear_data_available_at(NuclearDataFileType::AceFile, 0, Energy::from_mev(mev)),
            nuclide.nuclear_data_available_at(NuclearDataFileType::AceFile, 0, kelvin)
        );

        let stored = Energy::from_mev(STORED_TEMPERATURES[stored]);
        prop_assert!(nuclide.nuclear_data_available_at(
            NuclearDataFileType::AceFile,
            0,
            stored.to_temperature()
        ));
    }

    #[test]
    fn prop_nearest_match_is_never_farther_than_any_stored(mev in 0.0f64..1e-6) {
        let nuclide = h1_with_grid();
        let resolved = resolved_temperature(&nuclide, mev, false);
        for stored in STORED_TEMPERATURES {
            prop_assert!((resolved - mev).abs() <= (stored - mev).abs());
        }
    }

    #[test]
    fn prop_construction_requires_positive_weight_ratio(ratio in -10.0f64..10.0) {
        let result = NuclideProperties::new(Zaid::new(1001), ratio);
        if ratio > 0.0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(PropertiesError::InvalidData(_))));
        }
    }
}
