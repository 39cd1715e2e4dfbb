use proptest::prelude::*;
use strata_io::{detect_file_type, is_azmigrate_sheet};
use strata_model::FileType;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn any_rvtools_marker_wins(
        names in proptest::collection::vec("[A-Za-z_ ]{0,12}", 0..8),
        marker in prop::sample::select(vec!["vInfo", "vCPU", "vMemory"]),
        at in 0usize..8,
    ) {
        let mut names = names;
        let at = at.min(names.len());
        names.insert(at, marker.to_string());
        prop_assert_eq!(detect_file_type(names.iter().map(String::as_str)), FileType::RvTools);
    }

    #[test]
    fn classification_matches_the_sheet_predicate(
        names in proptest::collection::vec("[a-z]{0,10}", 0..8),
    ) {
        let detected = detect_file_type(names.iter().map(String::as_str));
        let expected = if names.iter().any(|n| is_azmigrate_sheet(n)) {
            FileType::AzMigrate
        } else {
            FileType::Unknown
        };
        // Lower-case only names can never hit the case-sensitive RVTools markers.
        prop_assert_eq!(detected, expected);
    }
}
