use proptest::prelude::*;
use t9a_load::{game_size, model_count_bucket};

fn band_bounds(label: &str) -> (u32, u32) {
    let range = label.trim_end_matches(" Models");
    let (lo, hi) = range.split_once('-').unwrap();
    (lo.parse().unwrap(), hi.parse().unwrap())
}

proptest! {
    #[test]
    fn band_contains_model_count(models in 1u32..=80) {
        let label = model_count_bucket(models).unwrap();
        let (lo, hi) = band_bounds(&label);
        prop_assert!(lo <= models && models <= hi);
        prop_assert_eq!(hi - lo, 4);
        prop_assert_eq!(hi % 5, 0);
    }

    #[test]
    fn large_units_share_the_open_band(models in 81u32..10_000) {
        let label = model_count_bucket(models);
        prop_assert_eq!(label.as_deref(), Some("81+ Models"));
    }

    #[test]
    fn game_size_is_a_rounded_upper_bound(a in any::<u32>(), b in any::<u32>()) {
        let max = a.max(b);
        match game_size(Some(a), Some(b)) {
            Some(size) => {
                prop_assert_eq!(size % 100, 0);
                prop_assert!(size >= max);
                prop_assert!(u64::from(size) < u64::from(max) + 100);
            }
            None => prop_assert!(max > u32::MAX / 100 * 100),
        }
        prop_assert_eq!(game_size(Some(a), None), None);
        prop_assert_eq!(game_size(None, Some(b)), None);
    }
}
