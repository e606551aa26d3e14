use t9a_math::{mean, round_sig, standard_error, subsample_z, two_tailed_p, z_score};

#[test]
fn given_empty_scores_when_mean_is_requested_then_none_is_returned() {
    assert_eq!(mean(&[]), None);
}

#[test]
fn given_identical_scores_when_z_is_computed_then_it_is_undefined() {
    let scores = [10.0, 10.0, 10.0, 10.0];
    let sem = standard_error(&scores);
    assert_eq!(sem, 0.0);
    assert_eq!(z_score(10.0, 10.0, sem), None);
}

#[test]
fn given_a_strongly_skewed_faction_when_tested_then_p_is_small() {
    let scores: Vec<f64> = std::iter::repeat_n([14.0, 15.0, 16.0], 20).flatten().collect();
    let m = mean(&scores).unwrap();
    let z = z_score(m, 10.0, standard_error(&scores)).unwrap();
    assert!(z > 5.0);
    assert!(two_tailed_p(z) < 0.001);
}

#[test]
fn given_a_subsample_matching_the_population_mean_then_z_is_zero() {
    let z = subsample_z(10.0, 4, 10.0, 9.0, 40).unwrap();
    assert_eq!(z, 0.0);
}

#[test]
fn given_a_mean_and_error_when_rounding_then_both_share_a_decimal_place() {
    assert_eq!(round_sig(11.2849, 0.0371), (11.28, 0.04));
}
