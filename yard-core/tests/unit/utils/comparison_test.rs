use super::*;

parameterized_test! {can_compare_floats, (a, b, expected), {
    assert_eq!(compare_floats(a, b), expected);
}}

can_compare_floats! {
    case01_less: (1., 2., Ordering::Less),
    case02_greater: (2., 1., Ordering::Greater),
    case03_equal: (1., 1., Ordering::Equal),
    case04_nan_greater: (Float::NAN, 1., Ordering::Greater),
    case05_nan_less: (1., Float::NAN, Ordering::Less),
    case06_nan_equal: (Float::NAN, Float::NAN, Ordering::Equal),
}

parameterized_test! {can_check_less_by_epsilon, (a, b, epsilon, expected), {
    assert_eq!(is_less_by(a, b, epsilon), expected);
}}

can_check_less_by_epsilon! {
    case01_clearly_less: (1., 2., 1E-6, true),
    case02_within_tolerance: (1. - 1E-8, 1., 1E-6, false),
    case03_equal: (1., 1., 1E-6, false),
    case04_greater: (2., 1., 1E-6, false),
}

#[test]
fn can_sort_ord_floats_with_nan_last() {
    let mut values = vec![OrdFloat(3.), OrdFloat(Float::NAN), OrdFloat(-1.), OrdFloat(2.)];

    values.sort();

    assert_eq!(values[0].0, -1.);
    assert_eq!(values[1].0, 2.);
    assert_eq!(values[2].0, 3.);
    assert!(values[3].0.is_nan());
}
