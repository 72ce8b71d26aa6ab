use super::*;

#[test]
fn can_produce_repeatable_sequences() {
    let first = DefaultRandom::new_repeatable(42);
    let second = DefaultRandom::new_repeatable(42);

    let first = (0..10).map(|_| first.uniform_int(0, 100)).collect::<Vec<_>>();
    let second = (0..10).map(|_| second.uniform_int(0, 100)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_generate_ints_in_closed_range() {
    let random = DefaultRandom::new_repeatable(0);

    let values = (0..1000).map(|_| random.uniform_int(-2, 2)).collect::<Vec<_>>();

    assert!(values.iter().all(|value| (-2..=2).contains(value)));
    assert!(values.contains(&-2));
    assert!(values.contains(&2));
}

#[test]
fn can_return_bound_for_degenerated_range() {
    let random = DefaultRandom::new_repeatable(0);

    assert_eq!(random.uniform_int(3, 3), 3);
    assert_eq!(random.uniform_real(1.5, 1.5), 1.5);
}

#[test]
fn can_generate_reals_in_half_open_range() {
    let random = DefaultRandom::new_repeatable(0);

    assert!((0..1000).map(|_| random.uniform_real(0., 1.)).all(|value| (0. ..1.).contains(&value)));
}

#[test]
fn can_handle_probability_bounds() {
    let random = DefaultRandom::new_repeatable(0);

    assert!((0..100).all(|_| random.is_hit(1.)));
    assert!((0..100).all(|_| !random.is_hit(0.)));
}

#[test]
fn can_shuffle_as_permutation() {
    let random = DefaultRandom::new_repeatable(7);
    let mut items = (0..20).collect::<Vec<_>>();

    random.shuffle(items.as_mut_slice());

    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    assert_ne!(items, sorted);
}
