use super::*;
use crate::helpers::models::*;
use crate::helpers::utils::FakeRandom;
use crate::utils::DefaultRandom;

fn create_params(critical_elements: usize, max_attempts: usize) -> ShakeParams {
    ShakeParams { critical_elements, shuffle_critical: false, max_attempts }
}

#[test]
fn can_keep_priority_unchanged_without_critical_elements() {
    let random = DefaultRandom::new_repeatable(0);
    let mut tabu = TabuList::new(5);
    let priority = vec![2, 0, 1, 3];
    let criticality = vec![1., 2., 3., 4.];

    let first = tabu_critical_shake(&priority, &criticality, &create_params(0, 3), &mut tabu, &random);
    let second = tabu_critical_shake(&priority, &criticality, &create_params(0, 3), &mut tabu, &random);

    assert_eq!(first.priority, priority);
    assert!(!first.is_duplicate);
    assert_eq!(first.attempts, 1);
    assert_eq!(second.priority, priority);
    assert!(second.is_duplicate);
    assert_eq!(second.attempts, 3);
}

#[test]
fn can_reinsert_critical_block_at_random_position() {
    let random = FakeRandom::new(vec![1], vec![]);
    let mut tabu = TabuList::new(5);
    let priority = vec![0, 1, 2, 3, 4];
    let criticality = vec![0., 5., 1., 7., 2.];

    let outcome = tabu_critical_shake(&priority, &criticality, &create_params(2, 3), &mut tabu, &random);

    // critical periods 1 and 3 keep their relative order and are inserted after the first rest element
    assert_eq!(outcome.priority, vec![0, 1, 3, 2, 4]);
    assert!(tabu.contains(&[0, 1, 3, 2, 4]));
}

#[test]
fn can_avoid_tabu_sequences() {
    let random = FakeRandom::new(vec![0, 1], vec![]);
    let mut tabu = TabuList::new(5);
    tabu.push(vec![3, 0, 1, 2]);
    let priority = vec![0, 1, 2, 3];
    let criticality = vec![0., 0., 0., 1.];

    let outcome = tabu_critical_shake(&priority, &criticality, &create_params(1, 3), &mut tabu, &random);

    assert_eq!(outcome.priority, vec![0, 3, 1, 2]);
    assert_eq!(outcome.attempts, 2);
    assert!(!outcome.is_duplicate);
}

#[test]
fn can_never_return_tabu_sequence_before_attempts_exhausted() {
    let random = DefaultRandom::new_repeatable(3);
    let mut tabu = TabuList::new(50);
    let mut priority = (0..6).collect::<Vec<_>>();
    let criticality = vec![1., 6., 2., 5., 3., 4.];
    let params = ShakeParams { critical_elements: 3, shuffle_critical: true, max_attempts: 10 };

    for _ in 0..20 {
        let snapshot = tabu.history.iter().cloned().collect::<Vec<_>>();

        let outcome = tabu_critical_shake(&priority, &criticality, &params, &mut tabu, &random);

        if !outcome.is_duplicate {
            assert!(!snapshot.contains(&outcome.priority));
        }
        assert!(tabu.contains(&outcome.priority));
        priority = outcome.priority;
    }
}

#[test]
fn can_evict_oldest_tabu_sequence() {
    let mut tabu = TabuList::new(2);

    tabu.push(vec![0, 1]);
    tabu.push(vec![1, 0]);
    tabu.push(vec![0, 1]);
    assert_eq!(tabu.len(), 2);
    assert!(tabu.contains(&[0, 1]));
    assert!(tabu.contains(&[1, 0]));

    tabu.push(vec![2, 2]);
    assert!(!tabu.contains(&[1, 0]));
    assert!(tabu.contains(&[0, 1]));

    tabu.push(vec![3, 3]);
    assert!(!tabu.contains(&[0, 1]));
    assert_eq!(tabu.len(), 2);
}

#[test]
fn can_store_nothing_with_zero_capacity() {
    let mut tabu = TabuList::new(0);

    tabu.push(vec![0]);

    assert!(tabu.is_empty());
    assert!(!tabu.contains(&[0]));
}

#[test]
fn can_calculate_period_criticality() {
    let instance = create_evaluation_instance();
    let assignment = Assignment::from_lists(vec![vec![1], vec![0]]);
    let mut costs = CostTable::new(2, 2, 1.);
    costs.set(0, 1, 6.);
    costs.set(1, 0, 12.);

    let criticality = period_criticality(&instance, &assignment, &costs);

    assert_eq!(criticality, vec![6. / 3., 12. / 6.]);
}
