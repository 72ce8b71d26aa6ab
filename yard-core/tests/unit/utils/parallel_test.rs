use super::*;

#[test]
fn can_collect_in_parallel_preserving_order() {
    let source = (0..100).collect::<Vec<_>>();

    let result = parallel_into_collect(source, |item| item * 2);

    assert_eq!(result, (0..100).map(|item| item * 2).collect::<Vec<_>>());
}

#[test]
fn can_execute_on_thread_pool() {
    let pool = ThreadPool::new(2);

    let result = pool.execute(|| parallel_into_collect(vec![1, 2, 3], |item| item + 1));

    assert_eq!(result, vec![2, 3, 4]);
}

#[test]
fn can_create_pool_with_zero_threads() {
    let pool = ThreadPool::new(0);

    assert_eq!(pool.execute(|| rayon::current_num_threads()), 1);
}
