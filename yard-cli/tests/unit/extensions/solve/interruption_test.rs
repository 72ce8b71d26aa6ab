use super::*;

#[test]
fn can_reach_time_limit() {
    let quota = create_interruption_quota(Some(0.));

    assert!(quota.is_reached());
    assert_eq!(quota.remaining(), Some(Duration::ZERO));
}

#[test]
fn can_create_unlimited_quota_many_times() {
    let quotas = (0..3).map(|_| create_interruption_quota(None)).collect::<Vec<_>>();

    assert!(quotas.iter().all(|quota| !quota.is_reached()));
    assert!(quotas.iter().all(|quota| quota.remaining().is_none()));
}

#[test]
fn can_report_remaining_time_of_inner_quota() {
    let quota = create_interruption_quota(Some(3600.));

    assert!(!quota.is_reached());
    assert!(quota.remaining().is_some_and(|remaining| remaining > Duration::from_secs(3500)));
}
