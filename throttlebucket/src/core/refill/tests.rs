use super::Refill;
use std::time::Duration;

#[test]
fn test_refill_per_second() {
    let refill = Refill::per_second(10);
    assert_eq!(refill.amount(), 10);
    assert_eq!(refill.interval(), Duration::from_secs(1));
}

#[test]
fn test_refill_per_minute_hour_day() {
    assert_eq!(Refill::per_minute(60).interval(), Duration::from_secs(60));
    assert_eq!(Refill::per_hour(3).interval(), Duration::from_secs(3600));
    assert_eq!(Refill::per_day(20).interval(), Duration::from_secs(86_400));
    assert_eq!(Refill::per_day(20).amount(), 20);
}

#[test]
fn test_cycles_only_count_full_intervals() {
    let refill = Refill::new(3, Duration::from_secs(3));

    assert_eq!(refill.cycles(Duration::ZERO), 0);
    assert_eq!(refill.cycles(Duration::from_millis(1500)), 0);
    assert_eq!(refill.cycles(Duration::from_millis(2999)), 0);
    assert_eq!(refill.cycles(Duration::from_secs(3)), 1);
    assert_eq!(refill.cycles(Duration::from_millis(8999)), 2);
}

#[test]
fn test_cycles_with_zero_interval() {
    let refill = Refill::new(1, Duration::ZERO);
    assert_eq!(refill.cycles(Duration::from_secs(10)), 0);
}

#[test]
fn test_span_is_whole_cycles() {
    let refill = Refill::new(1, Duration::from_millis(250));
    assert_eq!(refill.span(0), Duration::ZERO);
    assert_eq!(refill.span(3), Duration::from_millis(750));
    assert_eq!(refill.span(8), Duration::from_secs(2));
}

#[test]
fn test_grant_saturates() {
    let refill = Refill::new(i64::MAX / 2, Duration::from_secs(1));
    assert_eq!(refill.grant(1), i64::MAX / 2);
    assert_eq!(refill.grant(3), i64::MAX);
    assert_eq!(refill.grant(u128::MAX), i64::MAX);
}

#[test]
fn test_grant_with_zero_amount() {
    let refill = Refill::new(0, Duration::from_secs(1));
    assert_eq!(refill.grant(1_000), 0);
}
