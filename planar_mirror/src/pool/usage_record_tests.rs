use std::time::Duration;
use super::*;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

// ============================================================================
// Infinite records
// ============================================================================

#[test]
fn test_infinite_record_never_expires() {
    let record = UsageRecord::infinite();

    assert!(!record.is_in_use());
    assert!(!record.is_evictable());
    assert!(!record.is_expired(secs(1_000_000)));
    assert!(record.time_remaining(secs(5)).is_none());
    assert!(record.next_check(secs(5)).is_none());
}

// ============================================================================
// Finite records
// ============================================================================

#[test]
fn test_finite_record_expires_strictly_after_ttl() {
    let record = UsageRecord::with_ttl(secs(2), secs(10));

    assert!(record.is_evictable());
    assert!(!record.is_expired(secs(12)));
    assert!(record.is_expired(secs(12) + Duration::from_millis(1)));
}

#[test]
fn test_record_in_use_never_expires() {
    let mut record = UsageRecord::with_ttl(secs(0), secs(10));
    record.mark_used(secs(1));

    assert!(record.is_in_use());
    assert!(!record.is_expired(secs(100)));

    record.release();
    assert!(record.is_expired(secs(100)));
}

#[test]
fn test_mark_used_postpones_expiry() {
    let mut record = UsageRecord::with_ttl(secs(0), secs(10));
    record.mark_used(secs(8));
    record.release();

    assert_eq!(record.last_used(), secs(8));
    assert!(!record.is_expired(secs(15)));
    assert_eq!(record.time_remaining(secs(15)), Some(secs(3)));
    assert_eq!(record.next_check(secs(15)), Some(secs(18)));
}

#[test]
fn test_time_remaining_saturates() {
    let record = UsageRecord::with_ttl(secs(0), secs(10));

    assert_eq!(record.time_remaining(secs(4)), Some(secs(6)));
    assert_eq!(record.time_remaining(secs(40)), Some(Duration::ZERO));
    // Next check never lies in the past
    assert_eq!(record.next_check(secs(40)), Some(secs(40)));
}
