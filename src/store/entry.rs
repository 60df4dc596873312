//! Store Entry Module
//!
//! Defines stored byte entries and the expiration policy applied on write.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

// == Expiration Policy ==
/// How long a stored entry stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpirationPolicy {
    /// Entry never expires
    #[default]
    Never,
    /// Entry expires the given number of seconds after it was written
    AfterSeconds(u64),
    /// Entry expires at an absolute point in time
    At(DateTime<Utc>),
}

impl ExpirationPolicy {
    /// Builds a policy from a TTL in seconds, where 0 means never expire.
    pub fn from_ttl_seconds(ttl: u64) -> Self {
        if ttl == 0 {
            ExpirationPolicy::Never
        } else {
            ExpirationPolicy::AfterSeconds(ttl)
        }
    }

    /// Resolves the expiration timestamp (Unix milliseconds) for a write at `now_ms`.
    pub fn expires_at_ms(&self, now_ms: u64) -> Option<u64> {
        match self {
            ExpirationPolicy::Never => None,
            ExpirationPolicy::AfterSeconds(ttl) => {
                Some(now_ms.saturating_add(ttl.saturating_mul(1000)))
            }
            ExpirationPolicy::At(at) => Some(at.timestamp_millis().max(0) as u64),
        }
    }
}

// == Store Entry ==
/// A single stored value with optional expiration.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored bytes
    pub bytes: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry whose expiration is derived from `policy`.
    pub fn new(bytes: Vec<u8>, policy: &ExpirationPolicy) -> Self {
        Self {
            bytes,
            expires_at: policy.expires_at_ms(current_timestamp_ms()),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// Returns `Some(0)` once the entry has expired.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_never_expires() {
        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::Never);

        assert_eq!(entry.bytes, b"value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining_ms().is_none());
    }

    #[test]
    fn test_entry_with_ttl() {
        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::AfterSeconds(10));

        assert!(!entry.is_expired());
        let remaining = entry.ttl_remaining_ms().unwrap();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_entry_expiration() {
        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::AfterSeconds(1));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining_ms().unwrap(), 0);
    }

    #[test]
    fn test_absolute_expiration_in_past() {
        let past = Utc::now() - chrono::Duration::seconds(5);
        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::At(past));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_absolute_expiration_in_future() {
        let future = Utc::now() + chrono::Duration::minutes(5);
        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::At(future));

        assert!(!entry.is_expired());
    }

    #[test]
    fn test_from_ttl_zero_is_never() {
        assert_eq!(ExpirationPolicy::from_ttl_seconds(0), ExpirationPolicy::Never);
        assert_eq!(
            ExpirationPolicy::from_ttl_seconds(30),
            ExpirationPolicy::AfterSeconds(30)
        );
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let now = current_timestamp_ms();

        assert_eq!(
            ExpirationPolicy::AfterSeconds(u64::MAX).expires_at_ms(now),
            Some(u64::MAX)
        );
        assert_eq!(
            ExpirationPolicy::AfterSeconds(18_446_744_073_709_552).expires_at_ms(now),
            Some(u64::MAX)
        );

        let entry = StoreEntry::new(b"value".to_vec(), &ExpirationPolicy::AfterSeconds(u64::MAX));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = StoreEntry {
            bytes: Vec::new(),
            expires_at: Some(now),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
