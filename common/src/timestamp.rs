//! [`Timestamp`]-related definitions.

use std::{fmt, marker::PhantomData};

use crate::DateTimeOf;

/// Untyped millisecond timestamp.
pub type Timestamp = TimestampOf;

/// Number of milliseconds since the Unix epoch, or the [`UNSET`] sentinel.
///
/// Any non-positive input is normalized into [`UNSET`] on creation, so a
/// [`Timestamp`] is either strictly positive or exactly `-1`.
///
/// [`UNSET`]: TimestampOf::UNSET
pub struct TimestampOf<Of: ?Sized = ()> {
    /// Milliseconds since the Unix epoch, or `-1`.
    millis: i64,

    /// Type parameter describing the kind of timestamp.
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> TimestampOf<Of> {
    /// [`Timestamp`] meaning that no time has been recorded.
    pub const UNSET: Self = Self {
        millis: -1,
        _of: PhantomData,
    };

    /// Creates a new [`Timestamp`] out of the provided milliseconds,
    /// normalizing any value `<= 0` into [`Timestamp::UNSET`].
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        if millis > 0 {
            Self {
                millis,
                _of: PhantomData,
            }
        } else {
            Self::UNSET
        }
    }

    /// Returns the raw milliseconds of this [`Timestamp`], or `-1` if it's
    /// [`Timestamp::UNSET`].
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.millis
    }

    /// Indicates whether this [`Timestamp`] is [`Timestamp::UNSET`].
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.millis <= 0
    }

    /// Converts this [`Timestamp`] into a [`DateTimeOf`].
    ///
    /// [`None`] is returned if this [`Timestamp`] is [`Timestamp::UNSET`] or
    /// lies outside the representable range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTimeOf<Of>> {
        if self.is_unset() {
            return None;
        }
        DateTimeOf::from_unix_timestamp_millis(self.millis)
    }

    /// Indicates whether this [`Timestamp`] is set and lies strictly after
    /// the provided [`DateTimeOf`].
    #[must_use]
    pub fn is_after<AtOf: ?Sized>(self, at: DateTimeOf<AtOf>) -> bool {
        !self.is_unset() && self.millis > at.unix_timestamp_millis()
    }
}

impl<Of: ?Sized> Default for TimestampOf<Of> {
    fn default() -> Self {
        Self::UNSET
    }
}

impl<Of: ?Sized> From<i64> for TimestampOf<Of> {
    fn from(millis: i64) -> Self {
        Self::new(millis)
    }
}

impl<Of: ?Sized> From<TimestampOf<Of>> for i64 {
    fn from(ts: TimestampOf<Of>) -> Self {
        ts.millis
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for TimestampOf<Of> {
    fn from(dt: DateTimeOf<Of>) -> Self {
        Self::new(dt.unix_timestamp_millis())
    }
}

impl<Of: ?Sized> Copy for TimestampOf<Of> {}
impl<Of: ?Sized> Clone for TimestampOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for TimestampOf<Of> {}
impl<Of: ?Sized> PartialEq for TimestampOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.millis == other.millis
    }
}

impl<Of: ?Sized> fmt::Debug for TimestampOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            f.write_str("Timestamp(unset)")
        } else {
            write!(f, "Timestamp({})", self.millis)
        }
    }
}

impl<Of: ?Sized> fmt::Display for TimestampOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.millis)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TimestampOf;

    impl<Of: ?Sized> Serialize for TimestampOf<Of> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_i64(self.millis)
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for TimestampOf<Of> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            i64::deserialize(deserializer).map(Self::new)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use crate::DateTime;

    use super::Timestamp;

    #[test]
    fn normalizes_non_positive_values() {
        for millis in [0, -1, -2, i64::MIN] {
            let ts = Timestamp::new(millis);

            assert!(ts.is_unset(), "{millis} is not unset");
            assert_eq!(ts.millis(), -1);
            assert_eq!(ts, Timestamp::UNSET);
        }
    }

    #[test]
    fn keeps_positive_values() {
        for millis in [1, 1_700_000_000_000, i64::MAX] {
            let ts = Timestamp::new(millis);

            assert!(!ts.is_unset());
            assert_eq!(ts.millis(), millis);
        }
    }

    #[test]
    fn converts_to_datetime() {
        assert!(Timestamp::UNSET.to_datetime().is_none());
        assert!(Timestamp::new(i64::MAX).to_datetime().is_none());

        let dt = Timestamp::new(1_700_000_000_123).to_datetime().unwrap();
        assert_eq!(dt.unix_timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn compares_with_datetime() {
        let now = DateTime::now();

        assert!(Timestamp::from(now + Duration::from_secs(60)).is_after(now));
        assert!(!Timestamp::from(now - Duration::from_secs(60)).is_after(now));
        assert!(!Timestamp::from(now).is_after(now));
        assert!(!Timestamp::UNSET.is_after(now));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_normalized() {
        for input in ["0", "-5"] {
            let ts: Timestamp = serde_json::from_str(input).unwrap();
            assert_eq!(ts, Timestamp::UNSET, "{input} is not unset");
            assert_eq!(serde_json::to_string(&ts).unwrap(), "-1");
        }

        let ts: Timestamp = serde_json::from_str("42").unwrap();
        assert_eq!(ts.millis(), 42);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "42");
    }
}
