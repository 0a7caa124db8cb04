//! [`Authority`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Authentication;

/// Permission or role granted to an [`Authentication`].
///
/// Opaque to this crate: [`Authority`]s are compared by value and never
/// interpreted.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Creates a new [`Authority`].
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    /// Returns this [`Authority`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
