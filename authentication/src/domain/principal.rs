//! [`Principal`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Authentication;

/// Identity an [`Authentication`] has been issued for.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// ID of this [`Principal`].
    pub id: Id,

    /// Display name of this [`Principal`].
    pub name: String,

    /// Email address of this [`Principal`].
    #[serde(default)]
    pub email: String,

    /// Alias of the identity provider this [`Principal`] originates from.
    #[serde(default = "Principal::default_origin")]
    pub origin: String,

    /// ID of this [`Principal`] in its identity provider, if any.
    #[serde(default)]
    pub external_id: Option<String>,

    /// ID of the zone this [`Principal`] belongs to.
    #[serde(default = "Principal::default_zone_id")]
    pub zone_id: String,
}

impl Principal {
    /// Origin of [`Principal`]s managed by the local user store.
    pub const DEFAULT_ORIGIN: &'static str = "uaa";

    /// ID of the default zone.
    pub const DEFAULT_ZONE_ID: &'static str = "uaa";

    /// Creates a new [`Principal`] of the local user store in the default
    /// zone.
    #[must_use]
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            origin: Self::default_origin(),
            external_id: None,
            zone_id: Self::default_zone_id(),
        }
    }

    /// Returns the display name of this [`Principal`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns [`Principal::DEFAULT_ORIGIN`] as an owned value.
    fn default_origin() -> String {
        Self::DEFAULT_ORIGIN.to_owned()
    }

    /// Returns [`Principal::DEFAULT_ZONE_ID`] as an owned value.
    fn default_zone_id() -> String {
        Self::DEFAULT_ZONE_ID.to_owned()
    }
}

/// ID of a [`Principal`].
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
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

#[cfg(test)]
mod spec {
    use super::Principal;

    #[test]
    fn deserializes_with_defaults() {
        let principal: Principal =
            serde_json::from_str(r#"{"id":"42","name":"marissa"}"#).unwrap();

        assert_eq!(principal, Principal::new("42", "marissa"));
        assert_eq!(principal.origin, "uaa");
        assert_eq!(principal.zone_id, "uaa");
        assert_eq!(principal.external_id, None);
    }

    #[test]
    fn compares_all_fields() {
        let local = Principal::new("42", "marissa");
        let mut ldap = local.clone();
        ldap.origin = "ldap".to_owned();

        assert_ne!(local, ldap);
        assert_eq!(local, Principal::new("42", "marissa"));
    }
}
