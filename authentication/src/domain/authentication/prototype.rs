//! [`Prototype`] definitions.

use std::{collections::BTreeSet, sync::Arc};

use secrecy::SecretBox;
use smart_default::SmartDefault;

use crate::domain::{Authority, Credentials, Details, Principal};

use super::{Authentication, UserAttributes, ValidationError};

/// Accumulator of the fields an [`Authentication`] is built from.
///
/// Performs no validation on its own: all the checks and normalizations
/// happen in [`Authentication::new()`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Prototype {
    /// [`Principal`] to authenticate.
    pub(super) principal: Option<Arc<Principal>>,

    /// [`Authority`]s granted to the [`Principal`].
    pub(super) authorities: Option<Vec<Authority>>,

    /// [`Credentials`] the [`Principal`] has been authenticated with.
    pub(super) credentials: Option<SecretBox<Credentials>>,

    /// [`Details`] of the authentication request.
    pub(super) details: Option<Details>,

    /// Indicator whether the [`Principal`] is authenticated.
    pub(super) authenticated: bool,

    /// Milliseconds since the Unix epoch of when the [`Principal`] has been
    /// authenticated.
    #[default(-1)]
    pub(super) authenticated_time: i64,

    /// Milliseconds since the Unix epoch of when the [`Authentication`]
    /// expires.
    #[default(-1)]
    pub(super) expires_at: i64,

    /// Groups of the [`Principal`] sourced from an external identity
    /// provider.
    pub(super) external_groups: Option<BTreeSet<String>>,

    /// [`UserAttributes`] of the [`Principal`].
    pub(super) attributes: Option<UserAttributes>,
}

impl Prototype {
    /// Creates a new [`Prototype`] of an [`Authentication`] that has already
    /// been authenticated.
    #[must_use]
    pub fn already_authenticated() -> Self {
        Self {
            authenticated: true,
            ..Self::default()
        }
    }

    /// Creates a new [`Prototype`] of an [`Authentication`] that is not yet
    /// authenticated.
    #[must_use]
    pub fn not_yet_authenticated() -> Self {
        Self::default()
    }

    /// Sets the [`Principal`].
    #[must_use]
    pub fn with_principal(
        mut self,
        principal: impl Into<Arc<Principal>>,
    ) -> Self {
        self.principal = Some(principal.into());
        self
    }

    /// Sets the [`Authority`]s.
    #[must_use]
    pub fn with_authorities(mut self, authorities: Vec<Authority>) -> Self {
        self.authorities = Some(authorities);
        self
    }

    /// Sets the [`Credentials`].
    #[must_use]
    pub fn with_credentials(
        mut self,
        credentials: impl Into<Credentials>,
    ) -> Self {
        let credentials = credentials.into();
        self.credentials = Some(SecretBox::init_with(move || credentials));
        self
    }

    /// Sets the [`Details`].
    #[must_use]
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Sets the authenticated indicator.
    #[must_use]
    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Sets the authentication time, in milliseconds since the Unix epoch.
    #[must_use]
    pub fn with_authenticated_time(mut self, millis: i64) -> Self {
        self.authenticated_time = millis;
        self
    }

    /// Sets the expiration time, in milliseconds since the Unix epoch.
    #[must_use]
    pub fn with_expires_at(mut self, millis: i64) -> Self {
        self.expires_at = millis;
        self
    }

    /// Sets the external groups.
    #[must_use]
    pub fn with_external_groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.external_groups =
            Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the [`UserAttributes`].
    #[must_use]
    pub fn with_attributes(
        mut self,
        attributes: impl Into<UserAttributes>,
    ) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    /// Returns the [`Principal`], if set.
    #[must_use]
    pub fn principal(&self) -> Option<&Arc<Principal>> {
        self.principal.as_ref()
    }

    /// Returns the [`Authority`]s, if set.
    #[must_use]
    pub fn authorities(&self) -> Option<&[Authority]> {
        self.authorities.as_deref()
    }

    /// Returns the [`Credentials`], if set.
    #[must_use]
    pub fn credentials(&self) -> Option<&SecretBox<Credentials>> {
        self.credentials.as_ref()
    }

    /// Returns the [`Details`], if set.
    #[must_use]
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Returns the authenticated indicator.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the raw authentication time.
    #[must_use]
    pub fn authenticated_time(&self) -> i64 {
        self.authenticated_time
    }

    /// Returns the raw expiration time.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Returns the external groups, if set.
    #[must_use]
    pub fn external_groups(&self) -> Option<&BTreeSet<String>> {
        self.external_groups.as_ref()
    }

    /// Returns the [`UserAttributes`], if set.
    #[must_use]
    pub fn attributes(&self) -> Option<&UserAttributes> {
        self.attributes.as_ref()
    }

    /// Builds an [`Authentication`] out of this [`Prototype`].
    ///
    /// # Errors
    ///
    /// See [`Authentication::new()`].
    pub fn build(self) -> Result<Authentication, ValidationError> {
        Authentication::new(self)
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{Authority, Principal};

    use super::Prototype;

    #[test]
    fn defaults_to_unset_times() {
        let proto = Prototype::not_yet_authenticated();

        assert!(!proto.is_authenticated());
        assert_eq!(proto.authenticated_time(), -1);
        assert_eq!(proto.expires_at(), -1);
        assert!(proto.principal().is_none());
        assert!(proto.authorities().is_none());
        assert!(proto.credentials().is_none());
        assert!(proto.external_groups().is_none());
        assert!(proto.attributes().is_none());
    }

    #[test]
    fn accumulates_fields() {
        let proto = Prototype::already_authenticated()
            .with_principal(Principal::new("1", "marissa"))
            .with_authorities(vec![Authority::from("uaa.user")])
            .with_credentials("koala")
            .with_authenticated_time(10)
            .with_expires_at(20)
            .with_external_groups(["admins"]);

        assert!(proto.is_authenticated());
        assert_eq!(proto.principal().unwrap().name(), "marissa");
        assert_eq!(
            proto.authorities().unwrap(),
            [Authority::from("uaa.user")].as_slice(),
        );
        assert!(proto.credentials().is_some());
        assert_eq!(proto.authenticated_time(), 10);
        assert_eq!(proto.expires_at(), 20);
        assert!(proto.external_groups().unwrap().contains("admins"));
    }
}
