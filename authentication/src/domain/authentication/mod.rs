//! [`Authentication`] definitions.

mod attributes;
mod prototype;
mod record;

use std::{
    collections::{BTreeMap, BTreeSet},
    hash::{Hash, Hasher},
    sync::Arc,
};

use common::{unit, DateTime, DateTimeOf, TimestampOf};
use derive_more::{Display, Error};
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use tracing as log;

use crate::domain::{Authority, Credentials, Details, Principal};

pub use self::{attributes::UserAttributes, prototype::Prototype};

/// Authenticated session of a [`Principal`].
///
/// Only the authenticated indicator, the external groups and the
/// [`UserAttributes`] may change once built. Two [`Authentication`]s are
/// equal whenever their [`Principal`]s and [`Authority`]s are equal, no matter
/// their credentials, details, times, groups or attributes.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(into = "record::Record", try_from = "record::Record")]
pub struct Authentication {
    /// [`Principal`] of this [`Authentication`].
    principal: Arc<Principal>,

    /// [`Authority`]s granted to the [`Principal`].
    authorities: Vec<Authority>,

    /// [`Credentials`] the [`Principal`] has been authenticated with.
    credentials: Option<SecretBox<Credentials>>,

    /// [`Details`] of the authentication request.
    details: Option<Details>,

    /// Indicator whether the [`Principal`] is authenticated.
    authenticated: bool,

    /// [`AuthenticatedTime`] of this [`Authentication`].
    authenticated_time: AuthenticatedTime,

    /// [`ExpirationTime`] of this [`Authentication`].
    expires_at: ExpirationTime,

    /// Groups of the [`Principal`] sourced from an external identity
    /// provider.
    external_groups: Option<BTreeSet<String>>,

    /// [`UserAttributes`] of the [`Principal`].
    user_attributes: Option<UserAttributes>,
}

impl Authentication {
    /// Builds a new [`Authentication`] out of the provided [`Prototype`].
    ///
    /// Non-positive times are stored as unset.
    ///
    /// # Errors
    ///
    /// If the [`Prototype`] misses its [`Principal`] or [`Authority`]s. An
    /// empty list of [`Authority`]s is fine.
    pub fn new(prototype: Prototype) -> Result<Self, ValidationError> {
        use ValidationError as E;

        let Prototype {
            principal,
            authorities,
            credentials,
            details,
            authenticated,
            authenticated_time,
            expires_at,
            external_groups,
            attributes,
        } = prototype;

        let Some(principal) = principal else {
            log::debug!("rejected `Authentication` without `Principal`");
            return Err(E::MissingPrincipal);
        };
        let Some(authorities) = authorities else {
            log::debug!(
                principal = principal.name(),
                "rejected `Authentication` without `Authority`s",
            );
            return Err(E::MissingAuthorities);
        };

        log::debug!(
            principal = principal.name(),
            authorities = authorities.len(),
            authenticated,
            "built `Authentication`",
        );

        Ok(Self {
            principal,
            authorities,
            credentials,
            details,
            authenticated,
            authenticated_time: AuthenticatedTime::new(authenticated_time),
            expires_at: ExpirationTime::new(expires_at),
            external_groups,
            user_attributes: attributes,
        })
    }

    /// Returns the display name of the [`Principal`].
    #[must_use]
    pub fn name(&self) -> &str {
        self.principal.name()
    }

    /// Returns the [`Principal`] of this [`Authentication`].
    #[must_use]
    pub fn principal(&self) -> &Arc<Principal> {
        &self.principal
    }

    /// Returns the [`Authority`]s granted to the [`Principal`], in the order
    /// they were provided.
    #[must_use]
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    /// Returns the [`Credentials`] of this [`Authentication`], if any.
    #[must_use]
    pub fn credentials(&self) -> Option<&SecretBox<Credentials>> {
        self.credentials.as_ref()
    }

    /// Returns the [`Details`] of this [`Authentication`], if any.
    #[must_use]
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Returns the [`AuthenticatedTime`] of this [`Authentication`].
    #[must_use]
    pub fn authenticated_time(&self) -> AuthenticatedTime {
        self.authenticated_time
    }

    /// Returns the [`ExpirationTime`] of this [`Authentication`].
    #[must_use]
    pub fn expires_at(&self) -> ExpirationTime {
        self.expires_at
    }

    /// Indicates whether this [`Authentication`] is currently valid.
    ///
    /// Checks the clock on every call, so an [`Authentication`] becomes
    /// invalid as soon as it expires.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(DateTime::now())
    }

    /// Indicates whether this [`Authentication`] is valid at the provided
    /// [`DateTime`].
    ///
    /// That is, whether it's marked as authenticated and either never expires
    /// or expires strictly after `now`.
    #[must_use]
    pub fn is_valid_at<Of: ?Sized>(&self, now: DateTimeOf<Of>) -> bool {
        if !self.authenticated {
            return false;
        }
        if self.expires_at.is_unset() || self.expires_at.is_after(now) {
            return true;
        }

        log::trace!(
            principal = self.name(),
            expires_at = %self.expires_at,
            "`Authentication` has expired",
        );
        false
    }

    /// Marks this [`Authentication`] as (un)authenticated.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    /// Returns the external groups of the [`Principal`], if any.
    #[must_use]
    pub fn external_groups(&self) -> Option<&BTreeSet<String>> {
        self.external_groups.as_ref()
    }

    /// Replaces the external groups of the [`Principal`].
    pub fn set_external_groups(
        &mut self,
        groups: impl Into<Option<BTreeSet<String>>>,
    ) {
        self.external_groups = groups.into();
    }

    /// Returns a copy of the [`UserAttributes`] of the [`Principal`].
    ///
    /// Empty [`UserAttributes`] are returned if none were set.
    #[must_use]
    pub fn user_attributes(&self) -> UserAttributes {
        self.user_attributes.clone().unwrap_or_default()
    }

    /// Returns a copy of the [`UserAttributes`] of the [`Principal`] as a
    /// plain map.
    ///
    /// An empty map is returned if no [`UserAttributes`] were set.
    #[must_use]
    pub fn user_attributes_as_map(&self) -> BTreeMap<String, Vec<String>> {
        self.user_attributes().into_map()
    }

    /// Replaces all the [`UserAttributes`] of the [`Principal`].
    ///
    /// Values of every key are kept in the provided order, duplicates
    /// included.
    pub fn set_user_attributes<K, V>(
        &mut self,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        self.user_attributes = Some(attributes.into_iter().collect());
    }
}

impl TryFrom<Prototype> for Authentication {
    type Error = ValidationError;

    fn try_from(prototype: Prototype) -> Result<Self, Self::Error> {
        Self::new(prototype)
    }
}

impl Eq for Authentication {}
impl PartialEq for Authentication {
    fn eq(&self, other: &Self) -> bool {
        self.authorities == other.authorities
            && self.principal == other.principal
    }
}

impl Hash for Authentication {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authorities.hash(state);
        self.principal.hash(state);
    }
}

/// Error of building an [`Authentication`] out of a [`Prototype`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// [`Prototype`] has no [`Principal`].
    #[display("`Principal` must be provided")]
    MissingPrincipal,

    /// [`Prototype`] has no [`Authority`]s.
    #[display("`Authority`s must be provided")]
    MissingAuthorities,
}

/// Time when a [`Principal`] has been authenticated.
pub type AuthenticatedTime =
    TimestampOf<(Authentication, unit::Authentication)>;

/// Time when an [`Authentication`] expires.
pub type ExpirationTime = TimestampOf<(Authentication, unit::Expiration)>;
