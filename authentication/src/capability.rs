//! [`Capability`] definitions.

use secrecy::SecretBox;

use crate::domain::{Authentication, Authority, Credentials, Details, Principal};

/// Authenticated session as seen by a security framework.
///
/// The framework treats implementors as opaque and may only call the methods
/// of this trait.
pub trait Capability {
    /// Identity the session has been established for.
    type Principal: ?Sized;

    /// Permission granted to the [`Capability::Principal`].
    type Authority;

    /// Secret proving the session.
    type Credentials: ?Sized;

    /// Metadata of the request the session has been established by.
    type Details;

    /// Returns the display name of the [`Capability::Principal`].
    fn name(&self) -> &str;

    /// Returns the [`Capability::Authority`]s granted to the
    /// [`Capability::Principal`].
    fn authorities(&self) -> &[Self::Authority];

    /// Returns the [`Capability::Credentials`] of the session, if any.
    fn credentials(&self) -> Option<&Self::Credentials>;

    /// Returns the [`Capability::Details`] of the session, if any.
    fn details(&self) -> Option<&Self::Details>;

    /// Returns the [`Capability::Principal`] of the session.
    fn principal(&self) -> &Self::Principal;

    /// Indicates whether the session is valid at the moment of the call.
    fn is_valid(&self) -> bool;

    /// Marks the session as (un)authenticated.
    fn set_authenticated(&mut self, authenticated: bool);
}

impl Capability for Authentication {
    type Principal = Principal;
    type Authority = Authority;
    type Credentials = SecretBox<Credentials>;
    type Details = Details;

    fn name(&self) -> &str {
        self.name()
    }

    fn authorities(&self) -> &[Authority] {
        self.authorities()
    }

    fn credentials(&self) -> Option<&SecretBox<Credentials>> {
        self.credentials()
    }

    fn details(&self) -> Option<&Details> {
        self.details()
    }

    fn principal(&self) -> &Principal {
        self.principal()
    }

    fn is_valid(&self) -> bool {
        self.is_valid()
    }

    fn set_authenticated(&mut self, authenticated: bool) {
        self.set_authenticated(authenticated);
    }
}
