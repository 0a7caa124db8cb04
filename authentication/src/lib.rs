//! Authenticated session token: identity, grants and session metadata of a
//! user, answering whether the session is currently valid.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod capability;
pub mod domain;

pub use self::{
    capability::Capability,
    domain::{
        authentication::{
            AuthenticatedTime, ExpirationTime, Prototype, UserAttributes,
            ValidationError,
        },
        Authentication, Authority, Credentials, Details, Principal,
    },
};
