//! Domain definitions.

pub mod authentication;
pub mod authority;
pub mod details;
pub mod principal;

pub use self::{
    authentication::Authentication,
    authority::Authority,
    details::{Credentials, Details},
    principal::Principal,
};
