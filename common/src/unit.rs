//! Marker types.

/// Marker type describing a successful authentication.
#[derive(Clone, Copy, Debug)]
pub struct Authentication;

/// Marker type describing an expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;
