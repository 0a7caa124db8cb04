//! [`Error`]-related definitions.

use std::io;

use derive_more::{Display, Error as StdError, From};

/// Error of loading a serialized [`Authentication`].
///
/// [`Authentication`]: authentication::Authentication
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read the serialized token.
    #[display("failed to read token: {_0}")]
    Io(io::Error),

    /// Serialized token is malformed or incomplete.
    #[display("failed to decode token: {_0}")]
    Json(serde_json::Error),
}
