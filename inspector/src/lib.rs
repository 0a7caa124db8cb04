//! Inspector of serialized [`Authentication`]s.

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

pub mod args;
pub mod config;
pub mod error;
pub mod report;

use std::{fs, io, path::Path};

use authentication::Authentication;
use tracerr::Traced;
use tracing as log;
// Used in binary.
use tracing_subscriber as _;

pub use self::{args::Args, config::Config, error::Error, report::Report};

/// Loads a JSON-serialized [`Authentication`] from the provided `source`.
///
/// # Errors
///
/// If the `source` cannot be read, or doesn't contain a valid
/// [`Authentication`].
pub fn load(source: impl io::Read) -> Result<Authentication, Traced<Error>> {
    let auth: Authentication =
        serde_json::from_reader(io::BufReader::new(source))
            .map_err(tracerr::from_and_wrap!(=> Error))?;

    log::debug!(
        principal = auth.name(),
        authorities = auth.authorities().len(),
        "loaded `Authentication`",
    );

    Ok(auth)
}

/// Loads a JSON-serialized [`Authentication`] from the file at `path`.
///
/// # Errors
///
/// If the file cannot be opened, or doesn't contain a valid
/// [`Authentication`].
pub fn load_file(
    path: impl AsRef<Path>,
) -> Result<Authentication, Traced<Error>> {
    let path = path.as_ref();
    log::debug!("reading token from `{}`", path.display());

    let file =
        fs::File::open(path).map_err(tracerr::from_and_wrap!(=> Error))?;
    load(file).map_err(tracerr::wrap!())
}

#[cfg(test)]
mod spec {
    use super::{load, load_file, Error};

    #[test]
    fn loads_token() {
        let json = br#"{
            "principal": {"id": "1", "name": "marissa"},
            "authorities": ["uaa.user"]
        }"#;

        let auth = load(json.as_slice()).unwrap();

        assert_eq!(auth.name(), "marissa");
        assert!(auth.is_valid());
    }

    #[test]
    fn fails_on_incomplete_token() {
        let json = br#"{"principal": {"id": "1", "name": "marissa"}}"#;

        let err = load(json.as_slice()).unwrap_err();

        assert!(matches!(err.as_ref(), Error::Json(_)));
        assert!(err.to_string().contains("`Authority`s must be provided"));
    }

    #[test]
    fn fails_on_garbage() {
        assert!(load(b"not a token".as_slice()).is_err());
    }

    #[test]
    fn fails_on_missing_file() {
        let err = load_file("does-not-exist.json").unwrap_err();

        assert!(matches!(err.as_ref(), Error::Io(_)));
    }
}
