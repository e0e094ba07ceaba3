use thiserror::Error;
use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

use super::descriptor::ConnectionDescriptor;
use super::EXPECTED_SCHEME;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("DATABASE_URL is not set or empty")]
    MissingInput,
    #[error("DATABASE_URL could not be parsed: {0}")]
    MalformedInput(String),
    #[error("DATABASE_URL scheme must be 'postgresql', found '{found}'")]
    SchemeMismatch { found: String },
    #[error("DATABASE_URL has no hostname")]
    MissingHost,
}

/// Parse and sanity-check a connection string.
///
/// Only the string is checked; no connection is attempted. SSL and
/// channel-binding parameters are recorded but never cause a failure.
pub fn validate(input: Option<&str>) -> Result<ConnectionDescriptor, ValidationError> {
    let raw = match input.map(str::trim) {
        None | Some("") => return Err(ValidationError::MissingInput),
        Some(raw) => raw,
    };

    let url = Url::parse(raw).map_err(|e| match e {
        // `user@/db` and friends: an authority with nothing where the host goes.
        ParseError::EmptyHost => match raw.split_once("://") {
            Some((scheme, _)) if !scheme.eq_ignore_ascii_case(EXPECTED_SCHEME) => {
                ValidationError::SchemeMismatch {
                    found: scheme.to_ascii_lowercase(),
                }
            }
            _ => ValidationError::MissingHost,
        },
        other => ValidationError::MalformedInput(other.to_string()),
    })?;

    if url.scheme() != EXPECTED_SCHEME {
        return Err(ValidationError::SchemeMismatch {
            found: url.scheme().to_string(),
        });
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(ValidationError::MissingHost),
    };

    let query_value = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };

    Ok(ConnectionDescriptor {
        scheme: url.scheme().to_string(),
        host,
        port: url.port(),
        username: Some(url.username())
            .filter(|u| !u.is_empty())
            .map(str::to_string),
        database: percent_decode_str(url.path().trim_start_matches('/'))
            .decode_utf8_lossy()
            .into_owned(),
        sslmode: query_value("sslmode"),
        channel_binding: query_value("channel_binding"),
    })
}
