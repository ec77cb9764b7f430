//!
//! Utilities for handling base strings
//!
//! The base string is the exact message that gets signed and verified:
//! `<normalised uri>.<submissionId>.<formId>.<epoch>`
//!
//! The URI is normalised with [`uri::normalise`]. Relative references are accepted as they are.
//!

use crate::uri;

/// Request facts the base string is derived from
#[derive(Clone, Copy, Debug)]
pub struct BaseString<'a> {
    /// URI the webhook is delivered to
    pub uri: &'a str,

    /// Submission identifier
    pub submission_id: &'a str,

    /// Form identifier
    pub form_id: &'a str,

    /// Milliseconds since the Unix epoch
    pub epoch: u64,
}

impl From<BaseString<'_>> for String {
    fn from(value: BaseString<'_>) -> Self {
        format!(
            "{}.{}.{}.{}",
            uri::normalise(value.uri),
            value.submission_id,
            value.form_id,
            value.epoch
        )
    }
}

/// Construct the base string for the provided request facts
#[inline]
#[must_use]
pub fn construct(uri: &str, submission_id: &str, form_id: &str, epoch: u64) -> String {
    BaseString {
        uri,
        submission_id,
        form_id,
        epoch,
    }
    .into()
}
