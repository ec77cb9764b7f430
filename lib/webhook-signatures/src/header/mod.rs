//!
//! Signature header codec
//!
//! Wire form: `t=<epoch>,s=<submissionId>,f=<formId>,v1=<signature>`
//!
//! Values are not escaped. A submission or form ID containing `,` or `=` can't be represented,
//! and changing that would break compatibility with existing senders.
//!

use crate::{Error, Result};
use http::HeaderValue;

mod parse;
mod serialise;

pub use self::parse::{parse, ParseError};

/// Signature header, as decoded from the wire
///
/// Fields are borrowed from the input and may be absent. Presence is checked by [`ParsedHeader::into_signed_header`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    /// Raw `t` value
    pub epoch: Option<&'a str>,

    /// `s` value
    pub submission_id: Option<&'a str>,

    /// `f` value
    pub form_id: Option<&'a str>,

    /// `v1` value
    pub signature: Option<&'a str>,
}

impl ParsedHeader<'_> {
    /// Ensure every field is present and non-empty and the epoch is a positive integer
    pub fn into_signed_header(self) -> Result<SignedHeader> {
        let epoch = self
            .epoch
            .and_then(|epoch| epoch.parse::<u64>().ok())
            .filter(|epoch| *epoch > 0);

        let (Some(epoch), Some(submission_id), Some(form_id), Some(signature)) = (
            epoch,
            non_empty(self.submission_id),
            non_empty(self.form_id),
            non_empty(self.signature),
        ) else {
            return Err(Error::InvalidHeader);
        };

        Ok(SignedHeader {
            epoch,
            submission_id: submission_id.to_owned(),
            form_id: form_id.to_owned(),
            signature: signature.to_owned(),
        })
    }
}

#[inline]
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Well-formed signature header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignedHeader {
    /// Milliseconds since the Unix epoch
    pub epoch: u64,

    /// Submission identifier
    pub submission_id: String,

    /// Form identifier
    pub form_id: String,

    /// Base64-encoded signature
    pub signature: String,
}

impl SignedHeader {
    /// Decode a header and check that it is well-formed
    pub fn decode(input: &str) -> Result<Self> {
        parse(input)?.into_signed_header()
    }

    /// Encode the header into its wire form
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Encode the header into an HTTP header value
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.encode()).map_err(Error::from)
    }
}
