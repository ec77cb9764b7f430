use super::SignedHeader;
use std::fmt;

impl fmt::Display for SignedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={},s={},f={},v1={}",
            self.epoch, self.submission_id, self.form_id, self.signature
        )
    }
}
