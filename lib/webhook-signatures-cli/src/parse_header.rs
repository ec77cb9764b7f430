use crate::util::{error_kaomoji, report_success};
use webhook_signatures::header;

pub fn do_it(header: String) -> miette::Result<()> {
    let parsed = match header::parse(&header) {
        Ok(parsed) => parsed,
        Err(err) => return Err(miette::Error::new(err).with_source_code(header)),
    };

    if let Err(err) = parsed.into_signed_header() {
        miette::bail!("{err} {}", error_kaomoji());
    }

    report_success("Header is valid!");

    Ok(())
}
