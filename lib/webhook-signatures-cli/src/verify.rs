use crate::{args::VerifyArgs, util::report_success};
use webhook_signatures::{Configuration, Webhooks};

pub fn do_it(config: &Configuration, args: &VerifyArgs) -> miette::Result<()> {
    let webhooks = Webhooks::from_config(config)?;
    webhooks.authenticate(&args.header, &args.uri)?;

    report_success("Signature is valid!");

    Ok(())
}
