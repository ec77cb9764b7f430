use crate::{args::SignArgs, util::error_kaomoji};
use webhook_signatures::{clock, Configuration, Webhooks};

pub fn do_it(config: &Configuration, args: SignArgs) -> miette::Result<()> {
    let webhooks = Webhooks::from_config(config)?;
    let Some(signer) = webhooks.signer() else {
        miette::bail!(
            "No webhook secret key configured, signing is unavailable {}",
            error_kaomoji()
        );
    };

    let epoch = args.epoch.unwrap_or_else(clock::now_millis);
    let header = signer.sign(&args.uri, &args.submission_id, &args.form_id, epoch)?;

    println!("{header}");

    Ok(())
}
