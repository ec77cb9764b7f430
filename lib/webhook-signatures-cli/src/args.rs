use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use webhook_signatures::Mode;

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,
}

#[derive(Args)]
pub struct SignArgs {
    /// Full URI the webhook will be delivered to
    #[arg(long)]
    pub uri: String,

    /// Submission identifier
    #[arg(long)]
    pub submission_id: String,

    /// Form identifier
    #[arg(long)]
    pub form_id: String,

    /// Milliseconds since the Unix epoch. Defaults to now
    #[arg(long)]
    pub epoch: Option<u64>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Full URI the webhook was delivered to
    #[arg(long)]
    pub uri: String,

    /// Value of the signature header
    pub header: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Sign a webhook and print the signature header
    Sign(SignArgs),

    /// Authenticate a signature header
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    /// Path to the TOML configuration
    #[arg(
        default_value = "webhook-signatures.toml",
        env = "WEBHOOK_SIGNATURES_CONFIG",
        global = true,
        long,
        short
    )]
    pub config: PathBuf,

    /// Override the configured mode
    #[arg(global = true, long, short)]
    pub mode: Option<Mode>,

    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
