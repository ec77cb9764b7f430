use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod parse_header;
mod sign;
mod util;
mod verify;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let ToolArgs {
        config,
        mode,
        subcommand,
    } = ToolArgs::parse();

    match subcommand {
        ToolSubcommand::ParseHeader(args) => parse_header::do_it(args.header),
        ToolSubcommand::Sign(args) => sign::do_it(&config::load(&config, mode)?, args),
        ToolSubcommand::Verify(args) => verify::do_it(&config::load(&config, mode)?, &args),
    }
}
