use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cargo_aurpack::cli::{AurpackCli, Args, CargoCli, Command};
use cargo_aurpack::init::Initializer;
use cargo_aurpack::packer::Packer;

fn main() -> Result<()> {
    // Parse command line arguments - handle both cargo subcommand and direct invocation.
    // Cargo passes the subcommand name as the first argument.
    let cli = if std::env::args().nth(1).as_deref() == Some("aurpack") {
        let CargoCli::Aurpack(cli) = CargoCli::parse();
        cli
    } else {
        AurpackCli::parse()
    };

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.clone();
    let args: Args = cli.into();

    match command {
        Some(Command::Init { force }) => {
            let path = Initializer::new(force).run(&args)?;
            println!("Wrote {}", path.display());
        }
        Some(Command::Pkgbuild) => {
            let packer = Packer::new(args)?;
            print!("{}", packer.render_pkgbuild());
        }
        None => {
            let packer = Packer::new(args)?;
            packer.run()?;
        }
    }

    Ok(())
}
