use clap::Parser;
use neurotrack::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Export(args) => cli::snapshot::export(args).await,
        Command::Import(args) => cli::snapshot::import(args).await,
    }
}
