use clap::Parser;
use book_records_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::HashKey { key } => {
            cli::print_key_hash(&key);
            Ok(())
        }
    }
}
