use anyhow::Result;
use clap::Parser;
use telegram_bot::{load_config, run_bot, run_broadcast, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Broadcast { text, token } => {
            let config = load_config(token)?;
            let report = run_broadcast(config, &text).await?;
            println!("Broadcast sent to {} users ({} failed)", report.sent, report.failed);
            Ok(())
        }
    }
}
