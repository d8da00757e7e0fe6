use clap::Parser;
use colored::Colorize;
use icogen_cli::commands;

#[tokio::main]
async fn main() {
    // Interrupting a prompt ends the session normally.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            std::process::exit(0);
        }
    });

    let cli = commands::Cli::parse();

    if let Err(e) = commands::execute(cli).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
