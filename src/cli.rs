use clap::Parser;

#[derive(Parser)]
#[command(name = "hunters")]
#[command(
    author,
    version,
    about = "Create the hunters table, run inserts, reads, a delete and an update, and print the result",
    after_help = "Connection settings come from HUNTERS_DB_HOST, HUNTERS_DB_USER, HUNTERS_DB_PASSWORD and HUNTERS_DB_NAME (a .env file is also read). Set HUNTERS_PLAN_FILE to use a TOML sample plan."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
