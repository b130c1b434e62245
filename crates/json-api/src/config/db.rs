//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Table holding deal records. Without it every deal operation fails closed.
    #[arg(long, env = "DEALS_TABLE")]
    pub deals_table: Option<String>,
}
