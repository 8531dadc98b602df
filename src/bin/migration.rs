use anyhow::Context;
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use stockledger_api::{config, db, logging, migrator::Migrator};

#[derive(Parser)]
#[command(name = "migration", about = "Stockledger schema maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// Drop everything and re-apply all migrations
    Fresh,
    /// Show migration status
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    logging::init_tracing(cfg.log_level(), cfg.log_json);

    let db_cfg: db::DbConfig = (&cfg).into();
    let pool = db::establish_connection_with_config(&db_cfg)
        .await
        .context("failed to connect to database")?;

    let cli = Cli::parse();
    match cli.command {
        Command::Up => Migrator::up(&pool, None).await?,
        Command::Down => Migrator::down(&pool, Some(1)).await?,
        Command::Fresh => Migrator::fresh(&pool).await?,
        Command::Status => Migrator::status(&pool).await?,
    }

    db::close_pool(pool).await?;
    Ok(())
}
