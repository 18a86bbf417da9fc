//! Copia anual de gastos a `expenses_archive`
//!
//! Uso: `archive-expenses --year 2024 [--dry-run]`

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use std::collections::HashSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tourism_backoffice::config::EnvironmentConfig;
use tourism_backoffice::database::DatabaseConnection;
use tourism_backoffice::repositories::expense_repository::ExpenseRepository;
use tourism_backoffice::services::archive::plan_archive;

#[derive(Debug, Parser)]
#[command(name = "archive-expenses", about = "Copia los gastos de un año a expenses_archive")]
struct Args {
    /// Año de vencimiento a archivar
    #[arg(long, value_parser = clap::value_parser!(i32).range(2000..=2100))]
    year: i32,

    /// Mostrar los totales sin escribir nada
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = EnvironmentConfig::from_env().context("configuración inválida")?;
    let db = DatabaseConnection::connect(&config).await?;
    let repository = ExpenseRepository::new(db.pool().clone());

    // el plan separa el año pedido del resto
    let expenses = repository.list(None).await?;
    let archived: HashSet<_> = repository.archived_ids(args.year).await?.into_iter().collect();
    let plan = plan_archive(expenses, args.year, &archived);

    info!(
        "🗄️ Año {}: {} para copiar, {} ya archivados, {} de otros años",
        args.year,
        plan.to_copy.len(),
        plan.skipped_duplicates,
        plan.skipped_other_year
    );

    if args.dry_run {
        info!("🔎 --dry-run: no se escribió nada");
        return Ok(());
    }

    let inserted = repository.archive(&plan.to_copy, args.year).await?;
    info!("✅ {} gastos copiados a expenses_archive", inserted);
    Ok(())
}
