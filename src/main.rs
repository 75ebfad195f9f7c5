use clap::Parser;
use dotenv::dotenv;

use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;

mod app;
mod cli;
mod config;
mod handlers;
mod logger;
mod models;
mod scripts;
mod services;

#[cfg(test)]
mod tests;

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    app::run_command(cli.command(), &config).await?;
    Ok(())
}
