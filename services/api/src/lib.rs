mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use knowing_me::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
