//! El problema del barbero dormilon resuelto con semaforos e hilos.
//!
//! Una sala de espera con capacidad limitada, una unica silla de barbero y N
//! clientes que llegan en momentos aleatorios. Los actores se coordinan solo a
//! traves de los semaforos de [`sync::ShopSync`].
//!
//! Uso: `barbero-semaforos <numero de clientes> <numero de sillas> <semilla aleatoria>`

mod barber;
mod client;
mod config;
mod error;
mod journal;
mod simulation;
mod sync;
mod timing;

use std::env;
use std::process;

use tracing::{debug, error, info};

use crate::config::{LOG_LEVEL_ENV, TIME_UNIT_ENV, USAGE};
use crate::error::BarberShopError;

fn main() {
    let log_level = match config::log_level_from(env::var(LOG_LEVEL_ENV).ok().as_deref()) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    init_logger(log_level);

    if let Err(err) = run() {
        error!("{}", err);
        if matches!(err, BarberShopError::Configuration(_)) {
            eprintln!("{}", USAGE);
        }
        process::exit(1);
    }
}

fn run() -> Result<(), BarberShopError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let time_unit = config::time_unit_from(env::var(TIME_UNIT_ENV).ok().as_deref())?;
    let config = config::parse_args(&args, time_unit)?;

    info!("------------------------------| Barbero dormilon |------------------------------");
    let report = simulation::run(&config)?;
    debug!("[Barberia] {} eventos narrados", report.events.len());
    info!(
        "[Barberia] Atendidos {} clientes, como mucho {} esperando a la vez",
        report.haircuts, report.peak_waiting
    );
    Ok(())
}

fn init_logger(level: tracing::Level) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_thread_names(true)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
