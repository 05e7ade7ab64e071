//! Lectura de la configuracion de la simulacion.
//!
//! Los tres parametros posicionales vienen de la linea de comandos; la
//! duracion de la unidad de tiempo y el nivel de log se pueden ajustar por
//! variables de entorno.

use std::time::Duration;

use tracing::Level;

use crate::error::BarberShopError;

/// Maxima cantidad de clientes que soporta la barberia.
pub const MAX_CLIENTS: usize = 25;

pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;
pub const TIME_UNIT_ENV: &str = "BARBERO_UNIDAD_MS";
pub const LOG_LEVEL_ENV: &str = "BARBERO_LOG";

pub const LOG_LVL_INFO: &str = "info";
pub const LOG_LVL_DEBUG: &str = "debug";
pub const LOG_LVL_TRACE: &str = "trace";

pub const USAGE: &str =
    "Uso: barbero-semaforos <numero de clientes> <numero de sillas> <semilla aleatoria>";

const EXPECTED_ARGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub clients: usize,
    /// Capacidad de la sala de espera.
    pub chairs: usize,
    pub seed: i64,
    /// Cuanto dura una unidad de las esperas aleatorias.
    pub time_unit: Duration,
}

/// Recibe los argumentos sin el nombre del programa.
pub fn parse_args(args: &[String], time_unit: Duration) -> Result<SimulationConfig, BarberShopError> {
    let [clients, chairs, seed] = args else {
        return Err(BarberShopError::Configuration(format!(
            "se esperaban {} argumentos y llegaron {}",
            EXPECTED_ARGS,
            args.len()
        )));
    };

    let clients = parse_integer(clients, "numero de clientes")?;
    if clients < 1 || clients > MAX_CLIENTS as i64 {
        return Err(BarberShopError::Configuration(format!(
            "el numero de clientes debe estar entre 1 y {} (llego {})",
            MAX_CLIENTS, clients
        )));
    }

    let chairs = parse_integer(chairs, "numero de sillas")?;
    if chairs < 1 {
        return Err(BarberShopError::Configuration(format!(
            "la sala de espera necesita al menos una silla (llego {})",
            chairs
        )));
    }

    let seed = parse_integer(seed, "semilla aleatoria")?;

    Ok(SimulationConfig {
        clients: to_usize(clients)?,
        chairs: to_usize(chairs)?,
        seed,
        time_unit,
    })
}

/// Unidad de tiempo a partir del valor de `BARBERO_UNIDAD_MS`, si esta definida.
pub fn time_unit_from(value: Option<&str>) -> Result<Duration, BarberShopError> {
    let Some(value) = value else {
        return Ok(Duration::from_millis(DEFAULT_TIME_UNIT_MS));
    };
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            BarberShopError::Configuration(format!("{} invalido: {}", TIME_UNIT_ENV, value))
        })
}

pub fn log_level_from(value: Option<&str>) -> Result<Level, BarberShopError> {
    match value.map(str::trim) {
        None | Some(LOG_LVL_INFO) => Ok(Level::INFO),
        Some(LOG_LVL_DEBUG) => Ok(Level::DEBUG),
        Some(LOG_LVL_TRACE) => Ok(Level::TRACE),
        Some(other) => Err(BarberShopError::Configuration(format!(
            "{} invalido: {} (valores: {}, {}, {})",
            LOG_LEVEL_ENV, other, LOG_LVL_INFO, LOG_LVL_DEBUG, LOG_LVL_TRACE
        ))),
    }
}

fn parse_integer(raw: &str, name: &str) -> Result<i64, BarberShopError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| BarberShopError::Configuration(format!("{} no es un entero: {}", name, raw)))
}

fn to_usize(value: i64) -> Result<usize, BarberShopError> {
    usize::try_from(value)
        .map_err(|err| BarberShopError::Configuration(format!("valor fuera de rango: {}", err)))
}
