use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Unidades maximas que tarda un cliente en llegar.
pub const TRAVEL_MAX_UNITS: u32 = 5;
/// Unidades maximas que tarda un corte de pelo.
pub const HAIRCUT_MAX_UNITS: u32 = 3;

/// Unico generador aleatorio de la simulacion, compartido por todos los hilos.
/// Se siembra una sola vez; el acceso se serializa con el mutex.
pub struct ShopClock {
    rng: Mutex<StdRng>,
    unit: Duration,
}

impl ShopClock {
    pub fn new(seed: i64, unit: Duration) -> Self {
        ShopClock {
            rng: Mutex::new(StdRng::seed_from_u64(seed as u64)),
            unit,
        }
    }

    /// Entre 1 y `max_units` unidades, ambas inclusive.
    pub fn draw_units(&self, max_units: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(1..=max_units.max(1))
    }

    /// Duerme el hilo actual una cantidad aleatoria de unidades y devuelve lo dormido.
    pub fn random_wait(&self, max_units: u32) -> Duration {
        // el lock se suelta antes de dormir
        let units = self.draw_units(max_units);
        let wait = self.unit * units;
        trace!("[Reloj] Esperando {} unidades ({:?})", units, wait);
        thread::sleep(wait);
        wait
    }
}
