//! Los semaforos por los que se coordinan el barbero y los clientes.
//!
//! Ademas de los cuatro semaforos y la bandera de cierre, se lleva la cuenta
//! de quien ocupa la sala de espera y la silla del barbero para poder
//! verificar las invariantes mientras corre la simulacion.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use std_semaphore::{Semaphore, SemaphoreGuard};
use tracing::{debug, trace};

use crate::error::BarberShopError;

const INITIAL_BARBER_CHAIR: isize = 1;
const INITIAL_WAKE_UPS: isize = 0;
const INITIAL_HAIRCUTS_DONE: isize = 0;

pub struct ShopSync {
    /// Limita cuantos clientes esperan a la vez.
    waiting_room: Semaphore,
    /// Exclusion mutua sobre la silla del barbero.
    barber_chair: Semaphore,
    /// Despierta al barbero. Los permisos quedan guardados aunque el barbero
    /// todavia no este esperando.
    wake_barber: Semaphore,
    /// Libera al cliente sentado cuando termina el corte.
    haircut_done: Semaphore,
    /// Solo la escribe la barberia, una vez que se fueron todos los clientes.
    closing: AtomicBool,
    capacity: usize,
    waiting_now: AtomicUsize,
    peak_waiting: AtomicUsize,
    chair_holder: Mutex<Option<usize>>,
}

/// Lugar en la sala de espera. Al soltarlo se libera el permiso.
pub struct WaitingSlot<'a> {
    sync: &'a ShopSync,
    client: usize,
    _permit: SemaphoreGuard<'a>,
}

/// La silla del barbero tomada por un cliente.
pub struct BarberChair<'a> {
    sync: &'a ShopSync,
    client: usize,
    _permit: SemaphoreGuard<'a>,
}

impl ShopSync {
    pub fn new(chairs: usize) -> Result<Self, BarberShopError> {
        if chairs == 0 {
            return Err(BarberShopError::ResourceInitialization(String::from(
                "la sala de espera no puede tener capacidad cero",
            )));
        }
        let initial_chairs = isize::try_from(chairs).map_err(|_| {
            BarberShopError::ResourceInitialization(format!(
                "capacidad {} fuera de rango para un semaforo",
                chairs
            ))
        })?;
        debug!("[Barberia] Sala de espera con {} sillas", chairs);

        Ok(ShopSync {
            waiting_room: Semaphore::new(initial_chairs),
            barber_chair: Semaphore::new(INITIAL_BARBER_CHAIR),
            wake_barber: Semaphore::new(INITIAL_WAKE_UPS),
            haircut_done: Semaphore::new(INITIAL_HAIRCUTS_DONE),
            closing: AtomicBool::new(false),
            capacity: chairs,
            waiting_now: AtomicUsize::new(0),
            peak_waiting: AtomicUsize::new(0),
            chair_holder: Mutex::new(None),
        })
    }

    /// Bloquea hasta que haya lugar en la sala de espera.
    pub fn enter_waiting_room(&self, client: usize) -> WaitingSlot<'_> {
        let permit = self.waiting_room.access();
        let waiting = self.waiting_now.fetch_add(1, Ordering::SeqCst) + 1;
        assert!(
            waiting <= self.capacity,
            "sala de espera desbordada: {} clientes para {} sillas",
            waiting,
            self.capacity
        );
        self.peak_waiting.fetch_max(waiting, Ordering::SeqCst);
        trace!("[Barberia] Cliente {} ocupa un lugar ({} esperando)", client, waiting);

        WaitingSlot {
            sync: self,
            client,
            _permit: permit,
        }
    }

    /// Bloquea hasta que la silla del barbero quede libre.
    pub fn take_chair(&self, client: usize) -> BarberChair<'_> {
        let permit = self.barber_chair.access();
        let mut holder = self.chair_holder.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            holder.is_none(),
            "cliente {} se sento con el cliente {:?} todavia en la silla",
            client,
            *holder
        );
        *holder = Some(client);
        trace!("[Barberia] Cliente {} ocupa la silla", client);

        BarberChair {
            sync: self,
            client,
            _permit: permit,
        }
    }

    pub fn wake_barber(&self) {
        self.wake_barber.release();
    }

    /// Unico punto donde el barbero se bloquea.
    pub fn wait_for_client(&self) {
        self.wake_barber.acquire();
    }

    pub fn finish_haircut(&self) {
        self.haircut_done.release();
    }

    pub fn wait_for_haircut(&self) {
        self.haircut_done.acquire();
    }

    pub fn close_shop(&self) {
        self.closing.store(true, Ordering::SeqCst);
    }

    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }

    pub fn chair_holder(&self) -> Option<usize> {
        *self.chair_holder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn waiting_now(&self) -> usize {
        self.waiting_now.load(Ordering::SeqCst)
    }

    /// Mayor cantidad de clientes que esperaron a la vez.
    pub fn peak_waiting(&self) -> usize {
        self.peak_waiting.load(Ordering::SeqCst)
    }
}

impl Drop for WaitingSlot<'_> {
    // corre antes de que se libere el permiso
    fn drop(&mut self) {
        let before = self.sync.waiting_now.fetch_sub(1, Ordering::SeqCst);
        trace!(
            "[Barberia] Cliente {} deja la sala de espera ({} esperando)",
            self.client,
            before - 1
        );
    }
}

impl Drop for BarberChair<'_> {
    fn drop(&mut self) {
        let mut holder = self
            .sync
            .chair_holder
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        assert_eq!(
            *holder,
            Some(self.client),
            "la silla cambio de dueno mientras el cliente {} estaba sentado",
            self.client
        );
        *holder = None;
        trace!("[Barberia] Cliente {} libera la silla", self.client);
    }
}
