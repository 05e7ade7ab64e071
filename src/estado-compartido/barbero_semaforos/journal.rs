//! Narracion de la simulacion.
//!
//! Cada transicion de estado de un actor se registra como un [`Event`]: se
//! imprime con `tracing` y queda guardada en orden para poder revisarla al
//! terminar.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Traveling(usize),
    Arrived(usize),
    EnteredWaitingRoom(usize),
    WokeBarber(usize),
    Departed(usize),
    BarberSleeping,
    Cutting(usize),
    FinishedCutting(usize),
    BarberWentHome,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Event::Traveling(id) => write!(f, "[Cliente {}] Esta por llegar a la barberia.", id),
            Event::Arrived(id) => write!(f, "[Cliente {}] Llego a la barberia.", id),
            Event::EnteredWaitingRoom(id) => {
                write!(f, "[Cliente {}] Entra a la sala de espera.", id)
            }
            Event::WokeBarber(id) => write!(f, "[Cliente {}] Despierta al barbero.", id),
            Event::Departed(id) => write!(f, "[Cliente {}] Se va de la barberia.", id),
            Event::BarberSleeping => write!(f, "[Barbero] Durmiendo."),
            Event::Cutting(id) => write!(f, "[Barbero] Cortando pelo al cliente {}.", id),
            Event::FinishedCutting(id) => {
                write!(f, "[Barbero] Termine de cortar el pelo al cliente {}.", id)
            }
            Event::BarberWentHome => write!(f, "[Barbero] Se vuelve a casa feliz por hoy."),
        }
    }
}

#[derive(Debug, Default)]
pub struct Journal {
    events: Mutex<Vec<Event>>,
}

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    pub fn record(&self, event: Event) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        // se loguea con el lock tomado para que la salida respete el orden guardado
        info!("{}", event);
        events.push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
