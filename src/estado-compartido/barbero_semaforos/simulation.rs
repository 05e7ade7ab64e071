//! La barberia: arma los semaforos, lanza al barbero y a los clientes,
//! espera a que se vayan todos y manda al barbero a casa.

use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info};

use crate::barber::barber;
use crate::client::client;
use crate::config::SimulationConfig;
use crate::error::BarberShopError;
use crate::journal::{Event, Journal};
use crate::sync::ShopSync;
use crate::timing::ShopClock;

/// Lo que comparte cada actor. Se clona una vez por hilo.
#[derive(Clone)]
pub struct ShopResources {
    pub sync: Arc<ShopSync>,
    pub clock: Arc<ShopClock>,
    pub journal: Arc<Journal>,
}

impl ShopResources {
    pub fn new(chairs: usize, seed: i64, time_unit: Duration) -> Result<Self, BarberShopError> {
        Ok(ShopResources {
            sync: Arc::new(ShopSync::new(chairs)?),
            clock: Arc::new(ShopClock::new(seed, time_unit)),
            journal: Arc::new(Journal::new()),
        })
    }
}

#[derive(Debug)]
pub struct Report {
    pub events: Vec<Event>,
    pub haircuts: usize,
    pub peak_waiting: usize,
}

pub fn run(config: &SimulationConfig) -> Result<Report, BarberShopError> {
    let resources = ShopResources::new(config.chairs, config.seed, config.time_unit)?;
    info!(
        "[Barberia] Abre con {} clientes, {} sillas de espera y semilla {}",
        config.clients, config.chairs, config.seed
    );

    let barber_resources = resources.clone();
    let barber_handle = thread::Builder::new()
        .name(String::from("barbero"))
        .spawn(move || barber(barber_resources))
        .map_err(|err| {
            BarberShopError::ResourceInitialization(format!("no se pudo lanzar al barbero: {}", err))
        })?;

    let mut clients_handle: Vec<JoinHandle<()>> = Vec::with_capacity(config.clients);
    let mut spawn_error = None;
    for id in 0..config.clients {
        let local_resources = resources.clone();
        match thread::Builder::new()
            .name(format!("cliente-{}", id))
            .spawn(move || client(id, local_resources))
        {
            Ok(handle) => clients_handle.push(handle),
            Err(err) => {
                error!("[Barberia] No se pudo lanzar al cliente {}: {}", id, err);
                spawn_error = Some(BarberShopError::ResourceInitialization(format!(
                    "no se pudo lanzar al cliente {}: {}",
                    id, err
                )));
                break;
            }
        }
    }

    clients_handle.into_iter().for_each(join_actor);
    debug_assert_eq!(resources.sync.waiting_now(), 0);
    info!("[Barberia] No van a llegar mas clientes");

    // el ultimo despertar no tiene cliente: el barbero ve la bandera y se va
    resources.sync.close_shop();
    resources.sync.wake_barber();
    let haircuts = join_actor(barber_handle);
    info!("[Barberia] Cerrada, {} cortes", haircuts);

    if let Some(err) = spawn_error {
        return Err(err);
    }

    Ok(Report {
        events: resources.journal.events(),
        haircuts,
        peak_waiting: resources.sync.peak_waiting(),
    })
}

/// Un actor que entro en panico violo una invariante: se propaga tal cual.
fn join_actor<T>(handle: JoinHandle<T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(clients: usize, chairs: usize, seed: i64) -> SimulationConfig {
        SimulationConfig {
            clients,
            chairs,
            seed,
            time_unit: Duration::from_millis(1),
        }
    }

    fn position(events: &[Event], event: Event) -> usize {
        events
            .iter()
            .position(|e| *e == event)
            .unwrap_or_else(|| panic!("falta el evento {:?}", event))
    }

    /// Verifica el orden de la vida de cada cliente sin asumir en que orden
    /// fueron atendidos.
    fn assert_every_client_served(report: &Report, clients: usize) {
        let events = &report.events;
        let departed = events
            .iter()
            .filter(|e| matches!(e, Event::Departed(_)))
            .count();
        assert_eq!(departed, clients);
        assert_eq!(report.haircuts, clients);

        for id in 0..clients {
            let woke = position(events, Event::WokeBarber(id));
            let cutting = position(events, Event::Cutting(id));
            let finished = position(events, Event::FinishedCutting(id));
            let gone = position(events, Event::Departed(id));
            assert!(position(events, Event::EnteredWaitingRoom(id)) < woke);
            assert!(woke < cutting);
            assert!(cutting < finished);
            assert!(finished < gone);
        }
    }

    fn assert_cuts_do_not_overlap(events: &[Event]) {
        let mut in_chair = None;
        for event in events {
            match event {
                Event::Cutting(id) => {
                    assert_eq!(in_chair, None);
                    in_chair = Some(*id);
                }
                Event::FinishedCutting(id) => {
                    assert_eq!(in_chair, Some(*id));
                    in_chair = None;
                }
                _ => {}
            }
        }
        assert_eq!(in_chair, None);
    }

    #[test]
    fn test_three_clients_one_chair() {
        let report = run(&config(3, 1, 42)).unwrap();

        assert_every_client_served(&report, 3);
        assert_cuts_do_not_overlap(&report.events);
        assert_eq!(report.events.last(), Some(&Event::BarberWentHome));
        assert!(report.peak_waiting <= 1);
    }

    #[test]
    fn test_full_shop_serves_everybody() {
        let report = run(&config(crate::config::MAX_CLIENTS, 3, -11)).unwrap();

        assert_every_client_served(&report, crate::config::MAX_CLIENTS);
        assert_cuts_do_not_overlap(&report.events);
        assert!(report.peak_waiting <= 3);
    }

    #[test]
    fn test_barber_goes_home_after_last_client_and_only_once() {
        let report = run(&config(5, 2, 1)).unwrap();
        let events = &report.events;

        let went_home: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Event::BarberWentHome)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(went_home, vec![events.len() - 1]);
        for id in 0..5 {
            assert!(position(events, Event::Departed(id)) < went_home[0]);
        }
    }

    #[test]
    fn test_single_client_with_big_waiting_room() {
        let report = run(&config(1, 10, 0)).unwrap();

        assert_every_client_served(&report, 1);
        assert_eq!(report.peak_waiting, 1);
    }
}
