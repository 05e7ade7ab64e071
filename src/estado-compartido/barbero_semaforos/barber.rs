use crate::journal::Event;
use crate::simulation::ShopResources;
use crate::timing::HAIRCUT_MAX_UNITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarberState {
    Sleeping,
    CheckingShutdown,
    Cutting,
    Terminated,
}

/// Ciclo del barbero. Devuelve cuantos cortes hizo.
///
/// El barbero solo se bloquea esperando que lo despierten, y mira la bandera
/// de cierre una unica vez despues de cada despertar: el ultimo aviso de la
/// barberia no trae cliente y no se atiende.
pub fn barber(resources: ShopResources) -> usize {
    let ShopResources {
        sync,
        clock,
        journal,
    } = resources;
    let mut haircuts = 0;
    let mut state = BarberState::Sleeping;

    while state != BarberState::Terminated {
        state = match state {
            BarberState::Sleeping => {
                journal.record(Event::BarberSleeping);
                sync.wait_for_client();
                BarberState::CheckingShutdown
            }
            BarberState::CheckingShutdown => {
                if sync.is_closing() {
                    journal.record(Event::BarberWentHome);
                    BarberState::Terminated
                } else {
                    BarberState::Cutting
                }
            }
            BarberState::Cutting => {
                let Some(client) = sync.chair_holder() else {
                    panic!("[Barbero] me despertaron sin nadie en la silla");
                };
                journal.record(Event::Cutting(client));
                clock.random_wait(HAIRCUT_MAX_UNITS);
                journal.record(Event::FinishedCutting(client));
                haircuts += 1;
                //libero al cliente
                sync.finish_haircut();
                BarberState::Sleeping
            }
            BarberState::Terminated => BarberState::Terminated,
        };
    }
    haircuts
}
