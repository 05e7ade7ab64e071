use crate::journal::Event;
use crate::simulation::ShopResources;
use crate::timing::TRAVEL_MAX_UNITS;

/// Vida de un cliente: viaja, espera lugar, se sienta, despierta al barbero,
/// espera el corte y se va. No hay timeouts, cada espera es indefinida.
pub fn client(id: usize, resources: ShopResources) {
    let ShopResources {
        sync,
        clock,
        journal,
    } = resources;

    journal.record(Event::Traveling(id));
    clock.random_wait(TRAVEL_MAX_UNITS);
    journal.record(Event::Arrived(id));

    let waiting_slot = sync.enter_waiting_room(id);
    journal.record(Event::EnteredWaitingRoom(id));

    let chair = sync.take_chair(id);
    // ya no espera: el lugar se libera apenas consigue la silla
    drop(waiting_slot);

    journal.record(Event::WokeBarber(id));
    sync.wake_barber();

    sync.wait_for_haircut();

    //se levanta y libera la silla
    drop(chair);
    journal.record(Event::Departed(id));
}
