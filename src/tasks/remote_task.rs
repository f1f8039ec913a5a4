//! Remote event task.
//!
//! Receives events from the transport and hands them to the [`Skill`]. A
//! disconnect ends the whole process through `terminate`.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Receiver};
use log::debug;

use crate::body::sim::SimulatedBody;
use crate::config::EVENT_CHANNEL_SIZE;
use crate::remote::{Flow, RemoteEvent, Skill};
use crate::sequencer::Sequencer;

#[embassy_executor::task]
pub async fn remote_task(
    sequencer: &'static Sequencer,
    body: &'static SimulatedBody,
    events: Receiver<'static, CriticalSectionRawMutex, RemoteEvent, EVENT_CHANNEL_SIZE>,
    terminate: fn() -> !,
) {
    let skill = Skill::new(sequencer, body);

    loop {
        let event = events.receive().await;
        debug!("[REMOTE_TASK] received {event:?}");
        if skill.handle(event).await == Flow::Terminate {
            terminate();
        }
    }
}
