//! Motion task.
//!
//! Drives the sequencer's runner loop: every routine launched by a submitted
//! command is executed here, one at a time, against the body.
use log::info;

use crate::body::sim::SimulatedBody;
use crate::sequencer::Sequencer;

#[embassy_executor::task]
pub async fn motion_task(sequencer: &'static Sequencer, body: &'static SimulatedBody) {
    info!("[MOTION_TASK] ready, timings {:?}", sequencer.timings());
    sequencer.run(body).await
}
