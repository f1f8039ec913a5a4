#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::future::Future;

use embassy_futures::block_on;
use embassy_futures::select::{select, Either};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use hexa_sequencer::body::{BodyError, HexaBody};
use hexa_sequencer::config::MotionTimings;
use hexa_sequencer::robot::direction::Direction;
use hexa_sequencer::robot::leg::{Leg, LegPosition};
use hexa_sequencer::sequencer::Sequencer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Start,
    Close,
    Stand(f32),
    Head(Direction),
    Walk(Direction),
    StopWalk,
    Leg(Leg, LegPosition),
    Pitch(f32),
    Relax,
}

/// Body that records every call with its time, and sleeps through timed
/// calls like the real driver would.
#[derive(Default)]
pub struct RecordingBody {
    calls: RefCell<Vec<(Instant, Call)>>,
    fail_walks: Cell<bool>,
    fail_start: Cell<bool>,
}

impl RecordingBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_walks() -> Self {
        let body = Self::default();
        body.fail_walks.set(true);
        body
    }

    pub fn failing_start() -> Self {
        let body = Self::default();
        body.fail_start.set(true);
        body
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().iter().map(|(_, call)| *call).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.borrow().clone()
    }

    pub fn walks(&self) -> Vec<Direction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Walk(direction) => Some(direction),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push((Instant::now(), call));
    }
}

impl HexaBody for RecordingBody {
    async fn start(&self) -> Result<(), BodyError> {
        if self.fail_start.get() {
            return Err(BodyError::LinkDown);
        }
        self.record(Call::Start);
        Ok(())
    }

    async fn close(&self) -> Result<(), BodyError> {
        self.record(Call::Close);
        Ok(())
    }

    async fn stand_with_height(&self, height: f32) -> Result<(), BodyError> {
        self.record(Call::Stand(height));
        Ok(())
    }

    async fn move_head(&self, heading: Direction, duration: Duration) -> Result<(), BodyError> {
        self.record(Call::Head(heading));
        Timer::after(duration).await;
        Ok(())
    }

    async fn walk_continuously(&self, direction: Direction, _speed: f32) -> Result<(), BodyError> {
        if self.fail_walks.get() {
            return Err(BodyError::LinkDown);
        }
        self.record(Call::Walk(direction));
        Ok(())
    }

    async fn stop_walking_continuously(&self) -> Result<(), BodyError> {
        self.record(Call::StopWalk);
        Ok(())
    }

    async fn move_leg(
        &self,
        leg: Leg,
        position: LegPosition,
        duration: Duration,
    ) -> Result<(), BodyError> {
        self.record(Call::Leg(leg, position));
        Timer::after(duration).await;
        Ok(())
    }

    async fn pitch(&self, angle: f32, duration: Duration) -> Result<(), BodyError> {
        self.record(Call::Pitch(angle));
        Timer::after(duration).await;
        Ok(())
    }

    async fn relax(&self) -> Result<(), BodyError> {
        self.record(Call::Relax);
        Ok(())
    }
}

/// Reference timings divided by `divisor`.
pub fn timings(divisor: u32) -> MotionTimings {
    MotionTimings::scaled_down(divisor)
}

/// Run `script` while the sequencer's runner loop executes routines.
pub fn drive<F: Future>(sequencer: &Sequencer, body: &RecordingBody, script: F) -> F::Output {
    block_on(async {
        match select(sequencer.run(body), script).await {
            Either::First(()) => unreachable!("runner loop returned"),
            Either::Second(out) => out,
        }
    })
}

/// Wait until the running routine has finished.
pub async fn wait_idle(sequencer: &Sequencer) {
    let idle = async {
        while sequencer.is_busy() {
            Timer::after_millis(1).await;
        }
    };
    with_timeout(Duration::from_secs(10), idle)
        .await
        .expect("routine did not finish in time");
}
