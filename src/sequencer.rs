//! Motion sequencer.
//!
//! Owns the session state and serializes access to the body: at most one
//! routine runs at a time, new commands are dropped while one is running,
//! and `stop` always wins.
//!
//! [`Sequencer::submit`] never waits for a routine. It plans the routine and
//! hands it over a channel to [`Sequencer::run`], the runner loop driven by
//! the motion task. Every await inside a routine is raced against the stop
//! signal, so an interruption truncates the routine at its current step.
use core::cell::RefCell;
use core::fmt::Display;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use log::{debug, error, info, warn};

use crate::body::{BodyError, HexaBody};
use crate::config::{MotionTimings, LAUNCH_CHANNEL_SIZE};
use crate::robot::{
    commands::Command,
    state::{ScaleCounter, SessionState},
};
use crate::routines::{self, PlanError, RoutineSpec, Step};

/// Why a submitted command did not start a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A routine is already running.
    Busy,
    /// The command has no routine.
    Unsupported(Command),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Rejection::Busy => f.write_str("a routine is already running"),
            Rejection::Unsupported(cmd) => write!(f, "{cmd} is not supported"),
        }
    }
}

/// How a routine run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoutineEnd {
    Completed,
    Interrupted,
    Failed(BodyError),
}

struct Launch {
    spec: RoutineSpec,
    epoch: u32,
}

pub struct Sequencer {
    session: Mutex<CriticalSectionRawMutex, RefCell<SessionState>>,
    stop: Signal<CriticalSectionRawMutex, ()>,
    launches: Channel<CriticalSectionRawMutex, Launch, LAUNCH_CHANNEL_SIZE>,
    timings: MotionTimings,
}

impl Sequencer {
    pub const fn new(timings: MotionTimings) -> Self {
        Self {
            session: Mutex::new(RefCell::new(SessionState::new())),
            stop: Signal::new(),
            launches: Channel::new(),
            timings,
        }
    }

    pub fn timings(&self) -> &MotionTimings {
        &self.timings
    }

    /// Copy of the current session state.
    pub fn session(&self) -> SessionState {
        self.session.lock(|session| *session.borrow())
    }

    pub fn is_busy(&self) -> bool {
        self.session().busy
    }

    /// Session defaults. A routine still running is interrupted and the body
    /// goes to its safe state, like on [`Sequencer::stop`]; an idle body is
    /// left alone.
    pub async fn reset<B: HexaBody>(&self, body: &B) {
        let was_busy = self.session.lock(|session| {
            let mut session = session.borrow_mut();
            let was_busy = session.busy;
            session.reset();
            was_busy
        });
        if was_busy {
            self.stop.signal(());
            info!("[SEQUENCER] reset while busy, going to safe state");
            self.safe_state(body).await;
        }
    }

    /// Start the routine for `command`, or stop whatever is running.
    ///
    /// Returns as soon as the routine is handed to the runner. Rejections are
    /// informative only: the remote side never hears about them.
    pub async fn submit<B: HexaBody>(&self, body: &B, command: Command) -> Result<(), Rejection> {
        if command == Command::Stop {
            self.stop(body).await;
            return Ok(());
        }

        let (launch, previous_scale) = self.session.lock(
            |session| -> Result<(Launch, ScaleCounter), Rejection> {
                let mut session = session.borrow_mut();
                if session.busy {
                    return Err(Rejection::Busy);
                }
                let previous_scale = session.scale;
                if let Some(step) = command.scale_step() {
                    session.scale.apply(step);
                }
                let spec = routines::plan(command, session.scale.get(), &self.timings).map_err(
                    |err| match err {
                        PlanError::Unsupported(cmd) | PlanError::NotARoutine(cmd) => {
                            Rejection::Unsupported(cmd)
                        }
                    },
                )?;
                session.busy = true;
                Ok((
                    Launch {
                        spec,
                        epoch: session.epoch,
                    },
                    previous_scale,
                ))
            },
        )?;

        debug!("[SEQUENCER] launching {}", launch.spec.name);
        let epoch = launch.epoch;
        if self.launches.try_send(launch).is_err() {
            warn!("[SEQUENCER] runner is lagging, dropping {command}");
            // the dropped routine leaves no trace on the session
            self.session.lock(|session| {
                let mut session = session.borrow_mut();
                if session.epoch == epoch {
                    session.busy = false;
                    session.scale = previous_scale;
                }
            });
            return Err(Rejection::Busy);
        }
        Ok(())
    }

    /// Interrupt the running routine (if any) and bring the body to its safe
    /// state: head neutral, walking halted, motors released.
    ///
    /// Safe to call at any time. The session is back to defaults before the
    /// first actuator call is issued.
    pub async fn stop<B: HexaBody>(&self, body: &B) {
        self.session.lock(|session| session.borrow_mut().reset());
        self.stop.signal(());
        info!("[SEQUENCER] stop requested, going to safe state");
        self.safe_state(body).await;
    }

    /// Head neutral, walking halted, motors released. Failures are logged and
    /// the remaining steps still run.
    async fn safe_state<B: HexaBody>(&self, body: &B) {
        let safe = routines::safe_state(&self.timings);
        for step in &safe.steps {
            if let Err(e) = execute_step(body, step).await {
                error!("[SEQUENCER] safe state step {step:?} failed: {e}");
            }
        }
    }

    /// Runner loop: executes launched routines one after the other.
    pub async fn run<B: HexaBody>(&self, body: &B) {
        loop {
            let Launch { spec, epoch } = self.launches.receive().await;
            // a stop raised while idle must not cancel this routine
            self.stop.reset();
            if !self.is_current(epoch) {
                debug!("[SEQUENCER] discarding stale {}", spec.name);
                continue;
            }

            info!(
                "[SEQUENCER] running {} ({} ms)",
                spec.name,
                spec.nominal_duration().as_millis()
            );
            match self.execute(body, &spec, epoch).await {
                RoutineEnd::Completed => info!("[SEQUENCER] {} completed", spec.name),
                RoutineEnd::Interrupted => warn!("[SEQUENCER] {} interrupted", spec.name),
                RoutineEnd::Failed(e) => error!("[SEQUENCER] {} abandoned: {e}", spec.name),
            }
            self.finish(epoch);
        }
    }

    /// Run the steps of `spec` in order until done, failed or stopped.
    async fn execute<B: HexaBody>(&self, body: &B, spec: &RoutineSpec, epoch: u32) -> RoutineEnd {
        for step in &spec.steps {
            if !self.is_current(epoch) {
                return RoutineEnd::Interrupted;
            }
            match select(execute_step(body, step), self.stop.wait()).await {
                Either::First(Ok(())) => {}
                Either::First(Err(e)) => return RoutineEnd::Failed(e),
                Either::Second(()) => return RoutineEnd::Interrupted,
            }
        }
        RoutineEnd::Completed
    }

    fn is_current(&self, epoch: u32) -> bool {
        self.session.lock(|session| session.borrow().epoch == epoch)
    }

    /// Clear busy, unless a stop already took the session over.
    fn finish(&self, epoch: u32) {
        self.session.lock(|session| {
            let mut session = session.borrow_mut();
            if session.epoch == epoch {
                session.busy = false;
            }
        });
    }
}

async fn execute_step<B: HexaBody>(body: &B, step: &Step) -> Result<(), BodyError> {
    match *step {
        Step::StandWithHeight(height) => body.stand_with_height(height).await,
        Step::MoveHead { heading, duration } => body.move_head(heading, duration).await,
        Step::Walk { direction, speed } => body.walk_continuously(direction, speed).await,
        Step::StopWalking => body.stop_walking_continuously().await,
        Step::MoveLeg {
            leg,
            position,
            duration,
        } => body.move_leg(leg, position, duration).await,
        Step::Pitch { angle, duration } => body.pitch(angle, duration).await,
        Step::Relax => body.relax().await,
        Step::Sleep(duration) => {
            Timer::after(duration).await;
            Ok(())
        }
    }
}
