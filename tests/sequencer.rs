mod common;

use common::{drive, timings, wait_idle, Call, RecordingBody};
use embassy_time::{Duration, Timer};
use hexa_sequencer::robot::commands::Command;
use hexa_sequencer::robot::direction::Direction;
use hexa_sequencer::robot::leg::{Leg, LegPosition};
use hexa_sequencer::sequencer::{Rejection, Sequencer};

fn cmd(token: &str) -> Command {
    Command::try_from(token).unwrap()
}

/// Time between each walk start and the stop that follows it.
fn walk_spans(body: &RecordingBody) -> Vec<Duration> {
    let calls = body.timed_calls();
    let mut spans = Vec::new();
    let mut started = None;
    for (at, call) in calls {
        match call {
            Call::Walk(_) => started = Some(at),
            Call::StopWalk => {
                if let Some(start) = started.take() {
                    spans.push(at - start);
                }
            }
            _ => {}
        }
    }
    spans
}

#[test]
fn gorect_p_walks_four_sides_at_the_incremented_scale() {
    let t = timings(250);
    let sequencer = Sequencer::new(t);
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        assert_eq!(sequencer.session().scale.get(), 1);
        sequencer.submit(&body, cmd("gorect_p")).await.unwrap();
        assert_eq!(sequencer.session().scale.get(), 2);
        assert!(sequencer.is_busy());
        wait_idle(&sequencer).await;
    });

    assert_eq!(
        body.walks(),
        vec![
            Direction::Forward,
            Direction::Right,
            Direction::Backward,
            Direction::Left
        ]
    );
    let spans = walk_spans(&body);
    assert_eq!(spans.len(), 4);
    for span in spans {
        assert!(span >= t.full_duration(2), "side lasted {span:?}");
    }
    assert!(!body.calls().iter().any(|c| matches!(c, Call::Head(_))));
    assert!(!sequencer.is_busy());
}

#[test]
fn heading_rectangle_turns_the_head_between_sides() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("gorect2_n")).await.unwrap();
        wait_idle(&sequencer).await;
    });

    assert_eq!(sequencer.session().scale.get(), 1);
    assert_eq!(body.walks(), vec![Direction::Forward; 4]);
    let heads: Vec<_> = body
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Head(h) => Some(h),
            _ => None,
        })
        .collect();
    assert_eq!(
        heads,
        vec![
            Direction::Right,
            Direction::Backward,
            Direction::Left,
            Direction::Forward
        ]
    );
}

#[test]
fn submissions_while_busy_are_dropped() {
    let sequencer = Sequencer::new(timings(250));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("forward")).await.unwrap();
        let before = sequencer.session();
        for token in ["start_mode3", "gorect_p", "gorectp_n", "stand-up", "point-left"] {
            assert_eq!(sequencer.submit(&body, cmd(token)).await, Err(Rejection::Busy));
        }
        assert_eq!(sequencer.session(), before);
        wait_idle(&sequencer).await;
    });

    assert_eq!(
        body.calls(),
        vec![
            Call::Head(Direction::Forward),
            Call::Walk(Direction::Forward),
            Call::StopWalk
        ]
    );
}

#[test]
fn stop_mid_routine_truncates_and_goes_to_safe_state() {
    let sequencer = Sequencer::new(timings(25));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("gorect_p")).await.unwrap();
        Timer::after_millis(20).await;
        sequencer.submit(&body, Command::Stop).await.unwrap();

        let session = sequencer.session();
        assert!(!session.busy);
        assert_eq!(session.scale.get(), 1);

        // leave time for the rest of the routine, had it survived
        Timer::after_millis(300).await;
    });

    assert_eq!(body.walks(), vec![Direction::Forward]);
    let calls = body.calls();
    assert_eq!(
        calls[calls.len() - 3..],
        [Call::Head(Direction::Forward), Call::StopWalk, Call::Relax]
    );
    assert!(!sequencer.is_busy());
}

#[test]
fn stop_while_idle_is_idempotent() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.stop(&body).await;
        sequencer.stop(&body).await;
    });

    let safe = [Call::Head(Direction::Forward), Call::StopWalk, Call::Relax];
    assert_eq!(body.calls(), [safe, safe].concat());
    assert!(!sequencer.is_busy());
    assert_eq!(sequencer.session().scale.get(), 1);
}

#[test]
fn stop_while_idle_does_not_cancel_the_next_routine() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.stop(&body).await;
        sequencer.submit(&body, cmd("left")).await.unwrap();
        wait_idle(&sequencer).await;
    });

    assert_eq!(body.walks(), vec![Direction::Left]);
    assert_eq!(body.calls().last(), Some(&Call::StopWalk));
}

#[test]
fn command_after_stop_runs_and_keeps_its_busy_flag() {
    let sequencer = Sequencer::new(timings(25));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("gorectp_p")).await.unwrap();
        Timer::after_millis(10).await;
        sequencer.submit(&body, Command::Stop).await.unwrap();
        sequencer.submit(&body, cmd("backward")).await.unwrap();
        // the interrupted routine winding down must not free the new one
        Timer::after_millis(5).await;
        assert!(sequencer.is_busy());
        wait_idle(&sequencer).await;
    });

    assert_eq!(body.walks(), vec![Direction::Forward, Direction::Backward]);
}

#[test]
fn scale_counter_saturates_through_commands() {
    let sequencer = Sequencer::new(timings(1000));
    let body = RecordingBody::new();

    let scales = drive(&sequencer, &body, async {
        let mut scales = Vec::new();
        for token in ["gorect_p", "gorect2_p", "gorectp_p", "gorect_n", "gorect_n", "gorect_n"] {
            sequencer.submit(&body, cmd(token)).await.unwrap();
            scales.push(sequencer.session().scale.get());
            wait_idle(&sequencer).await;
        }
        scales
    });

    assert_eq!(scales, vec![2, 3, 3, 2, 1, 1]);
}

#[test]
fn point_commands_run_one_after_the_other() {
    let sequencer = Sequencer::new(timings(250));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("point-left")).await.unwrap();
        assert_eq!(
            sequencer.submit(&body, cmd("point-right")).await,
            Err(Rejection::Busy)
        );
        wait_idle(&sequencer).await;
        sequencer.submit(&body, cmd("point-right")).await.unwrap();
        wait_idle(&sequencer).await;
    });

    assert_eq!(
        body.calls(),
        vec![
            Call::Leg(Leg::FrontLeft, LegPosition::raised()),
            Call::Leg(Leg::FrontLeft, LegPosition::rest()),
            Call::Leg(Leg::FrontRight, LegPosition::raised()),
            Call::Leg(Leg::FrontRight, LegPosition::rest()),
        ]
    );
}

#[test]
fn greeting_point_stays_busy_across_both_legs() {
    let sequencer = Sequencer::new(timings(250));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("start_mode2")).await.unwrap();
        while body.calls().len() < 4 {
            assert!(sequencer.is_busy());
            Timer::after_millis(1).await;
        }
        wait_idle(&sequencer).await;
    });

    let legs: Vec<_> = body
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Leg(leg, _) => Some(leg),
            _ => None,
        })
        .collect();
    assert_eq!(
        legs,
        vec![Leg::FrontLeft, Leg::FrontLeft, Leg::FrontRight, Leg::FrontRight]
    );
}

#[test]
fn circle_is_rejected_as_unsupported() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::new();

    let res = drive(&sequencer, &body, sequencer.submit(&body, Command::GoCircle));

    assert_eq!(res, Err(Rejection::Unsupported(Command::GoCircle)));
    assert!(!sequencer.is_busy());
    assert!(body.calls().is_empty());
}

#[test]
fn actuator_failure_abandons_the_routine() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::failing_walks();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("right")).await.unwrap();
        wait_idle(&sequencer).await;
        // the session goes on
        sequencer.submit(&body, cmd("stand-down")).await.unwrap();
        wait_idle(&sequencer).await;
    });

    assert_eq!(
        body.calls(),
        vec![Call::Head(Direction::Forward), Call::Stand(-10.0)]
    );
}

#[test]
fn greetings_issue_their_gestures() {
    let sequencer = Sequencer::new(timings(500));
    let body = RecordingBody::new();

    drive(&sequencer, &body, async {
        sequencer.submit(&body, cmd("start_mode1")).await.unwrap();
        wait_idle(&sequencer).await;
        sequencer.submit(&body, cmd("start_mode3")).await.unwrap();
        wait_idle(&sequencer).await;
    });

    assert_eq!(
        body.calls(),
        vec![
            Call::Head(Direction::Forward),
            Call::Pitch(-20.0),
            Call::Pitch(20.0),
            Call::Stand(-10.0),
            Call::Stand(50.0),
            Call::Head(Direction::Left),
            Call::Head(Direction::Right),
            Call::Head(Direction::Forward),
        ]
    );
}

#[test]
fn launch_dropped_by_a_lagging_runner_leaves_the_session_untouched() {
    let sequencer = Sequencer::new(timings(250));
    let body = RecordingBody::new();

    // no runner: every launch stays queued until the channel is full
    embassy_futures::block_on(async {
        for _ in 0..2 {
            sequencer.submit(&body, cmd("forward")).await.unwrap();
            sequencer.submit(&body, cmd("stop")).await.unwrap();
        }
        assert_eq!(
            sequencer.submit(&body, cmd("gorect_p")).await,
            Err(Rejection::Busy)
        );
    });

    let session = sequencer.session();
    assert_eq!(session.scale.get(), 1);
    assert!(!session.busy);
}
