use std::io::{BufRead, BufReader};
use std::net::{TcpListener, TcpStream};
use std::thread;

use anyhow::Context;
use embassy_executor::Spawner;
use embassy_futures::block_on;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use hexa_sequencer::body::sim::SimulatedBody;
use hexa_sequencer::config::{MotionTimings, DEFAULT_LISTEN_ADDR, EVENT_CHANNEL_SIZE};
use hexa_sequencer::remote::RemoteEvent;
use hexa_sequencer::sequencer::Sequencer;
use hexa_sequencer::tasks::{motion_task::motion_task, remote_task::remote_task};
use log::{error, info, warn};

macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.init_with(|| $val)
    }};
}

static EVENTS: Channel<CriticalSectionRawMutex, RemoteEvent, EVENT_CHANNEL_SIZE> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    simple_log::quick!();

    let addr = std::env::var("HEXA_LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
    let listener = match bind(&addr) {
        Ok(listener) => listener,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    let sequencer = mk_static!(Sequencer, Sequencer::new(MotionTimings::default()));
    let body = mk_static!(SimulatedBody, SimulatedBody::new());

    info!("Starting hexa sequencer...");
    spawner
        .spawn(motion_task(sequencer, body))
        .expect("Fail spawning motion task");
    spawner
        .spawn(remote_task(sequencer, body, EVENTS.receiver(), terminate))
        .expect("Fail spawning remote task");

    EVENTS.send(RemoteEvent::Start).await;
    thread::spawn(move || serve(listener));
}

fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let listener =
        TcpListener::bind(addr).with_context(|| format!("failed to listen on {addr}"))?;
    info!("Remote server listening at {}", listener.local_addr()?);
    Ok(listener)
}

/// Accept one remote controller and forward its lines as events. The
/// session ends with the first disconnect.
fn serve(listener: TcpListener) {
    loop {
        match listener.accept() {
            Ok((stream, peer)) => {
                info!("Remote connected from {peer}");
                handle_connection(stream);
                block_on(EVENTS.send(RemoteEvent::Close));
                block_on(EVENTS.send(RemoteEvent::Disconnect));
                return;
            }
            Err(e) => {
                error!("Accept failed: {e}");
                thread::sleep(std::time::Duration::from_millis(500));
            }
        }
    }
}

fn handle_connection(stream: TcpStream) {
    block_on(EVENTS.send(RemoteEvent::Connect));

    for line in BufReader::new(stream).lines() {
        match line {
            Ok(line) => match RemoteEvent::from_line(&line) {
                Some(event) => block_on(EVENTS.send(event)),
                None => warn!("Dropping oversized line ({} bytes)", line.len()),
            },
            Err(e) => {
                error!("Read error: {e}");
                break;
            }
        }
    }
}

fn terminate() -> ! {
    info!("Exiting");
    std::process::exit(0)
}
