#![forbid(unsafe_code)]

use config::Config;
use geometry::FRAME_VERTEX_COUNT;
use orchestrator::transport::{MemoryPeer, MemoryTransport, OfflineTransport};
use geometry::FrameReader;
use orchestrator::{
    Clock, ControlEvent, DISCOVER, Datagram, Dispatch, DiscoveryState, Engine, FrameSink,
    FrameView, NoopSink, PING, Services, SystemClock, Transport,
};
use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use std::time::Duration;
use telemetry::TelemetrySnapshot;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn host() -> SocketAddr {
    "10.0.0.5:9001".parse().unwrap()
}

fn broadcast() -> SocketAddr {
    "10.0.0.255:9001".parse().unwrap()
}

fn engine_with(transport: impl Transport + 'static, sink: impl FrameSink + 'static) -> Engine {
    Engine::new(
        Config::new(),
        Services {
            transport: Box::new(transport),
            sink: Box::new(sink),
            clock: Box::new(SystemClock),
        },
    )
}

fn connected_engine() -> (Engine, MemoryPeer) {
    let (transport, peer) = MemoryTransport::new(4096, Some(broadcast()));
    let mut engine = engine_with(transport, NoopSink);
    peer.deliver("SERVER", host());
    engine.tick();
    peer.take_sent();
    (engine, peer)
}

/// Records what each present call saw.
struct ChannelSink(flume::Sender<(u64, usize, u64)>);

impl FrameSink for ChannelSink {
    fn present(&mut self, view: &FrameView<'_>) {
        let _ = self
            .0
            .send((view.tick, view.frame.len(), view.frame.sequence()));
    }
}

#[test]
fn discover_then_command() {
    let (transport, peer) = MemoryTransport::new(4096, Some(broadcast()));
    let mut engine = engine_with(transport, NoopSink);

    for _ in 0..60 {
        engine.tick();
    }
    assert_eq!(peer.take_sent(), vec![(DISCOVER.to_vec(), broadcast())]);

    peer.deliver("SERVER", host());
    let report = engine.tick();
    assert_eq!(report.state, DiscoveryState::Connected);
    assert_eq!(report.received, Some(host()));
    assert_eq!(engine.discovery().endpoint(), Some(host()));
    assert!(engine.store().snapshot().connected);

    let outcome = engine.select_mode(1).unwrap();
    assert_eq!(
        outcome,
        Dispatch::Sent {
            command: "FAN:SILENT",
            to: host(),
            delivered: true,
        }
    );
    assert_eq!(peer.take_sent(), vec![(b"FAN:SILENT".to_vec(), host())]);

    // same mode again is not re-sent
    assert_eq!(engine.select_mode(1).unwrap(), Dispatch::Unchanged);
    assert!(peer.take_sent().is_empty());
}

#[test]
fn connected_heartbeat_is_unicast() {
    let (mut engine, peer) = connected_engine();
    for _ in 0..120 {
        engine.tick();
    }
    let sent = peer.take_sent();
    assert!(!sent.is_empty());
    assert!(sent.iter().all(|(payload, to)| payload == PING && *to == host()));
}

#[test]
fn status_keys_stay_fresh() {
    let (mut engine, peer) = connected_engine();
    peer.deliver(r#"{"cpu_usage":73.5,"fan_rpm_missing":1}"#, host());
    peer.deliver(r#"{"cpu_temp":61}"#, host());

    let first = engine.tick();
    assert_eq!(first.merged_fields, 1);
    // one datagram per tick
    assert_eq!(engine.store().snapshot().cpu_temp, TelemetrySnapshot::default().cpu_temp);
    engine.tick();

    let expected = TelemetrySnapshot {
        cpu_usage: 73.5,
        cpu_temp: 61.0,
        connected: true,
        ..TelemetrySnapshot::default()
    };
    assert_eq!(engine.store().snapshot(), &expected);
}

#[test]
fn offline_keeps_defaults() {
    let (tx, rx) = flume::unbounded();
    let mut engine = engine_with(OfflineTransport, ChannelSink(tx));

    for _ in 0..200 {
        let report = engine.tick();
        assert_eq!(report.heartbeat, None);
        assert_eq!(report.frame.map(|f| f.vertex_count), Some(FRAME_VERTEX_COUNT));
    }
    assert_eq!(engine.discovery().state(), DiscoveryState::Searching);
    assert_eq!(engine.store().snapshot(), &TelemetrySnapshot::default());

    let presented: Vec<_> = rx.try_iter().collect();
    assert_eq!(presented.len(), 200);
    for (tick, len, sequence) in presented {
        assert_eq!(len, FRAME_VERTEX_COUNT);
        assert_eq!(sequence, tick);
    }
}

#[test]
fn unknown_mode_changes_nothing() {
    let (mut engine, peer) = connected_engine();
    let before = engine.commands().mode();
    assert!(engine.select_mode(9).is_err());
    engine.handle_control(ControlEvent::SelectMode(9));
    assert_eq!(engine.commands().mode(), before);
    assert!(peer.take_sent().is_empty());
}

#[test]
fn renderer_thread_sees_whole_frames() {
    let (mut engine, _peer) = connected_engine();
    let reader = engine.frame_reader();
    let stop = CancellationToken::new();

    let watcher = {
        let stop = stop.clone();
        std::thread::spawn(move || {
            while !stop.is_cancelled() {
                let frame = reader.read();
                assert_eq!(frame.len(), FRAME_VERTEX_COUNT);
            }
        })
    };
    for _ in 0..300 {
        engine.tick();
    }
    stop.cancel();
    watcher.join().unwrap();
}

#[tokio::test(start_paused = true)]
async fn run_loop_paces_and_stops() {
    let (transport, peer) = MemoryTransport::new(4096, Some(broadcast()));
    let mut engine = engine_with(transport, NoopSink);
    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();

    control_tx.send(ControlEvent::CycleMode).unwrap();
    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            cancel.cancel();
        })
    };

    engine.run_until(cancel, control_rx).await;
    canceller.await.unwrap();

    assert!((59..=62).contains(&engine.ticks()), "ticks = {}", engine.ticks());
    assert_eq!(engine.commands().mode(), config::FanMode::Auto.next());
    assert_eq!(peer.take_sent(), vec![(DISCOVER.to_vec(), broadcast())]);
    engine.shutdown();
}

/// Drop log shared by the teardown recorders: which service was released
/// and whether frame production had already stopped at that point.
#[derive(Clone)]
struct DropLog {
    events: flume::Sender<(&'static str, bool)>,
    frames: flume::Receiver<FrameReader>,
}

impl DropLog {
    fn record(&self, name: &'static str) {
        let closed = self
            .frames
            .try_recv()
            .map(|reader| reader.is_closed())
            .unwrap_or(false);
        let _ = self.events.send((name, closed));
    }
}

struct RecordingSink(DropLog);

impl FrameSink for RecordingSink {
    fn present(&mut self, _view: &FrameView<'_>) {}
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        self.0.record("sink");
    }
}

struct RecordingTransport(OfflineTransport, DropLog);

impl Transport for RecordingTransport {
    fn send(&mut self, payload: &[u8], to: SocketAddr) -> bool {
        self.0.send(payload, to)
    }

    fn poll_receive(&mut self) -> Option<Datagram> {
        self.0.poll_receive()
    }

    fn broadcast_addr(&self) -> Option<SocketAddr> {
        self.0.broadcast_addr()
    }
}

impl Drop for RecordingTransport {
    fn drop(&mut self) {
        self.1.record("transport");
    }
}

struct RecordingClock(SystemClock, DropLog);

#[async_trait::async_trait]
impl Clock for RecordingClock {
    fn now(&self) -> Instant {
        self.0.now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        self.0.sleep_until(deadline).await;
    }
}

impl Drop for RecordingClock {
    fn drop(&mut self) {
        self.1.record("clock");
    }
}

#[test]
fn shutdown_releases_in_reverse_order() {
    let (events_tx, events_rx) = flume::unbounded();
    let (frames_tx, frames_rx) = flume::unbounded();
    let log = DropLog {
        events: events_tx,
        frames: frames_rx,
    };

    let mut engine = Engine::new(
        Config::new(),
        Services {
            transport: Box::new(RecordingTransport(OfflineTransport, log.clone())),
            sink: Box::new(RecordingSink(log.clone())),
            clock: Box::new(RecordingClock(SystemClock, log)),
        },
    );
    engine.tick();
    for _ in 0..3 {
        frames_tx.send(engine.frame_reader()).unwrap();
    }

    engine.shutdown();
    let events: Vec<_> = events_rx.try_iter().collect();
    assert_eq!(
        events,
        vec![("sink", false), ("clock", true), ("transport", true)]
    );
}
