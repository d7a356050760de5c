use crate::error::Error;
use flume::{Receiver, Sender};
use orchestrator::ControlEvent;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Indefinitely listens to signals and sends signal events to the provided channel.
pub(crate) async fn wait_for_signal(signal_event: &Sender<SignalEvent>) -> Result<(), Error> {
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::SignalHandler)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::SignalHandler)?;
    let mut sigusr1 = signal(SignalKind::user_defined1()).map_err(Error::SignalHandler)?;
    let mut sigusr2 = signal(SignalKind::user_defined2()).map_err(Error::SignalHandler)?;

    loop {
        let event = tokio::select! {
            _ = sigint.recv() => SignalEvent::SigINT,
            _ = sigterm.recv() => SignalEvent::SigTERM,
            _ = sigusr1.recv() => SignalEvent::SigUSR1,
            _ = sigusr2.recv() => SignalEvent::SigUSR2,
        };
        signal_event.send_async(event).await?;
    }
}

/// Turn signal events into engine control: INT/TERM cancel, USR1 cycles the
/// fan mode, USR2 asks for a status line.
pub(crate) async fn route_signals(
    events: Receiver<SignalEvent>,
    control: UnboundedSender<ControlEvent>,
    cancel: CancellationToken,
) {
    while let Ok(event) = events.recv_async().await {
        debug!(?event, "Received signal event");
        let control_event = match event {
            SignalEvent::SigINT | SignalEvent::SigTERM => {
                cancel.cancel();
                return;
            }
            SignalEvent::SigUSR1 => ControlEvent::CycleMode,
            SignalEvent::SigUSR2 => ControlEvent::ReportStatus,
        };
        if control.send(control_event).is_err() {
            return;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalEvent {
    SigINT,
    SigTERM,
    SigUSR1,
    SigUSR2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn routes_user_signals_then_cancels() {
        let (events_tx, events_rx) = flume::bounded(8);
        let (control_tx, mut control_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        events_tx.send(SignalEvent::SigUSR1).unwrap();
        events_tx.send(SignalEvent::SigUSR2).unwrap();
        events_tx.send(SignalEvent::SigTERM).unwrap();
        route_signals(events_rx, control_tx, cancel.clone()).await;

        assert_eq!(control_rx.recv().await, Some(ControlEvent::CycleMode));
        assert_eq!(control_rx.recv().await, Some(ControlEvent::ReportStatus));
        assert!(cancel.is_cancelled());
    }
}
