//! Tokio driver for [`SessionController`]
//!
//! The transport itself lives elsewhere: it pushes [`TransportEvent`]s in and
//! drains encoded frames out through the channels on [`SessionHandle`].

use super::{Effect, SessionController, SessionEvent, SessionNotice, TimerToken};
use crate::round::Key;
use std::future;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, warn};

const CHANNEL_CAPACITY: usize = 64;

/// What the transport reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Closed,
    Failed,
    /// One raw JSON frame
    Frame(String),
}

/// Caller's side of a running session
#[derive(Debug)]
pub struct SessionHandle {
    pub transport: mpsc::Sender<TransportEvent>,
    pub keys: mpsc::Sender<Key>,
    /// Encoded outbound frames for the transport to send
    pub outbound: mpsc::Receiver<String>,
    pub notices: mpsc::UnboundedReceiver<SessionNotice>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl SessionHandle {
    /// Ask the driver to stop; pending timers are cancelled
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Runs one session until it terminates or is shut down
#[derive(Debug)]
pub struct SessionDriver {
    controller: SessionController,
    transport_rx: mpsc::Receiver<TransportEvent>,
    key_rx: mpsc::Receiver<Key>,
    outbound_tx: mpsc::Sender<String>,
    notice_tx: mpsc::UnboundedSender<SessionNotice>,
    shutdown_rx: oneshot::Receiver<()>,
    pending: Vec<(TimerToken, Instant)>,
}

impl SessionDriver {
    #[must_use]
    pub fn new(controller: SessionController) -> (Self, SessionHandle) {
        let (transport_tx, transport_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (key_tx, key_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let driver = Self {
            controller,
            transport_rx,
            key_rx,
            outbound_tx,
            notice_tx,
            shutdown_rx,
            pending: Vec::new(),
        };
        let handle = SessionHandle {
            transport: transport_tx,
            keys: key_tx,
            outbound: outbound_rx,
            notices: notice_rx,
            shutdown: Some(shutdown_tx),
        };
        (driver, handle)
    }

    /// Process events until the session ends
    ///
    /// Exits on terminal session phase, shutdown request, dropped handle, or
    /// closed transport channel. Returns the controller for inspection.
    pub async fn run(mut self) -> SessionController {
        debug!("session driver started");

        loop {
            let deadline = self.next_deadline();

            tokio::select! {
                event = self.transport_rx.recv() => {
                    let Some(event) = event else {
                        debug!("transport channel closed");
                        break;
                    };
                    let effects = match event {
                        TransportEvent::Opened => self.controller.handle(SessionEvent::Opened),
                        TransportEvent::Closed => self.controller.handle(SessionEvent::Closed),
                        TransportEvent::Failed => {
                            self.controller.handle(SessionEvent::ConnectionFailed)
                        }
                        TransportEvent::Frame(frame) => self.controller.receive_frame(&frame),
                    };
                    self.apply(effects).await;
                }

                Some(key) = self.key_rx.recv() => {
                    let effects = self.controller.handle(SessionEvent::Key(key));
                    self.apply(effects).await;
                }

                _ = &mut self.shutdown_rx => {
                    debug!("shutdown requested");
                    break;
                }

                () = sleep_until_deadline(deadline) => {
                    if let Some(token) = self.take_due() {
                        let effects = self.controller.handle(SessionEvent::TimerFired(token));
                        self.apply(effects).await;
                    }
                }
            }

            if self.controller.phase().is_terminal() {
                break;
            }
        }

        let effects = self.controller.shutdown();
        self.apply(effects).await;
        debug!(phase = ?self.controller.phase(), "session driver stopped");
        self.controller
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    fn take_due(&mut self) -> Option<TimerToken> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, at))| *at)
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(index).0)
    }

    async fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send(message) => match message.encode() {
                    Ok(frame) => {
                        if self.outbound_tx.send(frame).await.is_err() {
                            warn!("outbound channel closed, frame dropped");
                        }
                    }
                    Err(e) => error!("failed to encode outbound message: {e}"),
                },
                Effect::ArmTimer { token, after } => {
                    self.pending.retain(|(t, _)| t.kind != token.kind);
                    self.pending.push((token, Instant::now() + after));
                }
                Effect::CancelTimer(token) => self.pending.retain(|(t, _)| *t != token),
                Effect::Notify(notice) => {
                    if self.notice_tx.send(notice).is_err() {
                        debug!("notice channel closed, notice dropped");
                    }
                }
            }
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
