//! TCP server for the JSON adapter
//!
//! One game-loop task owns the [`Session`]. Client tasks parse inbound lines
//! and forward them over an mpsc channel; the loop `select!`s between that
//! channel and the tick timer, so timer and client input form one ordered
//! stream. After every processed event the loop publishes the new state on a
//! watch channel that every client task forwards to its socket.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, Instant};

use crate::core::GameState;
use crate::engine::{Session, SessionConfig, TickSchedule};
use crate::protocol::{parse_inbound, ErrorMessage, Inbound, StateMessage};

/// Bound on queued client input before client tasks wait.
const INBOUND_CAPACITY: usize = 64;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub seed: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7777,
            seed: SessionConfig::default().seed,
        }
    }
}

impl ServerConfig {
    /// Read `BLOCKFALL_HOST`, `BLOCKFALL_PORT` and `BLOCKFALL_SEED`, falling
    /// back to the defaults for missing or unparseable values.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("BLOCKFALL_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("BLOCKFALL_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self { host, port, seed }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Bind, then serve clients until the listener fails.
///
/// `ready_tx` receives the bound address once the socket is listening (useful
/// with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    tracing::info!(%bound, seed = config.seed, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let session = Session::new(SessionConfig { seed: config.seed });
    let first = serialize_state(0, session.state());
    let (state_tx, _) = watch::channel(first);
    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>(INBOUND_CAPACITY);

    let game_loop = tokio::spawn(run_game_loop(session, inbound_rx, state_tx.clone()));

    let mut client_id_counter = 0usize;
    let result = loop {
        let (socket, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => break Err(e.into()),
        };
        client_id_counter += 1;
        let client_id = client_id_counter;
        tracing::debug!(client_id, %peer, "client connected");

        let inbound_tx = inbound_tx.clone();
        let state_rx = state_tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, inbound_tx, state_rx).await {
                tracing::warn!(client_id, error = %e, "client error");
            }
            tracing::debug!(client_id, "client disconnected");
        });
    };

    game_loop.abort();
    result
}

/// Own the session: apply inbound input and timer ticks in arrival order.
async fn run_game_loop(
    mut session: Session,
    mut inbound_rx: mpsc::Receiver<Inbound>,
    state_tx: watch::Sender<String>,
) {
    let mut schedule = TickSchedule::new(session.state());
    let mut seq = 0u64;

    let timer = sleep(schedule.interval());
    tokio::pin!(timer);

    loop {
        let before = session.state().clone();

        tokio::select! {
            () = &mut timer => {
                session.tick();
                let interval = schedule.rearm(session.state()).unwrap_or(schedule.interval());
                timer.as_mut().reset(Instant::now() + interval);
            }
            inbound = inbound_rx.recv() => {
                let Some(inbound) = inbound else {
                    break;
                };
                let applied = match inbound {
                    Inbound::Key(key) => session.press(key).is_some(),
                    Inbound::Click(control) => session.click(control).is_some(),
                };
                if !applied {
                    continue;
                }
                if let Some(interval) = schedule.rearm(session.state()) {
                    timer.as_mut().reset(Instant::now() + interval);
                }
            }
        }

        if *session.state() != before {
            seq += 1;
            state_tx.send_replace(serialize_state(seq, session.state()));
        }
    }
}

fn serialize_state(seq: u64, state: &GameState) -> String {
    let msg = StateMessage::from_state(seq, state);
    match serde_json::to_string(&msg) {
        Ok(line) => line,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize state");
            String::new()
        }
    }
}

/// Forward state lines to the socket and parsed input to the game loop.
async fn handle_client(
    socket: TcpStream,
    inbound_tx: mpsc::Sender<Inbound>,
    mut state_rx: watch::Receiver<String>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();

    let current = state_rx.borrow_and_update().clone();
    write_line(&mut writer, &current).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_inbound(trimmed) {
                    Ok(inbound) => {
                        if inbound_tx.send(inbound).await.is_err() {
                            return Ok(());
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "rejected client line");
                        let error = serde_json::to_string(&ErrorMessage::from(&e))?;
                        write_line(&mut writer, &error).await?;
                    }
                }
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let current = state_rx.borrow_and_update().clone();
                write_line(&mut writer, &current).await?;
            }
        }
    }
}

async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if line.is_empty() {
        return Ok(());
    }
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
