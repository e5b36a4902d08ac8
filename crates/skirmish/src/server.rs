//! `SkirmishServer` builder and server loop.
//!
//! This is the entry point for running a Skirmish server. It ties
//! together all the layers: transport → protocol → session → matchmaker.

use std::sync::Arc;
use std::time::Duration;

use skirmish_battle::BattleConfig;
use skirmish_matchmaker::Matchmaker;
use skirmish_protocol::{CardTemplate, JsonCodec};
use skirmish_session::SessionManager;
use skirmish_tick::TickScheduler;
use skirmish_transport::WsListener;
use tokio::sync::Mutex;

use crate::SkirmishError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The two
/// mutexes are the whole concurrency story: the matchmaker lock
/// serializes every battle mutation and the matchmaking tick, the
/// sessions lock serializes registry changes and delivery. Lock order
/// is always matchmaker first, released before sessions is taken.
pub(crate) struct ServerState {
    pub(crate) sessions: Mutex<SessionManager>,
    pub(crate) matchmaker: Mutex<Matchmaker>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Skirmish server.
///
/// # Example
///
/// ```rust,ignore
/// use skirmish::prelude::*;
///
/// let server = SkirmishServer::builder()
///     .bind("0.0.0.0:8080")
///     .catalog(catalog)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct SkirmishServerBuilder {
    bind_addr: String,
    catalog: Vec<CardTemplate>,
    battle_config: BattleConfig,
    tick_interval: Duration,
}

impl SkirmishServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            catalog: Vec::new(),
            battle_config: BattleConfig::default(),
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the card catalog every match draws its pools from.
    pub fn catalog(mut self, catalog: Vec<CardTemplate>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets deck and hand sizing for new battles.
    pub fn battle_config(mut self, config: BattleConfig) -> Self {
        self.battle_config = config;
        self
    }

    /// Sets the matchmaking tick interval.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<SkirmishServer, SkirmishError> {
        let listener = WsListener::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            sessions: Mutex::new(SessionManager::new()),
            matchmaker: Mutex::new(Matchmaker::new(self.catalog, self.battle_config)),
            codec: JsonCodec,
        });

        Ok(SkirmishServer {
            listener,
            state,
            tick_interval: self.tick_interval,
        })
    }
}

impl Default for SkirmishServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Skirmish server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct SkirmishServer {
    listener: WsListener,
    state: Arc<ServerState>,
    tick_interval: Duration,
}

impl SkirmishServer {
    /// Creates a new builder.
    pub fn builder() -> SkirmishServerBuilder {
        SkirmishServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, SkirmishError> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the matchmaking tick and the accept loop.
    ///
    /// Each accepted connection gets its own handler task. Runs until
    /// the process is terminated.
    pub async fn run(self) -> Result<(), SkirmishError> {
        tracing::info!("Skirmish server running");

        let tick_state = Arc::clone(&self.state);
        let mut scheduler = TickScheduler::with_interval(self.tick_interval);
        tokio::spawn(async move {
            loop {
                scheduler.wait_for_tick().await;
                // Compute under the matchmaker lock, deliver under the
                // sessions lock; never hold both.
                let notes = { tick_state.matchmaker.lock().await.tick() };
                if !notes.is_empty() {
                    tick_state.sessions.lock().await.send_all(notes);
                }
                scheduler.record_tick_end();
            }
        });

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
