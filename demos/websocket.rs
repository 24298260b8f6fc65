//! Websocket Connection Store
//!
//! This example wires a simulated socket into a connection lifecycle store.
//!
//! Key concepts:
//! - Per-state payloads (the socket only exists while connecting/connected)
//! - Actions bound to one source state through typed `advance`
//! - Deferred socket callbacks that re-read the store before transitioning
//! - Listeners and a derived view observing the store
//!
//! Run with: RUST_LOG=debug cargo run --example websocket

use fsm_store::core::{State, TransitionError};
use fsm_store::machine;
use fsm_store::store::{MachineHandle, MachineStore};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A pretend socket that reports whether it opened after a short delay.
#[derive(Debug, Clone)]
pub struct Socket {
    id: u32,
}

impl Socket {
    fn open<F>(id: u32, addr: &str, on_event: F) -> Self
    where
        F: FnOnce(Result<(), String>) + Send + 'static,
    {
        let reachable = addr.starts_with("ws://localhost");
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if reachable {
                on_event(Ok(()));
            } else {
                on_event(Err("Failed to connect".to_string()));
            }
        });
        Self { id }
    }
}

#[derive(Debug)]
pub struct Idle {
    pub addr: String,
}

#[derive(Debug)]
pub struct Connecting {
    pub socket: Socket,
    pub addr: String,
}

#[derive(Debug)]
pub struct Connected {
    pub socket: Socket,
    pub addr: String,
}

#[derive(Debug)]
pub struct Failed {
    pub error_message: String,
}

machine! {
    pub enum Websocket: WebsocketKind {
        Idle(Idle) => [Connecting],
        Connecting(Connecting) => [Failed, Connected],
        Connected(Connected) => [Idle, Failed],
        Error(Failed) => [Idle],
    }
}

struct Actions {
    machine: MachineHandle<Websocket>,
    sockets: AtomicU32,
}

impl Actions {
    /// Only callable with an idle state; moves the machine to connecting.
    fn connect(&self, idle: &Idle) -> Result<Arc<Websocket>, TransitionError<WebsocketKind>> {
        let id = self.sockets.fetch_add(1, Ordering::SeqCst);
        let machine = self.machine.clone();
        let socket = Socket::open(id, &idle.addr, move |outcome| {
            // Do not trust the idle snapshot captured above: re-read first.
            let current = machine.get();
            let Websocket::Connecting(connecting) = &*current else {
                return;
            };
            if connecting.socket.id != id {
                return;
            }
            let result = match outcome {
                Ok(()) => machine.advance(
                    connecting,
                    Connected {
                        socket: connecting.socket.clone(),
                        addr: connecting.addr.clone(),
                    },
                ),
                Err(error_message) => machine.advance(connecting, Failed { error_message }),
            };
            if let Err(err) = result {
                tracing::warn!(%err, "socket event arrived after state moved on");
            }
        });

        self.machine.advance(
            idle,
            Connecting {
                socket,
                addr: idle.addr.clone(),
            },
        )
    }

    /// Only callable with a connected state; moves the machine back to idle.
    fn disconnect(
        &self,
        connected: &Connected,
    ) -> Result<Arc<Websocket>, TransitionError<WebsocketKind>> {
        self.machine.advance(
            connected,
            Idle {
                addr: connected.addr.clone(),
            },
        )
    }

    /// Only callable with an error state; retries against a new address.
    fn retry(&self, failed: &Failed, addr: &str) -> Result<Arc<Websocket>, TransitionError<WebsocketKind>> {
        tracing::info!(reason = %failed.error_message, "retrying");
        self.machine.advance(
            failed,
            Idle {
                addr: addr.to_string(),
            },
        )
    }
}

async fn wait_while(store: &MachineStore<Websocket, Actions>, kind: WebsocketKind) {
    while store.kind() == kind {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Websocket Connection Store ===\n");

    let store = MachineStore::new(
        Websocket::Idle(Idle {
            addr: "ws://unreachable:8302".to_string(),
        }),
        |machine| Actions {
            machine,
            sockets: AtomicU32::new(0),
        },
    );

    store.subscribe_fn(|prev: &Websocket, next: &Websocket| {
        println!("  {} -> {}", prev.name(), next.name());
    });
    let online = store.view(|state: &Websocket| state.kind() == WebsocketKind::Connected);

    println!("Connecting to an unreachable address:");
    if let Websocket::Idle(idle) = &*store.get() {
        store.actions().connect(idle)?;
    }
    wait_while(&store, WebsocketKind::Connecting).await;

    if let Websocket::Error(failed) = &*store.get() {
        store.actions().retry(failed, "ws://localhost:8302")?;
    }

    println!("\nConnecting to localhost:");
    if let Websocket::Idle(idle) = &*store.get() {
        store.actions().connect(idle)?;
    }
    wait_while(&store, WebsocketKind::Connecting).await;
    println!("Online: {}", online.get());

    println!("\nA request from a stale state is rejected:");
    let stale = Websocket::Idle(Idle {
        addr: "ws://localhost:8302".to_string(),
    });
    if let Err(err) = store.transition(WebsocketKind::Error, stale) {
        println!("  {err}");
    }

    println!("\nDisconnecting:");
    if let Websocket::Connected(connected) = &*store.get() {
        store.actions().disconnect(connected)?;
    }
    println!("Online: {} (changed {} times)", online.get(), online.version());

    println!("\n=== Example Complete ===");
    Ok(())
}
