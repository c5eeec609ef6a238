//! Serialization of state-changing use cases.
//!
//! Every use case that mutates the lobby or relays between partners enters the
//! gate, applies its change, and queues all resulting notices before leaving.
//! Notices about one pair therefore reach each client in the order the
//! changes happened. Nothing inside the gate awaits network I/O; pushes only
//! enqueue onto per-connection channels.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    inner: Arc<Mutex<()>>,
}

/// Proof that the holder is inside the gate.
pub struct GatePass<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> GatePass<'_> {
        GatePass {
            _guard: self.inner.lock().await,
        }
    }
}
