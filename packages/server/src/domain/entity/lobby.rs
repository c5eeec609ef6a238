//! Lobby 集約
//!
//! 接続中クライアントの登録簿・待機キュー・ペア表をひとつの集約として保持し、
//! 相互の不変条件をこの型の中だけで守ります。
//!
//! ## 不変条件
//!
//! - ペア表は対称（`a -> b` なら `b -> a`）で、自分自身とのペアは存在しない
//! - 待機キューに同じ ClientId は高々 1 回しか現れない
//! - 待機キューとペア表のキー集合は交わらない
//! - キューとペア表が参照する ClientId はすべて接続中

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::{
    error::LobbyError,
    value_object::{ClientId, Timestamp},
};

use super::{
    ClientSnapshot, ClientState, Departure, LobbySnapshot, SeekOutcome, SessionEnd, Stats,
};

/// Registry, waiting queue and pair table of every connected client.
#[derive(Debug, Default)]
pub struct Lobby {
    /// Connected clients with their connect time.
    clients: HashMap<ClientId, Timestamp>,
    /// Clients seeking a partner, oldest first.
    waiting: VecDeque<ClientId>,
    /// Symmetric client -> partner mapping.
    pairs: HashMap<ClientId, ClientId>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened connection as `Idle`.
    pub fn register(
        &mut self,
        client_id: ClientId,
        connected_at: Timestamp,
    ) -> Result<(), LobbyError> {
        if self.clients.contains_key(&client_id) {
            return Err(LobbyError::AlreadyConnected(client_id.to_string()));
        }
        self.clients.insert(client_id, connected_at);
        Ok(())
    }

    pub fn is_connected(&self, client_id: &ClientId) -> bool {
        self.clients.contains_key(client_id)
    }

    /// Current state of a client, or `None` if it is not connected.
    pub fn state_of(&self, client_id: &ClientId) -> Option<ClientState> {
        if !self.is_connected(client_id) {
            return None;
        }
        if let Some(partner) = self.pairs.get(client_id) {
            return Some(ClientState::Paired { partner: *partner });
        }
        if self.waiting.contains(client_id) {
            return Some(ClientState::Waiting);
        }
        Some(ClientState::Idle)
    }

    pub fn partner_of(&self, client_id: &ClientId) -> Option<ClientId> {
        self.pairs.get(client_id).copied()
    }

    /// Put a client into matchmaking.
    ///
    /// Pops the queue head as partner if anyone is waiting, otherwise
    /// enqueues the client. A client that is already paired is first taken
    /// out of its pair; the abandoned partner is reported in the outcome and
    /// left `Idle`.
    pub fn seek(&mut self, client_id: &ClientId) -> Result<SeekOutcome, LobbyError> {
        if !self.is_connected(client_id) {
            return Err(LobbyError::NotConnected(client_id.to_string()));
        }
        if self.waiting.contains(client_id) {
            return Ok(SeekOutcome::AlreadyWaiting);
        }

        // 失敗しうる判定はすべて状態を変更する前に行う
        let head = self.take_queue_head(client_id)?;
        let abandoned_partner = self.unpair(client_id);

        let Some(partner) = head else {
            self.waiting.push_back(*client_id);
            return Ok(SeekOutcome::Queued { abandoned_partner });
        };

        self.pairs.insert(*client_id, partner);
        self.pairs.insert(partner, *client_id);

        Ok(SeekOutcome::Matched {
            partner,
            abandoned_partner,
        })
    }

    /// End the client's current pair or search; it stays connected as `Idle`.
    ///
    /// Returns `None` for clients that are not connected.
    pub fn leave(&mut self, client_id: &ClientId) -> Option<SessionEnd> {
        if !self.is_connected(client_id) {
            return None;
        }
        Some(self.end_session(client_id))
    }

    /// Remove a client entirely. A second call for the same client is a no-op.
    pub fn remove(&mut self, client_id: &ClientId) -> Option<Departure> {
        let connected_at = *self.clients.get(client_id)?;
        let session = self.end_session(client_id);
        self.clients.remove(client_id);

        Some(Departure {
            session,
            connected_at,
        })
    }

    fn end_session(&mut self, client_id: &ClientId) -> SessionEnd {
        let partner = self.unpair(client_id);
        let was_waiting = self.dequeue(client_id);
        SessionEnd {
            partner,
            was_waiting,
        }
    }

    /// Pop the queue head as the seeker's partner.
    ///
    /// A head equal to the seeker is an invariant violation: it is logged,
    /// left in place, and the seek fails without any state change.
    fn take_queue_head(&mut self, client_id: &ClientId) -> Result<Option<ClientId>, LobbyError> {
        if self.waiting.front() == Some(client_id) {
            tracing::error!("Refusing to pair client '{}' with itself", client_id);
            return Err(LobbyError::SelfPairing(client_id.to_string()));
        }
        Ok(self.waiting.pop_front())
    }

    /// Remove both directions of the client's pair, returning the partner.
    fn unpair(&mut self, client_id: &ClientId) -> Option<ClientId> {
        let partner = self.pairs.remove(client_id)?;
        self.pairs.remove(&partner);
        Some(partner)
    }

    fn dequeue(&mut self, client_id: &ClientId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|id| id != client_id);
        self.waiting.len() != before
    }

    /// Recompute the stats from the authoritative structures.
    pub fn stats(&self) -> Stats {
        Stats {
            online_users: self.clients.len(),
            active_chats: self.pairs.len() / 2,
        }
    }

    pub fn client_ids(&self) -> Vec<ClientId> {
        self.clients.keys().copied().collect()
    }

    pub fn waiting_clients(&self) -> Vec<ClientId> {
        self.waiting.iter().copied().collect()
    }

    pub fn snapshot(&self) -> LobbySnapshot {
        let mut clients: Vec<ClientSnapshot> = self
            .clients
            .iter()
            .filter_map(|(client_id, connected_at)| {
                self.state_of(client_id).map(|state| ClientSnapshot {
                    client_id: *client_id,
                    state,
                    connected_at: *connected_at,
                })
            })
            .collect();
        clients.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.client_id.cmp(&b.client_id))
        });

        LobbySnapshot {
            clients,
            waiting: self.waiting_clients(),
            stats: self.stats(),
        }
    }

    /// Verify every structural invariant of the lobby.
    pub fn check_invariants(&self) -> Result<(), LobbyError> {
        let violation = |message: String| Err(LobbyError::InvariantViolation(message));

        for (client_id, partner) in &self.pairs {
            if client_id == partner {
                return violation(format!("'{}' is paired with itself", client_id));
            }
            if self.pairs.get(partner) != Some(client_id) {
                return violation(format!(
                    "pair '{}' -> '{}' is not symmetric",
                    client_id, partner
                ));
            }
            if !self.clients.contains_key(client_id) {
                return violation(format!("paired client '{}' is not connected", client_id));
            }
        }

        let mut seen = HashSet::new();
        for client_id in &self.waiting {
            if !seen.insert(client_id) {
                return violation(format!("'{}' is queued twice", client_id));
            }
            if self.pairs.contains_key(client_id) {
                return violation(format!("'{}' is both queued and paired", client_id));
            }
            if !self.clients.contains_key(client_id) {
                return violation(format!("queued client '{}' is not connected", client_id));
            }
        }

        Ok(())
    }
}
