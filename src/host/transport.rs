//! Delivery of per-side updates to clients
//!
//! Delivery is at-most-once: an update for a side nobody listens to is
//! simply dropped.

use crate::core::Side;
use crate::host::store::GameId;
use crate::notify::SideUpdate;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub trait Transport: Send + Sync {
    fn broadcast(&self, game_id: GameId, side: Side, update: SideUpdate);
}

/// Routes updates to per-(game, side) channels
#[derive(Default)]
pub struct ChannelTransport {
    subscribers: Mutex<FxHashMap<(GameId, Side), UnboundedSender<SideUpdate>>>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening for one side of a game, replacing any earlier listener
    pub fn subscribe(&self, game_id: GameId, side: Side) -> UnboundedReceiver<SideUpdate> {
        let (tx, rx) = unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((game_id, side), tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for ChannelTransport {
    fn broadcast(&self, game_id: GameId, side: Side, update: SideUpdate) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (game_id, side);
        if let Some(tx) = subscribers.get(&key) {
            if tx.send(update).is_err() {
                // Receiver went away
                subscribers.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::handlers::tests::main_phase_game;
    use crate::game::BatchReport;
    use crate::notify::{side_update, RevealPolicy};

    fn update(side: Side) -> SideUpdate {
        side_update(
            &main_phase_game(1),
            &BatchReport::default(),
            side,
            RevealPolicy::PassThrough,
        )
    }

    #[tokio::test]
    async fn test_updates_reach_their_side() {
        let transport = ChannelTransport::new();
        let mut rx_a = transport.subscribe(1, Side::SideA);
        let mut rx_b = transport.subscribe(1, Side::SideB);

        transport.broadcast(1, Side::SideA, update(Side::SideA));

        assert_eq!(rx_a.recv().await.unwrap().side, Side::SideA);
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_subscriber_is_dropped() {
        let transport = ChannelTransport::new();
        let rx = transport.subscribe(2, Side::SideB);
        drop(rx);

        transport.broadcast(2, Side::SideB, update(Side::SideB));
        // Nobody listening at all is fine too
        transport.broadcast(3, Side::SideA, update(Side::SideA));
        assert_eq!(transport.subscriber_count(), 0);
    }
}
