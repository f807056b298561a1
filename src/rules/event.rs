//! Game events and observers.
//!
//! The engine pushes two kinds of notifications to registered observers:
//! events describing what just happened, and a fresh
//! [`RenderSnapshot`] after every state change. For a winning path the `Won`
//! event always arrives before that move's snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::snapshot::RenderSnapshot;
use crate::board::{EdgeId, VertexId};
use crate::core::Side;

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A side extended its network from `from` to the new vertex `to`.
    PathBuilt {
        side: Side,
        edge: EdgeId,
        from: VertexId,
        to: VertexId,
    },

    /// A side built a factory.
    FactoryBuilt { side: Side, vertex: VertexId },

    /// `side` lost part of its network to sabotage.
    NetworkSevered {
        side: Side,
        removed: Vec<VertexId>,
        released_edges: usize,
    },

    /// The turn passed to `next`.
    TurnEnded { next: Side, turn: u32 },

    /// A side collected energy at the start of its turn.
    EnergyCollected { side: Side, amount: u32 },

    /// A side reached the opponent's starting vertex.
    Won { side: Side },

    /// The game was discarded and set up again.
    Reset,
}

/// Receives engine notifications.
///
/// Both methods default to doing nothing.
pub trait GameObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called after every state change with the new read view.
    fn on_snapshot(&mut self, _snapshot: &RenderSnapshot) {}
}

impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }

    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        self.borrow_mut().on_snapshot(snapshot);
    }
}

/// Observer that records everything it sees.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
    snapshots: usize,
    last_snapshot: Option<RenderSnapshot>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log shared with the engine, readable after registration.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of snapshots received so far.
    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.snapshots
    }

    /// Most recent snapshot.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&RenderSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Side of the first `Won` event, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.events.iter().find_map(|e| match e {
            GameEvent::Won { side } => Some(*side),
            _ => None,
        })
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.events.clear();
        self.snapshots = 0;
        self.last_snapshot = None;
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        self.snapshots += 1;
        self.last_snapshot = Some(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_records() {
        let mut log = EventLog::new();
        log.on_event(&GameEvent::Reset);
        log.on_event(&GameEvent::Won { side: Side::Red });
        log.on_event(&GameEvent::Won { side: Side::Blue });

        assert_eq!(log.events().len(), 3);
        assert_eq!(log.winner(), Some(Side::Red));

        log.clear();
        assert!(log.events().is_empty());
        assert_eq!(log.winner(), None);
    }

    #[test]
    fn test_shared_log() {
        let log = EventLog::shared();
        let mut observer: Box<dyn GameObserver> = Box::new(Rc::clone(&log));

        observer.on_event(&GameEvent::FactoryBuilt {
            side: Side::Blue,
            vertex: VertexId::new(2),
        });

        assert_eq!(log.borrow().events().len(), 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::NetworkSevered {
            side: Side::Red,
            removed: vec![VertexId::new(4), VertexId::new(9)],
            released_edges: 2,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
    }
}
