//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CombatNotice, RegionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Damage, attack notices, interrupts and engage changes
    Combat,
    /// Messages addressed to actors
    Chat,
    /// Cast animation cues
    Visual,
    /// Clock advances and actor arrivals/departures
    Region,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Combat, Topic::Chat, Topic::Visual, Topic::Region];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatNotice),
    Chat(CombatNotice),
    Visual(CombatNotice),
    Region(RegionEvent),
}

impl Event {
    /// Wraps a core event, routing it by kind.
    pub fn from_notice(notice: CombatNotice) -> Self {
        use combat_core::CombatEvent;

        match notice.event {
            CombatEvent::Message { .. } => Event::Chat(notice),
            CombatEvent::SpellEffect { .. } => Event::Visual(notice),
            _ => Event::Combat(notice),
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Chat(_) => Topic::Chat,
            Event::Visual(_) => Topic::Visual,
            Event::Region(_) => Topic::Region,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic has its own broadcast channel.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

struct Channels {
    combat: broadcast::Sender<Event>,
    chat: broadcast::Sender<Event>,
    visual: broadcast::Sender<Event>,
    region: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                chat: broadcast::channel(capacity).0,
                visual: broadcast::channel(capacity).0,
                region: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.channels.combat,
            Topic::Chat => &self.channels.chat,
            Topic::Visual => &self.channels.visual,
            Topic::Region => &self.channels.region,
        }
    }

    /// Publish an event to its corresponding topic. Best-effort: events with
    /// no subscriber are dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
