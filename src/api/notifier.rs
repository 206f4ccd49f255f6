//! Change notification system for broadcasting content updates to WebSocket clients.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Kinds of content the admin panel manages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Contact,
    Event,
    Fabric,
    Faq,
    Gallery,
    Service,
    Testimonial,
    Setting,
}

/// Every public page, for changes that touch the shared layout.
pub const ALL_PAGES: &[&str] = &["/", "/about", "/gallery", "/fabrics"];

impl Entity {
    /// Public pages whose rendering depends on this kind of content.
    pub fn public_paths(self) -> &'static [&'static str] {
        match self {
            Entity::Contact | Entity::Event => &[],
            Entity::Fabric => &["/fabrics"],
            Entity::Faq | Entity::Service => &["/", "/about"],
            Entity::Gallery => &["/", "/gallery"],
            Entity::Testimonial => &["/"],
            Entity::Setting => ALL_PAGES,
        }
    }
}

/// Messages broadcast when content is created, updated, or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum UpdateMessage {
    Created { entity: Entity, id: String },
    Updated { entity: Entity, id: String },
    Deleted { entity: Entity, id: String },
    /// Several rows changed order at once.
    Reordered { entity: Entity },
    /// Cached pages were dropped and will be re-rendered on next request.
    Revalidated { paths: Vec<String> },
}

impl UpdateMessage {
    pub fn created(entity: Entity, id: &str) -> Self {
        UpdateMessage::Created {
            entity,
            id: id.to_string(),
        }
    }

    pub fn updated(entity: Entity, id: &str) -> Self {
        UpdateMessage::Updated {
            entity,
            id: id.to_string(),
        }
    }

    pub fn deleted(entity: Entity, id: &str) -> Self {
        UpdateMessage::Deleted {
            entity,
            id: id.to_string(),
        }
    }

    /// The entity a change refers to, if any.
    pub fn entity(&self) -> Option<Entity> {
        match self {
            UpdateMessage::Created { entity, .. }
            | UpdateMessage::Updated { entity, .. }
            | UpdateMessage::Deleted { entity, .. }
            | UpdateMessage::Reordered { entity } => Some(*entity),
            UpdateMessage::Revalidated { .. } => None,
        }
    }
}

/// Pub/sub notifier for broadcasting changes to all subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<UpdateMessage>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a new ChangeNotifier with a buffer of 100 messages.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self { tx }
    }

    /// Subscribe to receive update notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<UpdateMessage> {
        self.tx.subscribe()
    }

    /// Broadcast an update message to all subscribers.
    pub fn notify(&self, msg: UpdateMessage) {
        let _ = self.tx.send(msg);
    }
}
