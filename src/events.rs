// 📋 Event Trail - In-memory audit of applied mutations
// Every applied catalog mutation appends one event. Nothing persists beyond
// the session; the trail exists so an operator can see what changed and when

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// EVENT KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    CollectionLoaded,
    EntityAdded,
    EditStarted,
    EditSaved,
    EditCancelled,
    EntityRemoved,
    ViewExported,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CollectionLoaded => "collection_loaded",
            EventKind::EntityAdded => "entity_added",
            EventKind::EditStarted => "edit_started",
            EventKind::EditSaved => "edit_saved",
            EventKind::EditCancelled => "edit_cancelled",
            EventKind::EntityRemoved => "entity_removed",
            EventKind::ViewExported => "view_exported",
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// One applied mutation, with enough context to reconstruct the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub entity_kind: String,
    pub code: String,
    pub detail: serde_json::Value,
}

impl CatalogEvent {
    pub fn new(kind: EventKind, entity_kind: &str, code: &str, detail: serde_json::Value) -> Self {
        CatalogEvent {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            entity_kind: entity_kind.to_string(),
            code: code.to_string(),
            detail,
        }
    }
}

// ============================================================================
// EVENT LOG
// ============================================================================

/// Append-only, session-scoped trail of applied mutations
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CatalogEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { events: Vec::new() }
    }

    pub fn record(&mut self, kind: EventKind, entity_kind: &str, code: &str, detail: serde_json::Value) {
        let event = CatalogEvent::new(kind, entity_kind, code, detail);
        tracing::debug!(
            kind = event.kind.as_str(),
            entity = %event.entity_kind,
            code = %event.code,
            "catalog event"
        );
        self.events.push(event);
    }

    pub fn all(&self) -> &[CatalogEvent] {
        &self.events
    }

    pub fn latest(&self) -> Option<&CatalogEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
