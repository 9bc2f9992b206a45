// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a single record is added through the manual path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub product_code: String,
}

impl ProductAdded {
    pub fn new(product_id: Uuid, product_code: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
            product_code,
        }
    }
}

impl DomainEvent for ProductAdded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ProductAdded"
    }
}

/// Emitted after a bulk delete completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub deleted: usize,
    pub missing: usize,
}

impl ProductsDeleted {
    pub fn new(deleted: usize, missing: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            deleted,
            missing,
        }
    }
}

impl DomainEvent for ProductsDeleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ProductsDeleted"
    }
}

// ============================================================================
// IMPORT EVENTS
// ============================================================================

/// Emitted after a bulk import merge has been persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMerged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub imported: usize,
    pub updated: usize,
    pub diagnostics: usize,
}

impl BatchMerged {
    pub fn new(imported: usize, updated: usize, diagnostics: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            imported,
            updated,
            diagnostics,
        }
    }
}

impl DomainEvent for BatchMerged {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "BatchMerged"
    }
}

// ============================================================================
// TITLE EVENTS
// ============================================================================

/// Emitted for each record whose generated title was assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleAssigned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub title: String,
}

impl TitleAssigned {
    pub fn new(product_id: Uuid, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
            title,
        }
    }
}

impl DomainEvent for TitleAssigned {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "TitleAssigned"
    }
}
