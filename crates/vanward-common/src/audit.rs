//! Price audit logging
//!
//! Every estimate and admin reprice is recorded so that back-office staff
//! can reconcile price differences between stored and recomputed
//! breakdowns. The calculator itself stays pure; events are emitted by the
//! quote engine around it.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::types::rate_profile::RateProfileId;

/// What produced the audited price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAuditAction {
    /// A fresh estimate (booking draft or display quote)
    Estimate,
    /// An admin reprice replacing a stored breakdown
    Reprice,
}

impl std::fmt::Display for PriceAuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceAuditAction::Estimate => write!(f, "ESTIMATE"),
            PriceAuditAction::Reprice => write!(f, "REPRICE"),
        }
    }
}

/// One audited pricing event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAuditEvent {
    /// Unique event ID, time-ordered
    pub event_id: String,

    /// Timestamp (Unix millis)
    pub timestamp: i64,

    /// Estimate or reprice
    pub action: PriceAuditAction,

    /// Quote this event belongs to
    pub quote_id: Option<Uuid>,

    /// Booking reference when repricing a stored booking
    pub booking_ref: Option<String>,

    /// Who triggered the calculation (admin user, system)
    pub actor: Option<String>,

    /// Previous billable total, present for reprices
    pub previous_total: Option<Decimal>,

    /// New billable total
    pub new_total: Decimal,

    /// Rate profile the calculation ran under
    pub profile: RateProfileId,

    /// Additional details
    pub details: HashMap<String, String>,
}

impl PriceAuditEvent {
    /// Create a new audit event
    pub fn new(action: PriceAuditAction, new_total: Decimal, profile: RateProfileId) -> Self {
        Self {
            event_id: Uuid::now_v7().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            action,
            quote_id: None,
            booking_ref: None,
            actor: None,
            previous_total: None,
            new_total,
            profile,
            details: HashMap::new(),
        }
    }

    /// Set the quote ID
    pub fn with_quote(mut self, quote_id: Uuid) -> Self {
        self.quote_id = Some(quote_id);
        self
    }

    /// Set the booking reference
    pub fn with_booking_ref(mut self, booking_ref: &str) -> Self {
        self.booking_ref = Some(booking_ref.to_string());
        self
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = Some(actor.to_string());
        self
    }

    /// Set the previous total being replaced
    pub fn with_previous_total(mut self, total: Decimal) -> Self {
        self.previous_total = Some(total);
        self
    }

    /// Add detail
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }

    /// Difference against the previous total, when one is recorded
    pub fn delta(&self) -> Option<Decimal> {
        self.previous_total.map(|prev| self.new_total - prev)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Audit event sink
pub trait AuditSink: Send + Sync {
    /// Record an audit event
    fn record(&self, event: &PriceAuditEvent);
}

/// Sink that writes events to the tracing log
pub struct ConsoleAuditSink;

impl AuditSink for ConsoleAuditSink {
    fn record(&self, event: &PriceAuditEvent) {
        info!(
            action = %event.action,
            quote = ?event.quote_id,
            booking = event.booking_ref.as_deref().unwrap_or("-"),
            actor = event.actor.as_deref().unwrap_or("system"),
            total = %event.new_total,
            delta = ?event.delta(),
            profile = %event.profile,
            "price audit"
        );
    }
}

/// Sink that keeps events in memory, used by tests and admin views
#[derive(Default)]
pub struct MemoryAuditSink {
    events: RwLock<Vec<PriceAuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<PriceAuditEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &PriceAuditEvent) {
        self.events.write().push(event.clone());
    }
}

/// Price audit log fanning events out to its sinks
pub struct PriceAuditLog {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl PriceAuditLog {
    /// Create a log with the console sink attached
    pub fn new() -> Self {
        Self {
            sinks: vec![Box::new(ConsoleAuditSink)],
        }
    }

    /// Create a log with no sinks
    pub fn empty() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink
    pub fn add_sink(&mut self, sink: Box<dyn AuditSink>) {
        self.sinks.push(sink);
    }

    /// Record an event on all sinks
    pub fn log(&self, event: PriceAuditEvent) {
        for sink in &self.sinks {
            sink.record(&event);
        }
    }

    /// Record a fresh estimate
    pub fn log_estimate(&self, quote_id: Uuid, total: Decimal, profile: RateProfileId) {
        self.log(PriceAuditEvent::new(PriceAuditAction::Estimate, total, profile).with_quote(quote_id));
    }

    /// Record an admin reprice with the total being replaced
    pub fn log_reprice(
        &self,
        booking_ref: Option<&str>,
        previous_total: Decimal,
        new_total: Decimal,
        profile: RateProfileId,
        actor: Option<&str>,
    ) {
        let mut event = PriceAuditEvent::new(PriceAuditAction::Reprice, new_total, profile)
            .with_previous_total(previous_total);
        if let Some(booking_ref) = booking_ref {
            event = event.with_booking_ref(booking_ref);
        }
        if let Some(actor) = actor {
            event = event.with_actor(actor);
        }
        self.log(event);
    }
}

impl Default for PriceAuditLog {
    fn default() -> Self {
        Self::new()
    }
}
