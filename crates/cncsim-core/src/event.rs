//! Event system for simulator observers
//!
//! Provides:
//! - Event types for simulation playback and machine state changes
//! - Category filters so observers only see what they display
//! - Event dispatcher with explicit observer registration

use glam::DVec3;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Simulator event types
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// Playback started
    SimulationStarted,
    /// Playback paused
    SimulationPaused,
    /// Playback stopped and rewound
    SimulationStopped,
    /// Playback advanced
    SimulationProgress {
        /// Lines processed so far.
        current: usize,
        /// Total lines in the program.
        total: usize,
    },
    /// Axis positions or TCP changed
    MachineStateChanged {
        /// Positions of the active axes keyed by axis name.
        positions: BTreeMap<String, f64>,
        /// Tool center point in MCS.
        tcp: DVec3,
    },
    /// A program was loaded
    GcodeLoaded {
        /// Number of non-blank lines.
        line_count: usize,
    },
    /// Tool parameters were applied
    ToolChanged,
    /// Workpiece was (re)created
    WorkpieceUpdated,
    /// An operation failed
    ErrorOccurred {
        /// Short category shown as a dialog title.
        title: String,
        /// Human readable message.
        message: String,
    },
}

impl SimulationEvent {
    /// Category used for filtering
    pub fn category(&self) -> EventCategory {
        match self {
            Self::SimulationStarted
            | Self::SimulationPaused
            | Self::SimulationStopped
            | Self::SimulationProgress { .. }
            | Self::GcodeLoaded { .. } => EventCategory::Playback,
            Self::MachineStateChanged { .. } | Self::ToolChanged | Self::WorkpieceUpdated => {
                EventCategory::Machine
            }
            Self::ErrorOccurred { .. } => EventCategory::Error,
        }
    }
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimulationStarted => write!(f, "Simulation started"),
            Self::SimulationPaused => write!(f, "Simulation paused"),
            Self::SimulationStopped => write!(f, "Simulation stopped"),
            Self::SimulationProgress { current, total } => {
                write!(f, "Progress: {}/{}", current, total)
            }
            Self::MachineStateChanged { positions, tcp } => {
                write!(
                    f,
                    "Machine state: {:?}, TCP: ({:.3}, {:.3}, {:.3})",
                    positions, tcp.x, tcp.y, tcp.z
                )
            }
            Self::GcodeLoaded { line_count } => write!(f, "G-code loaded: {} lines", line_count),
            Self::ToolChanged => write!(f, "Tool changed"),
            Self::WorkpieceUpdated => write!(f, "Workpiece updated"),
            Self::ErrorOccurred { title, message } => write!(f, "{}: {}", title, message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Playback lifecycle and program loading
    Playback,
    /// Machine, tool and workpiece state
    Machine,
    /// Failures
    Error,
}

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type EventHandler = Box<dyn Fn(&SimulationEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: Option<Vec<EventCategory>>,
    handler: EventHandler,
}

/// Event dispatcher publishing events to registered observers.
///
/// Handlers run synchronously on the publishing thread, in subscription
/// order, while the handler table is read-locked; a handler must not
/// subscribe or unsubscribe.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<Vec<Subscription>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every event
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SimulationEvent) + Send + Sync + 'static,
    {
        self.insert(None, Box::new(handler))
    }

    /// Register a handler for events in `categories` only
    pub fn subscribe_filtered<F>(&self, categories: &[EventCategory], handler: F) -> SubscriptionId
    where
        F: Fn(&SimulationEvent) + Send + Sync + 'static,
    {
        self.insert(Some(categories.to_vec()), Box::new(handler))
    }

    fn insert(&self, filter: Option<Vec<EventCategory>>, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.handlers.write().push(Subscription {
            id,
            filter,
            handler,
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Remove a handler; returns true if it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|s| s.id == id) {
            Some(index) => {
                handlers.remove(index);
                tracing::debug!("Subscription {} removed", id);
                true
            }
            None => false,
        }
    }

    /// Publish an event; returns the number of handlers invoked
    pub fn publish(&self, event: SimulationEvent) -> usize {
        let category = event.category();
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for subscription in handlers.iter() {
            if subscription
                .filter
                .as_ref()
                .is_none_or(|c| c.contains(&category))
            {
                (subscription.handler)(&event);
                delivered += 1;
            }
        }
        tracing::trace!("{} delivered to {} observers", event, delivered);
        delivered
    }

    /// Number of registered handlers
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
