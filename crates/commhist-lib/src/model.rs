//! Core data types for the communication-history store.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::HistoryError;

/// Store-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned conversation group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub i64);

impl GroupId {
    /// Sentinel referenced by events whose group could not be created.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of communication-history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Sms,
    Call,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Call => "call",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "call" => Ok(Self::Call),
            other => Err(HistoryError::InvalidKind(other.to_string())),
        }
    }
}

/// Direction of an event relative to the local account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "in",
            Self::Outbound => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::Inbound),
            "out" => Ok(Self::Outbound),
            other => Err(HistoryError::InvalidDirection(other.to_string())),
        }
    }
}

/// Delivery status of an event.
///
/// Imports fix SMS events to `Delivered` and calls to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventStatus {
    #[default]
    Unknown,
    Delivered,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "delivered" => Ok(Self::Delivered),
            other => Err(HistoryError::InvalidStatus(other.to_string())),
        }
    }
}

/// One SMS message or call record.
///
/// Events are constructed once and never mutated; `id` is `None` until the
/// store has assigned one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Option<EventId>,
    pub kind: EventKind,
    /// Conversation group, `GroupId::NONE` for calls.
    pub group_id: GroupId,
    /// Local account the event is filed under.
    pub local_uid: String,
    /// Phone number or handle on the other end.
    pub remote_uid: String,
    pub direction: Direction,
    pub status: EventStatus,
    pub is_read: bool,
    /// Call only: the call was not answered.
    pub is_missed: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// SMS only: message text, may contain embedded newlines.
    pub body: Option<String>,
}

/// A conversation thread keyed by exactly one remote party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Option<GroupId>,
    pub local_uid: String,
    pub remote_uid: String,
}

impl Group {
    /// Build a peer-to-peer group for one remote party under `local_uid`.
    #[must_use]
    pub fn peer_to_peer(local_uid: impl Into<String>, remote_uid: impl Into<String>) -> Self {
        Self {
            id: None,
            local_uid: local_uid.into(),
            remote_uid: remote_uid.into(),
        }
    }
}
