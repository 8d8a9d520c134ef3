//! Outcome of resolving one effect

use crate::game::{Effect, Event, GameState};
use crate::DuelError;

#[derive(Debug, Clone)]
pub enum Resolution {
    /// State changed; events happened; child effects go to the front of the queue
    Success {
        state: Box<GameState>,
        events: Vec<Event>,
        effects: Vec<Effect>,
    },
    /// A rule cancelled the effect before it changed anything
    Prevented { reason: String, events: Vec<Event> },
    /// The effect broke a game rule; reported to the issuing side only
    Rejected { reason: String, details: String },
    /// An engine defect; never emits events
    Fault {
        error_id: String,
        reason: String,
        retryable: bool,
    },
}

impl Resolution {
    pub fn success(state: GameState, events: Vec<Event>, effects: Vec<Effect>) -> Self {
        Resolution::Success {
            state: Box::new(state),
            events,
            effects,
        }
    }

    pub fn prevented(reason: impl Into<String>, events: Vec<Event>) -> Self {
        Resolution::Prevented {
            reason: reason.into(),
            events,
        }
    }

    pub fn rejected(reason: impl Into<String>, details: impl Into<String>) -> Self {
        Resolution::Rejected {
            reason: reason.into(),
            details: details.into(),
        }
    }

    pub fn fault(error_id: impl Into<String>, reason: impl Into<String>, retryable: bool) -> Self {
        Resolution::Fault {
            error_id: error_id.into(),
            reason: reason.into(),
            retryable,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resolution::Success { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Resolution::Rejected { .. })
    }

    /// Events visible to players (faults and rejections carry none)
    pub fn events(&self) -> &[Event] {
        match self {
            Resolution::Success { events, .. } | Resolution::Prevented { events, .. } => events,
            Resolution::Rejected { .. } | Resolution::Fault { .. } => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Success { .. } => "success",
            Resolution::Prevented { .. } => "prevented",
            Resolution::Rejected { .. } => "rejected",
            Resolution::Fault { .. } => "fault",
        }
    }
}

impl From<DuelError> for Resolution {
    fn from(err: DuelError) -> Self {
        Resolution::fault(err.error_id(), err.to_string(), false)
    }
}
