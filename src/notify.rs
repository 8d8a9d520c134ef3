//! Per-side views of a batch
//!
//! Every batch produces one [`SideUpdate`] per side. Which card the opponent
//! drew is never revealed: those draws collapse into a count. Rule
//! rejections and engine faults only reach the side whose effect caused them.
//!
//! How much of the board state itself is hidden depends on the
//! [`RevealPolicy`]. `PassThrough` sends every zone as is; `Conceal` reduces
//! the opponent's hand and both decks to card counts.

use crate::core::{CardInPlay, Creature, HeroInPlay, Side, Sided};
use crate::game::{BatchReport, EffectKind, Event, GameState, Phase};
use crate::zones::ZoneList;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Every zone is sent in full
    #[default]
    PassThrough,
    /// Opponent hand and both decks are sent as counts
    Conceal,
}

/// A card zone as one viewer may see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "visibility", rename_all = "snake_case")]
pub enum ZoneView {
    Visible { cards: Vec<CardInPlay> },
    Hidden { count: usize },
}

impl ZoneView {
    pub fn len(&self) -> usize {
        match self {
            ZoneView::Visible { cards } => cards.len(),
            ZoneView::Hidden { count } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, ZoneView::Hidden { .. })
    }
}

/// One side's zones as the viewer may see them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonesView {
    pub hand: ZoneView,
    pub deck: ZoneView,
    pub graveyard: Vec<CardInPlay>,
    pub board: Vec<Creature>,
}

/// The game state projected for one viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideView {
    pub viewer: Side,
    pub turn: u32,
    pub active: Side,
    pub phase: Phase,
    pub winner: Option<Side>,
    pub heroes: Sided<HeroInPlay>,
    pub mana_pool: Sided<u32>,
    pub mana_used: Sided<u32>,
    pub zones: Sided<ZonesView>,
}

/// Something that happened, as the viewer may learn it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Update {
    Event(Event),
    /// The opponent drew this many cards
    CardsDrawn { side: Side, count: u32 },
}

/// Errors addressed to one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientError {
    Rejected {
        effect: EffectKind,
        reason: String,
        details: String,
    },
    /// Something went wrong on our side; `error_id` is for bug reports
    Internal { error_id: String },
}

/// Everything one side receives after a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideUpdate {
    pub side: Side,
    pub state: SideView,
    pub updates: Vec<Update>,
    pub errors: Vec<ClientError>,
}

/// Build the update `viewer` receives for this batch
pub fn side_update(
    state: &GameState,
    report: &BatchReport,
    viewer: Side,
    policy: RevealPolicy,
) -> SideUpdate {
    let errors = report
        .rejections
        .iter()
        .filter(|r| r.side == viewer)
        .map(|r| ClientError::Rejected {
            effect: r.effect,
            reason: r.reason.clone(),
            details: r.details.clone(),
        })
        .chain(
            report
                .faults
                .iter()
                .filter(|f| f.side == viewer)
                .map(|f| ClientError::Internal {
                    error_id: f.error_id.clone(),
                }),
        )
        .collect();

    SideUpdate {
        side: viewer,
        state: side_view(state, viewer, policy),
        updates: filter_events(&report.events, viewer),
        errors,
    }
}

/// Redact opponent draws, merging consecutive ones into a single count
pub fn filter_events(events: &[Event], viewer: Side) -> Vec<Update> {
    let mut updates: Vec<Update> = Vec::with_capacity(events.len());
    for event in events {
        match event {
            Event::Draw { side, .. } if *side != viewer => {
                if let Some(Update::CardsDrawn { side: last, count }) = updates.last_mut() {
                    if last == side {
                        *count += 1;
                        continue;
                    }
                }
                updates.push(Update::CardsDrawn {
                    side: *side,
                    count: 1,
                });
            }
            _ => updates.push(Update::Event(event.clone())),
        }
    }
    updates
}

/// Project the state for one viewer
pub fn side_view(state: &GameState, viewer: Side, policy: RevealPolicy) -> SideView {
    let zones = Sided::from_fn(|side| {
        let conceal = policy == RevealPolicy::Conceal;
        ZonesView {
            hand: zone_view(state, state.hand(side), conceal && side != viewer),
            deck: zone_view(state, state.deck(side), conceal),
            graveyard: cards(state, state.graveyard(side)),
            board: state
                .board(side)
                .iter()
                .filter_map(|id| state.creatures.find(id).cloned())
                .collect(),
        }
    });

    SideView {
        viewer,
        turn: state.turn,
        active: state.active,
        phase: state.phase,
        winner: state.winner,
        heroes: state.heroes.clone(),
        mana_pool: state.mana_pool.clone(),
        mana_used: state.mana_used.clone(),
        zones,
    }
}

fn zone_view(state: &GameState, zone: &ZoneList<CardInPlay>, hidden: bool) -> ZoneView {
    if hidden {
        ZoneView::Hidden { count: zone.len() }
    } else {
        ZoneView::Visible {
            cards: cards(state, zone),
        }
    }
}

fn cards(state: &GameState, zone: &ZoneList<CardInPlay>) -> Vec<CardInPlay> {
    zone.iter()
        .filter_map(|id| state.cards.find(id).cloned())
        .collect()
}
