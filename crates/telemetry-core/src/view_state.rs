//! Owned dashboard view state.
//!
//! The polling loop is the single writer; render paths only read.

use std::time::Instant;

use crate::contracts::{Player, Session};

/// Pick the driver shown on the single-driver dashboard.
///
/// First classified entry in list order, else the first entry, else `None`.
/// List order wins over rank: `[0, 3, 1]` selects the driver on P3.
pub fn select_focal_player(players: &[Player]) -> Option<&Player> {
    focal_index(players).and_then(|index| players.get(index))
}

fn focal_index(players: &[Player]) -> Option<usize> {
    players
        .iter()
        .position(Player::is_classified)
        .or_else(|| (!players.is_empty()).then_some(0))
}

/// Freshest applied server state.
#[derive(Debug, Clone, Default)]
pub struct TelemetryViewState {
    session: Option<Session>,
    players: Vec<Player>,
    focal_index: Option<usize>,
    sequence: u64,
    updated_at: Option<Instant>,
}

impl TelemetryViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session wholesale.
    pub fn apply_session(&mut self, session: Session) {
        self.session = Some(session);
        self.updated_at = Some(Instant::now());
    }

    /// Replace the player list wholesale and re-derive the focal player.
    pub fn apply_players(&mut self, players: Vec<Player>, sequence: u64) {
        self.focal_index = focal_index(&players);
        self.players = players;
        self.sequence = sequence;
        self.updated_at = Some(Instant::now());
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn focal_player(&self) -> Option<&Player> {
        self.focal_index.and_then(|index| self.players.get(index))
    }

    /// Players eligible for the leaderboard and the track map, in list order.
    pub fn classified_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.is_classified())
    }

    /// Sequence number of the cycle whose player list is currently applied.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn updated_at(&self) -> Option<Instant> {
        self.updated_at
    }

    /// True until the first successful apply.
    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.players.is_empty() && self.updated_at.is_none()
    }
}
