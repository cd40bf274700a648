//! Core mutable state for a Degen Fortune session.
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::collections::VecDeque;

use crate::achievements::Badge;
use crate::constants::{
    INITIAL_CLICK_YIELD, LORE_WINDOW, MESSAGE_TTL_TICKS, VOLATILITY_MAX, VOLATILITY_MIN,
};

/// Transient banner surfaced by the embedding layer; expires after a fixed
/// number of ticks. A fresh unlock replaces the message and restarts the
/// countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub text: String,
    pub remaining_ticks: u8,
}

impl SystemMessage {
    fn new(text: String) -> Self {
        Self {
            text,
            remaining_ticks: MESSAGE_TTL_TICKS,
        }
    }
}

/// The single mutable aggregate for one game session. Volatile: reset on
/// session end, never persisted (serde derives exist so embedders can
/// snapshot state for display bridges, not as a save system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Fortune balance in whole $DEGEN; never negative.
    pub balance: i64,
    pub upgrade_level: u32,
    /// Base yield of one click, before any event multiplier.
    pub click_yield: f64,
    /// Owned units per factory type, indexed like the factory catalog.
    pub factory_counts: SmallVec<[u32; 4]>,
    /// Risk meter in `[1, 10]`; scales upgrade payoff.
    pub volatility: f64,
    /// Rolling flavor-text window, most recent last.
    pub lore: VecDeque<String>,
    /// Lifetime count of lore appends; unlike `lore` it is never capped.
    pub lore_total: u64,
    /// Earned badges in unlock order; append-only, no duplicates.
    pub achievements: Vec<Badge>,
    pub system_message: Option<SystemMessage>,
    /// One-shot doubling of the next production tick.
    pub production_boost: bool,
}

impl GameState {
    /// Fresh state sized for a catalog with `factory_type_count` types.
    #[must_use]
    pub fn new(factory_type_count: usize) -> Self {
        Self {
            balance: 0,
            upgrade_level: 0,
            click_yield: INITIAL_CLICK_YIELD,
            factory_counts: smallvec![0; factory_type_count],
            volatility: VOLATILITY_MIN,
            lore: VecDeque::with_capacity(LORE_WINDOW),
            lore_total: 0,
            achievements: Vec::new(),
            system_message: None,
            production_boost: false,
        }
    }

    /// Whether any factory is owned (drives the production heartbeat).
    #[must_use]
    pub fn any_factory(&self) -> bool {
        self.factory_counts.iter().any(|&count| count > 0)
    }

    /// Add a (possibly negative) delta to the balance, clamping at zero.
    pub fn credit(&mut self, delta: i64) {
        self.balance = self.balance.saturating_add(delta).max(0);
    }

    /// Append a line to the rolling lore window, evicting the oldest entry
    /// once the window is full.
    pub fn push_lore(&mut self, text: String) {
        if self.lore.len() == LORE_WINDOW {
            self.lore.pop_front();
        }
        self.lore.push_back(text);
        self.lore_total += 1;
    }

    /// Most recent lore line, if any.
    #[must_use]
    pub fn latest_lore(&self) -> Option<&str> {
        self.lore.back().map(String::as_str)
    }

    #[must_use]
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.achievements.contains(&badge)
    }

    /// Award a badge with set semantics: returns `true` only when newly
    /// earned, in which case the system message is replaced with a fresh TTL.
    pub fn award(&mut self, badge: Badge) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.achievements.push(badge);
        self.system_message = Some(SystemMessage::new(format!("Achievement unlocked: {badge}")));
        true
    }

    pub(crate) fn clamp_volatility(&mut self) {
        self.volatility = self.volatility.clamp(VOLATILITY_MIN, VOLATILITY_MAX);
    }

    /// Burn one tick off the transient message; returns `true` when the
    /// message expired on this tick.
    pub(crate) fn decay_system_message(&mut self) -> bool {
        if let Some(message) = &mut self.system_message {
            message.remaining_ticks = message.remaining_ticks.saturating_sub(1);
            if message.remaining_ticks == 0 {
                self.system_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_baseline() {
        let state = GameState::new(3);
        assert_eq!(state.balance, 0);
        assert_eq!(state.upgrade_level, 0);
        assert!((state.click_yield - 1.0).abs() < f64::EPSILON);
        assert_eq!(state.factory_counts.len(), 3);
        assert!(!state.any_factory());
        assert!((state.volatility - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn credit_clamps_at_zero() {
        let mut state = GameState::new(1);
        state.credit(10);
        state.credit(-50);
        assert_eq!(state.balance, 0);
    }

    #[test]
    fn lore_window_evicts_oldest_first() {
        let mut state = GameState::new(1);
        for n in 0..7 {
            state.push_lore(format!("line {n}"));
        }
        assert_eq!(state.lore.len(), 5);
        assert_eq!(state.lore.front().map(String::as_str), Some("line 2"));
        assert_eq!(state.latest_lore(), Some("line 6"));
        assert_eq!(state.lore_total, 7);
    }

    #[test]
    fn award_is_idempotent_per_badge() {
        let mut state = GameState::new(1);
        assert!(state.award(Badge::WhaleWatching));
        assert!(!state.award(Badge::WhaleWatching));
        assert_eq!(state.achievements.len(), 1);
    }

    #[test]
    fn fresh_award_restarts_message_ttl() {
        let mut state = GameState::new(1);
        state.award(Badge::WhaleWatching);
        state.decay_system_message();
        state.decay_system_message();
        state.award(Badge::UltraDegen);
        let message = state.system_message.as_ref().expect("message pending");
        assert_eq!(message.remaining_ticks, 5);
        assert!(message.text.contains("Ultra Degen"));
    }

    #[test]
    fn message_expires_after_five_decays() {
        let mut state = GameState::new(1);
        state.award(Badge::LoreMaster);
        for _ in 0..4 {
            assert!(!state.decay_system_message());
        }
        assert!(state.decay_system_message());
        assert!(state.system_message.is_none());
        assert!(!state.decay_system_message());
    }
}
