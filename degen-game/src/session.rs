//! Session wiring: state, catalogs, RNG streams, and the tick scheduler
//! behind one surface.
use crate::catalog::{FactoryCatalog, FortuneCatalog};
use crate::economy::{self, FactoryReceipt, UpgradeReceipt};
use crate::fortune::{FortuneDraw, draw_fortune};
use crate::mechanics::{ClickOutcome, TickOutcome, apply_tick, resolve_click};
use crate::rng::RngBundle;
use crate::scheduler::{SchedulerCommand, TickScheduler};
use crate::state::GameState;
use crate::view::TerminalView;

/// The static catalogs a session plays against.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub factories: FactoryCatalog,
    pub fortunes: FortuneCatalog,
}

impl Catalogs {
    /// The embedded default catalogs.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            factories: FactoryCatalog::load_from_static(),
            fortunes: FortuneCatalog::load_from_static(),
        }
    }
}

/// An operation's result paired with the heartbeat transition it caused, if
/// any. The host applies the command to its interval primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpResult<T> {
    pub outcome: T,
    pub heartbeat: Option<SchedulerCommand>,
}

/// One running game: owns the state, the catalogs, the deterministic RNG
/// bundle, and the scheduler. All mutation goes through the operation
/// methods, which serializes timer-driven and user-driven updates by
/// construction.
#[derive(Debug)]
pub struct FortuneSession {
    state: GameState,
    catalogs: Catalogs,
    rng: RngBundle,
    scheduler: TickScheduler,
}

impl FortuneSession {
    /// New session over the embedded catalogs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_catalogs(seed, Catalogs::embedded())
    }

    /// New session over caller-supplied (already validated) catalogs.
    #[must_use]
    pub fn with_catalogs(seed: u64, catalogs: Catalogs) -> Self {
        let state = GameState::new(catalogs.factories.len());
        Self {
            state,
            catalogs,
            rng: RngBundle::from_user_seed(seed),
            scheduler: TickScheduler::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Mutate state directly (test setup, embedder bridges).
    pub fn with_state_mut<F>(&mut self, f: F)
    where
        F: FnOnce(&mut GameState),
    {
        f(&mut self.state);
    }

    /// Consume the session, yielding the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Resolve one user click: roll the fortune, apply it, evaluate badges,
    /// log the flavor text.
    pub fn click(&mut self) -> OpResult<ClickOutcome> {
        let draw = {
            let mut event_rng = self.rng.fortune();
            let mut tip_rng = self.rng.tip();
            draw_fortune(&self.catalogs.fortunes, &mut *event_rng, &mut *tip_rng)
        };
        let outcome = resolve_click(&mut self.state, &self.catalogs.fortunes, draw);
        self.finish(outcome)
    }

    /// Resolve one click against a forced fortune draw, bypassing the RNG.
    /// Exists for deterministic scenario tests and embedder replays.
    pub fn click_forced(&mut self, draw: FortuneDraw) -> OpResult<ClickOutcome> {
        let outcome = resolve_click(&mut self.state, &self.catalogs.fortunes, draw);
        self.finish(outcome)
    }

    /// One time unit of the host heartbeat.
    pub fn tick(&mut self) -> OpResult<TickOutcome> {
        let outcome = apply_tick(&mut self.state, &self.catalogs.factories);
        self.finish(outcome)
    }

    /// Buy one upgrade level; `None` outcome when the balance is short.
    pub fn buy_upgrade(&mut self) -> OpResult<Option<UpgradeReceipt>> {
        let outcome = economy::buy_upgrade(&mut self.state);
        self.finish(outcome)
    }

    /// Buy one unit of the indexed factory type; `None` outcome when the
    /// balance is short.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range `type_index` (programming error).
    pub fn buy_factory(&mut self, type_index: usize) -> OpResult<Option<FactoryReceipt>> {
        let outcome = economy::buy_factory(&mut self.state, &self.catalogs.factories, type_index);
        self.finish(outcome)
    }

    /// Re-run scheduler reconciliation without a state mutation, e.g. after
    /// the host mutated state through [`Self::with_state_mut`].
    pub fn reconcile(&mut self) -> Option<SchedulerCommand> {
        self.scheduler.reconcile(&self.state)
    }

    /// Read-only projection for the display layer.
    #[must_use]
    pub fn view(&self) -> TerminalView {
        TerminalView::project(&self.state, &self.catalogs)
    }

    fn finish<T>(&mut self, outcome: T) -> OpResult<T> {
        let heartbeat = self.scheduler.reconcile(&self.state);
        OpResult { outcome, heartbeat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_identically() {
        let mut a = FortuneSession::new(0xDEAD_BEEF);
        let mut b = FortuneSession::new(0xDEAD_BEEF);
        for _ in 0..50 {
            let left = a.click();
            let right = b.click();
            assert_eq!(left.outcome, right.outcome);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = FortuneSession::new(1);
        let mut b = FortuneSession::new(2);
        let texts_a: Vec<String> = (0..20).map(|_| a.click().outcome.text).collect();
        let texts_b: Vec<String> = (0..20).map(|_| b.click().outcome.text).collect();
        assert_ne!(texts_a, texts_b);
    }

    #[test]
    fn first_factory_purchase_starts_heartbeat() {
        let mut session = FortuneSession::new(3);
        session.with_state_mut(|gs| gs.balance = 25);
        let result = session.buy_factory(0);
        assert!(result.outcome.is_some());
        assert_eq!(result.heartbeat, Some(SchedulerCommand::Start));

        // Second purchase of the same type changes nothing heartbeat-wise.
        session.with_state_mut(|gs| gs.balance = 100);
        let again = session.buy_factory(0);
        assert!(again.outcome.is_some());
        assert_eq!(again.heartbeat, None);
    }

    #[test]
    fn failed_purchase_emits_no_heartbeat_command() {
        let mut session = FortuneSession::new(3);
        let result = session.buy_factory(0);
        assert!(result.outcome.is_none());
        assert_eq!(result.heartbeat, None);
        assert!(!session.scheduler().is_running());
    }

    #[test]
    fn reconcile_catches_external_state_edits() {
        let mut session = FortuneSession::new(3);
        session.with_state_mut(|gs| gs.factory_counts[0] = 1);
        assert_eq!(session.reconcile(), Some(SchedulerCommand::Start));
        assert_eq!(session.reconcile(), None);
    }
}
