//! The click and tick reducers over `GameState`.
use crate::achievements::{Badge, evaluate_after_click};
use crate::catalog::{FactoryCatalog, FortuneCatalog, SideEffect};
use crate::constants::{PRODUCTION_BOOST_FACTOR, REFUND_RATE, VOLATILITY_SURGE_STEP};
use crate::economy::production_per_tick;
use crate::fortune::FortuneDraw;
use crate::numbers::{floor_f64_to_i64, i64_to_f64};
use crate::state::GameState;

/// Result of resolving a single click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Net balance change from the click yield itself (refund side effects
    /// are credited separately).
    pub delta: i64,
    /// Whether a fortune event fired, as opposed to a flavor tip.
    pub event_fired: bool,
    /// The flavor text chosen for this click.
    pub text: String,
    /// Badges newly earned by this click.
    pub badges: Vec<Badge>,
}

/// Resolve one click against a pre-drawn fortune.
///
/// Order matters and is observable: the event effect lands on this click's
/// base yield, the floored delta is credited with a zero clamp, badges are
/// evaluated against the updated state, and only then is the flavor text
/// appended to the lore window.
pub fn resolve_click(
    gs: &mut GameState,
    catalog: &FortuneCatalog,
    draw: FortuneDraw,
) -> ClickOutcome {
    let mut base_yield = gs.click_yield;
    let event_fired = matches!(draw, FortuneDraw::Event(_));
    let text = match draw {
        FortuneDraw::Event(idx) => {
            let event = &catalog.events[idx];
            if let Some(multiplier) = event.multiplier {
                base_yield *= multiplier;
            }
            match event.effect {
                Some(SideEffect::DoubleProduction) => gs.production_boost = true,
                Some(SideEffect::Refund) => {
                    let refund = floor_f64_to_i64(i64_to_f64(gs.balance) * REFUND_RATE);
                    gs.credit(refund);
                }
                Some(SideEffect::VolatilitySurge) => {
                    gs.volatility += VOLATILITY_SURGE_STEP;
                    gs.clamp_volatility();
                }
                None => {}
            }
            event.text.clone()
        }
        FortuneDraw::Tip(idx) => catalog.tips[idx].clone(),
    };

    let delta = floor_f64_to_i64(base_yield);
    gs.credit(delta);
    let badges = evaluate_after_click(gs, delta);
    gs.push_lore(text.clone());

    ClickOutcome {
        delta,
        event_fired,
        text,
        badges,
    }
}

/// Result of one time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// $DEGEN produced by factories this tick.
    pub produced: i64,
    /// Whether a pending production boost was consumed.
    pub boost_consumed: bool,
    /// Whether the transient system message expired on this tick.
    pub message_cleared: bool,
}

/// Advance the engine one time unit: apply passive production when any
/// factory is owned, and burn one tick off the transient message. A skipped
/// tick is lost production; there is no catch-up.
pub fn apply_tick(gs: &mut GameState, factories: &FactoryCatalog) -> TickOutcome {
    let mut produced = 0;
    let mut boost_consumed = false;
    if gs.any_factory() {
        produced = production_per_tick(gs, factories);
        if gs.production_boost {
            produced = produced.saturating_mul(PRODUCTION_BOOST_FACTOR);
            gs.production_boost = false;
            boost_consumed = true;
        }
        gs.credit(produced);
    }
    let message_cleared = gs.decay_system_message();
    TickOutcome {
        produced,
        boost_consumed,
        message_cleared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FortuneEvent, factory_catalog, fortune_catalog};

    fn forced_catalog(event: FortuneEvent) -> FortuneCatalog {
        FortuneCatalog {
            chance_per_click: 1.0,
            events: vec![event],
            tips: vec![String::from("hold")],
        }
    }

    #[test]
    fn tip_click_credits_floored_yield() {
        let catalog = fortune_catalog();
        let mut state = GameState::new(1);
        let outcome = resolve_click(&mut state, catalog, FortuneDraw::Tip(0));
        assert_eq!(outcome.delta, 1);
        assert!(!outcome.event_fired);
        assert_eq!(state.balance, 1);
        assert_eq!(state.latest_lore(), Some(catalog.tips[0].as_str()));
        assert_eq!(state.lore_total, 1);
    }

    #[test]
    fn negative_multiplier_clamps_and_awards_wizard() {
        let catalog = forced_catalog(FortuneEvent {
            text: String::from("The SEC raids your metamask..."),
            weight: 1,
            multiplier: Some(-0.5),
            effect: None,
        });
        let mut state = GameState::new(1);
        state.click_yield = 100.0;
        state.balance = 30;

        let outcome = resolve_click(&mut state, &catalog, FortuneDraw::Event(0));
        assert_eq!(outcome.delta, -50);
        assert_eq!(state.balance, 0);
        assert_eq!(outcome.badges, vec![Badge::LiquidationWizard]);

        // Repeat: clamped again, badge not re-awarded.
        let repeat = resolve_click(&mut state, &catalog, FortuneDraw::Event(0));
        assert_eq!(repeat.delta, -50);
        assert_eq!(state.balance, 0);
        assert!(repeat.badges.is_empty());
    }

    #[test]
    fn multiplier_applies_to_this_click_only() {
        let catalog = forced_catalog(FortuneEvent {
            text: String::from("Satoshi tweetstorm"),
            weight: 1,
            multiplier: Some(5.0),
            effect: None,
        });
        let mut state = GameState::new(1);
        state.click_yield = 3.0;
        let outcome = resolve_click(&mut state, &catalog, FortuneDraw::Event(0));
        assert_eq!(outcome.delta, 15);
        assert!((state.click_yield - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn refund_credits_a_fifth_of_balance() {
        let catalog = forced_catalog(FortuneEvent {
            text: String::from("Celsius unlocks your assets..."),
            weight: 1,
            multiplier: None,
            effect: Some(SideEffect::Refund),
        });
        let mut state = GameState::new(1);
        state.balance = 1_000;
        let outcome = resolve_click(&mut state, &catalog, FortuneDraw::Event(0));
        // 200 refund plus the floored base yield of 1.
        assert_eq!(state.balance, 1_201);
        assert_eq!(outcome.delta, 1);
    }

    #[test]
    fn volatility_surge_respects_ceiling() {
        let catalog = forced_catalog(FortuneEvent {
            text: String::from("A whale market-buys the top..."),
            weight: 1,
            multiplier: None,
            effect: Some(SideEffect::VolatilitySurge),
        });
        let mut state = GameState::new(1);
        state.volatility = 9.5;
        resolve_click(&mut state, &catalog, FortuneDraw::Event(0));
        assert!((state.volatility - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_ticks_of_one_factory_produce_six() {
        let catalog = factory_catalog();
        let mut state = GameState::new(catalog.len());
        state.factory_counts[0] = 1;
        for _ in 0..3 {
            let outcome = apply_tick(&mut state, catalog);
            assert_eq!(outcome.produced, 2);
        }
        assert_eq!(state.balance, 6);
    }

    #[test]
    fn tick_without_factories_produces_nothing() {
        let catalog = factory_catalog();
        let mut state = GameState::new(catalog.len());
        let outcome = apply_tick(&mut state, catalog);
        assert_eq!(outcome.produced, 0);
        assert_eq!(state.balance, 0);
    }

    #[test]
    fn production_boost_doubles_exactly_one_tick() {
        let catalog = factory_catalog();
        let mut state = GameState::new(catalog.len());
        state.factory_counts[1] = 2; // 2 * 8 = 16 per tick
        state.production_boost = true;

        let boosted = apply_tick(&mut state, catalog);
        assert_eq!(boosted.produced, 32);
        assert!(boosted.boost_consumed);

        let normal = apply_tick(&mut state, catalog);
        assert_eq!(normal.produced, 16);
        assert!(!normal.boost_consumed);
    }

    #[test]
    fn tick_decays_message_even_without_factories() {
        let catalog = factory_catalog();
        let mut state = GameState::new(catalog.len());
        state.award(Badge::WhaleWatching);
        for _ in 0..4 {
            assert!(!apply_tick(&mut state, catalog).message_cleared);
        }
        assert!(apply_tick(&mut state, catalog).message_cleared);
        assert!(state.system_message.is_none());
    }
}
