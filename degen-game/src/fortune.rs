//! Per-click fortune rolls: weighted event identity, chance gate, tip
//! fallback.
use rand::Rng;

use crate::catalog::FortuneCatalog;

/// Outcome of a click's fortune roll, resolved before any state mutation so
/// the click reducer stays RNG-free and tests can force outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneDraw {
    /// The chance gate passed; index into the event table.
    Event(usize),
    /// The gate failed; index into the tip table.
    Tip(usize),
}

/// Roll one click's fortune. The event identity is drawn before the chance
/// gate, so the event stream advances at a fixed rate per click regardless
/// of gate outcomes.
pub fn draw_fortune<R>(catalog: &FortuneCatalog, event_rng: &mut R, tip_rng: &mut R) -> FortuneDraw
where
    R: Rng + ?Sized,
{
    let event_idx = pick_weighted_event(catalog, event_rng);
    let gate = event_rng.r#gen::<f32>();
    if gate < catalog.chance_per_click.clamp(0.0, 1.0) {
        FortuneDraw::Event(event_idx)
    } else {
        FortuneDraw::Tip(tip_rng.gen_range(0..catalog.tips.len()))
    }
}

fn pick_weighted_event<R>(catalog: &FortuneCatalog, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let total: u32 = catalog.events.iter().map(|event| event.weight).sum();
    if total == 0 {
        return rng.gen_range(0..catalog.events.len());
    }
    let roll = rng.gen_range(0..total);
    let mut cursor = 0_u32;
    for (idx, event) in catalog.events.iter().enumerate() {
        cursor = cursor.saturating_add(event.weight);
        if roll < cursor {
            return idx;
        }
    }
    catalog.events.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FortuneEvent;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn catalog_with_chance(chance: f32) -> FortuneCatalog {
        FortuneCatalog {
            chance_per_click: chance,
            events: vec![
                FortuneEvent {
                    text: String::from("pump"),
                    weight: 1,
                    multiplier: Some(2.0),
                    effect: None,
                },
                FortuneEvent {
                    text: String::from("dump"),
                    weight: 1,
                    multiplier: Some(-0.5),
                    effect: None,
                },
            ],
            tips: vec![String::from("hold"), String::from("fold")],
        }
    }

    #[test]
    fn zero_chance_always_draws_tips() {
        let catalog = catalog_with_chance(0.0);
        let mut event_rng = SmallRng::seed_from_u64(1);
        let mut tip_rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            let draw = draw_fortune(&catalog, &mut event_rng, &mut tip_rng);
            assert!(matches!(draw, FortuneDraw::Tip(_)));
        }
    }

    #[test]
    fn certain_chance_always_draws_events() {
        let catalog = catalog_with_chance(1.0);
        let mut event_rng = SmallRng::seed_from_u64(1);
        let mut tip_rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            let draw = draw_fortune(&catalog, &mut event_rng, &mut tip_rng);
            assert!(matches!(draw, FortuneDraw::Event(_)));
        }
    }

    #[test]
    fn gate_rate_tracks_configured_chance() {
        let catalog = catalog_with_chance(0.25);
        let mut event_rng = SmallRng::seed_from_u64(0xACED);
        let mut tip_rng = SmallRng::seed_from_u64(0xF00D);
        let mut fired = 0_u32;
        const SAMPLES: u32 = 5_000;
        for _ in 0..SAMPLES {
            if matches!(
                draw_fortune(&catalog, &mut event_rng, &mut tip_rng),
                FortuneDraw::Event(_)
            ) {
                fired += 1;
            }
        }
        let observed = f64::from(fired) / f64::from(SAMPLES);
        assert!(
            (observed - 0.25).abs() <= 0.025,
            "gate rate drifted: observed {observed:.4}"
        );
    }

    #[test]
    fn weighted_identity_skips_zero_weight_entries() {
        let mut catalog = catalog_with_chance(1.0);
        catalog.events[0].weight = 0;
        let mut event_rng = SmallRng::seed_from_u64(7);
        let mut tip_rng = SmallRng::seed_from_u64(8);
        for _ in 0..50 {
            let draw = draw_fortune(&catalog, &mut event_rng, &mut tip_rng);
            assert_eq!(draw, FortuneDraw::Event(1));
        }
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        let mut catalog = catalog_with_chance(1.0);
        for event in &mut catalog.events {
            event.weight = 0;
        }
        let mut event_rng = SmallRng::seed_from_u64(11);
        let mut tip_rng = SmallRng::seed_from_u64(12);
        let draw = draw_fortune(&catalog, &mut event_rng, &mut tip_rng);
        assert!(matches!(draw, FortuneDraw::Event(_)));
    }
}
