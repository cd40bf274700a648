use degen_game::{Badge, FortuneSession, GameState, SchedulerCommand, TerminalView};

use crate::policy::{BotAction, GameplayStrategy, PlayerPolicy, PolicyDecision};

/// Configuration for a simulation session.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub max_turns: u32,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            max_turns: 500,
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Snapshot of a resolved bot decision.
#[derive(Debug, Clone)]
pub struct DecisionRecord {
    pub turn: u32,
    pub action: BotAction,
    pub policy_name: String,
    pub rationale: Option<String>,
}

/// Result of advancing the simulation by one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub turn: u32,
    pub decision: DecisionRecord,
    /// Balance delta from the action itself (click yield or purchase cost).
    pub action_delta: i64,
    pub event_fired: bool,
    pub badges_earned: Vec<Badge>,
    /// Passive production credited by the heartbeat this turn.
    pub produced: i64,
    pub heartbeat: Option<SchedulerCommand>,
    pub run_ended: bool,
}

/// Core deterministic simulation harness used by the tester. One turn is
/// one policy action followed by one heartbeat tick when the scheduler is
/// running, matching the embedding's click-then-interval cadence.
pub struct SimulationSession {
    session: FortuneSession,
    max_turns: u32,
    turn: u32,
}

impl SimulationSession {
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            session: FortuneSession::new(config.seed),
            max_turns: config.max_turns,
            turn: 0,
        }
    }

    #[must_use]
    pub fn session(&self) -> &FortuneSession {
        &self.session
    }

    #[must_use]
    pub fn into_session(self) -> FortuneSession {
        self.session
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn advance(&mut self, policy: &mut dyn PlayerPolicy) -> TurnOutcome {
        self.turn += 1;
        let view = self.session.view();
        let PolicyDecision { action, rationale } = policy.next_action(&view);

        let decision = DecisionRecord {
            turn: self.turn,
            action,
            policy_name: policy.name().to_string(),
            rationale,
        };

        let mut action_delta = 0;
        let mut event_fired = false;
        let mut badges_earned = Vec::new();
        let mut heartbeat = None;

        match action {
            BotAction::Click => {
                let result = self.session.click();
                action_delta = result.outcome.delta;
                event_fired = result.outcome.event_fired;
                badges_earned = result.outcome.badges;
                heartbeat = result.heartbeat;
            }
            BotAction::BuyUpgrade => {
                let result = self.session.buy_upgrade();
                if let Some(receipt) = result.outcome {
                    action_delta = -receipt.cost;
                    badges_earned.extend(receipt.badge);
                }
                heartbeat = result.heartbeat;
            }
            BotAction::BuyFactory(idx) => {
                let result = self.session.buy_factory(idx);
                if let Some(receipt) = result.outcome {
                    action_delta = -receipt.cost;
                }
                heartbeat = result.heartbeat;
            }
            BotAction::Idle => {}
        }

        let mut produced = 0;
        if self.session.scheduler().is_running() {
            let tick = self.session.tick();
            produced = tick.outcome.produced;
            heartbeat = heartbeat.or(tick.heartbeat);
        }

        TurnOutcome {
            turn: self.turn,
            decision,
            action_delta,
            event_fired,
            badges_earned,
            produced,
            heartbeat,
            run_ended: self.turn >= self.max_turns,
        }
    }
}

/// Everything a scenario expectation can assert on after a full run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub turns_run: u32,
    pub clicks: u32,
    pub events_fired: u32,
    pub purchases: u32,
    pub total_produced: i64,
    pub heartbeat_starts: u32,
    pub heartbeat_stops: u32,
    pub decision_log: Vec<DecisionRecord>,
    pub final_state: GameState,
    pub final_view: TerminalView,
}

/// Drive one full bot run to the turn cap and summarize it.
#[must_use]
pub fn run_simulation(config: SimulationConfig) -> SimulationSummary {
    let mut policy = config.strategy.create_policy(config.seed);
    let mut sim = SimulationSession::new(config);

    let mut clicks = 0;
    let mut events_fired = 0;
    let mut purchases = 0;
    let mut total_produced = 0_i64;
    let mut heartbeat_starts = 0;
    let mut heartbeat_stops = 0;
    let mut decision_log = Vec::new();

    loop {
        let outcome = sim.advance(policy.as_mut());
        match outcome.decision.action {
            BotAction::Click => clicks += 1,
            BotAction::BuyUpgrade | BotAction::BuyFactory(_) => {
                if outcome.action_delta != 0 {
                    purchases += 1;
                }
            }
            BotAction::Idle => {}
        }
        if outcome.event_fired {
            events_fired += 1;
        }
        total_produced = total_produced.saturating_add(outcome.produced);
        match outcome.heartbeat {
            Some(SchedulerCommand::Start) => heartbeat_starts += 1,
            Some(SchedulerCommand::Stop) => heartbeat_stops += 1,
            None => {}
        }
        decision_log.push(outcome.decision);
        if outcome.run_ended {
            break;
        }
    }

    let turns_run = sim.turn();
    let final_view = sim.session().view();
    let final_state = sim.into_session().into_state();

    SimulationSummary {
        seed: config.seed,
        strategy: config.strategy,
        turns_run,
        clicks,
        events_fired,
        purchases,
        total_produced,
        heartbeat_starts,
        heartbeat_stops,
        decision_log,
        final_state,
        final_view,
    }
}
