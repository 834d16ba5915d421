use alloc::vec::Vec;
use core::time::Duration;
use hashbrown::HashSet;
use ndarray::Array2;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Playing,
    Won,
    Lost,
}

impl RoundStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Round-level counters, only ever mutated by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub bombs_placed: CellCount,
    pub stars_collected: CellCount,
    /// Bombs planted whose blast hasn't finished yet, never more than one.
    pub pending_bombs: u8,
    pub is_game_over: bool,
    pub is_game_won: bool,
    pub statistics_recorded: bool,
}

impl RoundState {
    pub const fn status(&self) -> RoundStatus {
        if self.is_game_won {
            RoundStatus::Won
        } else if self.is_game_over {
            RoundStatus::Lost
        } else {
            RoundStatus::Playing
        }
    }

    pub const fn is_finished(&self) -> bool {
        self.is_game_won || self.is_game_over
    }
}

/// Result of a bomb placement request. Everything but `Planted` leaves the round untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    Planted,
    RoundOver,
    OutOfBombs,
    BombPending,
    OutOfBounds,
    /// Target is a rock, already destroyed or already holds a bomb.
    Blocked,
}

impl PlaceOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Planted)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BombPhase {
    Planted,
    Exploding { arms_left: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LiveBomb {
    pub origin: GridPosition,
    pub phase: BombPhase,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimedAction {
    Detonate {
        origin: GridPosition,
    },
    BlastStep {
        origin: GridPosition,
        direction: Direction,
        distance: u8,
    },
    CheckRound,
    AutoRestart,
}

#[derive(Clone, Debug)]
struct Round {
    id: RoundId,
    difficulty: Difficulty,
    params: DifficultyParams,
    layout: Layout,
    grid: Array2<CellState>,
    state: RoundState,
    bomb: Option<LiveBomb>,
}

impl Round {
    fn new(id: RoundId, difficulty: Difficulty, layout: Layout) -> Self {
        let params = difficulty.parameters();
        let layout = if layout.size() == params.grid_size {
            layout
        } else {
            log::debug!(
                "re-homing layout from {0}x{0} onto {1}x{1}",
                layout.size(),
                params.grid_size
            );
            layout.clamped_to(params.grid_size)
        };

        Self {
            id,
            difficulty,
            params,
            grid: layout.to_grid(),
            layout,
            state: RoundState::default(),
            bomb: None,
        }
    }

    fn cell_mut(&mut self, position: GridPosition) -> &mut CellState {
        &mut self.grid[position.to_nd_index()]
    }
}

/// Plays rounds of the star hunt: owns the grid, the bomb and blast timers and the win/loss bookkeeping.
///
/// Time is virtual. Adapters call [`RoundEngine::advance`] (or [`RoundEngine::advance_to`]) with however much time
/// passed and collect what happened with [`RoundEngine::drain_events`].
#[derive(Debug)]
pub struct RoundEngine<S> {
    config: EngineConfig,
    statistics: S,
    rng: SmallRng,
    selected: Difficulty,
    round: Round,
    timeline: Timeline<TimedAction>,
    events: Vec<GameEvent>,
}

impl<S: StatisticsStore> RoundEngine<S> {
    /// Creates the engine and starts the first round on a random layout.
    pub fn new(config: EngineConfig, statistics: S, seed: u64, difficulty: Difficulty) -> Self {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = random_layout(&mut rng, &config, difficulty);
        let mut engine = Self {
            config,
            statistics,
            rng,
            selected: difficulty,
            round: Round::new(RoundId::default(), difficulty, layout),
            timeline: Timeline::new(),
            events: Vec::new(),
        };
        engine.announce_round();
        engine
    }

    /// Starts a fresh round with a new random layout, discarding the current one and its timers.
    pub fn start_round(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
        let layout = random_layout(&mut self.rng, &self.config, difficulty);
        self.replace_round(difficulty, layout);
    }

    /// Starts a fresh round on a given layout.
    pub fn start_round_with_layout(&mut self, difficulty: Difficulty, layout: Layout) {
        self.selected = difficulty;
        self.replace_round(difficulty, layout);
    }

    /// Replays the current rock and star positions with all play state cleared, on the selected difficulty's grid.
    pub fn restart_with_same_layout(&mut self) {
        let layout = self.round.layout.clone();
        self.replace_round(self.selected, layout);
    }

    /// Difficulty used by the next restart, the live round keeps its own.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
    }

    pub fn place_bomb(&mut self, position: GridPosition) -> PlaceOutcome {
        let outcome = self.try_place_bomb(position);
        if outcome.has_update() {
            log::debug!("bomb planted at {position}");
        } else {
            log::trace!("bomb at {position} ignored: {outcome:?}");
        }
        outcome
    }

    fn try_place_bomb(&mut self, position: GridPosition) -> PlaceOutcome {
        use PlaceOutcome::*;

        let round = &mut self.round;
        if round.state.is_finished() {
            return RoundOver;
        }
        if round.state.bombs_placed >= round.params.max_bombs {
            return OutOfBombs;
        }
        if round.state.pending_bombs > 0 {
            return BombPending;
        }
        if !position.is_within(round.params.grid_size) {
            return OutOfBounds;
        }

        let cell = round.cell_mut(position);
        if !cell.accepts_bomb() {
            return Blocked;
        }
        cell.has_bomb = true;

        round.state.bombs_placed += 1;
        round.state.pending_bombs += 1;
        round.bomb = Some(LiveBomb {
            origin: position,
            phase: BombPhase::Planted,
        });

        self.events.push(GameEvent::BombPlanted(position));
        self.schedule(self.config.fuse, TimedAction::Detonate { origin: position });
        Planted
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.advance_to(self.now().saturating_add(elapsed));
    }

    /// Fires every timer due up to `deadline`, in order.
    pub fn advance_to(&mut self, deadline: Duration) {
        loop {
            let live = self.round.id;
            let Some(action) = self.timeline.pop_due(deadline, live) else {
                break;
            };
            self.fire(action);
        }
        self.timeline.settle_at(deadline);
    }

    /// Runs the clock until no timer is left, auto-restarts included.
    pub fn run_until_idle(&mut self) {
        while let Some(deadline) = self.timeline.next_deadline() {
            self.advance_to(deadline);
        }
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Evaluates win and loss. Win is checked first, so the last star found by the last bomb still wins.
    ///
    /// Safe to call repeatedly: the result is recorded once per round and the auto-restart scheduled once.
    /// While a bomb is still planted or exploding nothing is evaluated.
    pub fn check_round(&mut self) -> RoundStatus {
        let state = self.round.state;
        if state.pending_bombs > 0 || self.round.bomb.is_some() {
            return state.status();
        }
        let total_stars = self.round.layout.star_count();

        if state.stars_collected >= total_stars {
            self.round.state.is_game_won = true;
            self.record_result(true);
            if !state.is_game_won {
                log::debug!("round {} won", self.round.id.0);
                self.events.push(GameEvent::RoundWon);
                self.schedule_restart();
            }
        } else if state.bombs_placed >= self.round.params.max_bombs && state.pending_bombs == 0 {
            self.round.state.is_game_over = true;
            self.record_result(false);
            if !state.is_game_over {
                let stars_remaining = total_stars - state.stars_collected;
                let hidden_stars = self.revealed_stars();
                log::debug!("round {} lost with {} stars left", self.round.id.0, stars_remaining);
                self.events.push(GameEvent::RoundLost {
                    stars_remaining,
                    hidden_stars,
                });
                self.schedule_restart();
            }
        }

        self.round.state.status()
    }

    /// Stars that were never dug up, only available once the round is lost.
    pub fn revealed_stars(&self) -> Vec<GridPosition> {
        if !self.round.state.is_game_over {
            return Vec::new();
        }
        self.round
            .layout
            .sorted_stars()
            .into_iter()
            .filter(|&star| self.round.grid[star.to_nd_index()].is_hidden_star())
            .collect()
    }

    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn flush_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain(..) {
            sink.handle(&event);
        }
    }

    pub fn cell(&self, position: GridPosition) -> Option<CellState> {
        self.round.grid.get(position.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<CellState> {
        &self.round.grid
    }

    pub fn state(&self) -> RoundState {
        self.round.state
    }

    pub fn status(&self) -> RoundStatus {
        self.round.state.status()
    }

    pub fn round_id(&self) -> RoundId {
        self.round.id
    }

    /// Difficulty of the live round.
    pub fn difficulty(&self) -> Difficulty {
        self.round.difficulty
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    pub fn parameters(&self) -> DifficultyParams {
        self.round.params
    }

    pub fn grid_size(&self) -> Coord {
        self.round.params.grid_size
    }

    pub fn layout(&self) -> &Layout {
        &self.round.layout
    }

    pub fn star_positions(&self) -> &HashSet<GridPosition> {
        self.round.layout.stars()
    }

    pub fn rock_positions(&self) -> &HashSet<GridPosition> {
        self.round.layout.rocks()
    }

    pub fn total_stars(&self) -> CellCount {
        self.round.layout.star_count()
    }

    pub fn stars_remaining(&self) -> CellCount {
        self.total_stars()
            .saturating_sub(self.round.state.stars_collected)
    }

    pub fn bombs_left(&self) -> CellCount {
        self.round
            .params
            .max_bombs
            .saturating_sub(self.round.state.bombs_placed)
    }

    pub fn live_bomb(&self) -> Option<LiveBomb> {
        self.round.bomb
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn statistics(&self) -> &S {
        &self.statistics
    }

    fn replace_round(&mut self, difficulty: Difficulty, layout: Layout) {
        self.events.push(GameEvent::RoundRestarting);
        // timers still queued for the old round carry its id and get dropped
        self.round = Round::new(self.round.id.next(), difficulty, layout);
        self.announce_round();
    }

    fn announce_round(&mut self) {
        let round = &self.round;
        log::debug!(
            "round {} started on {} with {} stars and {} rocks",
            round.id.0,
            round.difficulty,
            round.layout.star_count(),
            round.layout.rock_count()
        );
        self.events.push(GameEvent::RoundStarted {
            round: round.id,
            difficulty: round.difficulty,
            stars: round.layout.star_count(),
            rocks: round.layout.rock_count(),
        });
    }

    fn schedule(&mut self, delay: Duration, action: TimedAction) {
        self.timeline.schedule(delay, self.round.id, action);
    }

    fn schedule_restart(&mut self) {
        if self.config.auto_restart {
            self.schedule(self.config.restart_delay, TimedAction::AutoRestart);
        }
    }

    fn fire(&mut self, action: TimedAction) {
        use TimedAction::*;

        log::trace!("t={:?} firing {:?}", self.now(), action);
        match action {
            Detonate { origin } => self.detonate(origin),
            BlastStep {
                origin,
                direction,
                distance,
            } => self.blast_step(origin, direction, distance),
            CheckRound => {
                self.check_round();
            }
            AutoRestart => self.start_round(self.selected),
        }
    }

    fn detonate(&mut self, origin: GridPosition) {
        let bomb = LiveBomb {
            origin,
            phase: BombPhase::Planted,
        };
        if self.round.bomb != Some(bomb) {
            log::trace!("no planted bomb at {origin}, ignoring detonation");
            return;
        }

        let cell = self.round.cell_mut(origin);
        cell.has_bomb = false;
        let is_rock = cell.has_rock;
        self.events.push(GameEvent::BombDetonated(origin));

        if !is_rock {
            self.destroy_cell(origin);
        }

        if self.config.blast_range == 0 {
            self.finish_explosion();
            return;
        }

        let arms_left = Direction::ALL.len() as u8;
        self.round.bomb = Some(LiveBomb {
            origin,
            phase: BombPhase::Exploding { arms_left },
        });
        for direction in Direction::ALL {
            self.schedule(
                self.config.blast_step,
                TimedAction::BlastStep {
                    origin,
                    direction,
                    distance: 1,
                },
            );
        }
    }

    fn blast_step(&mut self, origin: GridPosition, direction: Direction, distance: u8) {
        let target = direction.step(origin, distance, self.round.params.grid_size);

        match target {
            // rocks stop the arm and survive
            Some(position) if !self.round.grid[position.to_nd_index()].has_rock => {
                self.destroy_cell(position);
                if distance < self.config.blast_range {
                    self.schedule(
                        self.config.blast_step,
                        TimedAction::BlastStep {
                            origin,
                            direction,
                            distance: distance + 1,
                        },
                    );
                    return;
                }
            }
            _ => {}
        }

        self.finish_arm();
    }

    fn finish_arm(&mut self) {
        let Some(LiveBomb {
            phase: BombPhase::Exploding { arms_left },
            ..
        }) = &mut self.round.bomb
        else {
            return;
        };

        *arms_left = arms_left.saturating_sub(1);
        if *arms_left == 0 {
            self.finish_explosion();
        }
    }

    fn finish_explosion(&mut self) {
        self.round.bomb = None;
        self.round.state.pending_bombs = self.round.state.pending_bombs.saturating_sub(1);
        self.schedule(self.config.settle, TimedAction::CheckRound);
    }

    fn destroy_cell(&mut self, position: GridPosition) {
        let round = &mut self.round;
        let cell = round.cell_mut(position);
        if cell.is_destroyed || cell.has_rock {
            return;
        }

        cell.is_destroyed = true;
        let (had_star, had_dust) = (cell.has_star, cell.has_star_dust);
        if had_star {
            round.state.stars_collected += 1;
            log::debug!("star collected at {position}");
        }

        self.events.push(GameEvent::CellDestroyed {
            position,
            had_star,
            had_dust,
        });
    }

    fn record_result(&mut self, won: bool) {
        if self.round.state.statistics_recorded {
            return;
        }
        self.statistics.record_result(won, self.round.difficulty);
        self.round.state.statistics_recorded = true;
    }
}

fn random_layout(rng: &mut SmallRng, config: &EngineConfig, difficulty: Difficulty) -> Layout {
    use rand::prelude::*;

    let seed: u64 = rng.random();
    RandomLayoutGenerator::with_attempts(seed, config.placement_attempts).generate(difficulty.parameters())
}
