use std::collections::BTreeSet;
use std::time::Duration;

use stardust_core::*;

fn quiet_engine(seed: u64, difficulty: Difficulty) -> RoundEngine<GameStatistics> {
    let config = EngineConfig {
        auto_restart: false,
        ..EngineConfig::default()
    };
    RoundEngine::new(config, GameStatistics::new(), seed, difficulty)
}

fn destroyed_cells(engine: &RoundEngine<GameStatistics>) -> BTreeSet<GridPosition> {
    engine
        .cells()
        .indexed_iter()
        .filter(|(_, cell)| cell.is_destroyed)
        .map(|((row, col), _)| GridPosition::new(row as Coord, col as Coord))
        .collect()
}

#[test]
fn fresh_rounds_respect_placement_rules() {
    for difficulty in Difficulty::ALL {
        let params = difficulty.parameters();
        for seed in 0..16 {
            let engine = quiet_engine(seed, difficulty);
            let rocks = engine.rock_positions();
            let stars = engine.star_positions();

            assert_eq!(rocks.len(), usize::from(params.total_rocks));
            assert_eq!(stars.len(), usize::from(params.total_stars));

            for &a in rocks {
                assert!(rocks.iter().all(|&b| a == b || !a.is_adjacent(b)));
                assert!(!stars.contains(&a));
            }
            for &a in stars {
                assert!(stars.iter().all(|&b| a == b || !a.is_adjacent(b)));

                for neighbor in a.iter_neighbors(params.grid_size) {
                    let cell = engine.cell(neighbor).unwrap();
                    if !cell.has_rock && !cell.has_star {
                        assert!(cell.has_star_dust, "{neighbor} next to star {a} has no dust");
                    }
                }
            }

            for cell in engine.cells() {
                assert!(!(cell.has_rock && (cell.has_star || cell.has_star_dust || cell.is_destroyed)));
            }
        }
    }
}

#[test]
fn easy_bomb_away_from_everything() {
    let mut engine = quiet_engine(5, Difficulty::Easy);
    let size = engine.grid_size();

    // a cell with no star, no rock and no rock in its blast lines
    let target = (0..size)
        .flat_map(|row| (0..size).map(move |col| GridPosition::new(row, col)))
        .find(|&pos| {
            !engine.star_positions().contains(&pos)
                && !engine.rock_positions().contains(&pos)
                && Direction::ALL.iter().all(|dir| {
                    (1..=2)
                        .filter_map(|distance| dir.step(pos, distance, size))
                        .all(|cell| !engine.rock_positions().contains(&cell))
                })
        })
        .expect("some cell is clear of rocks");

    assert_eq!(engine.place_bomb(target), PlaceOutcome::Planted);
    engine.advance(engine.config().bomb_cycle());

    let expected: BTreeSet<_> = std::iter::once(target)
        .chain(
            Direction::ALL
                .iter()
                .flat_map(|dir| (1..=2).filter_map(move |distance| dir.step(target, distance, size))),
        )
        .collect();
    assert!(expected.len() <= 9);
    assert_eq!(destroyed_cells(&engine), expected);
    assert_eq!(engine.state().bombs_placed, 1);
    assert_eq!(engine.state().pending_bombs, 0);
}

#[test]
fn nine_misses_on_easy_lose_once() {
    let mut engine = quiet_engine(0, Difficulty::Easy);
    let layout = Layout::from_positions(9, &[GridPosition::new(4, 4)], &[GridPosition::new(8, 8)]).unwrap();
    engine.start_round_with_layout(Difficulty::Easy, layout);

    let targets = [(0, 0), (0, 3), (0, 6), (3, 0), (3, 3), (3, 6), (6, 0), (6, 3), (6, 6)];
    for (row, col) in targets {
        assert_eq!(engine.place_bomb(GridPosition::new(row, col)), PlaceOutcome::Planted);
        while engine.state().pending_bombs > 0 {
            engine.advance(Duration::from_millis(50));
        }
    }
    engine.run_until_idle();

    assert!(engine.state().is_game_over);
    assert!(!engine.state().is_game_won);
    assert_eq!(engine.statistics().total_games(), 1);
    assert_eq!(engine.statistics().wins_for(Difficulty::Easy), 0);
    assert_eq!(engine.revealed_stars(), [GridPosition::new(8, 8)]);

    engine.check_round();
    assert_eq!(engine.statistics().total_games(), 1);

    // blasts never touch rocks
    let center = engine.cell(GridPosition::new(4, 4)).unwrap();
    assert!(center.has_rock && !center.is_destroyed);
}

#[test]
fn restart_with_same_layout_after_partial_play() {
    let mut engine = quiet_engine(21, Difficulty::Medium);
    let stars = engine.star_positions().clone();
    let rocks = engine.rock_positions().clone();

    let size = engine.grid_size();
    let mut planted = 0;
    'outer: for row in (0..size).step_by(4) {
        for col in (0..size).step_by(4) {
            if engine.place_bomb(GridPosition::new(row, col)).has_update() {
                engine.run_until_idle();
                planted += 1;
                if planted == 3 {
                    break 'outer;
                }
            }
        }
    }
    assert_eq!(engine.state().bombs_placed, 3);
    assert!(engine.cells().iter().any(|cell| cell.is_destroyed));

    engine.restart_with_same_layout();

    assert_eq!(engine.star_positions(), &stars);
    assert_eq!(engine.rock_positions(), &rocks);
    assert_eq!(engine.state(), RoundState::default());
    assert!(engine.cells().iter().all(|cell| !cell.is_destroyed && !cell.has_bomb));
    for star in &stars {
        assert!(engine.cell(*star).unwrap().has_star);
    }
}

#[test]
fn auto_restart_survives_a_long_session() {
    let mut engine = RoundEngine::new(EngineConfig::default(), GameStatistics::new(), 99, Difficulty::Easy);
    let size = engine.grid_size();
    let mut events: Vec<GameEvent> = Vec::new();

    for step in 0..400u32 {
        // stride coprime with the cell count, so every cell comes up once per sweep
        let index = (step * 5) % (u32::from(size) * u32::from(size));
        let row = (index / u32::from(size)) as Coord;
        let col = (index % u32::from(size)) as Coord;
        engine.place_bomb(GridPosition::new(row, col));
        engine.advance(Duration::from_millis(700));
        engine.flush_events(&mut events);
    }

    let finished = events.iter().filter(|event| event.is_terminal()).count();
    let restarts = events
        .iter()
        .filter(|event| matches!(event, GameEvent::RoundRestarting))
        .count();

    assert!(finished > 0);
    assert_eq!(engine.statistics().total_games() as usize, finished);
    assert!(restarts == finished || restarts + 1 == finished);
}
