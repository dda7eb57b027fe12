// Integration tests for the grid interpreter

use gridlab::grid::maze::{Heading, Item, ItemKind, MazeState};
use gridlab::grid::{Color, Position};
use gridlab::interpreter::engine::{Completion, Engine, Event, Phase};
use gridlab::interpreter::loader::derive_grid;
use gridlab::parser::command::Mode;
use gridlab::snapshot::MazeSave;

/// Step until the engine stops making progress.
fn run_to_end(engine: &mut Engine) -> usize {
    let mut steps = 0;
    while engine.step() {
        steps += 1;
    }
    steps
}

/// 1×3 corridor: start (0, 1) facing East, exit through the east wall of
/// (0, 2), a carrot on the exit cell.
fn corridor() -> MazeState {
    let mut maze = MazeState::closed(1, 3);
    maze.open_between(Position::new(0, 0), Heading::East);
    maze.open_between(Position::new(0, 1), Heading::East);
    maze.open_between(Position::new(0, 2), Heading::East);
    maze.exit = Some(Position::new(0, 2));
    maze.items.push(Item {
        position: Position::new(0, 2),
        kind: ItemKind::Carrot,
        collected: false,
    });
    maze
}

fn corridor_engine(code: &str) -> Engine {
    let mut engine = Engine::new(Mode::Maze, 0);
    let restored = engine.restore_maze(MazeSave {
        code: code.to_string(),
        maze: corridor(),
    });
    assert!(restored, "restore failed: {:?}", engine.state().error);
    engine.reset(false);
    engine
}

#[test]
fn test_table_scenario_two_steps() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("5#5\n3 R 0 0\n2 G 3 3"));
    assert_eq!(engine.state().phase(), Phase::Loaded);

    assert!(engine.step());
    assert!(engine.step());

    let grid = &engine.state().grid;
    for col in 0..3 {
        assert_eq!(grid.get(0, col), Some(Color::Red));
    }
    assert_eq!(grid.get(0, 3), None);
    assert_eq!(grid.get(3, 3), Some(Color::Green));
    assert_eq!(grid.get(3, 4), Some(Color::Green));
    assert_eq!(grid.lit_count(), 5);
    assert_eq!(engine.state().error, None);
    assert_eq!(engine.state().completion, Completion::Idle);

    // exhausted: nothing left, status unchanged
    assert!(!engine.step());
    assert_eq!(engine.state().completion, Completion::Idle);
}

#[test]
fn test_table_single_strip() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("5#5\n3 R 0 0"));
    run_to_end(&mut engine);
    let grid = &engine.state().grid;
    assert_eq!(grid.lit_count(), 3);
    assert_eq!(engine.state().last_position, Position::new(0, 2));
}

#[test]
fn test_table_overflow_halts_and_keeps_grid() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("3#3\n1 B 1 1\n2 R 0 2\n1 G 2 2"));
    assert!(engine.step());
    assert!(engine.step());

    let state = engine.state();
    assert_eq!(state.completion, Completion::Failure);
    assert!(!state.running);
    assert_eq!(state.grid.lit_count(), 1);
    assert_eq!(state.grid.get(1, 1), Some(Color::Blue));
    let error = state.error.as_deref().unwrap();
    assert!(error.starts_with("Line 3:"), "{}", error);

    // halted programs do not advance
    assert!(!engine.step());
    assert_eq!(engine.state().grid.lit_count(), 1);
}

#[test]
fn test_grid_movements() {
    let mut engine = Engine::new(Mode::Grid, 1);
    assert!(engine.load("3#4\n2 G 1 0"));
    run_to_end(&mut engine);

    let state = engine.state();
    assert_eq!(state.total_movements, 2);
    assert_eq!(state.grid.get(0, 1), Some(Color::Green));
    assert_eq!(state.grid.get(0, 2), Some(Color::Green));
    assert_eq!(state.last_position, Position::new(0, 2));
}

#[test]
fn test_grid_relative_to_last_cell() {
    let mut engine = Engine::new(Mode::Grid, 1);
    assert!(engine.load("4#4\n1 R 0 0\n1 B 1 1\n1 G -1 2"));
    run_to_end(&mut engine);

    let grid = &engine.state().grid;
    assert_eq!(grid.get(0, 0), Some(Color::Red));
    assert_eq!(grid.get(1, 1), Some(Color::Blue));
    assert_eq!(grid.get(3, 0), Some(Color::Green));
    assert_eq!(engine.state().total_movements, 2 + 3);
}

#[test]
fn test_load_error_keeps_previous_program() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("5#5\n3 R 0 0"));
    assert!(!engine.load("5#5\n6#6"));

    let state = engine.state();
    assert_eq!(state.commands.len(), 1);
    assert!(state.error.as_deref().unwrap().starts_with("Line 2:"));
    assert_eq!(state.source, "5#5\n3 R 0 0");
}

#[test]
fn test_failed_reload_halts_previous_program() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("5#5\n3 R 0 0"));
    assert!(!engine.load("5#5\n3 X 0 0"));

    assert!(!engine.step());
    assert_eq!(engine.state().phase(), Phase::Halted(Completion::Failure));
    assert_eq!(engine.state().grid.lit_count(), 0);

    engine.reset(false);
    assert_eq!(engine.state().error, None);
    assert!(engine.step());
    assert_eq!(engine.state().grid.lit_count(), 3);
}

#[test]
fn test_huge_table_count_halts() {
    let code = "3#3\n18446744073709551615 R 0 1";
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load(code));
    assert!(engine.step());

    let state = engine.state();
    assert_eq!(state.completion, Completion::Failure);
    assert_eq!(state.grid.lit_count(), 0);
    assert!(state.error.as_deref().unwrap().starts_with("Line 2:"));

    assert_eq!(derive_grid(code, Mode::Table).unwrap().lit_count(), 0);
}

#[test]
fn test_grid_huge_offsets_halt() {
    for code in [
        "3#3\n1 R 1 1\n1 R 9223372036854775807 0",
        "3#3\n1 R 1 1\n1 R 0 -9223372036854775808",
    ] {
        let mut engine = Engine::new(Mode::Grid, 1);
        assert!(engine.load(code));
        run_to_end(&mut engine);

        let state = engine.state();
        assert_eq!(state.completion, Completion::Failure, "{}", code);
        assert_eq!(state.grid.lit_count(), 1);
        assert_eq!(state.last_position, Position::new(1, 1));
        assert_eq!(state.total_movements, 2);
        assert!(state.error.as_deref().unwrap().starts_with("Line 3:"));
    }
}

#[test]
fn test_maze_huge_move_stops() {
    for seed in 0..10 {
        let mut engine = Engine::new(Mode::Maze, seed);
        assert!(engine.load("muovi 4294967295"));
        assert!(engine.step());
        assert_ne!(engine.state().completion, Completion::Idle);
    }
}

#[test]
fn test_syntax_error_names_line() {
    let mut engine = Engine::new(Mode::Matrix, 1);
    assert!(!engine.load("+ 1\n+ 9"));
    let error = engine.state().error.as_deref().unwrap();
    assert!(error.starts_with("Syntax error on line 2"), "{}", error);
}

#[test]
fn test_run_flag_and_reset() {
    let mut engine = Engine::new(Mode::Matrix, 1);
    assert!(engine.load("+ 1\n+ A"));
    engine.run();
    assert_eq!(engine.state().phase(), Phase::Running);

    run_to_end(&mut engine);
    assert!(!engine.state().running);
    assert_eq!(engine.state().grid.lit_count(), 15);

    engine.reset(false);
    assert_eq!(engine.state().pc, 0);
    assert_eq!(engine.state().grid.lit_count(), 0);
    assert_eq!(engine.state().phase(), Phase::Loaded);
}

#[test]
fn test_dispatch_events() {
    let mut engine = Engine::new(Mode::Table, 1);
    engine.dispatch(Event::Load {
        code: "2#2\n2 R 1 0".to_string(),
        update_target: true,
    });
    assert_eq!(engine.state().target.as_ref().unwrap().lit_count(), 2);
    assert_eq!(engine.score(), 0.0);

    let state = engine.dispatch(Event::Step);
    assert_eq!(state.grid.lit_count(), 2);
    assert_eq!(engine.score(), 1.0);

    engine.dispatch(Event::Reset {
        force_regenerate: false,
    });
    assert_eq!(engine.state().grid.lit_count(), 0);
    assert!(engine.state().target.is_some());
}

#[test]
fn test_maze_exit_collects_and_succeeds() {
    let mut engine = corridor_engine("muovi 3");
    assert!(engine.step());

    let state = engine.state();
    assert_eq!(state.completion, Completion::Success);
    assert_eq!(state.maze_score, 2);
    assert_eq!(engine.score(), 2.0);
    assert_eq!(state.error, None);
    assert!(!engine.step());
}

#[test]
fn test_maze_wall_collision_keeps_walked_cells() {
    let mut engine = corridor_engine("ruota 2\nmuovi 3");
    assert!(engine.step());
    assert!(engine.step());

    let state = engine.state();
    assert_eq!(state.completion, Completion::Failure);
    let maze = state.maze.as_ref().unwrap();
    assert_eq!(maze.turtle.position, Position::new(0, 0));
    assert_eq!(maze.turtle.heading, Heading::West);
    assert!(maze.visited.contains(&Position::new(0, 0)));
    assert!(state.error.as_deref().unwrap().starts_with("Line 2:"));
}

#[test]
fn test_maze_collision_from_generated_start() {
    for seed in 0..20 {
        let mut engine = Engine::new(Mode::Maze, seed);
        let maze = engine.state().maze.clone().unwrap();
        let Some(blocked) = [Heading::East, Heading::North, Heading::West, Heading::South]
            .into_iter()
            .find(|&heading| maze.has_wall(maze.start, heading))
        else {
            continue;
        };

        let turns = blocked.degrees() / 90;
        let code = if turns == 0 {
            "muovi 1".to_string()
        } else {
            format!("ruota {}\nmuovi 1", turns)
        };
        assert!(engine.load(&code));
        run_to_end(&mut engine);

        let state = engine.state();
        assert_eq!(state.completion, Completion::Failure);
        let turtle = state.maze.as_ref().unwrap().turtle;
        assert_eq!(turtle.position, maze.start);
        assert_eq!(turtle.heading, blocked);
        return;
    }
    panic!("no seed produced a walled start");
}

#[test]
fn test_maze_reset_rewinds_items() {
    let mut engine = corridor_engine("muovi 3");
    run_to_end(&mut engine);
    engine.reset(false);

    let state = engine.state();
    assert_eq!(state.maze_score, 0);
    let maze = state.maze.as_ref().unwrap();
    assert!(maze.items.iter().all(|item| !item.collected));
    assert_eq!(maze.turtle.position, maze.start);
    assert_eq!(state.completion, Completion::Idle);
}

#[test]
fn test_maze_save_round_trip() {
    let mut engine = corridor_engine("muovi 1\nmuovi 5");
    assert!(engine.step());
    let save = engine.save_maze().unwrap();
    let json = save.to_json().unwrap();

    let mut restored = Engine::new(Mode::Maze, 99);
    assert!(restored.restore_maze(MazeSave::from_json(&json).unwrap()));
    assert_eq!(restored.state().maze, engine.state().maze);
    assert_eq!(restored.state().maze_score, 2);
    assert_eq!(restored.state().source, "muovi 1\nmuovi 5");
}

#[test]
fn test_restored_session_waits_for_reset() {
    let mut engine = corridor_engine("muovi 1");
    assert!(engine.step());
    let save = engine.save_maze().unwrap();

    let mut restored = Engine::new(Mode::Maze, 5);
    assert!(restored.restore_maze(save));
    assert!(!restored.step());
    let turtle = restored.state().maze.as_ref().unwrap().turtle;
    assert_eq!(turtle.position, Position::new(0, 2));

    restored.reset(false);
    assert!(restored.step());
    let state = restored.state();
    assert_eq!(state.maze.as_ref().unwrap().turtle.position, Position::new(0, 2));
    assert_eq!(state.maze_score, 2);
}

#[test]
fn test_restore_rejects_corrupted_maze() {
    let save = MazeSave {
        code: "muovi 1".to_string(),
        maze: corridor(),
    };
    let mut doc = serde_json::to_value(&save).unwrap();
    doc["maze"]["walls"] = serde_json::json!([]);
    let corrupted: MazeSave = serde_json::from_value(doc).unwrap();

    let mut engine = Engine::new(Mode::Maze, 0);
    assert!(!engine.restore_maze(corrupted));
    let error = engine.state().error.as_deref().unwrap();
    assert!(error.starts_with("Maze save is inconsistent"), "{}", error);
    assert!(!engine.step());

    let mut stray = corridor();
    stray.turtle.position = Position::new(4, 0);
    assert!(!engine.restore_maze(MazeSave {
        code: "muovi 1".to_string(),
        maze: stray,
    }));
}

#[test]
fn test_restore_outside_maze_mode() {
    let mut engine = Engine::new(Mode::Pixel, 0);
    let restored = engine.restore_maze(MazeSave {
        code: String::new(),
        maze: corridor(),
    });
    assert!(!restored);
    assert!(engine.state().error.is_some());
}

#[test]
fn test_matrix_goal_replays_to_full_score() {
    let mut engine = Engine::new(Mode::Matrix, 17);
    let goal = engine.new_goal().unwrap();
    assert_eq!(goal.grid.lit_count(), 40);

    let solution = engine.solution().unwrap().to_string();
    assert!(engine.load(&solution));
    run_to_end(&mut engine);

    assert_eq!(engine.state().grid, goal.grid);
    assert_eq!(engine.score(), 10.0);
}

#[test]
fn test_pixel_lines_batch_per_row() {
    let mut engine = Engine::new(Mode::Pixel, 3);
    assert!(engine.load("2 * ( R + G )\n\nB + OFF + W"));
    assert!(engine.step());
    assert_eq!(engine.state().pc, 4);
    assert!(engine.step());

    let grid = &engine.state().grid;
    assert_eq!(grid.get(0, 0), Some(Color::Red));
    assert_eq!(grid.get(0, 3), Some(Color::Green));
    assert_eq!(grid.get(1, 0), None);
    assert_eq!(grid.get(2, 0), Some(Color::Blue));
    assert_eq!(grid.get(2, 1), None);
    assert_eq!(grid.get(2, 2), Some(Color::White));
}

#[test]
fn test_pixel_loop_equals_literal_ops() {
    let looped = derive_grid("16 * ( R )", Mode::Pixel).unwrap();
    let literal = derive_grid(&vec!["R"; 16].join(" + "), Mode::Pixel).unwrap();
    assert_eq!(looped, literal);
    assert_eq!(looped.lit_count(), 16);
}

#[test]
fn test_pixel_goal_replays_to_full_score() {
    let mut engine = Engine::new(Mode::Pixel, 8);
    let goal = engine.new_goal().unwrap();
    let solution = engine.solution().unwrap().to_string();
    assert!(engine.load(&solution));
    run_to_end(&mut engine);
    assert_eq!(engine.state().grid, goal.grid);
    assert_eq!(engine.score(), 10.0);
}

#[test]
fn test_challenge_budget_for_table() {
    let mut engine = Engine::new(Mode::Table, 4);
    let challenge = engine.start_challenge();
    let goal = challenge.goal.as_ref().unwrap();
    assert!(goal.non_empty_rows() >= 10);
    assert_eq!(challenge.time_budget, 60 * goal.non_empty_rows() as u32);
    assert_eq!(engine.state().target.as_ref(), Some(goal));
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut engine = Engine::new(Mode::Table, 1);
    assert!(engine.load("2#2\n1 R 0 0"));
    let before = engine.snapshot();
    engine.step();
    assert_eq!(before.grid.lit_count(), 0);
    assert_eq!(engine.snapshot().grid.lit_count(), 1);
    assert_eq!(engine.snapshot().current_line, None);
    assert_eq!(before.current_line, Some(1));
}
