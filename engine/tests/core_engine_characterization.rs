// engine/tests/core_engine_characterization.rs
#![forbid(unsafe_code)]

/**
 * Core engine characterization tests.
 *
 * Purpose:
 * - Lock in observable kernel behaviour: movement, growth, scoring, terminal conditions,
 *   the lifecycle state machine and its no-op rules.
 *
 * How the tests work:
 * - Sessions start from the default 24x16 grid with a length-3 actor centred at (12, 8)
 *   heading right.
 * - `force_item` parks or positions the item so scenarios do not depend on RNG draws.
 * - Assertions go through the public API only.
 */
use std::cell::RefCell;
use std::rc::Rc;

use snake_engine::{
    AsciiRenderer, Board, Cell, Direction, EndReason, Game, GameConfig, ItemPlacer, NoopRenderer,
    Phase, RewardOutcome, ScoreReporter, ScriptedInput, Session, SessionReport,
};

const PAPER: usize = 1;
const METAL: usize = 2;

fn path(g: &Game) -> Vec<(i32, i32)> {
    g.snake().iter().map(|c| (c.x, c.y)).collect()
}

/// Started default game with the item parked in the top-left corner.
fn started(seed: u64) -> Game {
    let mut g = Game::new(seed);
    assert!(g.start());
    assert!(g.force_item(Cell::new(0, 0), PAPER));
    g
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<SessionReport>>>);

impl ScoreReporter for Recorder {
    fn submit(&mut self, report: &SessionReport) {
        self.0.borrow_mut().push(*report);
    }

    fn outcome(&mut self) -> Option<RewardOutcome> {
        None
    }
}

#[test]
fn start_places_centred_actor_heading_right() {
    let mut g = Game::new(1);
    assert_eq!(g.phase(), Phase::Idle);
    assert!(g.is_empty());

    assert!(g.start());
    assert_eq!(g.phase(), Phase::Running);
    assert_eq!(path(&g), vec![(12, 8), (11, 8), (10, 8)]);
    assert_eq!(g.direction(), Direction::Right);
    assert_eq!(g.score(), 0);
    assert_eq!(g.items_collected(), 0);

    let item = g.item().expect("item placed at start");
    assert!(!g.snake().contains(&item.cell));
    assert!(g.board().in_bounds(item.cell));
    assert_eq!(g.item_kind().map(|k| k.points), Some(item.points));
}

#[test]
fn three_ticks_move_three_cells_right_with_length_unchanged() {
    let mut g = started(2024);

    for _ in 0..3 {
        let r = g.tick();
        assert!(r.advanced);
        assert!(!r.terminated);
        assert!(r.collected.is_none());
    }

    assert_eq!(path(&g), vec![(15, 8), (14, 8), (13, 8)]);
    assert_eq!(g.len(), 3);
    assert_eq!(g.score(), 0);
    assert_eq!(g.ticks(), 3);
}

#[test]
fn collecting_grows_by_one_and_scores_item_points() {
    let mut g = started(7);
    assert!(g.force_item(Cell::new(13, 8), METAL));

    let r = g.tick();
    let collected = r.collected.expect("item on next head");
    assert_eq!(collected.cell, Cell::new(13, 8));
    assert_eq!(collected.points, 15);

    assert_eq!(path(&g), vec![(13, 8), (12, 8), (11, 8), (10, 8)]);
    assert_eq!(g.score(), 15);
    assert_eq!(g.items_collected(), 1);

    let next = g.item().expect("new item placed");
    assert!(!g.snake().contains(&next.cell));
    assert_eq!(g.board().occupied_count(), 4);
}

#[test]
fn moving_into_left_wall_terminates_and_submits_once() {
    let mut g = Game::new(99);
    g.start();
    assert!(g.force_item(Cell::new(13, 8), 0));

    let recorder = Recorder::default();
    let input = ScriptedInput::new()
        .idle(1)
        .steer(Direction::Up)
        .steer(Direction::Left)
        .idle(60);
    let mut s = Session::new(
        g,
        Box::new(input),
        Box::new(NoopRenderer),
        Box::new(recorder.clone()),
    );

    let mut score_before_last = 0;
    let mut terminal_head = None;
    for _ in 0..40 {
        score_before_last = s.game().score();
        terminal_head = s.game().head();
        let out = s.frame();
        if out.step.terminated {
            break;
        }
    }

    let g = s.game();
    assert_eq!(g.phase(), Phase::Terminated);
    assert_eq!(g.end_reason(), Some(EndReason::HitWall));
    assert_eq!(terminal_head.map(|c| c.x), Some(0));
    assert!(g.score() >= 10);

    let reports = recorder.0.borrow().clone();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].score, score_before_last);
    assert_eq!(reports[0].reason, EndReason::HitWall);

    // Further frames and explicit ends never resubmit.
    for _ in 0..5 {
        let out = s.frame();
        assert!(!out.step.advanced);
    }
    assert!(!s.end());
    assert_eq!(recorder.0.borrow().len(), 1);
    assert_eq!(s.reports_sent(), 1);
}

#[test]
fn running_into_own_body_terminates_with_hit_self() {
    let mut g = started(31);

    assert!(g.force_item(Cell::new(13, 8), PAPER));
    assert!(g.tick().collected.is_some());
    assert!(g.force_item(Cell::new(14, 8), PAPER));
    assert!(g.tick().collected.is_some());
    assert_eq!(g.len(), 5);
    assert!(g.force_item(Cell::new(0, 0), PAPER));

    assert!(g.set_direction(Direction::Down));
    assert!(!g.tick().terminated);
    assert!(g.set_direction(Direction::Left));
    assert!(!g.tick().terminated);
    assert_eq!(g.head(), Some(Cell::new(13, 9)));

    assert!(g.set_direction(Direction::Up));
    let r = g.tick();
    assert!(r.terminated);
    assert_eq!(g.end_reason(), Some(EndReason::HitSelf));

    let report = r.report.expect("terminal tick carries the report");
    assert_eq!(report.score, 10);
    assert_eq!(report.items_collected, 2);
    assert_eq!(report.length, 5);
}

#[test]
fn reverse_direction_is_rejected_and_turns_apply_on_next_tick() {
    let mut g = started(5);

    assert!(!g.set_direction(Direction::Left));
    assert_eq!(g.pending_direction(), Direction::Right);

    assert!(g.set_direction(Direction::Up));
    // Still heading right until the tick; left is the reverse of that.
    assert_eq!(g.direction(), Direction::Right);
    assert!(!g.set_direction(Direction::Left));
    assert_eq!(g.pending_direction(), Direction::Up);

    g.tick();
    assert_eq!(g.direction(), Direction::Up);
    assert_eq!(g.head(), Some(Cell::new(12, 7)));

    assert!(!g.set_direction(Direction::Down));
    assert!(g.set_direction(Direction::Left));
}

#[test]
fn pause_freezes_ticks_and_resume_restores_them() {
    let mut g = started(11);
    g.tick();

    assert!(g.pause());
    assert!(!g.pause());
    assert_eq!(g.phase(), Phase::Paused);

    let frozen_path = path(&g);
    let frozen_score = g.score();
    let frozen_ticks = g.ticks();
    for _ in 0..5 {
        let r = g.tick();
        assert!(!r.advanced);
        assert!(!r.terminated);
    }
    assert_eq!(path(&g), frozen_path);
    assert_eq!(g.score(), frozen_score);
    assert_eq!(g.ticks(), frozen_ticks);

    assert!(g.resume());
    assert!(!g.resume());
    assert_eq!(path(&g), frozen_path);

    assert!(g.tick().advanced);
    assert_eq!(g.ticks(), frozen_ticks + 1);
    assert_eq!(g.head(), Some(Cell::new(14, 8)));
}

#[test]
fn toggle_pause_flips_between_running_and_paused() {
    let mut g = started(12);
    assert!(g.toggle_pause());
    assert_eq!(g.phase(), Phase::Paused);
    assert!(g.toggle_pause());
    assert_eq!(g.phase(), Phase::Running);

    g.end();
    assert!(!g.toggle_pause());
}

#[test]
fn lifecycle_no_ops_and_restart() {
    let mut g = Game::new(3);

    // Nothing to end, pause, or steer before start.
    assert!(g.end().is_none());
    assert!(!g.pause());
    assert!(!g.resume());
    assert!(!g.set_direction(Direction::Up));
    assert!(!g.tick().advanced);

    g.start();
    g.force_item(Cell::new(0, 0), PAPER);
    g.tick();
    let ticks = g.ticks();

    // Redundant start leaves the live session alone, also while paused.
    assert!(!g.start());
    assert_eq!(g.ticks(), ticks);
    g.pause();
    assert!(!g.start());
    assert_eq!(g.phase(), Phase::Paused);

    let report = g.end().expect("active session ends");
    assert_eq!(report.reason, EndReason::Stopped);
    assert_eq!(report.ticks, ticks);
    assert_eq!(g.phase(), Phase::Terminated);
    assert!(g.end().is_none());
    assert!(!g.tick().advanced);
    assert_eq!(g.report(), Some(report));

    // Terminated is left only through start.
    assert!(g.start());
    assert_eq!(g.phase(), Phase::Running);
    assert_eq!(g.score(), 0);
    assert_eq!(g.ticks(), 0);
    assert_eq!(g.len(), 3);
    assert!(g.end_reason().is_none());
}

#[test]
fn filling_the_board_ends_the_session_as_board_full() {
    let cfg = GameConfig::default().with_grid(4, 1);
    let mut g = Game::with_config(cfg, 8).expect("4x1 grid with start_len 3 is valid");
    g.start();
    assert_eq!(path(&g), vec![(2, 0), (1, 0), (0, 0)]);

    // Only one free cell exists, so the item must be there.
    let item = g.item().expect("item placed");
    assert_eq!(item.cell, Cell::new(3, 0));

    let r = g.tick();
    assert!(r.terminated);
    assert_eq!(r.collected, Some(item));
    assert_eq!(g.end_reason(), Some(EndReason::BoardFull));
    assert_eq!(g.len(), 4);
    assert!(g.item().is_none());

    let report = r.report.expect("report on board-full");
    assert_eq!(report.score, u64::from(item.points));
    assert_eq!(report.items_collected, 1);
}

#[test]
fn placement_falls_back_to_scanning_free_cells() {
    let kinds = GameConfig::default().items;
    let mut board = Board::new(3, 2);
    for y in 0..2 {
        for x in 0..3 {
            if (x, y) != (2, 1) {
                board.occupy(Cell::new(x, y));
            }
        }
    }

    let mut scan_only = ItemPlacer::with_attempts(17, 0);
    for _ in 0..10 {
        let it = scan_only.place(&board, &kinds).expect("one free cell left");
        assert_eq!(it.cell, Cell::new(2, 1));
        assert!(it.kind < kinds.len());
    }

    let mut sampling = ItemPlacer::new(17);
    assert_eq!(
        sampling.place(&board, &kinds).map(|it| it.cell),
        Some(Cell::new(2, 1))
    );

    board.occupy(Cell::new(2, 1));
    assert!(scan_only.place(&board, &kinds).is_none());
    assert!(sampling.place(&board, &kinds).is_none());
}

#[test]
fn identical_seeds_give_identical_sessions() {
    let mut g1 = Game::new(20260228);
    let mut g2 = Game::new(20260228);
    g1.start();
    g2.start();

    for _ in 0..400 {
        assert_eq!(path(&g1), path(&g2));
        assert_eq!(g1.item(), g2.item());
        assert_eq!(g1.score(), g2.score());

        if let Some(d) = snake_engine::AutopilotInput::choose(&g1) {
            assert_eq!(g1.set_direction(d), g2.set_direction(d));
        }
        let r1 = g1.tick();
        let r2 = g2.tick();
        assert_eq!(r1.terminated, r2.terminated);
        assert_eq!(r1.collected, r2.collected);
        if r1.terminated {
            break;
        }
    }
    assert_eq!(g1.report(), g2.report());
}

#[test]
fn resize_is_refused_mid_session_and_applies_between_sessions() {
    let mut g = Game::new(4);
    g.start();
    assert!(g.resize(30, 20).is_err());
    assert_eq!(g.width(), 24);

    g.end();
    g.resize(30, 20).expect("resize after the session ended");
    assert_eq!(g.phase(), Phase::Idle);
    assert_eq!((g.width(), g.height()), (30, 20));
    assert!(g.report().is_none());

    g.start();
    assert_eq!(g.head(), Some(Cell::new(15, 10)));

    g.end();
    assert!(g.resize(0, 10).is_err());
    assert_eq!(g.width(), 30);
}

#[test]
fn ascii_frame_shows_actor_item_and_status() {
    let mut g = Game::new(6);
    g.start();
    g.force_item(Cell::new(0, 0), METAL);

    let text = g.render_ascii();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 16 + 3);
    assert_eq!(rows[0], format!("+{}+", "-".repeat(24)));
    assert!(rows[1].starts_with("|C"));
    assert_eq!(&rows[9][11..14], "oo@");
    assert!(rows[18].contains("phase=Running"));

    let mut r = AsciiRenderer::new(Vec::new());
    snake_engine::Renderer::render(&mut r, &g, None);
    assert_eq!(r.frames(), 1);
    assert_eq!(String::from_utf8(r.into_inner()).unwrap(), text);
}

#[test]
fn board_ignores_out_of_bounds_cells() {
    let mut b = Board::new(4, 3);
    for c in [
        Cell::new(-1, 0),
        Cell::new(0, -1),
        Cell::new(4, 0),
        Cell::new(0, 3),
    ] {
        b.occupy(c);
        assert!(!b.is_occupied(c));
        b.vacate(c);
    }
    assert_eq!(b.occupied_count(), 0);
    assert_eq!(b.free_count(), 12);

    b.occupy(Cell::new(3, 2));
    b.vacate(Cell::new(-1, 2));
    assert!(b.is_occupied(Cell::new(3, 2)));
    assert_eq!(b.occupied_count(), 1);
}
