use slinger::clock::ManualClock;
use slinger::compute::init_state;
use slinger::config::ArenaConfig;
use slinger::driver::{Flow, Session};
use slinger::entities::*;
use slinger::input::InputEvent;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> ArenaConfig {
    ArenaConfig {
        enemy_fire_chance: 0.0,
        ..ArenaConfig::for_arena(800, 600)
    }
}

fn new_session() -> (Session<ManualClock, StdRng>, ManualClock) {
    let clock = ManualClock::new(0);
    let session = Session::new(quiet_config(), clock.clone(), StdRng::seed_from_u64(7));
    (session, clock)
}

/// One life left and an enemy bullet about to hit the player.
fn doomed_session() -> Session<ManualClock, StdRng> {
    let mut state = ArenaState {
        status: GameStatus::Running,
        ..init_state(quiet_config())
    };
    state.player.lives = 1;
    state.score = 30;
    state.enemies = vec![Enemy { x: 100, y: 50, width: 40, height: 40 }];
    state.enemy_bullets = vec![EnemyBullet { x: 420, y: 485, width: 5, height: 15 }];
    Session::with_state(state, ManualClock::new(0), StdRng::seed_from_u64(7))
}

#[test]
fn new_session_is_running_with_a_wave() {
    let (session, _) = new_session();
    assert_eq!(session.flow(), Flow::Continue);
    assert_eq!(session.state().status, GameStatus::Running);
    assert_eq!(session.state().enemies.len(), 50);
}

#[test]
fn fire_is_rate_limited_by_clock() {
    let (mut session, clock) = new_session();
    session.handle(InputEvent::Fire);
    clock.advance(499);
    session.handle(InputEvent::Fire);
    assert_eq!(session.state().bullets.len(), 1);

    clock.advance(2); // t = 501
    session.handle(InputEvent::Fire);
    assert_eq!(session.state().bullets.len(), 2);
}

#[test]
fn cues_are_drained_once() {
    let (mut session, _) = new_session();
    session.handle(InputEvent::Fire);
    assert_eq!(session.take_cues(), vec![SoundCue::Shoot]);
    assert!(session.take_cues().is_empty());
}

#[test]
fn held_keys_move_the_player_each_step() {
    let (mut session, _) = new_session();
    let x0 = session.state().player.x;

    session.handle(InputEvent::RightPressed);
    session.step();
    session.step();
    assert_eq!(session.state().player.x, x0 + 16);

    session.handle(InputEvent::RightReleased);
    session.step();
    assert_eq!(session.state().player.x, x0 + 16);

    session.handle(InputEvent::LeftPressed);
    session.step();
    assert_eq!(session.state().player.x, x0 + 8);
}

#[test]
fn game_over_stops_the_loop() {
    let mut session = doomed_session();
    assert_eq!(session.step(), Flow::Stopped);
    assert_eq!(session.state().status, GameStatus::GameOver);
    assert_eq!(session.state().player.lives, 0);

    let frame = session.state().frame;
    assert_eq!(session.step(), Flow::Stopped);
    assert_eq!(session.state().frame, frame);

    // Firing is dead while stopped.
    session.handle(InputEvent::Fire);
    assert!(session.state().bullets.is_empty());
}

#[test]
fn restart_resumes_the_loop() {
    let mut session = doomed_session();
    session.step();
    assert_eq!(session.handle(InputEvent::Restart), Flow::Continue);

    let state = session.state();
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.player.lives, 3);
    assert!(state.enemy_bullets.is_empty());
    assert_eq!(state.enemies.len(), 50);

    let frame = state.frame;
    assert_eq!(session.step(), Flow::Continue);
    assert_eq!(session.state().frame, frame + 1);
}

#[test]
fn restart_ignored_while_running() {
    let mut session = doomed_session();
    session.handle(InputEvent::Restart);
    assert_eq!(session.state().score, 30);
    assert_eq!(session.state().enemies.len(), 1);
}

#[test]
fn run_until_stopped_respects_limit() {
    let (mut session, _) = new_session();
    assert_eq!(session.run_until_stopped(25), 25);
    assert_eq!(session.state().frame, 25);

    let mut doomed = doomed_session();
    assert_eq!(doomed.run_until_stopped(25), 1);
}
