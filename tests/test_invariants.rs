//! Whole-session properties over random input sequences.

use proptest::prelude::*;

use slinger::clock::{Clock, ManualClock};
use slinger::config::ArenaConfig;
use slinger::driver::{Flow, Session};
use slinger::entities::GameStatus;
use slinger::input::InputEvent;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug)]
enum Op {
    Step,
    Input(InputEvent),
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Step),
        1 => Just(Op::Input(InputEvent::Fire)),
        1 => Just(Op::Input(InputEvent::LeftPressed)),
        1 => Just(Op::Input(InputEvent::LeftReleased)),
        1 => Just(Op::Input(InputEvent::RightPressed)),
        1 => Just(Op::Input(InputEvent::RightReleased)),
        1 => Just(Op::Input(InputEvent::Restart)),
        1 => (1u64..800).prop_map(Op::Wait),
    ]
}

/// Small, busy arena so hits and deaths actually happen.
fn hostile_config() -> ArenaConfig {
    ArenaConfig {
        enemy_fire_chance: 0.3,
        enemy_rows: 2,
        enemy_cols: 4,
        ..ArenaConfig::for_arena(400, 400)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn session_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..400)) {
        let clock = ManualClock::new(0);
        let mut session = Session::new(hostile_config(), clock.clone(), StdRng::seed_from_u64(seed));

        for op in ops {
            let before = session.state().clone();
            match op {
                Op::Step => {
                    let flow = session.step();
                    let after = session.state();
                    if before.status == GameStatus::Running {
                        prop_assert!(after.player.lives <= before.player.lives);
                        prop_assert!(after.score >= before.score);
                        prop_assert_eq!((after.score - before.score) % 10, 0);
                        prop_assert_eq!(flow == Flow::Stopped, after.status == GameStatus::GameOver);
                        if after.status == GameStatus::Running {
                            prop_assert!(!after.enemies.is_empty());
                        } else {
                            prop_assert_eq!(after.player.lives, 0);
                        }
                    } else {
                        prop_assert_eq!(after.frame, before.frame);
                    }
                }
                Op::Input(event) => {
                    session.handle(event);
                    let after = session.state();
                    if event == InputEvent::Restart && before.status == GameStatus::GameOver {
                        prop_assert_eq!(after.status, GameStatus::Running);
                        prop_assert_eq!(after.score, 0);
                        prop_assert_eq!(after.player.lives, 3);
                        prop_assert!(!after.enemies.is_empty());
                    } else {
                        prop_assert_eq!(after.score, before.score);
                        prop_assert_eq!(after.player.lives, before.player.lives);
                        prop_assert_eq!(after.status, before.status);
                    }
                }
                Op::Wait(ms) => clock.advance(ms),
            }

            let state = session.state();
            prop_assert!(state.player.lives <= 3);
            prop_assert!(state.explosions.iter().all(|e| e.frame < 6));
            let _ = session.take_cues();
        }
    }

    #[test]
    fn cooldown_admits_one_shot_per_window(gaps in prop::collection::vec(0u64..1200, 1..40)) {
        let clock = ManualClock::new(0);
        let mut session = Session::new(
            ArenaConfig { enemy_fire_chance: 0.0, ..ArenaConfig::for_arena(800, 600) },
            clock.clone(),
            StdRng::seed_from_u64(1),
        );

        let mut expected = 0;
        let mut last: Option<u64> = None;
        for gap in gaps {
            clock.advance(gap);
            let now = clock.now_ms();
            if last.map_or(true, |l| now - l >= 500) {
                expected += 1;
                last = Some(now);
            }
            session.handle(InputEvent::Fire);
        }
        prop_assert_eq!(session.state().bullets.len(), expected);
    }
}
