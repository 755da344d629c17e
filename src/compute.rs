/// Pure arena-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `ArenaState` (plus, where needed, an RNG handle or a timestamp) and
/// returns a brand-new `ArenaState`.  Side effects are limited to the
/// injected RNG; sounds are emitted as `SoundCue`s on the returned state.

use log::{debug, info};
use rand::Rng;

use crate::config::ArenaConfig;
use crate::entities::{
    ArenaState, Bullet, Enemy, EnemyBullet, Explosion, GameStatus, Player, SoundCue,
};
use crate::input::InputState;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an idle arena for the given configuration.  No enemies yet.
pub fn init_state(config: ArenaConfig) -> ArenaState {
    ArenaState {
        player: Player::spawn(&config),
        bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_bullets: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::NotStarted,
        enemy_direction: 1,
        last_shot_ms: None,
        background_y: 0,
        cues: Vec::new(),
        frame: 0,
        config,
    }
}

/// Lay out a full rows × cols wave, replacing whatever enemies remain.
pub fn init_enemies(state: &ArenaState) -> ArenaState {
    let c = &state.config;
    let enemies = (0..c.enemy_rows)
        .flat_map(|row| {
            (0..c.enemy_cols).map(move |col| Enemy {
                x: col as i32 * c.enemy_spacing + c.enemy_margin,
                y: row as i32 * c.enemy_spacing + c.enemy_margin,
                width: c.enemy_width,
                height: c.enemy_height,
            })
        })
        .collect();
    ArenaState {
        enemies,
        ..state.clone()
    }
}

/// `NotStarted → Running`: spawn the first wave.
pub fn start(state: &ArenaState) -> ArenaState {
    if state.status != GameStatus::NotStarted {
        return state.clone();
    }
    info!("arena started ({}x{})", state.config.width, state.config.height);
    ArenaState {
        status: GameStatus::Running,
        ..init_enemies(state)
    }
}

/// `GameOver → Running`: fresh score, lives and wave.  Ignored in any
/// other state.
pub fn restart(state: &ArenaState) -> ArenaState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    info!("restarting after game over (final score {})", state.score);
    let cleared = ArenaState {
        player: Player {
            lives: state.config.starting_lives,
            ..state.player.clone()
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        ..state.clone()
    };
    init_enemies(&cleared)
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire a bullet from the player's top-centre, rate-limited by the
/// cooldown.  Shots inside the window are dropped, not queued.
pub fn shoot_bullet(state: &ArenaState, now_ms: u64) -> ArenaState {
    if !state.is_running() {
        return state.clone();
    }
    if let Some(last) = state.last_shot_ms {
        if now_ms.saturating_sub(last) < state.config.shoot_cooldown_ms {
            return state.clone();
        }
    }

    let c = &state.config;
    let p = &state.player;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.width / 2 - c.bullet_width / 2,
        y: p.y,
        width: c.bullet_width,
        height: c.bullet_height,
    });
    let mut cues = state.cues.clone();
    cues.push(SoundCue::Shoot);

    ArenaState {
        bullets,
        cues,
        last_shot_ms: Some(now_ms),
        ..state.clone()
    }
}

/// Right wins when both keys are held; a move that would leave the arena
/// is skipped rather than clamped.
pub fn move_player(state: &ArenaState, input: &InputState) -> ArenaState {
    let p = &state.player;
    let x = if input.right && p.x + p.width + p.speed <= state.config.width {
        p.x + p.speed
    } else if input.left && p.x - p.speed >= 0 {
        p.x - p.speed
    } else {
        p.x
    };
    ArenaState {
        player: Player { x, ..p.clone() },
        ..state.clone()
    }
}

// ── Per-tick advancement ─────────────────────────────────────────────────────

pub fn scroll_background(state: &ArenaState) -> ArenaState {
    let next = state.background_y + 1;
    ArenaState {
        background_y: if next >= state.config.height { 0 } else { next },
        ..state.clone()
    }
}

/// Move player bullets up; drop those that cross the top edge.
pub fn advance_bullets(state: &ArenaState) -> ArenaState {
    let speed = state.config.bullet_speed;
    let bullets = state
        .bullets
        .iter()
        .map(|b| Bullet { y: b.y - speed, ..b.clone() })
        .filter(|b| b.y >= 0)
        .collect();
    ArenaState {
        bullets,
        ..state.clone()
    }
}

/// Move enemy bullets down; drop those below the bottom edge.
pub fn advance_enemy_bullets(state: &ArenaState) -> ArenaState {
    let speed = state.config.enemy_bullet_speed;
    let height = state.config.height;
    let enemy_bullets = state
        .enemy_bullets
        .iter()
        .map(|b| EnemyBullet { y: b.y + speed, ..b.clone() })
        .filter(|b| b.y <= height)
        .collect();
    ArenaState {
        enemy_bullets,
        ..state.clone()
    }
}

/// Slide the swarm sideways.  If any enemy ends up past a side wall, the
/// whole swarm drops and reverses; the sideways step is kept, so the
/// swarm may overshoot the wall for one tick.
pub fn move_enemies(state: &ArenaState) -> ArenaState {
    let c = &state.config;
    let dx = c.enemy_speed_x * state.enemy_direction;
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| Enemy { x: e.x + dx, ..e.clone() })
        .collect();

    let hit_edge = enemies
        .iter()
        .any(|e| e.bounds().right() > c.width || e.x < 0);

    let mut enemy_direction = state.enemy_direction;
    if hit_edge {
        for e in &mut enemies {
            e.y += c.enemy_speed_y;
        }
        enemy_direction = -enemy_direction;
    }

    ArenaState {
        enemies,
        enemy_direction,
        ..state.clone()
    }
}

/// With a small fixed chance, one random enemy fires from its
/// bottom-centre.  An empty wave never fires.
pub fn enemy_shoot(state: &ArenaState, rng: &mut impl Rng) -> ArenaState {
    let chance = state.config.enemy_fire_chance.clamp(0.0, 1.0);
    if !rng.gen_bool(chance) || state.enemies.is_empty() {
        return state.clone();
    }
    let c = &state.config;
    let shooter = &state.enemies[rng.gen_range(0..state.enemies.len())];
    let mut enemy_bullets = state.enemy_bullets.clone();
    enemy_bullets.push(EnemyBullet {
        x: shooter.x + shooter.width / 2 - c.enemy_bullet_width / 2,
        y: shooter.bounds().bottom(),
        width: c.enemy_bullet_width,
        height: c.enemy_bullet_height,
    });
    ArenaState {
        enemy_bullets,
        ..state.clone()
    }
}

/// Step every explosion's frame cadence; drop finished ones.
pub fn advance_explosions(state: &ArenaState) -> ArenaState {
    let frames = state.config.explosion_frames;
    let cadence = state.config.explosion_frame_delay.max(1);
    let explosions = state
        .explosions
        .iter()
        .map(|ex| {
            let delay = ex.delay.saturating_sub(1);
            if delay == 0 {
                Explosion { frame: ex.frame + 1, delay: cadence, ..ex.clone() }
            } else {
                Explosion { delay, ..ex.clone() }
            }
        })
        .filter(|ex| ex.frame < frames)
        .collect();
    ArenaState {
        explosions,
        ..state.clone()
    }
}

fn spawn_explosion(
    explosions: &mut Vec<Explosion>,
    cues: &mut Vec<SoundCue>,
    config: &ArenaConfig,
    x: i32,
    y: i32,
) {
    explosions.push(Explosion {
        x,
        y,
        frame: 0,
        delay: config.explosion_frame_delay.max(1),
    });
    cues.push(SoundCue::Explosion);
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Resolve player bullets against enemies, then enemy bullets against the
/// player.  Survivors are compacted into fresh vectors, so every entity is
/// consumed at most once per pass.
///
/// A bullet overlapping several enemies destroys all of them and is spent
/// once.  The player loses one life per overlapping enemy bullet until the
/// lives run out, at which point the arena switches to `GameOver`.
pub fn check_collisions(state: &ArenaState) -> ArenaState {
    let c = &state.config;
    let mut explosions = state.explosions.clone();
    let mut cues = state.cues.clone();
    let mut score = state.score;

    // ── Player bullets ↔ enemies ─────────────────────────────────────────────
    let mut killed = vec![false; state.enemies.len()];
    let mut bullets = Vec::with_capacity(state.bullets.len());

    for bullet in &state.bullets {
        let b = bullet.bounds();
        let mut spent = false;
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if killed[ei] || !b.intersects(&enemy.bounds()) {
                continue;
            }
            killed[ei] = true;
            spent = true;
            score += c.score_per_enemy;
            spawn_explosion(&mut explosions, &mut cues, c, enemy.x, enemy.y);
            cues.push(SoundCue::EnemyHit);
            debug!("enemy destroyed at ({}, {}), score {}", enemy.x, enemy.y, score);
        }
        if !spent {
            bullets.push(bullet.clone());
        }
    }

    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .zip(&killed)
        .filter(|(_, dead)| !**dead)
        .map(|(e, _)| e.clone())
        .collect();

    // ── Enemy bullets ↔ player ───────────────────────────────────────────────
    let mut player = state.player.clone();
    let mut status = state.status;
    let mut enemy_bullets = Vec::with_capacity(state.enemy_bullets.len());

    for bullet in &state.enemy_bullets {
        if status == GameStatus::Running && bullet.bounds().intersects(&player.bounds()) {
            player.lives = player.lives.saturating_sub(1);
            spawn_explosion(&mut explosions, &mut cues, c, player.x, player.y);
            cues.push(SoundCue::PlayerHit);
            debug!("player hit, {} lives left", player.lives);
            if player.lives == 0 {
                status = GameStatus::GameOver;
                info!("game over with score {}", score);
            }
        } else {
            enemy_bullets.push(bullet.clone());
        }
    }

    ArenaState {
        player,
        bullets,
        enemies,
        enemy_bullets,
        explosions,
        cues,
        score,
        status,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

fn repopulate_if_cleared(state: &ArenaState) -> ArenaState {
    if state.is_running() && state.enemies.is_empty() {
        info!("wave cleared at score {}, spawning a new one", state.score);
        init_enemies(state)
    } else {
        state.clone()
    }
}

/// Advance a running arena by one frame.  Any other status is returned
/// unchanged: a stopped arena does not tick.
///
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(state: &ArenaState, input: &InputState, rng: &mut impl Rng) -> ArenaState {
    if !state.is_running() {
        return state.clone();
    }

    let mut next = ArenaState {
        frame: state.frame + 1,
        ..repopulate_if_cleared(state)
    };

    next = scroll_background(&next);
    next = move_player(&next, input);
    next = advance_bullets(&next);
    next = move_enemies(&next);
    next = advance_enemy_bullets(&next);
    next = advance_explosions(&next);
    next = check_collisions(&next);

    if next.is_running() {
        next = enemy_shoot(&next, rng);
    }

    repopulate_if_cleared(&next)
}
