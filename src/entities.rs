/// All arena entity types — pure data plus bounding boxes.

use crate::config::ArenaConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    GameOver,
}

/// Fire-and-forget sound triggers emitted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// Player fired.
    Shoot,
    /// Any explosion spawned.
    Explosion,
    /// Player bullet destroyed an enemy.
    EnemyHit,
    /// Enemy bullet struck the player.
    PlayerHit,
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub lives: u32,
}

impl Player {
    pub fn spawn(config: &ArenaConfig) -> Self {
        Player {
            x: config.width / 2,
            y: config.height - config.player_spawn_offset,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
            lives: config.starting_lives,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Player bullet, travels upward.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Enemy bullet, travels downward.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBullet {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl EnemyBullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Anchor point; the frame is drawn centred on it.
    pub x: i32,
    pub y: i32,
    /// Frame currently shown, `0..explosion_frames`.
    pub frame: u32,
    /// Ticks left before advancing to the next frame.
    pub delay: u32,
}

// ── Master arena state ────────────────────────────────────────────────────────

/// The whole simulation.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct ArenaState {
    pub config: ArenaConfig,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: GameStatus,
    /// Shared horizontal direction of the swarm, `1` or `-1`.
    pub enemy_direction: i32,
    /// Timestamp (ms) of the last accepted shot; `None` before the first.
    pub last_shot_ms: Option<u64>,
    /// Vertical scroll of the background, `0..height`.
    pub background_y: i32,
    /// Sound cues emitted since the driver last drained them.
    pub cues: Vec<SoundCue>,
    pub frame: u64,
}

impl ArenaState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
