/// Tunable constants for one arena.
///
/// All sizes and speeds are in arena pixels; a tick is one frame.

#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,

    // ── Player ────────────────────────────────────────────────────────────
    pub player_width: i32,
    pub player_height: i32,
    pub player_speed: i32,
    /// Distance from the bottom edge to the player's top edge at spawn.
    pub player_spawn_offset: i32,
    pub starting_lives: u32,

    // ── Player bullets ────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_speed: i32,
    /// Minimum milliseconds between two shots.
    pub shoot_cooldown_ms: u64,

    // ── Enemy wave ────────────────────────────────────────────────────────
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: i32,
    pub enemy_height: i32,
    /// Grid pitch (both axes) between enemy origins.
    pub enemy_spacing: i32,
    /// Offset of the first row/column from the top-left corner.
    pub enemy_margin: i32,
    pub enemy_speed_x: i32,
    /// Drop applied to the whole swarm when it touches a side.
    pub enemy_speed_y: i32,
    pub score_per_enemy: u32,

    // ── Enemy fire ────────────────────────────────────────────────────────
    /// Chance per tick that one random enemy fires.
    pub enemy_fire_chance: f64,
    pub enemy_bullet_width: i32,
    pub enemy_bullet_height: i32,
    pub enemy_bullet_speed: i32,

    // ── Explosions ────────────────────────────────────────────────────────
    pub explosion_frames: u32,
    /// Ticks spent on each frame.
    pub explosion_frame_delay: u32,
    /// On-screen size of one frame, centred on the explosion anchor.
    pub explosion_size: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: 960,
            height: 640,
            player_width: 100,
            player_height: 100,
            player_speed: 8,
            player_spawn_offset: 110,
            starting_lives: 3,
            bullet_width: 10,
            bullet_height: 20,
            bullet_speed: 7,
            shoot_cooldown_ms: 500,
            enemy_rows: 5,
            enemy_cols: 10,
            enemy_width: 40,
            enemy_height: 40,
            enemy_spacing: 60,
            enemy_margin: 50,
            enemy_speed_x: 2,
            enemy_speed_y: 30,
            score_per_enemy: 10,
            enemy_fire_chance: 0.01,
            enemy_bullet_width: 5,
            enemy_bullet_height: 15,
            enemy_bullet_speed: 10,
            explosion_frames: 6,
            explosion_frame_delay: 1,
            explosion_size: 50,
        }
    }
}

impl ArenaConfig {
    /// Default tuning on a surface of the given pixel size.
    pub fn for_arena(width: i32, height: i32) -> Self {
        ArenaConfig {
            width,
            height,
            ..ArenaConfig::default()
        }
    }
}
