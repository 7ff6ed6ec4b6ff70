//! Gameplay constants. All distances are logical pixels, all durations ticks.

// ── Screen ───────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 1000;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: i32 = 400;
pub const PLAYER_START_Y: i32 = 950;
pub const PLAYER_WIDTH: i32 = 57;
pub const PLAYER_HEIGHT: i32 = 35;
pub const PLAYER_STEP: i32 = 8;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_BULLET_CAPACITY: usize = 5;
/// Ticks between two player shots.
pub const FIRE_COOLDOWN_TICKS: u32 = 8;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const PLAYER_BULLET_WIDTH: i32 = 4;
pub const PLAYER_BULLET_HEIGHT: i32 = 26;
pub const PLAYER_BULLET_DY: i32 = -32;
/// A player bullet above this line is gone.
pub const PLAYER_BULLET_CEILING: i32 = 10;

pub const ALIEN_BULLET_WIDTH: i32 = 9;
pub const ALIEN_BULLET_HEIGHT: i32 = 26;
pub const ALIEN_BULLET_DY: i32 = 8;
pub const ALIEN_BULLET_CAPACITY: usize = 5;
/// Alien bullets spawn this far below the alien's centre.
pub const ALIEN_MUZZLE_OFFSET: i32 = 24;

// ── Formation ────────────────────────────────────────────────────────────────

pub const FORMATION_ROWS: usize = 5;
pub const FORMATION_COLUMNS: usize = 11;
pub const ALIEN_COUNT: usize = FORMATION_ROWS * FORMATION_COLUMNS;
/// Half the horizontal distance between two alien columns.
pub const ALIEN_COLUMN_HALF_PITCH: i32 = 34;
pub const ROW_PITCH: i32 = 60;
pub const FIRST_ROW_Y: i32 = 110;
/// First row offset after a regroup (restart or new wave).
pub const REGROUP_FIRST_ROW_Y: i32 = 100;
/// Nominal formation column width; a row descent drops by half of it.
pub const FORMATION_WIDTH: i32 = 48;
pub const BASE_SPEED: i32 = 8;
/// Internal speed units per visible pixel of movement.
pub const SPEED_DIVISOR: i32 = 4;
/// Any row offset beyond this line ends the game.
pub const DEFENSE_LINE_Y: i32 = 900;
pub const ALIEN_FRAME_TICKS: i32 = 4;
pub const ALIEN_FIRE_CHANCE: f64 = 0.01;

// ── Explosions ───────────────────────────────────────────────────────────────

pub const EXPLODE_TICKS: u32 = 4;
/// Explosion sprite is drawn this far up and left of the centre.
pub const EXPLOSION_HALF_SIZE: i32 = 24;

// ── Mystery ship ─────────────────────────────────────────────────────────────

pub const MYSTERY_Y: i32 = 60;
pub const MYSTERY_WIDTH: i32 = 71;
pub const MYSTERY_HEIGHT: i32 = 31;
pub const MYSTERY_DX: i32 = -4;
pub const MYSTERY_SPAWN_CHANCE: f64 = 0.01;

// ── Barriers ─────────────────────────────────────────────────────────────────

pub const BARRIER_COUNT: usize = 4;
pub const BARRIER_Y: i32 = 840;
pub const BARRIER_HALF_PITCH: i32 = 98;
pub const BARRIER_WIDTH: i32 = 87;
pub const BARRIER_HEIGHT: i32 = 57;
pub const BARRIER_CELL_ROWS: usize = 2;
pub const BARRIER_CELL_COLUMNS: usize = 4;
pub const BARRIER_CELL_WIDTH: i32 = 22;
pub const BARRIER_CELL_HEIGHT: i32 = 29;
/// Hits a barrier cell takes before it is gone.
pub const BARRIER_CELL_STAGES: u8 = 4;

// ── HUD ──────────────────────────────────────────────────────────────────────

pub const HUD_MARGIN: i32 = 10;
