//! A single alien in the formation.

use rand::Rng;
use tracing::debug;

use crate::bullet::Bullet;
use crate::constants::{
    ALIEN_COLUMN_HALF_PITCH, ALIEN_FIRE_CHANCE, ALIEN_FRAME_TICKS, DEFENSE_LINE_Y, SCREEN_WIDTH,
};
use crate::entities::{draw_exploding, Entity, Explosion, Sprite};
use crate::formation::Formation;
use crate::geometry::Point;
use crate::host::{AssetLoader, Canvas, SoundHandle, SoundQueue};

/// Alien kind, fixed by the row it starts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienTier {
    /// Row 0.
    Squid,
    /// Rows 1–2.
    Crab,
    /// Rows 3–4.
    Octopus,
}

impl AlienTier {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienTier::Squid,
            1 | 2 => AlienTier::Crab,
            _ => AlienTier::Octopus,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            AlienTier::Squid => 30,
            AlienTier::Crab => 20,
            AlienTier::Octopus => 10,
        }
    }

    pub fn size(self) -> (i32, i32) {
        match self {
            AlienTier::Squid => (35, 35),
            AlienTier::Crab => (48, 35),
            AlienTier::Octopus => (52, 35),
        }
    }

    fn frame_paths(self) -> [&'static str; 2] {
        match self {
            AlienTier::Squid => ["images/invader1a.png", "images/invader1b.png"],
            AlienTier::Crab => ["images/invader2a.png", "images/invader2b.png"],
            AlienTier::Octopus => ["images/invader3a.png", "images/invader3b.png"],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Alien {
    col: usize,
    row: usize,
    tier: AlienTier,
    pos: Point,
    dead: bool,
    explosion: Explosion,
    frame_countdown: i32,
    sprite: Sprite,
    explode_sprite: Sprite,
    die_sound: SoundHandle,
}

impl Alien {
    pub fn new(
        assets: &mut impl AssetLoader,
        col: usize,
        row: usize,
        formation: &Formation,
    ) -> Self {
        let tier = AlienTier::for_row(row);
        Self {
            col,
            row,
            tier,
            pos: Point::new(Self::home_x(col), formation.row_y(row)),
            dead: false,
            explosion: Explosion::default(),
            frame_countdown: ALIEN_FRAME_TICKS,
            sprite: Sprite::load(assets, &tier.frame_paths()),
            explode_sprite: Sprite::load(assets, &["images/explode1.png"]),
            die_sound: assets.load_sound("sounds/invaderkilled.wav"),
        }
    }

    /// Starting x of column `col`.
    pub fn home_x(col: usize) -> i32 {
        ALIEN_COLUMN_HALF_PITCH * (2 * col as i32 + 1)
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn tier(&self) -> AlienTier {
        self.tier
    }

    pub fn score(&self) -> u32 {
        self.tier.score()
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_active()
    }

    pub fn frame(&self) -> usize {
        self.sprite.index()
    }

    /// Alive again at the column's home x. The next update flips the sprite.
    pub fn reset(&mut self) {
        self.dead = false;
        self.explosion.reset();
        self.frame_countdown = 0;
        self.pos.x = Self::home_x(self.col);
    }

    /// Snap y to this alien's row offset.
    pub fn follow_row(&mut self, formation: &Formation) {
        self.pos.y = formation.row_y(self.row);
    }

    /// One tick of movement, animation and fire. `index` is this alien's slot
    /// in the session table (bullet attribution). Returns `true` when the
    /// alien's row has come down past the defense line.
    pub fn update(
        &mut self,
        index: usize,
        formation: &mut Formation,
        rng: &mut impl Rng,
    ) -> bool {
        if self.explosion.tick() {
            self.dead = true;
        }
        if self.dead {
            return false;
        }

        self.pos.x += formation.speed() * formation.direction();

        if self.explosion.is_active() {
            return false;
        }

        let half = formation.width() / 2;
        if self.pos.x >= SCREEN_WIDTH - half || self.pos.x < half {
            formation.request_descent();
        }

        self.frame_countdown -= 1;
        if self.frame_countdown <= 0 {
            self.sprite.next();
            self.frame_countdown = ALIEN_FRAME_TICKS;
        }

        if rng.gen_bool(ALIEN_FIRE_CHANCE) {
            formation.fire(index, self.pos);
        }

        formation.register_alive();

        formation.row_y(self.row) > DEFENSE_LINE_Y
    }

    /// Test a player bullet. On a hit the alien starts exploding, the bullet
    /// is consumed and the alien's points are returned.
    pub fn check_hit(&mut self, bullet: &mut Bullet, sounds: &mut SoundQueue) -> Option<u32> {
        if bullet.is_dead() || self.dead || self.explosion.is_active() {
            return None;
        }
        if !bullet.rect().overlaps(&self.rect()) {
            return None;
        }
        self.explosion.start();
        sounds.push(self.die_sound);
        bullet.kill();
        debug!(col = self.col, row = self.row, points = self.score(), "alien destroyed");
        Some(self.score())
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        draw_exploding(self, &self.explosion, &self.sprite, &self.explode_sprite, canvas);
    }
}

impl Entity for Alien {
    fn pos(&self) -> Point {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        self.tier.size()
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
