//! The bonus ship that now and then crosses the top of the screen.

use rand::Rng;
use tracing::debug;

use crate::bullet::Bullet;
use crate::constants::{MYSTERY_DX, MYSTERY_HEIGHT, MYSTERY_WIDTH, MYSTERY_Y, SCREEN_WIDTH};
use crate::entities::{draw_exploding, Entity, Explosion, Sprite};
use crate::geometry::Point;
use crate::host::{AssetLoader, Canvas, SoundHandle, SoundQueue};

/// Weighted score table: (cumulative probability, points).
const SCORE_BUCKETS: [(f64, u32); 4] = [(0.50, 100), (0.80, 200), (0.95, 300), (1.0, 400)];

/// Points for a mystery kill, drawn from the weighted buckets.
pub fn roll_score(rng: &mut impl Rng) -> u32 {
    let r: f64 = rng.gen();
    SCORE_BUCKETS
        .iter()
        .find(|(limit, _)| r < *limit)
        .map_or(400, |&(_, points)| points)
}

#[derive(Clone, Debug)]
pub struct MysteryShip {
    pos: Point,
    dead: bool,
    explosion: Explosion,
    sprite: Sprite,
    explode_sprite: Sprite,
    die_sound: SoundHandle,
}

impl MysteryShip {
    /// Starts dormant.
    pub fn new(assets: &mut impl AssetLoader) -> Self {
        Self {
            pos: Point::new(0, MYSTERY_Y),
            dead: true,
            explosion: Explosion::default(),
            sprite: Sprite::load(assets, &["images/mystery1a.png"]),
            explode_sprite: Sprite::load(assets, &["images/explode1.png"]),
            die_sound: assets.load_sound("sounds/invaderkilled.wav"),
        }
    }

    /// Dormant again, parked just past the right edge.
    pub fn reset(&mut self) {
        self.explosion.reset();
        self.dead = true;
        self.pos.x = SCREEN_WIDTH + MYSTERY_WIDTH / 2;
    }

    /// Begin a new pass from the right edge.
    pub fn launch(&mut self) {
        self.reset();
        self.dead = false;
        debug!("mystery ship launched");
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_active()
    }

    pub fn update(&mut self) {
        if self.explosion.tick() {
            self.dead = true;
        }
        if self.dead {
            return;
        }
        self.pos.x += MYSTERY_DX;
        if self.pos.x < 0 {
            self.dead = true;
        }
    }

    /// Same contract as an alien hit, with a randomized score.
    pub fn check_hit(
        &mut self,
        bullet: &mut Bullet,
        rng: &mut impl Rng,
        sounds: &mut SoundQueue,
    ) -> Option<u32> {
        if bullet.is_dead() || self.dead || self.explosion.is_active() {
            return None;
        }
        if !bullet.rect().overlaps(&self.rect()) {
            return None;
        }
        self.explosion.start();
        let points = roll_score(rng);
        sounds.push(self.die_sound);
        bullet.kill();
        debug!(points, "mystery ship destroyed");
        Some(points)
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        draw_exploding(self, &self.explosion, &self.sprite, &self.explode_sprite, canvas);
    }
}

impl Entity for MysteryShip {
    fn pos(&self) -> Point {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        (MYSTERY_WIDTH, MYSTERY_HEIGHT)
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
