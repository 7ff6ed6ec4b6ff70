//! The player's ship, its lives and its bullets.

use tracing::{debug, trace};

use crate::bullet::{Bullet, BulletPool};
use crate::constants::{
    FIRE_COOLDOWN_TICKS, HUD_MARGIN, PLAYER_BULLET_CAPACITY, PLAYER_HEIGHT, PLAYER_LIVES,
    PLAYER_START_X, PLAYER_START_Y, PLAYER_STEP, PLAYER_WIDTH, SCREEN_WIDTH,
};
use crate::entities::{Entity, Sprite};
use crate::geometry::Point;
use crate::host::{AssetLoader, Canvas, ImageHandle, SoundHandle, SoundQueue, TextAlign};

#[derive(Clone, Debug)]
pub struct Player {
    pos: Point,
    dead: bool,
    lives: u32,
    fire_block: u32,
    bullets: BulletPool<PLAYER_BULLET_CAPACITY>,
    sprite: Sprite,
    bullet_image: ImageHandle,
    fire_sound: SoundHandle,
    die_sound: SoundHandle,
}

impl Player {
    pub fn new(assets: &mut impl AssetLoader) -> Self {
        Self {
            pos: Point::new(PLAYER_START_X, PLAYER_START_Y),
            dead: false,
            lives: PLAYER_LIVES,
            fire_block: 0,
            bullets: BulletPool::new(),
            sprite: Sprite::load(assets, &["images/player1a.png"]),
            bullet_image: assets.load_image("images/bullet1a.png"),
            fire_sound: assets.load_sound("sounds/shoot.wav"),
            die_sound: assets.load_sound("sounds/explosion.wav"),
        }
    }

    /// Full lives, no cooldown, no bullets. The ship keeps its position.
    pub fn reset(&mut self) {
        self.dead = false;
        self.lives = PLAYER_LIVES;
        self.fire_block = 0;
        self.bullets.clear();
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn fire_cooldown(&self) -> u32 {
        self.fire_block
    }

    pub fn bullets(&self) -> &BulletPool<PLAYER_BULLET_CAPACITY> {
        &self.bullets
    }

    pub fn move_left(&mut self) {
        self.pos.x -= PLAYER_STEP;
        let half = PLAYER_WIDTH / 2;
        if self.pos.x < half {
            self.pos.x = half;
        }
    }

    pub fn move_right(&mut self) {
        self.pos.x += PLAYER_STEP;
        let half = PLAYER_WIDTH / 2;
        if self.pos.x >= SCREEN_WIDTH - half {
            self.pos.x = SCREEN_WIDTH - half - 1;
        }
    }

    /// Shoot from the nose of the ship. Ignored while the cooldown runs or
    /// when every bullet slot is in use.
    pub fn fire(&mut self, sounds: &mut SoundQueue) -> bool {
        if self.fire_block > 0 {
            trace!(cooldown = self.fire_block, "fire ignored, cooling down");
            return false;
        }
        let muzzle = Point::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2);
        if !self.bullets.spawn(Bullet::player(muzzle, self.bullet_image)) {
            trace!("player bullet pool full, shot dropped");
            return false;
        }
        self.fire_block = FIRE_COOLDOWN_TICKS;
        sounds.push(self.fire_sound);
        true
    }

    /// Count the cooldown down, then move every bullet; `resolve` runs the
    /// alien and barrier checks for each bullet still live after moving.
    pub fn update(&mut self, resolve: impl FnMut(&mut Bullet)) {
        if self.fire_block > 0 {
            self.fire_block -= 1;
        }
        self.bullets.update(resolve);
    }

    /// Test an alien bullet against the ship. Returns `true` when this hit
    /// took the last life.
    pub fn check_hit(&mut self, bullet: &mut Bullet, sounds: &mut SoundQueue) -> bool {
        if bullet.is_dead() || self.dead {
            return false;
        }
        if !bullet.rect().overlaps(&self.rect()) {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        sounds.push(self.die_sound);
        bullet.kill();
        debug!(lives = self.lives, "player hit");
        self.lives == 0
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        if !self.dead {
            self.sprite.draw(canvas, self.top_left());
        }
        self.bullets.draw(canvas);
        canvas.draw_text(
            HUD_MARGIN,
            HUD_MARGIN,
            &format!("Lives: {}", self.lives),
            TextAlign::Left,
        );
    }
}

impl Entity for Player {
    fn pos(&self) -> Point {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        (PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
