//! The alien formation manager.
//!
//! Aliens move individually but share one direction, one speed and five row
//! offsets. Each tick the session calls, in order: [`Formation::pre_update`],
//! every alien's update (which reports edge contact and liveness back here),
//! [`Formation::post_update`], then [`Formation::update`] for the alien bullets.

use tracing::{debug, trace};

use crate::bullet::{Bullet, BulletPool};
use crate::constants::{
    ALIEN_BULLET_CAPACITY, ALIEN_MUZZLE_OFFSET, BASE_SPEED, FIRST_ROW_Y, FORMATION_ROWS,
    FORMATION_WIDTH, REGROUP_FIRST_ROW_Y, ROW_PITCH, SPEED_DIVISOR,
};
use crate::entities::Entity;
use crate::geometry::Point;
use crate::host::{AssetLoader, Canvas, ImageHandle};

#[derive(Clone, Debug)]
pub struct Formation {
    row_y: [i32; FORMATION_ROWS],
    direction: i32,
    speed: i32,
    width: i32,
    alive: usize,
    needs_descent: bool,
    bullets: BulletPool<ALIEN_BULLET_CAPACITY>,
    bullet_image: ImageHandle,
}

fn row_offsets(first_row_y: i32) -> [i32; FORMATION_ROWS] {
    std::array::from_fn(|row| first_row_y + ROW_PITCH * row as i32)
}

impl Formation {
    pub fn new(assets: &mut impl AssetLoader) -> Self {
        Self {
            row_y: row_offsets(FIRST_ROW_Y),
            direction: 1,
            speed: BASE_SPEED,
            width: FORMATION_WIDTH,
            alive: 0,
            needs_descent: false,
            bullets: BulletPool::new(),
            bullet_image: assets.load_image("images/bullet2a.png"),
        }
    }

    /// Back to base speed with the regroup row layout and no bullets in flight.
    /// Direction is left as it was.
    pub fn reset(&mut self) {
        self.speed = BASE_SPEED;
        self.regroup();
    }

    /// Start a new wave: rows return to the regroup layout and stray bullets
    /// vanish, while the accumulated speed carries over one step higher.
    pub fn advance_wave(&mut self) {
        self.speed += 1;
        self.regroup();
    }

    fn regroup(&mut self) {
        self.row_y = row_offsets(REGROUP_FIRST_ROW_Y);
        self.bullets.clear();
    }

    pub fn row_y(&self, row: usize) -> i32 {
        self.row_y[row]
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Pixels per tick an alien moves (coarse view of the internal counter).
    pub fn speed(&self) -> i32 {
        self.speed / SPEED_DIVISOR
    }

    pub fn raw_speed(&self) -> i32 {
        self.speed
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn needs_descent(&self) -> bool {
        self.needs_descent
    }

    pub fn bullets(&self) -> &BulletPool<ALIEN_BULLET_CAPACITY> {
        &self.bullets
    }

    // ── Per-alien callbacks ─────────────────────────────────────────────────

    pub fn request_descent(&mut self) {
        self.needs_descent = true;
    }

    pub fn register_alive(&mut self) {
        self.alive += 1;
    }

    /// Fire from alien `alien` standing at `pos`. Dropped when the pool is full.
    pub fn fire(&mut self, alien: usize, pos: Point) -> bool {
        let muzzle = Point::new(pos.x, pos.y + ALIEN_MUZZLE_OFFSET);
        let fired = self.bullets.spawn(Bullet::alien(alien, muzzle, self.bullet_image));
        if !fired {
            trace!(alien, "alien bullet pool full, shot dropped");
        }
        fired
    }

    // ── Tick protocol ───────────────────────────────────────────────────────

    pub fn pre_update(&mut self) {
        self.needs_descent = false;
        self.alive = 0;
    }

    /// Apply a pending row descent. Returns `true` when no alien reported
    /// itself alive this tick, i.e. the wave is cleared.
    pub fn post_update(&mut self) -> bool {
        if self.needs_descent {
            for y in self.row_y.iter_mut() {
                *y += self.width / 2;
            }
            self.direction = -self.direction;
            self.speed += 1;
            self.needs_descent = false;
            debug!(
                speed = self.speed,
                direction = self.direction,
                "formation stepped down"
            );
        }
        self.alive == 0
    }

    /// Advance alien bullets; `resolve` runs the player and barrier checks on
    /// each bullet still live after moving.
    pub fn update(&mut self, resolve: impl FnMut(&mut Bullet)) {
        self.bullets.update(resolve);
    }

    /// An incoming player bullet cancels against the first alien bullet it
    /// overlaps; both disappear.
    pub fn check_hit(&mut self, bullet: &mut Bullet) {
        if bullet.is_dead() {
            return;
        }
        if self.bullets.cancel_first_overlap(&bullet.rect()) {
            bullet.kill();
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        self.bullets.draw(canvas);
    }
}
