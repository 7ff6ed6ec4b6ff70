//! Projectiles and the fixed-capacity pools that hold them.

use crate::constants::{
    ALIEN_BULLET_DY, ALIEN_BULLET_HEIGHT, ALIEN_BULLET_WIDTH, PLAYER_BULLET_CEILING,
    PLAYER_BULLET_DY, PLAYER_BULLET_HEIGHT, PLAYER_BULLET_WIDTH, SCREEN_HEIGHT,
};
use crate::entities::{Entity, Sprite};
use crate::geometry::{Point, Rect};
use crate::host::{Canvas, ImageHandle};

/// Who fired a bullet. `Alien` carries the alien's index in the session's
/// alien table; it is attribution only and never dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien(usize),
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pos: Point,
    w: i32,
    h: i32,
    dy: i32,
    owner: BulletOwner,
    dead: bool,
    sprite: Sprite,
}

impl Bullet {
    pub fn player(pos: Point, image: ImageHandle) -> Self {
        Self {
            pos,
            w: PLAYER_BULLET_WIDTH,
            h: PLAYER_BULLET_HEIGHT,
            dy: PLAYER_BULLET_DY,
            owner: BulletOwner::Player,
            dead: false,
            sprite: Sprite::new(vec![image]),
        }
    }

    pub fn alien(alien: usize, pos: Point, image: ImageHandle) -> Self {
        Self {
            pos,
            w: ALIEN_BULLET_WIDTH,
            h: ALIEN_BULLET_HEIGHT,
            dy: ALIEN_BULLET_DY,
            owner: BulletOwner::Alien(alien),
            dead: false,
            sprite: Sprite::new(vec![image]),
        }
    }

    pub fn owner(&self) -> BulletOwner {
        self.owner
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    /// Move one tick; a bullet leaving the playfield dies.
    pub fn advance(&mut self) {
        self.pos.y += self.dy;
        let gone = match self.owner {
            BulletOwner::Player => self.pos.y < PLAYER_BULLET_CEILING,
            BulletOwner::Alien(_) => self.pos.y >= SCREEN_HEIGHT,
        };
        if gone {
            self.dead = true;
        }
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        if !self.dead {
            self.sprite.draw(canvas, self.top_left());
        }
    }
}

impl Entity for Bullet {
    fn pos(&self) -> Point {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

// ── Pool ─────────────────────────────────────────────────────────────────────

/// At most `N` live bullets. New bullets take the first free slot; scans run
/// in slot order so "first match wins" is deterministic.
#[derive(Clone, Debug)]
pub struct BulletPool<const N: usize> {
    slots: [Option<Bullet>; N],
}

impl<const N: usize> Default for BulletPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BulletPool<N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Store `bullet` in the first free slot. Returns `false` (and drops the
    /// bullet) when every slot is taken.
    pub fn spawn(&mut self, bullet: Bullet) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(bullet);
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().flatten()
    }

    pub fn slot(&self, index: usize) -> Option<&Bullet> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Advance every bullet, hand the survivors to `resolve` for collision
    /// checks, then free the slot of every bullet that died this tick.
    pub fn update(&mut self, mut resolve: impl FnMut(&mut Bullet)) {
        for slot in self.slots.iter_mut() {
            let Some(bullet) = slot.as_mut() else {
                continue;
            };
            bullet.advance();
            if !bullet.is_dead() {
                resolve(bullet);
            }
            if bullet.is_dead() {
                *slot = None;
            }
        }
    }

    /// Remove the first bullet overlapping `rect`. Returns whether one was hit.
    pub fn cancel_first_overlap(&mut self, rect: &Rect) -> bool {
        let hit = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|b| b.rect().overlaps(rect)));
        match hit {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for bullet in self.iter() {
            bullet.draw(canvas);
        }
    }
}
