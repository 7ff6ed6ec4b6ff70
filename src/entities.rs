//! Capabilities shared by every visible game object.

use crate::constants::{EXPLODE_TICKS, EXPLOSION_HALF_SIZE};
use crate::geometry::{Point, Rect};
use crate::host::{AssetLoader, Canvas, ImageHandle};

// ── Sprite ───────────────────────────────────────────────────────────────────

/// Ordered animation frames with a cycling current index.
#[derive(Clone, Debug, Default)]
pub struct Sprite {
    frames: Vec<ImageHandle>,
    index: usize,
}

impl Sprite {
    pub fn new(frames: Vec<ImageHandle>) -> Self {
        Self { frames, index: 0 }
    }

    pub fn load(assets: &mut impl AssetLoader, paths: &[&str]) -> Self {
        Self::new(paths.iter().map(|path| assets.load_image(path)).collect())
    }

    /// Advance to the next frame, wrapping to the first.
    pub fn next(&mut self) {
        self.index += 1;
        if self.index >= self.frames.len() {
            self.index = 0;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<ImageHandle> {
        self.frames.get(self.index).copied()
    }

    /// Draw the current frame with its top-left corner at `at`.
    pub fn draw(&self, canvas: &mut impl Canvas, at: Point) {
        if let Some(image) = self.current() {
            canvas.draw_image(at.x, at.y, image);
        }
    }
}

// ── Entity ───────────────────────────────────────────────────────────────────

/// Positioned, sized, killable. Dead entities stay in their collection and
/// are skipped by drawing and collision until reset.
pub trait Entity {
    /// Centre of the entity.
    fn pos(&self) -> Point;

    /// Width and height of the bounding box.
    fn size(&self) -> (i32, i32);

    fn is_dead(&self) -> bool;

    fn rect(&self) -> Rect {
        let (w, h) = self.size();
        Rect::centered(self.pos(), w, h)
    }

    /// Top-left corner used when drawing the entity's sprite.
    fn top_left(&self) -> Point {
        let (w, h) = self.size();
        let pos = self.pos();
        Point::new(pos.x - w / 2, pos.y - h / 2)
    }
}

// ── Explosion ────────────────────────────────────────────────────────────────

/// Short countdown during which an entity shows its explosion frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Explosion {
    remaining: u32,
}

impl Explosion {
    pub fn start(&mut self) {
        self.remaining = EXPLODE_TICKS;
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Count one tick down. Returns `true` on the tick the countdown ends.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Draw an exploding or live entity: the explosion frame while the countdown
/// runs, otherwise the regular sprite. Dead entities draw nothing.
pub fn draw_exploding<E: Entity>(
    entity: &E,
    explosion: &Explosion,
    sprite: &Sprite,
    explode_sprite: &Sprite,
    canvas: &mut impl Canvas,
) {
    if explosion.is_active() {
        let pos = entity.pos();
        explode_sprite.draw(
            canvas,
            Point::new(pos.x - EXPLOSION_HALF_SIZE, pos.y - EXPLOSION_HALF_SIZE),
        );
    } else if !entity.is_dead() {
        sprite.draw(canvas, entity.top_left());
    }
}
