//! Destructible shields between the player and the formation.

use crate::bullet::Bullet;
use crate::constants::{
    BARRIER_CELL_COLUMNS, BARRIER_CELL_HEIGHT, BARRIER_CELL_ROWS, BARRIER_CELL_STAGES,
    BARRIER_CELL_WIDTH, BARRIER_HEIGHT, BARRIER_WIDTH,
};
use crate::entities::{Entity, Sprite};
use crate::geometry::{Point, Rect};
use crate::host::{AssetLoader, Canvas};

/// One block of a barrier. Each hit shows the next damage frame; after
/// [`BARRIER_CELL_STAGES`] hits the block is gone for good.
#[derive(Clone, Debug)]
struct Cell {
    sprite: Sprite,
    stage: u8,
    dead: bool,
}

impl Cell {
    fn load(assets: &mut impl AssetLoader, row: usize, col: usize) -> Self {
        let paths: Vec<String> = ['a', 'b', 'c', 'd']
            .iter()
            .map(|stage| format!("images/base1{}_{}_{}.png", stage, col + 1, row + 1))
            .collect();
        let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
        Self {
            sprite: Sprite::load(assets, &paths),
            stage: 0,
            dead: false,
        }
    }

    fn hit(&mut self) {
        self.sprite.next();
        self.stage += 1;
        if self.stage >= BARRIER_CELL_STAGES {
            self.dead = true;
        }
    }

    fn reset(&mut self) {
        self.sprite.reset();
        self.stage = 0;
        self.dead = false;
    }
}

#[derive(Clone, Debug)]
pub struct Barrier {
    pos: Point,
    cells: [[Cell; BARRIER_CELL_COLUMNS]; BARRIER_CELL_ROWS],
}

impl Barrier {
    pub fn new(assets: &mut impl AssetLoader, pos: Point) -> Self {
        Self {
            pos,
            cells: std::array::from_fn(|row| {
                std::array::from_fn(|col| Cell::load(assets, row, col))
            }),
        }
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().flatten().for_each(Cell::reset);
    }

    /// Damage stage of cell (`row`, `col`), 0 when untouched.
    pub fn cell_stage(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col].stage
    }

    pub fn cell_is_dead(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].dead
    }

    /// Cell blocks hang below the barrier's nominal box.
    fn cell_origin(&self) -> Point {
        Point::new(self.pos.x - BARRIER_WIDTH / 2, self.pos.y + BARRIER_HEIGHT / 2)
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let origin = self.cell_origin();
        let x1 = origin.x + col as i32 * BARRIER_CELL_WIDTH;
        let y1 = origin.y + row as i32 * BARRIER_CELL_HEIGHT;
        Rect::new(x1, y1, x1 + BARRIER_CELL_WIDTH, y1 + BARRIER_CELL_HEIGHT)
    }

    /// Damage the first intact cell the bullet overlaps and consume the
    /// bullet. Returns whether a cell was hit.
    pub fn check_hit(&mut self, bullet: &mut Bullet) -> bool {
        if bullet.is_dead() {
            return false;
        }
        let bullet_rect = bullet.rect();
        for row in 0..BARRIER_CELL_ROWS {
            for col in 0..BARRIER_CELL_COLUMNS {
                if self.cells[row][col].dead {
                    continue;
                }
                if bullet_rect.overlaps(&self.cell_rect(row, col)) {
                    self.cells[row][col].hit();
                    bullet.kill();
                    return true;
                }
            }
        }
        false
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        let origin = self.cell_origin();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.dead {
                    continue;
                }
                let at = Point::new(
                    origin.x + col as i32 * BARRIER_CELL_WIDTH,
                    origin.y + row as i32 * BARRIER_CELL_HEIGHT,
                );
                cell.sprite.draw(canvas, at);
            }
        }
    }
}

impl Entity for Barrier {
    fn pos(&self) -> Point {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        (BARRIER_WIDTH, BARRIER_HEIGHT)
    }

    /// A barrier is gone once every cell is.
    fn is_dead(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.dead)
    }
}
