//! Rendering layer. All terminal drawing lives here.
//!
//! The session draws into a [`Screen`] through the `Canvas` trait using
//! logical 800×1000 coordinates. The screen scales them onto terminal cells,
//! maps every image asset to a short glyph, and writes the finished frame to
//! the terminal in one pass. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use space_invaders::host::{AssetCache, Canvas, ImageHandle, TextAlign};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_SQUID: Color = Color::Magenta;
const C_CRAB: Color = Color::Cyan;
const C_OCTOPUS: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ALIEN: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_BARRIER: Color = Color::Green;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   P : Pause   R : Restart   Q : Quit";

// ── Glyphs ────────────────────────────────────────────────────────────────────

/// Terminal stand-in for one image asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    text: &'static str,
    color: Color,
}

const UNKNOWN_GLYPH: Glyph = Glyph { text: "?", color: C_HINT };

const fn glyph(text: &'static str, color: Color) -> Glyph {
    Glyph { text, color }
}

fn glyph_for(path: &str) -> Glyph {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name {
        "invader1a.png" => glyph("/O\\", C_SQUID),
        "invader1b.png" => glyph("\\O/", C_SQUID),
        "invader2a.png" => glyph("{#}", C_CRAB),
        "invader2b.png" => glyph("}#{", C_CRAB),
        "invader3a.png" => glyph("<@>", C_OCTOPUS),
        "invader3b.png" => glyph(">@<", C_OCTOPUS),
        "mystery1a.png" => glyph("<=o=>", C_MYSTERY),
        "player1a.png" => glyph("/█\\", C_PLAYER),
        "bullet1a.png" => glyph("║", C_BULLET_PLAYER),
        "bullet2a.png" => glyph("↓", C_BULLET_ALIEN),
        "explode1.png" => glyph("*", C_EXPLOSION),
        // Barrier cells darken as they take damage.
        n if n.starts_with("base1a") => glyph("█", C_BARRIER),
        n if n.starts_with("base1b") => glyph("▓", C_BARRIER),
        n if n.starts_with("base1c") => glyph("▒", C_BARRIER),
        n if n.starts_with("base1d") => glyph("░", C_BARRIER),
        _ => UNKNOWN_GLYPH,
    }
}

// ── Screen buffer ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

/// One frame of terminal cells.
pub struct Screen<'a> {
    assets: &'a AssetCache,
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
}

impl<'a> Screen<'a> {
    pub fn new(assets: &'a AssetCache, cols: u16, rows: u16) -> Self {
        Self {
            assets,
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Logical pixel → terminal cell.
    fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x * i32::from(self.cols) / SCREEN_WIDTH,
            y * i32::from(self.rows) / SCREEN_HEIGHT,
        )
    }

    /// Write `text` starting at (`col`, `row`); anything off-screen is clipped.
    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        if row < 0 || row >= i32::from(self.rows) {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 || c >= i32::from(self.cols) {
                continue;
            }
            let index = row as usize * self.cols as usize + c as usize;
            self.cells[index] = Some(Cell { ch, color });
        }
    }

    fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    pub fn draw_controls_hint(&mut self) {
        let last = i32::from(self.rows) - 1;
        self.put_str(1, last, CONTROLS_HINT, C_HINT);
    }

    /// Flush the frame to the terminal.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(cell) = self.cell(col, row) {
                    out.queue(cursor::MoveTo(col, row))?;
                    out.queue(style::SetForegroundColor(cell.color))?;
                    out.queue(Print(cell.ch))?;
                }
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Canvas for Screen<'_> {
    fn draw_image(&mut self, x: i32, y: i32, image: ImageHandle) {
        let glyph = self.assets.image_path(image).map_or(UNKNOWN_GLYPH, glyph_for);
        let (col, row) = self.to_cell(x, y);
        self.put_str(col, row, glyph.text, glyph.color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, align: TextAlign) {
        let (col, row) = self.to_cell(x, y);
        let len = text.chars().count() as i32;
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2,
            TextAlign::Right => col - len,
        };
        self.put_str(start, row, text, C_TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_invaders::host::AssetLoader;

    fn row_text(screen: &Screen, row: u16) -> String {
        (0..screen.cols)
            .map(|col| screen.cell(col, row).map_or(' ', |cell| cell.ch))
            .collect()
    }

    #[test]
    fn logical_corners_map_to_terminal_corners() {
        let assets = AssetCache::new();
        let screen = Screen::new(&assets, 100, 50);
        assert_eq!(screen.to_cell(0, 0), (0, 0));
        assert_eq!(screen.to_cell(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1), (99, 49));
        assert_eq!(screen.to_cell(400, 500), (50, 25));
    }

    #[test]
    fn images_use_their_glyph() {
        let mut assets = AssetCache::new();
        let player = assets.load_image("images/player1a.png");
        let mut screen = Screen::new(&assets, 100, 50);
        screen.draw_image(80, 20, player);
        assert_eq!(row_text(&screen, 1).trim(), "/█\\");
        assert_eq!(screen.cell(10, 1).map(|c| c.color), Some(C_PLAYER));
    }

    #[test]
    fn text_alignment_and_clipping() {
        let assets = AssetCache::new();
        let mut screen = Screen::new(&assets, 20, 10);
        screen.draw_text(SCREEN_WIDTH, 0, "Level: 1", TextAlign::Right);
        assert_eq!(row_text(&screen, 0), "            Level: 1");

        screen.draw_text(SCREEN_WIDTH / 2, 100, "ab", TextAlign::Center);
        assert_eq!(row_text(&screen, 1), "         ab         ");

        screen.draw_text(-400, 200, "clipped", TextAlign::Left);
        assert_eq!(row_text(&screen, 2).trim(), "");
    }

    #[test]
    fn unknown_assets_fall_back() {
        assert_eq!(glyph_for("images/nothing.png"), UNKNOWN_GLYPH);
        assert_eq!(glyph_for("images/base1c_2_1.png").text, "▒");
    }
}
