//! The game session: owns every entity, runs the per-tick update order and
//! routes bullets to whatever they can hit.
//!
//! Randomness is injected into [`GameSession::update`] so callers control the
//! draw stream (tests use a seeded `StdRng`). Nothing here touches a canvas or
//! an audio device during the update; sounds are queued and played afterwards
//! through [`GameSession::play_sounds`].

use rand::Rng;
use tracing::info;

use crate::alien::Alien;
use crate::barrier::Barrier;
use crate::bullet::Bullet;
use crate::constants::{
    BARRIER_COUNT, BARRIER_HALF_PITCH, BARRIER_Y, FORMATION_COLUMNS, FORMATION_ROWS,
    MYSTERY_SPAWN_CHANCE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::counters::{Level, Score};
use crate::entities::Entity;
use crate::formation::Formation;
use crate::geometry::Point;
use crate::host::{AssetLoader, AudioSink, Canvas, SoundHandle, SoundQueue, TextAlign};
use crate::mystery::MysteryShip;
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Player input, already mapped from host key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
    Restart,
}

// ── Hit routing ──────────────────────────────────────────────────────────────

/// Everything a player bullet can hit, borrowed out of the session so the
/// player's own pool can be walked at the same time.
struct PlayerBulletTargets<'a> {
    aliens: &'a mut [Alien],
    formation: &'a mut Formation,
    mystery: &'a mut MysteryShip,
    barriers: &'a mut [Barrier],
    score: &'a mut Score,
    sounds: &'a mut SoundQueue,
}

impl PlayerBulletTargets<'_> {
    /// Aliens, then alien bullets, then the mystery ship, then barriers. Each
    /// check is a no-op once an earlier one consumed the bullet.
    fn resolve(&mut self, bullet: &mut Bullet, rng: &mut impl Rng) {
        for alien in self.aliens.iter_mut() {
            if let Some(points) = alien.check_hit(bullet, self.sounds) {
                self.score.add(points);
            }
        }
        self.formation.check_hit(bullet);
        if let Some(points) = self.mystery.check_hit(bullet, rng, self.sounds) {
            self.score.add(points);
        }
        for barrier in self.barriers.iter_mut() {
            barrier.check_hit(bullet);
        }
    }
}

struct AlienBulletTargets<'a> {
    player: &'a mut Player,
    barriers: &'a mut [Barrier],
    sounds: &'a mut SoundQueue,
}

impl AlienBulletTargets<'_> {
    /// Player first, then barriers. Returns `true` when the player lost the
    /// last life.
    fn resolve(&mut self, bullet: &mut Bullet) -> bool {
        let player_down = self.player.check_hit(bullet, self.sounds);
        for barrier in self.barriers.iter_mut() {
            barrier.check_hit(bullet);
        }
        player_down
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

pub struct GameSession {
    player: Player,
    level: Level,
    score: Score,
    formation: Formation,
    /// Row-major: index = row * FORMATION_COLUMNS + col.
    aliens: Vec<Alien>,
    mystery: MysteryShip,
    barriers: Vec<Barrier>,
    paused: bool,
    game_over: bool,
    frame: u64,
    sounds: SoundQueue,
}

impl GameSession {
    pub fn new(assets: &mut impl AssetLoader) -> Self {
        let player = Player::new(assets);
        let formation = Formation::new(assets);
        let mystery = MysteryShip::new(assets);

        let barriers = (0..BARRIER_COUNT)
            .map(|i| {
                let x = BARRIER_HALF_PITCH * (2 * i as i32 + 1);
                Barrier::new(assets, Point::new(x, BARRIER_Y))
            })
            .collect();

        let mut aliens = Vec::with_capacity(FORMATION_ROWS * FORMATION_COLUMNS);
        for row in 0..FORMATION_ROWS {
            for col in 0..FORMATION_COLUMNS {
                aliens.push(Alien::new(assets, col, row, &formation));
            }
        }

        Self {
            player,
            level: Level::default(),
            score: Score::default(),
            formation,
            aliens,
            mystery,
            barriers,
            paused: false,
            game_over: false,
            frame: 0,
            sounds: SoundQueue::new(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ticks actually simulated (paused and game-over ticks excluded).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    /// The alien at grid cell (`col`, `row`), or `None` off the grid.
    pub fn alien(&self, col: usize, row: usize) -> Option<&Alien> {
        if col >= FORMATION_COLUMNS {
            return None;
        }
        self.aliens.get(row * FORMATION_COLUMNS + col)
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn mystery(&self) -> &MysteryShip {
        &self.mystery
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn level(&self) -> u32 {
        self.level.value()
    }

    pub fn pending_sounds(&self) -> &[SoundHandle] {
        self.sounds.pending()
    }

    /// Hand every sound raised since the last call to `audio`.
    pub fn play_sounds(&mut self, audio: &mut impl AudioSink) {
        self.sounds.play_into(audio);
    }

    // ── Commands ────────────────────────────────────────────────────────────

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_ship_left(),
            Command::MoveRight => self.move_ship_right(),
            Command::Fire => self.ship_fire(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.restart();
            }
        }
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn move_ship_left(&mut self) {
        if self.accepts_input() {
            self.player.move_left();
        }
    }

    pub fn move_ship_right(&mut self) {
        if self.accepts_input() {
            self.player.move_right();
        }
    }

    pub fn ship_fire(&mut self) {
        if self.accepts_input() {
            self.player.fire(&mut self.sounds);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    /// New game from a pause or a game over. Ignored while playing; returns
    /// whether the restart happened.
    pub fn restart(&mut self) -> bool {
        if self.accepts_input() {
            return false;
        }
        self.paused = false;
        self.game_over = false;

        self.level.reset();
        self.score.reset();
        self.player.reset();
        for alien in self.aliens.iter_mut() {
            alien.reset();
        }
        for barrier in self.barriers.iter_mut() {
            barrier.reset();
        }
        self.formation.reset();
        self.sync_rows();
        self.mystery.reset();

        info!("game restarted");
        true
    }

    /// Fresh wave: aliens and the mystery ship come back, score, barriers and
    /// the player carry over.
    pub fn next_level(&mut self) {
        self.paused = false;
        self.game_over = false;

        for alien in self.aliens.iter_mut() {
            alien.reset();
        }
        self.formation.advance_wave();
        self.sync_rows();
        self.mystery.reset();

        info!(
            speed = self.formation.raw_speed(),
            score = self.score.value(),
            "wave cleared, next wave"
        );
    }

    fn set_game_over(&mut self, reason: &str) {
        if !self.game_over {
            info!(reason, score = self.score.value(), "game over");
        }
        self.game_over = true;
    }

    fn sync_rows(&mut self) {
        for alien in self.aliens.iter_mut() {
            alien.follow_row(&self.formation);
        }
    }

    // ── Hit routing ─────────────────────────────────────────────────────────

    /// Run a player bullet through every target it can hit this tick.
    pub fn check_player_bullet(&mut self, bullet: &mut Bullet, rng: &mut impl Rng) {
        let mut targets = PlayerBulletTargets {
            aliens: &mut self.aliens,
            formation: &mut self.formation,
            mystery: &mut self.mystery,
            barriers: &mut self.barriers,
            score: &mut self.score,
            sounds: &mut self.sounds,
        };
        targets.resolve(bullet, rng);
    }

    /// Run an alien bullet through the player and the barriers.
    pub fn check_alien_bullet(&mut self, bullet: &mut Bullet) {
        let mut targets = AlienBulletTargets {
            player: &mut self.player,
            barriers: &mut self.barriers,
            sounds: &mut self.sounds,
        };
        if targets.resolve(bullet) {
            self.set_game_over("no lives left");
        }
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    /// Advance the simulation by one tick. No-op while paused or game over.
    pub fn update(&mut self, rng: &mut impl Rng) {
        if !self.accepts_input() {
            return;
        }
        self.frame += 1;

        self.update_player(rng);
        self.update_aliens(rng);
        self.update_alien_bullets();
        self.update_mystery(rng);
    }

    fn update_player(&mut self, rng: &mut impl Rng) {
        let mut targets = PlayerBulletTargets {
            aliens: &mut self.aliens,
            formation: &mut self.formation,
            mystery: &mut self.mystery,
            barriers: &mut self.barriers,
            score: &mut self.score,
            sounds: &mut self.sounds,
        };
        self.player.update(|bullet| targets.resolve(bullet, &mut *rng));
    }

    fn update_aliens(&mut self, rng: &mut impl Rng) {
        self.formation.pre_update();

        let mut invaded = false;
        for (index, alien) in self.aliens.iter_mut().enumerate() {
            if alien.update(index, &mut self.formation, rng) {
                invaded = true;
            }
        }
        if invaded {
            self.set_game_over("formation reached the defense line");
        }

        let cleared = self.formation.post_update();
        self.sync_rows();
        if cleared {
            self.next_level();
        }
    }

    fn update_alien_bullets(&mut self) {
        let mut targets = AlienBulletTargets {
            player: &mut self.player,
            barriers: &mut self.barriers,
            sounds: &mut self.sounds,
        };
        let mut player_down = false;
        self.formation.update(|bullet| {
            if targets.resolve(bullet) {
                player_down = true;
            }
        });
        if player_down {
            self.set_game_over("no lives left");
        }
    }

    fn update_mystery(&mut self, rng: &mut impl Rng) {
        self.mystery.update();
        if self.mystery.is_dead() && rng.gen_bool(MYSTERY_SPAWN_CHANCE) {
            self.mystery.launch();
        }
    }

    // ── Draw ────────────────────────────────────────────────────────────────

    pub fn draw(&self, canvas: &mut impl Canvas) {
        self.level.draw(canvas);
        self.score.draw(canvas);
        self.player.draw(canvas);
        for alien in &self.aliens {
            alien.draw(canvas);
        }
        for barrier in &self.barriers {
            barrier.draw(canvas);
        }
        self.formation.draw(canvas);
        self.mystery.draw(canvas);

        let overlay = match self.status() {
            GameStatus::GameOver => Some("GAME OVER"),
            GameStatus::Paused => Some("PAUSED"),
            GameStatus::Playing => None,
        };
        if let Some(text) = overlay {
            canvas.draw_text(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2, text, TextAlign::Center);
        }
    }
}
