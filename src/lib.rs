//! Fixed-screen arcade shooter core: a player ship, a descending alien
//! formation, a bonus mystery ship and destructible barriers.
//!
//! The crate is host-agnostic. A host provides an [`host::AssetLoader`] at
//! construction, calls [`session::GameSession::update`] once per tick, then
//! [`session::GameSession::draw`] with its [`host::Canvas`] and
//! [`session::GameSession::play_sounds`] with its [`host::AudioSink`].

pub mod alien;
pub mod barrier;
pub mod bullet;
pub mod constants;
pub mod counters;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod host;
pub mod mystery;
pub mod player;
pub mod session;

pub use session::{Command, GameSession, GameStatus};
