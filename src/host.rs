//! Seams between the gameplay core and whatever toolkit hosts it.
//!
//! The core only ever sees opaque handles. Assets are resolved once through an
//! [`AssetLoader`] when entities are built; drawing goes through a [`Canvas`]
//! during the draw pass; sounds raised during a tick are queued in a
//! [`SoundQueue`] and handed to an [`AudioSink`] afterwards.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

pub trait AssetLoader {
    /// Same path must yield the same handle.
    fn load_image(&mut self, path: &str) -> ImageHandle;
    fn load_sound(&mut self, path: &str) -> SoundHandle;
}

pub trait Canvas {
    /// Draw `image` with its top-left corner at (`x`, `y`).
    fn draw_image(&mut self, x: i32, y: i32, image: ImageHandle);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, align: TextAlign);
}

pub trait AudioSink {
    fn play_sound(&mut self, sound: SoundHandle);
}

// ── Memoizing loader ─────────────────────────────────────────────────────────

/// Path-keyed handle table. Handles are dense indices into the path lists, so
/// a host adapter can map a handle back to the asset it names.
#[derive(Debug, Default)]
pub struct AssetCache {
    images: HashMap<String, ImageHandle>,
    image_paths: Vec<String>,
    sounds: HashMap<String, SoundHandle>,
    sound_paths: Vec<String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_path(&self, image: ImageHandle) -> Option<&str> {
        self.image_paths.get(image.0 as usize).map(String::as_str)
    }

    pub fn sound_path(&self, sound: SoundHandle) -> Option<&str> {
        self.sound_paths.get(sound.0 as usize).map(String::as_str)
    }

    pub fn image_count(&self) -> usize {
        self.image_paths.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sound_paths.len()
    }
}

impl AssetLoader for AssetCache {
    fn load_image(&mut self, path: &str) -> ImageHandle {
        if let Some(&image) = self.images.get(path) {
            return image;
        }
        let image = ImageHandle(self.image_paths.len() as u32);
        self.image_paths.push(path.to_string());
        self.images.insert(path.to_string(), image);
        image
    }

    fn load_sound(&mut self, path: &str) -> SoundHandle {
        if let Some(&sound) = self.sounds.get(path) {
            return sound;
        }
        let sound = SoundHandle(self.sound_paths.len() as u32);
        self.sound_paths.push(path.to_string());
        self.sounds.insert(path.to_string(), sound);
        sound
    }
}

// ── Deferred sound playback ──────────────────────────────────────────────────

/// Sounds requested during a tick, in the order they were raised.
#[derive(Debug, Default)]
pub struct SoundQueue {
    pending: Vec<SoundHandle>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sound: SoundHandle) {
        self.pending.push(sound);
    }

    pub fn pending(&self) -> &[SoundHandle] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Play every pending sound and empty the queue.
    pub fn play_into(&mut self, audio: &mut impl AudioSink) {
        for sound in self.pending.drain(..) {
            audio.play_sound(sound);
        }
    }
}
