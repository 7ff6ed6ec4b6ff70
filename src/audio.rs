//! Terminal stand-in for an audio device: every cue is logged, and with
//! `--bell` the terminal bell rings once per frame that raised any sound.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use space_invaders::host::{AssetCache, AudioSink, SoundHandle};
use tracing::debug;

pub struct TerminalAudio {
    names: HashMap<SoundHandle, String>,
    bell: bool,
    pending: usize,
}

impl TerminalAudio {
    pub fn new(assets: &AssetCache, bell: bool) -> Self {
        let names = (0..assets.sound_count() as u32)
            .map(SoundHandle)
            .filter_map(|sound| assets.sound_path(sound).map(|path| (sound, path.to_string())))
            .collect();
        Self {
            names,
            bell,
            pending: 0,
        }
    }

    /// Emit the bell for the sounds played since the last call.
    pub fn ring<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if self.bell && self.pending > 0 {
            out.queue(Print('\u{7}'))?;
        }
        self.pending = 0;
        Ok(())
    }
}

impl AudioSink for TerminalAudio {
    fn play_sound(&mut self, sound: SoundHandle) {
        let name = self.names.get(&sound).map_or("<unknown>", String::as_str);
        debug!(sound = name, "play");
        self.pending += 1;
    }
}
