use space_invaders::host::{AssetCache, AssetLoader, AudioSink, SoundHandle, SoundQueue};
use space_invaders::GameSession;

#[derive(Default)]
struct RecordingAudio {
    played: Vec<SoundHandle>,
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, sound: SoundHandle) {
        self.played.push(sound);
    }
}

// ── AssetCache ────────────────────────────────────────────────────────────────

#[test]
fn same_path_yields_same_handle() {
    let mut assets = AssetCache::new();
    let a = assets.load_image("images/player1a.png");
    let b = assets.load_image("images/bullet1a.png");
    let again = assets.load_image("images/player1a.png");

    assert_eq!(a, again);
    assert_ne!(a, b);
    assert_eq!(assets.image_count(), 2);
    assert_eq!(assets.image_path(b), Some("images/bullet1a.png"));
}

#[test]
fn images_and_sounds_are_separate_tables() {
    let mut assets = AssetCache::new();
    let image = assets.load_image("shared/name");
    let sound = assets.load_sound("shared/name");

    assert_eq!(image.0, 0);
    assert_eq!(sound.0, 0);
    assert_eq!(assets.sound_path(sound), Some("shared/name"));
    assert_eq!(assets.sound_path(SoundHandle(7)), None);
}

#[test]
fn session_loads_each_asset_once() {
    let mut assets = AssetCache::new();
    let _session = GameSession::new(&mut assets);

    // 6 invader frames, explosion, mystery, player, two bullets, 32 barrier frames
    assert_eq!(assets.image_count(), 43);
    // shoot, player death, alien/mystery death
    assert_eq!(assets.sound_count(), 3);
}

// ── SoundQueue ────────────────────────────────────────────────────────────────

#[test]
fn sound_queue_plays_in_order_and_drains() {
    let mut queue = SoundQueue::new();
    assert!(queue.is_empty());

    queue.push(SoundHandle(2));
    queue.push(SoundHandle(0));
    queue.push(SoundHandle(2));
    assert_eq!(queue.pending(), &[SoundHandle(2), SoundHandle(0), SoundHandle(2)]);

    let mut audio = RecordingAudio::default();
    queue.play_into(&mut audio);
    assert_eq!(audio.played, vec![SoundHandle(2), SoundHandle(0), SoundHandle(2)]);
    assert!(queue.is_empty());

    queue.play_into(&mut audio);
    assert_eq!(audio.played.len(), 3);
}

#[test]
fn sound_queue_clear_discards() {
    let mut queue = SoundQueue::new();
    queue.push(SoundHandle(1));
    queue.clear();

    let mut audio = RecordingAudio::default();
    queue.play_into(&mut audio);
    assert!(audio.played.is_empty());
}
