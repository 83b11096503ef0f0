//! Audio system built on a minimal "play a tone" service
//!
//! Procedurally generated sound effects and a looping note sequence - no
//! external files needed! The browser backend drives the Web Audio API; any
//! failure there just leaves the game silent.

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
    /// Peak gain (decays exponentially over the duration)
    pub volume: f32,
    /// Start offset from "now"
    pub delay_secs: f32,
}

impl Tone {
    pub const fn new(frequency: f32, duration_secs: f32, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration_secs,
            waveform,
            volume,
            delay_secs: 0.0,
        }
    }

    /// Same tone, scheduled `delay_secs` later
    pub const fn after(mut self, delay_secs: f32) -> Self {
        self.delay_secs = delay_secs;
        self
    }
}

/// Fire-and-forget tone playback
pub trait ToneService {
    fn play(&mut self, tone: Tone);
}

/// Backend for headless runs: logs and discards
#[derive(Debug, Default)]
pub struct SilentTones;

impl ToneService for SilentTones {
    fn play(&mut self, tone: Tone) {
        log::trace!("tone {:.0} Hz for {:.2}s", tone.frequency, tone.duration_secs);
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gravity flipped - quick rising blip
    Flip,
    /// Obstacle passed - C major triad
    Score,
    /// Stone destroyed - two descending buzzes
    GameOver,
}

const FLIP_TONES: [Tone; 2] = [
    Tone::new(400.0, 0.1, Waveform::Sine, 0.2),
    Tone::new(600.0, 0.15, Waveform::Sine, 0.15),
];

const SCORE_TONES: [Tone; 3] = [
    Tone::new(523.0, 0.1, Waveform::Sine, 0.2), // C5
    Tone::new(659.0, 0.1, Waveform::Sine, 0.2), // E5
    Tone::new(784.0, 0.2, Waveform::Sine, 0.2), // G5
];

const GAME_OVER_TONES: [Tone; 2] = [
    Tone::new(200.0, 0.3, Waveform::Sawtooth, 0.3),
    Tone::new(150.0, 0.4, Waveform::Sawtooth, 0.3).after(0.1),
];

impl SoundEffect {
    /// Tones that make up this effect
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Flip => &FLIP_TONES,
            SoundEffect::Score => &SCORE_TONES,
            SoundEffect::GameOver => &GAME_OVER_TONES,
        }
    }
}

/// A major scale, one octave
pub const MUSIC_NOTES: [f32; 8] = [220.0, 247.0, 262.0, 294.0, 330.0, 349.0, 392.0, 440.0];
/// Time between background notes
pub const MUSIC_INTERVAL_MS: f32 = 500.0;
const MUSIC_NOTE_SECS: f32 = 0.4;
const MUSIC_VOLUME: f32 = 0.08;

/// Background note loop. Stops itself the first time it is polled while the
/// game is not being played or audio is muted.
#[derive(Debug, Default)]
pub struct MusicSequencer {
    playing: bool,
    note_index: usize,
    since_last_ms: f32,
}

impl MusicSequencer {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start a fresh sequence, playing the first note right away
    pub fn start<T: ToneService>(&mut self, tones: &mut T) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.note_index = 0;
        self.since_last_ms = 0.0;
        self.play_note(tones);
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.since_last_ms = 0.0;
    }

    /// Advance by `elapsed_ms`, playing the next note if one came due
    pub fn poll<T: ToneService>(
        &mut self,
        elapsed_ms: f32,
        game_playing: bool,
        muted: bool,
        tones: &mut T,
    ) {
        if !self.playing {
            return;
        }
        if !game_playing || muted {
            self.stop();
            return;
        }
        // A stalled frame (hidden tab) counts as one interval at most, so
        // missed notes are dropped instead of firing together
        self.since_last_ms += elapsed_ms.clamp(0.0, MUSIC_INTERVAL_MS);
        if self.since_last_ms >= MUSIC_INTERVAL_MS {
            self.since_last_ms -= MUSIC_INTERVAL_MS;
            self.play_note(tones);
        }
    }

    fn play_note<T: ToneService>(&mut self, tones: &mut T) {
        let frequency = MUSIC_NOTES[self.note_index % MUSIC_NOTES.len()];
        tones.play(Tone::new(
            frequency,
            MUSIC_NOTE_SECS,
            Waveform::Sine,
            MUSIC_VOLUME,
        ));
        self.note_index += 1;
    }
}

/// Audio manager for the game
pub struct AudioManager<T: ToneService> {
    tones: T,
    muted: bool,
    music: MusicSequencer,
}

impl<T: ToneService> AudioManager<T> {
    pub fn new(tones: T, muted: bool) -> Self {
        Self {
            tones,
            muted,
            music: MusicSequencer::default(),
        }
    }

    /// Mute/unmute all audio. Muting also stops the music.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.music.stop();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        for tone in effect.tones() {
            self.tones.play(*tone);
        }
    }

    pub fn start_music(&mut self) {
        if self.muted {
            return;
        }
        self.music.start(&mut self.tones);
    }

    pub fn stop_music(&mut self) {
        self.music.stop();
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_playing()
    }

    /// Per-frame housekeeping for the background music
    pub fn update(&mut self, elapsed_ms: f32, game_playing: bool) {
        self.music
            .poll(elapsed_ms, game_playing, self.muted, &mut self.tones);
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

}

#[cfg(target_arch = "wasm32")]
pub use web::WebTones;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Tone, ToneService, Waveform};

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Web Audio tone backend
    pub struct WebTones {
        ctx: Option<AudioContext>,
    }

    impl Default for WebTones {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebTones {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl ToneService for WebTones {
        fn play(&mut self, tone: Tone) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = Self::create_osc(ctx, tone.frequency, tone.waveform.into())
            else {
                return;
            };
            let t = ctx.current_time() + tone.delay_secs as f64;
            let end = t + tone.duration_secs as f64;

            gain.gain().set_value_at_time(tone.volume, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Captures every tone instead of playing it
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTones {
        pub played: Vec<Tone>,
    }

    impl ToneService for RecordingTones {
        fn play(&mut self, tone: Tone) {
            self.played.push(tone);
        }
    }

    #[test]
    fn test_effect_recipes() {
        let flip = SoundEffect::Flip.tones();
        assert_eq!(flip.len(), 2);
        assert_eq!(flip[0].frequency, 400.0);

        let score: Vec<f32> = SoundEffect::Score.tones().iter().map(|t| t.frequency).collect();
        assert_eq!(score, vec![523.0, 659.0, 784.0]);

        let over = SoundEffect::GameOver.tones();
        assert_eq!(over[0].waveform, Waveform::Sawtooth);
        assert_eq!(over[1].frequency, 150.0);
        assert_eq!(over[1].delay_secs, 0.1);
    }

    #[test]
    fn test_muted_manager_is_silent() {
        let mut audio = AudioManager::new(RecordingTones::default(), true);
        audio.play(SoundEffect::Score);
        audio.start_music();
        audio.update(2000.0, true);
        assert!(audio.tones().played.is_empty());
        assert!(!audio.music_playing());
    }

    #[test]
    fn test_effects_play_when_unmuted() {
        let mut audio = AudioManager::new(RecordingTones::default(), false);
        audio.play(SoundEffect::GameOver);
        assert_eq!(audio.tones().played.len(), 2);
    }

    #[test]
    fn test_music_cycles_notes() {
        let mut audio = AudioManager::new(RecordingTones::default(), false);
        audio.start_music();
        assert_eq!(audio.tones().played.len(), 1);

        audio.update(499.0, true);
        assert_eq!(audio.tones().played.len(), 1);
        audio.update(1.0, true);
        for _ in 0..7 {
            audio.update(MUSIC_INTERVAL_MS, true);
        }
        let notes: Vec<f32> = audio.tones().played.iter().map(|t| t.frequency).collect();
        assert_eq!(notes, vec![220.0, 247.0, 262.0, 294.0, 330.0, 349.0, 392.0, 440.0, 220.0]);
        assert!(audio.tones().played.iter().all(|t| t.volume == 0.08));
    }

    #[test]
    fn test_long_frame_plays_one_note() {
        let mut audio = AudioManager::new(RecordingTones::default(), false);
        audio.start_music();

        // A backgrounded tab resumes with a minute-long frame
        audio.update(60_000.0, true);
        assert_eq!(audio.tones().played.len(), 2);

        // No backlog: the next note waits a full interval
        audio.update(MUSIC_INTERVAL_MS - 1.0, true);
        assert_eq!(audio.tones().played.len(), 2);
        audio.update(1.0, true);
        assert_eq!(audio.tones().played.len(), 3);
    }

    #[test]
    fn test_music_stops_when_game_stops() {
        let mut audio = AudioManager::new(RecordingTones::default(), false);
        audio.start_music();
        audio.update(100.0, false);
        assert!(!audio.music_playing());
        audio.update(5000.0, true);
        assert_eq!(audio.tones().played.len(), 1);

        // Restart plays from the first note again
        audio.start_music();
        assert_eq!(audio.tones().played[1].frequency, 220.0);
    }

    #[test]
    fn test_mute_stops_music() {
        let mut audio = AudioManager::new(RecordingTones::default(), false);
        audio.start_music();
        audio.set_muted(true);
        assert!(!audio.music_playing());
        audio.set_muted(false);
        audio.start_music();
        assert!(audio.music_playing());
    }
}
