//! A playing session: the simulation plus its external services
//!
//! The simulation only queues events. The session drains them once per frame
//! and turns them into sounds, best-score writes and UI-visible state.

use crate::audio::{AudioManager, SoundEffect, ToneService};
use crate::clock::FrameClock;
use crate::persistence::Store;
use crate::renderer::{self, Color, Surface, palette};
use crate::sim::{self, GameEvent, GamePhase, GameState, World, autopilot};
use crate::tuning::Tuning;

pub struct Session<T: ToneService, S: Store> {
    state: GameState,
    clock: FrameClock,
    audio: AudioManager<T>,
    store: S,
    best_score: u32,
    final_score: Option<u32>,
    idle_mode: bool,
}

impl<T: ToneService, S: Store> Session<T, S> {
    pub fn new(seed: u64, tuning: Tuning, world: World, tones: T, store: S) -> Self {
        let best_score = store.best_score();
        let muted = store.muted();
        log::info!("Session ready: best score {}, muted {}", best_score, muted);
        Self {
            state: GameState::with_tuning(seed, tuning, world),
            clock: FrameClock::new(),
            audio: AudioManager::new(tones, muted),
            store,
            best_score,
            final_score: None,
            idle_mode: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Score of the last finished run
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn background(&self) -> Color {
        palette::background(self.state.background_index)
    }

    pub fn canvas_background(&self) -> Color {
        palette::canvas_background(self.state.background_index)
    }

    pub fn audio(&self) -> &AudioManager<T> {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Let the autopilot play
    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
    }

    /// Handle the single activate input at time `now_ms`.
    ///
    /// Returns true when this started a new run, i.e. the frame loop needs to
    /// be (re)started.
    pub fn activate(&mut self, now_ms: f64) -> bool {
        let was_playing = self.state.is_playing();
        sim::activate(&mut self.state);
        let started = !was_playing && self.state.is_playing();
        if started {
            self.clock.reset(now_ms);
            self.final_score = None;
        }
        self.handle_events();
        started
    }

    /// Run one display frame: simulate, then paint
    pub fn frame<Sf: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut Sf) {
        let delta_ms = self.clock.delta_ms(now_ms);
        self.step(delta_ms);
        renderer::render(&self.state, surface);
    }

    /// Simulate one frame of `delta_ms` without drawing
    pub fn step(&mut self, delta_ms: f32) {
        if self.idle_mode && autopilot::wants_flip(&self.state) {
            sim::flip(&mut self.state);
        }
        sim::tick(&mut self.state, delta_ms);
        self.handle_events();
        self.audio.update(delta_ms, self.state.is_playing());
    }

    /// Flip the mute flag, persist it and start/stop the music to match
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        self.store.set_muted(muted);
        if !muted && self.state.is_playing() {
            self.audio.start_music();
        }
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        muted
    }

    /// The container changed size; the stone is pulled back in bounds on
    /// the next frame
    pub fn resize(&mut self, container_width: f32) {
        self.state.world = World::fit_to_container(container_width);
        log::debug!(
            "World resized to {}x{}",
            self.state.world.width,
            self.state.world.height
        );
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Started => {
                    self.audio.start_music();
                }
                GameEvent::GravityFlipped { .. } => {
                    self.audio.play(SoundEffect::Flip);
                }
                GameEvent::Scored { score } => {
                    self.audio.play(SoundEffect::Score);
                    self.record_score(score);
                }
                GameEvent::BackgroundShifted { index } => {
                    log::trace!("Background -> {}", index);
                }
                GameEvent::GameOver { score, .. } => {
                    self.audio.play(SoundEffect::GameOver);
                    self.audio.stop_music();
                    self.record_score(score);
                    self.final_score = Some(score);
                }
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        if score > self.best_score {
            self.best_score = score;
            self.store.set_best_score(score);
            log::info!("New best score: {}", score);
        }
    }
}
