// Application state management
//
// This module contains the main AppState struct, which owns the replay and
// the interactive controls around it (pause, single step, pacing, stage
// toggles), and re-exports configuration types from the config submodule.

pub mod config;
pub mod event;

// Re-export config types for convenience
pub use config::{RefreshConfig, StageSettings, DEFAULT_REFRESH_MS};

use crate::replay::{Renderer, Replay};
use config::{
    FRAME_TIME_SLACK_MS, MAX_REFRESH_MS, MIN_REFRESH_MS, REFRESH_STEP,
    SLOW_FRAME_COUNT_THRESHOLD,
};
use std::time::Instant;

/// Everything the terminal renderer needs besides the scene itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub settings: StageSettings,
    pub paused: bool,
    pub refresh_ms: u64,
    pub refresh_recently_changed: bool,
    /// Route lines are suppressed while frames are slow
    pub detail_reduced: bool,
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Whether the replay clock is frozen
    pub paused: bool,

    /// Steps requested with the single-step key while paused
    pending_steps: u32,

    /// The replay being shown
    pub replay: Replay,

    /// Stage visual settings (labels, route lines)
    pub stage_settings: StageSettings,

    /// Tick interval configuration
    pub refresh_config: RefreshConfig,

    /// Timestamp of the last frame render
    last_frame_time: Instant,

    /// Counter for consecutive slow frames
    slow_frame_count: u32,

    /// Whether stage detail has been auto-reduced due to slow frames
    pub detail_reduced: bool,
}

impl AppState {
    /// Create a new AppState around a ready replay
    pub fn new(replay: Replay, refresh_config: RefreshConfig) -> Self {
        Self {
            running: true,
            paused: false,
            pending_steps: 0,
            replay,
            stage_settings: StageSettings::default(),
            refresh_config,
            last_frame_time: Instant::now(),
            slow_frame_count: 0,
            detail_reduced: false,
        }
    }

    /// Run one frame: step the replay, or just redraw it while paused
    ///
    /// A pending single step is consumed even while paused.
    pub fn on_tick<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), R::Error> {
        if self.paused {
            if self.pending_steps == 0 {
                return renderer.render(&self.replay.scene());
            }
            self.pending_steps -= 1;
        }
        self.replay.step(renderer)
    }

    /// Snapshot of the view state for the renderer
    pub fn overlay(&self) -> Overlay {
        Overlay {
            settings: self.stage_settings,
            paused: self.paused,
            refresh_ms: self.refresh_config.refresh_ms,
            refresh_recently_changed: self.refresh_config.recently_changed(),
            detail_reduced: self.detail_reduced,
        }
    }

    /// Freeze or resume the replay clock
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.pending_steps = 0;
        tracing::info!(paused = self.paused, now = self.replay.now(), "Replay pause toggled");
    }

    /// Queue one tick while paused; ignored while running
    pub fn request_single_step(&mut self) {
        if self.paused {
            self.pending_steps = self.pending_steps.saturating_add(1);
        }
    }

    /// Toggle node labels
    pub fn toggle_labels(&mut self) {
        self.stage_settings.labels_enabled = !self.stage_settings.labels_enabled;
    }

    /// Toggle route lines
    ///
    /// Also clears any automatic detail reduction so the full stage is
    /// tried again.
    pub fn toggle_routes(&mut self) {
        self.stage_settings.routes_enabled = !self.stage_settings.routes_enabled;
        self.reset_detail_reduction();
    }

    /// Increase tick rate (decrease interval)
    pub fn increase_refresh_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .refresh_ms
            .saturating_sub(REFRESH_STEP);
        self.refresh_config.refresh_ms = new_interval.max(MIN_REFRESH_MS);
        self.refresh_config.last_change = Some(Instant::now());
    }

    /// Decrease tick rate (increase interval)
    pub fn decrease_refresh_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .refresh_ms
            .saturating_add(REFRESH_STEP);
        self.refresh_config.refresh_ms = new_interval.min(MAX_REFRESH_MS);
        self.refresh_config.last_change = Some(Instant::now());
    }

    /// Update frame time tracking and auto-reduce stage detail if needed
    ///
    /// Should be called once per frame. A frame counts as slow when it takes
    /// longer than the tick interval plus FRAME_TIME_SLACK_MS; after
    /// SLOW_FRAME_COUNT_THRESHOLD slow frames in a row, route lines are
    /// dropped until the user toggles them again.
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time).as_millis();
        self.last_frame_time = now;
        self.record_frame_time(frame_time);
    }

    fn record_frame_time(&mut self, frame_time: u128) {
        let threshold = self.refresh_config.refresh_ms as u128 + FRAME_TIME_SLACK_MS;

        if frame_time > threshold {
            self.slow_frame_count += 1;

            if self.slow_frame_count >= SLOW_FRAME_COUNT_THRESHOLD && !self.detail_reduced {
                self.detail_reduced = true;
                tracing::info!(
                    frame_time_ms = frame_time,
                    slow_frame_count = self.slow_frame_count,
                    live_sprites = self.replay.scene().sprites.len(),
                    "Reducing stage detail due to slow frame times"
                );
            }
        } else if !self.detail_reduced {
            self.slow_frame_count = 0;
        }
    }

    /// Reset automatic detail reduction
    pub fn reset_detail_reduction(&mut self) {
        self.detail_reduced = false;
        self.slow_frame_count = 0;
    }
}
