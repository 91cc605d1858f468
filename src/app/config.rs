// Application configuration types
//
// This module contains configuration structs and constants for:
// - Stage visual settings
// - Tick pacing (refresh interval)
// - Slow frame detection

use std::time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Default tick interval in milliseconds (about 30 frames per second)
pub const DEFAULT_REFRESH_MS: u64 = 33;

/// Minimum tick interval in milliseconds
pub const MIN_REFRESH_MS: u64 = 10;

/// Maximum tick interval in milliseconds
pub const MAX_REFRESH_MS: u64 = 1000;

/// Tick interval adjustment step in milliseconds
pub const REFRESH_STEP: u64 = 10;

/// Duration to highlight recently changed refresh intervals
pub const CHANGE_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Frame time threshold for reducing stage detail (in milliseconds)
/// Measured against the configured interval plus this slack
pub const FRAME_TIME_SLACK_MS: u128 = 100;

/// Number of consecutive slow frames before route lines are dropped
pub const SLOW_FRAME_COUNT_THRESHOLD: u32 = 5;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Visual settings for the stage panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSettings {
    /// Show node names inside node rectangles (toggle with 't' key)
    pub labels_enabled: bool,

    /// Draw a faint line along the route of every packet in flight
    /// (toggle with 'r' key)
    pub routes_enabled: bool,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            labels_enabled: true,
            routes_enabled: false,
        }
    }
}

/// Tick pacing configuration
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Tick interval in milliseconds (MIN_REFRESH_MS..=MAX_REFRESH_MS)
    pub refresh_ms: u64,

    /// Timestamp of last interval change (for visual feedback)
    pub last_change: Option<Instant>,
}

impl RefreshConfig {
    /// Create a RefreshConfig with the default interval
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_REFRESH_MS)
    }

    /// Create a RefreshConfig, clamping `refresh_ms` into the allowed range
    pub fn with_interval(refresh_ms: u64) -> Self {
        Self {
            refresh_ms: refresh_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS),
            last_change: None,
        }
    }

    /// Get tick interval as Duration
    pub fn ui_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Whether the interval changed within CHANGE_HIGHLIGHT_DURATION
    pub fn recently_changed(&self) -> bool {
        self.last_change
            .map(|at| at.elapsed() < CHANGE_HIGHLIGHT_DURATION)
            .unwrap_or(false)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new()
    }
}
