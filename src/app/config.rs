// Application configuration types
//
// This module contains configuration structs and constants for:
// - Flow table limits
// - Poll intervals
// - Fixed screen geometry

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Default flow table capacity
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default idle time after which a flow expires
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Poll timeout once the capture is drained
pub const DEFAULT_IDLE_MS: u64 = 250;

/// Height of the header pane (one text line plus borders)
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status pane (one text line plus borders)
pub const STATUS_HEIGHT: u16 = 3;

/// Border rows of the content pane
pub const CONTENT_BORDER_ROWS: u16 = 2;

/// Smallest terminal height that fits the fixed chrome
pub const MIN_HEIGHT: u16 = HEADER_HEIGHT + STATUS_HEIGHT + CONTENT_BORDER_ROWS;

/// Smallest terminal width that fits one row of text inside the borders
pub const MIN_WIDTH: u16 = 72;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Limits enforced by the flow table on every write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTableConfig {
    /// Maximum number of live flows
    pub max_entries: usize,

    /// Maximum idle time before a flow expires
    pub max_age: Duration,
}

impl Default for FlowTableConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Configuration for the input poll interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Poll timeout in milliseconds while nothing is left to read
    pub idle_ms: u64,
}

impl RefreshConfig {
    pub fn new() -> Self {
        Self {
            idle_ms: DEFAULT_IDLE_MS,
        }
    }

    /// Get idle poll interval as Duration
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new()
    }
}
