// Application state management
//
// This module contains the AppState render loop state machine and re-exports
// configuration types from the config submodule.

pub mod config;
pub mod event;

pub use config::{FlowTableConfig, RefreshConfig};

use crate::capture::{CaptureError, Frame, FrameSource};
use crate::flow::{rank, FlowTable, RankedRow};
use crate::net::{ClassifyOutcome, Classifier};
use crate::ui::DisplayError;
use config::{CONTENT_BORDER_ROWS, HEADER_HEIGHT, MIN_HEIGHT, MIN_WIDTH, STATUS_HEIGHT};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Render loop phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames remain in the capture
    Reading,
    /// Capture exhausted; the final view stays up until quit
    Drained,
    /// User asked to quit
    Terminated,
}

/// Per-frame outcome tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub read: u64,
    pub malformed: u64,
    pub unsupported: u64,
}

/// Main application state
pub struct AppState {
    /// Current loop phase
    pub state: LoopState,

    source: Box<dyn FrameSource>,
    classifier: Classifier,

    /// Live flows, exclusively mutated by `on_tick`
    pub flows: FlowTable,

    /// Frame tallies shown in the status pane
    pub stats: FrameStats,

    /// Ranked rows currently on screen
    pub rows: Vec<RankedRow>,

    /// Rows that fit in the content pane
    pub visible_rows: usize,

    /// Index of the first ranked row on screen
    pub scroll: usize,

    /// Set when the capture ended on a read failure instead of end of stream
    pub read_error: Option<String>,

    pub refresh_config: RefreshConfig,
}

impl AppState {
    pub fn new(source: Box<dyn FrameSource>, table_config: FlowTableConfig) -> Self {
        let classifier = Classifier::new(source.link());
        Self {
            state: LoopState::Reading,
            source,
            classifier,
            flows: FlowTable::new(table_config),
            stats: FrameStats::default(),
            rows: Vec::new(),
            visible_rows: 0,
            scroll: 0,
            read_error: None,
            refresh_config: RefreshConfig::new(),
        }
    }

    pub fn running(&self) -> bool {
        self.state != LoopState::Terminated
    }

    /// How long the input poll may wait this tick
    ///
    /// Zero while frames remain so input never blocks reading.
    pub fn poll_timeout(&self) -> Duration {
        match self.state {
            LoopState::Reading => Duration::ZERO,
            LoopState::Drained | LoopState::Terminated => self.refresh_config.idle_interval(),
        }
    }

    /// Pull at most one frame, fold it into the table, and re-rank
    pub fn on_tick(&mut self) {
        if self.state == LoopState::Reading {
            match self.source.next_frame() {
                Ok(Some(frame)) => self.ingest(frame),
                Ok(None) => self.drain(None),
                Err(e) => self.drain(Some(e)),
            }
        }
        self.refresh_rows();
    }

    fn ingest(&mut self, frame: Frame) {
        self.stats.read += 1;

        match self.classifier.classify(&frame.data) {
            Ok((key, len)) => self.flows.touch(key, len as u64, frame.timestamp),
            Err(ClassifyOutcome::Malformed(reason)) => {
                self.stats.malformed += 1;
                warn!(len = frame.data.len(), error = %reason, "failed to read packet");
            }
            Err(ClassifyOutcome::Unsupported) => {
                self.stats.unsupported += 1;
            }
        }
    }

    fn drain(&mut self, error: Option<CaptureError>) {
        if let Some(e) = error {
            warn!(error = %e, "capture read failed, no further frames");
            self.read_error = Some(e.to_string());
        }
        self.state = LoopState::Drained;
        info!(
            packets = self.stats.read,
            malformed = self.stats.malformed,
            unsupported = self.stats.unsupported,
            flows = self.flows.len(),
            max_flows = self.flows.config().max_entries,
            "capture drained"
        );
    }

    /// Recompute the visible page from a fresh snapshot
    pub fn refresh_rows(&mut self) {
        self.clamp_scroll();
        let ranked = rank(self.flows.snapshot(), self.scroll + self.visible_rows);
        self.rows = ranked.into_iter().skip(self.scroll).collect();
    }

    /// Recompute layout geometry for a new terminal size
    pub fn on_resize(&mut self, width: u16, height: u16) -> Result<(), DisplayError> {
        debug!("screen size {} x {}", height, width);
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(DisplayError::TooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        self.visible_rows = (height - HEADER_HEIGHT - STATUS_HEIGHT - CONTENT_BORDER_ROWS) as usize;
        self.refresh_rows();
        Ok(())
    }

    pub fn quit(&mut self) {
        self.state = LoopState::Terminated;
    }

    /// Status pane text for the current phase
    pub fn status_text(&self) -> String {
        match (self.state, &self.read_error) {
            (LoopState::Reading, _) => format!("Read {} packets", self.stats.read),
            (_, Some(e)) => format!("No more packets ({}).", e),
            (_, None) => "No more packets.".to_string(),
        }
    }

    fn max_scroll(&self) -> usize {
        self.flows.len().saturating_sub(self.visible_rows)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.refresh_rows();
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        self.refresh_rows();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.refresh_rows();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
        self.refresh_rows();
    }
}
