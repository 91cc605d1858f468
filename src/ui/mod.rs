// UI rendering module
//
// This module contains all terminal rendering components for pktreplay.
// The main draw() function orchestrates rendering of all UI panels, and
// TerminalRenderer plugs it into the replay as its Renderer.

mod feed;
mod header;
mod stage;
mod status_bar;

use crate::app::Overlay;
use crate::replay::{Renderer, Scene};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

use feed::render_feed;
use header::render_header;
use stage::render_stage;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, scene: &Scene<'_>, overlay: &Overlay) {
    let size = f.area();

    // Main layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(f, chunks[0], scene, overlay);

    // Body: stage + event feed
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Stage
            Constraint::Percentage(30), // Feed
        ])
        .split(chunks[1]);

    render_stage(f, body_chunks[0], scene, overlay);
    render_feed(f, body_chunks[1], scene);

    render_status_bar(f, chunks[2], overlay);
}

/// Draws every replay frame into a ratatui terminal
pub struct TerminalRenderer<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    overlay: Overlay,
}

impl<'t, B: Backend> TerminalRenderer<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, overlay: Overlay) -> Self {
        Self { terminal, overlay }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<'_, B> {
    type Error = io::Error;

    fn render(&mut self, scene: &Scene<'_>) -> Result<(), Self::Error> {
        let overlay = &self.overlay;
        self.terminal.draw(|f| draw(f, scene, overlay))?;
        Ok(())
    }
}
