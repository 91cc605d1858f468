// Header rendering module
//
// Renders the top bar with the simulated clock and replay counters.

use crate::app::Overlay;
use crate::replay::Scene;
use crate::theme::{AMBER, BUBBLE_TEAL, LINK_GREEN, MUTED_TEXT, SIGNAL_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Build the counter spans shown in the header
pub fn header_spans(scene: &Scene<'_>, overlay: &Overlay) -> Vec<Span<'static>> {
    let label = Style::default().fg(MUTED_TEXT);
    let value = Style::default().fg(BUBBLE_TEAL).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(
            " pktreplay ",
            Style::default().fg(SIGNAL_BLUE).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ clock ", label),
        Span::styled(scene.now.to_string(), value),
        Span::styled(" │ waiting ", label),
        Span::styled(scene.backlog.to_string(), value),
        Span::styled(" │ in flight ", label),
        Span::styled(scene.sprites.len().to_string(), value),
        Span::styled(" │ admitted ", label),
        Span::styled(scene.stats.admitted.to_string(), value),
        Span::styled(" │ delivered ", label),
        Span::styled(scene.stats.delivered.to_string(), value),
        Span::raw(" "),
    ];

    if overlay.paused {
        spans.push(Span::styled(
            "[PAUSED]",
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled("[LIVE]", Style::default().fg(LINK_GREEN)));
    }

    spans
}

pub fn render_header(f: &mut Frame, area: Rect, scene: &Scene<'_>, overlay: &Overlay) {
    let header = Paragraph::new(Line::from(header_spans(scene, overlay)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(SIGNAL_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(header, area);
}
