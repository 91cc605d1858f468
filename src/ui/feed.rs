// Event feed rendering module
//
// Renders the list of most recently admitted packet events, newest at the
// top, with the tick at which each one was recorded.

use crate::replay::{Event, Scene};
use crate::theme::{AMBER, BUBBLE_TEAL, MUTED_TEXT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

/// Format one feed line: `t=<tick>  src → dst`
pub fn format_event(event: &Event) -> String {
    format!(
        "t={}  {} → {}",
        event.timestamp(),
        event.source(),
        event.destination()
    )
}

pub fn render_feed(f: &mut Frame, area: Rect, scene: &Scene<'_>) {
    // Only as many rows as fit inside the borders
    let rows = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = scene
        .recent()
        .take(rows)
        .enumerate()
        .map(|(idx, event)| {
            // Newest entry is highlighted
            let color = if idx == 0 { BUBBLE_TEAL } else { MUTED_TEXT };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:2}.", idx + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", format_event(event)), Style::default().fg(color)),
            ]))
        })
        .collect();

    let title = format!("━ Recent Packets ({}) ", scene.stats.admitted);

    let feed = List::new(items).block(
        Block::default()
            .title(vec![
                Span::styled(
                    title,
                    Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
                ),
                Span::styled("━━━━━━━", Style::default().fg(AMBER)),
            ])
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(AMBER)),
    );

    f.render_widget(feed, area);
}
