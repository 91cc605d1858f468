// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts, toggle indicators
// and the current tick interval.

use crate::app::{Overlay, DEFAULT_REFRESH_MS};
use crate::theme::{get_refresh_color, LINK_GREEN, MUTED_TEXT, SIGNAL_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_status_bar(f: &mut Frame, area: Rect, overlay: &Overlay) {
    // Pause hint depends on current state
    let pause_hint = if overlay.paused {
        "Resume | "
    } else {
        "Pause | "
    };

    // Calculate available width for hints (subtract borders and icon)
    let available_width = area.width.saturating_sub(4);

    // Define all hints with priority levels
    struct Hint {
        priority: u8,
        key: &'static str,
        desc: String,
        color: Color,
    }

    let hints = vec![
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit ".to_string(),
            color: Color::Red,
        },
        Hint {
            priority: 1,
            key: "Space:",
            desc: pause_hint.to_string(),
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 2,
            key: "N:",
            desc: "Step | ".to_string(),
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 2,
            key: "+/-:",
            desc: "Speed | ".to_string(),
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 3,
            key: "t:",
            desc: "Labels | ".to_string(),
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 3,
            key: "r:",
            desc: "Routes | ".to_string(),
            color: SIGNAL_BLUE,
        },
    ];

    // Build status text, adding hints until we run out of space
    let mut spans = vec![Span::styled(" ▶ ", Style::default().fg(SIGNAL_BLUE))];

    let mut current_length = 4;

    // Process hints by priority
    for priority in 1..=3 {
        for hint in &hints {
            if hint.priority == priority {
                let hint_length = hint.key.len() + hint.desc.len();
                if current_length + hint_length <= available_width as usize {
                    spans.push(Span::styled(
                        hint.key,
                        Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(hint.desc.clone()));
                    current_length += hint_length;
                }
            }
        }
    }

    // Toggle and speed indicators are always shown
    spans.push(Span::raw(" "));
    spans.extend(build_toggle_indicators(overlay));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(SIGNAL_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Build toggle status indicator spans for the status bar
/// Shows [t:ON/OFF] [r:ON/OFF] [tick:Nms] with appropriate colors
pub fn build_toggle_indicators(overlay: &Overlay) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let toggles = [
        ("[t:", overlay.settings.labels_enabled),
        ("[r:", overlay.settings.routes_enabled),
    ];
    for (prefix, enabled) in toggles {
        let (state, color) = if enabled {
            ("ON", LINK_GREEN)
        } else {
            ("OFF", MUTED_TEXT)
        };
        spans.push(Span::styled(prefix, Style::default().fg(MUTED_TEXT)));
        spans.push(Span::styled(
            state,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("] ", Style::default().fg(MUTED_TEXT)));
    }

    // Route lines switched on but suppressed by slow frames
    if overlay.settings.routes_enabled && overlay.detail_reduced {
        spans.push(Span::styled("[reduced] ", Style::default().fg(Color::Yellow)));
    }

    let tick_color = get_refresh_color(
        overlay.refresh_ms,
        DEFAULT_REFRESH_MS,
        overlay.refresh_recently_changed,
    );
    spans.push(Span::styled("[tick:", Style::default().fg(MUTED_TEXT)));
    spans.push(Span::styled(
        format!("{}ms", overlay.refresh_ms),
        Style::default().fg(tick_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("]", Style::default().fg(MUTED_TEXT)));

    spans
}
