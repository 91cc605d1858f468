// Stage rendering module
//
// Renders the replay canvas: node rectangles with centered labels, optional
// route lines for packets in flight, and the packet sprites themselves.
// Scene coordinates have y growing downward; the canvas has y growing
// upward, so every point is flipped against the top of the stage.

use crate::app::Overlay;
use crate::replay::{Extent, Point, Scene};
use crate::theme::{route_color, BUBBLE_TEAL, MUTED_TEXT, SIGNAL_BLUE, SLATE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Empty space kept around the outermost nodes, in scene units
const STAGE_MARGIN: f64 = 50.0;

/// Stage size used when there are no nodes to measure
const EMPTY_STAGE: Extent = Extent {
    width: 100.0,
    height: 100.0,
};

/// Symbol printed at every sprite position
const SPRITE_SYMBOL: &str = "●";

/// Canvas x and y bounds for a scene whose nodes cover `bounds`
///
/// Falls back to a fixed square when the nodes have no area.
pub fn stage_bounds(bounds: Extent) -> ([f64; 2], [f64; 2]) {
    let extent = if bounds.width <= 0.0 || bounds.height <= 0.0 {
        EMPTY_STAGE
    } else {
        bounds
    };
    (
        [0.0, extent.width + STAGE_MARGIN],
        [0.0, extent.height + STAGE_MARGIN],
    )
}

/// Map a scene point onto the canvas by flipping the y axis
///
/// # Arguments
/// * `point` - Point in scene space (y grows downward)
/// * `y_max` - Upper y bound of the canvas
pub fn to_canvas(point: Point, y_max: f64) -> (f64, f64) {
    (point.x, y_max - point.y)
}

/// Canvas x coordinate at which `label` must start to be centered on `center_x`
///
/// # Arguments
/// * `center_x` - Horizontal center in canvas units
/// * `label` - Text to print
/// * `cell_width` - Canvas units covered by one terminal column
pub fn centered_label_x(center_x: f64, label: &str, cell_width: f64) -> f64 {
    center_x - (label.width() as f64 * cell_width) / 2.0
}

/// Whether a sprite of `size` is wide enough to be drawn as a circle
/// rather than a single symbol
pub fn sprite_fits_circle(size: f64, cell_width: f64) -> bool {
    size / 2.0 >= cell_width
}

pub fn render_stage(f: &mut Frame, area: Rect, scene: &Scene<'_>, overlay: &Overlay) {
    // Split: summary line + canvas
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled(" ◆ ", Style::default().fg(BUBBLE_TEAL)),
        Span::styled(
            format!(
                "Nodes: {} | In flight: {} | Waiting: {}",
                scene.nodes.len(),
                scene.sprites.len(),
                scene.backlog
            ),
            Style::default().fg(MUTED_TEXT),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SIGNAL_BLUE))
            .title(vec![Span::styled(
                "━ Packet Stage ━",
                Style::default()
                    .fg(SIGNAL_BLUE)
                    .add_modifier(Modifier::BOLD),
            )]),
    );
    f.render_widget(summary, chunks[0]);

    let (x_bounds, y_bounds) = stage_bounds(scene.bounds);
    let y_max = y_bounds[1];
    let inner_width = chunks[1].width.saturating_sub(2).max(1) as f64;
    let cell_width = (x_bounds[1] - x_bounds[0]) / inner_width;

    // Capture values for closure
    let nodes = scene.nodes;
    let sprites = scene.sprites;
    let sprite_size = scene.sprite_size;
    let labels_enabled = overlay.settings.labels_enabled;
    let draw_routes = overlay.settings.routes_enabled && !overlay.detail_reduced;
    let draw_circles = sprite_fits_circle(sprite_size, cell_width);
    let replay_done = scene.backlog == 0 && sprites.is_empty();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SIGNAL_BLUE)),
        )
        .background_color(SLATE)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            // Route lines go first so everything else sits on top
            if draw_routes {
                let color = route_color();
                for sprite in sprites {
                    let (x1, y1) = to_canvas(sprite.from(), y_max);
                    let (x2, y2) = to_canvas(sprite.to(), y_max);
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    });
                }
            }

            for node in nodes {
                let position = node.position();
                let extent = node.extent();
                // Rectangle wants the bottom-left corner in canvas space
                let (x, top) = to_canvas(position, y_max);
                ctx.draw(&Rectangle {
                    x,
                    y: top - extent.height,
                    width: extent.width,
                    height: extent.height,
                    color: BUBBLE_TEAL,
                });

                if labels_enabled {
                    let (cx, cy) = to_canvas(node.anchor(), y_max);
                    ctx.print(
                        centered_label_x(cx, node.name(), cell_width),
                        cy,
                        Span::styled(
                            node.name().to_string(),
                            Style::default()
                                .fg(BUBBLE_TEAL)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            }

            ctx.layer();

            for sprite in sprites {
                let (x, y) = to_canvas(sprite.position(), y_max);
                if draw_circles {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: sprite_size / 2.0,
                        color: BUBBLE_TEAL,
                    });
                } else {
                    ctx.print(
                        x,
                        y,
                        Span::styled(SPRITE_SYMBOL, Style::default().fg(BUBBLE_TEAL)),
                    );
                }
            }

            if nodes.is_empty() {
                let message = "(no nodes configured)";
                ctx.print(
                    centered_label_x(x_bounds[1] / 2.0, message, cell_width),
                    y_max / 2.0,
                    Span::styled(
                        message,
                        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
                    ),
                );
            } else if replay_done {
                let message = "Replay complete, the clock keeps ticking...";
                ctx.print(
                    centered_label_x(x_bounds[1] / 2.0, message, cell_width),
                    STAGE_MARGIN / 2.0,
                    Span::styled(
                        message,
                        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
                    ),
                );
            }
        });

    f.render_widget(canvas, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_bounds_adds_margin() {
        let (x, y) = stage_bounds(Extent::new(900.0, 550.0));
        assert_eq!(x, [0.0, 950.0]);
        assert_eq!(y, [0.0, 600.0]);
    }

    #[test]
    fn test_stage_bounds_empty_falls_back() {
        let (x, y) = stage_bounds(Extent::default());
        assert_eq!(x, [0.0, EMPTY_STAGE.width + STAGE_MARGIN]);
        assert_eq!(y, [0.0, EMPTY_STAGE.height + STAGE_MARGIN]);
    }

    #[test]
    fn test_to_canvas_flips_y() {
        assert_eq!(to_canvas(Point::new(150.0, 125.0), 600.0), (150.0, 475.0));
        assert_eq!(to_canvas(Point::new(0.0, 0.0), 600.0), (0.0, 600.0));
        assert_eq!(to_canvas(Point::new(0.0, 600.0), 600.0), (0.0, 0.0));
    }

    #[test]
    fn test_centered_label_x() {
        // "s1" is two cells wide, each cell 10 units
        assert_eq!(centered_label_x(150.0, "s1", 10.0), 140.0);
        assert_eq!(centered_label_x(150.0, "", 10.0), 150.0);
    }

    #[test]
    fn test_centered_label_uses_display_width() {
        // Wide characters take two cells each
        assert_eq!(centered_label_x(100.0, "服务", 5.0), 90.0);
    }

    #[test]
    fn test_sprite_fits_circle() {
        assert!(sprite_fits_circle(10.0, 5.0));
        assert!(sprite_fits_circle(10.0, 4.0));
        assert!(!sprite_fits_circle(10.0, 8.0));
    }
}
