// Default theme functions
//
// Color helpers shared by the UI panels.

use ratatui::style::Color;

use super::{ALERT_RED, AMBER, LINK_GREEN};

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
///
/// # Arguments
/// * `color1` - Starting color as (r, g, b) tuple
/// * `color2` - Ending color as (r, g, b) tuple
/// * `ratio` - Interpolation ratio (0.0 = color1, 1.0 = color2)
///
/// # Returns
/// Interpolated Color::Rgb value
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// Color for route lines: the sprite color faded toward the background
pub fn route_color() -> Color {
    interpolate_color((23, 29, 33), (119, 172, 181), 0.35)
}

/// Get color for the tick interval based on its value relative to default
///
/// Color coding:
/// - Green (LINK_GREEN): default or slower than default
/// - Amber: faster than default
/// - Red (ALERT_RED): less than half the default interval
///
/// If recently_changed is true, returns a brighter version of the color
///
/// # Arguments
/// * `interval_ms` - Current tick interval in milliseconds
/// * `default_ms` - Default tick interval in milliseconds
/// * `recently_changed` - Whether the value was recently changed (triggers highlight)
pub fn get_refresh_color(interval_ms: u64, default_ms: u64, recently_changed: bool) -> Color {
    let base_color = if interval_ms >= default_ms {
        LINK_GREEN
    } else {
        let ratio = (default_ms - interval_ms) as f32 / default_ms as f32;

        if ratio > 0.5 {
            ALERT_RED
        } else {
            AMBER
        }
    };

    if recently_changed {
        match base_color {
            Color::Rgb(r, g, b) => {
                // Increase brightness by 20%
                let r = ((r as f32 * 1.2).min(255.0)) as u8;
                let g = ((g as f32 * 1.2).min(255.0)) as u8;
                let b = ((b as f32 * 1.2).min(255.0)) as u8;
                Color::Rgb(r, g, b)
            }
            _ => base_color,
        }
    } else {
        base_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_color_endpoints() {
        assert_eq!(interpolate_color((0, 0, 0), (200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(
            interpolate_color((0, 0, 0), (200, 100, 50), 1.0),
            Color::Rgb(200, 100, 50)
        );
        // Out of range ratios are clamped
        assert_eq!(
            interpolate_color((0, 0, 0), (200, 100, 50), 3.0),
            Color::Rgb(200, 100, 50)
        );
    }

    #[test]
    fn test_refresh_color_buckets() {
        assert_eq!(get_refresh_color(33, 33, false), LINK_GREEN);
        assert_eq!(get_refresh_color(500, 33, false), LINK_GREEN);
        assert_eq!(get_refresh_color(23, 33, false), AMBER);
        assert_eq!(get_refresh_color(10, 33, false), ALERT_RED);
    }

    #[test]
    fn test_refresh_color_highlight_is_brighter() {
        match (get_refresh_color(33, 33, false), get_refresh_color(33, 33, true)) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                assert!(r2 >= r1 && g2 >= g1 && b2 >= b1);
                assert_ne!((r1, g1, b1), (r2, g2, b2));
            }
            other => panic!("expected RGB colors, got {:?}", other),
        }
    }
}
