//! The breathing orb.
//!
//! A circle that swells on inhales, shrinks on exhales, and sits slightly
//! enlarged during holds, with the whole-second countdown at its center.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::Frame;

use respire_core::{BreathCue, PhaseKind};

const MIN_SCALE: f64 = 0.85;
const MAX_SCALE: f64 = 1.25;
const HOLD_SCALE: f64 = 1.1;

/// Orb radius for a phase at `progress` through it, in the 0.85..=1.25
/// band the canvas is scaled to.
pub fn orb_scale(kind: PhaseKind, progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    match kind {
        PhaseKind::Breathe {
            cue: BreathCue::Inhale,
            ..
        } => MIN_SCALE + (MAX_SCALE - MIN_SCALE) * progress,
        PhaseKind::Breathe {
            cue: BreathCue::Exhale,
            ..
        } => MIN_SCALE + (MAX_SCALE - MIN_SCALE) * (1.0 - progress),
        PhaseKind::Hold => HOLD_SCALE,
    }
}

/// Seconds shown inside the orb: the ceiling of what remains, floored at
/// zero so the display never flashes a negative.
pub fn display_secs(remaining_secs: f64) -> u64 {
    remaining_secs.ceil().max(0.0) as u64
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    kind: PhaseKind,
    progress: f64,
    remaining_secs: f64,
    color: Color,
    unicode: bool,
) {
    let scale = orb_scale(kind, progress);
    let seconds = display_secs(remaining_secs);
    let marker = if unicode { Marker::Braille } else { Marker::Dot };
    let canvas = Canvas::default()
        .marker(marker)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.6, 1.6])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: scale,
                color,
            });
            ctx.print(
                0.0,
                0.0,
                Line::styled(seconds.to_string(), Style::default().fg(color).bold()),
            );
        });
    frame.render_widget(canvas, area);
}
