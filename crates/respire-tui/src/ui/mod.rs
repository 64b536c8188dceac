//! Screen rendering.

pub mod theme;
pub mod visualizer;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table};
use ratatui::Frame;

use respire_core::{dates, Clock, KeyValueStore, Phase, PhaseKind, SessionLog, SessionState};

use crate::app::{App, View};
use theme::Theme;

pub fn draw<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme, unicode: bool)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    match app.view() {
        View::Sanctuary => draw_sanctuary(frame, app, theme),
        View::Calibration => draw_calibration(frame, app, theme),
        View::Session => draw_session(frame, app, theme, unicode),
    }
}

// ── Sanctuary ────────────────────────────────────────────────────────

fn draw_sanctuary<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let area = centered_rect(60, 80, frame.area());
    let profile = app.profile();

    let pause_value = match profile.baseline_secs() {
        Some(secs) => dates::format_seconds(f64::from(secs)),
        None => "-".to_string(),
    };
    let measured = dates::describe_date(profile.last_calibration(), dates::today());
    let measured_line = match (&measured, profile.baseline_secs()) {
        (Some(when), _) => format!("Measured {when}"),
        (None, None) => "Calibrate your relaxed pause to begin.".to_string(),
        (None, Some(_)) => String::new(),
    };

    let streak = profile.streak();
    let day_word = if streak == 1 { "day" } else { "days" };

    let mut lines = vec![
        Line::from(""),
        Line::styled("R E S P I R E", Style::default().fg(theme.dim)),
        Line::from(""),
        Line::styled(
            "Sanctuary",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Drift into calm, measure your breath, and train your resilience.",
            Style::default().fg(theme.dim),
        ),
        Line::from(""),
        Line::from(""),
        Line::styled("LAST RELAXED PAUSE", Style::default().fg(theme.dim)),
        Line::styled(
            pause_value,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(measured_line, Style::default().fg(theme.dim)),
        Line::from(""),
        Line::styled("STREAK", Style::default().fg(theme.dim)),
        Line::styled(
            format!("{streak} {day_word}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled("SESSIONS COMPLETED", Style::default().fg(theme.dim)),
        Line::styled(
            app.session_count().to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];

    if let Some(notice) = app.notice() {
        lines.push(Line::styled(
            notice.to_string(),
            Style::default().fg(theme.accent),
        ));
        lines.push(Line::from(""));
    }

    lines.push(hint_line(
        theme,
        if profile.is_calibrated() {
            &[
                ("s", "start today's session"),
                ("c", "recalibrate"),
                ("q", "quit"),
            ]
        } else {
            &[("c", "calibrate your breathing"), ("q", "quit")]
        },
    ));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered_block(" Sanctuary ", theme));
    frame.render_widget(widget, area);
}

// ── Calibration ──────────────────────────────────────────────────────

fn draw_calibration<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let area = centered_rect(60, 80, frame.area());
    let stopwatch = app.stopwatch();

    let hints: &[(&str, &str)] = if stopwatch.is_running() {
        &[("space", "stop")]
    } else if stopwatch.elapsed_secs() > 0.0 {
        &[
            ("enter", "save relaxed pause"),
            ("r", "reset"),
            ("esc", "back"),
        ]
    } else {
        &[("space", "start"), ("esc", "back")]
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            "Relaxed Pause Calibration",
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Breathe normally, exhale gently, then start the timer. Hold until",
            Style::default().fg(theme.dim),
        ),
        Line::styled(
            "the first gentle urge to inhale and stop when you sense it.",
            Style::default().fg(theme.dim),
        ),
        Line::from(""),
        Line::from(""),
        Line::styled("TIMER", Style::default().fg(theme.dim)),
        Line::styled(
            stopwatch.display_time(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Saving overwrites your previous relaxed pause and updates",
            Style::default().fg(theme.dim),
        ),
        Line::styled(
            "today's measurement.",
            Style::default().fg(theme.dim),
        ),
        Line::from(""),
        hint_line(theme, hints),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered_block(" Relaxed Pause Calibration ", theme));
    frame.render_widget(widget, area);
}

// ── Session ──────────────────────────────────────────────────────────

fn draw_session<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme, unicode: bool)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let Some(engine) = app.engine() else {
        return;
    };
    match engine.state() {
        SessionState::Idle => draw_blueprint(frame, app, theme),
        SessionState::Running => draw_running(frame, app, theme, unicode),
        SessionState::Finished => draw_finished(frame, app, theme),
    }
}

fn draw_blueprint<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let Some(engine) = app.engine() else {
        return;
    };
    let plan = engine.plan();
    let area = centered_rect(60, 85, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(inset(area, 2, 1));

    frame.render_widget(bordered_block(" CO2 Tolerance Session ", theme), area);

    let intro = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            "Alternate two paced breathing cycles with progressive holds",
            Style::default().fg(theme.dim),
        ),
        Line::styled(
            "based on your relaxed pause.",
            Style::default().fg(theme.dim),
        ),
        Line::from(""),
        Line::styled(
            format!(
                "Session Blueprint -- relaxed pause {}",
                dates::format_seconds(f64::from(plan.baseline_secs()))
            ),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(intro, chunks[0]);

    let rows: Vec<Row> = plan
        .blueprint()
        .into_iter()
        .map(|summary| {
            Row::new(vec![
                summary.round.to_string(),
                format!("{}s", summary.breathe_secs),
                format!("{}s", summary.hold_secs),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Round", "Breathe", "Hold"]).style(Style::default().fg(theme.dim)),
    )
    .column_spacing(3);
    frame.render_widget(table, centered_columns(chunks[1], 32));

    frame.render_widget(
        Paragraph::new(hint_line(theme, &[("enter", "begin session"), ("esc", "back")]))
            .alignment(Alignment::Center),
        chunks[2],
    );
}

fn draw_running<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme, unicode: bool)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let Some(engine) = app.engine() else {
        return;
    };
    let Some(phase) = engine.current_phase().copied() else {
        return;
    };
    let area = centered_rect(60, 90, frame.area());
    frame.render_widget(bordered_block(" CO2 Tolerance Session ", theme), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(9),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inset(area, 2, 1));

    let color = phase_color(&phase, theme);
    let header = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            format!("ROUND {} OF {}", phase.round, engine.plan().rounds()),
            Style::default().fg(theme.dim),
        ),
        Line::styled(
            phase.label().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    visualizer::render(
        frame,
        chunks[1],
        phase.kind,
        engine.progress(),
        engine.remaining_secs(),
        color,
        unicode,
    );

    let caption = match phase.kind {
        PhaseKind::Breathe { cycle, .. } => format!("Cycle {cycle} of 2"),
        PhaseKind::Hold => "Stay calm, breathe in gently when ready.".to_string(),
    };
    let detail = Paragraph::new(vec![
        Line::styled(
            format!("{} - {}s", phase.label().to_uppercase(), phase.duration_secs),
            Style::default().fg(theme.dim),
        ),
        Line::styled(caption, Style::default().fg(theme.dim)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(detail, chunks[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(engine.progress().clamp(0.0, 1.0))
        .label(Span::styled(
            format!("{}s", visualizer::display_secs(engine.remaining_secs())),
            Style::default().fg(theme.text),
        ));
    let bottom = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(chunks[3]);
    frame.render_widget(gauge, bottom[0]);
    frame.render_widget(
        Paragraph::new(hint_line(theme, &[("esc", "stop session")]))
            .alignment(Alignment::Center),
        bottom[2],
    );
}

fn draw_finished<S, C>(frame: &mut Frame, app: &App<S, C>, theme: &Theme)
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    let area = centered_rect(60, 70, frame.area());
    let streak = app.profile().streak();
    let day_word = if streak == 1 { "day" } else { "days" };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::styled(
            "Session complete",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "A quiet nervous system is a practiced one.",
            Style::default().fg(theme.dim),
        ),
        Line::styled(
            "Come back tomorrow to continue your streak.",
            Style::default().fg(theme.dim),
        ),
        Line::from(""),
        Line::styled(
            format!("Streak: {streak} {day_word}"),
            Style::default().fg(theme.text),
        ),
        Line::from(""),
        hint_line(theme, &[("enter", "return to sanctuary")]),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered_block(" CO2 Tolerance Session ", theme));
    frame.render_widget(widget, area);
}

// ── Helpers ──────────────────────────────────────────────────────────

fn phase_color(phase: &Phase, theme: &Theme) -> ratatui::style::Color {
    match phase.kind {
        PhaseKind::Breathe { .. } => theme.breathe,
        PhaseKind::Hold => theme.hold,
    }
}

fn bordered_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
}

fn hint_line(theme: &Theme, hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  •  ", Style::default().fg(theme.dim)));
        }
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(theme.dim),
        ));
    }
    Line::from(spans)
}

/// Center a `percent_x` by `percent_y` box inside `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Shrink a rect by a horizontal and vertical margin.
fn inset(r: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: r.x.saturating_add(horizontal),
        y: r.y.saturating_add(vertical),
        width: r.width.saturating_sub(horizontal * 2),
        height: r.height.saturating_sub(vertical * 2),
    }
}

/// A `width`-wide column centered inside `r`.
fn centered_columns(r: Rect, width: u16) -> Rect {
    let w = width.min(r.width);
    Rect {
        x: r.x + (r.width - w) / 2,
        y: r.y,
        width: w,
        height: r.height,
    }
}
