//! Full-screen rendering of the current and next tanda with `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::render::{CURRENT_HEADER, Highlight, NEXT_HEADER, elapsed_line, tanda_block};
use crate::tanda::{PlaybackState, TrackRecord};

const CONTROLS: &str = "[q/esc] quit";

fn color(highlight: Highlight) -> Color {
    match highlight {
        Highlight::Tango => Color::Red,
        Highlight::Vals => Color::Green,
        Highlight::Milonga => Color::Magenta,
        Highlight::Break => Color::LightCyan,
    }
}

fn padded_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render one tanda into `area`, or a placeholder when there is none.
fn draw_tanda(
    frame: &mut Frame,
    area: Rect,
    tanda: &[TrackRecord],
    highlight: Option<&TrackRecord>,
    header: &str,
    empty_text: &str,
) {
    let Some(block) = tanda_block(tanda, highlight, header) else {
        let placeholder = Paragraph::new(empty_text)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(padded_block(format!(" {header} ")));
        frame.render_widget(placeholder, area);
        return;
    };

    let items: Vec<ListItem> = block
        .lines
        .into_iter()
        .map(|line| match line.highlight {
            Some(h) => ListItem::new(Line::styled(
                line.text,
                Style::default().fg(color(h)).add_modifier(Modifier::BOLD),
            )),
            None => ListItem::new(line.text),
        })
        .collect();

    let list = List::new(items).block(padded_block(format!(" {} ", block.heading)));
    frame.render_widget(list, area);
}

/// Render the whole screen.
///
/// `state` is the last successful segmentation, if any; `status` describes
/// the most recent poll.
pub fn draw(
    frame: &mut Frame,
    state: Option<&PlaybackState>,
    dj: &str,
    elapsed: Duration,
    status: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Percentage(35),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(elapsed_line(dj, elapsed))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tandas ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match state {
        Some(state) => {
            draw_tanda(
                frame,
                chunks[1],
                &state.current_tanda,
                Some(&state.current_track),
                CURRENT_HEADER,
                "",
            );
            draw_tanda(
                frame,
                chunks[2],
                &state.next_tanda,
                None,
                NEXT_HEADER,
                "end of the queue",
            );
        }
        None => {
            draw_tanda(
                frame,
                chunks[1],
                &[],
                None,
                CURRENT_HEADER,
                "waiting for the player...",
            );
            draw_tanda(frame, chunks[2], &[], None, NEXT_HEADER, "");
        }
    }

    let footer_text = if status.is_empty() {
        CONTROLS.to_string()
    } else {
        format!("{status} | {CONTROLS}")
    };
    let footer = Paragraph::new(footer_text)
        .block(padded_block(" status ".to_string()))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
