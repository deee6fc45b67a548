//! ANSI text output: clear the screen, print both tandas and the clock.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};

use super::{CURRENT_HEADER, Highlight, NEXT_HEADER, TandaBlock, View, elapsed_line, tanda_block};

fn color(highlight: Highlight) -> Color {
    match highlight {
        Highlight::Tango => Color::DarkRed,
        Highlight::Vals => Color::DarkGreen,
        Highlight::Milonga => Color::DarkMagenta,
        Highlight::Break => Color::Cyan,
    }
}

fn push_block(out: &mut Vec<String>, block: TandaBlock) {
    out.push(block.heading);
    for line in block.lines {
        match line.highlight {
            Some(h) => out.push(line.text.with(color(h)).bold().to_string()),
            None => out.push(line.text),
        }
    }
}

/// Render the view as colored text, one entry per terminal line.
pub fn render_text(view: &View<'_>) -> String {
    let state = view.state;
    let mut out: Vec<String> = Vec::new();

    if let Some(block) = tanda_block(
        &state.current_tanda,
        Some(&state.current_track),
        CURRENT_HEADER,
    ) {
        push_block(&mut out, block);
    }

    if let Some(block) = tanda_block(&state.next_tanda, None, NEXT_HEADER) {
        out.push(String::new());
        push_block(&mut out, block);
    }

    out.push(String::new());
    out.push(
        elapsed_line(view.dj, view.elapsed)
            .with(Color::Magenta)
            .bold()
            .to_string(),
    );

    out.join("\n")
}

/// Clear the terminal and print the view.
pub fn redraw_text(out: &mut impl Write, view: &View<'_>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}", render_text(view))?;
    out.flush()
}
