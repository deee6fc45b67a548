//! HTML output, one complete page per change.

use super::{CURRENT_HEADER, Highlight, NEXT_HEADER, TandaBlock, View, elapsed_line, tanda_block};

pub const DEFAULT_STYLESHEET: &str =
    "body { background-color: #F8E0A9; padding: 10px; font-size: 20px;}";

fn css_color(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Tango => "red",
        Highlight::Vals => "green",
        Highlight::Milonga => "purple",
        Highlight::Break => "cyan",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_block(out: &mut String, block: &TandaBlock) {
    out.push_str("<div class=\"tanda\">\n");
    out.push_str(&format!("<h3>{}</h3>\n", escape(&block.heading)));
    for line in &block.lines {
        match line.highlight {
            Some(h) => out.push_str(&format!(
                "<span style=\"font-weight: bold;color:{}\">{}</span><br/>\n",
                css_color(h),
                escape(&line.text)
            )),
            None => out.push_str(&format!("<span>{}</span><br/>\n", escape(&line.text))),
        }
    }
    out.push_str("</div>\n");
}

/// Render the view as a standalone HTML page styled with `stylesheet`.
pub fn render_html(view: &View<'_>, stylesheet: &str) -> String {
    let state = view.state;
    let mut out = String::new();

    out.push_str("<html><head>\n");
    out.push_str(&format!(
        "<style type=\"text/css\">{}</style>\n",
        stylesheet
    ));
    out.push_str("</head><body>\n");

    if let Some(block) = tanda_block(
        &state.current_tanda,
        Some(&state.current_track),
        CURRENT_HEADER,
    ) {
        push_block(&mut out, &block);
    }
    if let Some(block) = tanda_block(&state.next_tanda, None, NEXT_HEADER) {
        push_block(&mut out, &block);
    }

    out.push_str(&format!(
        "<h5>{}</h5>\n",
        escape(&elapsed_line(view.dj, view.elapsed))
    ));
    out.push_str("</body></html>");
    out
}
