//! Player screen layout
//!
//! - Title bar (1 line, only when the slide has a title and titles are shown)
//! - Typed text (remaining space, wrapped)
//! - Status line (1 line)

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use texttype_config::ViewerConfig;
use texttype_core::texttype::{Slide, Style as TextStyle};

/// Used when the configured gray is not `#rrggbb`.
const FALLBACK_GRAY: Color = Color::DarkGray;

/// Where the player is within the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    WaitingForKey,
    Advancing,
    Done,
}

/// Everything on screen except the typed text itself.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub title: Option<String>,
    pub position: usize,
    pub total: usize,
    pub cursor: String,
    pub gray: Color,
}

impl Chrome {
    pub fn new(slide: &Slide, index: usize, total: usize, viewer: &ViewerConfig) -> Self {
        let title = (viewer.show_title && !slide.title.is_empty()).then(|| slide.title.clone());
        let gray = viewer
            .gray_rgb()
            .map_or(FALLBACK_GRAY, |(r, g, b)| Color::Rgb(r, g, b));
        Self {
            title,
            position: index + 1,
            total,
            cursor: viewer.cursor.clone(),
            gray,
        }
    }
}

pub fn render(frame: &mut Frame, chrome: &Chrome, spans: &[(char, TextStyle)], phase: Phase) {
    let title_height = if chrome.title.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    if let Some(title) = &chrome.title {
        render_title_bar(frame, chunks[0], title);
    }
    render_text(frame, chunks[1], chrome, spans, phase);
    render_status_line(frame, chunks[2], chrome, phase);
}

fn render_title_bar(frame: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new(title.to_string()).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn render_text(
    frame: &mut Frame,
    area: Rect,
    chrome: &Chrome,
    spans: &[(char, TextStyle)],
    phase: Phase,
) {
    let mut lines = styled_lines(spans, chrome.gray);
    if phase != Phase::Done && !chrome.cursor.is_empty() {
        let cursor = Span::styled(
            chrome.cursor.clone(),
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        );
        match lines.last_mut() {
            Some(line) => line.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, chrome: &Chrome, phase: Phase) {
    let hint = match phase {
        Phase::Typing => "q to stop",
        Phase::WaitingForKey => "Space for next slide, q to quit",
        Phase::Advancing => "next slide shortly, q to quit",
        Phase::Done => "end, any key to exit",
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{}/{}", chrome.position, chrome.total),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(hint, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Split typed characters into lines of same-style spans.
pub fn styled_lines(spans: &[(char, TextStyle)], gray: Color) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = TextStyle::default();

    for &(ch, style) in spans {
        if ch == '\n' {
            flush(&mut current, &mut run, run_style, gray);
            lines.push(Line::from(std::mem::take(&mut current)));
            continue;
        }
        if style != run_style {
            flush(&mut current, &mut run, run_style, gray);
            run_style = style;
        }
        run.push(ch);
    }
    flush(&mut current, &mut run, run_style, gray);
    if !current.is_empty() || !lines.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}

fn flush(line: &mut Vec<Span<'static>>, run: &mut String, style: TextStyle, gray: Color) {
    if !run.is_empty() {
        line.push(Span::styled(std::mem::take(run), to_ratatui(style, gray)));
    }
}

fn to_ratatui(style: TextStyle, gray: Color) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.gray {
        out = out.fg(gray);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn plain(text: &str) -> Vec<(char, TextStyle)> {
        text.chars().map(|ch| (ch, TextStyle::default())).collect()
    }

    fn chrome(title: Option<&str>) -> Chrome {
        Chrome {
            title: title.map(str::to_string),
            position: 2,
            total: 3,
            cursor: "|".into(),
            gray: Color::Rgb(1, 2, 3),
        }
    }

    fn screen(chrome: &Chrome, spans: &[(char, TextStyle)], phase: Phase) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).expect("terminal");
        terminal
            .draw(|frame| render(frame, chrome, spans, phase))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        (0..5u16)
            .map(|y| {
                (0..40u16)
                    .filter_map(|x| buffer.cell((x, y)))
                    .map(|cell| cell.symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn groups_runs_by_style() {
        let bold = TextStyle::default().with(texttype_core::texttype::ScopeTag::Bold);
        let spans = vec![
            ('a', TextStyle::default()),
            ('b', bold),
            ('c', bold),
            ('\n', bold),
            ('d', TextStyle::default()),
        ];
        let lines = styled_lines(&spans, Color::Gray);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].content, "bc");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(lines[1].spans[0].content, "d");
    }

    #[test]
    fn gray_uses_the_configured_color() {
        let gray = TextStyle::default().with(texttype_core::texttype::ScopeTag::Gray);
        let lines = styled_lines(&[('x', gray)], Color::Rgb(1, 2, 3));
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn trailing_newline_starts_an_empty_line() {
        let lines = styled_lines(&plain("a\n"), Color::Gray);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].spans.is_empty());
    }

    #[test]
    fn renders_title_text_cursor_and_status() {
        let rows = screen(&chrome(Some("Intro")), &plain("hi"), Phase::Typing);
        assert_eq!(rows[0], "Intro");
        assert_eq!(rows[1], "hi|");
        assert_eq!(rows[4], "2/3 | q to stop");
    }

    #[test]
    fn cursor_is_hidden_once_done() {
        let rows = screen(&chrome(None), &plain("hi"), Phase::Done);
        assert_eq!(rows[0], "hi");
        assert!(rows[4].ends_with("any key to exit"));
    }

    #[test]
    fn empty_text_still_shows_the_cursor() {
        let rows = screen(&chrome(None), &[], Phase::Typing);
        assert_eq!(rows[0], "|");
    }
}
