//! Splitting a document into slides.
//!
//! A slide starts at every line whose trimmed text begins with the header
//! marker (case-insensitive). The trimmed header line becomes the slide title
//! and the lines up to the next header become its body.

use serde::Serialize;

/// Header marker used by the presentation decks this format came from.
pub const DEFAULT_SLIDE_MARKER: &str = "СЛАЙД";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Trimmed header line, empty for content before the first header.
    pub title: String,
    /// Body markup, lines joined with `\n`.
    pub body: String,
}

#[derive(Default)]
struct SlideBuilder {
    title: String,
    body_lines: Vec<String>,
    has_content: bool,
}

impl SlideBuilder {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Slides with neither a title nor any non-blank line are dropped.
    fn finish(self) -> Option<Slide> {
        if !self.has_content && self.title.is_empty() {
            return None;
        }
        Some(Slide {
            title: self.title,
            body: self.body_lines.join("\n"),
        })
    }
}

/// Split `raw` into slides at lines starting with `marker`.
///
/// An empty marker disables splitting: the whole text is one untitled slide.
pub fn parse_slides(raw: &str, marker: &str) -> Vec<Slide> {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let marker = marker.to_lowercase();

    let mut slides = Vec::new();
    let mut current = SlideBuilder::default();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if !marker.is_empty() && trimmed.to_lowercase().starts_with(&marker) {
            let finished = std::mem::replace(&mut current, SlideBuilder::titled(trimmed));
            slides.extend(finished.finish());
        } else {
            current.body_lines.push(line.to_string());
            if !trimmed.is_empty() {
                current.has_content = true;
            }
        }
    }
    slides.extend(current.finish());

    slides
}
