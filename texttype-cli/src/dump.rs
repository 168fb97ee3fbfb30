//! Non-interactive output formats.
//!
//! Each works on the selected slides in order and returns the full text to
//! print, so tests can check it without a process boundary.

use crate::error::CliError;
use serde::Serialize;
use texttype_core::texttype::{
    detokenize, execute, normalize, tokenize, InstantClock, Slide, Token, TreeSink,
    TypingOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Markup,
    TokenJson,
    TokenYaml,
    TokenSimple,
    Final,
}

impl DumpFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "markup" => Some(DumpFormat::Markup),
            "token-json" => Some(DumpFormat::TokenJson),
            "token-yaml" => Some(DumpFormat::TokenYaml),
            "token-simple" => Some(DumpFormat::TokenSimple),
            "final" => Some(DumpFormat::Final),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct SlideTokens<'a> {
    title: &'a str,
    tokens: Vec<Token>,
}

fn slide_tokens(slide: &Slide) -> Vec<Token> {
    normalize(tokenize(&slide.body))
}

pub async fn render(
    format: DumpFormat,
    slides: &[Slide],
    options: &TypingOptions,
) -> Result<String, CliError> {
    let output = match format {
        DumpFormat::TokenJson => {
            let mut json = serde_json::to_string_pretty(&serializable(slides))?;
            json.push('\n');
            json
        }
        DumpFormat::TokenYaml => serde_yaml::to_string(&serializable(slides))?,
        DumpFormat::Markup => per_slide(slides, |slide| detokenize(&slide_tokens(slide))),
        DumpFormat::TokenSimple => per_slide(slides, |slide| {
            slide_tokens(slide)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        }),
        DumpFormat::Final => {
            let mut finals = Vec::with_capacity(slides.len());
            for slide in slides {
                finals.push(final_text(slide, options).await);
            }
            let mut finals = finals.into_iter();
            per_slide(slides, |_| finals.next().unwrap_or_default())
        }
    };
    Ok(output)
}

fn serializable(slides: &[Slide]) -> Vec<SlideTokens<'_>> {
    slides
        .iter()
        .map(|slide| SlideTokens {
            title: &slide.title,
            tokens: slide_tokens(slide),
        })
        .collect()
}

/// Titled blocks separated by blank lines.
fn per_slide(slides: &[Slide], mut body: impl FnMut(&Slide) -> String) -> String {
    let mut out = String::new();
    for (index, slide) in slides.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if !slide.title.is_empty() {
            out.push_str(&slide.title);
            out.push('\n');
        }
        out.push_str(&body(slide));
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// What stays on screen once the slide has finished typing.
async fn final_text(slide: &Slide, options: &TypingOptions) -> String {
    let mut sink = TreeSink::new();
    let clock = InstantClock::new();
    match execute(&slide_tokens(slide), &mut sink, &clock, options).await {
        Ok(_) => sink.text(),
        // no cancel token is involved here
        Err(err) => {
            tracing::warn!(%err, "final text run stopped early");
            sink.text()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texttype_core::texttype::{parse_slides, DEFAULT_SLIDE_MARKER};

    fn slides(raw: &str) -> Vec<Slide> {
        parse_slides(raw, DEFAULT_SLIDE_MARKER)
    }

    #[tokio::test]
    async fn markup_is_normalized() {
        let out = render(
            DumpFormat::Markup,
            &slides("a<delete>x</delete>\nb"),
            &TypingOptions::steady(),
        )
        .await
        .unwrap();
        assert_eq!(out, "a<delete>x</delete>b\n");
    }

    #[tokio::test]
    async fn final_text_per_slide() {
        let raw = "СЛАЙД 1\nHi <delete>there</delete>you\nСЛАЙД 2\n<b>bold</b>";
        let out = render(DumpFormat::Final, &slides(raw), &TypingOptions::steady())
            .await
            .unwrap();
        assert_eq!(out, "СЛАЙД 1\nHi you\n\nСЛАЙД 2\nbold\n");
    }

    #[tokio::test]
    async fn token_json_lists_slides() {
        let out = render(
            DumpFormat::TokenJson,
            &slides("<pause duration=5/>"),
            &TypingOptions::steady(),
        )
        .await
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["title"], "");
        assert_eq!(value[0]["tokens"][0]["type"], "pause");
        assert_eq!(value[0]["tokens"][0]["duration_ms"], 5);
    }

    #[tokio::test]
    async fn token_simple_uses_display_forms() {
        let out = render(
            DumpFormat::TokenSimple,
            &slides("<b>x</b>"),
            &TypingOptions::steady(),
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            format!(
                "{} {} {}\n",
                Token::start(texttype_core::texttype::ScopeTag::Bold),
                Token::text("x"),
                Token::end(texttype_core::texttype::ScopeTag::Bold)
            )
        );
    }

    #[test]
    fn format_names() {
        assert_eq!(DumpFormat::from_name("final"), Some(DumpFormat::Final));
        assert_eq!(DumpFormat::from_name("play"), None);
    }
}
