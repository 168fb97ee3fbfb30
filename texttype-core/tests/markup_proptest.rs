//! Property-based tests for the markup pipeline
//!
//! Inputs are built from a small alphabet of markup fragments so that well
//! formed tags, broken tags and plain characters collide often.

use proptest::prelude::*;
use texttype_core::texttype::{
    detokenize, execute, normalize, tokenize, InstantClock, RunSummary, Token, TreeSink,
    TypingOptions,
};

const FRAGMENTS: &[&str] = &[
    "a",
    " ",
    "\n",
    "<",
    ">",
    "/",
    "<b>",
    "</b>",
    "<i>",
    "</i>",
    "<gray>",
    "</gray>",
    "<pause duration=\"7\"/>",
];

const DELETE_FRAGMENTS: &[&str] = &["<delete>", "</delete>"];

fn markup_from(fragments: Vec<&'static str>, len: std::ops::Range<usize>) -> BoxedStrategy<String> {
    prop::collection::vec(prop::sample::select(fragments), len)
        .prop_map(|parts| parts.concat())
        .boxed()
}

/// Markup without delete markers.
fn flat_markup_strategy() -> BoxedStrategy<String> {
    markup_from(FRAGMENTS.to_vec(), 0..24)
}

/// Markup where delete markers may appear, balanced or not.
fn markup_strategy() -> BoxedStrategy<String> {
    let all: Vec<&'static str> = FRAGMENTS.iter().chain(DELETE_FRAGMENTS).copied().collect();
    markup_from(all, 0..32)
}

fn play(markup: &str) -> (TreeSink, RunSummary) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime.block_on(async {
        let tokens = normalize(tokenize(markup));
        let mut sink = TreeSink::new();
        let summary = execute(
            &tokens,
            &mut sink,
            &InstantClock::new(),
            &TypingOptions::steady(),
        )
        .await
        .expect("run completes");
        (sink, summary)
    })
}

proptest! {
    #[test]
    fn tokenize_never_panics(input in "\\PC*") {
        let _tokens = tokenize(&input);
    }

    #[test]
    fn text_without_markers_is_one_token(input in "[^<]*") {
        let tokens = tokenize(&input);
        if input.is_empty() {
            prop_assert!(tokens.is_empty());
        } else {
            prop_assert_eq!(tokens, vec![Token::text(input.clone())]);
        }
    }

    #[test]
    fn canonical_markup_round_trips(input in markup_strategy()) {
        prop_assert_eq!(detokenize(&tokenize(&input)), input);
    }

    #[test]
    fn normalize_is_idempotent(input in markup_strategy()) {
        let once = normalize(tokenize(&input));
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn visible_text_matches_net_typed_units(input in flat_markup_strategy()) {
        let (sink, summary) = play(&input);
        prop_assert_eq!(sink.text().chars().count(), summary.net_units());
    }

    /// Text typed into a scope that erasure detached is counted but not shown.
    #[test]
    fn visible_text_never_exceeds_net_typed_units(input in markup_strategy()) {
        let (sink, summary) = play(&input);
        prop_assert!(sink.text().chars().count() <= summary.net_units());
    }

    #[test]
    fn delete_region_leaves_no_visible_trace(
        prefix in flat_markup_strategy(),
        region in flat_markup_strategy(),
    ) {
        let (before, _) = play(&prefix);
        let (after, summary) = play(&format!("{prefix}<delete>{region}</delete>"));
        prop_assert_eq!(after.text(), before.text());
        prop_assert_eq!(summary.delete_regions, 1);
    }
}
