//! Tokenizer behavior on authored markup.

use rstest::rstest;
use texttype_core::texttype::{detokenize, normalize, tokenize, ScopeTag, Token};

fn text(value: &str) -> Token {
    Token::text(value)
}

#[rstest]
#[case::double_quotes_self_closing("<pause duration=\"300\"/>")]
#[case::bare_value_spaced_close("<pause duration=300 />")]
#[case::spaced_equals_single_quotes_extra_attr("<pause   duration = '300' extra=\"z\">")]
#[case::attribute_after_other_attribute("<pause kind=\"long\" duration=\"300\">")]
#[case::newline_inside_tag("<pause\n  duration=\"300\"\n/>")]
#[case::non_ascii_after_name("<pauseé duration=300>")]
fn pause_syntaxes_are_equivalent(#[case] markup: &str) {
    assert_eq!(tokenize(markup), vec![Token::pause(300)]);
}

#[rstest]
#[case::no_duration("<pause/>", vec![text("<"), text("pause/>")])]
#[case::non_numeric("<pause duration=\"soon\"/>", vec![text("<"), text("pause duration=\"soon\"/>")])]
#[case::unterminated("<pause duration=5", vec![text("<"), text("pause duration=5")])]
#[case::negative("<pause duration=-5>", vec![text("<"), text("pause duration=-5>")])]
#[case::longer_name("<pause_x duration=5>", vec![text("<"), text("pause_x duration=5>")])]
fn malformed_pause_degrades_to_text(#[case] markup: &str, #[case] expected: Vec<Token>) {
    assert_eq!(tokenize(markup), expected);
}

#[rstest]
#[case::open_only("a<delete>b", vec![text("a"), text("<delete>"), text("b")])]
#[case::open_at_end("a<delete>", vec![text("a"), text("<delete>")])]
#[case::close_only("a</delete>b", vec![text("a</delete>b")])]
fn unmatched_delete_degrades_to_text(#[case] markup: &str, #[case] expected: Vec<Token>) {
    assert_eq!(tokenize(markup), expected);
}

#[test]
fn nested_delete_has_nested_inner() {
    assert_eq!(
        tokenize("<delete><delete>x</delete>y</delete>"),
        vec![Token::delete(vec![Token::delete(vec![text("x")]), text("y")])]
    );
}

#[test]
fn scope_tags_are_case_sensitive() {
    assert_eq!(tokenize("<B>x</B>"), vec![text("<B>x</B>")]);
}

#[test]
fn realistic_slide_body() {
    let markup = "Hello, <b>world</b>!<pause duration=\"400\"/>\n\
                  <delete><gray>typo</gray></delete>\n\
                  <i>Fixed</i>.";
    let tokens = normalize(tokenize(markup));
    assert_eq!(
        tokens,
        vec![
            text("Hello, "),
            Token::start(ScopeTag::Bold),
            text("world"),
            Token::end(ScopeTag::Bold),
            text("!"),
            Token::pause(400),
            text("\n"),
            Token::delete(vec![
                Token::start(ScopeTag::Gray),
                text("typo"),
                Token::end(ScopeTag::Gray),
            ]),
            Token::start(ScopeTag::Italic),
            text("Fixed"),
            Token::end(ScopeTag::Italic),
            text("."),
        ]
    );
}

#[test]
fn canonical_markup_round_trips() {
    let markup = "a<b>b</b><delete>c<pause duration=\"9\"/></delete>d<gray>e</gray>";
    assert_eq!(detokenize(&tokenize(markup)), markup);
}

#[test]
fn line_break_only_text_after_region_does_not_end_suppression() {
    let once = normalize(tokenize("<delete>a</delete>\n<b>\nX"));
    assert_eq!(
        once,
        vec![
            Token::delete(vec![text("a")]),
            Token::start(ScopeTag::Bold),
            text("X"),
        ]
    );
    assert_eq!(normalize(once.clone()), once);
}
