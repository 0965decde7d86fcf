use lolspan::document::LineOffsets;
use lolspan::exclusions::StringExclusion;
use lolspan::{Classifier, Options};

fn names(text: &str) -> Vec<String> {
    Classifier::default()
        .classify(text)
        .iter()
        .map(|s| s.text(text).unwrap().to_string())
        .collect()
}

fn starts(text: &str) -> Vec<usize> {
    Classifier::default().classify(text).iter().map(|s| s.start).collect()
}

#[test]
fn no_declarations_no_spans() {
    let text = "HAI 1.2\nI HAS A foo ITZ 3\nVISIBLE foo\nKTHXBYE";
    assert!(Classifier::default().classify(text).is_empty());
}

#[test]
fn declaration_site_and_every_call_are_highlighted() {
    let text = "HOW IZ I foo\nIF U SAY SO\nI IZ foo MKAY\nfoo";
    assert_eq!(starts(text), [9, 30, 39]);
}

#[test]
fn line_comment_suppresses_only_its_line() {
    let text = "HOW IZ I foo\nBTW calling foo here\nfoo";
    let text_starts = starts(text);
    assert_eq!(text_starts, [9, text.rfind("foo").unwrap()]);
}

#[test]
fn block_comment_suppression_spans_lines() {
    let text = "HOW IZ I foo\nOBTW\nfoo\nTLDR\nfoo";
    assert_eq!(starts(text), [9, text.rfind("foo").unwrap()]);
}

#[test]
fn string_suppression() {
    let text = "HOW IZ I foo\nVISIBLE \"calls foo\"";
    assert_eq!(names(text), ["foo"]);
}

#[test]
fn unterminated_block_comment_hides_the_rest() {
    let text = "HOW IZ I foo\nOBTW\nfoo\nfoo";
    assert_eq!(starts(text), [9]);
}

#[test]
fn declaration_inside_a_comment_still_names_a_function() {
    // the name comes from a commented-out declaration; live calls are still highlighted
    let text = "BTW HOW IZ I ghost\nI IZ ghost MKAY";
    assert_eq!(starts(text), [text.rfind("ghost").unwrap()]);
}

#[test]
fn several_functions_interleave_in_offset_order() {
    let text = "HOW IZ I b\nIF U SAY SO\nHOW DUZ I a\nIF U SAY SO\nI IZ a MKAY AN I IZ b MKAY";
    assert_eq!(names(text), ["b", "a", "a", "b"]);
    let s = starts(text);
    assert!(s.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn classification_is_idempotent() {
    let text = "HOW IZ I foo\nOBTW foo\nTLDR\nI IZ foo MKAY BTW foo\nVISIBLE 'foo'";
    let classifier = Classifier::default();
    assert_eq!(classifier.classify(text), classifier.classify(text));
}

#[test]
fn spans_never_overlap() {
    let text = "HOW IZ I f\nHOW IZ I ff\nHOW IZ I f_f\nf ff f_f f ff\nI IZ f MKAY";
    let spans = Classifier::default().classify(text);
    assert!(!spans.is_empty());
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{pair:?}");
    }
}

#[test]
fn crlf_documents_keep_exact_offsets() {
    let text = "HOW IZ I foo\r\nBTW foo\r\nfoo";
    assert_eq!(starts(text), [9, text.rfind("foo").unwrap()]);
}

#[test]
fn legacy_offsets_reproduce_crlf_drift() {
    // each CRLF line shifts later exclusions two bytes left, so the comment lands on
    // the bytes before the real `BTW` and its `foo` stays highlighted
    let text = "HOW IZ I foo\r\nx\r\nBTW foo";
    let legacy = Classifier::new(Options {
        line_offsets: LineOffsets::Legacy,
        string_exclusion: StringExclusion::ToLineEnd,
    });
    let exact_count = Classifier::default().classify(text).len();
    let legacy_count = legacy.classify(text).len();
    assert_eq!(exact_count, 1);
    assert_eq!(legacy_count, 2);
}

#[test]
fn empty_text_yields_nothing() {
    assert!(Classifier::default().classify("").is_empty());
}
