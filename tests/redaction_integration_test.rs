//! Integration tests for span redaction and span producers

use lexmask::domain::{ExternalSpan, InvalidInputError, LexmaskError};
use lexmask::redaction::{
    mask_spans, GazetteerSpanProducer, SpanModel, SpanProducer, SpanRedactor, StaticSpanProducer,
    DEFAULT_MASK_LABELS,
};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_case::test_case;

fn span(label: &str, start: usize, end: usize) -> ExternalSpan {
    ExternalSpan::new(label, start, end)
}

#[test]
fn test_single_judge_span() {
    let result = SpanRedactor::default()
        .mask("Justice Sharma heard the case", &[span("JUDGE", 0, 14)])
        .unwrap();
    assert_eq!(result.masked_text, "[REDACTED] heard the case");
    assert_eq!(result.entities_masked, 1);
}

#[test]
fn test_two_party_spans() {
    let result = SpanRedactor::default()
        .mask(
            "Alice vs Bob",
            &[span("PETITIONER", 0, 5), span("RESPONDENT", 9, 12)],
        )
        .unwrap();
    assert_eq!(result.masked_text, "[REDACTED] vs [REDACTED]");
    assert_eq!(result.entities_masked, 2);
}

#[test]
fn test_span_order_does_not_matter() {
    let redactor = SpanRedactor::default();
    let text = "Alice vs Bob before Justice Rao";
    let spans = vec![
        span("PETITIONER", 0, 5),
        span("RESPONDENT", 9, 12),
        span("JUDGE", 20, 31),
    ];
    let mut reversed = spans.clone();
    reversed.reverse();

    let forward = redactor.mask(text, &spans).unwrap();
    let backward = redactor.mask(text, &reversed).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.masked_text, "[REDACTED] vs [REDACTED] before [REDACTED]");
}

#[test]
fn test_content_outside_spans_preserved() {
    let text = "In re: Mr. Arjun Mehta (Petitioner), represented by Adv. Kavya Iyer, against Acme Textiles.";
    let chars: Vec<char> = text.chars().collect();
    let locate = |needle: &str| {
        let byte = text.find(needle).unwrap();
        let start = text[..byte].chars().count();
        (start, start + needle.chars().count())
    };
    let (p_start, p_end) = locate("Arjun Mehta");
    let (l_start, l_end) = locate("Kavya Iyer");
    let (o_start, o_end) = locate("Acme Textiles");

    let result = SpanRedactor::default()
        .mask(
            text,
            &[
                span("PETITIONER", p_start, p_end),
                span("LAWYER", l_start, l_end),
                span("ORG", o_start, o_end),
            ],
        )
        .unwrap();

    let segment = |a: usize, b: usize| chars[a..b].iter().collect::<String>();
    let expected = format!(
        "{}[REDACTED]{}[REDACTED]{}[REDACTED]{}",
        segment(0, p_start),
        segment(p_end, l_start),
        segment(l_end, o_start),
        segment(o_end, chars.len())
    );
    assert_eq!(result.masked_text, expected);
    assert_eq!(result.entities_masked, 3);
}

#[test]
fn test_unlisted_labels_untouched() {
    let result = SpanRedactor::default()
        .mask(
            "Section 420 was invoked against Ravi",
            &[span("STATUTE", 0, 11), span("OTHER_PERSON", 32, 36)],
        )
        .unwrap();
    assert_eq!(result.masked_text, "Section 420 was invoked against [REDACTED]");
    assert_eq!(result.entities_masked, 1);
}

#[test]
fn test_empty_span_list() {
    let text = "Nothing to hide here";
    let result = SpanRedactor::default().mask(text, &[]).unwrap();
    assert_eq!(result.masked_text, text);
    assert_eq!(result.entities_masked, 0);
}

#[test]
fn test_multibyte_text() {
    let text = "श्री राम बनाम राज्य";
    let result = SpanRedactor::default()
        .mask(text, &[span("PETITIONER", 5, 8)])
        .unwrap();
    assert_eq!(result.masked_text, "श्री [REDACTED] बनाम राज्य");
}

#[test_case(span("JUDGE", 0, 99) ; "end past text")]
#[test_case(span("JUDGE", 30, 30) ; "start past text")]
fn test_out_of_bounds_rejected(bad: ExternalSpan) {
    let err = SpanRedactor::default()
        .mask("Justice Sharma", &[span("JUDGE", 0, 7), bad])
        .unwrap_err();
    assert!(matches!(
        err,
        LexmaskError::InvalidInput(InvalidInputError::SpanOutOfBounds { .. })
    ));
}

#[test]
fn test_inverted_span_rejected() {
    let err = SpanRedactor::default()
        .mask("Justice Sharma", &[span("JUDGE", 8, 2)])
        .unwrap_err();
    assert!(matches!(
        err,
        LexmaskError::InvalidInput(InvalidInputError::InvertedSpan { .. })
    ));
}

#[test]
fn test_custom_labels_and_token() {
    let labels: HashSet<String> = ["WITNESS".to_string()].into_iter().collect();
    let result = mask_spans(
        "PW-1 Meena deposed",
        &[span("WITNESS", 5, 10), span("JUDGE", 0, 4)],
        &labels,
        "<W>",
    )
    .unwrap();
    assert_eq!(result.masked_text, "PW-1 <W> deposed");
    assert_eq!(result.entities_masked, 1);
}

#[test]
fn test_default_labels() {
    assert_eq!(DEFAULT_MASK_LABELS.len(), 7);
    let redactor = SpanRedactor::default();
    for label in DEFAULT_MASK_LABELS {
        assert!(redactor.allowed_labels().contains(*label));
    }
}

#[test]
fn test_static_producer_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"label": "JUDGE", "start_char": 0, "end_char": 14}}]"#
    )
    .unwrap();

    let producer = StaticSpanProducer::from_json_file(file.path()).unwrap();
    let model = SpanModel::ready(Arc::new(producer));
    let spans = model.label_spans("Justice Sharma heard the case").unwrap();

    let result = SpanRedactor::default()
        .mask("Justice Sharma heard the case", &spans)
        .unwrap();
    assert_eq!(result.masked_text, "[REDACTED] heard the case");
}

#[test_case(r#"[{"label": "JUDGE", "start_char": -1, "end_char": 3}]"# ; "negative start")]
#[test_case(r#"[{"label": "JUDGE", "start_char": 0}]"# ; "missing end")]
#[test_case(r#"{"label": "JUDGE", "start_char": 0, "end_char": 3}"# ; "not a list")]
#[test_case("[{" ; "truncated json")]
fn test_malformed_span_list_is_invalid_input(content: &str) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();

    let err = StaticSpanProducer::from_json_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        LexmaskError::InvalidInput(InvalidInputError::MalformedSpans { .. })
    ));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_gazetteer_feeds_redactor() {
    let mut entries = BTreeMap::new();
    entries.insert("JUDGE".to_string(), vec!["Justice Sharma".to_string()]);
    entries.insert("PETITIONER".to_string(), vec!["Ramesh Kumar".to_string()]);
    let producer = GazetteerSpanProducer::new(&entries).unwrap();

    let text = "ramesh kumar appeared before Justice Sharma; Justice Sharmaji did not.";
    let spans = producer.label_spans(text).unwrap();
    assert_eq!(spans.len(), 2);

    let result = SpanRedactor::default().mask(text, &spans).unwrap();
    assert_eq!(
        result.masked_text,
        "[REDACTED] appeared before [REDACTED]; Justice Sharmaji did not."
    );
}

#[test]
fn test_model_not_loaded_is_distinct_error() {
    let err = SpanModel::not_loaded().label_spans("Alice vs Bob").unwrap_err();
    assert!(matches!(err, LexmaskError::SpanProducerUnavailable(_)));
    assert_eq!(err.exit_code(), 4);
}
