//! Integration tests for legal entity extraction with the built-in catalog

use lexmask::domain::{EntityType, InvalidInputError, LegalEntity, LexmaskError};
use lexmask::extraction::{EntityExtractor, PatternCatalog, PatternExtractor};
use test_case::test_case;

const JUDGMENT: &str = "The appellant was convicted under Section 302 r/w Section 34 of the \
Indian Penal Code, 1860. Relying on Kesavananda Bharati v. State of Kerala, AIR 1973 SC 1461, \
and (2017) 10 SCC 1, the Court held that Article 21 of the Constitution of India protects \
privacy. The trial court had framed issues under Order VII Rule 11 of the CPC and the accused \
was also charged u/s 138 of the N.I. Act. See also 2023 INSC 512 and Sections 3, 4 and 5 of \
the IT Act.";

fn extractor() -> PatternExtractor {
    PatternExtractor::new().unwrap()
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

fn find<'a>(entities: &'a [LegalEntity], text: &str) -> &'a LegalEntity {
    entities
        .iter()
        .find(|e| e.entity == text)
        .unwrap_or_else(|| panic!("no entity {text:?} in {entities:#?}"))
}

#[test]
fn test_statute_reference_scenario() {
    let text = "Under Section 420 of Indian Penal Code, 1860";
    let entities = extractor().extract(text, 0.70).unwrap();

    assert_eq!(entities.len(), 2);

    let section = &entities[0];
    assert_eq!(section.entity, "Section 420");
    assert_eq!(section.entity_type, EntityType::Section);
    assert!((0.85..=0.90).contains(&section.confidence), "{}", section.confidence);

    let act = &entities[1];
    assert_eq!(act.entity, "Indian Penal Code, 1860");
    assert_eq!(act.entity_type, EntityType::Act);
    assert!((act.confidence - 0.95).abs() < 1e-6, "{}", act.confidence);
}

#[test]
fn test_bare_abbreviation_scenario() {
    let entities = extractor().extract("as per IPC guidelines", 0.70).unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity, "IPC");
    assert_eq!(entities[0].entity_type, EntityType::Act);
    assert!(
        (0.78..=0.83).contains(&entities[0].confidence),
        "{}",
        entities[0].confidence
    );
}

#[test]
fn test_judgment_entities() {
    let entities = extractor().extract(JUDGMENT, 0.70).unwrap();

    assert_eq!(find(&entities, "Section 302").entity_type, EntityType::Section);
    assert_eq!(find(&entities, "Indian Penal Code, 1860").entity_type, EntityType::Act);
    assert_eq!(find(&entities, "AIR 1973 SC 1461").entity_type, EntityType::CaseCitation);
    assert_eq!(find(&entities, "(2017) 10 SCC 1").entity_type, EntityType::CaseCitation);
    assert_eq!(find(&entities, "Article 21").entity_type, EntityType::Article);
    assert_eq!(find(&entities, "Constitution of India").entity_type, EntityType::Act);
    assert_eq!(find(&entities, "Order VII Rule 11").entity_type, EntityType::Order);
    assert_eq!(find(&entities, "2023 INSC 512").entity_type, EntityType::CaseCitation);
    assert_eq!(find(&entities, "IT Act").entity_type, EntityType::Act);
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = extractor();
    let first = extractor.extract(JUDGMENT, 0.0).unwrap();
    for _ in 0..5 {
        assert_eq!(extractor.extract(JUDGMENT, 0.0).unwrap(), first);
    }
}

#[test_case(JUDGMENT ; "english judgment")]
#[test_case("न्यायालय ने Section 420 और Article 14 का उल्लेख किया।" ; "devanagari prefix")]
#[test_case("“Section 9” of the Arbitration and Conciliation Act, 1996 — see AIR 2005 SC 3180" ; "curly quotes and dashes")]
fn test_offsets_are_char_offsets(text: &str) {
    let entities = extractor().extract(text, 0.0).unwrap();
    assert!(!entities.is_empty());
    let char_len = text.chars().count();

    for entity in &entities {
        assert!(entity.start_idx < entity.end_idx);
        assert!(entity.end_idx <= char_len);
        assert_eq!(char_slice(text, entity.start_idx, entity.end_idx), entity.entity);
    }
}

#[test]
fn test_confidence_bounds() {
    let catalog = PatternCatalog::default_catalog().unwrap();
    let entities = extractor().extract(JUDGMENT, 0.0).unwrap();

    for entity in &entities {
        let lowest_base = catalog
            .rules()
            .iter()
            .filter(|rule| rule.entity_type == entity.entity_type)
            .filter(|rule| {
                rule.regex
                    .find(&entity.entity)
                    .is_some_and(|m| m.start() == 0 && m.end() == entity.entity.len())
            })
            .map(|rule| rule.base_confidence)
            .fold(f32::INFINITY, f32::min);

        assert!(lowest_base.is_finite(), "no rule produces {:?}", entity.entity);
        assert!(entity.confidence >= lowest_base - 1e-6, "{entity:?}");
        assert!(entity.confidence <= 0.95 + 1e-6, "{entity:?}");
    }
}

#[test_case(0.0)]
#[test_case(0.80)]
#[test_case(0.90)]
#[test_case(0.95)]
#[test_case(1.0)]
fn test_threshold_filter(threshold: f32) {
    let entities = extractor().extract(JUDGMENT, threshold).unwrap();
    assert!(entities.iter().all(|e| e.confidence >= threshold));
}

#[test]
fn test_higher_threshold_returns_subset() {
    let extractor = extractor();
    let all = extractor.extract(JUDGMENT, 0.0).unwrap();
    let strict = extractor.extract(JUDGMENT, 0.9).unwrap();
    assert!(strict.len() <= all.len());
    assert!(strict.iter().all(|e| all.contains(e)));
}

#[test]
fn test_no_overlaps_and_sorted() {
    let entities = extractor().extract(JUDGMENT, 0.0).unwrap();
    for pair in entities.windows(2) {
        assert!(pair[0].start_idx <= pair[1].start_idx);
        assert!(
            pair[0].end_idx <= pair[1].start_idx,
            "overlap: {:?} / {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_long_document_scales_linearly() {
    // 440 KB with 20k abbreviation matches that each need the whole-document expansion check
    let repeats = 20_000;
    let text = "Indian Penal Code IPC ".repeat(repeats);

    let started = std::time::Instant::now();
    let entities = extractor().extract(&text, 0.0).unwrap();
    let elapsed = started.elapsed();

    let abbreviations: Vec<&LegalEntity> = entities.iter().filter(|e| e.entity == "IPC").collect();
    assert_eq!(abbreviations.len(), repeats);
    assert!(abbreviations
        .iter()
        .all(|e| (e.confidence - abbreviations[0].confidence).abs() < 1e-6));
    for pair in entities.windows(2) {
        assert!(pair[0].end_idx <= pair[1].start_idx);
    }
    assert!(
        elapsed < std::time::Duration::from_secs(30),
        "extraction took {elapsed:?}"
    );
}

#[test]
fn test_empty_text() {
    assert!(extractor().extract("", 0.5).unwrap().is_empty());
}

#[test_case(-0.1 ; "negative")]
#[test_case(1.01 ; "above one")]
#[test_case(f32::NAN ; "nan")]
fn test_invalid_threshold(threshold: f32) {
    let err = extractor().extract("Section 420", threshold).unwrap_err();
    assert!(matches!(
        err,
        LexmaskError::InvalidInput(InvalidInputError::ThresholdOutOfRange { .. })
    ));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_custom_catalog_replaces_builtin() {
    let catalog = PatternCatalog::from_toml(
        r#"
version = "test-1"

[[rules]]
name = "rera"
pattern = '\bRERA\b'
entity_type = "act"
base_confidence = 0.81
"#,
    )
    .unwrap();
    let extractor = PatternExtractor::with_catalog(std::sync::Arc::new(catalog), Default::default())
        .unwrap();

    let entities = extractor.extract("Section 420 and RERA", 0.0).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity, "RERA");
}

#[test]
fn test_uncompilable_catalog_is_configuration_error() {
    let err = PatternCatalog::from_toml(
        r#"
version = "broken"

[[rules]]
name = "bad"
pattern = '(unclosed'
entity_type = "act"
base_confidence = 0.5
"#,
    )
    .unwrap_err();
    assert!(matches!(err, LexmaskError::Configuration(_)));
}
