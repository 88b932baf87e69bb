use stormtype::normalize::matcher::{
    best_match, classify_all, compute_similarity_matrix, MinSimilarity,
};
use stormtype::normalize::preprocess::{default_rules, Preprocessor};
use stormtype::normalize::similarity::{Osa, SimilarityMetric};
use stormtype::{Category, Normalizer, QualityReport, ReferenceTaxonomy};

fn normalizer(entries: &[&str], min: f64) -> Normalizer {
    Normalizer::new(
        Preprocessor::new(default_rules().unwrap()),
        ReferenceTaxonomy::new(entries.iter().copied()).unwrap(),
        Box::new(Osa),
        MinSimilarity::new(min).unwrap(),
    )
}

#[test]
fn tstm_wind_expands_to_exact_match() {
    for min in [0.0, 0.4, 0.9, 1.0] {
        let n = normalizer(&["Tornado", "Flood", "Thunderstorm Wind"], min);
        let result = n.normalize(&["TSTM WIND"]);
        let a = &result["TSTM WIND"];
        assert_eq!(a.preprocessed.to_uppercase(), "THUNDERSTORM WIND");
        assert_eq!(a.confidence, 1.0);
        assert_eq!(a.category, Category::Matched("Thunderstorm Wind".into()));
    }
}

#[test]
fn fldg_expands_to_flood() {
    let n = normalizer(&["Tornado", "Flood"], 0.4);
    let result = n.normalize(&["FLDG"]);
    assert_eq!(result["FLDG"].preprocessed, "Flood");
    assert_eq!(result["FLDG"].category, Category::Matched("Flood".into()));
    assert_eq!(result["FLDG"].confidence, 1.0);
}

#[test]
fn unrelated_label_goes_to_other() {
    let n = normalizer(&["Tornado", "Flood"], 0.4);
    let result = n.normalize(&["XYZZY UNKNOWN EVENT"]);
    let a = &result["XYZZY UNKNOWN EVENT"];
    assert_eq!(a.category, Category::Fallback);
    assert_eq!(a.category.to_string(), "Other");
    assert!(a.confidence < 0.4, "confidence {}", a.confidence);
}

#[test]
fn exact_tie_resolves_to_earliest_taxonomy_entry() {
    // "HALE" is one substitution away from both "HALO" and "HALT".
    let taxonomy = ReferenceTaxonomy::new(["Halt", "Halo", "Tornado"]).unwrap();
    let matrix = compute_similarity_matrix(&["HALE"], &taxonomy, &Osa);
    assert_eq!(matrix.row(0)[0], matrix.row(0)[1]);
    assert_eq!(best_match(matrix.row(0), &taxonomy), ("Halt", 0.75));

    let min = MinSimilarity::new(0.4).unwrap();
    let result = classify_all(&["HALE"], &taxonomy, &Osa, min);
    assert_eq!(result["HALE"].category, Category::Matched("Halt".into()));
}

#[test]
fn identical_strings_score_one() {
    assert_eq!(Osa.similarity("TORNADO", "TORNADO"), 1.0);
}

#[test]
fn clean_labels_pass_through_preprocessing() {
    let pre = Preprocessor::new(default_rules().unwrap());
    for label in stormtype::taxonomy::STORM_EVENT_TYPES {
        assert_eq!(pre.apply(label), label);
    }
}

#[test]
fn builtin_taxonomy_end_to_end() {
    let n = Normalizer::new(
        Preprocessor::new(default_rules().unwrap()),
        ReferenceTaxonomy::storm_events(),
        Box::new(Osa),
        MinSimilarity::new(0.4).unwrap(),
    );
    let records = [
        "TORNADO",
        "TSTM WIND",
        "TSTM WIND",
        "TSTM WIND",
        "HAIL",
        "FLASH FLOOD",
        "FLASH FLD",
        "HEAVY SNOW",
        "?",
    ];
    let assignments = n.normalize(&records);
    assert_eq!(assignments.len(), 7);
    assert_eq!(assignments["TSTM WIND"].category, Category::Matched("Thunderstorm Wind".into()));
    assert_eq!(assignments["FLASH FLD"].category, Category::Matched("Flash Flood".into()));
    assert_eq!(assignments["HEAVY SNOW"].category, Category::Matched("Heavy Snow".into()));
    assert_eq!(assignments["?"].category, Category::Fallback);

    let quality = QualityReport::build(&records, &assignments);
    assert_eq!(quality.total_records, 9);
    assert_eq!(quality.fallback_records, 1);
    assert_eq!(quality.categories[0].category, Category::Matched("Thunderstorm Wind".into()));
    assert_eq!(quality.categories[0].records, 3);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let labels = ["TSTM WIND", "HAIL 1.75", "FLD", "WINTER STORM", "nonsense"];
    let n = normalizer(&["Hail", "Flood", "Thunderstorm Wind", "Winter Storm"], 0.4);
    let first = serde_json::to_string(&n.normalize(&labels)).unwrap();
    let second = serde_json::to_string(&n.normalize(&labels)).unwrap();
    assert_eq!(first, second);
}
