use nightowl_core::models::language::Language;
use nightowl_instruments::catalog::{OptionCatalog, resolution_order};
use nightowl_instruments::error::{CatalogError, CatalogIssue};
use serde_json::json;

fn issues(value: serde_json::Value) -> Vec<CatalogIssue> {
    match OptionCatalog::from_value(value) {
        Err(CatalogError::Invalid(issues)) => issues,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn embedded_catalog_is_valid() {
    let catalog = OptionCatalog::embedded().unwrap();
    let languages: Vec<_> = catalog.languages().collect();
    assert_eq!(languages, vec![Language::En, Language::Hi, Language::Mr]);

    for language in Language::ALL {
        assert!(catalog.title(language).is_some());
        assert_eq!(catalog.questions(language).count(), 49);
    }
}

#[test]
fn resolution_order_ends_with_default_language() {
    assert_eq!(resolution_order(Language::Hi).collect::<Vec<_>>(), vec![Language::Hi, Language::En]);
    assert_eq!(resolution_order(Language::En).collect::<Vec<_>>(), vec![Language::En]);
}

#[test]
fn resolve_prefers_active_language_then_falls_back() {
    let catalog = OptionCatalog::from_value(json!({
        "en": { "Q": {
            "F1": { "opts": ["Never", "Daily"] },
            "F2": { "opts": ["None", "Weekly"] }
        }},
        "hi": { "Q": {
            "F1": { "opts": ["कभी नहीं", "रोज़"] },
            "F2": { "opts": [] }
        }}
    }))
    .unwrap();

    let f1 = catalog.resolve(Language::Hi, "F1").unwrap();
    assert_eq!(f1.language, Language::Hi);
    assert_eq!(f1.code_of("रोज़"), Some(2));

    let f2 = catalog.resolve(Language::Hi, "F2").unwrap();
    assert_eq!(f2.language, Language::En);

    let mr = catalog.resolve(Language::Mr, "F1").unwrap();
    assert_eq!(mr.language, Language::En);

    assert!(catalog.resolve(Language::En, "F9").is_none());
    assert!(catalog.labels(Language::Hi, "F2").is_none());
}

#[test]
fn prompts_and_titles_fall_back_to_default_language() {
    let catalog = OptionCatalog::from_value(json!({
        "en": {
            "title": "Survey",
            "sections": { "A": "Section A" },
            "Q": { "A1": { "q": "Age?", "opts": ["Young", "Old"] } }
        },
        "mr": { "Q": { "A1": { "opts": ["तरुण", "वृद्ध"] } } }
    }))
    .unwrap();

    assert_eq!(catalog.prompt(Language::Mr, "A1"), Some("Age?"));
    assert_eq!(catalog.title(Language::Mr), Some("Survey"));
    assert_eq!(catalog.section_title(Language::Mr, "A"), Some("Section A"));
    assert_eq!(catalog.section_title(Language::Mr, "Z"), None);
}

#[test]
fn unsupported_languages_are_skipped() {
    let catalog = OptionCatalog::from_value(json!({
        "en": { "Q": { "F1": { "opts": ["Never"] } } },
        "fr": { "Q": { "F1": { "opts": ["Jamais", "Toujours"] } } }
    }))
    .unwrap();
    assert_eq!(catalog.languages().collect::<Vec<_>>(), vec![Language::En]);
}

#[test]
fn missing_default_language_is_rejected() {
    let found = issues(json!({ "hi": { "Q": {} } }));
    assert_eq!(found, vec![CatalogIssue::MissingDefaultLanguage(Language::En)]);
}

#[test]
fn length_mismatch_across_languages_is_rejected() {
    let found = issues(json!({
        "en": { "Q": { "F3": { "opts": ["Very active", "Sedentary"] } } },
        "hi": { "Q": { "F3": { "opts": ["बहुत सक्रिय"] } } }
    }));
    assert!(matches!(
        found.as_slice(),
        [CatalogIssue::LengthMismatch { language: Language::Hi, expected: 2, actual: 1, .. }]
    ));
}

#[test]
fn every_label_problem_is_reported() {
    let found = issues(json!({
        "en": { "Q": {
            "B6": { "opts": ["Always", "Always", " Never", ""] }
        }},
        "mr": { "Q": { "B99": { "opts": ["नेहमी"] } } }
    }));

    assert_eq!(found.len(), 4);
    assert!(found.iter().any(|i| matches!(i, CatalogIssue::DuplicateLabel { label, .. } if label == "Always")));
    assert!(found.iter().any(|i| matches!(i, CatalogIssue::UntrimmedLabel { label, .. } if label == " Never")));
    assert!(found.iter().any(|i| matches!(i, CatalogIssue::EmptyLabel { position: 4, .. })));
    assert!(found.iter().any(|i| matches!(i, CatalogIssue::NotInDefault { language: Language::Mr, .. })));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        OptionCatalog::from_json_str("{ not json"),
        Err(CatalogError::Json(_))
    ));
    assert!(matches!(
        OptionCatalog::from_value(json!({ "en": { "Q": { "F1": { "opts": "Never" } } } })),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = OptionCatalog::from_path("/nonexistent/translations.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/translations.json"));
}

#[test]
fn invalid_catalog_error_displays_without_issues() {
    let empty = CatalogError::Invalid(Vec::new());
    assert_eq!(empty.to_string(), "invalid option catalog: no issues recorded");

    let one = CatalogError::Invalid(vec![CatalogIssue::MissingDefaultLanguage(Language::En)]);
    assert_eq!(
        one.to_string(),
        "invalid option catalog: 1 issue(s), first: no entries for the default language 'en'"
    );
}
