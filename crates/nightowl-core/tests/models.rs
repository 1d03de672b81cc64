use nightowl_core::columns;
use nightowl_core::models::answer::{AnswerSet, QuestionId, RawAnswer};
use nightowl_core::models::language::Language;
use nightowl_core::models::score::{Metric, ScoreResult};
use nightowl_core::models::submission::Submission;

#[test]
fn language_codes_parse_case_insensitively() {
    assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    assert_eq!(" HI ".parse::<Language>().unwrap(), Language::Hi);
    assert_eq!("mr".parse::<Language>().unwrap(), Language::Mr);
    assert!("fr".parse::<Language>().is_err());
    assert_eq!(Language::default(), Language::En);
    assert_eq!(Language::default(), Language::DEFAULT);
}

#[test]
fn answer_set_accepts_mixed_json_values() {
    let json = r#"{"B6": "3", "C1": 4, "C2": 2.0, "C3": true, "C4": null, "C5": [1, 2]}"#;
    let answers: AnswerSet = serde_json::from_str(json).unwrap();

    assert_eq!(answers.get("B6"), Some(&RawAnswer::Text("3".to_string())));
    assert_eq!(answers.get("C1"), Some(&RawAnswer::Integer(4)));
    assert_eq!(answers.get("C2"), Some(&RawAnswer::Float(2.0)));
    assert_eq!(answers.get("C3"), Some(&RawAnswer::Bool(true)));
    assert_eq!(answers.get("C4"), Some(&RawAnswer::Null));
    assert!(matches!(answers.get("C5"), Some(RawAnswer::Other(_))));
}

#[test]
fn raw_answers_coerce_to_text() {
    assert_eq!(RawAnswer::Integer(4).as_text().as_deref(), Some("4"));
    assert_eq!(RawAnswer::Float(2.0).as_text().as_deref(), Some("2.0"));
    assert_eq!(RawAnswer::Bool(false).as_text().as_deref(), Some("False"));
    assert_eq!(RawAnswer::Null.as_text(), None);
    assert_eq!(RawAnswer::Other(serde_json::json!({"a": 1})).as_text(), None);
}

#[test]
fn blank_answers_are_not_answered() {
    let mut answers = AnswerSet::new();
    answers.insert("A1", "18-24");
    answers.insert("A2", "   ");
    answers.insert("A3", RawAnswer::Null);

    assert!(answers.is_answered("A1"));
    assert!(!answers.is_answered("A2"));
    assert!(!answers.is_answered("A3"));
    assert!(!answers.is_answered("A4"));
}

#[test]
fn score_result_uses_sheet_column_names() {
    let scores = ScoreResult {
        sleep_quality: 10,
        well_being_total: 60,
        distress_total: 12,
        cognitive_efficiency: 32,
        lifestyle_risk: 11,
    };
    let json = serde_json::to_value(scores).unwrap();
    assert_eq!(json["WHO_total"], 60);
    assert_eq!(json["sleep_quality"], 10);

    assert_eq!("WHO_total".parse::<Metric>().unwrap(), Metric::WellBeingTotal);
    let values: Vec<i64> = scores.entries().map(|(_, v)| v).collect();
    assert_eq!(values, vec![10, 60, 12, 32, 11]);
}

#[test]
fn submission_projects_onto_header() {
    let answers: AnswerSet = [("B6", "3"), ("F1", "Never")].into_iter().collect();
    let scores = ScoreResult {
        sleep_quality: 9,
        ..ScoreResult::default()
    };
    let submission = Submission::new(Language::Hi, answers, scores);

    let questions = [QuestionId::from("B6"), QuestionId::from("B7"), QuestionId::from("F1")];
    let header = columns::header(&questions);
    assert_eq!(&header[..3], &["timestamp", "session_id", "language"]);
    assert_eq!(header.len(), 3 + 3 + 5);

    let row = submission.to_row(&header);
    assert_eq!(row[1], submission.session_id.to_string());
    assert_eq!(row[2], "hi");
    assert_eq!(row[3], "3");
    assert_eq!(row[4], "");
    assert_eq!(row[5], "Never");
    assert_eq!(row[6], "9");
}
