use nightowl_core::models::answer::{AnswerSet, QuestionId};
use nightowl_core::models::language::Language;
use nightowl_core::models::score::ScoreResult;
use nightowl_core::models::submission::Submission;
use nightowl_storage::csv_store::CsvStore;
use nightowl_storage::error::StorageError;
use nightowl_storage::layout::ColumnLayout;
use nightowl_storage::memory::MemoryStore;
use nightowl_storage::submit::{AppendOutcome, record_submission};
use nightowl_storage::table::TabularStore;
use uuid::Uuid;

fn layout() -> ColumnLayout {
    let questions = [QuestionId::from("B6"), QuestionId::from("F1")];
    ColumnLayout::new(&questions)
}

fn submission(language: Language) -> Submission {
    let answers: AnswerSet = [("B6", "3"), ("F1", "Never, really")].into_iter().collect();
    let scores = ScoreResult {
        sleep_quality: 10,
        well_being_total: 60,
        distress_total: 12,
        cognitive_efficiency: 32,
        lifestyle_risk: 11,
    };
    Submission::new(language, answers, scores)
}

#[test]
fn layout_puts_metadata_questions_then_metrics() {
    let layout = layout();
    assert_eq!(
        layout.columns(),
        &[
            "timestamp",
            "session_id",
            "language",
            "B6",
            "F1",
            "sleep_quality",
            "WHO_total",
            "distress_total",
            "cognitive_efficiency",
            "lifestyle_risk",
        ]
    );
    assert_eq!(layout.position("F1"), Some(4));
}

#[test]
fn csv_store_writes_header_lazily_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("responses").join("sheet.csv");
    let mut store = CsvStore::new(&path);

    assert_eq!(store.header().unwrap(), None);
    assert!(store.rows().unwrap().is_empty());
    assert!(!path.exists());

    let first = submission(Language::En);
    let outcome = record_submission(&mut store, &first, &layout()).unwrap();
    assert_eq!(outcome, AppendOutcome::Appended);

    let second = submission(Language::Mr);
    record_submission(&mut store, &second, &layout()).unwrap();

    let header = store.header().unwrap().unwrap();
    assert_eq!(header, layout().columns());

    let rows = store.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], first.session_id.to_string());
    assert_eq!(rows[0][2], "en");
    assert_eq!(rows[0][4], "Never, really");
    assert_eq!(rows[0][6], "60");
    assert_eq!(rows[1][2], "mr");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("\"Never, really\""));
}

#[test]
fn same_session_is_recorded_at_most_once() {
    let mut store = MemoryStore::new();
    let session = Uuid::new_v4();
    let first = submission(Language::En).with_session_id(session);
    let retry = submission(Language::En).with_session_id(session);

    assert_eq!(
        record_submission(&mut store, &first, &layout()).unwrap(),
        AppendOutcome::Appended
    );
    assert_eq!(
        record_submission(&mut store, &retry, &layout()).unwrap(),
        AppendOutcome::AlreadyRecorded
    );
    assert_eq!(store.rows().unwrap().len(), 1);
}

#[test]
fn existing_header_wins_and_unknown_answers_are_dropped() {
    let mut store = MemoryStore::new();
    let old_header: Vec<String> = ["timestamp", "session_id", "language", "B6", "sleep_quality"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    store.append_row(&old_header).unwrap();

    let sub = submission(Language::Hi);
    record_submission(&mut store, &sub, &layout()).unwrap();

    let rows = store.rows().unwrap();
    assert_eq!(rows[0].len(), 5);
    assert_eq!(rows[0][2], "hi");
    assert_eq!(rows[0][3], "3");
    assert_eq!(rows[0][4], "10");
}

#[test]
fn header_without_session_column_is_rejected() {
    let mut store = MemoryStore::new();
    store
        .append_row(&["timestamp".to_string(), "B6".to_string()])
        .unwrap();

    let err = record_submission(&mut store, &submission(Language::En), &layout()).unwrap_err();
    assert!(matches!(err, StorageError::MissingColumn { column } if column == "session_id"));
}

#[test]
fn memory_store_rejects_rows_of_the_wrong_width() {
    let mut store = MemoryStore::new();
    store.append_row(&["a".to_string(), "b".to_string()]).unwrap();
    let err = store.append_row(&["only".to_string()]).unwrap_err();
    assert!(matches!(err, StorageError::RowWidth { expected: 2, actual: 1 }));
}

#[test]
fn csv_store_reopens_existing_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.csv");

    let sub = submission(Language::En);
    record_submission(&mut CsvStore::new(&path), &sub, &layout()).unwrap();

    let mut reopened = CsvStore::new(&path);
    assert_eq!(
        record_submission(&mut reopened, &sub, &layout()).unwrap(),
        AppendOutcome::AlreadyRecorded
    );
    assert_eq!(reopened.rows().unwrap().len(), 1);
}
