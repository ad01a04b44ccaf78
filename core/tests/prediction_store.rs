use campaign_core::{
    features::derive,
    form::FormInput,
    record::CUSTOMER_COLUMNS,
    store::{PredictionRow, PredictionSink, PredictionStore},
    types::Label,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn row(probability: f64, prediction: Label) -> PredictionRow {
    let form = FormInput {
        year_birth: 1970,
        education: "2n Cycle".into(),
        marital_status: "YOLO".into(),
        income: 72_000.0,
        kidhome: 1,
        teenhome: 2,
        recency: 45,
        customer_days: 800,
        total_spend: 640.0,
        wines_pct: 25,
        meat_pct: 25,
        sweet_pct: 0,
        num_deals_purchases: 3,
        num_web_purchases: 4,
        num_catalog_purchases: 1,
        num_store_purchases: 6,
        num_web_visits_month: 7,
    };
    PredictionRow {
        timestamp: "2025-01-31 08:00:00".into(),
        record: derive(&form.validate().unwrap()),
        prediction,
        probability,
    }
}

fn store() -> PredictionStore {
    let store = PredictionStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn table_has_exactly_the_logged_columns() {
    let store = store();

    let mut expected = vec!["id".to_string(), "timestamp".to_string()];
    expected.extend(CUSTOMER_COLUMNS.iter().map(|c| c.to_string()));
    expected.push("Prediction".into());
    expected.push("Prediction_Prob".into());

    assert_eq!(store.prediction_columns().unwrap(), expected);
}

#[test]
fn migrate_is_idempotent_and_keeps_rows() {
    let mut store = store();
    store.append(&row(0.7, Label::WillJoin)).unwrap();

    store.migrate().unwrap();
    store.migrate().unwrap();

    assert_eq!(store.prediction_count().unwrap(), 1);
}

#[test]
fn appended_rows_get_increasing_ids() {
    let mut store = store();

    let first = store.append(&row(0.1, Label::WillNotJoin)).unwrap();
    let second = store.append(&row(0.9, Label::WillJoin)).unwrap();

    assert!(second > first);
    assert_eq!(store.prediction_count().unwrap(), 2);
    assert_eq!(store.latest_prediction().unwrap().unwrap().id, second);
}

#[test]
fn stored_row_round_trips_text_and_derived_values() {
    let mut store = store();
    store.append(&row(0.31, Label::WillJoin)).unwrap();

    let stored = store.latest_prediction().unwrap().unwrap();
    assert_eq!(stored.timestamp, "2025-01-31 08:00:00");
    assert_eq!(stored.education, "2n Cycle");
    assert_eq!(stored.marital_status, "YOLO");
    assert_eq!(stored.income, 72_000.0);
    assert_eq!(stored.mnt_wines, 160.0);
    assert_eq!(stored.mnt_meat_products, 160.0);
    assert_eq!(stored.mnt_sweet_products, 0.0);
    assert_eq!(stored.total_spend, 640.0);
    assert!((stored.log_income - 72_001f64.ln()).abs() < 1e-12);
    assert_eq!(stored.prediction, 1);
    assert_eq!(stored.prediction_prob, 0.31);
}

#[test]
fn empty_store_has_no_latest_row() {
    let store = store();
    assert_eq!(store.prediction_count().unwrap(), 0);
    assert!(store.latest_prediction().unwrap().is_none());
}

/// Rows written before a restart are still there after reopening the file.
#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.db");
    let path = path.to_str().unwrap();

    {
        let mut store = PredictionStore::open(path).unwrap();
        store.migrate().unwrap();
        store.append(&row(0.5, Label::WillJoin)).unwrap();
        store.close().unwrap();
    }

    let store = PredictionStore::open(path).unwrap();
    store.migrate().unwrap();
    assert_eq!(store.prediction_count().unwrap(), 1);
}

#[test]
fn insert_without_table_is_a_persistence_error() {
    let mut store = PredictionStore::in_memory().unwrap();
    assert!(store.append(&row(0.5, Label::WillJoin)).is_err());
}
