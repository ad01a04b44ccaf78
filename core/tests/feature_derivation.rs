use campaign_core::{
    features::{absolute_amount, derive, log_amount},
    form::{FormInput, ValidatedForm},
    record::CUSTOMER_COLUMNS,
    types::FeatureValue,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn form(total_spend: f64, wines: i64, meat: i64, sweet: i64, income: f64) -> ValidatedForm {
    FormInput {
        year_birth: 1985,
        education: "Graduation".into(),
        marital_status: "Married".into(),
        income,
        kidhome: 0,
        teenhome: 0,
        recency: 0,
        customer_days: 0,
        total_spend,
        wines_pct: wines,
        meat_pct: meat,
        sweet_pct: sweet,
        num_deals_purchases: 0,
        num_web_purchases: 0,
        num_catalog_purchases: 0,
        num_store_purchases: 0,
        num_web_visits_month: 0,
    }
    .validate()
    .expect("valid form")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// For every percentage in [0, 100] the category amount stays within
/// [0, total_spend].
#[test]
fn absolute_amount_is_bounded_by_total_spend() {
    for total in [0.0, 1.0, 999.0, 1_000.0, 123_456.78] {
        for pct in 0..=100 {
            let amount = absolute_amount(pct, total);
            assert!(amount >= 0.0, "pct={pct} total={total}: {amount} < 0");
            assert!(amount <= total, "pct={pct} total={total}: {amount} > total");
        }
    }
}

#[test]
fn log_amount_is_zero_at_zero_and_monotonic() {
    assert_eq!(log_amount(0.0), 0.0);

    let xs: Vec<f64> = (0..2_000).map(|i| i as f64 * 37.5).collect();
    for pair in xs.windows(2) {
        assert!(
            log_amount(pair[1]) >= log_amount(pair[0]),
            "log_amount not monotonic between {} and {}",
            pair[0],
            pair[1]
        );
    }
    assert_close(log_amount(1_000.0), 1_001f64.ln());
}

/// income=50000, total_spend=1000, 50/30/10 split.
#[test]
fn scenario_a_derives_expected_amounts() {
    let record = derive(&form(1_000.0, 50, 30, 10, 50_000.0));

    assert_close(record.mnt_wines, 500.0);
    assert_close(record.mnt_meat_products, 300.0);
    assert_close(record.mnt_sweet_products, 100.0);
    assert_close(record.log_mnt_wines, 501f64.ln());
    assert_close(record.log_mnt_meat_products, 301f64.ln());
    assert_close(record.log_mnt_sweet_products, 101f64.ln());
    assert_close(record.log_total_spend, 1_001f64.ln());
    assert!((record.log_total_spend - 6.909).abs() < 1e-3);
    assert_close(record.log_income, 50_001f64.ln());
    assert_eq!(record.year_birth, 1985);
}

#[test]
fn scenario_b_zero_spend_yields_all_zero_amounts() {
    let record = derive(&form(0.0, 50, 30, 10, 0.0));

    for v in [
        record.mnt_wines,
        record.mnt_meat_products,
        record.mnt_sweet_products,
        record.log_mnt_wines,
        record.log_mnt_meat_products,
        record.log_mnt_sweet_products,
        record.log_total_spend,
        record.log_income,
    ] {
        assert_eq!(v, 0.0);
    }
}

/// Percentages summing past 100 are kept as entered; nothing is rescaled.
#[test]
fn over_allocated_percentages_are_not_normalised() {
    let record = derive(&form(200.0, 80, 80, 80, 1.0));

    assert_close(record.mnt_wines, 160.0);
    assert_close(record.mnt_meat_products, 160.0);
    assert_close(record.mnt_sweet_products, 160.0);
    assert_close(record.total_spend, 200.0);
}

/// `derive` is public over a public struct, so it must not panic on
/// percentages the form would have rejected.
#[test]
fn hand_built_form_with_extreme_percentages_does_not_overflow() {
    let extreme = ValidatedForm {
        wines_pct: i64::MAX,
        meat_pct: i64::MAX,
        sweet_pct: i64::MAX,
        ..form(0.0, 0, 0, 0, 0.0)
    };
    let record = derive(&extreme);

    assert_close(record.mnt_wines, 0.0);
    assert_close(record.log_total_spend, 0.0);
}

#[test]
fn feature_record_follows_customer_column_order_and_types() {
    let record = derive(&form(1_000.0, 50, 30, 10, 50_000.0)).to_feature_record();

    let names: Vec<&str> = record.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, CUSTOMER_COLUMNS.to_vec());

    assert_eq!(record[0].1, FeatureValue::Integer(1985));
    assert_eq!(record[1].1, FeatureValue::Text("Graduation".into()));
    assert_eq!(record[2].1, FeatureValue::Text("Married".into()));
    assert_eq!(record[3].1, FeatureValue::Real(50_000.0));
    assert_eq!(record[7].1, FeatureValue::Real(500.0));
}
