//! Feature deriver: turns spend percentages into absolute amounts and
//! log-transformed variants.
//!
//! PRECONDITION: `total_spend` and `income` are non-negative. The form
//! boundary enforces this; here it is only debug-asserted.

use crate::{form::ValidatedForm, record::CustomerRecord};

/// Spend attributed to one category: `pct / 100 × total_spend`.
pub fn absolute_amount(pct: i64, total_spend: f64) -> f64 {
    (pct as f64 / 100.0) * total_spend
}

/// `ln(1 + x)`, zero at zero.
pub fn log_amount(x: f64) -> f64 {
    x.ln_1p()
}

/// Derive the full customer record from a validated form.
///
/// The three tracked percentages are not required to sum to 100. Any
/// remainder is spend outside the tracked categories and is dropped.
pub fn derive(form: &ValidatedForm) -> CustomerRecord {
    debug_assert!(form.total_spend >= 0.0, "total_spend must be non-negative");
    debug_assert!(form.income >= 0.0, "income must be non-negative");

    let allocated_pct = form
        .wines_pct
        .saturating_add(form.meat_pct)
        .saturating_add(form.sweet_pct);
    if allocated_pct > 100 {
        log::warn!(
            "Spend percentages sum to {allocated_pct}% (wines {}%, meat {}%, sweets {}%)",
            form.wines_pct,
            form.meat_pct,
            form.sweet_pct
        );
    }

    let mnt_wines = absolute_amount(form.wines_pct, form.total_spend);
    let mnt_meat = absolute_amount(form.meat_pct, form.total_spend);
    let mnt_sweet = absolute_amount(form.sweet_pct, form.total_spend);

    CustomerRecord {
        year_birth:             form.year_birth,
        education:              form.education,
        marital_status:         form.marital_status,
        income:                 form.income,
        kidhome:                form.kidhome,
        teenhome:               form.teenhome,
        recency:                form.recency,
        mnt_wines,
        mnt_meat_products:      mnt_meat,
        mnt_sweet_products:     mnt_sweet,
        num_deals_purchases:    form.num_deals_purchases,
        num_web_purchases:      form.num_web_purchases,
        num_catalog_purchases:  form.num_catalog_purchases,
        num_store_purchases:    form.num_store_purchases,
        num_web_visits_month:   form.num_web_visits_month,
        customer_days:          form.customer_days,
        total_spend:            form.total_spend,
        log_mnt_wines:          log_amount(mnt_wines),
        log_mnt_meat_products:  log_amount(mnt_meat),
        log_mnt_sweet_products: log_amount(mnt_sweet),
        log_total_spend:        log_amount(form.total_spend),
        log_income:             log_amount(form.income),
    }
}
