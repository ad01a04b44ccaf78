//! Form boundary: raw field values as the front end submits them,
//! and the constraints the form widgets enforce.
//!
//! RULE: Nothing downstream of `FormInput::validate` re-checks ranges.
//! The feature deriver relies on the bounds enforced here.

use crate::{
    error::InputError,
    types::{Education, MaritalStatus},
};
use serde::{Deserialize, Serialize};

pub const YEAR_BIRTH_MIN: i64 = 1900;
pub const YEAR_BIRTH_MAX: i64 = 2025;
pub const YEAR_BIRTH_DEFAULT: i64 = 1985;
pub const HOUSEHOLD_COUNT_MAX: i64 = 10;
pub const DAYS_MAX: i64 = 9999;
pub const PERCENT_MAX: i64 = 100;

/// Raw submission as received from the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default = "default_year_birth")]
    pub year_birth: i64,
    #[serde(default = "default_education")]
    pub education: String,
    #[serde(default = "default_marital_status")]
    pub marital_status: String,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub kidhome: i64,
    #[serde(default)]
    pub teenhome: i64,
    #[serde(default)]
    pub recency: i64,
    #[serde(default)]
    pub customer_days: i64,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub wines_pct: i64,
    #[serde(default)]
    pub meat_pct: i64,
    #[serde(default)]
    pub sweet_pct: i64,
    #[serde(default)]
    pub num_deals_purchases: i64,
    #[serde(default)]
    pub num_web_purchases: i64,
    #[serde(default)]
    pub num_catalog_purchases: i64,
    #[serde(default)]
    pub num_store_purchases: i64,
    #[serde(default)]
    pub num_web_visits_month: i64,
}

fn default_year_birth() -> i64 {
    YEAR_BIRTH_DEFAULT
}

/// A select widget starts on its first choice.
fn default_education() -> String {
    Education::ALL[0].as_str().to_string()
}

fn default_marital_status() -> String {
    MaritalStatus::ALL[0].as_str().to_string()
}

/// A submission that passed every boundary constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub year_birth:            i64,
    pub education:             Education,
    pub marital_status:        MaritalStatus,
    pub income:                f64,
    pub kidhome:               i64,
    pub teenhome:              i64,
    pub recency:               i64,
    pub customer_days:         i64,
    pub total_spend:           f64,
    pub wines_pct:             i64,
    pub meat_pct:              i64,
    pub sweet_pct:             i64,
    pub num_deals_purchases:   i64,
    pub num_web_purchases:     i64,
    pub num_catalog_purchases: i64,
    pub num_store_purchases:   i64,
    pub num_web_visits_month:  i64,
}

impl FormInput {
    /// Check every field against the form's widget bounds.
    /// Returns the first violation found, in form order.
    pub fn validate(&self) -> Result<ValidatedForm, InputError> {
        check_range("year_birth", self.year_birth, YEAR_BIRTH_MIN, YEAR_BIRTH_MAX)?;
        let education = Education::parse(&self.education).ok_or_else(|| {
            InputError::UnknownChoice { field: "education", value: self.education.clone() }
        })?;
        let marital_status = MaritalStatus::parse(&self.marital_status).ok_or_else(|| {
            InputError::UnknownChoice { field: "marital_status", value: self.marital_status.clone() }
        })?;
        check_range("kidhome", self.kidhome, 0, HOUSEHOLD_COUNT_MAX)?;
        check_range("teenhome", self.teenhome, 0, HOUSEHOLD_COUNT_MAX)?;
        check_amount("income", self.income)?;
        check_range("recency", self.recency, 0, DAYS_MAX)?;
        check_range("customer_days", self.customer_days, 0, DAYS_MAX)?;
        check_amount("total_spend", self.total_spend)?;
        check_range("wines_pct", self.wines_pct, 0, PERCENT_MAX)?;
        check_range("meat_pct", self.meat_pct, 0, PERCENT_MAX)?;
        check_range("sweet_pct", self.sweet_pct, 0, PERCENT_MAX)?;
        check_count("num_web_purchases", self.num_web_purchases)?;
        check_count("num_catalog_purchases", self.num_catalog_purchases)?;
        check_count("num_store_purchases", self.num_store_purchases)?;
        check_count("num_deals_purchases", self.num_deals_purchases)?;
        check_count("num_web_visits_month", self.num_web_visits_month)?;

        Ok(ValidatedForm {
            year_birth: self.year_birth,
            education,
            marital_status,
            income: self.income,
            kidhome: self.kidhome,
            teenhome: self.teenhome,
            recency: self.recency,
            customer_days: self.customer_days,
            total_spend: self.total_spend,
            wines_pct: self.wines_pct,
            meat_pct: self.meat_pct,
            sweet_pct: self.sweet_pct,
            num_deals_purchases: self.num_deals_purchases,
            num_web_purchases: self.num_web_purchases,
            num_catalog_purchases: self.num_catalog_purchases,
            num_store_purchases: self.num_store_purchases,
            num_web_visits_month: self.num_web_visits_month,
        })
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), InputError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            min: min as f64,
            max: max as f64,
            value: value as f64,
        })
    }
}

fn check_count(field: &'static str, value: i64) -> Result<(), InputError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(InputError::Negative { field, value: value as f64 })
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative { field, value })
    }
}

// ── Form schema ──────────────────────────────────────────────────────────────

/// Widget description a front end can render the form from.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub sections: Vec<FormSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSection {
    pub title:  &'static str,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FormField {
    Number {
        name:    &'static str,
        label:   &'static str,
        min:     i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        max:     Option<i64>,
        default: i64,
    },
    Select {
        name:    &'static str,
        label:   &'static str,
        choices: Vec<&'static str>,
        default: &'static str,
    },
}

impl FormSchema {
    pub fn standard() -> Self {
        let number = |name, label, min, max, default| FormField::Number { name, label, min, max, default };
        Self {
            sections: vec![
                FormSection {
                    title: "Customer profile",
                    fields: vec![
                        number("year_birth", "Year of birth", YEAR_BIRTH_MIN, Some(YEAR_BIRTH_MAX), YEAR_BIRTH_DEFAULT),
                        FormField::Select {
                            name: "education",
                            label: "Education",
                            choices: Education::ALL.iter().map(|e| e.as_str()).collect(),
                            default: Education::ALL[0].as_str(),
                        },
                        FormField::Select {
                            name: "marital_status",
                            label: "Marital status",
                            choices: MaritalStatus::ALL.iter().map(|m| m.as_str()).collect(),
                            default: MaritalStatus::ALL[0].as_str(),
                        },
                        number("kidhome", "Young children at home", 0, Some(HOUSEHOLD_COUNT_MAX), 0),
                        number("teenhome", "Teenagers at home", 0, Some(HOUSEHOLD_COUNT_MAX), 0),
                        number("income", "Annual income", 0, None, 0),
                        number("recency", "Days since last purchase", 0, Some(DAYS_MAX), 0),
                        number("customer_days", "Days as a member", 0, Some(DAYS_MAX), 0),
                    ],
                },
                FormSection {
                    title: "Spending",
                    fields: vec![
                        number("total_spend", "Total spend", 0, None, 0),
                        number("wines_pct", "Wines (%)", 0, Some(PERCENT_MAX), 0),
                        number("meat_pct", "Meat (%)", 0, Some(PERCENT_MAX), 0),
                        number("sweet_pct", "Sweets (%)", 0, Some(PERCENT_MAX), 0),
                    ],
                },
                FormSection {
                    title: "Purchase behaviour",
                    fields: vec![
                        number("num_web_purchases", "Web purchases", 0, None, 0),
                        number("num_catalog_purchases", "Catalog purchases", 0, None, 0),
                        number("num_store_purchases", "In-store purchases", 0, None, 0),
                        number("num_deals_purchases", "Discounted purchases", 0, None, 0),
                        number("num_web_visits_month", "Web visits per month", 0, None, 0),
                    ],
                },
            ],
        }
    }
}
