//! The customer record: raw form fields plus derived spend features.

use crate::{
    schema::FeatureRecord,
    types::{Education, FeatureValue, MaritalStatus},
};
use serde::Serialize;

/// Column names of the 22 customer fields, in storage and training order.
pub const CUSTOMER_COLUMNS: [&str; 22] = [
    "Year_Birth",
    "Education",
    "Marital_Status",
    "Income",
    "Kidhome",
    "Teenhome",
    "Recency",
    "MntWines",
    "MntMeatProducts",
    "MntSweetProducts",
    "NumDealsPurchases",
    "NumWebPurchases",
    "NumCatalogPurchases",
    "NumStorePurchases",
    "NumWebVisitsMonth",
    "Customer_Days",
    "TotalSpend",
    "log_MntWines",
    "log_MntMeatProducts",
    "log_MntSweetProducts",
    "log_TotalSpend",
    "log_Income",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub year_birth:            i64,
    pub education:             Education,
    pub marital_status:        MaritalStatus,
    pub income:                f64,
    pub kidhome:               i64,
    pub teenhome:              i64,
    pub recency:               i64,
    pub mnt_wines:             f64,
    pub mnt_meat_products:     f64,
    pub mnt_sweet_products:    f64,
    pub num_deals_purchases:   i64,
    pub num_web_purchases:     i64,
    pub num_catalog_purchases: i64,
    pub num_store_purchases:   i64,
    pub num_web_visits_month:  i64,
    pub customer_days:         i64,
    pub total_spend:           f64,
    pub log_mnt_wines:         f64,
    pub log_mnt_meat_products: f64,
    pub log_mnt_sweet_products: f64,
    pub log_total_spend:       f64,
    pub log_income:            f64,
}

impl CustomerRecord {
    /// Named view of the record, in `CUSTOMER_COLUMNS` order.
    pub fn to_feature_record(&self) -> FeatureRecord {
        use FeatureValue::{Integer, Real, Text};
        let values = [
            Integer(self.year_birth),
            Text(self.education.as_str().to_string()),
            Text(self.marital_status.as_str().to_string()),
            Real(self.income),
            Integer(self.kidhome),
            Integer(self.teenhome),
            Integer(self.recency),
            Real(self.mnt_wines),
            Real(self.mnt_meat_products),
            Real(self.mnt_sweet_products),
            Integer(self.num_deals_purchases),
            Integer(self.num_web_purchases),
            Integer(self.num_catalog_purchases),
            Integer(self.num_store_purchases),
            Integer(self.num_web_visits_month),
            Integer(self.customer_days),
            Real(self.total_spend),
            Real(self.log_mnt_wines),
            Real(self.log_mnt_meat_products),
            Real(self.log_mnt_sweet_products),
            Real(self.log_total_spend),
            Real(self.log_income),
        ];
        CUSTOMER_COLUMNS
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}
