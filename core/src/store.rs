//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The predictor hands finished rows to a `PredictionSink`; it never
//! executes SQL directly.
//!
//! The `customer_predictions` table is append-only. The read helpers at
//! the bottom exist for tooling and tests; the submission path never
//! reads prior rows.

use crate::{
    error::{PersistenceError, PredictorResult},
    record::CustomerRecord,
    types::{Label, Probability, RowId},
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// One row of `customer_predictions`, minus the id the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub timestamp:   String,
    pub record:      CustomerRecord,
    pub prediction:  Label,
    pub probability: Probability,
}

/// Where finished predictions go. The SQLite store is the production
/// sink; tests substitute failing sinks.
pub trait PredictionSink {
    /// Append one row. A failed append must leave nothing behind.
    fn append(&mut self, row: &PredictionRow) -> Result<RowId, PersistenceError>;
}

pub struct PredictionStore {
    conn: Connection,
}

impl PredictionStore {
    /// Open (or create) the prediction database at `path`.
    pub fn open(path: &str) -> PredictorResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::info!("Opened prediction store at {path}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PredictorResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the prediction table if it does not exist yet. Idempotent.
    pub fn migrate(&self) -> PredictorResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_customer_predictions.sql"))?;
        Ok(())
    }

    pub fn insert_prediction(&self, row: &PredictionRow) -> Result<RowId, PersistenceError> {
        let r = &row.record;
        self.conn.execute(
            "INSERT INTO customer_predictions (
                timestamp, Year_Birth, Education, Marital_Status, Income,
                Kidhome, Teenhome, Recency,
                MntWines, MntMeatProducts, MntSweetProducts,
                NumDealsPurchases, NumWebPurchases, NumCatalogPurchases,
                NumStorePurchases, NumWebVisitsMonth,
                Customer_Days, TotalSpend,
                log_MntWines, log_MntMeatProducts, log_MntSweetProducts,
                log_TotalSpend, log_Income,
                Prediction, Prediction_Prob
            ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,?22,?23,?24,?25)",
            params![
                row.timestamp,
                r.year_birth,
                r.education.as_str(),
                r.marital_status.as_str(),
                r.income,
                r.kidhome,
                r.teenhome,
                r.recency,
                r.mnt_wines,
                r.mnt_meat_products,
                r.mnt_sweet_products,
                r.num_deals_purchases,
                r.num_web_purchases,
                r.num_catalog_purchases,
                r.num_store_purchases,
                r.num_web_visits_month,
                r.customer_days,
                r.total_spend,
                r.log_mnt_wines,
                r.log_mnt_meat_products,
                r.log_mnt_sweet_products,
                r.log_total_spend,
                r.log_income,
                row.prediction.as_int(),
                row.probability,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Release the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<(), PersistenceError> {
        self.conn.close().map_err(|(_, e)| PersistenceError::Database(e))
    }

    // ── Tooling reads ──────────────────────────────────────────

    pub fn prediction_count(&self) -> PredictorResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM customer_predictions", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn latest_prediction(&self) -> PredictorResult<Option<StoredPrediction>> {
        let stored = self
            .conn
            .query_row(
                "SELECT id, timestamp, Year_Birth, Education, Marital_Status, Income,
                        MntWines, MntMeatProducts, MntSweetProducts,
                        TotalSpend, log_TotalSpend, log_Income,
                        Prediction, Prediction_Prob
                 FROM customer_predictions
                 ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(StoredPrediction {
                        id:                 row.get(0)?,
                        timestamp:          row.get(1)?,
                        year_birth:         row.get(2)?,
                        education:          row.get(3)?,
                        marital_status:     row.get(4)?,
                        income:             row.get(5)?,
                        mnt_wines:          row.get(6)?,
                        mnt_meat_products:  row.get(7)?,
                        mnt_sweet_products: row.get(8)?,
                        total_spend:        row.get(9)?,
                        log_total_spend:    row.get(10)?,
                        log_income:         row.get(11)?,
                        prediction:         row.get(12)?,
                        prediction_prob:    row.get(13)?,
                    })
                },
            )
            .optional()?;
        Ok(stored)
    }

    /// Column names of `customer_predictions`, in declaration order.
    pub fn prediction_columns(&self) -> PredictorResult<Vec<String>> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(customer_predictions)")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl PredictionSink for PredictionStore {
    fn append(&mut self, row: &PredictionRow) -> Result<RowId, PersistenceError> {
        self.insert_prediction(row)
    }
}

/// A subset of a stored row, as read back by tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredPrediction {
    pub id:                 RowId,
    pub timestamp:          String,
    pub year_birth:         i64,
    pub education:          String,
    pub marital_status:     String,
    pub income:             f64,
    pub mnt_wines:          f64,
    pub mnt_meat_products:  f64,
    pub mnt_sweet_products: f64,
    pub total_spend:        f64,
    pub log_total_spend:    f64,
    pub log_income:         f64,
    pub prediction:         i64,
    pub prediction_prob:    f64,
}
