//! campaign-core: campaign-response prediction pipeline.
//!
//! A submitted form is validated, turned into a customer record with
//! derived spend features, aligned to the model's column spec, scored,
//! labelled at the operating threshold, and appended to the prediction
//! log. `predictor` wires the steps together.

pub mod clock;
pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod form;
pub mod model;
pub mod predictor;
pub mod record;
pub mod schema;
pub mod store;
pub mod types;
