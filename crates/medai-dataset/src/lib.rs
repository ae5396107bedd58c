//! Patient dataset finalization.
//!
//! This crate turns extracted [`PatientRecord`](medai_model::PatientRecord)s
//! into the flat table consumed by downstream modeling:
//!
//! - **frame**: record-to-DataFrame conversion and the finalized [`Dataset`]
//! - **coerce**: fail-soft numeric coercion
//! - **impute**: constant and median imputation
//! - **label**: derived heart-disease risk label
//! - **writer**: delimited output with a header row
//! - **builder**: the fixed sequence of finalize passes

pub mod builder;
pub mod coerce;
pub mod error;
pub mod frame;
pub mod impute;
pub mod label;
pub mod writer;

pub use builder::{DatasetBuilder, FinalizeReport, Imputation, ImputeStrategy};
pub use error::{DatasetError, Result};
pub use frame::{Dataset, records_to_frame};
pub use impute::median;
pub use writer::write_csv;
