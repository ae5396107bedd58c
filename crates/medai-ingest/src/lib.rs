//! Bundle ingestion.
//!
//! This crate turns a directory of clinical-record bundles (one JSON document
//! per file) into a lazy sequence of per-file outcomes, each carrying at most
//! one [`PatientRecord`](medai_model::PatientRecord).
//!
//! # Features
//!
//! - **Discovery**: list bundle files by extension, sorted by file name
//! - **Parsing**: tolerant wire model that ignores resource types it does not use
//! - **Extraction**: age, BMI, systolic pressure, cholesterol, diabetes and smoker flags
//! - **Outcomes**: every file ends as extracted, skipped (with a reason), or failed
//!
//! # Example
//!
//! ```ignore
//! use medai_ingest::BundleReader;
//! use medai_model::IngestConfig;
//!
//! let config = IngestConfig::new("synthea/fhir", "patients.csv");
//! let reader = BundleReader::from_config(&config)?;
//! let (records, summary) = reader.read_all();
//! println!("{} of {} files yielded a record", records.len(), summary.files_scanned);
//! ```

mod age;
mod bundle;
mod discovery;
mod error;
mod extract;
mod reader;
mod summary;

// === Error Types ===
pub use error::{IngestError, Result};

// === Bundle Wire Model ===
pub use bundle::{
    BUNDLE_RESOURCE_TYPE, Bundle, CodeableConcept, Coding, Component, Condition, Entry,
    Observation, Patient, Quantity, Resource,
};

// === File Discovery ===
pub use discovery::list_bundle_files;

// === Extraction ===
pub use age::{age_from_birth_date, age_on};
pub use extract::{ExtractionRules, extract_record};

// === Reading ===
pub use reader::{BundleReader, FileOutcome, SkipReason, read_bundle_file};
pub use summary::{FailedFile, ReadSummary, SkippedFile};
