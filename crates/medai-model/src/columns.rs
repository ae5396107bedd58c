//! Column names of the output table, in output order.

pub const FILE: &str = "file";
pub const AGE: &str = "age";
pub const BMI: &str = "bmi";
pub const SYSTOLIC_BP: &str = "systolic_bp";
pub const CHOLESTEROL: &str = "cholesterol";
pub const DIABETES_HISTORY: &str = "diabetes_history";
pub const SMOKER: &str = "smoker";
pub const HEART_DISEASE_RISK: &str = "heart_disease_risk";

/// Columns coerced to numbers and guaranteed non-missing after finalize.
pub const NUMERIC_COLUMNS: [&str; 4] = [AGE, BMI, SYSTOLIC_BP, CHOLESTEROL];

/// Feature columns consumed by the downstream risk classifier.
pub const FEATURE_COLUMNS: [&str; 6] = [
    AGE,
    BMI,
    SYSTOLIC_BP,
    CHOLESTEROL,
    DIABETES_HISTORY,
    SMOKER,
];

/// Full output layout, header row included.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    FILE,
    AGE,
    BMI,
    SYSTOLIC_BP,
    CHOLESTEROL,
    DIABETES_HISTORY,
    SMOKER,
    HEART_DISEASE_RISK,
];

/// Columns shown in the closing run preview.
pub const PREVIEW_COLUMNS: [&str; 3] = [AGE, SYSTOLIC_BP, HEART_DISEASE_RISK];
