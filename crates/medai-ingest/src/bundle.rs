//! Wire model for bundle documents.
//!
//! Only the fields the extractor reads are modeled. Resource types other
//! than demographics, observations, and conditions are accepted and ignored
//! whatever their shape. Within the modeled resources, a field whose JSON
//! shape does not match reads as absent instead of rejecting the resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use medai_model::SourceValue;

/// Top-level `resourceType` a document must carry to be processed.
pub const BUNDLE_RESOURCE_TYPE: &str = "Bundle";

/// One input document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// One clinical fact inside a bundle.
///
/// The resource is kept as raw JSON until it is visited, so an unexpected
/// shape in a resource type nobody reads never rejects the bundle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub resource: Value,
}

impl Entry {
    /// The declared `resourceType` of this entry's resource, if any.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource.get("resourceType").and_then(Value::as_str)
    }

    /// Decode the resource into the typed model.
    ///
    /// Entries without a resource or without a string `resourceType` decode
    /// to [`Resource::Other`].
    pub fn resource(&self) -> Resource {
        if self.resource_type().is_none() {
            return Resource::Other;
        }
        Resource::deserialize(&self.resource).unwrap_or(Resource::Other)
    }
}

/// Decode `T` from whatever JSON is present, falling back to `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode each array element leniently. Anything but an array is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_elements(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`lenient_list`], but keeps "no list" apart from an empty one.
fn lenient_optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_elements(Value::deserialize(deserializer)?))
}

fn lenient_elements<T>(value: Value) -> Option<Vec<T>>
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    }
}

/// Typed view of the resources the extractor understands.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Observation(Observation),
    Condition(Condition),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    /// Only a string birth date is usable; any other value reads as absent.
    #[serde(deserialize_with = "lenient")]
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Observation {
    #[serde(deserialize_with = "lenient")]
    pub code: CodeableConcept,
    #[serde(deserialize_with = "lenient")]
    pub value_quantity: Option<Quantity>,
    #[serde(deserialize_with = "lenient")]
    pub value_codeable_concept: Option<CodeableConcept>,
    /// Sub-measurements of a composite observation. `Some(vec![])` is an
    /// explicitly empty list, which is distinct from no list at all.
    #[serde(deserialize_with = "lenient_optional_list")]
    pub component: Option<Vec<Component>>,
}

impl Observation {
    /// Scalar value of `valueQuantity`, if present and non-null.
    pub fn quantity_value(&self) -> Option<SourceValue> {
        self.value_quantity.as_ref().and_then(Quantity::source_value)
    }

    /// Lower-cased `valueCodeableConcept.text`, or empty.
    pub fn concept_text(&self) -> String {
        self.value_codeable_concept
            .as_ref()
            .map(CodeableConcept::text_lowercase)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "lenient")]
    pub code: CodeableConcept,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    #[serde(deserialize_with = "lenient")]
    pub code: CodeableConcept,
    #[serde(deserialize_with = "lenient")]
    pub value_quantity: Option<Quantity>,
}

impl Component {
    pub fn quantity_value(&self) -> Option<SourceValue> {
        self.value_quantity.as_ref().and_then(Quantity::source_value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CodeableConcept {
    #[serde(deserialize_with = "lenient_list")]
    pub coding: Vec<Coding>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// The first coding, which is the one matched against coded identifiers.
    pub fn primary_coding(&self) -> Option<&Coding> {
        self.coding.first()
    }

    /// Code of the first coding.
    pub fn primary_code(&self) -> Option<&str> {
        self.primary_coding().and_then(|c| c.code.as_deref())
    }

    /// Lower-cased display text of the first coding, or empty.
    pub fn display_lowercase(&self) -> String {
        self.primary_coding()
            .and_then(|c| c.display.as_deref())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Lower-cased free text, or empty.
    pub fn text_lowercase(&self) -> String {
        self.text.as_deref().map(str::to_lowercase).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Coding {
    #[serde(deserialize_with = "lenient")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Quantity {
    pub value: Value,
}

impl Quantity {
    /// The raw scalar, left uncoerced. `null` or absent values are `None`;
    /// strings are kept as text and structured values as their JSON text.
    pub fn source_value(&self) -> Option<SourceValue> {
        match &self.value {
            Value::Null => None,
            Value::Number(n) => Some(match n.as_f64() {
                Some(v) => SourceValue::Number(v),
                None => SourceValue::Text(n.to_string()),
            }),
            Value::String(s) => Some(SourceValue::Text(s.clone())),
            other => Some(SourceValue::Text(other.to_string())),
        }
    }
}
