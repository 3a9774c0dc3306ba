use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::asset_graph::AssetKey;
use super::table::{Table, TableSchema};

/// One labelled metadata value attached to an event, discriminated by
/// `__typename`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum MetadataEntry {
    #[serde(rename = "PathMetadataEntry")]
    Path {
        label: String,
        #[serde(default)]
        description: Option<String>,
        path: String,
    },
    #[serde(rename = "JsonMetadataEntry", rename_all = "camelCase")]
    Json {
        label: String,
        #[serde(default)]
        description: Option<String>,
        json_string: String,
    },
    #[serde(rename = "UrlMetadataEntry")]
    Url {
        label: String,
        #[serde(default)]
        description: Option<String>,
        url: String,
    },
    #[serde(rename = "TextMetadataEntry")]
    Text {
        label: String,
        #[serde(default)]
        description: Option<String>,
        text: String,
    },
    #[serde(rename = "MarkdownMetadataEntry", rename_all = "camelCase")]
    Markdown {
        label: String,
        #[serde(default)]
        description: Option<String>,
        md_str: String,
    },
    #[serde(rename = "PythonArtifactMetadataEntry")]
    PythonArtifact {
        label: String,
        #[serde(default)]
        description: Option<String>,
        module: String,
        name: String,
    },
    /// `floatValue` is null for NaN and infinities.
    #[serde(rename = "FloatMetadataEntry", rename_all = "camelCase")]
    Float {
        label: String,
        #[serde(default)]
        description: Option<String>,
        float_value: Option<f64>,
    },
    /// `intValue` is null when the integer does not fit in 64 bits;
    /// `intRepr` always carries the exact value.
    #[serde(rename = "IntMetadataEntry", rename_all = "camelCase")]
    Int {
        label: String,
        #[serde(default)]
        description: Option<String>,
        int_value: Option<i64>,
        int_repr: String,
    },
    #[serde(rename = "PipelineRunMetadataEntry", rename_all = "camelCase")]
    PipelineRun {
        label: String,
        #[serde(default)]
        description: Option<String>,
        run_id: String,
    },
    #[serde(rename = "AssetMetadataEntry", rename_all = "camelCase")]
    Asset {
        label: String,
        #[serde(default)]
        description: Option<String>,
        asset_key: AssetKey,
    },
    #[serde(rename = "TableMetadataEntry")]
    Table {
        label: String,
        #[serde(default)]
        description: Option<String>,
        table: Table,
    },
    #[serde(rename = "TableSchemaMetadataEntry")]
    TableSchema {
        label: String,
        #[serde(default)]
        description: Option<String>,
        schema: TableSchema,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error(
        "Could not resolve the metadata value for \"{label}\" to a known type. \
         Consider wrapping the value with the appropriate metadata type."
    )]
    UnresolvableValue { label: String },
}

impl MetadataEntry {
    /// Resolves a raw JSON value into the entry variant a server would emit
    /// for it.
    pub fn from_value(label: impl Into<String>, value: Value) -> Result<Self, MetadataError> {
        let label = label.into();
        let description = None;

        match value {
            Value::String(text) => Ok(MetadataEntry::Text {
                label,
                description,
                text,
            }),
            Value::Number(number) => {
                if let Some(int_value) = number.as_i64() {
                    Ok(MetadataEntry::Int {
                        label,
                        description,
                        int_value: Some(int_value),
                        int_repr: int_value.to_string(),
                    })
                } else if number.is_u64() {
                    Ok(MetadataEntry::Int {
                        label,
                        description,
                        int_value: None,
                        int_repr: number.to_string(),
                    })
                } else {
                    Ok(MetadataEntry::Float {
                        label,
                        description,
                        float_value: number.as_f64().filter(|value| value.is_finite()),
                    })
                }
            }
            json @ (Value::Object(_) | Value::Array(_)) => Ok(MetadataEntry::Json {
                label,
                description,
                json_string: json.to_string(),
            }),
            Value::Bool(_) | Value::Null => Err(MetadataError::UnresolvableValue { label }),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MetadataEntry::Path { label, .. }
            | MetadataEntry::Json { label, .. }
            | MetadataEntry::Url { label, .. }
            | MetadataEntry::Text { label, .. }
            | MetadataEntry::Markdown { label, .. }
            | MetadataEntry::PythonArtifact { label, .. }
            | MetadataEntry::Float { label, .. }
            | MetadataEntry::Int { label, .. }
            | MetadataEntry::PipelineRun { label, .. }
            | MetadataEntry::Asset { label, .. }
            | MetadataEntry::Table { label, .. }
            | MetadataEntry::TableSchema { label, .. } => label,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            MetadataEntry::Path { description, .. }
            | MetadataEntry::Json { description, .. }
            | MetadataEntry::Url { description, .. }
            | MetadataEntry::Text { description, .. }
            | MetadataEntry::Markdown { description, .. }
            | MetadataEntry::PythonArtifact { description, .. }
            | MetadataEntry::Float { description, .. }
            | MetadataEntry::Int { description, .. }
            | MetadataEntry::PipelineRun { description, .. }
            | MetadataEntry::Asset { description, .. }
            | MetadataEntry::Table { description, .. }
            | MetadataEntry::TableSchema { description, .. } => description.as_deref(),
        }
    }

    /// The `__typename` discriminator for this variant.
    pub fn typename(&self) -> &'static str {
        match self {
            MetadataEntry::Path { .. } => "PathMetadataEntry",
            MetadataEntry::Json { .. } => "JsonMetadataEntry",
            MetadataEntry::Url { .. } => "UrlMetadataEntry",
            MetadataEntry::Text { .. } => "TextMetadataEntry",
            MetadataEntry::Markdown { .. } => "MarkdownMetadataEntry",
            MetadataEntry::PythonArtifact { .. } => "PythonArtifactMetadataEntry",
            MetadataEntry::Float { .. } => "FloatMetadataEntry",
            MetadataEntry::Int { .. } => "IntMetadataEntry",
            MetadataEntry::PipelineRun { .. } => "PipelineRunMetadataEntry",
            MetadataEntry::Asset { .. } => "AssetMetadataEntry",
            MetadataEntry::Table { .. } => "TableMetadataEntry",
            MetadataEntry::TableSchema { .. } => "TableSchemaMetadataEntry",
        }
    }
}
