use serde::{Deserialize, Serialize};

use super::events::MaterializationEvent;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub path: Vec<String>,
}

impl AssetKey {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_user_string(&self) -> String {
        self.path.join("/")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLocation {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub location: RepositoryLocation,
}

/// A node in the asset graph and its immediate edges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNode {
    pub id: String,
    pub op_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub compute_kind: Option<String>,
    #[serde(default)]
    pub job_names: Vec<String>,
    pub asset_key: AssetKey,
    #[serde(default)]
    pub dependency_keys: Vec<AssetKey>,
    #[serde(default)]
    pub depended_by_keys: Vec<AssetKey>,
    pub repository: Repository,
}

impl AssetNode {
    /// Strings shown as colored labels next to the node: the compute kind
    /// first, then each job.
    pub fn badge_labels(&self) -> Vec<&str> {
        self.compute_kind
            .as_deref()
            .into_iter()
            .chain(self.job_names.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub key: AssetKey,
    #[serde(default)]
    pub asset_materializations: Vec<MaterializationEvent>,
    #[serde(default)]
    pub definition: Option<AssetNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonError {
    pub message: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("asset not found: {message}")]
    AssetNotFound { message: String },
    #[error("python error: {}", .0.message)]
    Python(PythonError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum AssetOrError {
    Asset(Asset),
    #[serde(rename = "AssetNotFoundError")]
    NotFound { message: String },
    #[serde(rename = "PythonError")]
    Python(PythonError),
}

impl AssetOrError {
    pub fn into_result(self) -> Result<Asset, ResultError> {
        match self {
            AssetOrError::Asset(asset) => Ok(asset),
            AssetOrError::NotFound { message } => Err(ResultError::AssetNotFound { message }),
            AssetOrError::Python(error) => Err(ResultError::Python(error)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum AssetNodeOrError {
    AssetNode(AssetNode),
    #[serde(rename = "AssetNotFoundError")]
    NotFound { message: String },
    #[serde(rename = "PythonError")]
    Python(PythonError),
}

impl AssetNodeOrError {
    pub fn into_result(self) -> Result<AssetNode, ResultError> {
        match self {
            AssetNodeOrError::AssetNode(node) => Ok(node),
            AssetNodeOrError::NotFound { message } => Err(ResultError::AssetNotFound { message }),
            AssetNodeOrError::Python(error) => Err(ResultError::Python(error)),
        }
    }
}
