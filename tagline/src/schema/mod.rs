//! Typed mirrors of the asset query responses. Unions are discriminated by
//! the `__typename` field, one variant per concrete type.

pub mod asset_graph;
pub mod events;
pub mod labels;
pub mod metadata;
pub mod table;

pub use asset_graph::{
    Asset, AssetKey, AssetNode, AssetNodeOrError, AssetOrError, PythonError, Repository,
    RepositoryLocation, ResultError,
};
pub use events::{
    AssetLineageInfo, Materialization, MaterializationEvent, RunMarker, StepEventStatus,
    StepStats,
};
pub use labels::collect_labels;
pub use metadata::{MetadataEntry, MetadataError};
pub use table::{
    InvalidRecordValue, Table, TableColumn, TableColumnConstraints, TableConstraints,
    TableRecord, TableSchema, TableValue,
};
