//! Tabular metadata: schemas, columns, constraints and records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConstraints {
    #[serde(default)]
    pub other: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnConstraints {
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub other: Vec<String>,
}

impl Default for TableColumnConstraints {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            other: Vec::new(),
        }
    }
}

fn default_nullable() -> bool {
    true
}

fn default_column_type() -> String {
    "string".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub name: String,
    #[serde(rename = "type", default = "default_column_type")]
    pub column_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub constraints: TableColumnConstraints,
}

impl TableColumn {
    /// A nullable `string` column with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: default_column_type(),
            description: None,
            constraints: TableColumnConstraints::default(),
        }
    }

    pub fn with_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_constraints(mut self, constraints: TableColumnConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub constraints: Option<TableConstraints>,
}

impl TableSchema {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            constraints: None,
        }
    }

    /// Table-level constraints, empty when the response omitted them.
    pub fn constraints(&self) -> TableConstraints {
        self.constraints.clone().unwrap_or_default()
    }

    /// Infers columns from the first record, in its field order. Later
    /// records are not inspected.
    pub fn infer(records: &[TableRecord]) -> Self {
        let columns = records
            .first()
            .map(|record| {
                record
                    .fields()
                    .map(|(name, value)| {
                        TableColumn::new(name.clone()).with_type(value.type_name())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self::new(columns)
    }
}

/// A single cell value. Null is not representable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl TableValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TableValue::Bool(_) => "bool",
            TableValue::Int(_) => "int",
            TableValue::Float(_) => "float",
            TableValue::String(_) => "string",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("record field {field} must be a string, int, float or bool")]
pub struct InvalidRecordValue {
    pub field: String,
}

/// One table row. Fields keep the order they were written in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct TableRecord {
    fields: Vec<(String, TableValue)>,
}

impl TableRecord {
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, TableValue)>,
        K: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&TableValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &TableValue)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }
}

impl TryFrom<Map<String, Value>> for TableRecord {
    type Error = InvalidRecordValue;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields = map
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    Value::Bool(flag) => TableValue::Bool(flag),
                    Value::String(text) => TableValue::String(text),
                    Value::Number(number) => match number.as_i64() {
                        Some(int) => TableValue::Int(int),
                        None => match number.as_f64() {
                            Some(float) => TableValue::Float(float),
                            None => return Err(InvalidRecordValue { field }),
                        },
                    },
                    Value::Null | Value::Array(_) | Value::Object(_) => {
                        return Err(InvalidRecordValue { field });
                    }
                };
                Ok((field, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }
}

impl From<TableRecord> for Map<String, Value> {
    fn from(record: TableRecord) -> Self {
        record
            .fields
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    TableValue::Bool(flag) => Value::Bool(flag),
                    TableValue::Int(int) => Value::from(int),
                    TableValue::Float(float) => {
                        Number::from_f64(float).map_or(Value::Null, Value::Number)
                    }
                    TableValue::String(text) => Value::String(text),
                };
                (field, value)
            })
            .collect()
    }
}

/// Wire form of a table: records travel as individual JSON strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub schema: TableSchema,
    pub records: Vec<String>,
}

impl Table {
    pub fn from_records(records: &[TableRecord]) -> Result<Self, serde_json::Error> {
        Self::with_schema(TableSchema::infer(records), records)
    }

    pub fn with_schema(
        schema: TableSchema,
        records: &[TableRecord],
    ) -> Result<Self, serde_json::Error> {
        let records = records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { schema, records })
    }

    pub fn parsed_records(&self) -> Result<Vec<TableRecord>, serde_json::Error> {
        self.records
            .iter()
            .map(|record| serde_json::from_str(record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<TableRecord> {
        vec![
            TableRecord::new([
                ("name", TableValue::String("foo".into())),
                ("status", TableValue::Bool(false)),
            ]),
            TableRecord::new([
                ("name", TableValue::String("bar".into())),
                ("status", TableValue::Bool(true)),
            ]),
        ]
    }

    #[test]
    fn infers_schema_from_first_record() {
        let schema = TableSchema::infer(&sample_records());

        assert_eq!(
            schema.columns,
            vec![
                TableColumn::new("name").with_type("string"),
                TableColumn::new("status").with_type("bool"),
            ]
        );
    }

    #[test]
    fn infer_of_no_records_is_empty() {
        assert!(TableSchema::infer(&[]).columns.is_empty());
    }

    #[test]
    fn column_defaults_match_wire_defaults() {
        let column: TableColumn = serde_json::from_value(json!({"name": "foo"})).unwrap();

        assert_eq!(column.column_type, "string");
        assert_eq!(column.description, None);
        assert!(column.constraints.nullable);
        assert!(!column.constraints.unique);
        assert!(column.constraints.other.is_empty());
    }

    #[test]
    fn schema_with_null_constraints_defaults_to_empty() {
        let schema: TableSchema = serde_json::from_value(json!({
            "columns": [],
            "constraints": null
        }))
        .unwrap();

        assert_eq!(schema.constraints(), TableConstraints::default());
    }

    #[test]
    fn record_values_keep_their_kind() {
        let record: TableRecord =
            serde_json::from_str(r#"{"a": 1, "b": 1.5, "c": "x", "d": true}"#).unwrap();

        assert_eq!(record.get("a"), Some(&TableValue::Int(1)));
        assert_eq!(record.get("b"), Some(&TableValue::Float(1.5)));
        assert_eq!(record.get("c"), Some(&TableValue::String("x".into())));
        assert_eq!(record.get("d"), Some(&TableValue::Bool(true)));
        assert_eq!(record.get("e"), None);
    }

    #[test]
    fn null_record_value_is_rejected() {
        assert!(serde_json::from_str::<TableRecord>(r#"{"a": null}"#).is_err());
        assert!(serde_json::from_str::<TableRecord>(r#"{"a": [1]}"#).is_err());
    }

    #[test]
    fn record_field_order_is_kept() {
        let record: TableRecord =
            serde_json::from_str(r#"{"status": true, "name": "foo"}"#).unwrap();

        let schema = TableSchema::infer(std::slice::from_ref(&record));
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["status", "name"]);
        assert_eq!(schema.columns[0].column_type, "bool");

        let table = Table::from_records(&[record.clone()]).expect("build table");
        assert_eq!(table.records[0], r#"{"status":true,"name":"foo"}"#);
        assert_eq!(table.parsed_records().unwrap(), vec![record]);
    }

    #[test]
    fn table_records_are_json_strings_on_the_wire() {
        let table = Table::from_records(&sample_records()).expect("build table");

        assert_eq!(table.records[0], r#"{"name":"foo","status":false}"#);
        assert_eq!(table.parsed_records().unwrap(), sample_records());
        assert_eq!(table.schema.columns.len(), 2);
    }
}
