use serde_json::json;
use tagline_lib::schema::{
    collect_labels, AssetOrError, MetadataEntry, ResultError, TableValue,
};
use tagline_lib::Badge;

fn asset_response() -> serde_json::Value {
    json!({
        "__typename": "Asset",
        "id": "warehouse.orders",
        "key": {"path": ["warehouse", "orders"]},
        "assetMaterializations": [{
            "__typename": "StepMaterializationEvent",
            "runId": "4f6b0c1e",
            "timestamp": "1639062700123",
            "stepKey": "orders",
            "stepStats": {
                "runId": "4f6b0c1e",
                "stepKey": "orders",
                "status": "SUCCESS",
                "startTime": 1639062690.0,
                "endTime": 1639062700.0
            },
            "partition": "2021-12-09",
            "materialization": {
                "label": "orders",
                "description": "Nightly orders rollup",
                "metadataEntries": [
                    {
                        "__typename": "IntMetadataEntry",
                        "label": "row_count",
                        "description": null,
                        "intValue": 1024,
                        "intRepr": "1024"
                    },
                    {
                        "__typename": "PythonArtifactMetadataEntry",
                        "label": "loader",
                        "description": null,
                        "module": "warehouse.loaders",
                        "name": "load_orders"
                    },
                    {
                        "__typename": "TableMetadataEntry",
                        "label": "preview",
                        "description": null,
                        "table": {
                            "schema": {
                                "columns": [
                                    {"name": "id", "type": "int", "description": null,
                                     "constraints": {"nullable": false, "unique": true, "other": []}},
                                    {"name": "status", "type": "string", "description": null,
                                     "constraints": {"nullable": true, "unique": false, "other": []}}
                                ],
                                "constraints": {"other": ["id > 0"]}
                            },
                            "records": ["{\"id\": 1, \"status\": \"shipped\"}"]
                        }
                    },
                    {
                        "__typename": "TableSchemaMetadataEntry",
                        "label": "schema",
                        "description": null,
                        "schema": {"columns": [{"name": "id"}], "constraints": null}
                    },
                    {
                        "__typename": "AssetMetadataEntry",
                        "label": "upstream",
                        "description": null,
                        "assetKey": {"path": ["raw", "orders"]}
                    }
                ]
            },
            "assetLineage": []
        }],
        "definition": null
    })
}

#[test]
fn asset_response_round_trips_through_union() {
    let asset = serde_json::from_value::<AssetOrError>(asset_response())
        .expect("parse asset response")
        .into_result()
        .expect("asset variant");

    assert_eq!(asset.key.to_user_string(), "warehouse/orders");
    let event = &asset.asset_materializations[0];
    let typenames: Vec<&str> = event
        .materialization
        .metadata_entries
        .iter()
        .map(MetadataEntry::typename)
        .collect();
    assert_eq!(
        typenames,
        vec![
            "IntMetadataEntry",
            "PythonArtifactMetadataEntry",
            "TableMetadataEntry",
            "TableSchemaMetadataEntry",
            "AssetMetadataEntry",
        ]
    );

    let value = serde_json::to_value(AssetOrError::Asset(asset.clone())).expect("serialize");
    let reparsed: AssetOrError = serde_json::from_value(value).expect("reparse");
    assert_eq!(reparsed, AssetOrError::Asset(asset));
}

#[test]
fn table_entry_records_parse() {
    let asset = serde_json::from_value::<AssetOrError>(asset_response())
        .unwrap()
        .into_result()
        .unwrap();

    let entry = &asset.asset_materializations[0].materialization.metadata_entries[2];
    let MetadataEntry::Table { table, .. } = entry else {
        panic!("expected table entry, got {}", entry.typename());
    };

    assert!(!table.schema.columns[0].constraints.nullable);
    assert_eq!(table.schema.constraints().other, vec!["id > 0"]);
    let records = table.parsed_records().expect("parse records");
    assert_eq!(records[0].get("id"), Some(&TableValue::Int(1)));
}

#[test]
fn labels_from_response_become_badges() {
    let asset = serde_json::from_value::<AssetOrError>(asset_response())
        .unwrap()
        .into_result()
        .unwrap();

    let labels = collect_labels(&asset.asset_materializations[0]);
    assert_eq!(
        labels,
        vec!["orders", "row_count", "loader", "preview", "schema", "upstream"]
    );

    let badges: Vec<Badge> = labels.into_iter().map(Badge::for_label).collect();
    assert_eq!(badges[0].style_key, "olive");
    assert_eq!(badges[1].style_key, "red");
    assert_eq!(badges[3].style_key, "gray");
}

#[test]
fn missing_asset_surfaces_message() {
    let result: AssetOrError = serde_json::from_value(json!({
        "__typename": "AssetNotFoundError",
        "message": "Asset key warehouse/gone not found."
    }))
    .unwrap();

    match result.into_result() {
        Err(ResultError::AssetNotFound { message }) => {
            assert!(message.contains("warehouse/gone"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
