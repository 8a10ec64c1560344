use serde_json::{Value, json};
use systemspr_schema::SchemaImporter;

fn document(datapoints: Value) -> String {
    json!({ "exchanged_data": { "datapoints": datapoints } }).to_string()
}

fn status_point(pivot_type: &str) -> Value {
    json!({
        "label": "TS-1",
        "pivot_id": "M_2367_3_15_4",
        "pivot_type": pivot_type,
        "pivot_subtypes": ["prt.inf"],
        "protocols": [
            { "name": "IEC104", "typeid": "M_ME_NC_1", "address": "3271612" }
        ]
    })
}

fn import(document: &str) -> SchemaImporter {
    let mut importer = SchemaImporter::new();
    importer.import_exchanged_data(document);
    importer
}

#[test]
fn single_point_status_enables_tracking() {
    let importer = import(&document(json!([status_point("SpsTyp")])));
    assert!(importer.has_connection_loss_tracking());
}

#[test]
fn double_point_status_enables_tracking() {
    let importer = import(&document(json!([status_point("DpsTyp")])));
    assert!(importer.has_connection_loss_tracking());
}

#[test]
fn malformed_documents_disable_tracking() {
    let documents = [
        "{42}".to_string(),
        "42".to_string(),
        "{}".to_string(),
        json!({ "exchanged_data": 42 }).to_string(),
        json!({ "exchanged_data": {} }).to_string(),
        json!({ "exchanged_data": { "datapoints": 42 } }).to_string(),
        document(json!([])),
        document(json!([42, "TS-1"])),
    ];
    for doc in documents {
        assert!(
            !import(&doc).has_connection_loss_tracking(),
            "tracking enabled by {doc}"
        );
    }
}

#[test]
fn malformed_datapoints_disable_tracking() {
    let mut no_type = status_point("SpsTyp");
    no_type.as_object_mut().unwrap().remove("pivot_type");
    let mut no_pivot_id = status_point("SpsTyp");
    no_pivot_id.as_object_mut().unwrap().remove("pivot_id");
    let mut no_label = status_point("SpsTyp");
    no_label.as_object_mut().unwrap().remove("label");
    let mut no_subtypes = status_point("SpsTyp");
    no_subtypes.as_object_mut().unwrap().remove("pivot_subtypes");

    let mut type_not_string = status_point("SpsTyp");
    type_not_string["pivot_type"] = json!(42);
    let mut pivot_id_not_string = status_point("SpsTyp");
    pivot_id_not_string["pivot_id"] = json!(42);
    let mut label_not_string = status_point("SpsTyp");
    label_not_string["label"] = json!(42);
    let mut subtypes_not_array = status_point("SpsTyp");
    subtypes_not_array["pivot_subtypes"] = json!(42);
    let mut subtypes_not_strings = status_point("SpsTyp");
    subtypes_not_strings["pivot_subtypes"] = json!([42]);
    let mut unknown_subtype = status_point("SpsTyp");
    unknown_subtype["pivot_subtypes"] = json!(["trip.phs"]);

    let datapoints = [
        no_type,
        type_not_string,
        status_point("MvTyp"),
        no_pivot_id,
        pivot_id_not_string,
        no_label,
        label_not_string,
        no_subtypes,
        subtypes_not_array,
        subtypes_not_strings,
        unknown_subtype,
    ];
    for datapoint in datapoints {
        let importer = import(&document(json!([datapoint.clone()])));
        assert!(
            !importer.has_connection_loss_tracking(),
            "tracking enabled by {datapoint}"
        );
    }
}

#[test]
fn scan_continues_past_invalid_datapoints() {
    let importer = import(&document(json!([
        42,
        { "pivot_type": "SpsTyp" },
        status_point("MvTyp"),
        status_point("DpsTyp")
    ])));
    assert!(importer.has_connection_loss_tracking());
}

#[test]
fn failed_import_resets_previous_tracking() {
    let mut importer = SchemaImporter::new();
    importer.import_exchanged_data(&document(json!([status_point("SpsTyp")])));
    assert!(importer.has_connection_loss_tracking());

    importer.import_exchanged_data("{42}");
    assert!(!importer.has_connection_loss_tracking());
}

#[test]
fn import_asset_is_independent_of_schema() {
    let mut importer = SchemaImporter::new();
    assert_eq!(importer.tracked_asset(), "");

    importer.import_asset("CONNECTION-1");
    assert_eq!(importer.tracked_asset(), "CONNECTION-1");
    assert!(!importer.has_connection_loss_tracking());
    assert!(!importer.tracking().is_active());

    importer.import_exchanged_data(&document(json!([status_point("SpsTyp")])));
    assert_eq!(importer.tracked_asset(), "CONNECTION-1");
    assert!(importer.tracking().is_active());

    importer.import_asset("");
    assert_eq!(importer.tracked_asset(), "");
    assert!(importer.has_connection_loss_tracking());
}
