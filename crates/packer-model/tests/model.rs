//! Tests for packer-model types.

use packer_model::{
    CellValue, Concept, ExportRow, ExportTable, IdColumn, Observation, ObservationTable,
};

fn age() -> Concept {
    Concept::new("\\01.Patient\\Age\\", "Individual.age", "Age")
}

#[test]
fn observation_table_tracks_populated_columns() {
    let table = ObservationTable::from_observations(vec![
        Observation::new(age())
            .with_id(IdColumn::Subject, "P1")
            .with_numeric_value(42.0),
        Observation::new(age())
            .with_id(IdColumn::Subject, "P2")
            .with_id(IdColumn::Study, "STUDY1")
            .with_id(IdColumn::Diagnosis, "")
            .with_numeric_value(39.0),
    ]);

    assert_eq!(table.id_columns, vec![IdColumn::Subject, IdColumn::Study]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.observations[1].id(IdColumn::Diagnosis), None);
}

#[test]
fn push_keeps_columns_in_output_order() {
    let mut table = ObservationTable::new([IdColumn::Biosource]);
    table.push(Observation::new(age()).with_id(IdColumn::Subject, "P1"));

    assert_eq!(table.id_columns, vec![IdColumn::Subject, IdColumn::Biosource]);
    assert!(table.has_column(IdColumn::Biosource));
    assert!(!table.has_column(IdColumn::Study));
}

#[test]
fn export_table_header_keeps_duplicate_names() {
    let mut table = ExportTable::new(
        vec![IdColumn::Subject],
        vec![
            Concept::new("\\01\\Name\\", "Individual.name", "Name"),
            Concept::new("\\02\\Name\\", "Diagnosis.name", "Name"),
        ],
    );
    table.push_row(ExportRow::new(
        vec![Some("P1".to_string())],
        vec![CellValue::text("Patient 1"), CellValue::Missing],
    ));

    assert_eq!(table.header(), vec!["Subject Id", "Name", "Name"]);
    assert_eq!(table.width(), 3);
    assert_eq!(
        table.rendered_rows(),
        vec![vec!["P1".to_string(), "Patient 1".to_string(), String::new()]]
    );
    assert_eq!(table.id_value(0, IdColumn::Subject), Some("P1"));
    assert_eq!(
        table.value(0, "\\01\\Name\\"),
        Some(&CellValue::text("Patient 1"))
    );
}

#[test]
fn export_table_serializes() {
    let table = ExportTable::new(vec![IdColumn::Subject, IdColumn::Study], vec![age()]);
    let json = serde_json::to_string(&table).expect("serialize table");
    let round: ExportTable = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round, table);
}
