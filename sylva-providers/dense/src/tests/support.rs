use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;

pub(crate) fn build_list_array(rows: &[Vec<f32>], dimension: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, false)),
        i32::try_from(dimension).expect("dimension fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn feature_field(dimension: usize, child_nullable: bool, list_nullable: bool) -> Field {
    Field::new(
        "features",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, child_nullable)),
            i32::try_from(dimension).expect("dimension fits in i32"),
        ),
        list_nullable,
    )
}

/// Writes the given columns as a single-batch Parquet file.
pub(crate) fn write_parquet(columns: Vec<(Field, ArrayRef)>) -> Bytes {
    let (fields, arrays): (Vec<_>, Vec<_>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("batch");
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

/// Parquet file with three-dimensional `features` and optional `name` labels.
pub(crate) fn points_parquet(rows: &[Vec<f32>], labels: Option<&[Option<&str>]>) -> Bytes {
    let mut columns = vec![(
        feature_field(3, false, false),
        Arc::new(build_list_array(rows, 3)) as ArrayRef,
    )];
    if let Some(labels) = labels {
        columns.push((
            Field::new("name", DataType::Utf8, true),
            Arc::new(StringArray::from(labels.to_vec())) as ArrayRef,
        ));
    }
    write_parquet(columns)
}
