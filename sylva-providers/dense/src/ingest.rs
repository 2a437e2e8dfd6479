//! Helpers for copying Arrow columns into dense buffers.
use std::sync::Arc;

use arrow_array::{Array, ArrayRef, FixedSizeListArray, Float32Array, StringArray};
use arrow_schema::{DataType, Field};

use crate::errors::DenseDataSetError;

/// Checks that `field` is a non-nullable `FixedSizeList<Float32, D>` with
/// `D > 0` and returns `D`.
pub(crate) fn validate_feature_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseDataSetError> {
    let DataType::FixedSizeList(child, width) = field.data_type() else {
        return Err(DenseDataSetError::InvalidColumnType {
            column: column.to_owned(),
            actual: field.data_type().clone(),
        });
    };
    if field.is_nullable() || child.is_nullable() {
        return Err(DenseDataSetError::NullableField {
            column: column.to_owned(),
            nullable_child: child.is_nullable(),
        });
    }
    if child.data_type() != &DataType::Float32 {
        return Err(DenseDataSetError::InvalidListValueType {
            actual: child.data_type().clone(),
        });
    }
    positive_width(*width)
}

/// Checks that `field` holds `Utf8` labels.
pub(crate) fn validate_label_field(field: &Field, column: &str) -> Result<(), DenseDataSetError> {
    match field.data_type() {
        DataType::Utf8 => Ok(()),
        other => Err(DenseDataSetError::InvalidLabelType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

fn positive_width(width: i32) -> Result<usize, DenseDataSetError> {
    match usize::try_from(width) {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(DenseDataSetError::InvalidDimension { actual: width }),
    }
}

/// Downcasts a column to a feature list array.
pub(crate) fn as_feature_list<'a>(
    array: &'a ArrayRef,
    column: &str,
) -> Result<&'a FixedSizeListArray, DenseDataSetError> {
    array
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| DenseDataSetError::InvalidColumnType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}

/// Downcasts a column to a label array.
pub(crate) fn as_label_array<'a>(
    array: &'a ArrayRef,
    column: &str,
) -> Result<&'a StringArray, DenseDataSetError> {
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| DenseDataSetError::InvalidLabelType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}

/// Appends every row of `array` to `out` and returns the row width.
///
/// `expected_dimension` pins the width established by earlier batches;
/// `start_row` offsets row indices in error reports.
pub(crate) fn append_feature_rows(
    array: &FixedSizeListArray,
    expected_dimension: Option<usize>,
    start_row: usize,
    out: &mut Vec<f32>,
) -> Result<usize, DenseDataSetError> {
    let value_type = array.value_type();
    if value_type != DataType::Float32 {
        return Err(DenseDataSetError::InvalidListValueType { actual: value_type });
    }
    let dimension = positive_width(array.value_length())?;
    if let Some(expected) = expected_dimension.filter(|&expected| expected != dimension) {
        return Err(DenseDataSetError::InconsistentBatchDimension {
            expected,
            actual: dimension,
        });
    }

    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseDataSetError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseDataSetError::NullRow { row });
        }
        let values = array.value(row_index);
        let floats = values
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| DenseDataSetError::InvalidListValueType {
                actual: values.data_type().clone(),
            })?;
        if floats.len() != dimension {
            return Err(DenseDataSetError::InvalidRowLength {
                row,
                expected: dimension,
                actual: floats.len(),
            });
        }
        if let Some(value_index) = (0..dimension).find(|&index| floats.is_null(index)) {
            return Err(DenseDataSetError::NullValue { row, value_index });
        }
        out.extend(floats.values().iter().copied());
    }
    Ok(dimension)
}

/// Appends every label of `array` to `out`, rejecting nulls.
pub(crate) fn append_labels(
    array: &StringArray,
    start_row: usize,
    out: &mut Vec<Arc<str>>,
) -> Result<(), DenseDataSetError> {
    out.reserve(array.len());
    for (offset, label) in array.iter().enumerate() {
        let label = label.ok_or(DenseDataSetError::NullLabel {
            row: start_row + offset,
        })?;
        out.push(Arc::from(label));
    }
    Ok(())
}
