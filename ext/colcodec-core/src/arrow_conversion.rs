//! Bidirectional conversion between Arrow arrays and wire cells
//!
//! Arrow's type system cannot tell a list from a set, a uuid from a
//! timeuuid, or a tuple from a user type, so both directions are driven by
//! the wire [`DataType`] of the column. The layout is:
//!
//! - varint as big-endian two's-complement binary
//! - uuid and timeuuid as 16-byte fixed binary
//! - timestamps as UTC milliseconds, dates as days since epoch
//! - lists and sets as lists, maps as maps with `key`/`value` entries
//! - tuples as structs with positional field names `"0"`, `"1"`, ...
//! - user types as structs with their own field names

use crate::error::{CodecError, Result};
use crate::property::Property;
use crate::schema::{DataType, ScalarType, Schema, TupleType, UserType};
use crate::value::WireValue;
use arrow_array::{builder::*, Array, ArrayRef, ListArray, MapArray, StructArray};
use arrow_schema::{DataType as ArrowDataType, Field, Fields, TimeUnit};
use bytes::Bytes;
use num::BigInt;
use ordered_float::OrderedFloat;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const UUID_WIDTH: i32 = 16;
const TIMESTAMP_TIMEZONE: &str = "UTC";

/// Convert a wire type descriptor to the Arrow type that carries it
pub fn data_type_to_arrow(data_type: &DataType) -> ArrowDataType {
    match data_type {
        DataType::Scalar(scalar) => scalar_type_to_arrow(*scalar),
        DataType::List(item) | DataType::Set(item) => {
            ArrowDataType::List(Arc::new(data_type_to_arrow_field("item", item)))
        }
        DataType::Map(key, value) => {
            let entries = Fields::from(vec![
                Field::new("key", data_type_to_arrow(key), false),
                Field::new("value", data_type_to_arrow(value), true),
            ]);
            ArrowDataType::Map(
                Arc::new(Field::new("entries", ArrowDataType::Struct(entries), false)),
                false, // keys_sorted
            )
        }
        DataType::Tuple(tuple_type) => ArrowDataType::Struct(tuple_fields(tuple_type)),
        DataType::Udt(user_type) => ArrowDataType::Struct(udt_fields(user_type)),
    }
}

fn scalar_type_to_arrow(scalar: ScalarType) -> ArrowDataType {
    match scalar {
        ScalarType::Boolean => ArrowDataType::Boolean,
        ScalarType::TinyInt => ArrowDataType::Int8,
        ScalarType::SmallInt => ArrowDataType::Int16,
        ScalarType::Int => ArrowDataType::Int32,
        ScalarType::BigInt => ArrowDataType::Int64,
        ScalarType::Varint => ArrowDataType::Binary,
        ScalarType::Float => ArrowDataType::Float32,
        ScalarType::Double => ArrowDataType::Float64,
        ScalarType::Text => ArrowDataType::Utf8,
        ScalarType::Blob => ArrowDataType::Binary,
        ScalarType::Uuid | ScalarType::TimeUuid => ArrowDataType::FixedSizeBinary(UUID_WIDTH),
        ScalarType::Timestamp => ArrowDataType::Timestamp(
            TimeUnit::Millisecond,
            Some(Arc::from(TIMESTAMP_TIMEZONE)),
        ),
        ScalarType::Date => ArrowDataType::Date32,
    }
}

fn tuple_fields(tuple_type: &TupleType) -> Fields {
    tuple_type
        .component_types()
        .iter()
        .enumerate()
        .map(|(i, component)| data_type_to_arrow_field(&i.to_string(), component))
        .collect()
}

fn udt_fields(user_type: &UserType) -> Fields {
    user_type
        .fields()
        .iter()
        .map(|(name, field_type)| data_type_to_arrow_field(name, field_type))
        .collect()
}

/// Nullable Arrow field for a named wire type
pub fn data_type_to_arrow_field(name: &str, data_type: &DataType) -> Field {
    Field::new(name, data_type_to_arrow(data_type), true)
}

/// Convert a table schema to an Arrow schema, one field per column
pub fn schema_to_arrow(schema: &Schema) -> Arc<arrow_schema::Schema> {
    let fields: Vec<Field> = schema
        .columns
        .iter()
        .map(|column| data_type_to_arrow_field(&column.name, &column.data_type))
        .collect();
    Arc::new(arrow_schema::Schema::new(fields))
}

fn unexpected(expected: &DataType, value: &WireValue) -> CodecError {
    CodecError::Conversion(format!(
        "Expected {} cell, got {}",
        expected,
        value.type_name()
    ))
}

/// Helper function to downcast an array with better error messages
fn downcast_array<T: 'static>(array: &dyn Array) -> Result<&T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        CodecError::Conversion(format!("Failed to cast to {}", std::any::type_name::<T>()))
    })
}

macro_rules! build_primitive_array {
    ($values:expr, $data_type:expr, $builder:ty, $variant:ident($v:ident) => $append:expr) => {{
        let mut builder = <$builder>::with_capacity($values.len());
        for value in $values {
            match value {
                WireValue::$variant($v) => builder.append_value($append),
                WireValue::Null => builder.append_null(),
                other => return Err(unexpected($data_type, &other)),
            }
        }
        Ok(Arc::new(builder.finish()) as ArrayRef)
    }};
}

/// Convert a column of wire cells to an Arrow array of the descriptor's type
pub fn wire_values_to_arrow_array(
    values: Vec<WireValue>,
    data_type: &DataType,
) -> Result<ArrayRef> {
    match data_type {
        DataType::Scalar(scalar) => build_scalar_array(values, *scalar, data_type),
        DataType::List(item) => build_list_array(values, item, data_type, false),
        DataType::Set(item) => build_list_array(values, item, data_type, true),
        DataType::Map(key, value) => build_map_array(values, key, value, data_type),
        DataType::Tuple(tuple_type) => build_tuple_array(values, tuple_type, data_type),
        DataType::Udt(user_type) => build_udt_array(values, user_type, data_type),
    }
}

fn build_scalar_array(
    values: Vec<WireValue>,
    scalar: ScalarType,
    data_type: &DataType,
) -> Result<ArrayRef> {
    match scalar {
        ScalarType::Boolean => {
            build_primitive_array!(values, data_type, BooleanBuilder, Boolean(b) => b)
        }
        ScalarType::TinyInt => {
            build_primitive_array!(values, data_type, Int8Builder, TinyInt(i) => i)
        }
        ScalarType::SmallInt => {
            build_primitive_array!(values, data_type, Int16Builder, SmallInt(i) => i)
        }
        ScalarType::Int => build_primitive_array!(values, data_type, Int32Builder, Int(i) => i),
        ScalarType::BigInt => {
            build_primitive_array!(values, data_type, Int64Builder, BigInt(i) => i)
        }
        ScalarType::Float => {
            build_primitive_array!(values, data_type, Float32Builder, Float(f) => f.0)
        }
        ScalarType::Double => {
            build_primitive_array!(values, data_type, Float64Builder, Double(f) => f.0)
        }
        ScalarType::Date => build_primitive_array!(values, data_type, Date32Builder, Date(d) => d),
        ScalarType::Timestamp => {
            let mut builder = TimestampMillisecondBuilder::with_capacity(values.len())
                .with_timezone(TIMESTAMP_TIMEZONE);
            for value in values {
                match value {
                    WireValue::Timestamp(t) => builder.append_value(t),
                    WireValue::Null => builder.append_null(),
                    other => return Err(unexpected(data_type, &other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        ScalarType::Text => {
            let mut builder = StringBuilder::with_capacity(values.len(), 0);
            for value in values {
                match value {
                    WireValue::Text(s) => builder.append_value(&s),
                    WireValue::Null => builder.append_null(),
                    other => return Err(unexpected(data_type, &other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        ScalarType::Blob | ScalarType::Varint => {
            let mut builder = BinaryBuilder::with_capacity(values.len(), 0);
            for value in values {
                match (scalar, value) {
                    (ScalarType::Blob, WireValue::Blob(b)) => builder.append_value(&b),
                    (ScalarType::Varint, WireValue::Varint(i)) => {
                        builder.append_value(i.to_signed_bytes_be())
                    }
                    (_, WireValue::Null) => builder.append_null(),
                    (_, other) => return Err(unexpected(data_type, &other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        ScalarType::Uuid | ScalarType::TimeUuid => {
            let mut builder = FixedSizeBinaryBuilder::with_capacity(values.len(), UUID_WIDTH);
            for value in values {
                match (scalar, value) {
                    (ScalarType::Uuid, WireValue::Uuid(u))
                    | (ScalarType::TimeUuid, WireValue::TimeUuid(u)) => {
                        builder.append_value(u.as_bytes())?
                    }
                    (_, WireValue::Null) => builder.append_null(),
                    (_, other) => return Err(unexpected(data_type, &other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
    }
}

/// Build list array; sets use the same layout
fn build_list_array(
    values: Vec<WireValue>,
    item: &DataType,
    data_type: &DataType,
    is_set: bool,
) -> Result<ArrayRef> {
    let mut all_items = Vec::new();
    let mut offsets = Vec::with_capacity(values.len() + 1);
    let mut null_buffer_builder = arrow_buffer::BooleanBufferBuilder::new(values.len());
    offsets.push(0i32);

    for value in values {
        match (is_set, value) {
            (false, WireValue::List(items)) | (true, WireValue::Set(items)) => {
                all_items.extend(items);
                offsets.push(offset(all_items.len())?);
                null_buffer_builder.append(true);
            }
            (_, WireValue::Null) => {
                offsets.push(offset(all_items.len())?);
                null_buffer_builder.append(false);
            }
            (_, other) => return Err(unexpected(data_type, &other)),
        }
    }

    let item_array = wire_values_to_arrow_array(all_items, item)?;
    let offset_buffer = arrow_buffer::OffsetBuffer::new(offsets.into());
    let null_buffer = null_buffer_builder.finish();

    Ok(Arc::new(ListArray::try_new(
        Arc::new(data_type_to_arrow_field("item", item)),
        offset_buffer,
        item_array,
        Some(null_buffer.into()),
    )?))
}

fn offset(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        CodecError::Conversion(format!("Column of {} items overflows i32 offsets", len))
    })
}

/// Build map array
fn build_map_array(
    values: Vec<WireValue>,
    key: &DataType,
    value_type: &DataType,
    data_type: &DataType,
) -> Result<ArrayRef> {
    let entries_field = match data_type_to_arrow(data_type) {
        ArrowDataType::Map(entries_field, _) => entries_field,
        other => {
            return Err(CodecError::Conversion(format!(
                "Map column resolved to non-map Arrow type {:?}",
                other
            )))
        }
    };
    let struct_fields = match entries_field.data_type() {
        ArrowDataType::Struct(fields) => fields.clone(),
        _ => {
            return Err(CodecError::Conversion(
                "Map entries field must be a struct".to_string(),
            ))
        }
    };

    let mut all_keys = Vec::new();
    let mut all_values = Vec::new();
    let mut offsets = Vec::with_capacity(values.len() + 1);
    let mut null_buffer_builder = arrow_buffer::BooleanBufferBuilder::new(values.len());
    offsets.push(0i32);

    for value in values {
        match value {
            WireValue::Map(entries) => {
                for (k, v) in entries {
                    all_keys.push(k);
                    all_values.push(v);
                }
                offsets.push(offset(all_keys.len())?);
                null_buffer_builder.append(true);
            }
            WireValue::Null => {
                offsets.push(offset(all_keys.len())?);
                null_buffer_builder.append(false);
            }
            other => return Err(unexpected(data_type, &other)),
        }
    }

    let key_array = wire_values_to_arrow_array(all_keys, key)?;
    let value_array = wire_values_to_arrow_array(all_values, value_type)?;
    let struct_array = StructArray::try_new(struct_fields, vec![key_array, value_array], None)?;

    let offset_buffer = arrow_buffer::OffsetBuffer::new(offsets.into());
    let null_buffer = null_buffer_builder.finish();

    Ok(Arc::new(MapArray::try_new(
        entries_field,
        offset_buffer,
        struct_array,
        Some(null_buffer.into()),
        false, // sorted
    )?))
}

/// Split composite cells into one column per field, then build a struct
fn build_struct_array(
    field_columns: Vec<Vec<WireValue>>,
    field_types: Vec<&DataType>,
    fields: Fields,
    null_buffer_builder: &mut arrow_buffer::BooleanBufferBuilder,
) -> Result<ArrayRef> {
    let field_arrays = field_columns
        .into_iter()
        .zip(field_types)
        .map(|(column, field_type)| wire_values_to_arrow_array(column, field_type))
        .collect::<Result<Vec<_>>>()?;

    let null_buffer = null_buffer_builder.finish();
    Ok(Arc::new(StructArray::try_new(
        fields,
        field_arrays,
        Some(null_buffer.into()),
    )?))
}

fn build_tuple_array(
    values: Vec<WireValue>,
    tuple_type: &TupleType,
    data_type: &DataType,
) -> Result<ArrayRef> {
    let arity = tuple_type.arity();
    let mut null_buffer_builder = arrow_buffer::BooleanBufferBuilder::new(values.len());
    let mut field_columns: Vec<Vec<WireValue>> = vec![Vec::with_capacity(values.len()); arity];

    for value in values {
        match value {
            WireValue::Tuple(composite) if composite.tuple_type() == tuple_type => {
                null_buffer_builder.append(true);
                for (column, cell) in field_columns.iter_mut().zip(composite.into_values()) {
                    column.push(cell);
                }
            }
            WireValue::Null => {
                null_buffer_builder.append(false);
                for column in field_columns.iter_mut() {
                    column.push(WireValue::Null);
                }
            }
            other => return Err(unexpected(data_type, &other)),
        }
    }

    build_struct_array(
        field_columns,
        tuple_type.component_types().iter().collect(),
        tuple_fields(tuple_type),
        &mut null_buffer_builder,
    )
}

fn build_udt_array(
    values: Vec<WireValue>,
    user_type: &UserType,
    data_type: &DataType,
) -> Result<ArrayRef> {
    let mut null_buffer_builder = arrow_buffer::BooleanBufferBuilder::new(values.len());
    let mut field_columns: Vec<Vec<WireValue>> =
        vec![Vec::with_capacity(values.len()); user_type.fields().len()];

    for value in values {
        match value {
            WireValue::Udt(udt) if udt.user_type() == user_type => {
                null_buffer_builder.append(true);
                for ((name, _), column) in user_type.fields().iter().zip(field_columns.iter_mut()) {
                    column.push(udt.field(name).cloned().unwrap_or(WireValue::Null));
                }
            }
            WireValue::Null => {
                null_buffer_builder.append(false);
                for column in field_columns.iter_mut() {
                    column.push(WireValue::Null);
                }
            }
            other => return Err(unexpected(data_type, &other)),
        }
    }

    build_struct_array(
        field_columns,
        user_type.fields().iter().map(|(_, t)| t).collect(),
        udt_fields(user_type),
        &mut null_buffer_builder,
    )
}

/// Convert a single value from an Arrow array at the given index to a wire
/// cell of the descriptor's type
pub fn arrow_to_wire_value(
    array: &dyn Array,
    index: usize,
    data_type: &DataType,
) -> Result<WireValue> {
    use arrow_array::{
        BinaryArray, BooleanArray, Date32Array, FixedSizeBinaryArray, Float32Array, Float64Array,
        Int16Array, Int32Array, Int64Array, Int8Array, StringArray, TimestampMillisecondArray,
    };

    if array.is_null(index) {
        return Ok(WireValue::Null);
    }

    match data_type {
        DataType::Scalar(scalar) => match scalar {
            ScalarType::Boolean => {
                let array = downcast_array::<BooleanArray>(array)?;
                Ok(WireValue::Boolean(array.value(index)))
            }
            ScalarType::TinyInt => {
                let array = downcast_array::<Int8Array>(array)?;
                Ok(WireValue::TinyInt(array.value(index)))
            }
            ScalarType::SmallInt => {
                let array = downcast_array::<Int16Array>(array)?;
                Ok(WireValue::SmallInt(array.value(index)))
            }
            ScalarType::Int => {
                let array = downcast_array::<Int32Array>(array)?;
                Ok(WireValue::Int(array.value(index)))
            }
            ScalarType::BigInt => {
                let array = downcast_array::<Int64Array>(array)?;
                Ok(WireValue::BigInt(array.value(index)))
            }
            ScalarType::Varint => {
                let array = downcast_array::<BinaryArray>(array)?;
                Ok(WireValue::Varint(BigInt::from_signed_bytes_be(
                    array.value(index),
                )))
            }
            ScalarType::Float => {
                let array = downcast_array::<Float32Array>(array)?;
                Ok(WireValue::Float(OrderedFloat(array.value(index))))
            }
            ScalarType::Double => {
                let array = downcast_array::<Float64Array>(array)?;
                Ok(WireValue::Double(OrderedFloat(array.value(index))))
            }
            ScalarType::Text => {
                let array = downcast_array::<StringArray>(array)?;
                Ok(WireValue::text(array.value(index)))
            }
            ScalarType::Blob => {
                let array = downcast_array::<BinaryArray>(array)?;
                Ok(WireValue::Blob(Bytes::copy_from_slice(array.value(index))))
            }
            ScalarType::Uuid | ScalarType::TimeUuid => {
                let array = downcast_array::<FixedSizeBinaryArray>(array)?;
                let uuid = Uuid::from_slice(array.value(index))
                    .map_err(|e| CodecError::Conversion(format!("Invalid uuid bytes: {}", e)))?;
                if *scalar == ScalarType::TimeUuid {
                    Ok(WireValue::TimeUuid(uuid))
                } else {
                    Ok(WireValue::Uuid(uuid))
                }
            }
            ScalarType::Timestamp => {
                let array = downcast_array::<TimestampMillisecondArray>(array)?;
                Ok(WireValue::Timestamp(array.value(index)))
            }
            ScalarType::Date => {
                let array = downcast_array::<Date32Array>(array)?;
                Ok(WireValue::Date(array.value(index)))
            }
        },

        // Complex types
        DataType::List(item) | DataType::Set(item) => {
            let array = downcast_array::<ListArray>(array)?;
            let list_values = array.value(index);

            let mut values = Vec::with_capacity(list_values.len());
            for i in 0..list_values.len() {
                values.push(arrow_to_wire_value(&list_values, i, item)?);
            }

            if matches!(data_type, DataType::Set(_)) {
                Ok(WireValue::Set(values))
            } else {
                Ok(WireValue::List(values))
            }
        }
        DataType::Map(key_type, value_type) => {
            let array = downcast_array::<MapArray>(array)?;
            let map_value = array.value(index);

            // Map is stored as a struct with two fields: keys and values
            let keys = map_value.column(0);
            let values = map_value.column(1);

            let mut entries = Vec::with_capacity(keys.len());
            for i in 0..keys.len() {
                let key = arrow_to_wire_value(keys, i, key_type)?;
                let value = arrow_to_wire_value(values, i, value_type)?;
                entries.push((key, value));
            }

            Ok(WireValue::Map(entries))
        }
        DataType::Tuple(tuple_type) => {
            let array = downcast_array::<StructArray>(array)?;
            if array.num_columns() != tuple_type.arity() {
                return Err(CodecError::Conversion(format!(
                    "Struct of {} fields cannot hold a {}",
                    array.num_columns(),
                    tuple_type
                )));
            }

            let values = tuple_type
                .component_types()
                .iter()
                .enumerate()
                .map(|(i, component)| arrow_to_wire_value(array.column(i), index, component))
                .collect::<Result<Vec<_>>>()?;
            Ok(WireValue::Tuple(tuple_type.new_value(values)?))
        }
        DataType::Udt(user_type) => {
            let array = downcast_array::<StructArray>(array)?;

            let mut udt = user_type.new_value();
            for (name, field_type) in user_type.fields() {
                let column = array.column_by_name(name).ok_or_else(|| {
                    CodecError::Conversion(format!(
                        "Struct column has no field '{}' of user type {}",
                        name,
                        user_type.name()
                    ))
                })?;
                udt.set_field(name, arrow_to_wire_value(column, index, field_type)?)?;
            }
            Ok(WireValue::Udt(udt))
        }
    }
}

/// Convert a whole Arrow array back to wire cells
pub fn arrow_array_to_wire_values(
    array: &dyn Array,
    data_type: &DataType,
) -> Result<Vec<WireValue>> {
    (0..array.len())
        .map(|index| arrow_to_wire_value(array, index, data_type))
        .collect()
}

/// Encode a column of typed values through a property into one Arrow array
pub fn encode_column<P: Property>(property: &P, values: &[P::Value]) -> Result<ArrayRef> {
    let data_type = property.data_type();
    debug!(
        field = %property.field_info(),
        data_type = %data_type,
        rows = values.len(),
        "Encode Arrow column"
    );
    let cells = values
        .iter()
        .map(|value| property.encode(value))
        .collect::<Result<Vec<_>>>()?;
    wire_values_to_arrow_array(cells, &data_type)
}

/// Decode an Arrow column through a property; null slots decode to `None`
pub fn decode_column<P: Property>(
    property: &P,
    array: &dyn Array,
) -> Result<Vec<Option<P::Value>>> {
    let data_type = property.data_type();
    debug!(
        field = %property.field_info(),
        data_type = %data_type,
        rows = array.len(),
        "Decode Arrow column"
    );
    (0..array.len())
        .map(|index| {
            let cell = arrow_to_wire_value(array, index, &data_type)?;
            property.decode_optional(&cell)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NativeCodec;
    use crate::property::{FieldInfo, PropertyMeta, ScalarProperty};
    use crate::tuple::TupleProperty;

    #[test]
    fn test_primitive_conversion_roundtrip() {
        let data_type = DataType::int();
        let values = vec![WireValue::Int(1), WireValue::Null, WireValue::Int(3)];

        let array = wire_values_to_arrow_array(values.clone(), &data_type).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);
        assert_eq!(arrow_array_to_wire_values(&array, &data_type).unwrap(), values);
    }

    #[test]
    fn test_varint_and_uuid_layout() {
        let varint = DataType::Scalar(ScalarType::Varint);
        let values = vec![
            WireValue::Varint(BigInt::from(-129)),
            WireValue::Varint(BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap()),
        ];
        let array = wire_values_to_arrow_array(values.clone(), &varint).unwrap();
        assert_eq!(array.data_type(), &ArrowDataType::Binary);
        assert_eq!(arrow_array_to_wire_values(&array, &varint).unwrap(), values);

        let timeuuid = DataType::Scalar(ScalarType::TimeUuid);
        let id = Uuid::from_u128(0x1ec9414c_232a_11eb_9a35_0242ac130002);
        let array = wire_values_to_arrow_array(vec![WireValue::TimeUuid(id)], &timeuuid).unwrap();
        assert_eq!(array.data_type(), &ArrowDataType::FixedSizeBinary(16));
        assert_eq!(
            arrow_to_wire_value(&array, 0, &timeuuid).unwrap(),
            WireValue::TimeUuid(id)
        );
    }

    #[test]
    fn test_set_restored_from_list_layout() {
        let data_type = DataType::set(DataType::text());
        let values = vec![
            WireValue::Set(vec![WireValue::text("a"), WireValue::text("b")]),
            WireValue::Null,
        ];
        let array = wire_values_to_arrow_array(values.clone(), &data_type).unwrap();
        assert!(matches!(array.data_type(), ArrowDataType::List(_)));
        assert_eq!(arrow_array_to_wire_values(&array, &data_type).unwrap(), values);

        let err = wire_values_to_arrow_array(vec![WireValue::List(vec![])], &data_type);
        assert!(err.is_err());
    }

    #[test]
    fn test_tuple_struct_layout() {
        let tuple_type = TupleType::of([DataType::int(), DataType::list(DataType::text())]);
        let data_type = DataType::Tuple(tuple_type.clone());

        match data_type_to_arrow(&data_type) {
            ArrowDataType::Struct(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.name().as_str()).collect();
                assert_eq!(names, vec!["0", "1"]);
            }
            other => panic!("unexpected arrow type: {other:?}"),
        }

        let values = vec![
            WireValue::Tuple(
                tuple_type
                    .new_value(vec![
                        WireValue::Int(1),
                        WireValue::List(vec![WireValue::text("1")]),
                    ])
                    .unwrap(),
            ),
            WireValue::Null,
        ];
        let array = wire_values_to_arrow_array(values.clone(), &data_type).unwrap();
        assert_eq!(arrow_array_to_wire_values(&array, &data_type).unwrap(), values);
    }

    #[test]
    fn test_map_with_udt_keys() {
        let user_type = UserType::new("udt", [("name", DataType::text())]);
        let data_type = DataType::map(DataType::Udt(user_type.clone()), DataType::bigint());

        let mut key = user_type.new_value();
        key.set_field("name", WireValue::text("k")).unwrap();
        let values = vec![WireValue::Map(vec![(
            WireValue::Udt(key),
            WireValue::BigInt(9),
        )])];

        let array = wire_values_to_arrow_array(values.clone(), &data_type).unwrap();
        assert_eq!(arrow_array_to_wire_values(&array, &data_type).unwrap(), values);
    }

    #[test]
    fn test_encode_decode_column() {
        let property = TupleProperty::new(
            FieldInfo::of("tuple2"),
            (
                ScalarProperty::new(FieldInfo::of("tuple2"), NativeCodec::<String>::new()),
                ScalarProperty::new(FieldInfo::of("tuple2"), NativeCodec::<i32>::new()),
            ),
        );
        let values = vec![("TWO".to_string(), 2), ("THREE".to_string(), 3)];

        let array = encode_column(&property, &values).unwrap();
        assert_eq!(array.data_type(), &data_type_to_arrow(&property.data_type()));

        let decoded = decode_column(&property, array.as_ref()).unwrap();
        assert_eq!(
            decoded,
            values.into_iter().map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_schema_to_arrow() {
        let schema = crate::schema::SchemaBuilder::new()
            .with_table("entity")
            .with_column("id", DataType::bigint())
            .with_column("at", DataType::Scalar(ScalarType::Timestamp))
            .build()
            .unwrap();

        let arrow = schema_to_arrow(&schema);
        assert_eq!(arrow.fields().len(), 2);
        assert_eq!(
            arrow.field(1).data_type(),
            &ArrowDataType::Timestamp(TimeUnit::Millisecond, Some(Arc::from("UTC")))
        );
    }

    #[test]
    fn test_type_mismatch_in_column() {
        let err = wire_values_to_arrow_array(vec![WireValue::text("x")], &DataType::int())
            .unwrap_err();
        assert_eq!(err.to_string(), "Conversion error: Expected int cell, got Text");
    }
}
