use crate::error::{CodecError, Result};
use crate::schema::{DataType, ScalarType, TupleType, UserType};
use bytes::Bytes;
use indexmap::IndexMap;
use num::BigInt;
use std::sync::Arc;
use uuid::Uuid;

/// A single wire cell, as written to or read from the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireValue {
    // Numeric types
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Varint(BigInt),
    Float(ordered_float::OrderedFloat<f32>),
    Double(ordered_float::OrderedFloat<f64>),

    // Basic types
    Boolean(bool),
    Text(Arc<str>),
    Blob(Bytes),

    // Identifiers
    Uuid(Uuid),
    TimeUuid(Uuid),

    // Temporal types
    Timestamp(i64), // Milliseconds since epoch
    Date(i32),      // Days since epoch

    // Collections, in wire order
    List(Vec<WireValue>),
    Set(Vec<WireValue>),
    Map(Vec<(WireValue, WireValue)>),

    // Composite types
    Tuple(WireComposite),
    Udt(UdtValue),

    // Null value
    Null,
}

impl WireValue {
    pub fn text<S: AsRef<str>>(s: S) -> Self {
        WireValue::Text(Arc::from(s.as_ref()))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Check if the value is a leaf cell
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            WireValue::List(_)
                | WireValue::Set(_)
                | WireValue::Map(_)
                | WireValue::Tuple(_)
                | WireValue::Udt(_)
                | WireValue::Null
        )
    }

    /// Get the type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::TinyInt(_) => "TinyInt",
            WireValue::SmallInt(_) => "SmallInt",
            WireValue::Int(_) => "Int",
            WireValue::BigInt(_) => "BigInt",
            WireValue::Varint(_) => "Varint",
            WireValue::Float(_) => "Float",
            WireValue::Double(_) => "Double",
            WireValue::Boolean(_) => "Boolean",
            WireValue::Text(_) => "Text",
            WireValue::Blob(_) => "Blob",
            WireValue::Uuid(_) => "Uuid",
            WireValue::TimeUuid(_) => "TimeUuid",
            WireValue::Timestamp(_) => "Timestamp",
            WireValue::Date(_) => "Date",
            WireValue::List(_) => "List",
            WireValue::Set(_) => "Set",
            WireValue::Map(_) => "Map",
            WireValue::Tuple(_) => "Tuple",
            WireValue::Udt(_) => "Udt",
            WireValue::Null => "Null",
        }
    }

    /// The scalar wire type this cell carries, if it is a leaf
    pub fn scalar_type(&self) -> Option<ScalarType> {
        Some(match self {
            WireValue::TinyInt(_) => ScalarType::TinyInt,
            WireValue::SmallInt(_) => ScalarType::SmallInt,
            WireValue::Int(_) => ScalarType::Int,
            WireValue::BigInt(_) => ScalarType::BigInt,
            WireValue::Varint(_) => ScalarType::Varint,
            WireValue::Float(_) => ScalarType::Float,
            WireValue::Double(_) => ScalarType::Double,
            WireValue::Boolean(_) => ScalarType::Boolean,
            WireValue::Text(_) => ScalarType::Text,
            WireValue::Blob(_) => ScalarType::Blob,
            WireValue::Uuid(_) => ScalarType::Uuid,
            WireValue::TimeUuid(_) => ScalarType::TimeUuid,
            WireValue::Timestamp(_) => ScalarType::Timestamp,
            WireValue::Date(_) => ScalarType::Date,
            _ => return None,
        })
    }

    /// Check whether this cell can be read under `data_type`.
    ///
    /// Null conforms to every type. Collections and composites are checked
    /// recursively; a composite conforms only when its own signature equals
    /// the expected one.
    pub fn conforms_to(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (WireValue::Null, _) => true,
            (cell, DataType::Scalar(expected)) => cell.scalar_type() == Some(*expected),
            (WireValue::List(items), DataType::List(element))
            | (WireValue::Set(items), DataType::Set(element)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (WireValue::Map(entries), DataType::Map(key, value)) => entries
                .iter()
                .all(|(k, v)| k.conforms_to(key) && v.conforms_to(value)),
            (WireValue::Tuple(composite), DataType::Tuple(tuple_type)) => {
                composite.tuple_type() == tuple_type
                    && composite
                        .values()
                        .iter()
                        .zip(tuple_type.component_types())
                        .all(|(cell, component)| cell.conforms_to(component))
            }
            (WireValue::Udt(udt), DataType::Udt(user_type)) => {
                udt.user_type() == user_type
                    && user_type.fields().iter().all(|(name, field_type)| {
                        udt.field(name)
                            .map_or(true, |cell| cell.conforms_to(field_type))
                    })
            }
            _ => false,
        }
    }
}

/// Store-level ordered composite: wire cells plus their positional types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireComposite {
    tuple_type: TupleType,
    values: Vec<WireValue>,
}

impl WireComposite {
    // Length agreement is checked by `TupleType::new_value`
    pub(crate) fn from_parts(tuple_type: TupleType, values: Vec<WireValue>) -> Self {
        Self { tuple_type, values }
    }

    pub fn tuple_type(&self) -> &TupleType {
        &self.tuple_type
    }

    pub fn component_types(&self) -> &[DataType] {
        self.tuple_type.component_types()
    }

    pub fn values(&self) -> &[WireValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&WireValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<WireValue> {
        self.values
    }
}

/// Value of a user-defined structure type, fields in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdtValue {
    user_type: UserType,
    fields: IndexMap<Arc<str>, WireValue>,
}

impl std::hash::Hash for UdtValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.user_type.hash(state);
        // IndexMap preserves insertion order, so hash is deterministic
        for (k, v) in &self.fields {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl UdtValue {
    pub fn new(user_type: UserType) -> Self {
        let fields = user_type
            .fields()
            .iter()
            .map(|(name, _)| (name.clone(), WireValue::Null))
            .collect();
        Self { user_type, fields }
    }

    pub fn user_type(&self) -> &UserType {
        &self.user_type
    }

    pub fn field(&self, name: &str) -> Option<&WireValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Set a declared field; unknown field names are rejected
    pub fn set_field(&mut self, name: &str, value: WireValue) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CodecError::invalid_argument(format!(
                "User type '{}' has no field '{}'",
                self.user_type.name(),
                name
            ))),
        }
    }
}

/// One result row: column name to wire cell, in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: IndexMap<Arc<str>, WireValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column<S: AsRef<str>>(mut self, name: S, value: WireValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<S: AsRef<str>>(&mut self, name: S, value: WireValue) {
        self.columns.insert(Arc::from(name.as_ref()), value);
    }

    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.columns.get(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
