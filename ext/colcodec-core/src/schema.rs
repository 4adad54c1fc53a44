use crate::error::{CodecError, Result};
use crate::property::PropertyMeta;
use crate::value::{UdtValue, WireComposite, WireValue};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Scalar wire types supported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Boolean,

    // Integer types
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Varint,

    // Floating point types
    Float,
    Double,

    // Text and binary
    Text,
    Blob,

    // Identifiers
    Uuid,
    TimeUuid,

    // Temporal types
    Timestamp, // milliseconds since epoch
    Date,      // days since epoch
}

impl ScalarType {
    /// Get the wire type name as it appears in schema declarations
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::TinyInt => "tinyint",
            ScalarType::SmallInt => "smallint",
            ScalarType::Int => "int",
            ScalarType::BigInt => "bigint",
            ScalarType::Varint => "varint",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::Text => "text",
            ScalarType::Blob => "blob",
            ScalarType::Uuid => "uuid",
            ScalarType::TimeUuid => "timeuuid",
            ScalarType::Timestamp => "timestamp",
            ScalarType::Date => "date",
        }
    }

    /// Check if this type is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarType::TinyInt
                | ScalarType::SmallInt
                | ScalarType::Int
                | ScalarType::BigInt
                | ScalarType::Varint
        )
    }
}

/// Recursive wire-level type descriptor.
///
/// Mirrors the nesting of the property tree that produced it, so two
/// structurally identical trees always describe equal types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Scalar(ScalarType),
    List(Box<DataType>),
    Set(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Tuple(TupleType),
    Udt(UserType),
}

impl DataType {
    pub fn boolean() -> Self {
        DataType::Scalar(ScalarType::Boolean)
    }

    pub fn int() -> Self {
        DataType::Scalar(ScalarType::Int)
    }

    pub fn bigint() -> Self {
        DataType::Scalar(ScalarType::BigInt)
    }

    pub fn double() -> Self {
        DataType::Scalar(ScalarType::Double)
    }

    pub fn text() -> Self {
        DataType::Scalar(ScalarType::Text)
    }

    pub fn blob() -> Self {
        DataType::Scalar(ScalarType::Blob)
    }

    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn set(element: DataType) -> Self {
        DataType::Set(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    pub fn tuple<I: IntoIterator<Item = DataType>>(components: I) -> Self {
        DataType::Tuple(TupleType::of(components))
    }

    /// Check if this is a collection or composite type
    pub fn is_nested(&self) -> bool {
        !matches!(self, DataType::Scalar(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Scalar(scalar) => f.write_str(scalar.type_name()),
            DataType::List(element) => write!(f, "list<{}>", element),
            DataType::Set(element) => write!(f, "set<{}>", element),
            DataType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            DataType::Tuple(tuple_type) => write!(f, "{}", tuple_type),
            DataType::Udt(user_type) => match user_type.keyspace() {
                Some(keyspace) => write!(f, "{}.{}", keyspace, user_type.name()),
                None => f.write_str(user_type.name()),
            },
        }
    }
}

/// Positional type signature of a wire composite.
///
/// Doubles as the store's tuple type factory ([`TupleType::of`]) and tuple
/// value factory ([`TupleType::new_value`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
    component_types: Arc<[DataType]>,
}

impl TupleType {
    pub fn of<I: IntoIterator<Item = DataType>>(components: I) -> Self {
        Self {
            component_types: components.into_iter().collect(),
        }
    }

    pub fn component_types(&self) -> &[DataType] {
        &self.component_types
    }

    pub fn arity(&self) -> usize {
        self.component_types.len()
    }

    /// Assemble wire cells into a composite of this type.
    ///
    /// Fails when the number of cells differs from the arity.
    pub fn new_value(&self, values: Vec<WireValue>) -> Result<WireComposite> {
        if values.len() != self.arity() {
            return Err(CodecError::invalid_argument(format!(
                "{} expects {} components, got {}",
                self,
                self.arity(),
                values.len()
            )));
        }
        Ok(WireComposite::from_parts(self.clone(), values))
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tuple<")?;
        for (i, component) in self.component_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", component)?;
        }
        f.write_str(">")
    }
}

/// A user-defined structure type: a name plus ordered, named field types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserType {
    keyspace: Option<Arc<str>>,
    name: Arc<str>,
    fields: Arc<[(Arc<str>, DataType)]>,
}

impl UserType {
    pub fn new<N, F, S>(name: N, fields: F) -> Self
    where
        N: Into<Arc<str>>,
        F: IntoIterator<Item = (S, DataType)>,
        S: Into<Arc<str>>,
    {
        Self {
            keyspace: None,
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(field_name, data_type)| (field_name.into(), data_type))
                .collect(),
        }
    }

    pub fn with_keyspace<K: Into<Arc<str>>>(mut self, keyspace: Option<K>) -> Self {
        self.keyspace = keyspace.map(Into::into);
        self
    }

    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(Arc<str>, DataType)] {
        &self.fields
    }

    pub fn field_type(&self, name: &str) -> Option<&DataType> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name.as_ref() == name)
            .map(|(_, data_type)| data_type)
    }

    /// Create an empty value of this type, every field set to null
    pub fn new_value(&self) -> UdtValue {
        UdtValue::new(self.clone())
    }
}

/// A named column of a table schema
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

/// Column layout of a mapped table, as declared to the store
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub table: String,
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Builder for creating schemas
pub struct SchemaBuilder {
    table: Option<String>,
    columns: Vec<Column>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            table: None,
            columns: Vec::new(),
        }
    }

    pub fn with_table<S: Into<String>>(mut self, table: S) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_column<S: Into<String>>(mut self, name: S, data_type: DataType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data_type,
        });
        self
    }

    /// Declare the column of a mapped property, using its own descriptor
    pub fn with_property(self, property: &dyn PropertyMeta) -> Self {
        let field = property.field_info();
        let data_type = property.data_type();
        debug!(
            field = %field.field_name(),
            column = %field.cql_column(),
            data_type = %data_type,
            "Register schema column"
        );
        self.with_column(field.cql_column(), data_type)
    }

    pub fn build(self) -> Result<Schema> {
        let table = self
            .table
            .ok_or_else(|| CodecError::invalid_argument("Schema must have a table name"))?;

        if self.columns.is_empty() {
            return Err(CodecError::invalid_argument(
                "Schema must have at least one column",
            ));
        }

        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(CodecError::invalid_argument(format!(
                    "Duplicate column '{}' in table '{}'",
                    column.name, table
                )));
            }
        }

        Ok(Schema {
            table,
            columns: self.columns,
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
