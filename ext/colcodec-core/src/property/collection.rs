use super::{downcast_raw, FieldInfo, Property, PropertyKind, PropertyMeta, RawValue};
use crate::error::{CodecError, Result};
use crate::schema::DataType;
use crate::value::WireValue;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

fn unexpected_cell(field: &FieldInfo, expected: &str, cell: &WireValue) -> CodecError {
    CodecError::decoding(
        field,
        format!("expected {} cell, got {}", expected, cell.type_name()),
    )
}

/// Ordered sequence of elements, mapped to `Vec`
#[derive(Debug, Clone)]
pub struct ListProperty<P> {
    field: FieldInfo,
    element: P,
}

impl<P: Property> ListProperty<P> {
    pub fn new(field: FieldInfo, element: P) -> Self {
        Self { field, element }
    }
}

impl<P: Property> PropertyMeta for ListProperty<P> {
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::List
    }

    fn data_type(&self) -> DataType {
        DataType::list(self.element.data_type())
    }

    fn components(&self) -> Vec<&dyn PropertyMeta> {
        vec![&self.element as &dyn PropertyMeta]
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        self.encode(downcast_raw(self, raw)?)
    }
}

impl<P: Property> Property for ListProperty<P> {
    type Value = Vec<P::Value>;

    fn encode(&self, value: &Vec<P::Value>) -> Result<WireValue> {
        trace!(field = %self.field, value = ?value, "Encode list from value");
        let items = value
            .iter()
            .map(|item| self.element.encode(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(WireValue::List(items))
    }

    fn decode(&self, cell: &WireValue) -> Result<Vec<P::Value>> {
        trace!(field = %self.field, cell = ?cell, "Decode list from wire");
        match cell {
            WireValue::List(items) => items.iter().map(|item| self.element.decode(item)).collect(),
            other => Err(unexpected_cell(&self.field, "List", other)),
        }
    }
}

/// Set of distinct elements, mapped to `BTreeSet` so wire order is stable
#[derive(Debug, Clone)]
pub struct SetProperty<P> {
    field: FieldInfo,
    element: P,
}

impl<P> SetProperty<P>
where
    P: Property,
    P::Value: Ord,
{
    pub fn new(field: FieldInfo, element: P) -> Self {
        Self { field, element }
    }
}

impl<P> PropertyMeta for SetProperty<P>
where
    P: Property,
    P::Value: Ord,
{
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Set
    }

    fn data_type(&self) -> DataType {
        DataType::set(self.element.data_type())
    }

    fn components(&self) -> Vec<&dyn PropertyMeta> {
        vec![&self.element as &dyn PropertyMeta]
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        self.encode(downcast_raw(self, raw)?)
    }
}

impl<P> Property for SetProperty<P>
where
    P: Property,
    P::Value: Ord,
{
    type Value = BTreeSet<P::Value>;

    fn encode(&self, value: &BTreeSet<P::Value>) -> Result<WireValue> {
        trace!(field = %self.field, value = ?value, "Encode set from value");
        let items = value
            .iter()
            .map(|item| self.element.encode(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(WireValue::Set(items))
    }

    fn decode(&self, cell: &WireValue) -> Result<BTreeSet<P::Value>> {
        trace!(field = %self.field, cell = ?cell, "Decode set from wire");
        match cell {
            WireValue::Set(items) => items.iter().map(|item| self.element.decode(item)).collect(),
            other => Err(unexpected_cell(&self.field, "Set", other)),
        }
    }
}

/// Key/value mapping, mapped to `BTreeMap`
#[derive(Debug, Clone)]
pub struct MapProperty<K, V> {
    field: FieldInfo,
    key: K,
    value: V,
}

impl<K, V> MapProperty<K, V>
where
    K: Property,
    K::Value: Ord,
    V: Property,
{
    pub fn new(field: FieldInfo, key: K, value: V) -> Self {
        Self { field, key, value }
    }
}

impl<K, V> PropertyMeta for MapProperty<K, V>
where
    K: Property,
    K::Value: Ord,
    V: Property,
{
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Map
    }

    fn data_type(&self) -> DataType {
        DataType::map(self.key.data_type(), self.value.data_type())
    }

    fn components(&self) -> Vec<&dyn PropertyMeta> {
        vec![&self.key as &dyn PropertyMeta, &self.value]
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        self.encode(downcast_raw(self, raw)?)
    }
}

impl<K, V> Property for MapProperty<K, V>
where
    K: Property,
    K::Value: Ord,
    V: Property,
{
    type Value = BTreeMap<K::Value, V::Value>;

    fn encode(&self, value: &Self::Value) -> Result<WireValue> {
        trace!(field = %self.field, value = ?value, "Encode map from value");
        let entries = value
            .iter()
            .map(|(k, v)| Ok((self.key.encode(k)?, self.value.encode(v)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(WireValue::Map(entries))
    }

    fn decode(&self, cell: &WireValue) -> Result<Self::Value> {
        trace!(field = %self.field, cell = ?cell, "Decode map from wire");
        match cell {
            WireValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((self.key.decode(k)?, self.value.decode(v)?)))
                .collect(),
            other => Err(unexpected_cell(&self.field, "Map", other)),
        }
    }
}
