use super::{downcast_raw, FieldInfo, Property, PropertyKind, PropertyMeta, RawValue};
use crate::error::{CodecError, Result};
use crate::schema::{DataType, UserType};
use crate::value::WireValue;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// One mapped field of a user structure, with its value type erased
pub trait UdtField<T>: Send + Sync {
    fn property(&self) -> &dyn PropertyMeta;

    fn encode_field(&self, owner: &T) -> Result<WireValue>;

    /// Decode `cell` and store it on `owner`. A null cell leaves the
    /// owner's current value untouched.
    fn decode_field(&self, owner: &mut T, cell: &WireValue) -> Result<()>;
}

/// Binds a property to a structure field through accessor functions
pub struct FieldBinding<T, P: Property> {
    property: P,
    getter: fn(&T) -> &P::Value,
    setter: fn(&mut T, P::Value),
}

impl<T, P: Property> FieldBinding<T, P> {
    pub fn new(property: P, getter: fn(&T) -> &P::Value, setter: fn(&mut T, P::Value)) -> Self {
        Self {
            property,
            getter,
            setter,
        }
    }
}

impl<T, P> UdtField<T> for FieldBinding<T, P>
where
    T: 'static,
    P: Property + 'static,
{
    fn property(&self) -> &dyn PropertyMeta {
        &self.property
    }

    fn encode_field(&self, owner: &T) -> Result<WireValue> {
        self.property.encode((self.getter)(owner))
    }

    fn decode_field(&self, owner: &mut T, cell: &WireValue) -> Result<()> {
        if let Some(value) = self.property.decode_optional(cell)? {
            (self.setter)(owner, value);
        }
        Ok(())
    }
}

/// A user structure mapped to a named store type, field by field.
///
/// Decoding starts from `T::default()`; fields absent from the cell keep
/// their default value.
pub struct UdtProperty<T> {
    field: FieldInfo,
    type_name: Arc<str>,
    keyspace: Option<Arc<str>>,
    fields: Vec<Box<dyn UdtField<T>>>,
    user_type: OnceLock<UserType>,
}

impl<T> UdtProperty<T>
where
    T: Default + fmt::Debug + Send + 'static,
{
    pub fn new<S: AsRef<str>>(field: FieldInfo, type_name: S) -> Self {
        Self {
            field,
            type_name: Arc::from(type_name.as_ref()),
            keyspace: None,
            fields: Vec::new(),
            user_type: OnceLock::new(),
        }
    }

    pub fn with_keyspace(mut self, keyspace: Option<&str>) -> Self {
        self.keyspace = keyspace.map(Arc::from);
        self.user_type = OnceLock::new();
        self
    }

    /// Map one more field, in declaration order
    pub fn with_field<P: Property + 'static>(
        mut self,
        property: P,
        getter: fn(&T) -> &P::Value,
        setter: fn(&mut T, P::Value),
    ) -> Self {
        self.fields
            .push(Box::new(FieldBinding::new(property, getter, setter)));
        self.user_type = OnceLock::new();
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn build_type(&self) -> UserType {
        debug!(
            field = %self.field,
            udt = %self.type_name,
            fields = self.fields.len(),
            "Build user type"
        );
        UserType::new(
            self.type_name.clone(),
            self.fields.iter().map(|binding| {
                let property = binding.property();
                (
                    property.field_info().cql_column().to_string(),
                    property.data_type(),
                )
            }),
        )
        .with_keyspace(self.keyspace.clone())
    }

    pub fn user_type(&self) -> &UserType {
        self.user_type.get_or_init(|| self.build_type())
    }
}

impl<T> fmt::Debug for UdtProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UdtProperty")
            .field("field", &self.field)
            .field("type_name", &self.type_name)
            .field("keyspace", &self.keyspace)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl<T> PropertyMeta for UdtProperty<T>
where
    T: Default + fmt::Debug + Send + 'static,
{
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Udt
    }

    fn data_type(&self) -> DataType {
        DataType::Udt(self.user_type().clone())
    }

    fn components(&self) -> Vec<&dyn PropertyMeta> {
        self.fields.iter().map(|binding| binding.property()).collect()
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        self.encode(downcast_raw(self, raw)?)
    }
}

impl<T> Property for UdtProperty<T>
where
    T: Default + fmt::Debug + Send + 'static,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<WireValue> {
        trace!(field = %self.field, udt = %self.type_name, "Encode udt from value");
        let mut udt = self.user_type().new_value();
        for binding in &self.fields {
            let column = binding.property().field_info().cql_column();
            let cell = binding.encode_field(value)?;
            udt.set_field(column, cell)
                .map_err(|e| e.into_encoding(&self.field))?;
        }
        Ok(WireValue::Udt(udt))
    }

    fn decode(&self, cell: &WireValue) -> Result<T> {
        trace!(field = %self.field, udt = %self.type_name, "Decode udt from wire");
        let udt = match cell {
            WireValue::Udt(udt) => udt,
            other => {
                return Err(CodecError::decoding(
                    &self.field,
                    format!("expected Udt cell, got {}", other.type_name()),
                ))
            }
        };

        let expected = self.user_type();
        if udt.user_type() != expected {
            return Err(CodecError::decoding(
                &self.field,
                format!(
                    "expected user type {}, got {}",
                    DataType::Udt(expected.clone()),
                    DataType::Udt(udt.user_type().clone())
                ),
            ));
        }

        let mut value = T::default();
        for binding in &self.fields {
            let column = binding.property().field_info().cql_column();
            if let Some(field_cell) = udt.field(column) {
                binding.decode_field(&mut value, field_cell)?;
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NativeCodec;
    use crate::error::ErrorKind;
    use crate::property::ListProperty;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Address {
        city: String,
        lines: Vec<String>,
    }

    fn address_property() -> UdtProperty<Address> {
        UdtProperty::new(FieldInfo::of("address"), "address")
            .with_keyspace(Some("test_ks"))
            .with_field(
                ScalarText::new(FieldInfo::of("city"), NativeCodec::new()),
                |a: &Address| &a.city,
                |a: &mut Address, v| a.city = v,
            )
            .with_field(
                ListProperty::new(
                    FieldInfo::of("lines"),
                    ScalarText::new(FieldInfo::of("lines"), NativeCodec::new()),
                ),
                |a: &Address| &a.lines,
                |a: &mut Address, v| a.lines = v,
            )
    }

    type ScalarText = crate::property::ScalarProperty<NativeCodec<String>>;

    #[test]
    fn test_udt_roundtrip() {
        let property = address_property();
        let value = Address {
            city: "Paris".to_string(),
            lines: vec!["1 rue".to_string()],
        };

        let cell = property.encode(&value).unwrap();
        assert!(cell.conforms_to(&property.data_type()));
        assert_eq!(property.decode(&cell).unwrap(), value);
    }

    #[test]
    fn test_udt_type_is_built_once() {
        let property = address_property();
        let first = property.user_type() as *const UserType;
        let second = property.user_type() as *const UserType;
        assert_eq!(first, second);
        assert_eq!(property.user_type().keyspace(), Some("test_ks"));
        assert_eq!(property.data_type().to_string(), "test_ks.address");
        assert_eq!(property.components().len(), 2);
    }

    #[test]
    fn test_null_fields_keep_defaults() {
        let property = address_property();
        let mut udt = property.user_type().new_value();
        udt.set_field("city", WireValue::text("Lyon")).unwrap();

        let value = property.decode(&WireValue::Udt(udt)).unwrap();
        assert_eq!(value.city, "Lyon");
        assert!(value.lines.is_empty());
    }

    #[test]
    fn test_foreign_user_type_rejected() {
        let property = address_property();
        let other = UserType::new("address", [("city", DataType::text())]);
        let err = property
            .decode(&WireValue::Udt(other.new_value()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        assert!(err.to_string().contains("expected user type test_ks.address"));
    }
}
