use crate::codec::{EnumCodec, EnumValue, NativeCodec, NativeType, ScalarCodec};
use crate::error::Result;
use crate::property::{
    FieldInfo, ListProperty, MapProperty, Property, ScalarProperty, SetProperty, UdtProperty,
};
use crate::tuple::{TupleComponents, TupleProperty};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const DEFAULT_NUMERIC_WIDENING: bool = true;

/// How wire column names are derived from field names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    SnakeCase,
    LowerCase,
    CaseSensitive,
}

impl NamingStrategy {
    pub fn column_name(&self, field_name: &str) -> String {
        match self {
            NamingStrategy::SnakeCase => to_snake_case(field_name),
            NamingStrategy::LowerCase => field_name.to_lowercase(),
            NamingStrategy::CaseSensitive => field_name.to_string(),
        }
    }
}

// "complexNestingMap" -> "complex_nesting_map", "HTTPCode" -> "http_code"
fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if prev != '_' && boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Wire form of enumerations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumEncoding {
    /// Variant name, as text
    #[default]
    Name,
    /// Declaration position, as int
    Ordinal,
}

impl fmt::Display for EnumEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumEncoding::Name => f.write_str("name"),
            EnumEncoding::Ordinal => f.write_str("ordinal"),
        }
    }
}

/// Mapping-wide settings, and factory helpers that build properties with
/// them applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub naming_strategy: NamingStrategy,
    pub enum_encoding: EnumEncoding,
    pub keyspace: Option<String>,
    pub numeric_widening: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            naming_strategy: NamingStrategy::default(),
            enum_encoding: EnumEncoding::default(),
            keyspace: None,
            numeric_widening: DEFAULT_NUMERIC_WIDENING,
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::new()
    }

    /// Load from JSON; absent keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json)?;
        debug!(
            naming_strategy = ?config.naming_strategy,
            enum_encoding = %config.enum_encoding,
            keyspace = ?config.keyspace,
            numeric_widening = config.numeric_widening,
            "Loaded codec config"
        );
        Ok(config)
    }

    pub fn field(&self, field_name: &str) -> FieldInfo {
        FieldInfo::new(field_name, self.naming_strategy.column_name(field_name))
    }

    pub fn native<T: NativeType>(&self, field_name: &str) -> ScalarProperty<NativeCodec<T>> {
        ScalarProperty::new(
            self.field(field_name),
            NativeCodec::with_widening(self.numeric_widening),
        )
    }

    pub fn enumeration<E: EnumValue>(&self, field_name: &str) -> ScalarProperty<EnumCodec<E>> {
        ScalarProperty::new(self.field(field_name), EnumCodec::new(self.enum_encoding))
    }

    pub fn scalar<C: ScalarCodec>(&self, field_name: &str, codec: C) -> ScalarProperty<C> {
        ScalarProperty::new(self.field(field_name), codec)
    }

    pub fn list<P: Property>(&self, field_name: &str, element: P) -> ListProperty<P> {
        ListProperty::new(self.field(field_name), element)
    }

    pub fn set<P>(&self, field_name: &str, element: P) -> SetProperty<P>
    where
        P: Property,
        P::Value: Ord,
    {
        SetProperty::new(self.field(field_name), element)
    }

    pub fn map<K, V>(&self, field_name: &str, key: K, value: V) -> MapProperty<K, V>
    where
        K: Property,
        K::Value: Ord,
        V: Property,
    {
        MapProperty::new(self.field(field_name), key, value)
    }

    pub fn tuple<C: TupleComponents>(&self, field_name: &str, components: C) -> TupleProperty<C> {
        TupleProperty::new(self.field(field_name), components)
    }

    /// Start a user structure mapping; the configured keyspace is recorded
    /// on its type
    pub fn udt<T>(&self, field_name: &str, type_name: &str) -> UdtProperty<T>
    where
        T: Default + fmt::Debug + Send + 'static,
    {
        UdtProperty::new(self.field(field_name), type_name)
            .with_keyspace(self.keyspace.as_deref())
    }
}

/// Builder for [`CodecConfig`]
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.config.naming_strategy = strategy;
        self
    }

    pub fn with_enum_encoding(mut self, encoding: EnumEncoding) -> Self {
        self.config.enum_encoding = encoding;
        self
    }

    pub fn with_keyspace<S: Into<String>>(mut self, keyspace: S) -> Self {
        self.config.keyspace = Some(keyspace.into());
        self
    }

    pub fn with_numeric_widening(mut self, enabled: bool) -> Self {
        self.config.numeric_widening = enabled;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyMeta;
    use crate::schema::DataType;
    use crate::value::WireValue;

    #[test]
    fn test_snake_case_naming() {
        let naming = NamingStrategy::SnakeCase;
        assert_eq!(naming.column_name("complexNestingMap"), "complex_nesting_map");
        assert_eq!(naming.column_name("tuple10"), "tuple10");
        assert_eq!(naming.column_name("intWrapper"), "int_wrapper");
        assert_eq!(naming.column_name("HTTPCode"), "http_code");
        assert_eq!(naming.column_name("already_snake"), "already_snake");
    }

    #[test]
    fn test_other_naming_strategies() {
        assert_eq!(NamingStrategy::LowerCase.column_name("intWrapper"), "intwrapper");
        assert_eq!(
            NamingStrategy::CaseSensitive.column_name("intWrapper"),
            "intWrapper"
        );

        let config = CodecConfig::builder()
            .with_naming_strategy(NamingStrategy::CaseSensitive)
            .build();
        assert_eq!(config.field("intWrapper").quoted_cql_column(), "\"intWrapper\"");
    }

    #[test]
    fn test_config_from_json() {
        let config = CodecConfig::from_json(
            r#"{"naming_strategy": "lower_case", "enum_encoding": "ordinal", "keyspace": "achilles_ks"}"#,
        )
        .unwrap();
        assert_eq!(config.naming_strategy, NamingStrategy::LowerCase);
        assert_eq!(config.enum_encoding, EnumEncoding::Ordinal);
        assert_eq!(config.keyspace.as_deref(), Some("achilles_ks"));
        assert!(config.numeric_widening);

        assert_eq!(CodecConfig::from_json("{}").unwrap(), CodecConfig::default());
        assert!(CodecConfig::from_json(r#"{"enum_encoding": "bogus"}"#).is_err());
    }

    #[test]
    fn test_factory_helpers() {
        let config = CodecConfig::builder()
            .with_numeric_widening(false)
            .with_keyspace("test_ks")
            .build();

        let property = config.native::<i64>("bigValue");
        assert_eq!(property.field_info().cql_column(), "big_value");
        assert!(!property.codec().widening());
        assert!(property.decode(&WireValue::Int(1)).is_err());

        let list = config.list("names", config.native::<String>("names"));
        assert_eq!(list.data_type(), DataType::list(DataType::text()));

        let udt = config.udt::<Vec<String>>("lines", "lines_udt");
        assert_eq!(udt.data_type().to_string(), "test_ks.lines_udt");
    }
}
