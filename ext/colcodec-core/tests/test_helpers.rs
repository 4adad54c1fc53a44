#![allow(dead_code)]

use colcodec_core::codec::{CustomCodec, EnumValue, NativeCodec};
use colcodec_core::property::{ListProperty, ScalarProperty, UdtProperty};
use colcodec_core::*;
use serde::{Deserialize, Serialize};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Store consistency levels, used as a sample enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    One,
    Two,
    Three,
    Quorum,
    LocalQuorum,
    All,
}

impl EnumValue for ConsistencyLevel {
    const VARIANTS: &'static [Self] = &[
        ConsistencyLevel::One,
        ConsistencyLevel::Two,
        ConsistencyLevel::Three,
        ConsistencyLevel::Quorum,
        ConsistencyLevel::LocalQuorum,
        ConsistencyLevel::All,
    ];

    fn name(&self) -> &'static str {
        match self {
            ConsistencyLevel::One => "ONE",
            ConsistencyLevel::Two => "TWO",
            ConsistencyLevel::Three => "THREE",
            ConsistencyLevel::Quorum => "QUORUM",
            ConsistencyLevel::LocalQuorum => "LOCAL_QUORUM",
            ConsistencyLevel::All => "ALL",
        }
    }
}

/// User structure mapped to `test_udt`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestUdt {
    pub name: String,
    pub list: Vec<String>,
}

impl TestUdt {
    pub fn new(name: &str, list: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            list: list.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Wrapper stored as a plain int through a custom codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntWrapper(pub i32);

pub type IntWrapperCodec = CustomCodec<IntWrapper, NativeCodec<i32>>;

pub fn int_wrapper_codec() -> IntWrapperCodec {
    CustomCodec::new(NativeCodec::new(), |w: &IntWrapper| Ok(w.0), |i| Ok(IntWrapper(i)))
}

/// Mapping settings of the sample entity
pub fn entity_config() -> CodecConfig {
    CodecConfig::builder()
        .with_naming_strategy(NamingStrategy::SnakeCase)
        .with_keyspace("achilles_ks")
        .build()
}

pub fn test_udt_property(config: &CodecConfig, field_name: &str) -> UdtProperty<TestUdt> {
    config
        .udt::<TestUdt>(field_name, "test_udt")
        .with_field(
            config.native::<String>("name"),
            |u: &TestUdt| &u.name,
            |u: &mut TestUdt, v| u.name = v,
        )
        .with_field(
            config.list("list", config.native::<String>("list")),
            |u: &TestUdt| &u.list,
            |u: &mut TestUdt, v| u.list = v,
        )
}

pub type IntProperty = ScalarProperty<NativeCodec<i32>>;
pub type TextProperty = ScalarProperty<NativeCodec<String>>;
pub type TextListProperty = ListProperty<TextProperty>;

/// Decode a cell after checking it conforms to the property's own type
pub fn roundtrip<P: Property>(property: &P, value: &P::Value) -> P::Value {
    let cell = property.encode(value).unwrap();
    assert!(
        cell.conforms_to(&property.data_type()),
        "{:?} does not conform to {}",
        cell,
        property.data_type()
    );
    property.decode(&cell).unwrap()
}
