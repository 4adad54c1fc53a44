use crate::schema::{DataType, Schema};

/// Trait for schema introspection
///
/// This trait provides methods for examining and querying schemas
/// without modifying them.
pub trait SchemaInspector {
    /// Get the total number of fields (including nested)
    fn field_count(&self) -> usize;

    /// Get a field's type by path (e.g. "address.city", "tuple2.0",
    /// "tags.item", "scores.key")
    fn get_field_by_path(&self, path: &str) -> Option<&DataType>;

    /// Check if schema contains a specific field
    fn has_field(&self, name: &str) -> bool;

    /// Get all field paths in the schema
    fn all_field_paths(&self) -> Vec<String>;
}

impl SchemaInspector for Schema {
    fn field_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| count_fields(&column.data_type))
            .sum()
    }

    fn get_field_by_path(&self, path: &str) -> Option<&DataType> {
        let parts: Vec<&str> = path.split('.').collect();
        let (first, rest) = parts.split_first()?;
        self.column(first)
            .and_then(|column| get_field_by_path_parts(&column.data_type, rest))
    }

    fn has_field(&self, name: &str) -> bool {
        self.get_field_by_path(name).is_some()
    }

    fn all_field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for column in &self.columns {
            collect_field_paths(&column.data_type, column.name.clone(), &mut paths);
        }
        paths
    }
}

// Helper functions for schema inspection
fn count_fields(data_type: &DataType) -> usize {
    match data_type {
        DataType::Scalar(_) => 1,
        DataType::List(item) | DataType::Set(item) => 1 + count_fields(item),
        DataType::Map(key, value) => 1 + count_fields(key) + count_fields(value),
        DataType::Tuple(tuple_type) => {
            1 + tuple_type
                .component_types()
                .iter()
                .map(count_fields)
                .sum::<usize>()
        }
        DataType::Udt(user_type) => {
            1 + user_type
                .fields()
                .iter()
                .map(|(_, field_type)| count_fields(field_type))
                .sum::<usize>()
        }
    }
}

fn get_field_by_path_parts<'a>(data_type: &'a DataType, parts: &[&str]) -> Option<&'a DataType> {
    let Some((first, rest)) = parts.split_first() else {
        return Some(data_type);
    };

    match data_type {
        DataType::List(item) | DataType::Set(item) if *first == "item" => {
            get_field_by_path_parts(item, rest)
        }
        DataType::Map(key, value) => match *first {
            "key" => get_field_by_path_parts(key, rest),
            "value" => get_field_by_path_parts(value, rest),
            _ => None,
        },
        DataType::Tuple(tuple_type) => first
            .parse::<usize>()
            .ok()
            .and_then(|i| tuple_type.component_types().get(i))
            .and_then(|component| get_field_by_path_parts(component, rest)),
        DataType::Udt(user_type) => user_type
            .field_type(first)
            .and_then(|field_type| get_field_by_path_parts(field_type, rest)),
        _ => None,
    }
}

fn collect_field_paths(data_type: &DataType, current_path: String, paths: &mut Vec<String>) {
    paths.push(current_path.clone());

    match data_type {
        DataType::Scalar(_) => {}
        DataType::List(item) | DataType::Set(item) => {
            collect_field_paths(item, format!("{}.item", current_path), paths);
        }
        DataType::Map(key, value) => {
            collect_field_paths(key, format!("{}.key", current_path), paths);
            collect_field_paths(value, format!("{}.value", current_path), paths);
        }
        DataType::Tuple(tuple_type) => {
            for (i, component) in tuple_type.component_types().iter().enumerate() {
                collect_field_paths(component, format!("{}.{}", current_path, i), paths);
            }
        }
        DataType::Udt(user_type) => {
            for (name, field_type) in user_type.fields() {
                collect_field_paths(field_type, format!("{}.{}", current_path, name), paths);
            }
        }
    }
}
