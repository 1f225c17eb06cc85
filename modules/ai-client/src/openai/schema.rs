use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Types that can be requested as OpenAI strict structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI-compatible JSON schema for this type.
    ///
    /// Strict mode requires `additionalProperties: false` on every object,
    /// every property listed in `required`, and no `$ref` indirection.
    fn openai_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        close_objects(&mut value);
        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                let keys: Option<Vec<Value>> = map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| props.keys().cloned().map(Value::String).collect());
                if let Some(keys) = keys {
                    map.insert("required".to_string(), Value::Array(keys));
                }
            }

            for (_, v) in map.iter_mut() {
                close_objects(v);
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(close_objects),
        _ => {}
    }
}

fn inline_refs(value: &mut Value) {
    let definitions = value.get("definitions").cloned();
    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|path| path.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();
            if let Some(def) = target {
                *value = def;
                inline_refs_recursive(value, definitions);
                return;
            }

            // schemars wraps documented refs as a single-element allOf
            let single = match map.get("allOf").and_then(Value::as_array) {
                Some(all_of) if all_of.len() == 1 => all_of.first().cloned(),
                _ => None,
            };
            if let Some(inner) = single {
                *value = inner;
                inline_refs_recursive(value, definitions);
                return;
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Price {
        amount: u32,
        currency: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Product {
        /// Display name
        name: String,
        price: Price,
        tags: Vec<String>,
    }

    #[test]
    fn test_schema_is_closed_object() {
        let schema = Product::openai_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("definitions").is_none());
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Price::openai_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .expect("should have required array")
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert!(required.contains(&"amount"));
        assert!(required.contains(&"currency"));
    }

    #[test]
    fn test_nested_struct_inlined() {
        let schema = Product::openai_schema();
        let price = schema["properties"]["price"].as_object().unwrap();

        assert!(!price.contains_key("$ref"));
        assert_eq!(price.get("type"), Some(&Value::String("object".to_string())));
        assert_eq!(price.get("additionalProperties"), Some(&Value::Bool(false)));
    }
}
