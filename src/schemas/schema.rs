use jsonschema::{Draft, JSONSchema};
use schemars::{schema::RootSchema, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{any::type_name, fmt, sync::Arc, sync::OnceLock};

use crate::types::itinerary::Itinerary;

/// Cached JSON schema handle associated with a response type.
#[derive(Clone)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    schema_json: Arc<Value>,
    validator: Arc<OnceLock<Result<JSONSchema, String>>>,
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaHandle")
            .field("schema_name", &self.schema_name)
            .field("type_name", &self.type_name)
            .field("compiled", &self.validator.get().is_some())
            .finish()
    }
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(schema_name: &'static str, root: RootSchema) -> Self {
        // RootSchema is plain data; serializing it to a Value cannot fail.
        let schema_json = serde_json::to_value(root).unwrap_or(Value::Null);

        Self {
            schema_name,
            type_name: type_name::<T>(),
            schema_json: Arc::new(schema_json),
            validator: Arc::new(OnceLock::new()),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Draft-07 validator for this schema, compiled on first use.
    pub(crate) fn validator(&self) -> Result<&JSONSchema, &str> {
        self.validator
            .get_or_init(|| {
                JSONSchema::options()
                    .with_draft(Draft::Draft7)
                    .compile(self.schema_json())
                    .map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(String::as_str)
    }

    /// Pretty-printed schema for embedding in a prompt.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(self.schema_json()).unwrap_or_default()
    }
}

/// A type the AI service is asked to produce, with its JSON schema.
pub trait CompletionSchema: DeserializeOwned + JsonSchema + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

impl CompletionSchema for Itinerary {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| {
            SchemaHandle::from_root_schema::<Itinerary>("Itinerary", schemars::schema_for!(Itinerary))
        })
    }
}
