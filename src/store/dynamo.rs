//! DynamoDB-backed store.
//!
//! Items are laid out as `{<key_attribute>: S(key), "value": <document>}`; the
//! JSON document is stored as native attribute values so it stays queryable.

use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use async_trait::async_trait;
use serde_json::{Map, Number, Value};

use super::{KeyValueStore, StoreError};
use crate::config::StoreConfig;

const VALUE_ATTRIBUTE: &str = "value";

#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
    key_attribute: String,
}

impl DynamoStore {
    /// Resolve credentials from the environment and bind to `config.table`.
    /// Offline configs point the client at the local endpoint.
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.effective_region().to_string()));
        if let Some(endpoint) = config.endpoint_override() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self::from_client(Client::new(&sdk_config), config)
    }

    pub fn from_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            table: config.table.clone(),
            key_attribute: config.key_attribute.clone(),
        }
    }

    fn key(&self, key: &str) -> (String, AttributeValue) {
        (self.key_attribute.clone(), AttributeValue::S(key.to_string()))
    }
}

fn backend<E: std::error::Error>(error: E) -> StoreError {
    StoreError::Backend(DisplayErrorContext(error).to_string())
}

#[async_trait]
impl KeyValueStore for DynamoStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let (name, id) = self.key(key);
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(name, id)
            .send()
            .await
            .map_err(backend)?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        item.get(VALUE_ATTRIBUTE)
            .map(|attr| {
                attr_to_json(attr).map_err(|reason| StoreError::Codec {
                    key: key.to_string(),
                    reason,
                })
            })
            .transpose()
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let (name, id) = self.key(key);
        self.client
            .put_item()
            .table_name(&self.table)
            .item(name, id)
            .item(VALUE_ATTRIBUTE, json_to_attr(&value))
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let (name, id) = self.key(key);
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(name, id)
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }
}

pub(crate) fn json_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attr(v)))
                .collect(),
        ),
    }
}

pub(crate) fn attr_to_json(attr: &AttributeValue) -> Result<Value, String> {
    let value = match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(items) => {
            Value::Array(items.iter().map(attr_to_json).collect::<Result<_, _>>()?)
        }
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attr_to_json(v)?)))
                .collect::<Result<Map<String, Value>, String>>()?,
        ),
        other => return Err(format!("unsupported attribute {other:?}")),
    };
    Ok(value)
}

fn parse_number(raw: &str) -> Result<Number, String> {
    raw.parse::<Number>()
        .map_err(|e| format!("invalid number '{raw}': {e}"))
}
