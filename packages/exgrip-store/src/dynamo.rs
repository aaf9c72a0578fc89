use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use aws_sdk_dynamodb::{
	Client,
	error::{DisplayErrorContext, SdkError},
	types::AttributeValue,
};

use crate::{
	Error, Result,
	record::{AttrValue, WireRecord},
	scan::{ContinuationToken, RecordStore, ScanPage, ScanRequest},
};

/// DynamoDB-backed record store. Scans are linear with server-side
/// filtering; no index is assumed.
pub struct DynamoRecordStore {
	client: Client,
	timeout: Duration,
}
impl DynamoRecordStore {
	pub fn new(client: Client, timeout: Duration) -> Self {
		Self { client, timeout }
	}
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
	async fn scan_page(
		&self,
		request: &ScanRequest,
		start: Option<&ContinuationToken>,
	) -> Result<ScanPage> {
		let mut scan = self.client.scan().table_name(&request.table);

		// DynamoDB rejects declared-but-unused expression members, so the
		// alias map and bindings only travel with a non-empty expression.
		if let Some(expression) = request.filter.expression() {
			scan = scan.filter_expression(expression);

			for (name, value) in request.filter.values() {
				scan = scan.expression_attribute_values(name, to_attribute_value(value));
			}
			for (alias, attribute) in request.filter.names() {
				scan = scan.expression_attribute_names(alias, attribute);
			}
		}
		if let Some(start) = start {
			scan = scan.set_exclusive_start_key(Some(
				start.iter().map(|(name, value)| (name.clone(), to_attribute_value(value))).collect(),
			));
		}

		let output = tokio::time::timeout(self.timeout, scan.send())
			.await
			.map_err(|_| Error::Timeout {
				operation: "dynamodb.scan",
				after_ms: self.timeout.as_millis() as u64,
			})?
			.map_err(|err| match &err {
				SdkError::ServiceError(context)
					if context.err().is_provisioned_throughput_exceeded_exception() =>
					Error::ThroughputExceeded { table: request.table.clone() },
				_ => Error::Backend {
					operation: "dynamodb.scan",
					message: DisplayErrorContext(&err).to_string(),
				},
			})?;
		let items = output
			.items
			.unwrap_or_default()
			.iter()
			.map(from_attribute_map)
			.collect::<Result<Vec<_>>>()?;
		let next = output.last_evaluated_key.as_ref().map(from_attribute_map).transpose()?;

		Ok(ScanPage { items, next })
	}
}

fn to_attribute_value(value: &AttrValue) -> AttributeValue {
	match value {
		AttrValue::S(value) => AttributeValue::S(value.clone()),
		AttrValue::N(value) => AttributeValue::N(value.clone()),
		AttrValue::Bool(value) => AttributeValue::Bool(*value),
		AttrValue::Null => AttributeValue::Null(true),
	}
}

fn from_attribute_map(map: &HashMap<String, AttributeValue>) -> Result<WireRecord> {
	map.iter()
		.map(|(name, value)| Ok((name.clone(), from_attribute_value(name, value)?)))
		.collect()
}

fn from_attribute_value(name: &str, value: &AttributeValue) -> Result<AttrValue> {
	match value {
		AttributeValue::S(value) => Ok(AttrValue::S(value.clone())),
		AttributeValue::N(value) => Ok(AttrValue::N(value.clone())),
		AttributeValue::Bool(value) => Ok(AttrValue::Bool(*value)),
		AttributeValue::Null(_) => Ok(AttrValue::Null),
		other => Err(Error::Decode {
			attribute: name.to_string(),
			message: format!("unsupported wire attribute type {other:?}"),
		}),
	}
}
