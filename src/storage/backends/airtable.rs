//! Airtable REST table store with rate-limit retry

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::orders::{DeliveryRecord, OrderRecord, RecordId};
use crate::storage::{
    config::{AirtableConfig, TableNames},
    error::{StorageError, StorageResult},
    traits::{DeliverySink, OrderSource, TableStore},
};

/// Records the REST API accepts per create request
pub const REST_MAX_RECORDS_PER_REQUEST: usize = 10;

/// Airtable REST client for one base
pub struct AirtableClient {
    client: Client,
    api_key: String,
    orders_url: Url,
    deliveries_url: Url,
    max_retries: u32,
    retry_delay: Duration,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<OrderRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateRequest {
    records: Vec<CreateRecord>,
}

#[derive(Debug, Serialize)]
struct CreateRecord {
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    records: Vec<CreatedRecord>,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: RecordId,
}

impl AirtableClient {
    /// Create a client for the configured base
    pub fn new(config: &AirtableConfig, tables: &TableNames) -> StorageResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StorageError::configuration("Airtable API key is not set"))?;
        if config.base_id.is_empty() {
            return Err(StorageError::configuration("Airtable base_id is not set"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                StorageError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            orders_url: table_url(&config.endpoint, &config.base_id, &tables.orders)?,
            deliveries_url: table_url(&config.endpoint, &config.base_id, &tables.deliveries)?,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    /// Send a request, retrying only when the API answers 429
    async fn send<F>(&self, build: F) -> StorageResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retry_count = 0;
        loop {
            let response = build().bearer_auth(&self.api_key).send().await?;
            match check_status(response).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_rate_limited() && retry_count < self.max_retries => {
                    retry_count += 1;
                    let delay = self.calculate_backoff(retry_count);
                    warn!(
                        "Rate limited by Airtable, retry {}/{} in {:?}",
                        retry_count, self.max_retries, delay
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Exponential backoff delay
    fn calculate_backoff(&self, retry_count: u32) -> Duration {
        self.retry_delay * 2u32.saturating_pow(retry_count.saturating_sub(1))
    }
}

/// `<endpoint>/<base>/<table>` with each segment percent-encoded
fn table_url(endpoint: &str, base_id: &str, table: &str) -> StorageResult<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| StorageError::configuration(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
    url.path_segments_mut()
        .map_err(|_| StorageError::configuration(format!("Endpoint '{}' cannot be a base", endpoint)))?
        .pop_if_empty()
        .push(base_id)
        .push(table);
    Ok(url)
}

async fn check_status(response: Response) -> StorageResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(StorageError::configuration("Invalid Airtable API key"));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StorageError::not_found(response.url().path().to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Cell map for the create endpoint
///
/// Linked record cells are sent as arrays of record ids.
fn rest_fields(record: &DeliveryRecord) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("Date".to_string(), Value::String(record.date.to_string()));
    if let Some(restaurant) = &record.restaurant {
        fields.insert("Restaurant".to_string(), restaurant.clone());
    }
    if let Some(hospital) = &record.hospital {
        fields.insert("Hospital".to_string(), hospital.clone());
    }
    fields.insert(
        "Recurring order".to_string(),
        Value::Array(vec![Value::String(record.recurring_order.clone())]),
    );
    fields
}

#[async_trait]
impl OrderSource for AirtableClient {
    async fn list_orders(&self) -> StorageResult<Vec<OrderRecord>> {
        let mut orders = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let response = self
                .send(|| {
                    let request = self.client.get(self.orders_url.clone());
                    match &offset {
                        Some(cursor) => request.query(&[("offset", cursor)]),
                        None => request,
                    }
                })
                .await?;
            let page: ListResponse = response.json().await?;
            debug!("Fetched page of {} orders", page.records.len());
            orders.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(orders)
    }
}

#[async_trait]
impl DeliverySink for AirtableClient {
    fn max_batch_size(&self) -> usize {
        REST_MAX_RECORDS_PER_REQUEST
    }

    async fn create_deliveries(&self, batch: Vec<DeliveryRecord>) -> StorageResult<Vec<RecordId>> {
        if batch.len() > REST_MAX_RECORDS_PER_REQUEST {
            return Err(StorageError::BatchTooLarge {
                size: batch.len(),
                limit: REST_MAX_RECORDS_PER_REQUEST,
            });
        }

        let body = CreateRequest {
            records: batch
                .iter()
                .map(|record| CreateRecord {
                    fields: rest_fields(record),
                })
                .collect(),
        };

        let response = self
            .send(|| self.client.post(self.deliveries_url.clone()).json(&body))
            .await?;
        let created: CreateResponse = response.json().await?;
        Ok(created.records.into_iter().map(|r| r.id).collect())
    }
}

impl TableStore for AirtableClient {
    fn backend_name(&self) -> &'static str {
        "airtable"
    }

    fn order_source(&self) -> &dyn OrderSource {
        self
    }

    fn delivery_sink(&self) -> &dyn DeliverySink {
        self
    }
}
