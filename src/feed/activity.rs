use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::feed::body_sample;
use crate::types::Event;

/// Most recent events for a collection, newest first.
pub const EVENTS_QUERY: &str = r#"
query GetEventsQuery($pagination: PaginationInput, $filter: EventFilterInput) {
  events(pagination: $pagination, filter: $filter) {
    ...EventFragment
  }
}

fragment UserEventFragment on User {
  address
  name
  isVerified
  avatar {
    image
  }
}

fragment EventFragment on Event {
  id
  from {
    ...UserEventFragment
  }
  to {
    ...UserEventFragment
  }
  type
  hash
  createdAt
  token {
    tokenId
    image
    name
  }
  collection {
    address
    name
    description
    totalSupply
    logo
    floorOrder {
      price
    }
  }
  order {
    isOrderAsk
    price
    endTime
    currency
    strategy
    status
  }
}
"#;

/// Event type filter for completed sales.
pub const SALE_EVENT_TYPE: &str = "SALE";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct EventsData {
    events: Option<Vec<Event>>,
}

/// Client for the marketplace GraphQL activity feed.
#[derive(Debug, Clone)]
pub struct ActivityFeedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ActivityFeedClient {
    pub fn new(http: reqwest::Client, cfg: &Config) -> Self {
        Self {
            http,
            endpoint: cfg.feed_api_url.clone(),
        }
    }

    /// Fetch the latest `limit` sales of `collection_address`, newest first.
    pub async fn fetch_recent_sales(&self, collection_address: &str, limit: u32) -> Result<Vec<Event>> {
        let payload = json!({
            "query": EVENTS_QUERY,
            "operationName": "GetEventsQuery",
            "variables": {
                "filter": {
                    "collection": collection_address,
                    "type": SALE_EVENT_TYPE,
                },
                "pagination": {
                    "first": limit,
                },
            },
        });

        let resp = self.http.post(&self.endpoint).json(&payload).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!("feed HTTP {status}: {}", body_sample(&body))));
        }

        let parsed: GraphQlResponse<EventsData> = serde_json::from_str(&body)?;

        if !parsed.errors.is_empty() {
            let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(AppError::GraphQl(messages.join("; ")));
        }

        let events = parsed
            .data
            .and_then(|d| d.events)
            .ok_or_else(|| AppError::Malformed("response has no data.events".to_string()))?;

        debug!(count = events.len(), collection = collection_address, "Fetched sale events");
        Ok(events)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COLLECTION: &str = "0x8c186802b1992f7650ac865d4ca94d55ff3c0d17";

    pub(crate) fn event_json(id: &str, price: &str, floor: &str) -> Value {
        json!({
            "id": id,
            "from": {
                "address": "0x1111111111111111111111111111111111111111",
                "name": null,
                "isVerified": false,
                "avatar": null
            },
            "to": {
                "address": "0x2222222222222222222222222222222222222222",
                "name": "buyer.eth",
                "isVerified": true,
                "avatar": { "image": "ipfs://avatar" }
            },
            "type": "SALE",
            "hash": format!("0xtx{id}"),
            "createdAt": "2022-05-01T12:00:00.000Z",
            "token": { "tokenId": format!("{id}00"), "image": "ipfs://img", "name": format!("Piece #{id}") },
            "collection": {
                "address": COLLECTION,
                "name": "Collection",
                "description": "desc",
                "totalSupply": 10000,
                "logo": null,
                "floorOrder": { "price": floor }
            },
            "order": {
                "isOrderAsk": true,
                "price": price,
                "endTime": 1651406400,
                "currency": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "strategy": "0x56244bb70cbd3ea9dc8007399f61dfc065190031",
                "status": "EXECUTED"
            }
        })
    }

    fn client_for(server: &MockServer) -> ActivityFeedClient {
        let cfg = Config::from_lookup(|key| match key {
            "FEED_API_URL" => Some(format!("{}/graphql", server.uri())),
            _ => None,
        })
        .unwrap();
        ActivityFeedClient::new(reqwest::Client::new(), &cfg)
    }

    #[tokio::test]
    async fn sends_sale_filter_and_parses_events() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": {
                    "filter": { "collection": COLLECTION, "type": "SALE" },
                    "pagination": { "first": 20 }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "events": [
                    event_json("12", "2000000000000000000", "1000000000000000000"),
                    event_json("11", "1000000000000000000", "1000000000000000000")
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let events = client_for(&server).fetch_recent_sales(COLLECTION, 20).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "12");
        assert_eq!(events[0].event_type, "SALE");
        assert_eq!(events[0].token.token_id, "1200");
        assert_eq!(events[0].collection.floor_order.price, "1000000000000000000");
        assert_eq!(events[0].order.status.as_deref(), Some("EXECUTED"));
        assert_eq!(events[0].to.as_ref().unwrap().name.as_deref(), Some("buyer.eth"));
    }

    #[tokio::test]
    async fn graphql_errors_abort() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Unknown argument" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_recent_sales(COLLECTION, 20).await.unwrap_err();
        match err {
            AppError::GraphQl(msg) => assert!(msg.contains("Unknown argument")),
            other => panic!("expected GraphQl error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_failure_status_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_recent_sales(COLLECTION, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_floor_order_is_a_schema_mismatch() {
        let server = MockServer::start().await;
        let mut event = event_json("5", "100", "80");
        event["collection"]["floorOrder"] = Value::Null;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "events": [event] } })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_recent_sales(COLLECTION, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_events_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_recent_sales(COLLECTION, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Malformed(_)), "got {err:?}");
    }
}
