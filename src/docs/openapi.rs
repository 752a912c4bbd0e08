//! OpenAPI-style documents for an external documentation renderer.
//!
//! Two documents are produced:
//! - the swagger config, listing one URL per group
//! - one document per group, listing that group's member routes with
//!   operation ID, tag (declaring component) and response content type

use serde_json::{json, Map, Value};

use crate::docs::grouper::{DocumentationGrouper, RouteGroup};
use crate::routing::RouteTable;

/// Base path under which the documents are served.
pub const API_DOCS_PATH: &str = "/v3/api-docs";

const OPENAPI_VERSION: &str = "3.0.1";
const TITLE: &str = "reactive-routes";

/// URL of the document for `group`.
pub fn group_url(group: &str) -> String {
    format!("{API_DOCS_PATH}/{group}")
}

/// Index of all groups.
pub fn swagger_config(grouper: &DocumentationGrouper) -> Value {
    let urls: Vec<Value> = grouper
        .list_groups()
        .iter()
        .map(|group| json!({ "name": group.name(), "url": group_url(group.name()) }))
        .collect();

    json!({
        "configUrl": format!("{API_DOCS_PATH}/swagger-config"),
        "urls": urls,
    })
}

/// Document describing the routes currently in `group`.
pub fn group_document(grouper: &DocumentationGrouper, group: &RouteGroup, table: &RouteTable) -> Value {
    let mut paths = Map::new();

    for member in grouper.members(group, table) {
        let route = member.route;
        let (tag, operation_id) = match member.doc {
            Some(doc) => (doc.component.clone(), doc.operation.clone()),
            None => ("default".to_string(), route.key().to_string()),
        };

        let mut content = Map::new();
        content.insert(route.content_type().essence().to_string(), json!({}));

        let operation = json!({
            "tags": [tag],
            "operationId": operation_id,
            "responses": {
                "200": {
                    "description": "OK",
                    "content": content,
                },
            },
        });

        let entry = paths
            .entry(route.path().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(operations) = entry {
            operations.insert(route.method().as_str().to_lowercase(), operation);
        }
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": { "title": TITLE, "version": env!("CARGO_PKG_VERSION") },
        "x-group": group.name(),
        "paths": paths,
    })
}
