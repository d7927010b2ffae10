use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::entities::pagination::{ListDefaults, Page, Pagination};

pub fn json_error(status: StatusCode, error: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": error,
        "message": message
    }))
}

/// `{success: true, <key>: [...], pagination}`
pub fn list_response<T: Serialize>(key: &str, page: Page<T>) -> HttpResponse {
    HttpResponse::Ok().json(list_envelope(key, true, json!(page.items), page.pagination, None))
}

/// 500 envelope that still carries an empty list and zeroed pagination, so
/// clients can render without special-casing failures.
pub fn list_failure(key: &str, defaults: ListDefaults) -> HttpResponse {
    let error = format!("Failed to load {}", key);
    HttpResponse::InternalServerError().json(list_envelope(
        key,
        false,
        json!([]),
        Pagination::empty(defaults),
        Some(error),
    ))
}

fn list_envelope(
    key: &str,
    success: bool,
    items: Value,
    pagination: Pagination,
    error: Option<String>,
) -> Value {
    let mut body = Map::new();
    body.insert("success".into(), json!(success));
    if let Some(error) = error {
        body.insert("error".into(), json!(error));
    }
    body.insert(key.into(), items);
    body.insert("pagination".into(), json!(pagination));
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pagination::{PageRequest, PROJECT_LIST};
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn list_response_uses_entity_key() {
        let page = Page {
            items: vec!["a", "b"],
            pagination: Pagination::new(PageRequest::first(PROJECT_LIST), 2),
        };
        let json = body_json(list_response("projects", page)).await;

        assert_eq!(json["success"], true);
        assert_eq!(json["projects"], json!(["a", "b"]));
        assert_eq!(json["pagination"]["totalItems"], 2);
        assert_eq!(json["pagination"]["totalPages"], 1);
    }

    #[actix_web::test]
    async fn list_failure_is_500_with_empty_data() {
        let response = list_failure("projects", PROJECT_LIST);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to load projects");
        assert_eq!(json["projects"], json!([]));
        assert_eq!(
            json["pagination"],
            json!({"page": 1, "limit": 6, "totalItems": 0, "totalPages": 0})
        );
    }
}
