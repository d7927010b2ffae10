use actix_web::{
    http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER},
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde_json::json;
use tracing::{instrument, warn};

use crate::{
    constants::RATE_LIMITED_MESSAGE,
    entities::contact::ContactForm,
    errors::AppError,
    limiter::rate_limiter::RateLimitDecision,
    routes::json_error::JsonError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// `POST /api/contact`. The rate limit is checked before the body is even
/// parsed, so malformed submissions still count against the client.
#[instrument(skip(req, state, body))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let client = get_client_ip(&req, state.config.trust_x_forwarded_for);
    let decision = state.contact_limiter.check(&client);

    let mut response = if decision.allowed {
        process_submission(&state, &body).await
    } else {
        warn!(client = %client, "Contact rate limit exceeded");
        rate_limited(&decision)
    };

    apply_rate_limit_headers(response.headers_mut(), &decision);
    response
}

async fn process_submission(state: &AppState, body: &[u8]) -> HttpResponse {
    let form: ContactForm = match serde_json::from_slice(body) {
        Ok(form) => form,
        Err(e) => return JsonError::from(e).error_response(),
    };

    match state.contact_handler.submit_contact(form).await {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        // The use case only emits fixed, client-safe messages here
        Err(AppError::InternalError(message)) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": message
        })),
        Err(e) => e.error_response(),
    }
}

fn rate_limited(decision: &RateLimitDecision) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header((RETRY_AFTER, decision.retry_after_secs().to_string()))
        .json(json!({
            "success": false,
            "message": RATE_LIMITED_MESSAGE,
            "limit": decision.limit,
            "remaining": decision.remaining,
            "reset": decision.reset_ms
        }))
}

/// `X-RateLimit-Reset` is in whole seconds, matching `Retry-After`.
fn apply_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(decision.limit),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(decision.remaining),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-reset"),
        HeaderValue::from(decision.retry_after_secs()),
    );
}
