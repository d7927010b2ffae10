use actix_web::HttpRequest;

const UNKNOWN_CLIENT: &str = "unknown";

/// Address used to key per-client state such as the contact rate limiter.
///
/// The first `X-Forwarded-For` hop is only honoured when the deployment sits
/// behind a trusted proxy; otherwise clients could pick their own key.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        let first_hop = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        if let Some(hop) = first_hop {
            return hop.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
