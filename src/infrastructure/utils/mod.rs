pub mod get_client_ip;
pub mod markdown;
pub mod parse_id;
