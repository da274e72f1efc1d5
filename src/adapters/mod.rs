// Adapters layer: inbound surfaces (axum router, API Gateway events).

pub mod gateway;
pub mod http;
