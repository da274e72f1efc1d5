//! API Gateway proxy handlers for the serverless functions.
//!
//! These are runtime-agnostic: the Lambda binaries feed them the decoded
//! event and return whatever they produce.

use crate::core::compare::CompareService;
use crate::core::envelope::{
    compare_error, empty_type, malformed_compare_body, type_error, ErrorBody, MappedError,
};
use crate::core::service::TypeService;
use crate::domain::model::{CompareRequest, GatewayRequest, GatewayResponse};
use crate::domain::ports::Storage;
use crate::utils::error::FacadeError;
use serde::Serialize;
use std::collections::HashMap;

pub const TYPE_PARAMETER: &str = "type";

fn headers(cors: bool) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    if cors {
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    }
    headers
}

fn respond<T: Serialize>(status: u16, body: &T, cors: bool) -> GatewayResponse {
    let (status_code, body) = match serde_json::to_string(body) {
        Ok(body) => (status, body),
        Err(e) => {
            tracing::error!("Failed to serialize response body: {}", e);
            (500, r#"{"error":"Error interno del servidor."}"#.to_string())
        }
    };

    GatewayResponse {
        status_code,
        headers: headers(cors),
        body,
        is_base64_encoded: false,
    }
}

fn error_response(mapped: MappedError, cors: bool) -> GatewayResponse {
    respond(
        mapped.status,
        &ErrorBody {
            error: mapped.message,
        },
        cors,
    )
}

/// Type function: members of the `type` path parameter as `[{name, url}]`.
pub async fn handle_type_request(service: &TypeService, request: &GatewayRequest) -> GatewayResponse {
    let type_name = request.path_parameter(TYPE_PARAMETER).unwrap_or_default();
    tracing::info!(
        method = request.http_method.as_deref().unwrap_or("-"),
        path = request.path.as_deref().unwrap_or("-"),
        "Received type request for '{}'",
        type_name
    );

    match service.find_by_type(type_name).await {
        Ok(members) if members.is_empty() => {
            tracing::info!("No Pokemon found for type: {}", type_name);
            error_response(empty_type(type_name.trim()), true)
        }
        Ok(members) => {
            tracing::info!("Found {} Pokemon for type: {}", members.len(), type_name);
            respond(200, &members, true)
        }
        Err(e) => error_response(type_error(&e), true),
    }
}

/// Comparison function: body `{pokemon1, pokemon2}`, answers `{result}`.
pub async fn handle_compare_request<S: Storage>(
    service: &CompareService<S>,
    request: &GatewayRequest,
    request_id: &str,
) -> GatewayResponse {
    let body = request.body.as_deref().unwrap_or("{}");
    let compare_request: CompareRequest = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Rejected comparison body: {}", e);
            return error_response(malformed_compare_body(), false);
        }
    };

    match service.compare(&compare_request, request_id).await {
        Ok(result) => respond(200, &result, false),
        Err(e) => error_response(compare_error(&e), false),
    }
}

/// Response for every comparison request when start-up configuration failed.
pub fn compare_unavailable(err: &FacadeError) -> GatewayResponse {
    error_response(compare_error(err), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PokemonRef, UpstreamType};
    use crate::domain::ports::TypeSource;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubTypes;

    #[async_trait]
    impl TypeSource for StubTypes {
        async fn fetch_type(&self, type_name: &str) -> Result<Option<UpstreamType>> {
            match type_name {
                "grass" => Ok(Some(
                    serde_json::from_value(serde_json::json!({
                        "pokemon": [
                            {"pokemon": {"name": "bulbasaur", "url": "url1"}},
                            {"pokemon": {"name": "ivysaur", "url": "url2"}}
                        ]
                    }))
                    .unwrap(),
                )),
                "broken" => Err(FacadeError::UpstreamStatusError {
                    status: 500,
                    body: "java.lang.NullPointerException".to_string(),
                }),
                _ => Ok(None),
            }
        }
    }

    fn event(type_name: Option<&str>) -> GatewayRequest {
        GatewayRequest {
            path_parameters: type_name.map(|t| {
                let mut params = HashMap::new();
                params.insert(TYPE_PARAMETER.to_string(), t.to_string());
                params
            }),
            ..Default::default()
        }
    }

    fn service() -> TypeService {
        TypeService::new(Arc::new(StubTypes))
    }

    fn error_of(response: &GatewayResponse) -> String {
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        body.error
    }

    #[tokio::test]
    async fn test_type_members_in_order() {
        let response = handle_type_request(&service(), &event(Some("grass"))).await;

        assert_eq!(response.status_code, 200);
        let members: Vec<PokemonRef> = serde_json::from_str(&response.body).unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur"]);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_missing_parameter_is_bad_request() {
        for request in [event(None), event(Some("   "))] {
            let response = handle_type_request(&service(), &request).await;
            assert_eq!(response.status_code, 400);
            assert_eq!(
                error_of(&response),
                "El tipo de Pokémon es un parámetro requerido."
            );
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        }
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_found() {
        let response = handle_type_request(&service(), &event(Some("shadow"))).await;
        assert_eq!(response.status_code, 404);
        assert!(error_of(&response).contains("shadow"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic() {
        let response = handle_type_request(&service(), &event(Some("broken"))).await;
        assert_eq!(response.status_code, 500);
        assert!(!error_of(&response).contains("NullPointer"));
    }

    #[test]
    fn test_compare_unavailable() {
        let response = compare_unavailable(&FacadeError::MissingConfigError {
            field: "POKEMON_SERVICE_URL".to_string(),
        });
        assert_eq!(response.status_code, 500);
        assert!(!response.headers.contains_key("Access-Control-Allow-Origin"));
        assert_eq!(error_of(&response), "Configuración del servidor incompleta.");
    }

    #[test]
    fn test_gateway_response_shape() {
        let response = respond(200, &serde_json::json!([]), true);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["body"], "[]");
    }
}
