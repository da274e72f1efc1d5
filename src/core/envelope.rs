//! Error mapping for the three entry points.
//!
//! Every failure reaching a handler boundary goes through exactly one of the
//! functions below. Client-facing messages are fixed strings (plus the
//! requested identifier where relevant); the underlying error text is only
//! logged.

use crate::utils::error::{ErrorCategory, FacadeError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `dd/MM/yyyy HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const LABEL_BAD_REQUEST: &str = "Solicitud Incorrecta";
pub const LABEL_NOT_FOUND: &str = "Pokemon no encontrado";
pub const LABEL_INTERNAL: &str = "Error Interno del Servidor";

/// Error body of the stats service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub fecha: String,
    pub estado: u16,
    pub error: String,
    pub mensaje: String,
    pub ruta: String,
}

/// Error body of the serverless functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status code plus client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedError {
    pub status: u16,
    pub message: String,
}

impl MappedError {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

fn not_found_identifier(err: &FacadeError) -> Option<&str> {
    match err {
        FacadeError::NotFoundError { identifier, .. } => Some(identifier.as_str()),
        _ => None,
    }
}

/// Logs the full error server-side: 5xx at error level, 4xx at warn.
pub fn log_failure(err: &FacadeError, status: u16) {
    if status >= 500 {
        tracing::error!(error = %err, status, category = ?err.category(), "request failed");
    } else {
        tracing::warn!(error = %err, status, "request rejected");
    }
}

/// Stats service: maps a failure to `{fecha, estado, error, mensaje, ruta}`.
pub fn pokemon_error_envelope(err: &FacadeError, path: &str, now: NaiveDateTime) -> ErrorEnvelope {
    let (estado, label, mensaje) = match err.category() {
        ErrorCategory::Validation => (
            400,
            LABEL_BAD_REQUEST,
            "El nombre del Pokémon es un parámetro requerido.".to_string(),
        ),
        ErrorCategory::NotFound => (
            404,
            LABEL_NOT_FOUND,
            format!(
                "Pokémon '{}' no encontrado.",
                not_found_identifier(err).unwrap_or_default()
            ),
        ),
        ErrorCategory::UpstreamCommunication
        | ErrorCategory::MalformedResponse
        | ErrorCategory::Internal => (
            500,
            LABEL_INTERNAL,
            "Ocurrió un error inesperado al consultar la PokeAPI.".to_string(),
        ),
    };

    log_failure(err, estado);

    ErrorEnvelope {
        fecha: now.format(TIMESTAMP_FORMAT).to_string(),
        estado,
        error: label.to_string(),
        mensaje,
        ruta: path.to_string(),
    }
}

/// Type function: maps a failure to a status and `{error}` message.
pub fn type_error(err: &FacadeError) -> MappedError {
    let mapped = match err.category() {
        ErrorCategory::Validation => {
            MappedError::new(400, "El tipo de Pokémon es un parámetro requerido.")
        }
        ErrorCategory::NotFound => empty_type(not_found_identifier(err).unwrap_or_default()),
        ErrorCategory::UpstreamCommunication
        | ErrorCategory::MalformedResponse
        | ErrorCategory::Internal => {
            MappedError::new(500, "Error interno del servidor al obtener Pokémon.")
        }
    };

    log_failure(err, mapped.status);
    mapped
}

/// Type function: a lookup that produced no members.
pub fn empty_type(type_name: &str) -> MappedError {
    MappedError::new(
        404,
        format!("No se encontraron Pokémon para el tipo: {}", type_name),
    )
}

/// Comparison function: the request body was not JSON.
pub fn malformed_compare_body() -> MappedError {
    MappedError::new(400, "Cuerpo de la solicitud mal formado.")
}

/// Comparison function: maps a failure to a status and `{error}` message.
pub fn compare_error(err: &FacadeError) -> MappedError {
    let mapped = match err {
        FacadeError::MissingConfigError { .. } | FacadeError::ConfigError { .. } => {
            MappedError::new(500, "Configuración del servidor incompleta.")
        }
        _ => match err.category() {
            ErrorCategory::Validation => {
                MappedError::new(400, "Faltan los nombres de los Pokémon en la solicitud.")
            }
            ErrorCategory::NotFound => MappedError::new(
                404,
                format!(
                    "El Pokémon '{}' no fue encontrado.",
                    not_found_identifier(err).unwrap_or_default()
                ),
            ),
            // Unreadable stats payloads map like transport failures.
            ErrorCategory::UpstreamCommunication | ErrorCategory::MalformedResponse => {
                MappedError::new(502, "No se pudo comunicar con el servicio de Pokémon.")
            }
            ErrorCategory::Internal => {
                MappedError::new(500, "Ocurrió un error interno inesperado.")
            }
        },
    };

    log_failure(err, mapped.status);
    mapped
}
