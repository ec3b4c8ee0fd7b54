//! DTOs de la API
//! 
//! Requests y responses serializados. Los nombres de campo en el wire
//! van en camelCase, salvo los alias SQL que viajan en snake_case.

pub mod auth_dto;
pub mod license_dto;
pub mod share_dto;
pub mod user_dto;
pub mod vehicle_dto;

use serde::Serialize;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
