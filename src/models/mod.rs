use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod equipment;
pub mod maintenance;
pub mod user;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

pub use equipment::*;
pub use maintenance::*;
pub use user::*;
