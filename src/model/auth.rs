use serde::{Deserialize, Serialize};

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize)]
pub struct AuthStatusDto {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}
