use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://ticketing.app/claims/role")]
    pub role: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}
