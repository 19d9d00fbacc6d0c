use serde::Deserialize;

#[derive(Deserialize)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct OtpVerifyRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Deserialize)]
pub struct CompleteRegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub otp: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub location: String,
}

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue_id: String,
    pub banner_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue_id: Option<String>,
    pub banner_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTicketTypeRequest {
    pub event_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct UpdateTicketTypeRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

#[derive(Deserialize)]
pub struct SendNotificationRequest {
    pub message: String,
}

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub email: String,
    pub role: String,
}
