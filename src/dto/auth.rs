use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

lazy_static! {
    static ref ZIP_CODE: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref PHONE_NUMBER: Regex = Regex::new(r"^0\d{9}$").unwrap();
}

fn validate_registration(form: &RegisterRequest) -> Result<(), ValidationError> {
    if form.password != form.confirm_password {
        let mut err = ValidationError::new("mismatch");
        err.message = Some("passwords do not match".into());
        return Err(err);
    }
    if NaiveDate::parse_from_str(&form.birthdate, "%Y-%m-%d").is_err() {
        let mut err = ValidationError::new("birthdate");
        err.message = Some("birthdate must be yyyy-MM-dd".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_registration"))]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    /// `yyyy-MM-dd`, as produced by a date input.
    pub birthdate: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(regex(path = "ZIP_CODE", message = "zip code must have 4 digits"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    #[validate(regex(
        path = "PHONE_NUMBER",
        message = "phone number must start with 0 and have 10 digits"
    ))]
    pub phone_number: String,
}

/// Body forwarded to the backend's register endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BackendRegistration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `dd.MM.yyyy`, the format the backend expects.
    pub birthdate: String,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
}
