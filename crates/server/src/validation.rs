//! Request-body validation for the masjid endpoints.
//!
//! Failures are collected per field so the response can report all of them at
//! once, with the wire name of the field as the `path`.

use api_types::error::FieldError;
use api_types::masjid::MasjidNew;

pub fn parse_new_masjid(payload: &MasjidNew) -> Result<engine::MasjidNew, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required(payload.name.as_deref(), "name", "Name is required", &mut errors);
    let address = required(
        payload.address.as_deref(),
        "address",
        "Address is required",
        &mut errors,
    );
    let city = required(payload.city.as_deref(), "city", "City is required", &mut errors);
    let state = required(
        payload.state.as_deref(),
        "state",
        "State is required",
        &mut errors,
    );
    let zip_code = required(
        payload.zip_code.as_deref(),
        "zipCode",
        "Zip code is required",
        &mut errors,
    );
    let country = required(
        payload.country.as_deref(),
        "country",
        "Country is required",
        &mut errors,
    );

    if let Some(email) = payload.email.as_deref() {
        if !is_valid_email(email) {
            errors.push(FieldError {
                path: "email".to_string(),
                message: "Invalid email address".to_string(),
            });
        }
    }
    if let Some(website) = payload.website.as_deref() {
        if !is_valid_url(website) {
            errors.push(FieldError {
                path: "website".to_string(),
                message: "Invalid website URL".to_string(),
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(engine::MasjidNew {
        name,
        address,
        city,
        state,
        zip_code,
        country,
        phone: payload.phone.clone(),
        email: payload.email.clone(),
        website: payload.website.clone(),
    })
}

fn required(
    value: Option<&str>,
    path: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => {
            errors.push(FieldError {
                path: path.to_string(),
                message: message.to_string(),
            });
            String::new()
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_valid_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
}
