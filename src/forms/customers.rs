use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::CustomerProfile;
use crate::forms::{optional_text, sanitize_inline_text, sanitize_multiline_text};

/// Maximum length allowed for a customer name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const FIELD_MAX_LEN_VALIDATOR: u64 = 255;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = 1024;

/// Result type returned by the customer form helpers.
pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

/// Errors that can occur while processing customer forms.
#[derive(Debug, Error)]
pub enum CustomerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("customer name cannot be empty")]
    EmptyName,
}

fn sanitized_name(name: &str) -> CustomerFormResult<String> {
    let name = sanitize_inline_text(name);
    if name.is_empty() {
        return Err(CustomerFormError::EmptyName);
    }
    Ok(name)
}

/// Form submitted by staff to create a registration link. With a name the
/// customer is stored right away as pending; without one the link carries a
/// one-time token and the customer is created when it registers.
#[derive(Debug, Deserialize, Validate)]
pub struct InviteCustomerForm {
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
}

impl InviteCustomerForm {
    pub fn into_name(self) -> CustomerFormResult<Option<String>> {
        self.validate()?;
        Ok(optional_text(self.name.as_deref()))
    }
}

/// Self-service registration form of the customer portal.
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = FIELD_MAX_LEN_VALIDATOR))]
    pub category: Option<String>,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = FIELD_MAX_LEN_VALIDATOR))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = FIELD_MAX_LEN_VALIDATOR))]
    pub document: Option<String>,
    #[serde(default)]
    #[validate(length(max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub billing_address: Option<String>,
}

impl RegistrationForm {
    pub fn into_profile(self) -> CustomerFormResult<CustomerProfile> {
        self.validate()?;

        Ok(CustomerProfile {
            name: sanitized_name(&self.name)?,
            category: optional_text(self.category.as_deref()),
            email: optional_text(Some(self.email.as_str())).map(|email| email.to_lowercase()),
            phone: optional_text(self.phone.as_deref()),
            document: optional_text(self.document.as_deref()),
            billing_address: self
                .billing_address
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            name: " Escola  Sol ".to_string(),
            category: Some("escola".to_string()),
            email: "Contato@Escola.com.br".to_string(),
            phone: Some("  ".to_string()),
            document: Some("12.345.678/0001-90".to_string()),
            billing_address: Some("Rua A, 10\n\n\nCentro".to_string()),
        }
    }

    #[test]
    fn registration_is_sanitized() {
        let profile = registration().into_profile().expect("valid form");

        assert_eq!(profile.name, "Escola Sol");
        assert_eq!(profile.email.as_deref(), Some("contato@escola.com.br"));
        assert_eq!(profile.phone, None);
        assert_eq!(profile.billing_address.as_deref(), Some("Rua A, 10\n\nCentro"));
    }

    #[test]
    fn registration_requires_valid_email() {
        let mut form = registration();
        form.email = "not-an-email".to_string();

        assert!(matches!(
            form.into_profile(),
            Err(CustomerFormError::Validation(_))
        ));
    }

    #[test]
    fn invite_treats_blank_names_as_temporary_links() {
        let form = InviteCustomerForm {
            name: Some("   ".to_string()),
        };
        assert_eq!(form.into_name().expect("valid form"), None);

        let form = InviteCustomerForm {
            name: Some(" Padaria  Lua ".to_string()),
        };
        assert_eq!(
            form.into_name().expect("valid form").as_deref(),
            Some("Padaria Lua")
        );
    }
}
