//! Configuration validation

use thiserror::Error;

use super::Settings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Vendor '{0}' has an empty model name")]
    EmptyModel(&'static str),

    #[error("Vendor '{0}' has an empty api_key_env")]
    EmptyApiKeyEnv(&'static str),

    #[error("Timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate settings, collecting every problem rather than stopping at
    /// the first.
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let vendors = [
            ("chatgpt", &settings.vendors.chatgpt),
            ("claude", &settings.vendors.claude),
            ("gemini", &settings.vendors.gemini),
        ];

        for (name, vendor) in vendors {
            if vendor.model.trim().is_empty() {
                errors.push(ValidationError::EmptyModel(name));
            }
            if vendor.api_key_env.trim().is_empty() {
                errors.push(ValidationError::EmptyApiKeyEnv(name));
            }
        }

        if settings.timeouts.generate_seconds == 0 {
            errors.push(ValidationError::ZeroTimeout("generate_seconds"));
        }
        if settings.timeouts.probe_seconds == 0 {
            errors.push(ValidationError::ZeroTimeout("probe_seconds"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
