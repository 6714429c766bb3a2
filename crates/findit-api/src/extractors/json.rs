//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use findit_core::error::AppError;

use crate::error::ApiError;

/// Message for every rule violation; the field messages go in `errors`.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// A deserialized and validated JSON body.
#[derive(Debug, Clone, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError(AppError::validation(rejection.body_text()))
            })?;

        value.validate().map_err(validation_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Flatten `validator` errors into one message per failed rule, sorted by field.
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let details = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    ApiError(AppError::validation(VALIDATION_FAILED).with_details(details))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Body {
        #[validate(email(message = "email must be an email"))]
        email: String,
        #[validate(length(min = 1, message = "name should not be empty"))]
        name: String,
    }

    #[test]
    fn test_validation_details_collected() {
        let body = Body {
            email: "nope".into(),
            name: String::new(),
        };
        let err = validation_error(body.validate().unwrap_err()).0;
        assert_eq!(err.message, VALIDATION_FAILED);
        assert_eq!(
            err.details,
            vec!["email must be an email".to_string(), "name should not be empty".to_string()]
        );
    }
}
