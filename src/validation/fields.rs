use garde::Validate;

use crate::error::{AppError, Result};

/// Runs the `garde` rules declared on a request payload.
///
/// Every violation is reported, joined into one message.
pub fn validate_payload<T: Validate<Context = ()>>(payload: &T) -> Result<()> {
    payload.validate().map_err(|report| {
        let message = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                if field.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", field, error)
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    })
}

/// Rejects strings that are empty or only whitespace.
pub fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}
