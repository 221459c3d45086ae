//! Form field parsing shared by the entity editors.
//!
//! Inputs arrive as raw strings from `event_target_value`. Each helper
//! returns the parsed value or a `FieldError` whose text is shown under the
//! offending input.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

/// Most cartons a production record may carry beyond full boxes.
pub const MAX_CARTONES: i64 = 11;
/// Most loose eggs (or defective eggs) per record.
pub const MAX_SUELTOS: i64 = 29;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Empty or whitespace-only input.
    #[error("Este campo es obligatorio.")]
    Required,
    /// Input did not parse as a number.
    #[error("Debe ser un número válido.")]
    NotANumber,
    #[error("El valor no puede ser negativo.")]
    Negative,
    #[error("No puede ser mayor a {0}.")]
    TooLarge(i64),
    #[error("El campo debe ser un número positivo.")]
    NotPositive,
    #[error("El campo solo debe contener letras y números.")]
    NotAlphanumeric,
    #[error("Solo se permiten números.")]
    NotDigits,
    #[error("Fecha no válida.")]
    BadDate,
}

pub fn required_text(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { Err(FieldError::Required) } else { Ok(trimmed.to_owned()) }
}

/// Letters and digits only, as lote and corral codes are.
pub fn alphanumeric_text(raw: &str) -> Result<String, FieldError> {
    let text = required_text(raw)?;
    if text.chars().all(char::is_alphanumeric) { Ok(text) } else { Err(FieldError::NotAlphanumeric) }
}

/// Digits only, as phone numbers are entered.
pub fn digits_text(raw: &str) -> Result<String, FieldError> {
    let text = required_text(raw)?;
    if text.chars().all(|c| c.is_ascii_digit()) { Ok(text) } else { Err(FieldError::NotDigits) }
}

/// Non-negative whole number.
pub fn parse_count(raw: &str) -> Result<i64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    let value: i64 = trimmed.parse().map_err(|_| FieldError::NotANumber)?;
    if value < 0 {
        return Err(FieldError::Negative);
    }
    Ok(value)
}

/// Non-negative whole number no larger than `max`.
pub fn parse_bounded(raw: &str, max: i64) -> Result<i64, FieldError> {
    let value = parse_count(raw)?;
    if value > max {
        return Err(FieldError::TooLarge(max));
    }
    Ok(value)
}

/// Whole number greater than zero.
pub fn parse_positive(raw: &str) -> Result<i64, FieldError> {
    match parse_count(raw) {
        Ok(0) | Err(FieldError::Negative) => Err(FieldError::NotPositive),
        other => other,
    }
}

/// Non-negative decimal amount; accepts a comma as decimal separator.
pub fn parse_amount(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    let value: f64 = trimmed.replace(',', ".").parse().map_err(|_| FieldError::NotANumber)?;
    if !value.is_finite() {
        return Err(FieldError::NotANumber);
    }
    if value < 0.0 {
        return Err(FieldError::Negative);
    }
    Ok(value)
}

/// Id chosen in a `<select>`; the placeholder option carries `""` or `0`.
pub fn parse_choice(raw: &str) -> Result<i64, FieldError> {
    match parse_count(raw)? {
        0 => Err(FieldError::Required),
        id => Ok(id),
    }
}

/// Optional count: blank means `None`.
pub fn parse_optional_count(raw: &str) -> Result<Option<i64>, FieldError> {
    if raw.trim().is_empty() { Ok(None) } else { parse_count(raw).map(Some) }
}

/// A `YYYY-MM-DD` date input, normalised.
pub fn required_date(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    super::listing::parse_api_date(trimmed).map(|date| date.to_string()).ok_or(FieldError::BadDate)
}

/// Turn a `YYYY-MM-DD` date input into the midnight timestamp the API stores.
pub fn date_input_to_api(raw: &str) -> Result<String, FieldError> {
    required_date(raw).map(|date| format!("{date}T00:00:00.000Z"))
}

/// Collected per-field errors for one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(&'static str, FieldError)>);

impl FormErrors {
    /// Record the error of `result` under `field` and pass the value through.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push((field, e));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<String> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, e)| e.to_string())
    }
}
