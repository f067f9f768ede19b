//! Validation utilities for user input

use chrono::{Datelike, NaiveDate};

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, for `?` in controllers.
    pub fn into_result(self) -> Result<(), String> {
        match self.error {
            Some(message) if !self.is_valid => Err(message),
            _ => Ok(()),
        }
    }
}

fn all_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

/// Validate zip code: 5 or 6 digits
pub fn validate_zip_code(zip: &str) -> ValidationResult {
    if !all_digits(zip, 5, 6) {
        return ValidationResult::err("Invalid Zip Code format. Must be 5 or 6 digits.");
    }
    ValidationResult::ok()
}

/// Validate phone number: exactly 10 digits
pub fn validate_phone(phone: &str) -> ValidationResult {
    if !all_digits(phone, 10, 10) {
        return ValidationResult::err("Invalid Phone Number format. Must be 10 digits.");
    }
    ValidationResult::ok()
}

/// Validate registration password confirmation
pub fn validate_password_confirmation(password: &str, confirm: &str) -> ValidationResult {
    if password != confirm {
        return ValidationResult::err("Passwords do not match.");
    }
    ValidationResult::ok()
}

/// Validate a replacement password and its confirmation.
///
/// `min_len` is 0 where the server enforces the rules itself.
pub fn validate_new_password(new_password: &str, confirm: &str, min_len: usize) -> ValidationResult {
    if new_password != confirm {
        return ValidationResult::err("New passwords do not match.");
    }
    if new_password.chars().count() < min_len {
        return ValidationResult::err(format!(
            "New password must be at least {} characters long.",
            min_len
        ));
    }
    ValidationResult::ok()
}

/// Validate name on card
pub fn validate_card_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return ValidationResult::err("Please enter the name on the card.");
    }
    ValidationResult::ok()
}

/// Validate card number: 13 to 16 digits, no separators
pub fn validate_card_number(number: &str) -> ValidationResult {
    if !all_digits(number, 13, 16) {
        return ValidationResult::err("Invalid Card Number. Must be 13-16 digits.");
    }
    ValidationResult::ok()
}

/// Validate CVV: 3 or 4 digits
pub fn validate_cvv(cvv: &str) -> ValidationResult {
    if !all_digits(cvv, 3, 4) {
        return ValidationResult::err("Invalid CVV. Must be 3 or 4 digits.");
    }
    ValidationResult::ok()
}

/// Parse an `MM/YY` expiry into (month, two-digit year).
pub fn parse_expiry(expiry: &str) -> Option<(u32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    if month.len() != 2 || !all_digits(year, 2, 2) || !all_digits(month, 2, 2) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: u32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Validate expiry format
pub fn validate_expiry_format(expiry: &str) -> ValidationResult {
    match parse_expiry(expiry) {
        Some(_) => ValidationResult::ok(),
        None => ValidationResult::err("Invalid Expiry Date format (MM/YY)."),
    }
}

/// Validate that an `MM/YY` expiry is not before the month containing `today`
pub fn validate_expiry_not_past(expiry: &str, today: NaiveDate) -> ValidationResult {
    let Some((month, year)) = parse_expiry(expiry) else {
        return ValidationResult::err("Invalid Expiry Date format (MM/YY).");
    };
    let current_year = (today.year() % 100) as u32;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return ValidationResult::err("Expiry date cannot be in the past.");
    }
    ValidationResult::ok()
}

/// Validate a decimal price: non-negative and finite
pub fn validate_price(price: &str) -> ValidationResult {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => ValidationResult::ok(),
        _ => ValidationResult::err("Price must be a non-negative number."),
    }
}

/// Validate stock: a non-negative whole number
pub fn validate_stock(stock: &str) -> ValidationResult {
    match stock.trim().parse::<u64>() {
        Ok(_) => ValidationResult::ok(),
        Err(_) => ValidationResult::err("Stock must be a whole number of zero or more."),
    }
}
