//! Boundary validation for the Fertilizer Manager
//!
//! These checks run before a form reaches the ledgers. The ledgers never
//! repeat them, so a caller that skips validation can still store an
//! incomplete record.

use rust_decimal::Decimal;
use validator::ValidationErrors;

/// Advisory stock check for a sale drawn from a known item
pub fn check_stock_available(requested: Decimal, on_hand: Decimal) -> Result<(), &'static str> {
    if requested > on_hand {
        return Err("Insufficient stock for this sale");
    }
    Ok(())
}

/// Flatten `validator` output to the first failing field (by field name) and its message
pub fn first_violation(errors: &ValidationErrors) -> Option<(String, String)> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    fields.into_iter().find_map(|(field, errs)| {
        errs.first().map(|err| {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            (field.to_string(), message)
        })
    })
}
