//! Error types for request validation.

use std::fmt;

/// Request fields that carry a local constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RedirectUrl,
    CancelUrl,
    LogoUrl,
    HeaderText,
    CustomerIp,
    CustomerTitle,
    CustomerFirstName,
    CustomerLastName,
    CustomerEmail,
    TotalAmount,
    InvoiceNumber,
    InvoiceDescription,
    InvoiceReference,
    Option1,
    Option2,
    Option3,
}

impl Field {
    /// Returns the human-readable field name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::RedirectUrl => "Redirect URL",
            Field::CancelUrl => "Cancel URL",
            Field::LogoUrl => "Logo URL",
            Field::HeaderText => "Header text",
            Field::CustomerIp => "Customer IP",
            Field::CustomerTitle => "Customer title",
            Field::CustomerFirstName => "First name",
            Field::CustomerLastName => "Last name",
            Field::CustomerEmail => "Email",
            Field::TotalAmount => "Total amount",
            Field::InvoiceNumber => "Invoice number",
            Field::InvoiceDescription => "Invoice description",
            Field::InvoiceReference => "Invoice reference",
            Field::Option1 => "Option 1",
            Field::Option2 => "Option 2",
            Field::Option3 => "Option 3",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field value rejected before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} was not a valid URL: {value}")]
    InvalidUrl { field: Field, value: String },

    #[error("{field} must not exceed {max} characters in length (got {actual})")]
    TooLong {
        field: Field,
        max: usize,
        actual: usize,
    },

    #[error(
        "Customer title must be one of the following values: Mr., Ms., Mrs., Miss, Dr., Sir., Prof. (got {0:?})"
    )]
    InvalidTitle(String),

    #[error("Please set a valid email address (got {0:?})")]
    InvalidEmail(String),

    #[error("Please set a valid IP address (got {0:?})")]
    InvalidIp(String),

    #[error("Email validation is unavailable: {0}")]
    EmailPattern(String),

    #[error("Amount cannot be represented in minor units")]
    AmountOutOfRange,
}

impl ValidationError {
    /// The field this error refers to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidUrl { field, .. } | ValidationError::TooLong { field, .. } => {
                *field
            }
            ValidationError::InvalidTitle(_) => Field::CustomerTitle,
            ValidationError::InvalidEmail(_) | ValidationError::EmailPattern(_) => {
                Field::CustomerEmail
            }
            ValidationError::InvalidIp(_) => Field::CustomerIp,
            ValidationError::AmountOutOfRange => Field::TotalAmount,
        }
    }
}
