//! Fluent, validating accumulator for access code requests.
//!
//! Every setter validates its input before touching the builder, so a
//! rejected value leaves previously stored fields exactly as they were.
//! No cross-field completeness checks are made when building; the gateway
//! rejects missing required fields itself.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use url::Url;

use crate::domain::{Amount, CustomerTitle, RequestMethod};
use crate::dto::{AccessCodeRequest, Customer, OptionValue, Payment, TransactionType};
use crate::error::{Field, ValidationError};

const HEADER_TEXT_MAX: usize = 255;
const OPTION_MAX: usize = 255;
const NAME_MAX: usize = 50;
const INVOICE_NUMBER_MAX: usize = 16;
const INVOICE_DESCRIPTION_MAX: usize = 64;
const INVOICE_REFERENCE_MAX: usize = 50;

const EMAIL_MAX: usize = 319;

static EMAIL_REGEX: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^(?i)[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
});

fn check_len(field: Field, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// `scheme://` must be followed directly by the host.
fn has_authority(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };
    let scheme_ok = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    scheme_ok && rest.chars().next().is_some_and(|c| !matches!(c, '/' | '?' | '#'))
}

fn check_url(field: Field, value: &str) -> Result<(), ValidationError> {
    // The url crate silently repairs these, but the raw string is what gets sent.
    let raw_ok = !value.chars().any(|c| c.is_whitespace() || c.is_control() || c == '\\')
        && has_authority(value);
    let has_host = raw_ok
        && Url::parse(value)
            .ok()
            .and_then(|url| url.host_str().map(|host| !host.is_empty()))
            .unwrap_or(false);
    if !has_host {
        return Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    let regex = EMAIL_REGEX
        .as_ref()
        .map_err(|e| ValidationError::EmailPattern(e.to_string()))?;
    check_len(Field::CustomerEmail, value, EMAIL_MAX)?;
    if !regex.is_match(value) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

/// Collects customer, payment and display fields for one shared page request.
///
/// Not meant to be shared between threads while being configured; build
/// one per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBuilder {
    partner_id: Option<String>,
    method: RequestMethod,

    redirect_url: Option<String>,
    cancel_url: Option<String>,
    logo_url: Option<String>,
    header_text: Option<String>,
    custom_view: Option<String>,

    customer_ip: Option<String>,
    customer_title: Option<CustomerTitle>,
    customer_first_name: Option<String>,
    customer_last_name: Option<String>,
    customer_email: Option<String>,

    payment_total_amount: Amount,
    payment_invoice_number: Option<String>,
    payment_invoice_description: Option<String>,
    payment_invoice_reference: Option<String>,

    option1: Option<String>,
    option2: Option<String>,
    option3: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Flow
    // ─────────────────────────────────────────────────────────────────────

    /// Sets the gateway partner ID.
    pub fn partner_id(&mut self, partner_id: impl Into<String>) -> &mut Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    /// Chooses between the shared page and the direct `ProcessPayment` flow.
    pub fn method(&mut self, method: RequestMethod) -> &mut Self {
        self.method = method;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────

    /// The address the customer is sent back to with the result.
    pub fn redirect_url(&mut self, url: &str) -> Result<&mut Self, ValidationError> {
        check_url(Field::RedirectUrl, url)?;
        self.redirect_url = Some(url.to_string());
        Ok(self)
    }

    /// The address the shared page sends the customer to on cancel.
    pub fn cancel_url(&mut self, url: &str) -> Result<&mut Self, ValidationError> {
        check_url(Field::CancelUrl, url)?;
        self.cancel_url = Some(url.to_string());
        Ok(self)
    }

    /// The merchant logo shown on the shared page.
    pub fn logo_url(&mut self, url: &str) -> Result<&mut Self, ValidationError> {
        check_url(Field::LogoUrl, url)?;
        self.logo_url = Some(url.to_string());
        Ok(self)
    }

    /// Short text shown under the logo.
    pub fn header_text(&mut self, text: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::HeaderText, text, HEADER_TEXT_MAX)?;
        self.header_text = Some(text.to_string());
        Ok(self)
    }

    /// Theme of the responsive shared page. Passed through as-is.
    pub fn custom_view(&mut self, view: impl Into<String>) -> &mut Self {
        self.custom_view = Some(view.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Customer
    // ─────────────────────────────────────────────────────────────────────

    /// The customer's IPv4 or IPv6 address.
    pub fn customer_ip(&mut self, ip: &str) -> Result<&mut Self, ValidationError> {
        ip.parse::<IpAddr>()
            .map_err(|_| ValidationError::InvalidIp(ip.to_string()))?;
        self.customer_ip = Some(ip.to_string());
        Ok(self)
    }

    /// One of `Mr.`, `Ms.`, `Mrs.`, `Miss`, `Dr.`, `Sir.`, `Prof.` or empty.
    pub fn customer_title(&mut self, title: &str) -> Result<&mut Self, ValidationError> {
        self.customer_title = Some(title.parse()?);
        Ok(self)
    }

    pub fn customer_first_name(&mut self, name: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::CustomerFirstName, name, NAME_MAX)?;
        self.customer_first_name = Some(name.to_string());
        Ok(self)
    }

    pub fn customer_last_name(&mut self, name: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::CustomerLastName, name, NAME_MAX)?;
        self.customer_last_name = Some(name.to_string());
        Ok(self)
    }

    pub fn customer_email(&mut self, email: &str) -> Result<&mut Self, ValidationError> {
        check_email(email)?;
        self.customer_email = Some(email.to_string());
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Payment
    // ─────────────────────────────────────────────────────────────────────

    /// Total in major units; stored as `round(amount * 100)` minor units.
    pub fn payment_total_amount(&mut self, amount: Decimal) -> Result<&mut Self, ValidationError> {
        self.payment_total_amount = Amount::from_major(amount)?;
        Ok(self)
    }

    /// The merchant's invoice number for this transaction.
    pub fn payment_invoice_number(&mut self, number: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::InvoiceNumber, number, INVOICE_NUMBER_MAX)?;
        self.payment_invoice_number = Some(number.to_string());
        Ok(self)
    }

    /// What the customer is buying.
    pub fn payment_invoice_description(
        &mut self,
        description: &str,
    ) -> Result<&mut Self, ValidationError> {
        check_len(Field::InvoiceDescription, description, INVOICE_DESCRIPTION_MAX)?;
        self.payment_invoice_description = Some(description.to_string());
        Ok(self)
    }

    pub fn payment_invoice_reference(
        &mut self,
        reference: &str,
    ) -> Result<&mut Self, ValidationError> {
        check_len(Field::InvoiceReference, reference, INVOICE_REFERENCE_MAX)?;
        self.payment_invoice_reference = Some(reference.to_string());
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Options
    // ─────────────────────────────────────────────────────────────────────

    pub fn option1(&mut self, value: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::Option1, value, OPTION_MAX)?;
        self.option1 = Some(value.to_string());
        Ok(self)
    }

    pub fn option2(&mut self, value: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::Option2, value, OPTION_MAX)?;
        self.option2 = Some(value.to_string());
        Ok(self)
    }

    pub fn option3(&mut self, value: &str) -> Result<&mut Self, ValidationError> {
        check_len(Field::Option3, value, OPTION_MAX)?;
        self.option3 = Some(value.to_string());
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn total_amount(&self) -> Amount {
        self.payment_total_amount
    }

    pub fn request_method(&self) -> RequestMethod {
        self.method
    }

    /// Assembles the request payload from the stored fields.
    pub fn build_access_code_request(&self) -> AccessCodeRequest {
        let options = [&self.option1, &self.option2, &self.option3]
            .into_iter()
            .map(|value| OptionValue::new(value.clone().unwrap_or_default()))
            .collect();

        AccessCodeRequest {
            customer: Customer {
                title: self.customer_title,
                first_name: self.customer_first_name.clone(),
                last_name: self.customer_last_name.clone(),
                email: self.customer_email.clone(),
            },
            options,
            payment: Payment {
                total_amount: self.payment_total_amount,
                invoice_number: self.payment_invoice_number.clone(),
                invoice_description: self.payment_invoice_description.clone(),
                invoice_reference: self.payment_invoice_reference.clone(),
            },
            redirect_url: self.redirect_url.clone(),
            cancel_url: self.cancel_url.clone(),
            logo_url: self.logo_url.clone(),
            header_text: self.header_text.clone(),
            custom_view: self.custom_view.clone(),
            customer_ip: self.customer_ip.clone(),
            partner_id: self.partner_id.clone(),
            method: self.method,
            transaction_type: TransactionType::Purchase,
            customer_read_only: true,
            verify_customer_phone: false,
            verify_customer_email: false,
        }
    }
}
