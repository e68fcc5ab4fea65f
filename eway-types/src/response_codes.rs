//! Gateway response code lookup.
//!
//! Codes are five characters: a family letter followed by four digits.
//! The table covers fraud (`F`), system (`V5`), approval (`A`),
//! validation (`V6`) and bank decline (`D44`) codes.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

const RESPONSE_CODES: &[(&str, &str)] = &[
    ("F7000", "Undefined Fraud"),
    ("V5000", "Undefined System"),
    ("A0000", "Undefined Approved"),
    ("A2000", "Transaction Approved"),
    ("A2008", "Honour With Identification"),
    ("A2010", "Approved For Partial Amount"),
    ("A2011", "Approved VIP"),
    ("A2016", "Approved Update Track 3"),
    ("V6000", "Undefined Validation"),
    ("V6001", "Invalid Request CustomerIP"),
    ("V6002", "Invalid Request DeviceID"),
    ("V6011", "Invalid Payment Amount"),
    ("V6012", "Invalid Payment InvoiceDescription"),
    ("V6013", "Invalid Payment InvoiceNumber"),
    ("V6014", "Invalid Payment InvoiceReference"),
    ("V6015", "Invalid Payment CurrencyCode"),
    ("V6016", "Payment Required"),
    ("V6017", "Payment CurrencyCode Required"),
    ("V6018", "Unknown Payment CurrencyCode"),
    ("V6021", "Cardholder Name Required"),
    ("V6022", "Card Number Required"),
    ("V6023", "CVN Required"),
    ("V6031", "Invalid Card Number"),
    ("V6032", "Invalid CVN"),
    ("V6033", "Invalid Expiry Date"),
    ("V6034", "Invalid Issue Number"),
    ("V6035", "Invalid Start Date"),
    ("V6036", "Invalid Month"),
    ("V6037", "Invalid Year"),
    ("V6040", "Invalid Token Customer Id"),
    ("V6041", "Customer Required"),
    ("V6042", "Customer First Name Required"),
    ("V6043", "Customer Last Name Required"),
    ("V6044", "Customer Country Code Required"),
    ("V6045", "Customer Title Required"),
    ("V6046", "Token Customer ID Required"),
    ("V6047", "RedirectURL Required"),
    ("V6051", "Invalid Customer First Name"),
    ("V6052", "Invalid Customer Last Name"),
    ("V6053", "Invalid Customer Country Code"),
    ("V6054", "Invalid Customer Email"),
    ("V6055", "Invalid Customer Phone"),
    ("V6056", "Invalid Customer Mobile"),
    ("V6057", "Invalid Customer Fax"),
    ("V6058", "Invalid Customer Title"),
    ("V6059", "Redirect URL Invalid"),
    ("V6060", "Redirect URL Invalid"),
    ("V6061", "Invalid Customer Reference"),
    ("V6062", "Invalid Customer CompanyName"),
    ("V6063", "Invalid Customer JobDescription"),
    ("V6064", "Invalid Customer Street1"),
    ("V6065", "Invalid Customer Street2"),
    ("V6066", "Invalid Customer City"),
    ("V6067", "Invalid Customer State"),
    ("V6068", "Invalid Customer Postalcode"),
    ("V6069", "Invalid Customer Email"),
    ("V6070", "Invalid Customer Phone"),
    ("V6071", "Invalid Customer Mobile"),
    ("V6072", "Invalid Customer Comments"),
    ("V6073", "Invalid Customer Fax"),
    ("V6074", "Invalid Customer Url"),
    ("V6075", "Invalid ShippingAddress FirstName"),
    ("V6076", "Invalid ShippingAddress LastName"),
    ("V6077", "Invalid ShippingAddress Street1"),
    ("V6078", "Invalid ShippingAddress Street2"),
    ("V6079", "Invalid ShippingAddress City"),
    ("V6080", "Invalid ShippingAddress State"),
    ("V6081", "Invalid ShippingAddress PostalCode"),
    ("V6082", "Invalid ShippingAddress Email"),
    ("V6083", "Invalid ShippingAddress Phone"),
    ("V6084", "Invalid ShippingAddress Country"),
    ("V6091", "Unknown Country Code"),
    ("V6100", "Invalid ProcessRequest name"),
    ("V6101", "Invalid ProcessRequest ExpiryMonth"),
    ("V6102", "Invalid ProcessRequest ExpiryYear"),
    ("V6103", "Invalid ProcessRequest StartMonth"),
    ("V6104", "Invalid ProcessRequest StartYear"),
    ("V6105", "Invalid ProcessRequest IssueNumber"),
    ("V6106", "Invalid ProcessRequest CVN"),
    ("V6107", "Invalid ProcessRequest AccessCode"),
    ("V6108", "Invalid ProcessRequest CustomerHostAddress"),
    ("V6109", "Invalid ProcessRequest UserAgent"),
    ("V6110", "Invalid ProcessRequest Number"),
    ("D4401", "Refer to Issuer"),
    ("D4402", "Refer to Issuer, special"),
    ("D4403", "No Merchant"),
    ("D4404", "Pick Up Card"),
    ("D4405", "Do Not Honour"),
    ("D4406", "Error"),
    ("D4407", "Pick Up Card, Special"),
    ("D4409", "Request In Progress"),
    ("D4412", "Invalid Transaction"),
    ("D4413", "Invalid Amount"),
    ("D4414", "Invalid Card Number"),
    ("D4415", "No Issuer"),
    ("D4419", "Re-enter Last Transaction"),
    ("D4421", "No Method Taken"),
    ("D4422", "Suspected Malfunction"),
    ("D4423", "Unacceptable Transaction Fee"),
    ("D4425", "Unable to Locate Record On File"),
    ("D4430", "Format Error"),
    ("D4431", "Bank Not Supported By Switch"),
    ("D4433", "Expired Card, Capture"),
    ("D4434", "Suspected Fraud, Retain Card"),
    ("D4435", "Card Acceptor, Contact Acquirer, Retain Card"),
    ("D4436", "Restricted Card, Retain Card"),
    ("D4437", "Contact Acquirer Security Department, Retain Card"),
    ("D4438", "PIN Tries Exceeded, Capture"),
    ("D4439", "No Credit Account"),
    ("D4440", "Function Not Supported"),
    ("D4441", "Lost Card"),
    ("D4442", "No Universal Account"),
    ("D4443", "Stolen Card"),
    ("D4444", "No Investment Account"),
    ("D4451", "Insufficient Funds"),
    ("D4452", "No Cheque Account"),
    ("D4453", "No Savings Account"),
    ("D4454", "Expired Card"),
    ("D4455", "Incorrect PIN"),
    ("D4456", "No Card Record"),
    ("D4457", "Function Not Permitted to Cardholder"),
    ("D4458", "Function Not Permitted to Terminal"),
    ("D4460", "Acceptor Contact Acquirer"),
    ("D4461", "Exceeds Withdrawal Limit"),
    ("D4462", "Restricted Card"),
    ("D4463", "Security Violation"),
    ("D4464", "Original Amount Incorrect"),
    ("D4466", "Acceptor Contact Acquirer, Security"),
    ("D4467", "Capture Card"),
    ("D4475", "PIN Tries Exceeded"),
    ("D4482", "CVV Validation Error"),
    ("D4490", "Cutoff In Progress"),
    ("D4491", "Card Issuer Unavailable"),
    ("D4492", "Unable To Route Transaction"),
    ("D4493", "Cannot Complete, Violation Of The Law"),
    ("D4494", "Duplicate Transaction"),
    ("D4496", "System Error"),
];

static GLOBAL_TABLE: LazyLock<ResponseCodeTable> =
    LazyLock::new(|| ResponseCodeTable::from_entries(RESPONSE_CODES));

/// Broad category of a response code, derived from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFamily {
    Fraud,
    System,
    Approved,
    Validation,
    Declined,
    Other,
}

impl ResponseFamily {
    pub fn of(code: &str) -> Self {
        if code.starts_with('F') {
            ResponseFamily::Fraud
        } else if code.starts_with("V5") {
            ResponseFamily::System
        } else if code.starts_with('A') {
            ResponseFamily::Approved
        } else if code.starts_with("V6") {
            ResponseFamily::Validation
        } else if code.starts_with('D') {
            ResponseFamily::Declined
        } else {
            ResponseFamily::Other
        }
    }
}

/// A response code resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCode {
    Known {
        code: String,
        description: &'static str,
    },
    Unknown {
        code: String,
    },
}

impl ResolvedCode {
    pub fn code(&self) -> &str {
        match self {
            ResolvedCode::Known { code, .. } | ResolvedCode::Unknown { code } => code,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ResolvedCode::Known { .. })
    }

    pub fn family(&self) -> ResponseFamily {
        ResponseFamily::of(self.code())
    }
}

impl fmt::Display for ResolvedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedCode::Known { description, .. } => f.write_str(description),
            ResolvedCode::Unknown { code } => write!(f, "Unknown response code {code}"),
        }
    }
}

/// Read-only mapping from response code to description.
#[derive(Debug)]
pub struct ResponseCodeTable {
    entries: HashMap<&'static str, &'static str>,
}

impl ResponseCodeTable {
    /// The process-wide table, built on first use.
    pub fn global() -> &'static ResponseCodeTable {
        &GLOBAL_TABLE
    }

    fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, code: &str) -> Option<&'static str> {
        self.entries.get(code).copied()
    }

    pub fn resolve(&self, code: &str) -> ResolvedCode {
        match self.lookup(code) {
            Some(description) => ResolvedCode::Known {
                code: code.to_string(),
                description,
            },
            None => ResolvedCode::Unknown {
                code: code.to_string(),
            },
        }
    }

    /// Resolves a comma separated list such as `"V6021, V6022"`.
    pub fn resolve_list(&self, codes: &str) -> Vec<ResolvedCode> {
        codes
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| self.resolve(code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_populated() {
        let table = ResponseCodeTable::global();
        assert_eq!(table.len(), RESPONSE_CODES.len());
        assert!(table.len() > 130);
    }

    #[test]
    fn test_lookup_known_codes() {
        let table = ResponseCodeTable::global();
        assert_eq!(table.lookup("A2000"), Some("Transaction Approved"));
        assert_eq!(table.lookup("V6022"), Some("Card Number Required"));
        assert_eq!(table.lookup("D4401"), Some("Refer to Issuer"));
        assert_eq!(table.lookup("F7000"), Some("Undefined Fraud"));
        assert_eq!(table.lookup("Z9999"), None);
    }

    #[test]
    fn test_unknown_code_display() {
        let resolved = ResponseCodeTable::global().resolve("Z9999");
        assert!(!resolved.is_known());
        assert_eq!(resolved.to_string(), "Unknown response code Z9999");
    }

    #[test]
    fn test_resolve_list() {
        let resolved = ResponseCodeTable::global().resolve_list("V6021, V6022,,Z0001");
        let codes: Vec<&str> = resolved.iter().map(ResolvedCode::code).collect();
        assert_eq!(codes, vec!["V6021", "V6022", "Z0001"]);
        assert_eq!(resolved[0].to_string(), "Cardholder Name Required");
        assert!(!resolved[2].is_known());
    }

    #[test]
    fn test_families() {
        assert_eq!(ResponseFamily::of("F7000"), ResponseFamily::Fraud);
        assert_eq!(ResponseFamily::of("V5000"), ResponseFamily::System);
        assert_eq!(ResponseFamily::of("A2008"), ResponseFamily::Approved);
        assert_eq!(ResponseFamily::of("V6011"), ResponseFamily::Validation);
        assert_eq!(ResponseFamily::of("D4405"), ResponseFamily::Declined);
        assert_eq!(ResponseFamily::of("Z9999"), ResponseFamily::Other);
    }
}
