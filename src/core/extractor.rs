use crate::domain::model::{InvalidAddressPolicy, Row, MIN_FIELDS};
use crate::domain::ports::InvalidAddressSink;
use crate::utils::error::{ImportError, InvalidAddress, Result};

/// Returns everything after the first `@` of `email`.
///
/// No trimming or case folding is done, so the domain may be empty or end in
/// punctuation.
pub fn domain_from_email(email: &str) -> std::result::Result<&str, InvalidAddress> {
    email
        .split_once('@')
        .map(|(_, domain)| domain)
        .ok_or_else(|| InvalidAddress {
            email: email.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDomains {
    pub domains: Vec<String>,
    pub invalid_addresses: usize,
}

/// Extracts one domain per customer row, keeping repetitions.
///
/// A row shorter than [`MIN_FIELDS`] (or too short to hold the email column)
/// aborts the whole batch.
pub fn domains_from_customers(
    rows: &[Row],
    email_index: usize,
    policy: InvalidAddressPolicy,
    sink: &dyn InvalidAddressSink,
) -> Result<ExtractedDomains> {
    let expected = MIN_FIELDS.max(email_index.saturating_add(1));
    let mut extracted = ExtractedDomains {
        domains: Vec::with_capacity(rows.len()),
        invalid_addresses: 0,
    };

    for row in rows {
        let email = match row.field(email_index) {
            Some(email) if row.len() >= expected => email,
            _ => {
                return Err(ImportError::ShortRow {
                    line: row.line,
                    found: row.len(),
                    expected,
                })
            }
        };

        match domain_from_email(email) {
            Ok(domain) => extracted.domains.push(domain.to_string()),
            Err(err) => {
                sink.invalid_address(row.line, &err);
                extracted.invalid_addresses += 1;
                if policy == InvalidAddressPolicy::Keep {
                    extracted.domains.push(String::new());
                }
            }
        }
    }

    Ok(extracted)
}

/// Reports invalid addresses as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl InvalidAddressSink for TracingSink {
    fn invalid_address(&self, line: u64, error: &InvalidAddress) {
        tracing::warn!(line, email = %error.email, "⚠️ Invalid email address, no '@' found");
    }
}
