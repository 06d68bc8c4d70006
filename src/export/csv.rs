//! CSV Export functionality
//!
//! Exports the customer list to CSV format.

use crate::error::{AtlasError, AtlasResult};
use crate::services::dashboard::Customer;
use std::io::Write;

/// Export customers to CSV, one row per customer
pub fn export_customers_csv<W: Write>(customers: &[Customer], writer: &mut W) -> AtlasResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Company",
        "Subscription",
        "Start Date",
        "Contact",
        "Email",
        "Status",
    ])
    .map_err(|e| AtlasError::Export(e.to_string()))?;

    for customer in customers {
        csv.write_record([
            customer.id.to_string(),
            customer.company_name.to_string(),
            customer.subscription.to_string(),
            customer.start_date.to_string(),
            customer.contact_name.to_string(),
            customer.email.to_string(),
            customer.status.to_string(),
        ])
        .map_err(|e| AtlasError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| AtlasError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::{customers, search_customers};

    #[test]
    fn test_customers_csv() {
        let mut buffer = Vec::new();
        export_customers_csv(&customers(), &mut buffer).unwrap();
        let csv_str = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "ID,Company,Subscription,Start Date,Contact,Email,Status");
        assert_eq!(
            lines[1],
            "1,Acme Corp,Enterprise,2023-05-12,John Doe,john@acmecorp.com,Active"
        );
    }

    #[test]
    fn test_filtered_export() {
        let mut buffer = Vec::new();
        export_customers_csv(&search_customers("inactive-match-nothing"), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
