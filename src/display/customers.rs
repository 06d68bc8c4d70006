//! Customer table formatting

use tabled::{settings::Style, Table, Tabled};

use crate::services::dashboard::Customer;

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Company")]
    company: &'static str,
    #[tabled(rename = "Subscription")]
    subscription: &'static str,
    #[tabled(rename = "Start Date")]
    start_date: String,
    #[tabled(rename = "Contact")]
    contact: &'static str,
    #[tabled(rename = "Email")]
    email: &'static str,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            company: c.company_name,
            subscription: c.subscription,
            start_date: c.start_date.format("%Y-%m-%d").to_string(),
            contact: c.contact_name,
            email: c.email,
            status: c.status.to_string(),
        }
    }
}

/// Format customers as a table
pub fn format_customer_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let rows: Vec<CustomerRow> = customers.iter().map(CustomerRow::from).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::{customers, search_customers};

    #[test]
    fn test_customer_table() {
        let text = format_customer_table(&customers());
        assert!(text.contains("Company"));
        assert!(text.contains("Acme Corp"));
        assert!(text.contains("2024-02-28"));
        assert!(text.contains("Inactive"));
    }

    #[test]
    fn test_empty_search() {
        assert_eq!(
            format_customer_table(&search_customers("no such company")),
            "No customers found."
        );
    }
}
