//! Dashboard data
//!
//! Business metrics, activity and customers are static sample data. The
//! onboarding checklist and the dashboard mode are derived from the profile.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::UserProfile;

/// Headline business metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub mrr: u64,
    pub arr: u64,
    pub customers: u32,
    pub mrr_growth: f64,
    pub arr_growth: f64,
    pub customer_growth: f64,
}

pub const SAMPLE_METRICS: Metrics = Metrics {
    mrr: 12_450,
    arr: 149_400,
    customers: 127,
    mrr_growth: 12.5,
    arr_growth: 18.3,
    customer_growth: 8.2,
};

/// Which dashboard to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DashboardMode {
    /// Integration still in progress
    Development,
    /// SDK integrated and Stripe connected
    Production,
}

impl DashboardMode {
    /// Production once both integrations are done, development otherwise
    pub fn for_profile(profile: &UserProfile) -> Self {
        if profile.sdk_integrated && profile.stripe_connected {
            Self::Production
        } else {
            Self::Development
        }
    }
}

impl fmt::Display for DashboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "Development"),
            Self::Production => write!(f, "Production"),
        }
    }
}

/// One onboarding checklist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub name: &'static str,
    pub completed: bool,
}

/// Onboarding checklist derived from the profile
pub fn checklist(profile: &UserProfile) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem {
            name: "Sign Up",
            completed: profile.is_signed_up(),
        },
        ChecklistItem {
            name: "Create Pricing",
            completed: profile.pricing_model.is_some(),
        },
        ChecklistItem {
            name: "SDK Integration",
            completed: profile.sdk_integrated,
        },
        ChecklistItem {
            name: "Connect Stripe",
            completed: profile.stripe_connected,
        },
    ]
}

/// Whole-number percentage of checklist items done
pub fn checklist_progress(items: &[ChecklistItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let done = items.iter().filter(|i| i.completed).count();
    ((done * 100) as f64 / items.len() as f64).round() as u8
}

/// Suggested next actions for the development dashboard
pub fn next_steps(profile: &UserProfile) -> Vec<(&'static str, &'static str)> {
    let mut steps = Vec::new();
    if profile.pricing_model.is_none() {
        steps.push(("Create your pricing", "atlas pricing list"));
    }
    if !profile.sdk_integrated {
        steps.push(("Verify the SDK installation", "atlas integrations sdk-test"));
    }
    if !profile.stripe_connected {
        steps.push(("Connect Stripe", "atlas integrations stripe-connect <KEY>"));
    }
    steps.push(("Customize your pricing page", "atlas widgets snippet pricing-page"));
    steps.push(("Add more payment methods", "atlas integrations status"));
    steps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    NewCustomer,
    Upgrade,
    Downgrade,
    Cancel,
    Payment,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewCustomer => write!(f, "New customer"),
            Self::Upgrade => write!(f, "Upgrade"),
            Self::Downgrade => write!(f, "Downgrade"),
            Self::Cancel => write!(f, "Cancel"),
            Self::Payment => write!(f, "Payment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub customer: &'static str,
    pub description: &'static str,
    pub amount: Option<u32>,
    pub when: &'static str,
}

/// Recent account activity, newest first
pub fn recent_activity() -> Vec<Activity> {
    let item = |kind, customer, description, amount, when| Activity {
        kind,
        customer,
        description,
        amount,
        when,
    };

    vec![
        item(ActivityKind::Payment, "Sarah Johnson", "Monthly subscription payment", Some(29), "2 minutes ago"),
        item(ActivityKind::NewCustomer, "Michael Chen", "Signed up for Premium plan", Some(49), "1 hour ago"),
        item(ActivityKind::Upgrade, "Emma Davis", "Upgraded from Basic to Premium", Some(20), "3 hours ago"),
        item(ActivityKind::Payment, "Alex Rodriguez", "Annual subscription payment", Some(299), "5 hours ago"),
        item(ActivityKind::Downgrade, "Lisa Wang", "Downgraded from Premium to Basic", None, "1 day ago"),
        item(ActivityKind::Cancel, "John Smith", "Cancelled subscription", None, "2 days ago"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub company_name: &'static str,
    pub subscription: &'static str,
    pub start_date: NaiveDate,
    pub contact_name: &'static str,
    pub email: &'static str,
    pub status: CustomerStatus,
}

impl Customer {
    /// Case-insensitive match against company, contact and email
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || [self.company_name, self.contact_name, self.email]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Sample customer list
pub fn customers() -> Vec<Customer> {
    let rows = [
        ("Acme Corp", "Enterprise", (2023, 5, 12), "John Doe", "john@acmecorp.com", CustomerStatus::Active),
        ("Widgets Inc", "Premium", (2023, 8, 21), "Jane Smith", "jane@widgetsinc.com", CustomerStatus::Active),
        ("Tech Solutions", "Basic", (2024, 1, 5), "Robert Johnson", "robert@techsolutions.com", CustomerStatus::Active),
        ("Global Services", "Premium", (2023, 11, 15), "Emma Wilson", "emma@globalservices.com", CustomerStatus::Active),
        ("Innovative Labs", "Enterprise", (2024, 2, 28), "Michael Brown", "michael@innovativelabs.com", CustomerStatus::Active),
        ("Digital Creations", "Basic", (2023, 9, 10), "Sarah Garcia", "sarah@digitalcreations.com", CustomerStatus::Inactive),
    ];

    rows.into_iter()
        .zip(1u32..)
        .filter_map(|((company_name, subscription, (y, m, d), contact_name, email, status), id)| {
            Some(Customer {
                id,
                company_name,
                subscription,
                start_date: NaiveDate::from_ymd_opt(y, m, d)?,
                contact_name,
                email,
                status,
            })
        })
        .collect()
}

/// Customers matching a search term; an empty term matches everyone
pub fn search_customers(term: &str) -> Vec<Customer> {
    customers().into_iter().filter(|c| c.matches(term)).collect()
}
