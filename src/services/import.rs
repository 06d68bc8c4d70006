//! Pricing import flow
//!
//! The merchant points at existing pricing (a URL, a document, or pasted
//! text). The flow moves through input, processing and verification; the
//! extracted plans are canned and identical for every source.

use std::fmt;
use std::path::PathBuf;

use crate::models::{Feature, Plan, PlanType, PricingModel, PricingModelType};

/// Where existing pricing is imported from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Url(String),
    Document(PathBuf),
    Text(String),
}

impl ImportSource {
    /// Reject blank input with the message shown to the merchant
    pub fn validate(&self) -> Result<(), String> {
        let blank = match self {
            Self::Url(url) => url.trim().is_empty(),
            Self::Document(path) => path.as_os_str().is_empty(),
            Self::Text(text) => text.trim().is_empty(),
        };

        if blank {
            Err(match self {
                Self::Url(_) => "Please enter your pricing page URL".into(),
                Self::Document(_) => "Please choose a document to upload".into(),
                Self::Text(_) => "Please paste your pricing details".into(),
            })
        } else {
            Ok(())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Document(_) => "document",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url.trim()),
            Self::Document(path) => write!(f, "{}", path.display()),
            Self::Text(text) => write!(f, "{} characters of text", text.trim().chars().count()),
        }
    }
}

/// Stage of the import flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Input,
    Processing,
    Verification,
}

/// State of one import attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFlow {
    stage: ImportStage,
    source: Option<ImportSource>,
    extracted: Vec<Plan>,
    error: Option<String>,
}

impl Default for ImportFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFlow {
    pub fn new() -> Self {
        Self {
            stage: ImportStage::Input,
            source: None,
            extracted: Vec::new(),
            error: None,
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn source(&self) -> Option<&ImportSource> {
        self.source.as_ref()
    }

    pub fn extracted(&self) -> &[Plan] {
        &self.extracted
    }

    /// Last error, cleared by the next submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a source from the input stage; blank input stays on input with
    /// an error
    pub fn submit(&mut self, source: ImportSource) -> bool {
        if self.stage != ImportStage::Input {
            return false;
        }

        match source.validate() {
            Ok(()) => {
                self.error = None;
                self.source = Some(source);
                self.stage = ImportStage::Processing;
                true
            }
            Err(reason) => {
                self.error = Some(reason);
                false
            }
        }
    }

    /// Finish processing with extracted plans
    pub fn complete(&mut self, plans: Vec<Plan>) -> bool {
        if self.stage != ImportStage::Processing {
            return false;
        }
        self.extracted = plans;
        self.stage = ImportStage::Verification;
        true
    }

    /// Processing failed or was abandoned; return to input
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.stage = ImportStage::Input;
        self.error = Some(reason.into());
    }

    /// Step back from verification to input, discarding extracted plans
    pub fn back(&mut self) -> bool {
        if self.stage == ImportStage::Input {
            return false;
        }
        self.stage = ImportStage::Input;
        self.extracted.clear();
        true
    }

    /// The pricing model to store once the merchant confirms the extraction
    pub fn confirm(&self) -> Option<PricingModel> {
        (self.stage == ImportStage::Verification).then(|| {
            PricingModel::new(PricingModelType::Imported, self.extracted.clone())
        })
    }
}

/// Plans "found" by every extraction
pub fn mock_extracted_plans() -> Vec<Plan> {
    let mut starter = Plan::paid("Starter", "29").with_features(vec![
        Feature::limit("Users", "3"),
        Feature::limit("Projects", "5"),
        Feature::boolean("Email Support"),
    ]);
    starter.default_on_cancel = true;

    let professional = Plan::paid("Professional", "79")
        .with_features(vec![
            Feature::limit("Users", "10"),
            Feature::limit("Projects", "Unlimited"),
            Feature::boolean("Email Support"),
            Feature::boolean("API Access"),
        ])
        .with_trial(14);

    let enterprise = Plan::new("Enterprise", PlanType::Custom).with_features(vec![
        Feature::limit("Users", "Unlimited"),
        Feature::limit("Projects", "Unlimited"),
        Feature::boolean("Email Support"),
        Feature::boolean("API Access"),
        Feature::boolean("Dedicated Support"),
    ]);

    vec![starter, professional, enterprise]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_source_stays_on_input() {
        let mut flow = ImportFlow::new();
        assert!(!flow.submit(ImportSource::Text("   ".into())));
        assert_eq!(flow.stage(), ImportStage::Input);
        assert_eq!(flow.error(), Some("Please paste your pricing details"));
    }

    #[test]
    fn test_happy_path() {
        let mut flow = ImportFlow::new();
        assert!(flow.submit(ImportSource::Url("https://acme.test/pricing".into())));
        assert_eq!(flow.stage(), ImportStage::Processing);
        assert!(flow.error().is_none());
        assert!(flow.confirm().is_none());

        assert!(flow.complete(mock_extracted_plans()));
        assert_eq!(flow.stage(), ImportStage::Verification);

        let model = flow.confirm().unwrap();
        assert_eq!(model.model_type, PricingModelType::Imported);
        assert_eq!(model.plans.len(), 3);
    }

    #[test]
    fn test_failure_returns_to_input() {
        let mut flow = ImportFlow::new();
        flow.submit(ImportSource::Document(PathBuf::from("pricing.pdf")));
        flow.fail("Import cancelled");

        assert_eq!(flow.stage(), ImportStage::Input);
        assert_eq!(flow.error(), Some("Import cancelled"));
        assert!(!flow.complete(Vec::new()));
    }

    #[test]
    fn test_back_discards_extraction() {
        let mut flow = ImportFlow::new();
        flow.submit(ImportSource::Text("Pro $10/mo".into()));
        flow.complete(mock_extracted_plans());

        assert!(flow.back());
        assert!(flow.extracted().is_empty());
        assert!(!flow.back());
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ImportSource::Text(" abc ".into()).to_string(), "3 characters of text");
        assert_eq!(ImportSource::Url("https://x.io".into()).kind(), "url");
    }
}
