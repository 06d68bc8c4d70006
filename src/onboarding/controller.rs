//! Wizard step controller
//!
//! Pure state for the onboarding wizard: which step is current, which goal
//! was picked and the profile being built. Nothing here touches storage or
//! the terminal; the runner in [`super::wizard`] persists after each change.

use std::fmt;

use crate::models::{Goal, ProfilePatch, UserProfile};

/// Titles of the wizard steps, in order
pub const STEPS: [&str; 6] = [
    "Choose Goal",
    "Configure Pricing",
    "SDK Integration",
    "Pricing Page",
    "Connect Stripe",
    "Complete",
];

/// Index of the step that branches on the selected goal
pub const BRANCH_STEP: usize = 1;

/// Index of the terminal step
pub const LAST_STEP: usize = STEPS.len() - 1;

/// Research tools that are announced but not built yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchTool {
    CompetitorTracking,
    WtpInterview,
    VanWestendorp,
    MonetizationAudit,
}

impl ResearchTool {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CompetitorTracking => "Competitor Tracking Dashboard",
            Self::WtpInterview => "WTP Interview Script Generator",
            Self::VanWestendorp => "Van Westendorp Price Sensitivity Tool",
            Self::MonetizationAudit => "Basic AI Monetization Audit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CompetitorTracking => {
                "Monitor and analyze your competitors with our comprehensive tracking \
                 dashboard. Get insights into pricing strategies, feature sets, and market \
                 positioning to stay ahead of the competition."
            }
            Self::WtpInterview => {
                "Generate professional, AI-powered interview scripts to uncover customer \
                 willingness-to-pay. Using advanced agentic prompts to create natural, \
                 effective conversations that reveal true price sensitivity."
            }
            Self::VanWestendorp => {
                "Apply the renowned Van Westendorp Price Sensitivity Meter to determine \
                 optimal pricing ranges. Simple form-based calculator with comprehensive AI \
                 analysis for data-driven pricing decisions."
            }
            Self::MonetizationAudit => {
                "Upload your product documentation for comprehensive AI-powered monetization \
                 analysis. RAG-based insights help identify usage patterns, sentiment trends, \
                 and revenue optimization opportunities."
            }
        }
    }

    /// The planned features listed on the coming-soon page
    pub fn features(&self) -> [&'static str; 6] {
        match self {
            Self::CompetitorTracking => [
                "Real-time competitor pricing monitoring and alerts",
                "Feature comparison matrix with visual dashboards",
                "Market positioning analysis and gap identification",
                "Automated competitor intelligence reports",
                "Integration with major competitor data sources",
                "Custom alerts for pricing and feature changes",
            ],
            Self::WtpInterview => [
                "AI-generated interview scripts tailored to your product",
                "Advanced agentic prompts for natural conversation flow",
                "Price sensitivity discovery and objection handling",
                "Customizable script templates for different customer segments",
                "Real-time script optimization based on responses",
                "Integration with survey tools and CRM systems",
            ],
            Self::VanWestendorp => [
                "Complete Van Westendorp PSM implementation",
                "Interactive price sensitivity questionnaires",
                "Automated optimal price range calculation",
                "AI-powered analysis and recommendations",
                "Visual price acceptance curves and graphs",
                "Exportable reports for stakeholder presentations",
            ],
            Self::MonetizationAudit => [
                "Document upload and automatic processing",
                "RAG-based analysis of product documentation",
                "Usage pattern identification and insights",
                "Sentiment analysis across customer feedback",
                "Monetization opportunity recommendations",
                "Competitive analysis and market positioning",
            ],
        }
    }
}

/// Sub-view the pricing configuration step opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingView {
    /// Pick between recommend, manual and import
    Choice,
    Import,
    AiRecommendation,
    Recommend,
    Manual,
}

impl fmt::Display for PricingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice => write!(f, "choice"),
            Self::Import => write!(f, "import"),
            Self::AiRecommendation => write!(f, "ai-recommendation"),
            Self::Recommend => write!(f, "recommend"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// The screen to show for a wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChooseGoal,
    ComingSoon(ResearchTool),
    PricingConfiguration(PricingView),
    /// Branching step reached without a usable goal
    Loading,
    SdkIntegration,
    PricingPage,
    ConnectStripe,
    Complete,
}

/// Map a step index and the selected goal to the screen to show
///
/// Returns `None` for an index past the last step.
pub fn resolve_step(index: usize, goal: Option<&Goal>) -> Option<WizardStep> {
    let step = match index {
        0 => WizardStep::ChooseGoal,
        BRANCH_STEP => match goal {
            Some(Goal::CompetitorTracking) => WizardStep::ComingSoon(ResearchTool::CompetitorTracking),
            Some(Goal::WtpInterview) => WizardStep::ComingSoon(ResearchTool::WtpInterview),
            Some(Goal::PriceSensitivity) => WizardStep::ComingSoon(ResearchTool::VanWestendorp),
            Some(Goal::MonetizationAudit) => WizardStep::ComingSoon(ResearchTool::MonetizationAudit),
            Some(Goal::ImportPricing) => WizardStep::PricingConfiguration(PricingView::Import),
            Some(Goal::AiRecommendations) => {
                WizardStep::PricingConfiguration(PricingView::AiRecommendation)
            }
            Some(Goal::RecommendPricing) => WizardStep::PricingConfiguration(PricingView::Recommend),
            Some(Goal::ManualPricing) => WizardStep::PricingConfiguration(PricingView::Manual),
            Some(Goal::Unknown(_)) | None => WizardStep::Loading,
        },
        2 => WizardStep::SdkIntegration,
        3 => WizardStep::PricingPage,
        4 => WizardStep::ConnectStripe,
        LAST_STEP => WizardStep::Complete,
        _ => return None,
    };
    Some(step)
}

/// Where the wizard is, as shown above every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based step number
    pub number: usize,
    pub total: usize,
    pub title: &'static str,
    pub percent: u8,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {}: {} ({}%)",
            self.number, self.total, self.title, self.percent
        )
    }
}

/// Onboarding wizard state
#[derive(Debug, Clone, PartialEq)]
pub struct WizardController {
    current_step: usize,
    selected_goal: Option<Goal>,
    user_data: UserProfile,
}

impl WizardController {
    /// Start at the first step with the loaded profile
    pub fn new(user_data: UserProfile) -> Self {
        Self {
            current_step: 0,
            selected_goal: None,
            user_data,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        self.selected_goal.as_ref()
    }

    pub fn user_data(&self) -> &UserProfile {
        &self.user_data
    }

    /// Move forward, recording `goal` first when given
    ///
    /// Returns whether the step index changed; the goal is recorded even on
    /// the last step.
    pub fn advance(&mut self, goal: Option<Goal>) -> bool {
        if let Some(goal) = goal {
            self.user_data = self.user_data.merged(&ProfilePatch::goal(goal.clone()));
            self.selected_goal = Some(goal);
        }

        if self.current_step < LAST_STEP {
            self.current_step += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step; no-op on the first
    pub fn retreat(&mut self) -> bool {
        if self.current_step > 0 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    /// Shallow-merge a patch into the profile, reporting whether it changed
    pub fn update_user_data(&mut self, patch: &ProfilePatch) -> bool {
        let next = self.user_data.merged(patch);
        if next == self.user_data {
            return false;
        }
        self.user_data = next;
        true
    }

    /// The screen for the current position
    pub fn resolve(&self) -> WizardStep {
        resolve_step(self.current_step, self.selected_goal.as_ref()).unwrap_or(WizardStep::Complete)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            number: self.current_step + 1,
            total: STEPS.len(),
            title: STEPS[self.current_step],
            percent: ((self.current_step as f64 / LAST_STEP as f64) * 100.0).round() as u8,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step == LAST_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> WizardController {
        WizardController::new(UserProfile::sign_up("ada@example.com", "hunter22!"))
    }

    #[test]
    fn test_starts_at_goal_choice() {
        let wizard = controller();
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.selected_goal().is_none());
        assert_eq!(wizard.resolve(), WizardStep::ChooseGoal);
        assert_eq!(wizard.progress().to_string(), "Step 1 of 6: Choose Goal (0%)");
    }

    #[test]
    fn test_advance_with_goal_mirrors_into_profile() {
        let mut wizard = controller();
        assert!(wizard.advance(Some(Goal::ImportPricing)));

        assert_eq!(wizard.selected_goal(), Some(&Goal::ImportPricing));
        assert_eq!(wizard.user_data().selected_goal, Some(Goal::ImportPricing));
        assert_eq!(wizard.user_data().selected_goals, vec![Goal::ImportPricing]);
        assert_eq!(
            wizard.resolve(),
            WizardStep::PricingConfiguration(PricingView::Import)
        );
    }

    #[test]
    fn test_step_index_stays_in_bounds() {
        let mut wizard = controller();
        // Deterministic pseudo-random walk of advances and retreats
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                wizard.retreat();
            } else {
                wizard.advance(None);
            }
            assert!(wizard.current_step() <= LAST_STEP);
        }
    }

    #[test]
    fn test_no_transition_past_either_end() {
        let mut wizard = controller();
        assert!(!wizard.retreat());
        assert_eq!(wizard.current_step(), 0);

        for _ in 0..LAST_STEP {
            assert!(wizard.advance(None));
        }
        assert!(wizard.is_terminal());
        assert!(!wizard.advance(None));
        assert_eq!(wizard.resolve(), WizardStep::Complete);
        assert_eq!(wizard.progress().percent, 100);
    }

    #[test]
    fn test_resolve_table() {
        let cases = [
            (Goal::CompetitorTracking, WizardStep::ComingSoon(ResearchTool::CompetitorTracking)),
            (Goal::WtpInterview, WizardStep::ComingSoon(ResearchTool::WtpInterview)),
            (Goal::PriceSensitivity, WizardStep::ComingSoon(ResearchTool::VanWestendorp)),
            (Goal::MonetizationAudit, WizardStep::ComingSoon(ResearchTool::MonetizationAudit)),
            (Goal::AiRecommendations, WizardStep::PricingConfiguration(PricingView::AiRecommendation)),
            (Goal::RecommendPricing, WizardStep::PricingConfiguration(PricingView::Recommend)),
            (Goal::ManualPricing, WizardStep::PricingConfiguration(PricingView::Manual)),
            (Goal::Unknown("growth-hacking".into()), WizardStep::Loading),
        ];
        for (goal, expected) in cases {
            assert_eq!(resolve_step(BRANCH_STEP, Some(&goal)), Some(expected));
        }

        assert_eq!(resolve_step(BRANCH_STEP, None), Some(WizardStep::Loading));
        assert_eq!(resolve_step(3, None), Some(WizardStep::PricingPage));
        assert_eq!(resolve_step(STEPS.len(), None), None);
    }

    #[test]
    fn test_update_user_data_is_a_shallow_merge() {
        let mut wizard = controller();
        assert!(wizard.update_user_data(&ProfilePatch::sdk_integrated(true)));
        assert!(!wizard.update_user_data(&ProfilePatch::sdk_integrated(true)));
        assert!(!wizard.update_user_data(&ProfilePatch::new()));

        let profile = wizard.user_data();
        assert!(profile.sdk_integrated);
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_progress_rounds_percentage() {
        let mut wizard = controller();
        wizard.advance(None);
        assert_eq!(wizard.progress().percent, 20);
        wizard.advance(None);
        wizard.advance(None);
        assert_eq!(
            wizard.progress().to_string(),
            "Step 4 of 6: Pricing Page (60%)"
        );
    }

    #[test]
    fn test_coming_soon_pages_list_six_features() {
        for tool in [
            ResearchTool::CompetitorTracking,
            ResearchTool::WtpInterview,
            ResearchTool::VanWestendorp,
            ResearchTool::MonetizationAudit,
        ] {
            assert!(tool.features().iter().all(|f| !f.is_empty()));
            assert!(!tool.description().contains("  "));
        }
    }
}
