//! Onboarding wizard orchestration
//!
//! Drives the [`WizardController`] through the interactive steps. After every
//! step the returned patch is merged through the controller and the full
//! profile is written back to storage.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::{paths::AtlasPaths, settings::Settings};
use crate::error::AtlasResult;
use crate::models::UserProfile;
use crate::services::profile::ProfileService;
use crate::storage::Storage;

use super::controller::{WizardController, WizardStep};
use super::prompt::Console;
use super::steps::{
    coming_soon, completion, goals, pricing, pricing_page, sdk, signup, stripe, StepAction,
    StepContext, StepOutcome,
};

/// Result of running the onboarding wizard
#[derive(Debug)]
pub struct OnboardingResult {
    /// Whether the wizard reached its final step
    pub completed: bool,
    /// The profile as last saved
    pub profile: UserProfile,
}

/// The onboarding wizard
pub struct OnboardingWizard<'a> {
    storage: &'a Storage,
    paths: &'a AtlasPaths,
}

impl<'a> OnboardingWizard<'a> {
    pub fn new(storage: &'a Storage, paths: &'a AtlasPaths) -> Self {
        Self { storage, paths }
    }

    /// Run sign-up on its own
    pub fn sign_up<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        settings: &Settings,
    ) -> AtlasResult<UserProfile> {
        let mut ctx = StepContext::new(console, settings);
        signup::run(&mut ctx, self.storage)
    }

    /// Run the wizard, signing up first when there is no profile
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        settings: &mut Settings,
    ) -> AtlasResult<OnboardingResult> {
        let profiles = ProfileService::new(self.storage);

        let profile = match profiles.current()? {
            Some(profile) => profile,
            None => {
                console.line("No account found. Let's create one first.")?;
                self.sign_up(console, settings)?
            }
        };

        let mut wizard = WizardController::new(profile);

        loop {
            console.clear_screen()?;
            console.line(wizard.progress())?;

            let step = wizard.resolve();
            debug!(step = wizard.current_step(), ?step, "showing wizard step");

            if step == WizardStep::Complete {
                let mut ctx = StepContext::new(console, settings);
                completion::run(&mut ctx, wizard.user_data())?;

                settings.onboarding_completed = true;
                settings.save(self.paths)?;
                info!(merchant_id = %wizard.user_data().merchant_id, "onboarding completed");

                return Ok(OnboardingResult {
                    completed: true,
                    profile: wizard.user_data().clone(),
                });
            }

            let outcome = {
                let mut ctx = StepContext::new(console, settings);
                let profile = wizard.user_data().clone();
                match step {
                    WizardStep::ChooseGoal => goals::run(&mut ctx, &profile)?,
                    WizardStep::ComingSoon(tool) => coming_soon::run(&mut ctx, tool)?,
                    WizardStep::PricingConfiguration(view) => {
                        pricing::run(&mut ctx, &profile, view)?
                    }
                    WizardStep::Loading => {
                        ctx.console.line("Loading...")?;
                        StepOutcome::back()
                    }
                    WizardStep::SdkIntegration => sdk::run(&mut ctx, &profile)?,
                    WizardStep::PricingPage => pricing_page::run(&mut ctx, &profile)?,
                    WizardStep::ConnectStripe => stripe::run(&mut ctx, &profile)?,
                    WizardStep::Complete => StepOutcome::next(),
                }
            };

            let before = wizard.user_data().clone();
            wizard.update_user_data(&outcome.patch);

            let exit = match outcome.action {
                StepAction::Continue => {
                    wizard.advance(None);
                    false
                }
                StepAction::ContinueWithGoal(goal) => {
                    wizard.advance(Some(goal));
                    false
                }
                StepAction::Back => {
                    wizard.retreat();
                    false
                }
                StepAction::Exit => true,
            };

            profiles.persist(&before, wizard.user_data())?;

            if exit {
                console.blank()?;
                console.line("Progress saved. Run 'atlas onboard' to continue.")?;
                return Ok(OnboardingResult {
                    completed: false,
                    profile: wizard.user_data().clone(),
                });
            }
        }
    }
}
