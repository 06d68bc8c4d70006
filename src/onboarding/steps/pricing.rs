//! Pricing configuration step
//!
//! Opens on the sub-view the selected goal points at. Every sub-view ends by
//! storing a pricing model of its own type, or by stepping back to the
//! choice screen.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::display::plan::{format_plan_details, format_plan_list, format_plan_preview};
use crate::error::AtlasResult;
use crate::models::{
    FeatureType, PlanType, PricingModel, PricingModelType, ProfilePatch, UserProfile,
};
use crate::onboarding::controller::PricingView;
use crate::services::import::{ImportFlow, ImportSource, ImportStage};
use crate::services::integration::extract_pricing;
use crate::services::pricing::{FeatureField, PlanField, PricingEditor};
use crate::services::recommendation::{ai_pricing_model, ai_recommended_plans, RecommendFlow};

use super::{StepContext, StepOutcome};

/// Where a sub-view leads
enum Next {
    Done(StepOutcome),
    Show(PricingView),
    Edit(PricingEditor),
}

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
    initial: PricingView,
) -> AtlasResult<StepOutcome> {
    let mut view = initial;
    let mut seeded: Option<PricingEditor> = None;

    loop {
        let next = match view {
            PricingView::Choice => choice(ctx)?,
            PricingView::Recommend => recommend(ctx)?,
            PricingView::AiRecommendation => ai_recommendation(ctx)?,
            PricingView::Import => import(ctx)?,
            PricingView::Manual => {
                let editor = seeded.take().unwrap_or_else(|| editor_for(profile));
                manual(ctx, editor)?
            }
        };

        match next {
            Next::Done(outcome) => return Ok(outcome),
            Next::Show(target) => view = target,
            Next::Edit(editor) => {
                seeded = Some(editor);
                view = PricingView::Manual;
            }
        }
    }
}

/// Editor over the profile's plans, or the starter plans
fn editor_for(profile: &UserProfile) -> PricingEditor {
    match profile.plans() {
        [] => PricingEditor::with_defaults(),
        plans => PricingEditor::from_plans(plans.to_vec()),
    }
}

fn store(model: PricingModel) -> Next {
    Next::Done(StepOutcome::next_with(ProfilePatch::pricing_model(model)))
}

fn choice<R: BufRead, W: Write>(ctx: &mut StepContext<'_, R, W>) -> AtlasResult<Next> {
    ctx.console.heading("Set Up Your Pricing")?;
    ctx.console.line("Choose how to monetize your app")?;
    ctx.console.blank()?;

    let index = ctx.console.prompt_choice(
        "Select option",
        &[
            "Recommend a Pricing Model",
            "Create Plans Manually",
            "Import Existing Pricing",
            "Back",
            "Save and exit",
        ],
        Some(0),
    )?;

    Ok(match index {
        0 => Next::Show(PricingView::Recommend),
        1 => Next::Show(PricingView::Manual),
        2 => Next::Show(PricingView::Import),
        3 => Next::Done(StepOutcome::back()),
        _ => Next::Done(StepOutcome::exit()),
    })
}

fn recommend<R: BufRead, W: Write>(ctx: &mut StepContext<'_, R, W>) -> AtlasResult<Next> {
    let mut flow = RecommendFlow::new();

    loop {
        match flow.step().question() {
            Some((question, choices)) => {
                ctx.console.heading(question)?;
                let mut labels: Vec<&str> = choices.iter().map(|c| c.label).collect();
                labels.push("Back");
                let default = flow
                    .answer(flow.step())
                    .and_then(|a| choices.iter().position(|c| *c == a));

                let index = ctx.console.prompt_choice("Select answer", &labels, default)?;
                match choices.get(index) {
                    Some(answer) => {
                        flow.select(answer.value);
                        flow.advance();
                    }
                    None => {
                        if !flow.back() {
                            return Ok(Next::Show(PricingView::Choice));
                        }
                    }
                }
            }
            None => {
                ctx.console.heading("Recommended Plan")?;
                let plan = flow.recommended_plan();
                let details = format_plan_details(&plan, ctx.currency());
                ctx.console.line(details)?;

                let index = ctx.console.prompt_choice(
                    "Select option",
                    &["Use This Plan", "Edit Plan", "Back"],
                    Some(0),
                )?;
                match index {
                    0 => return Ok(store(flow.accept())),
                    1 => return Ok(Next::Edit(PricingEditor::from_plans(vec![plan]))),
                    _ => {
                        flow.back();
                    }
                }
            }
        }
    }
}

fn ai_recommendation<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
) -> AtlasResult<Next> {
    ctx.console.heading("AI Pricing Recommendations")?;
    ctx.console
        .line("Based on similar businesses, we suggest a three-tier model:")?;
    ctx.console.blank()?;
    let preview = format_plan_preview(&ai_recommended_plans(), ctx.currency());
    ctx.console.line(preview)?;

    let index = ctx.console.prompt_choice(
        "Select option",
        &["Use These Plans", "Customize Manually", "Back"],
        Some(0),
    )?;

    Ok(match index {
        0 => store(ai_pricing_model()),
        1 => Next::Edit(PricingEditor::from_plans(ai_recommended_plans())),
        _ => Next::Show(PricingView::Choice),
    })
}

fn import<R: BufRead, W: Write>(ctx: &mut StepContext<'_, R, W>) -> AtlasResult<Next> {
    let mut flow = ImportFlow::new();

    loop {
        match flow.stage() {
            ImportStage::Input => {
                ctx.console.heading("Import Existing Pricing")?;
                if let Some(error) = flow.error() {
                    ctx.console.line(format!("Error: {}", error))?;
                    ctx.console.blank()?;
                }

                let index = ctx.console.prompt_choice(
                    "Import from",
                    &["Website URL", "Document", "Paste text", "Back"],
                    Some(0),
                )?;
                let source = match index {
                    0 => ImportSource::Url(ctx.console.prompt_string("Pricing page URL: ")?),
                    1 => ImportSource::Document(PathBuf::from(
                        ctx.console.prompt_string("Path to document: ")?,
                    )),
                    2 => ImportSource::Text(ctx.console.prompt_string("Pricing details: ")?),
                    _ => return Ok(Next::Show(PricingView::Choice)),
                };
                flow.submit(source);
            }
            ImportStage::Processing => {
                let Some(source) = flow.source().cloned() else {
                    flow.fail("Nothing to import");
                    continue;
                };
                let latency = ctx.settings.latency.import();
                let extracted = ctx.run_call("Analyzing your pricing...", |scope| {
                    let token = scope.token();
                    async move { extract_pricing(&source, latency, &token).await }
                })?;

                match extracted {
                    Some(plans) => {
                        flow.complete(plans);
                    }
                    None => flow.fail("Import did not finish. Please try again."),
                }
            }
            ImportStage::Verification => {
                ctx.console.heading("Verify Imported Pricing")?;
                if let Some(source) = flow.source() {
                    ctx.console.line(format!("Imported from {}", source))?;
                    ctx.console.blank()?;
                }
                let preview = format_plan_preview(flow.extracted(), ctx.currency());
                ctx.console.line(preview)?;

                let index = ctx.console.prompt_choice(
                    "Does this look right",
                    &["Confirm and Continue", "Edit Plans", "Start Over"],
                    Some(0),
                )?;
                match index {
                    0 => {
                        if let Some(model) = flow.confirm() {
                            return Ok(store(model));
                        }
                    }
                    1 => {
                        return Ok(Next::Edit(PricingEditor::from_plans(
                            flow.extracted().to_vec(),
                        )))
                    }
                    _ => {
                        flow.back();
                    }
                }
            }
        }
    }
}

fn manual<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    mut editor: PricingEditor,
) -> AtlasResult<Next> {
    loop {
        ctx.console.heading("Create Plans Manually")?;
        let table = format_plan_list(editor.plans(), ctx.currency());
        ctx.console.line(table)?;
        ctx.console.line(format!(
            "Shared features: {}",
            if editor.shared_features().is_empty() {
                "(none)".to_string()
            } else {
                editor.shared_features().join(", ")
            }
        ))?;
        ctx.console.blank()?;

        let index = ctx.console.prompt_choice(
            "Select action",
            &[
                "Add plan",
                "Edit plan",
                "Remove plan",
                "Add feature to all plans",
                "Remove feature from all plans",
                "Set default plan on cancel",
                "Save and continue",
                "Back",
            ],
            None,
        )?;

        match index {
            0 => {
                let added = editor.add_plan();
                editor.update_plan_field(added, PlanField::TrialDays(ctx.settings.default_trial_days));
                edit_plan(ctx, &mut editor, added)?;
            }
            1 => {
                if let Some(plan) = pick_plan(ctx, &editor)? {
                    edit_plan(ctx, &mut editor, plan)?;
                }
            }
            2 => {
                if editor.len() <= 1 {
                    ctx.console.line("Error: At least one plan is required")?;
                } else if let Some(plan) = pick_plan(ctx, &editor)? {
                    editor.remove_plan(plan);
                }
            }
            3 => {
                let name = ctx.console.prompt_string("Feature name: ")?;
                if !editor.add_feature_everywhere(&name) {
                    ctx.console
                        .line("Error: Feature name is blank or already on every plan")?;
                }
            }
            4 => {
                let name = ctx.console.prompt_string("Feature name: ")?;
                if !editor.remove_feature_everywhere(&name) {
                    ctx.console.line(format!("Error: No feature named '{}'", name))?;
                }
            }
            5 => {
                if let Some(plan) = pick_plan(ctx, &editor)? {
                    editor.set_default_on_cancel(plan);
                }
            }
            6 => {
                if editor.is_empty() {
                    ctx.console.line("Error: At least one plan is required")?;
                    continue;
                }
                let model = PricingModel::new(PricingModelType::Manual, editor.into_plans());
                return Ok(store(model));
            }
            _ => return Ok(Next::Show(PricingView::Choice)),
        }
    }
}

/// Ask for a plan by number or name
fn pick_plan<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    editor: &PricingEditor,
) -> AtlasResult<Option<usize>> {
    let answer = ctx.console.prompt_string("Plan (number or name): ")?;
    let found = editor.find_plan(&answer);
    if found.is_none() {
        ctx.console.line(format!("Error: No plan matches '{}'", answer))?;
    }
    Ok(found)
}

fn edit_plan<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    editor: &mut PricingEditor,
    index: usize,
) -> AtlasResult<()> {
    loop {
        let Some(plan) = editor.plan(index) else {
            return Ok(());
        };
        let details = format_plan_details(plan, ctx.currency());
        let trial_enabled = plan.trial_available;
        let feature_count = plan.features.len();
        ctx.console.blank()?;
        ctx.console.line(details)?;

        let action = ctx.console.prompt_choice(
            "Edit",
            &[
                "Rename",
                "Change type",
                "Set price",
                "Toggle trial",
                "Set trial days",
                "Edit feature",
                "Remove feature",
                "Done",
            ],
            Some(7),
        )?;

        let changed = match action {
            0 => {
                let name = ctx.console.prompt_string("Plan name: ")?;
                editor.update_plan_field(index, PlanField::Name(name))
            }
            1 => {
                let choice =
                    ctx.console
                        .prompt_choice("Plan type", &["free", "paid", "custom"], None)?;
                let plan_type = match choice {
                    0 => PlanType::Free,
                    1 => PlanType::Paid,
                    _ => PlanType::Custom,
                };
                editor.update_plan_field(index, PlanField::PlanType(plan_type))
            }
            2 => {
                let price = ctx.console.prompt_string("Monthly price: ")?;
                editor.update_plan_field(index, PlanField::Price(price))
            }
            3 => editor.update_plan_field(index, PlanField::TrialAvailable(!trial_enabled)),
            4 => {
                let days = ctx.console.prompt_string("Trial days: ")?;
                match days.parse::<u32>() {
                    Ok(days) => editor.update_plan_field(index, PlanField::TrialDays(days)),
                    Err(_) => false,
                }
            }
            5 | 6 if feature_count == 0 => {
                ctx.console.line("This plan has no features.")?;
                continue;
            }
            5 => {
                let feature = pick_feature(ctx, feature_count)?;
                edit_feature(ctx, editor, index, feature)?
            }
            6 => {
                let feature = pick_feature(ctx, feature_count)?;
                editor.remove_feature(index, feature)
            }
            _ => return Ok(()),
        };

        if !changed {
            ctx.console.line("Nothing changed.")?;
        }
    }
}

fn pick_feature<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    count: usize,
) -> AtlasResult<usize> {
    loop {
        let answer = ctx.console.prompt_string(&format!("Feature (1-{}): ", count))?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
            _ => ctx
                .console
                .line(format!("Please enter a number between 1 and {}.", count))?,
        }
    }
}

fn edit_feature<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    editor: &mut PricingEditor,
    plan: usize,
    feature: usize,
) -> AtlasResult<bool> {
    let action = ctx.console.prompt_choice(
        "Feature",
        &["Rename", "Make boolean", "Make limit", "Set limit"],
        None,
    )?;

    let field = match action {
        0 => FeatureField::Name(ctx.console.prompt_string("Feature name: ")?),
        1 => FeatureField::Type(FeatureType::Boolean),
        2 => FeatureField::Type(FeatureType::Limit),
        _ => FeatureField::Limit(ctx.console.prompt_string("Limit: ")?),
    };
    Ok(editor.update_feature(plan, feature, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{Settings, SimulatedLatency};
    use crate::models::{Feature, Plan};
    use crate::onboarding::prompt::tests::{output_of, scripted};
    use crate::onboarding::steps::StepAction;

    fn settings() -> Settings {
        Settings {
            latency: SimulatedLatency::instant(),
            ..Settings::default()
        }
    }

    fn stored_model(outcome: &StepOutcome) -> &PricingModel {
        outcome
            .patch
            .pricing_model
            .as_ref()
            .and_then(|m| m.as_ref())
            .expect("pricing model in patch")
    }

    #[test]
    fn test_recommend_walkthrough_stores_recommended_model() {
        let settings = settings();
        // app type, customer type, value metric, then accept
        let mut console = scripted(&["1", "1", "1", "1"]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome = run(&mut ctx, &UserProfile::default(), PricingView::Recommend).unwrap();
        assert_eq!(outcome.action, StepAction::Continue);
        let model = stored_model(&outcome);
        assert_eq!(model.model_type, PricingModelType::Recommended);
        assert_eq!(model.plans[0].name, "Basic Plan");
    }

    #[test]
    fn test_back_from_first_question_returns_to_choice() {
        let settings = settings();
        // "Back" on the app type question, then "Back" on the choice screen
        let mut console = scripted(&["6", "4"]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome = run(&mut ctx, &UserProfile::default(), PricingView::Recommend).unwrap();
        assert_eq!(outcome.action, StepAction::Back);
        assert!(outcome.patch.is_empty());
    }

    #[test]
    fn test_ai_recommendation() {
        let settings = settings();
        let mut console = scripted(&[""]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome =
            run(&mut ctx, &UserProfile::default(), PricingView::AiRecommendation).unwrap();
        let model = stored_model(&outcome);
        assert_eq!(model.model_type, PricingModelType::AiRecommended);
        assert_eq!(model.plans.len(), 3);
    }

    #[test]
    fn test_import_blank_input_stays_on_input() {
        let settings = settings();
        // blank URL, then a real URL, then confirm
        let mut console = scripted(&["1", "", "1", "https://acme.test/pricing", ""]);
        let outcome = {
            let mut ctx = StepContext::new(&mut console, &settings);
            run(&mut ctx, &UserProfile::default(), PricingView::Import).unwrap()
        };

        let model = stored_model(&outcome);
        assert_eq!(model.model_type, PricingModelType::Imported);
        assert_eq!(model.plans[1].name, "Professional");

        let out = output_of(console);
        assert!(out.contains("Error: Please enter your pricing page URL"));
        assert!(out.contains("Imported from https://acme.test/pricing"));
    }

    #[test]
    fn test_manual_editor_adds_plan_and_saves() {
        let settings = settings();
        let profile = UserProfile::default().merged(&ProfilePatch::pricing_model(
            PricingModel::new(
                PricingModelType::Recommended,
                vec![Plan::paid("Basic", "29").with_features(vec![Feature::boolean("Core Features")])],
            ),
        ));
        // add plan, leave its editor, save
        let mut console = scripted(&["1", "", "7"]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome = run(&mut ctx, &profile, PricingView::Manual).unwrap();
        let model = stored_model(&outcome);
        assert_eq!(model.model_type, PricingModelType::Manual);
        assert_eq!(model.plans.len(), 2);
        assert_eq!(model.plans[1].name, "Plan 2");
        assert_eq!(model.plans[1].features, vec![Feature::boolean("Core Features")]);
    }

    #[test]
    fn test_manual_editor_refuses_removing_last_plan() {
        let settings = settings();
        let profile = UserProfile::default().merged(&ProfilePatch::pricing_model(
            PricingModel::new(PricingModelType::Manual, vec![Plan::paid("Solo", "9")]),
        ));
        let mut console = scripted(&["3", "7"]);
        let outcome = {
            let mut ctx = StepContext::new(&mut console, &settings);
            run(&mut ctx, &profile, PricingView::Manual).unwrap()
        };

        assert_eq!(stored_model(&outcome).plans.len(), 1);
        assert!(output_of(console).contains("Error: At least one plan is required"));
    }

    #[test]
    fn test_edit_recommended_plan_switches_to_manual() {
        let settings = settings();
        // answer three questions, choose "Edit Plan", then save from the editor
        let mut console = scripted(&["2", "2", "2", "2", "7"]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome = run(&mut ctx, &UserProfile::default(), PricingView::Recommend).unwrap();
        let model = stored_model(&outcome);
        assert_eq!(model.model_type, PricingModelType::Manual);
        assert_eq!(model.plans[0].name, "Basic Plan");
    }
}
