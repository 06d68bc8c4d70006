//! Pricing CLI commands
//!
//! Implements the pricing-model route: listing, editing and analysing the
//! stored plans.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::plan::{format_analytics, format_plan_details, format_plan_list};
use crate::error::{AtlasError, AtlasResult};
use crate::models::{FeatureType, PlanType};
use crate::services::pricing::{analytics, FeatureField, PlanField, PricingEditor, PricingService};
use crate::storage::Storage;

/// Pricing subcommands
#[derive(Subcommand)]
pub enum PricingCommands {
    /// List all plans
    List,
    /// Show plan details
    Show {
        /// Plan name or number
        plan: String,
    },
    /// Show customers, revenue and conversion per plan
    Analytics,
    /// Replace every plan with the starter plans
    Reset,
    /// Plan management
    #[command(subcommand)]
    Plan(PlanCommands),
    /// Feature management
    #[command(subcommand)]
    Feature(FeatureCommands),
    /// Choose the plan customers are moved to when they cancel
    DefaultOnCancel {
        /// Plan name or number
        plan: String,
    },
}

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Add a paid plan carrying every shared feature
    Add {
        /// Name for the new plan
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Remove a plan
    Remove {
        /// Plan name or number
        plan: String,
    },
    /// Edit plan fields
    Set {
        /// Plan name or number
        plan: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Plan type (free, paid, custom)
        #[arg(short = 't', long = "type")]
        plan_type: Option<String>,
        /// Monthly price (paid plans only)
        #[arg(short, long)]
        price: Option<String>,
        /// Offer a free trial (true or false)
        #[arg(long)]
        trial: Option<bool>,
        /// Trial length in days
        #[arg(long)]
        trial_days: Option<u32>,
    },
}

/// Feature subcommands
#[derive(Subcommand)]
pub enum FeatureCommands {
    /// Add a feature to every plan
    Add {
        /// Feature name
        name: String,
    },
    /// Remove a feature from one plan, or from every plan
    Remove {
        /// Feature name
        name: String,
        /// Only remove it from this plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Edit a feature of one plan
    Set {
        /// Plan name or number
        plan: String,
        /// Feature name or number within the plan
        feature: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Feature type (boolean, limit)
        #[arg(short = 't', long = "type")]
        feature_type: Option<String>,
        /// Limit value (limit features only)
        #[arg(short, long)]
        limit: Option<String>,
    },
}

fn resolve_plan(editor: &PricingEditor, identifier: &str) -> AtlasResult<usize> {
    editor
        .find_plan(identifier)
        .ok_or_else(|| AtlasError::plan_not_found(identifier))
}

fn resolve_feature(editor: &PricingEditor, plan: usize, identifier: &str) -> AtlasResult<usize> {
    let features = editor
        .plan(plan)
        .map(|p| p.features.as_slice())
        .unwrap_or(&[]);
    let identifier = identifier.trim();

    if let Ok(number) = identifier.parse::<usize>() {
        if (1..=features.len()).contains(&number) {
            return Ok(number - 1);
        }
    }

    features
        .iter()
        .position(|f| f.name.eq_ignore_ascii_case(identifier))
        .ok_or_else(|| AtlasError::feature_not_found(identifier))
}

fn parse_plan_type(value: &str) -> AtlasResult<PlanType> {
    PlanType::parse(value).ok_or_else(|| {
        AtlasError::Validation(format!(
            "Invalid plan type: '{}'. Valid types: free, paid, custom",
            value
        ))
    })
}

fn parse_feature_type(value: &str) -> AtlasResult<FeatureType> {
    FeatureType::parse(value).ok_or_else(|| {
        AtlasError::Validation(format!(
            "Invalid feature type: '{}'. Valid types: boolean, limit",
            value
        ))
    })
}

/// Handle a pricing command
pub fn handle_pricing_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PricingCommands,
) -> AtlasResult<()> {
    let service = PricingService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        PricingCommands::List => {
            let saved = service.stored_plans()?.is_some();
            let editor = service.load()?;
            print!("{}", format_plan_list(editor.plans(), currency));
            if !saved {
                println!();
                println!("These are the starter plans. Edit them to save a pricing model.");
            }
        }

        PricingCommands::Show { plan } => {
            let editor = service.load()?;
            let index = resolve_plan(&editor, &plan)?;
            if let Some(plan) = editor.plan(index) {
                print!("{}", format_plan_details(plan, currency));
            }
        }

        PricingCommands::Analytics => {
            let editor = service.load()?;
            print!("{}", format_analytics(&analytics(editor.plans()), currency));
        }

        PricingCommands::Reset => {
            let editor = service.reset()?;
            println!("Pricing reset to {} starter plans.", editor.len());
        }

        PricingCommands::Plan(cmd) => handle_plan_command(&service, settings, cmd)?,

        PricingCommands::Feature(cmd) => handle_feature_command(&service, cmd)?,

        PricingCommands::DefaultOnCancel { plan } => {
            let mut editor = service.load()?;
            let index = resolve_plan(&editor, &plan)?;
            if editor.set_default_on_cancel(index) {
                service.save(&editor)?;
            }
            if let Some(plan) = editor.plan(index) {
                println!("Default plan on cancel: {}", plan.name);
            }
        }
    }

    Ok(())
}

fn handle_plan_command(
    service: &PricingService,
    settings: &Settings,
    cmd: PlanCommands,
) -> AtlasResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        PlanCommands::Add { name } => {
            let mut editor = service.load()?;
            let index = editor.add_plan();
            editor.update_plan_field(index, PlanField::TrialDays(settings.default_trial_days));
            if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
                editor.update_plan_field(index, PlanField::Name(name.trim().to_string()));
            }
            service.save(&editor)?;

            if let Some(plan) = editor.plan(index) {
                println!("Added plan: {}", plan.name);
            }
        }

        PlanCommands::Remove { plan } => {
            let removed = service.remove_plan(&plan)?;
            println!("Removed plan: {}", removed.name);
        }

        PlanCommands::Set {
            plan,
            name,
            plan_type,
            price,
            trial,
            trial_days,
        } => {
            if trial_days == Some(0) {
                return Err(AtlasError::Validation(
                    "Trial days must be at least 1".into(),
                ));
            }

            let mut editor = service.load()?;
            let index = resolve_plan(&editor, &plan)?;

            // Type first so a price given alongside `--type paid` sticks
            let mut fields = Vec::new();
            if let Some(plan_type) = plan_type {
                fields.push(PlanField::PlanType(parse_plan_type(&plan_type)?));
            }
            if let Some(name) = name {
                fields.push(PlanField::Name(name));
            }
            if let Some(price) = price {
                fields.push(PlanField::Price(price.trim().to_string()));
            }
            if let Some(trial) = trial {
                fields.push(PlanField::TrialAvailable(trial));
            }
            if let Some(days) = trial_days {
                fields.push(PlanField::TrialDays(days));
            }

            let mut changed = false;
            for field in fields {
                changed |= editor.update_plan_field(index, field);
            }

            if changed {
                service.save(&editor)?;
                if let Some(plan) = editor.plan(index) {
                    println!("Updated plan:");
                    print!("{}", format_plan_details(plan, currency));
                }
            } else {
                println!("No changes made.");
            }
        }
    }

    Ok(())
}

fn handle_feature_command(service: &PricingService, cmd: FeatureCommands) -> AtlasResult<()> {
    match cmd {
        FeatureCommands::Add { name } => {
            if service.add_feature(&name)? {
                println!("Added feature to every plan: {}", name.trim());
            } else {
                println!("No changes made.");
            }
        }

        FeatureCommands::Remove { name, plan: None } => {
            service.remove_feature(&name)?;
            println!("Removed feature from every plan: {}", name.trim());
        }

        FeatureCommands::Remove {
            name,
            plan: Some(plan),
        } => {
            let mut editor = service.load()?;
            let plan_index = resolve_plan(&editor, &plan)?;
            let feature_index = resolve_feature(&editor, plan_index, &name)?;
            editor.remove_feature(plan_index, feature_index);
            service.save(&editor)?;
            println!("Removed feature {} from {}", name.trim(), plan);
        }

        FeatureCommands::Set {
            plan,
            feature,
            name,
            feature_type,
            limit,
        } => {
            let mut editor = service.load()?;
            let plan_index = resolve_plan(&editor, &plan)?;
            let feature_index = resolve_feature(&editor, plan_index, &feature)?;

            let mut fields = Vec::new();
            if let Some(feature_type) = feature_type {
                fields.push(FeatureField::Type(parse_feature_type(&feature_type)?));
            }
            if let Some(limit) = limit {
                fields.push(FeatureField::Limit(limit.trim().to_string()));
            }
            if let Some(name) = name {
                fields.push(FeatureField::Name(name));
            }

            let mut changed = false;
            for field in fields {
                changed |= editor.update_feature(plan_index, feature_index, field);
            }

            if changed {
                service.save(&editor)?;
                if let Some(feature) = editor
                    .plan(plan_index)
                    .and_then(|p| p.features.get(feature_index))
                {
                    println!("Updated feature: {}", feature);
                }
            } else {
                println!("No changes made.");
            }
        }
    }

    Ok(())
}
