use anyhow::Result;
use clap::{Parser, Subcommand};

use atlas::cli::{
    handle_audit_command, handle_customers_command, handle_dashboard_command,
    handle_export_command, handle_integration_command, handle_onboard_command,
    handle_pricing_command, handle_profile_command, handle_signup_command, handle_widget_command,
};
use atlas::config::{paths::AtlasPaths, settings::Settings};
use atlas::services::DashboardMode;
use atlas::storage::Storage;

#[derive(Parser)]
#[command(
    name = "atlas",
    author = "Atlas Team",
    version,
    about = "Turn your app into a business",
    long_about = "Atlas walks you through setting up monetization for your app: \
                  pricing plans, SDK integration, a hosted pricing page and a \
                  Stripe connection. Progress is saved locally so you can resume \
                  onboarding at any time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your Atlas account
    Signup {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password, at least 8 characters (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Start or resume the onboarding wizard
    Onboard,

    /// Show the merchant dashboard
    Dashboard {
        /// Force a dashboard mode instead of deriving it from your progress
        #[arg(short, long, value_enum)]
        mode: Option<DashboardMode>,
    },

    /// Pricing model management commands
    #[command(subcommand)]
    Pricing(atlas::cli::PricingCommands),

    /// List customers
    Customers {
        /// Filter by company, contact or email
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Embeddable widget commands
    #[command(subcommand)]
    Widgets(atlas::cli::WidgetCommands),

    /// Stripe and SDK integration commands
    #[command(subcommand)]
    Integrations(atlas::cli::IntegrationCommands),

    /// Show your profile
    Profile,

    /// Export your data
    #[command(subcommand)]
    Export(atlas::cli::ExportCommands),

    /// Show recent changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    atlas::logging::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = AtlasPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Signup { email, password }) => {
            handle_signup_command(&storage, &paths, &settings, email, password)?;
        }
        Some(Commands::Onboard) => {
            handle_onboard_command(&storage, &paths, &mut settings)?;
        }
        Some(Commands::Dashboard { mode }) => {
            handle_dashboard_command(&storage, &settings, mode)?;
        }
        Some(Commands::Pricing(cmd)) => {
            handle_pricing_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Customers { search }) => handle_customers_command(search),
        Some(Commands::Widgets(cmd)) => handle_widget_command(cmd),
        Some(Commands::Integrations(cmd)) => {
            handle_integration_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Profile) => {
            handle_profile_command(&storage)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("Atlas Configuration");
            println!("===================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Storage file:    {}", paths.storage_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Default trial days:    {}", settings.default_trial_days);
            println!("  Onboarding completed:  {}", settings.onboarding_completed);
            println!("  Simulated latency (ms):");
            println!("    sign-up:         {}", settings.latency.signup_delay_ms);
            println!("    SDK test:        {}", settings.latency.sdk_test_delay_ms);
            println!("    Stripe connect:  {}", settings.latency.stripe_connect_delay_ms);
            println!("    import:          {}", settings.latency.import_delay_ms);
            println!("    pricing page:    {}", settings.latency.pricing_page_delay_ms);
        }
        Some(Commands::Tui) => {
            atlas::tui::run_tui(&storage, &settings)?;
        }
        None => {
            println!("Atlas - Turn your app into a business");
            println!();
            println!("Run 'atlas signup' to create your account.");
            println!("Run 'atlas onboard' to start or resume onboarding.");
            println!("Run 'atlas --help' for all commands.");
        }
    }

    Ok(())
}
