//! Simulated external calls
//!
//! Stripe, the SDK check and pricing extraction have no real backend. Each
//! call waits out a configured latency and then reports a [`CallOutcome`].
//! The wait races a [`CancellationToken`], so a view that goes away (or a
//! Ctrl-C) abandons the call instead of applying a late result. Outside a
//! call, Ctrl-C stops the process as usual.

use std::future::Future;
use std::sync::{Mutex, Once, OnceLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::audit::EntityType;
use crate::error::{AtlasError, AtlasResult};
use crate::models::{MerchantId, Plan, PlanType, ProfilePatch, UserProfile};
use crate::storage::Storage;

use super::import::{mock_extracted_plans, ImportSource};
use super::profile::ProfileService;

/// Result of a simulated call
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T> {
    Success(T),
    Failure(String),
    Cancelled,
}

impl<T> CallOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            Self::Success(value) => CallOutcome::Success(f(value)),
            Self::Failure(reason) => CallOutcome::Failure(reason),
            Self::Cancelled => CallOutcome::Cancelled,
        }
    }

    /// Convert to the crate's error channel; `what` names the call
    pub fn into_result(self, what: &str) -> AtlasResult<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(reason) => Err(AtlasError::Integration(reason)),
            Self::Cancelled => Err(AtlasError::Cancelled(what.to_string())),
        }
    }
}

/// Owns the cancellation token of the calls a view starts
///
/// Dropping the scope cancels everything still pending under it.
#[derive(Debug, Default)]
pub struct CallScope {
    token: CancellationToken,
}

impl CallScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for one call, cancelled with the scope
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for CallScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Wait out `latency`, then produce the outcome, unless cancelled first
pub async fn simulate<T>(
    latency: Duration,
    token: &CancellationToken,
    outcome: impl FnOnce() -> CallOutcome<T>,
) -> CallOutcome<T> {
    tokio::select! {
        _ = token.cancelled() => {
            debug!("simulated call cancelled");
            CallOutcome::Cancelled
        }
        _ = tokio::time::sleep(latency) => outcome(),
    }
}

/// Exit status of a process stopped by Ctrl-C
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// What a Ctrl-C does at the moment it arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// A simulated call was pending and has been cancelled
    CancelCall,
    /// Nothing was pending; the process should stop
    Exit,
}

/// Ctrl-C routing for simulated calls
///
/// Once a handler is installed the signal no longer stops the process on its
/// own, so the handler thread asks [`Interrupts::on_interrupt`] what to do:
/// cancel the pending call, or exit with [`INTERRUPTED_EXIT_CODE`] when the
/// user is anywhere else (a prompt, a menu).
#[derive(Debug, Default)]
pub struct Interrupts {
    pending: Mutex<Option<CancellationToken>>,
}

/// Clears the pending call when the call finishes
struct PendingCall<'a> {
    interrupts: &'a Interrupts,
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.interrupts.pending.lock() {
            *pending = None;
        }
    }
}

impl Interrupts {
    /// The process-wide instance; the first use installs the Ctrl-C handler
    pub fn global() -> &'static Interrupts {
        static INTERRUPTS: OnceLock<Interrupts> = OnceLock::new();
        static HANDLER: Once = Once::new();

        let interrupts = INTERRUPTS.get_or_init(Interrupts::default);
        HANDLER.call_once(|| spawn_interrupt_handler(interrupts));
        interrupts
    }

    /// React to one Ctrl-C
    pub fn on_interrupt(&self) -> InterruptAction {
        let pending = match self.pending.lock() {
            Ok(mut pending) => pending.take(),
            Err(_) => None,
        };

        match pending {
            Some(token) => {
                debug!("Ctrl-C cancelled the pending call");
                token.cancel();
                InterruptAction::CancelCall
            }
            None => InterruptAction::Exit,
        }
    }

    /// Whether a call is currently waiting on Ctrl-C
    pub fn has_pending_call(&self) -> bool {
        self.pending.lock().map(|p| p.is_some()).unwrap_or(false)
    }

    /// Drive a simulated call on a fresh current-thread runtime; Ctrl-C
    /// while it runs cancels `scope`
    pub fn block_on<T, F>(&self, scope: &CallScope, call: F) -> AtlasResult<CallOutcome<T>>
    where
        F: Future<Output = CallOutcome<T>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| AtlasError::Io(format!("Failed to start runtime: {}", e)))?;

        let _pending = self.begin(scope.token.clone());
        Ok(runtime.block_on(call))
    }

    fn begin(&self, token: CancellationToken) -> PendingCall<'_> {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(token);
        }
        PendingCall { interrupts: self }
    }
}

fn spawn_interrupt_handler(interrupts: &'static Interrupts) {
    let spawned = std::thread::Builder::new()
        .name("atlas-interrupts".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!(error = %e, "Ctrl-C handler unavailable");
                    return;
                }
            };

            runtime.block_on(async {
                while tokio::signal::ctrl_c().await.is_ok() {
                    if interrupts.on_interrupt() == InterruptAction::Exit {
                        eprintln!();
                        std::process::exit(INTERRUPTED_EXIT_CODE);
                    }
                }
            });
        });

    if let Err(e) = spawned {
        warn!(error = %e, "failed to start the Ctrl-C handler thread");
    }
}

/// Drive a simulated call, cancelling it on Ctrl-C
pub fn block_on_call<T, F>(scope: &CallScope, call: F) -> AtlasResult<CallOutcome<T>>
where
    F: Future<Output = CallOutcome<T>>,
{
    Interrupts::global().block_on(scope, call)
}

/// Live or test mode, read from the key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeMode {
    Test,
    Live,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    pub name: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub name: &'static str,
    pub enabled: bool,
}

/// What a successful Stripe connection reports
#[derive(Debug, Clone, PartialEq)]
pub struct StripeConnection {
    pub mode: StripeMode,
    pub account_label: String,
    pub webhook_events: Vec<WebhookEvent>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl StripeConnection {
    fn for_key(key: &str) -> Self {
        let mode = if key.starts_with("sk_live") || key.starts_with("pk_live") {
            StripeMode::Live
        } else {
            StripeMode::Test
        };

        let tail: String = {
            let chars: Vec<char> = key.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };

        Self {
            mode,
            account_label: format!(
                "{} account ending in {}",
                if mode == StripeMode::Live { "Live" } else { "Test" },
                tail
            ),
            webhook_events: stripe_webhook_events(),
            payment_methods: stripe_payment_methods(),
        }
    }
}

/// Webhook subscriptions shown for a connected account
pub fn stripe_webhook_events() -> Vec<WebhookEvent> {
    vec![
        WebhookEvent { name: "checkout.session.completed", active: true },
        WebhookEvent { name: "customer.subscription.updated", active: true },
        WebhookEvent { name: "invoice.payment_succeeded", active: true },
        WebhookEvent { name: "customer.subscription.deleted", active: false },
    ]
}

/// Payment methods shown for a connected account
pub fn stripe_payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod { name: "Credit Card", enabled: true },
        PaymentMethod { name: "Apple Pay", enabled: true },
        PaymentMethod { name: "Google Pay", enabled: false },
        PaymentMethod { name: "ACH Direct Debit", enabled: false },
    ]
}

/// Simulated Stripe connection; a blank key fails without waiting
pub async fn connect_stripe(
    key: &str,
    latency: Duration,
    token: &CancellationToken,
) -> CallOutcome<StripeConnection> {
    let key = key.trim();
    if key.is_empty() {
        return CallOutcome::Failure("Please enter your Stripe API key".into());
    }

    simulate(latency, token, || CallOutcome::Success(StripeConnection::for_key(key))).await
}

/// Simulated SDK installation check
pub async fn test_sdk(
    merchant_id: &MerchantId,
    latency: Duration,
    token: &CancellationToken,
) -> CallOutcome<()> {
    let empty = merchant_id.is_empty();
    simulate(latency, token, || {
        if empty {
            CallOutcome::Failure(
                "SDK test failed: no merchant id. Complete sign-up first.".into(),
            )
        } else {
            CallOutcome::Success(())
        }
    })
    .await
}

/// Simulated pricing extraction; the plans returned never depend on the input
pub async fn extract_pricing(
    source: &ImportSource,
    latency: Duration,
    token: &CancellationToken,
) -> CallOutcome<Vec<Plan>> {
    if let Err(reason) = source.validate() {
        return CallOutcome::Failure(reason);
    }

    simulate(latency, token, || CallOutcome::Success(mock_extracted_plans())).await
}

/// Simulated pause used for form submissions with no other outcome
pub async fn pause(latency: Duration, token: &CancellationToken) -> CallOutcome<()> {
    simulate(latency, token, || CallOutcome::Success(())).await
}

/// Integration flag changes on the stored profile
pub struct IntegrationService<'a> {
    storage: &'a Storage,
}

impl<'a> IntegrationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn set_flag(&self, patch: ProfilePatch, label: &str) -> AtlasResult<UserProfile> {
        let profiles = ProfileService::new(self.storage);
        let before = profiles.require()?;
        let after = before.merged(&patch);
        if before == after {
            return Ok(after);
        }

        self.storage.profiles.save(&after)?;
        self.storage.log_update(
            EntityType::Integration,
            after.merchant_id.to_string(),
            Some(label.to_string()),
            &before,
            &after,
        )?;
        info!(integration = label, "integration status changed");
        Ok(after)
    }

    pub fn mark_stripe_connected(&self) -> AtlasResult<UserProfile> {
        self.set_flag(ProfilePatch::stripe_connected(true), "Stripe")
    }

    /// Flip the Stripe flag back off
    pub fn disconnect_stripe(&self) -> AtlasResult<UserProfile> {
        self.set_flag(ProfilePatch::stripe_connected(false), "Stripe")
    }

    pub fn mark_sdk_integrated(&self) -> AtlasResult<UserProfile> {
        self.set_flag(ProfilePatch::sdk_integrated(true), "SDK")
    }
}

/// Install command shown on the SDK step
pub const SDK_INSTALL_COMMAND: &str = "npm install @atlas/sdk";

/// SDK initialisation snippet for a merchant
pub fn sdk_snippet(profile: &UserProfile) -> String {
    let merchant_id = if profile.merchant_id.is_empty() {
        "your_merchant_id"
    } else {
        profile.merchant_id.as_str()
    };
    // First paid plan with a usable price
    let price = profile
        .plans()
        .iter()
        .filter(|p| p.plan_type == PlanType::Paid && p.numeric_price().is_some())
        .map(|p| p.price.trim().to_string())
        .next()
        .unwrap_or_else(|| "29".to_string());

    format!(
        r#"// atlas-rules.js
import {{ Atlas }} from '@atlas/sdk';

// Initialize the SDK with your merchant ID
const atlas = new Atlas({{
  merchantId: "{merchant_id}",
}});

// Define your pricing rules
atlas.setPricingRules({{
  plans: {{
    basic: {{
      price: {price},
      limits: {{
        users: 100,
      }},
    }},
  }},
}});

export default atlas;"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AtlasPaths;
    use crate::services::import::ImportSource;
    use tempfile::TempDir;

    const FAST: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn test_connect_stripe_blank_key_fails() {
        let token = CancellationToken::new();
        let outcome = connect_stripe("   ", FAST, &token).await;
        assert_eq!(
            outcome,
            CallOutcome::Failure("Please enter your Stripe API key".into())
        );
    }

    #[tokio::test]
    async fn test_connect_stripe_any_key_succeeds() {
        let token = CancellationToken::new();
        let outcome = connect_stripe("sk_test_abc1234", FAST, &token).await;

        let CallOutcome::Success(connection) = outcome else {
            panic!("expected success, got {:?}", outcome);
        };
        assert_eq!(connection.mode, StripeMode::Test);
        assert_eq!(connection.account_label, "Test account ending in 1234");
        assert_eq!(connection.webhook_events.len(), 4);

        let live = connect_stripe("sk_live_zz", FAST, &token).await;
        assert!(matches!(live, CallOutcome::Success(c) if c.mode == StripeMode::Live));
    }

    #[tokio::test]
    async fn test_cancelled_call_reports_cancelled() {
        let scope = CallScope::new();
        let token = scope.token();
        scope.cancel();

        let outcome = connect_stripe("sk_test_1", Duration::from_secs(60), &token).await;
        assert_eq!(outcome, CallOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_dropping_scope_cancels_pending_call() {
        let scope = CallScope::new();
        let token = scope.token();

        let pending = tokio::spawn(async move {
            test_sdk(&MerchantId::generate(), Duration::from_secs(60), &token).await
        });
        drop(scope);

        assert_eq!(pending.await.unwrap(), CallOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_sdk_needs_merchant_id() {
        let token = CancellationToken::new();
        assert!(test_sdk(&MerchantId::generate(), FAST, &token).await.is_success());

        let failed = test_sdk(&MerchantId::default(), FAST, &token).await;
        assert!(matches!(failed, CallOutcome::Failure(_)));
    }

    #[tokio::test]
    async fn test_extract_pricing_ignores_input() {
        let token = CancellationToken::new();
        let a = extract_pricing(&ImportSource::Text("Pro $10".into()), FAST, &token).await;
        let b = extract_pricing(&ImportSource::Url("https://example.com".into()), FAST, &token).await;
        assert_eq!(a, b);
        assert!(a.is_success());

        let blank = extract_pricing(&ImportSource::Url(" ".into()), FAST, &token).await;
        assert!(matches!(blank, CallOutcome::Failure(_)));
    }

    #[test]
    fn test_outcome_into_result() {
        let failed: CallOutcome<()> = CallOutcome::Failure("nope".into());
        assert!(matches!(failed.into_result("x"), Err(AtlasError::Integration(_))));

        let cancelled: CallOutcome<()> = CallOutcome::Cancelled;
        assert!(matches!(cancelled.into_result("x"), Err(AtlasError::Cancelled(_))));

        assert_eq!(CallOutcome::Success(2).map(|v| v * 2).into_result("x").unwrap(), 4);
    }

    #[test]
    fn test_block_on_call_runs_to_completion() {
        let scope = CallScope::new();
        let token = scope.token();
        let outcome = block_on_call(&scope, async move { pause(FAST, &token).await }).unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_ctrl_c_cancels_only_a_pending_call() {
        let interrupts = Interrupts::default();
        assert_eq!(interrupts.on_interrupt(), InterruptAction::Exit);

        let scope = CallScope::new();
        let token = scope.token();
        let outcome = interrupts
            .block_on(&scope, async {
                assert!(interrupts.has_pending_call());
                assert_eq!(interrupts.on_interrupt(), InterruptAction::CancelCall);
                pause(Duration::from_secs(60), &token).await
            })
            .unwrap();
        assert_eq!(outcome, CallOutcome::Cancelled);
        assert!(scope.is_cancelled());

        // Back at a prompt, Ctrl-C stops the process again
        assert!(!interrupts.has_pending_call());
        assert_eq!(interrupts.on_interrupt(), InterruptAction::Exit);
    }

    #[test]
    fn test_finished_call_releases_ctrl_c() {
        let interrupts = Interrupts::default();
        let scope = CallScope::new();
        let token = scope.token();

        let outcome = interrupts
            .block_on(&scope, async move { pause(FAST, &token).await })
            .unwrap();
        assert!(outcome.is_success());
        assert!(!scope.is_cancelled());
        assert_eq!(interrupts.on_interrupt(), InterruptAction::Exit);
    }

    #[test]
    fn test_flags_are_persisted_and_audited() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().into())).unwrap();
        ProfileService::new(&storage)
            .sign_up("ada@example.com", "hunter22!")
            .unwrap();

        let service = IntegrationService::new(&storage);
        assert!(service.mark_stripe_connected().unwrap().stripe_connected);
        assert!(!service.disconnect_stripe().unwrap().stripe_connected);
        assert!(service.mark_sdk_integrated().unwrap().sdk_integrated);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].entity_type, EntityType::Integration);
        assert_eq!(
            entries[2].diff_summary.as_deref(),
            Some("stripeConnected: true -> false")
        );
    }

    #[test]
    fn test_sdk_snippet_embeds_merchant_id() {
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!");
        let snippet = sdk_snippet(&profile);
        assert!(snippet.contains(profile.merchant_id.as_str()));
        assert!(snippet.contains("price: 29"));

        assert!(sdk_snippet(&UserProfile::default()).contains("your_merchant_id"));
    }
}
