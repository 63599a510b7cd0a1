//! The approval-request detail screen.
//!
//! Owns one [`ApprovalRequest`] for the lifetime of the screen. `bind`
//! recomputes the full render state (idempotent, since the failure-refresh
//! path re-invokes it with the same in-memory request); approve/deny dispatch
//! exactly one background SDK call each and consume the outcome at a single
//! resumption point on the UI loop.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, warn};

use greenlight_core::{
    ApprovalRequest, AuthClient, ImageLoader, LogoArt, RegistrationReason,
};

use crate::config::FrontendConfig;
use crate::event::{ActionOutcome, AppEvent, ApprovalAction, Nav};
use crate::notice::{Notice, NoticeAction, NoticeKind};
use crate::render::RenderState;

/// The detail screen for one approval request.
pub struct DetailScreen {
    request: ApprovalRequest,
    client: Arc<dyn AuthClient>,
    loader: Arc<dyn ImageLoader>,
    events: UnboundedSender<AppEvent>,
    config: FrontendConfig,
    generation: u64,
    render: RenderState,
    logo: LogoArt,
    in_flight: Option<ApprovalAction>,
    notice: Option<Notice>,
    torn_down: bool,
}

impl DetailScreen {
    /// Create the screen. Call [`bind`](Self::bind) before first render.
    ///
    /// The SDK client and image loader are injected here; the screen never
    /// reaches for process-wide state.
    #[must_use]
    pub fn new(
        request: ApprovalRequest,
        client: Arc<dyn AuthClient>,
        loader: Arc<dyn ImageLoader>,
        events: UnboundedSender<AppEvent>,
        config: FrontendConfig,
        generation: u64,
    ) -> Self {
        let render = RenderState::compute(&request, config.logo_target_height);
        Self {
            request,
            client,
            loader,
            events,
            config,
            generation,
            render,
            logo: LogoArt::placeholder(),
            in_flight: None,
            notice: None,
            torn_down: false,
        }
    }

    /// Recompute and apply the full render state from the current request.
    pub fn bind(&mut self) {
        self.bind_at(Utc::now());
    }

    /// [`bind`](Self::bind) with an explicit clock, for tests.
    pub fn bind_at(&mut self, now: DateTime<Utc>) {
        // A pending request may have quietly expired since it was delivered.
        // Display-only correction; the SDK is never told.
        self.request.expire_if_past(now);
        self.render = RenderState::compute(&self.request, self.config.logo_target_height);

        // Placeholder first; the real art arrives as an event.
        self.logo = LogoArt::placeholder();
        if let Some(url) = self.render.logo_url.clone() {
            self.spawn_logo_load(url);
        }
    }

    /// Handle a key press. Returns navigation for the app shell to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Nav> {
        match key.code {
            KeyCode::Char('r' | 'R') if self.offers_refresh() => {
                self.refresh();
                None
            },
            KeyCode::Esc | KeyCode::Enter if self.notice.is_some() => self.dismiss_notice(),
            KeyCode::Char('a' | 'A') if self.actions_available() => {
                self.dispatch(ApprovalAction::Approve);
                None
            },
            KeyCode::Char('d' | 'D') if self.actions_available() => {
                self.dispatch(ApprovalAction::Deny);
                None
            },
            KeyCode::Esc | KeyCode::Char('q') => Some(Nav::Close),
            _ => None,
        }
    }

    /// Consume an event from background work.
    ///
    /// This is the screen's single resumption point: action outcomes and
    /// logo loads land here, on the UI loop. Events for another generation
    /// or a torn-down screen are dropped.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Nav> {
        if self.torn_down {
            return None;
        }
        match event {
            AppEvent::Action {
                generation,
                action,
                outcome,
            } if generation == self.generation => {
                self.in_flight = None;
                self.apply_outcome(action, outcome)
            },
            AppEvent::Logo { generation, result } if generation == self.generation => {
                match result {
                    Ok(art) => self.logo = art,
                    Err(err) => {
                        warn!(%err, "logo load failed, keeping placeholder");
                        self.logo = LogoArt::placeholder();
                    },
                }
                None
            },
            AppEvent::Action { .. } | AppEvent::Logo { .. } => None,
        }
    }

    /// Advance time-driven state (notice TTL expiry).
    pub fn tick(&mut self) -> Option<Nav> {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            return self.dismiss_notice();
        }
        None
    }

    /// Tear the screen down before navigating away.
    ///
    /// Any active notice is cleared without firing its dismissal
    /// consequence, and later events for this screen become no-ops.
    pub fn teardown(&mut self) {
        self.notice = None;
        self.torn_down = true;
    }

    /// The current render state.
    #[must_use]
    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// The currently displayed logo art.
    #[must_use]
    pub fn logo(&self) -> &LogoArt {
        &self.logo
    }

    /// The active transient notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The action currently running on the background context, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<ApprovalAction> {
        self.in_flight
    }

    /// The request as currently held by the screen.
    #[must_use]
    pub fn request(&self) -> &ApprovalRequest {
        &self.request
    }

    fn actions_available(&self) -> bool {
        // Buttons follow the status table; the in-flight flag additionally
        // closes the double-press window the upstream flow left open.
        self.render.buttons_enabled && self.in_flight.is_none() && !self.torn_down
    }

    fn offers_refresh(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::offers_refresh)
    }

    /// Re-run the full render step with the same in-memory request.
    fn refresh(&mut self) {
        self.notice = None;
        self.bind();
    }

    fn dispatch(&mut self, action: ApprovalAction) {
        if !self.actions_available() {
            return;
        }
        self.in_flight = Some(action);
        self.notice = None;

        let client = Arc::clone(&self.client);
        let request = self.request.clone();
        let events = self.events.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = match action {
                ApprovalAction::Approve => client.approve_request(&request).await,
                ApprovalAction::Deny => client.deny_request(&request).await,
            };
            let outcome = match result {
                Ok(()) => ActionOutcome::Success,
                Err(error) => {
                    let device_registered = client.is_device_registered().await;
                    ActionOutcome::Failure {
                        error,
                        device_registered,
                    }
                },
            };
            // The receiver only goes away when the app is shutting down.
            let _ = events.send(AppEvent::Action {
                generation,
                action,
                outcome,
            });
        });
    }

    fn apply_outcome(&mut self, action: ApprovalAction, outcome: ActionOutcome) -> Option<Nav> {
        match outcome {
            ActionOutcome::Success => {
                self.render.buttons_enabled = false;
                self.notice = Some(Notice::success(
                    action.success_text(),
                    self.config.notice_ttl(),
                ));
                None
            },
            ActionOutcome::Failure {
                error,
                device_registered,
            } => {
                error!(action = action.label(), %error, "approval action failed");
                if device_registered {
                    self.notice = Some(
                        Notice::failure(action.failure_text(), self.config.notice_ttl())
                            .with_action(NoticeAction::Refresh),
                    );
                    None
                } else {
                    // Fatal to this screen: hand over to registration.
                    self.teardown();
                    Some(Nav::Registration(RegistrationReason::DeviceDeleted))
                }
            },
        }
    }

    fn dismiss_notice(&mut self) -> Option<Nav> {
        let notice = self.notice.take()?;
        match notice.kind() {
            NoticeKind::Success => Some(Nav::Close),
            NoticeKind::Failure => None,
        }
    }

    fn spawn_logo_load(&self, url: String) {
        let loader = Arc::clone(&self.loader);
        let events = self.events.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = loader.load(&url).await;
            let _ = events.send(AppEvent::Logo { generation, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use greenlight_core::{ApprovalRequestStatus, AuthError};
    use greenlight_test::{
        MockAuthClient, MockImageLoader, bare_pending_request, pending_request,
        resolved_request, stale_pending_request,
    };
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    struct Harness {
        screen: DetailScreen,
        client: MockAuthClient,
        rx: UnboundedReceiver<AppEvent>,
    }

    fn harness(request: ApprovalRequest, client: MockAuthClient) -> Harness {
        let (tx, rx) = unbounded_channel();
        let loader = MockImageLoader::new(LogoArt::new(vec!["[logo]".to_string()]));
        let mut screen = DetailScreen::new(
            request,
            Arc::new(client.clone()),
            Arc::new(loader),
            tx,
            FrontendConfig::default(),
            0,
        );
        screen.bind();
        Harness { screen, client, rx }
    }

    /// Drive the next background event into the screen.
    async fn pump(h: &mut Harness) -> Option<Nav> {
        let event = h.rx.recv().await.expect("expected a background event");
        h.screen.handle_event(event)
    }

    #[tokio::test]
    async fn stale_pending_request_renders_expired() {
        let h = harness(stale_pending_request(), MockAuthClient::new());
        let state = h.screen.render_state();
        assert_eq!(state.status, ApprovalRequestStatus::Expired);
        assert!(!state.buttons_enabled);
        assert!(
            state
                .status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("Expired at "))
        );
    }

    #[tokio::test]
    async fn resolved_request_never_dispatches() {
        for status in [
            ApprovalRequestStatus::Approved,
            ApprovalRequestStatus::Denied,
            ApprovalRequestStatus::Expired,
        ] {
            let mut h = harness(resolved_request(status), MockAuthClient::new());
            h.screen.handle_key(key('a'));
            h.screen.handle_key(key('d'));
            assert!(h.screen.in_flight().is_none());
            assert!(h.client.approve_calls().is_empty());
            assert!(h.client.deny_calls().is_empty());
        }
    }

    #[tokio::test]
    async fn rebind_is_idempotent() {
        let mut h = harness(resolved_request(ApprovalRequestStatus::Denied), MockAuthClient::new());
        for _ in 0..3 {
            h.screen.bind();
        }
        let state = h.screen.render_state();
        assert_eq!(state.status, ApprovalRequestStatus::Denied);
        assert!(!state.buttons_enabled);
    }

    #[tokio::test]
    async fn no_logos_skips_load() {
        let (tx, mut rx) = unbounded_channel();
        let loader = MockImageLoader::new(LogoArt::new(vec!["[logo]".to_string()]));
        let mut screen = DetailScreen::new(
            bare_pending_request(),
            Arc::new(MockAuthClient::new()),
            Arc::new(loader.clone()),
            tx,
            FrontendConfig::default(),
            0,
        );
        screen.bind();
        assert_eq!(screen.logo(), &LogoArt::placeholder());
        assert!(loader.loaded_urls().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn logo_loads_best_fit_after_placeholder() {
        let mut h = harness(pending_request(), MockAuthClient::new());
        // Placeholder is visible before the load completes.
        assert_eq!(h.screen.logo(), &LogoArt::placeholder());

        assert!(pump(&mut h).await.is_none());
        assert_eq!(h.screen.logo().lines, vec!["[logo]".to_string()]);
        assert_eq!(
            h.screen.render_state().logo_url.as_deref(),
            Some("https://cdn.example.com/logo-40.png")
        );
    }

    #[tokio::test]
    async fn failed_logo_load_keeps_placeholder() {
        let (tx, mut rx) = unbounded_channel();
        let mut screen = DetailScreen::new(
            pending_request(),
            Arc::new(MockAuthClient::new()),
            Arc::new(MockImageLoader::failing()),
            tx,
            FrontendConfig::default(),
            0,
        );
        screen.bind();
        let event = rx.recv().await.expect("expected logo event");
        screen.handle_event(event);
        assert_eq!(screen.logo(), &LogoArt::placeholder());
    }

    #[tokio::test]
    async fn approve_success_flow() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        h.screen.handle_key(key('a'));
        assert_eq!(h.screen.in_flight(), Some(ApprovalAction::Approve));

        assert!(pump(&mut h).await.is_none());
        assert!(h.screen.in_flight().is_none());
        assert!(!h.screen.render_state().buttons_enabled);
        let notice = h.screen.notice().expect("expected success notice");
        assert_eq!(notice.kind(), NoticeKind::Success);
        assert_eq!(h.client.approve_calls().len(), 1);

        // Dismissing the success notice closes the screen.
        let nav = h.screen.handle_key(esc());
        assert_eq!(nav, Some(Nav::Close));
        assert!(h.screen.notice().is_none());
    }

    #[tokio::test]
    async fn deny_success_flow() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        h.screen.handle_key(key('d'));
        assert!(pump(&mut h).await.is_none());
        assert_eq!(h.client.deny_calls().len(), 1);
        let notice = h.screen.notice().expect("expected success notice");
        assert_eq!(notice.text(), "Request denied");
    }

    #[tokio::test]
    async fn success_notice_expiry_closes_screen() {
        let (tx, mut rx) = unbounded_channel();
        let client = MockAuthClient::new();
        let config = FrontendConfig {
            notice_ttl_secs: 0,
            ..FrontendConfig::default()
        };
        let mut screen = DetailScreen::new(
            bare_pending_request(),
            Arc::new(client),
            Arc::new(MockImageLoader::failing()),
            tx,
            config,
            0,
        );
        screen.bind();
        screen.handle_key(key('a'));
        let event = rx.recv().await.expect("expected action event");
        screen.handle_event(event);

        // Zero TTL: the next tick auto-dismisses and closes.
        assert_eq!(screen.tick(), Some(Nav::Close));
    }

    #[tokio::test]
    async fn failure_with_registered_device_offers_refresh() {
        let client = MockAuthClient::new()
            .with_failure(AuthError::Transport("connection reset".to_string()));
        let mut h = harness(bare_pending_request(), client);
        h.screen.handle_key(key('a'));

        assert!(pump(&mut h).await.is_none());
        let notice = h.screen.notice().expect("expected failure notice");
        assert_eq!(notice.kind(), NoticeKind::Failure);
        assert!(notice.offers_refresh());

        // Refresh re-renders the same (still pending) request.
        h.client.clear_failure();
        h.screen.handle_key(key('r'));
        assert!(h.screen.notice().is_none());
        assert!(h.screen.render_state().buttons_enabled);
        assert!(h.screen.request().is_pending());

        // The user can decide again after the refresh.
        h.screen.handle_key(key('a'));
        assert!(pump(&mut h).await.is_none());
        assert_eq!(h.client.approve_calls().len(), 2);
        assert_eq!(
            h.screen.notice().map(Notice::kind),
            Some(NoticeKind::Success)
        );
    }

    #[tokio::test]
    async fn failure_notice_dismissal_does_not_close() {
        let client =
            MockAuthClient::new().with_failure(AuthError::Rejected("stale".to_string()));
        let mut h = harness(bare_pending_request(), client);
        h.screen.handle_key(key('d'));
        assert!(pump(&mut h).await.is_none());

        let nav = h.screen.handle_key(esc());
        assert_eq!(nav, None);
        assert!(h.screen.notice().is_none());
    }

    #[tokio::test]
    async fn failure_with_deregistered_device_navigates_to_registration() {
        let client = MockAuthClient::new()
            .with_failure(AuthError::DeviceDeleted)
            .with_device_registered(false);
        let mut h = harness(bare_pending_request(), client);
        h.screen.handle_key(key('a'));

        let nav = pump(&mut h).await;
        assert_eq!(
            nav,
            Some(Nav::Registration(RegistrationReason::DeviceDeleted))
        );
        // The screen is torn down; no notice survives to offer refresh.
        assert!(h.screen.notice().is_none());
    }

    #[tokio::test]
    async fn double_press_dispatches_once() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        h.screen.handle_key(key('a'));
        h.screen.handle_key(key('a'));
        h.screen.handle_key(key('d'));

        assert!(pump(&mut h).await.is_none());
        assert_eq!(h.client.approve_calls().len(), 1);
        assert!(h.client.deny_calls().is_empty());
        // No second event was queued.
        assert!(h.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stale_outcome_after_teardown_is_noop() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        h.screen.handle_key(key('a'));
        h.screen.teardown();

        let nav = pump(&mut h).await;
        assert_eq!(nav, None);
        assert!(h.screen.notice().is_none());
    }

    #[tokio::test]
    async fn wrong_generation_outcome_is_dropped() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        let nav = h.screen.handle_event(AppEvent::Action {
            generation: 99,
            action: ApprovalAction::Approve,
            outcome: ActionOutcome::Success,
        });
        assert_eq!(nav, None);
        assert!(h.screen.render_state().buttons_enabled);
    }

    #[tokio::test]
    async fn teardown_detaches_notice_without_closing() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        h.screen.handle_key(key('a'));
        assert!(pump(&mut h).await.is_none());
        assert!(h.screen.notice().is_some());

        h.screen.teardown();
        assert!(h.screen.notice().is_none());
        // The expired-notice path must not fire after teardown either.
        assert_eq!(h.screen.tick(), None);
    }

    #[tokio::test]
    async fn quit_key_closes_screen() {
        let mut h = harness(bare_pending_request(), MockAuthClient::new());
        assert_eq!(h.screen.handle_key(key('q')), Some(Nav::Close));
        assert_eq!(
            h.screen.handle_key(esc()),
            Some(Nav::Close)
        );
    }
}
