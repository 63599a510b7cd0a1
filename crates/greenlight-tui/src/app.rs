//! App shell: navigation and the UI event loop.
//!
//! One UI loop owns all screen state. Key events, background events
//! (action outcomes, logo loads), and a tick interval are multiplexed with
//! `tokio::select!`; screens answer with [`Nav`] values the shell applies.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;

use greenlight_core::{ApprovalRequest, AuthClient, ImageLoader};

use crate::config::FrontendConfig;
use crate::error::{FrontendError, FrontendResult};
use crate::event::{AppEvent, Nav};
use crate::registration::RegistrationScreen;
use crate::render;
use crate::screen::DetailScreen;
use crate::terminal::Term;
use crate::theme::Theme;

/// The screen currently shown.
pub enum Route {
    /// The approval-request detail screen.
    Detail(DetailScreen),
    /// The registration screen.
    Registration(RegistrationScreen),
}

/// Application state for one frontend run.
pub struct App {
    route: Route,
    theme: Theme,
    config: FrontendConfig,
    should_quit: bool,
    quit_pending: bool,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: Option<UnboundedReceiver<AppEvent>>,
}

impl App {
    /// Create the app showing the detail screen for `request`.
    #[must_use]
    pub fn new(
        request: ApprovalRequest,
        client: Arc<dyn AuthClient>,
        loader: Arc<dyn ImageLoader>,
        config: FrontendConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut screen = DetailScreen::new(
            request,
            client,
            loader,
            events_tx.clone(),
            config.clone(),
            0,
        );
        screen.bind();

        Self {
            route: Route::Detail(screen),
            theme: Theme::default(),
            config,
            should_quit: false,
            quit_pending: false,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// The current route.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the app has been asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the UI loop until the screen closes.
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::Terminal`] when drawing or reading input
    /// fails.
    pub async fn run(&mut self, terminal: &mut Term) -> FrontendResult<()> {
        let mut events = self
            .events_rx
            .take()
            .ok_or_else(|| FrontendError::Terminal("event loop already running".to_string()))?;
        let mut keys = crossterm::event::EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.tick_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.should_quit {
            terminal
                .draw(|frame| render::render_frame(frame, self))
                .map_err(|e| FrontendError::Terminal(e.to_string()))?;

            tokio::select! {
                maybe_key = keys.next() => match maybe_key {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(FrontendError::Terminal(e.to_string())),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_app_event(event),
                _ = ticker.tick() => self.tick(),
            }
        }
        Ok(())
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::KeyModifiers;

        // Double Ctrl+C confirms quit, anywhere.
        if matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c' | 'd'), KeyModifiers::CONTROL)
        ) {
            if self.quit_pending {
                self.quit();
            } else {
                self.quit_pending = true;
            }
            return;
        }
        self.quit_pending = false;

        let nav = match &mut self.route {
            Route::Detail(screen) => screen.handle_key(key),
            Route::Registration(screen) => screen.handle_key(key),
        };
        if let Some(nav) = nav {
            self.apply_nav(nav);
        }
    }

    /// Consume one background event.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        let nav = match &mut self.route {
            Route::Detail(screen) => screen.handle_event(event),
            Route::Registration(_) => None,
        };
        if let Some(nav) = nav {
            self.apply_nav(nav);
        }
    }

    /// Advance time-driven state.
    pub fn tick(&mut self) {
        let nav = match &mut self.route {
            Route::Detail(screen) => screen.tick(),
            Route::Registration(_) => None,
        };
        if let Some(nav) = nav {
            self.apply_nav(nav);
        }
    }

    fn apply_nav(&mut self, nav: Nav) {
        match nav {
            Nav::Close => self.quit(),
            Nav::Registration(reason) => {
                if let Route::Detail(screen) = &mut self.route {
                    screen.teardown();
                }
                self.route = Route::Registration(RegistrationScreen::new(reason));
            },
        }
    }

    fn quit(&mut self) {
        if let Route::Detail(screen) = &mut self.route {
            screen.teardown();
        }
        self.should_quit = true;
    }

    /// Sender for background events; used when spawning extra work from
    /// outside the screens (tests, demo harness).
    #[must_use]
    pub fn events_tx(&self) -> UnboundedSender<AppEvent> {
        self.events_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use greenlight_core::{AuthError, RegistrationReason};
    use greenlight_test::{MockAuthClient, MockImageLoader, bare_pending_request};

    fn mk_app(client: MockAuthClient) -> App {
        App::new(
            bare_pending_request(),
            Arc::new(client),
            Arc::new(MockImageLoader::failing()),
            FrontendConfig::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn quit_key_sets_should_quit_and_tears_down() {
        let mut app = mk_app(MockAuthClient::new());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn double_ctrl_c_quits() {
        let mut app = mk_app(MockAuthClient::new());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_key(ctrl_c);
        assert!(!app.should_quit());
        app.handle_key(ctrl_c);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn other_key_resets_quit_pending() {
        let mut app = mk_app(MockAuthClient::new());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_key(ctrl_c);
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(ctrl_c);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn deregistration_failure_routes_to_registration() {
        let client = MockAuthClient::new()
            .with_failure(AuthError::DeviceDeleted)
            .with_device_registered(false);
        let mut app = mk_app(client);
        let mut rx = app.events_rx.take().expect("receiver available");

        app.handle_key(key(KeyCode::Char('a')));
        let event = rx.recv().await.expect("expected action outcome");
        app.handle_app_event(event);

        match app.route() {
            Route::Registration(screen) => {
                assert_eq!(screen.reason(), RegistrationReason::DeviceDeleted);
            },
            Route::Detail(_) => panic!("expected registration route"),
        }
        assert!(!app.should_quit());

        // Leaving the registration screen ends the run.
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn success_flow_closes_app_after_dismissal() {
        let mut app = mk_app(MockAuthClient::new());
        let mut rx = app.events_rx.take().expect("receiver available");

        app.handle_key(key(KeyCode::Char('a')));
        let event = rx.recv().await.expect("expected action outcome");
        app.handle_app_event(event);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }
}
