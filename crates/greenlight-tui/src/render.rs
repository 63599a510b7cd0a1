//! Render-state computation and frame rendering.
//!
//! Every bind recomputes a [`RenderState`] from the request and applies it
//! to the widgets in one pass; there is no widget-held state to drift.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap};

use greenlight_core::{ApprovalRequest, ApprovalRequestStatus, RequestDetail};

use crate::app::{App, Route};
use crate::markup;
use crate::notice::{Notice, NoticeKind};
use crate::registration::RegistrationScreen;
use crate::screen::DetailScreen;
use crate::theme::Theme;

/// Everything the detail screen draws, recomputed on each bind.
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Status after the local expiry correction.
    pub status: ApprovalRequestStatus,
    /// Message body as rich text lines (empty message renders empty).
    pub message: Vec<Line<'static>>,
    /// Attribute rows, in service order.
    pub details: Vec<RequestDetail>,
    /// Whether the approve/deny buttons are enabled and visible.
    pub buttons_enabled: bool,
    /// Status area text; `None` means the area is hidden.
    pub status_message: Option<String>,
    /// Best-fit logo URL to load, `None` when the request has no logos.
    pub logo_url: Option<String>,
}

impl RenderState {
    /// Compute the render state for `request`.
    ///
    /// The caller applies the expiry correction to the request first; this
    /// function is pure.
    #[must_use]
    pub fn compute(request: &ApprovalRequest, logo_target_height: u32) -> Self {
        let status = request.status;
        let status_message = match status {
            ApprovalRequestStatus::Pending => None,
            ApprovalRequestStatus::Expired => Some(format!(
                "Expired at {}",
                format_expiration(request.expires_at)
            )),
            ApprovalRequestStatus::Approved => Some("Request approved".to_string()),
            ApprovalRequestStatus::Denied => Some("Request denied".to_string()),
        };

        Self {
            status,
            message: markup::to_lines(&request.message),
            details: request.details.clone(),
            buttons_enabled: status.is_pending(),
            status_message,
            logo_url: request
                .best_fit_logo(logo_target_height)
                .map(|logo| logo.url.clone()),
        }
    }
}

/// Fixed, locale-independent expiration time format.
pub(crate) fn format_expiration(at: DateTime<Utc>) -> String {
    at.format("%b %e, %Y %H:%M UTC").to_string()
}

/// Render the whole frame.
pub(crate) fn render_frame(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    match app.route() {
        Route::Detail(screen) => render_detail(frame, frame.area(), screen, theme),
        Route::Registration(screen) => render_registration(frame, frame.area(), screen, theme),
    }
}

fn render_detail(frame: &mut Frame, area: Rect, screen: &DetailScreen, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .title(" Approval Request ")
        .title_bottom(
            Line::from(Span::styled(" q: close ", Style::default().fg(theme.muted)))
                .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = screen.render_state();
    let logo_rows = u16::try_from(screen.logo().height()).unwrap_or(5);
    let detail_rows = u16::try_from(state.details.len()).unwrap_or(u16::MAX).saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo_rows),
            Constraint::Min(3),
            Constraint::Length(detail_rows),
            Constraint::Length(3),
        ])
        .split(inner);

    // Logo: placeholder or loaded art, centered.
    let logo_lines: Vec<Line<'_>> = screen
        .logo()
        .lines
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(theme.accent))))
        .collect();
    frame.render_widget(
        Paragraph::new(logo_lines).alignment(Alignment::Center),
        chunks[0],
    );

    // Message body.
    frame.render_widget(
        Paragraph::new(Text::from(state.message.clone()))
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center),
        chunks[1],
    );

    // Attribute rows.
    let label_width = state
        .details
        .iter()
        .map(|detail| detail.label.len())
        .max()
        .unwrap_or(0);
    let rows: Vec<ListItem<'_>> = state
        .details
        .iter()
        .map(|detail| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>label_width$}  ", detail.label),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(detail.value.clone(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(rows).block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.muted))),
        chunks[2],
    );

    // Action bar or status area.
    render_action_area(frame, chunks[3], screen, theme);

    // Transient notice, drawn last so it overlays the action bar.
    if let Some(notice) = screen.notice() {
        render_notice(frame, inner, notice, theme);
    }
}

fn render_action_area(frame: &mut Frame, area: Rect, screen: &DetailScreen, theme: &Theme) {
    let state = screen.render_state();

    let line = if state.buttons_enabled {
        if screen.in_flight().is_some() {
            Line::from(Span::styled(
                "Sending decision...",
                Style::default().fg(theme.muted),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    " [A] Approve ",
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    " [D] Deny ",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                ),
            ])
        }
    } else {
        let color = match state.status {
            ApprovalRequestStatus::Approved => theme.success,
            ApprovalRequestStatus::Denied => theme.error,
            ApprovalRequestStatus::Expired | ApprovalRequestStatus::Pending => theme.warning,
        };
        Line::from(Span::styled(
            state.status_message.clone().unwrap_or_default(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.muted))),
        area,
    );
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let banner = bottom_banner(area, 3);
    let color = match notice.kind() {
        NoticeKind::Success => theme.success,
        NoticeKind::Failure => theme.error,
    };

    let mut spans = vec![Span::styled(
        notice.text().to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(action) = notice.action() {
        spans.push(Span::styled(
            format!("  [R] {}", action.label()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        "  Esc: dismiss",
        Style::default().fg(theme.muted),
    ));

    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            ),
        banner,
    );
}

fn render_registration(frame: &mut Frame, area: Rect, screen: &RegistrationScreen, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .title(" Registration Required ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            screen.reason().message(),
            Style::default().fg(theme.text),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Run the registration flow from the host application, then try again.",
            Style::default().fg(theme.muted),
        )),
        Line::default(),
        Line::from(Span::styled(
            " [Q] Close ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// A banner strip pinned to the bottom of `area`.
fn bottom_banner(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y.saturating_add(area.height.saturating_sub(height)),
        width: area.width,
        height,
    }
}
