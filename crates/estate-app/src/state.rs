//! Application state (Model in TEA pattern)

use std::collections::BTreeMap;

use estate_core::{EntityKind, PreviewRegistry};

use crate::chat::ChatState;
use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::handler::ListFetch;
use crate::list_view::ListOwner;
use crate::login::LoginState;
use crate::message::Message;
use crate::overview::Overview;
use crate::page::{Page, PageState};

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// No valid token: email / password screen
    #[default]
    Login,

    /// Header tabs with the dashboard, collection pages and chat
    Normal,

    /// Confirmation dialog over the current page
    ConfirmDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,

    /// Visible page behind the header tabs
    pub page: Page,

    /// One page per collection, created lazily
    pub pages: BTreeMap<EntityKind, PageState>,

    pub overview: Overview,
    pub login: LoginState,
    pub chat: ChatState,
    pub settings: Settings,
    pub confirm_dialog_state: Option<ConfirmDialogState>,

    /// Live previews of pending uploads across all forms
    pub previews: PreviewRegistry,

    pub phase: AppPhase,
}

impl AppState {
    pub fn new(settings: Settings, logged_in: bool) -> Self {
        Self {
            ui_mode: if logged_in {
                UiMode::Normal
            } else {
                UiMode::Login
            },
            page: Page::Dashboard,
            pages: BTreeMap::new(),
            overview: Overview::new(),
            login: LoginState::default(),
            chat: ChatState::default(),
            settings,
            confirm_dialog_state: None,
            previews: PreviewRegistry::new(),
            phase: AppPhase::Running,
        }
    }

    /// First message to process once the event loop runs
    pub fn startup_message(&self) -> Option<Message> {
        match self.ui_mode {
            UiMode::Login => None,
            _ => Some(Message::RefreshAll),
        }
    }

    pub fn page_state(&self, kind: EntityKind) -> Option<&PageState> {
        self.pages.get(&kind)
    }

    pub fn page_mut(&mut self, kind: EntityKind) -> &mut PageState {
        self.pages
            .entry(kind)
            .or_insert_with(|| PageState::new(kind))
    }

    /// Collection page currently shown, if the visible page is one
    pub fn current_kind(&self) -> Option<EntityKind> {
        match self.page {
            Page::Collection(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn current_page_mut(&mut self) -> Option<&mut PageState> {
        let kind = self.current_kind()?;
        Some(self.page_mut(kind))
    }

    /// Start a refresh of every list subscribed to `kind`
    ///
    /// The overview always listens; the collection page only once it has
    /// been opened.
    pub fn begin_refresh(&mut self, kind: EntityKind) -> ListFetch {
        let mut subscribers = vec![(
            ListOwner::Overview,
            self.overview.list_mut(kind).begin_refresh(),
        )];
        if let Some(page) = self.pages.get_mut(&kind) {
            subscribers.push((ListOwner::Page, page.list.begin_refresh()));
        }
        ListFetch { kind, subscribers }
    }

    /// Number of forms with unsaved changes
    pub fn dirty_forms(&self) -> usize {
        self.pages.values().filter(|page| page.dirty).count()
    }

    /// Files loaded into forms and not yet sent or discarded
    pub fn pending_uploads(&self) -> usize {
        self.previews.live_count()
    }

    // ─────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────

    /// Request to quit, asking first when forms hold unsaved changes
    pub fn request_quit(&mut self) {
        let dirty = self.dirty_forms();
        if dirty > 0 && self.settings.behavior.confirm_quit {
            self.show_dialog(ConfirmDialogState::quit_confirmation(dirty));
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    /// Confirm quit (from confirmation dialog)
    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Cancel quit (from confirmation dialog)
    pub fn cancel_quit(&mut self) {
        self.close_dialog();
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    // ─────────────────────────────────────────────────────────
    // Dialog
    // ─────────────────────────────────────────────────────────

    pub fn show_dialog(&mut self, dialog: ConfirmDialogState) {
        self.confirm_dialog_state = Some(dialog);
        self.ui_mode = UiMode::ConfirmDialog;
    }

    pub fn close_dialog(&mut self) {
        self.confirm_dialog_state = None;
        if self.ui_mode == UiMode::ConfirmDialog {
            self.ui_mode = UiMode::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_depends_on_login() {
        let state = AppState::new(Settings::default(), false);
        assert_eq!(state.ui_mode, UiMode::Login);
        assert!(state.startup_message().is_none());

        let state = AppState::new(Settings::default(), true);
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(matches!(state.startup_message(), Some(Message::RefreshAll)));
    }

    #[test]
    fn test_pending_uploads_follow_preview_handles() {
        let state = AppState::new(Settings::default(), true);
        assert_eq!(state.pending_uploads(), 0);

        let handle = state.previews.acquire("plan.png");
        assert_eq!(state.pending_uploads(), 1);
        drop(handle);
        assert_eq!(state.pending_uploads(), 0);
    }

    #[test]
    fn test_refresh_subscribers() {
        let mut state = AppState::new(Settings::default(), true);
        let fetch = state.begin_refresh(EntityKind::Blog);
        assert_eq!(fetch.subscribers, vec![(ListOwner::Overview, 1)]);

        state.page_mut(EntityKind::Blog);
        let fetch = state.begin_refresh(EntityKind::Blog);
        assert_eq!(
            fetch.subscribers,
            vec![(ListOwner::Overview, 2), (ListOwner::Page, 1)]
        );
    }

    #[test]
    fn test_quit_without_unsaved_changes() {
        let mut state = AppState::new(Settings::default(), true);
        state.request_quit();
        assert!(state.should_quit());
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks() {
        let mut state = AppState::new(Settings::default(), true);
        state.page_mut(EntityKind::Banner).dirty = true;
        state.request_quit();
        assert!(!state.should_quit());
        assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

        state.cancel_quit();
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(state.confirm_dialog_state.is_none());
    }
}
