//! Custom widget components

mod chat_panel;
mod confirm_dialog;
mod form_panel;
mod header;
mod login;
pub mod modal_overlay;
mod overview;
mod record_list;
mod status_bar;
mod tabs;

pub use chat_panel::ChatPanel;
pub use confirm_dialog::ConfirmDialog;
pub use form_panel::FormPanel;
pub use header::MainHeader;
pub use login::LoginForm;
pub use overview::OverviewTable;
pub use record_list::RecordList;
pub use status_bar::StatusBar;
pub use tabs::PageTabs;
