//! Confirm dialog state
//!
//! Data model for yes/no dialogs. The rendering widget lives in
//! `estate-tui`'s `widgets/confirm_dialog.rs`.

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Button labels with the message each one sends
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
        }
    }

    /// Quit while some forms hold unsaved changes
    pub fn quit_confirmation(unsaved_forms: usize) -> Self {
        let message = if unsaved_forms == 1 {
            "1 form has unsaved changes.".to_string()
        } else {
            format!("{} forms have unsaved changes.", unsaved_forms)
        };
        Self::new(
            "Quit Estate Admin?",
            message,
            vec![
                ("Quit", Message::ConfirmQuit),
                ("Cancel", Message::CancelQuit),
            ],
        )
    }

    /// Delete one record; the dialog names the record by its summary title
    pub fn delete_confirmation(
        kind: estate_core::EntityKind,
        id: &str,
        title: &str,
    ) -> Self {
        let name = if title.trim().is_empty() { id } else { title };
        Self::new(
            format!("Delete {}?", kind.singular()),
            format!("\"{}\" will be removed permanently.", name),
            vec![
                (
                    "Delete",
                    Message::ConfirmDelete {
                        kind,
                        id: id.to_string(),
                    },
                ),
                ("Cancel", Message::CancelDialog),
            ],
        )
    }

    pub fn select_by(&mut self, delta: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Message of the highlighted option
    pub fn selected_message(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, msg)| msg.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::EntityKind;

    #[test]
    fn test_quit_confirmation_wording() {
        assert_eq!(
            ConfirmDialogState::quit_confirmation(1).message,
            "1 form has unsaved changes."
        );
        assert_eq!(
            ConfirmDialogState::quit_confirmation(3).message,
            "3 forms have unsaved changes."
        );
    }

    #[test]
    fn test_delete_confirmation_options() {
        let dialog = ConfirmDialogState::delete_confirmation(EntityKind::Plot, "p9", "");
        assert!(dialog.message.contains("p9"));
        assert!(matches!(
            dialog.selected_message(),
            Some(Message::ConfirmDelete { kind: EntityKind::Plot, ref id }) if id == "p9"
        ));
    }

    #[test]
    fn test_selection_wraps() {
        let mut dialog = ConfirmDialogState::quit_confirmation(1);
        dialog.select_by(1);
        assert!(matches!(
            dialog.selected_message(),
            Some(Message::CancelQuit)
        ));
        dialog.select_by(1);
        assert!(matches!(
            dialog.selected_message(),
            Some(Message::ConfirmQuit)
        ));
        dialog.select_by(-1);
        assert_eq!(dialog.selected, 1);
    }
}
