//! Screen layout definitions

use ratatui::layout::{Constraint, Layout, Rect};

/// Minimum terminal width for full status bar display
pub const MIN_FULL_STATUS_WIDTH: u16 = 60;

/// Below this width a collection page stacks list above form
pub const MIN_SPLIT_WIDTH: u16 = 70;

/// Screen areas for the main layout
pub struct ScreenAreas {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header with page tabs
        Constraint::Min(5),    // Page body
        Constraint::Length(2), // Status bar (1 for border + 1 for content)
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Areas of a collection page
pub struct PageAreas {
    pub list: Rect,
    pub form: Rect,
}

/// Split a collection page into record list and form panel
pub fn split_page(area: Rect) -> PageAreas {
    let chunks = if area.width < MIN_SPLIT_WIDTH {
        Layout::vertical([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area)
    } else {
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area)
    };

    PageAreas {
        list: chunks[0],
        form: chunks[1],
    }
}

/// Check if we should use compact status bar
pub fn use_compact_status(area: Rect) -> bool {
    area.width < MIN_FULL_STATUS_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_covers_area() {
        let areas = create(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.status.height, 2);
        assert_eq!(areas.body.height, 19);
        assert_eq!(areas.status.y + areas.status.height, 24);
    }

    #[test]
    fn test_split_page_side_by_side_when_wide() {
        let areas = split_page(Rect::new(0, 0, 100, 20));
        assert_eq!(areas.list.y, areas.form.y);
        assert!(areas.form.width > areas.list.width);
    }

    #[test]
    fn test_split_page_stacks_when_narrow() {
        let areas = split_page(Rect::new(0, 0, 40, 20));
        assert_eq!(areas.list.x, areas.form.x);
        assert!(areas.form.y > areas.list.y);
    }

    #[test]
    fn test_compact_status_threshold() {
        assert!(use_compact_status(Rect::new(0, 0, 59, 10)));
        assert!(!use_compact_status(Rect::new(0, 0, 60, 10)));
    }
}
