//! Dashboard tab selection.
//!
//! The router only ever offers the visible tab set. Selection goes through a
//! visible position, so a tab the role may not see has no way to be chosen.

use modbrand_core::Logger;
use tracing::debug;

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Submission,
    Pending,
    Settings,
}

impl Tab {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Submission,
        Self::Pending,
        Self::Settings,
    ];

    /// Fixed index: 0=Overview, 1=Submission, 2=Pending, 3=Settings.
    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Submission => 1,
            Self::Pending => 2,
            Self::Settings => 3,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Submission => "Submission",
            Self::Pending => "Pending",
            Self::Settings => "Settings",
        }
    }
}

/// Tabs offered for the given capability.
pub fn visible_tabs(show_pending: bool) -> Vec<Tab> {
    Tab::ALL
        .into_iter()
        .filter(|t| *t != Tab::Pending || show_pending)
        .collect()
}

#[derive(Debug)]
pub struct TabRouter {
    selected: Tab,
    log: Logger,
}

impl TabRouter {
    pub const fn new(log: Logger) -> Self {
        Self {
            selected: Tab::Overview,
            log,
        }
    }

    pub const fn selected(&self) -> Tab {
        self.selected
    }

    /// Position of the selected tab within the visible set.
    pub fn selected_position(&self, show_pending: bool) -> usize {
        visible_tabs(show_pending)
            .iter()
            .position(|t| *t == self.selected)
            .unwrap_or(0)
    }

    /// Select the tab at `position` in the visible set.
    ///
    /// Returns the tab entered, or `None` when nothing changed (out of range,
    /// or already selected). Entering is what triggers on-enter effects.
    pub fn select_visible(&mut self, position: usize, show_pending: bool) -> Option<Tab> {
        let tab = *visible_tabs(show_pending).get(position)?;
        if tab == self.selected {
            return None;
        }
        debug!(parent: self.log.span(), from = ?self.selected, to = ?tab, "Tab change");
        self.selected = tab;
        Some(tab)
    }

    /// Move `delta` steps through the visible set, wrapping around.
    pub fn cycle(&mut self, delta: isize, show_pending: bool) -> Option<Tab> {
        let len = visible_tabs(show_pending).len();
        if len == 0 {
            return None;
        }
        let current = self.selected_position(show_pending);
        let step = delta.unsigned_abs() % len;
        let next = if delta >= 0 {
            (current + step) % len
        } else {
            (current + len - step) % len
        };
        self.select_visible(next, show_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_user_never_sees_pending() {
        let tabs = visible_tabs(false);
        assert_eq!(tabs, vec![Tab::Overview, Tab::Submission, Tab::Settings]);
    }

    #[test]
    fn reviewers_see_all_four() {
        assert_eq!(visible_tabs(true), Tab::ALL.to_vec());
    }

    #[test]
    fn initial_tab_is_overview() {
        let router = TabRouter::new(Logger::disabled());
        assert_eq!(router.selected(), Tab::Overview);
        assert_eq!(router.selected().index(), 0);
    }

    #[test]
    fn position_two_is_settings_without_pending() {
        let mut router = TabRouter::new(Logger::disabled());
        assert_eq!(router.select_visible(2, false), Some(Tab::Settings));
        assert_eq!(router.select_visible(3, false), None);
        assert_eq!(router.selected(), Tab::Settings);
    }

    #[test]
    fn cycling_never_reaches_pending_without_capability() {
        let mut router = TabRouter::new(Logger::disabled());
        for _ in 0..10 {
            router.cycle(1, false);
            assert_ne!(router.selected(), Tab::Pending);
        }
        for _ in 0..10 {
            router.cycle(-1, false);
            assert_ne!(router.selected(), Tab::Pending);
        }
    }

    #[test]
    fn cycling_wraps_for_reviewers() {
        let mut router = TabRouter::new(Logger::disabled());
        assert_eq!(router.cycle(-1, true), Some(Tab::Settings));
        assert_eq!(router.cycle(-1, true), Some(Tab::Pending));
        assert_eq!(router.cycle(2, true), Some(Tab::Overview));
    }

    #[test]
    fn reselecting_current_tab_is_not_an_entry() {
        let mut router = TabRouter::new(Logger::disabled());
        assert_eq!(router.select_visible(0, true), None);
    }
}
