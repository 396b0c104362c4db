use crate::model::Product;
use ratatui::widgets::ListState;

pub const DRAWER_ENTRIES: [&str; 2] = ["Catalog", "About"];

#[derive(PartialEq, Clone, Copy)]
pub enum Focus {
    Drawer,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Feed,
}

/// What the main pane shows. The detail screen carries its Product by
/// value: it owns a copy of the selected row and never re-fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Tabs,
    Detail(Product),
    About,
}

pub struct AppState {
    // Data
    pub products: Vec<Product>,
    pub loading: bool,

    // UI State
    pub screen: Screen,
    pub tab: Tab,
    pub list_state: ListState,
    pub drawer_state: ListState,
    pub active_focus: Focus,
    pub message: String,

    /// Bumped whenever the catalog screen mounts or unmounts. A fetch
    /// completion is applied only if it still matches; completions issued
    /// under an earlier mount are dropped.
    pub mount_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        let mut d_state = ListState::default();
        d_state.select(Some(0));

        Self {
            products: vec![],
            loading: true,
            screen: Screen::Tabs,
            tab: Tab::Home,
            list_state: l_state,
            drawer_state: d_state,
            active_focus: Focus::Main,
            message: "Loading products...".to_string(),
            mount_seq: 1,
        }
    }

    /// Handle a fetch completion. Returns false when the completion is
    /// stale, i.e. the screen it was issued for has been torn down.
    pub fn apply_catalog(&mut self, seq: u64, products: Vec<Product>) -> bool {
        if seq != self.mount_seq {
            return false;
        }
        self.products = products;
        self.loading = false;
        self.message = format!("Loaded {} products.", self.products.len());

        let len = self.products.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
        true
    }

    /// Leave the tab stack for the About screen. The catalog screen is
    /// unmounted: its list is dropped and any fetch still in flight is
    /// invalidated by the sequence bump.
    pub fn open_about(&mut self) {
        if self.screen == Screen::About {
            return;
        }
        self.mount_seq += 1;
        self.products.clear();
        self.loading = false;
        self.list_state.select(Some(0));
        self.screen = Screen::About;
    }

    /// Return from About to the tab stack. The catalog screen re-mounts,
    /// which costs exactly one new fetch; returns its sequence number.
    pub fn open_catalog(&mut self) -> Option<u64> {
        if self.screen != Screen::About {
            return None;
        }
        self.mount_seq += 1;
        self.products.clear();
        self.loading = true;
        self.list_state.select(Some(0));
        self.message = "Loading products...".to_string();
        self.screen = Screen::Tabs;
        self.tab = Tab::Home;
        Some(self.mount_seq)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        if let Some(idx) = self.list_state.selected() {
            self.products.get(idx)
        } else {
            None
        }
    }

    /// Push the detail screen for the highlighted row, copying it into the
    /// navigation parameters.
    pub fn open_detail(&mut self) {
        if let Some(product) = self.selected_product().cloned() {
            self.screen = Screen::Detail(product);
        }
    }

    /// Pop the detail screen. The list underneath stayed mounted, so no
    /// refetch happens.
    pub fn close_detail(&mut self) {
        if matches!(self.screen, Screen::Detail(_)) {
            self.screen = Screen::Tabs;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Main => Focus::Drawer,
            Focus::Drawer => Focus::Main,
        }
    }

    fn browsing_list(&self) -> bool {
        self.screen == Screen::Tabs && self.tab == Tab::Home
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Main => {
                if !self.browsing_list() || self.products.is_empty() {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i >= self.products.len() - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
            }
            Focus::Drawer => {
                let len = DRAWER_ENTRIES.len();
                let i = match self.drawer_state.selected() {
                    Some(i) => {
                        if i >= len - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.drawer_state.select(Some(i));
            }
        }
    }

    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Main => {
                if !self.browsing_list() || self.products.is_empty() {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            self.products.len() - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
            }
            Focus::Drawer => {
                let len = DRAWER_ENTRIES.len();
                let i = match self.drawer_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            len - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.drawer_state.select(Some(i));
            }
        }
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.active_focus == Focus::Main && self.browsing_list() && !self.products.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state
                .select(Some((current + step).min(self.products.len() - 1)));
        }
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.active_focus == Focus::Main && self.browsing_list() && !self.products.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.saturating_sub(step)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_product(id: u64) -> Product {
        Product {
            id,
            name: Some(format!("Product {}", id)),
            brand: Some("maybelline".to_string()),
            price: Some("9.99".to_string()),
            image_link: None,
            product_type: Some("lipstick".to_string()),
            description: Some("A lipstick.".to_string()),
        }
    }

    fn loaded_state(count: u64) -> AppState {
        let mut state = AppState::new();
        let seq = state.mount_seq;
        state.apply_catalog(seq, (0..count).map(dummy_product).collect());
        state
    }

    fn remount(state: &mut AppState) -> u64 {
        state.open_about();
        state.open_catalog().unwrap()
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = loaded_state(3);
        state.list_state.select(Some(0));

        state.next();
        assert_eq!(state.list_state.selected(), Some(1));
        state.next();
        assert_eq!(state.list_state.selected(), Some(2));
        state.next(); // Wrap to 0
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = loaded_state(3);
        state.list_state.select(Some(0));

        state.previous(); // Wrap to last (2)
        assert_eq!(state.list_state.selected(), Some(2));
        state.previous();
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = loaded_state(0);

        // Should not panic
        state.next();
        state.previous();
        state.jump_forward(10);
        state.open_detail();
        assert_eq!(state.screen, Screen::Tabs);
    }

    #[test]
    fn test_apply_catalog_clears_loading() {
        let mut state = AppState::new();
        assert!(state.loading);

        let seq = state.mount_seq;
        assert!(state.apply_catalog(seq, vec![]));
        assert!(!state.loading);
        assert!(state.products.is_empty());
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_apply_catalog_clamps_selection() {
        let mut state = loaded_state(10);
        state.list_state.select(Some(9));

        // A re-mounted screen can come back with fewer items.
        let seq = remount(&mut state);
        state.apply_catalog(seq, (0..3).map(dummy_product).collect());
        assert_eq!(state.list_state.selected(), Some(0));

        state.list_state.select(Some(9));
        let seq = remount(&mut state);
        state.apply_catalog(seq, (0..3).map(dummy_product).collect());
        assert!(state.list_state.selected().unwrap() < 3);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut state = AppState::new();
        let old_seq = state.mount_seq;

        // Screen unmounts while the fetch is still in flight.
        state.open_about();
        assert!(!state.apply_catalog(old_seq, vec![dummy_product(1)]));
        assert!(state.products.is_empty());

        // Remount issues a new sequence; only that one lands.
        let new_seq = state.open_catalog().unwrap();
        assert!(!state.apply_catalog(old_seq, vec![dummy_product(1)]));
        assert!(state.apply_catalog(new_seq, vec![dummy_product(2), dummy_product(3)]));
        assert_eq!(state.products.len(), 2);
    }

    #[test]
    fn test_remount_resets_and_fetches_once() {
        let mut state = loaded_state(5);

        state.open_about();
        assert_eq!(state.screen, Screen::About);
        assert!(state.products.is_empty());

        let seq = state.open_catalog().unwrap();
        assert_eq!(state.screen, Screen::Tabs);
        assert!(state.loading);
        assert!(state.products.is_empty()); // No accumulation across mounts

        // Selecting Catalog again while already mounted is not a remount.
        assert_eq!(state.open_catalog(), None);
        assert_eq!(state.mount_seq, seq);
    }

    #[test]
    fn test_detail_carries_selected_product_verbatim() {
        let mut state = loaded_state(4);
        state.list_state.select(Some(2));

        let expected = state.products[2].clone();
        state.open_detail();
        match &state.screen {
            Screen::Detail(p) => assert_eq!(*p, expected),
            other => panic!("expected detail screen, got {:?}", other),
        }

        state.close_detail();
        assert_eq!(state.screen, Screen::Tabs);
        assert_eq!(state.products.len(), 4); // Back pops without refetch
    }
}
