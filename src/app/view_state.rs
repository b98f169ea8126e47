// ==========================================
// Voltway Industrial OS - View state
// ==========================================
// Owned by the caller (one per UI session), never global
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Hugo,
    Parts,
    Inventory,
    Orders,
    Suppliers,
    Boms,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Dashboard,
        Tab::Hugo,
        Tab::Parts,
        Tab::Inventory,
        Tab::Orders,
        Tab::Suppliers,
        Tab::Boms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Hugo => "hugo",
            Tab::Parts => "parts",
            Tab::Inventory => "inventory",
            Tab::Orders => "orders",
            Tab::Suppliers => "suppliers",
            Tab::Boms => "boms",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub active_tab: Tab,
    /// Key of the record opened in the detail pane
    pub selected_record: Option<String>,
    pub search_text: String,
    pub sidebar_collapsed: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switching tabs drops selection and search; re-selecting is a no-op
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab == tab {
            return;
        }
        self.active_tab = tab;
        self.selected_record = None;
        self.search_text.clear();
    }

    pub fn select(&mut self, key: &str) {
        self.selected_record = Some(key.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_record = None;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn matches(&self, fields: &[&str]) -> bool {
        matches_search(&self.search_text, fields)
    }
}

/// Case-insensitive substring match on any field; blank search matches all
pub fn matches_search(search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_tab_resets_selection_and_search() {
        let mut view = ViewState::new();
        view.switch_tab(Tab::Inventory);
        view.select("P300");
        view.set_search("motor");

        view.switch_tab(Tab::Inventory);
        assert_eq!(view.selected_record.as_deref(), Some("P300"));

        view.switch_tab(Tab::Boms);
        assert_eq!(view.active_tab, Tab::Boms);
        assert!(view.selected_record.is_none());
        assert!(view.search_text.is_empty());
    }

    #[test]
    fn test_sidebar_toggle_survives_tab_switch() {
        let mut view = ViewState::new();
        view.toggle_sidebar();
        view.switch_tab(Tab::Hugo);
        assert!(view.sidebar_collapsed);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert!(matches_search("MOTOR", &["500W Brushless Motor", "assembly"]));
        assert!(matches_search("hard", &["Hex Nut M8", "hardware"]));
        assert!(!matches_search("battery", &["Hex Nut M8", "hardware"]));
        assert!(matches_search("  ", &["anything"]));
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!(Tab::parse("BOMS"), Some(Tab::Boms));
        assert_eq!(Tab::parse("settings"), None);
    }
}
