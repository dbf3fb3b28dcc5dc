pub const ADD_CUSTOM_LABEL: &str = "Add Custom...";

pub const DEFAULT_SITES: [&str; 8] = [
    "google.com",
    "youtube.com",
    "facebook.com",
    "instagram.com",
    "x.com",
    "reddit.com",
    "linkedin.com",
    "netflix.com",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    pub selected: bool,
}

impl Site {
    pub fn new(name: impl Into<String>, selected: bool) -> Self {
        Self {
            name: name.into(),
            selected,
        }
    }
}

/// What the cursor currently points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Site(usize),
    AddCustom,
    /// virtual slot one past the last entry
    Start,
}

/// Ordered, togglable site list. The last entry is always the
/// "Add Custom..." sentinel; the cursor may also rest one past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteList {
    sites: Vec<Site>,
    cursor: usize,
}

impl Default for SiteList {
    fn default() -> Self {
        Self::new(DEFAULT_SITES)
    }
}

impl SiteList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sites: Vec<Site> = names.into_iter().map(|n| Site::new(n, false)).collect();
        sites.push(Site::new(ADD_CUSTOM_LABEL, false));
        Self { sites, cursor: 0 }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of entries, sentinel included
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn sentinel_index(&self) -> usize {
        self.sites.len() - 1
    }

    pub fn current_row(&self) -> Row {
        match self.cursor {
            i if i == self.sites.len() => Row::Start,
            i if i == self.sentinel_index() => Row::AddCustom,
            i => Row::Site(i),
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.sites.len() {
            self.cursor += 1;
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Flip the entry under the cursor. The sentinel and the start slot
    /// cannot be toggled.
    pub fn toggle(&mut self) -> bool {
        match self.current_row() {
            Row::Site(i) => {
                self.sites[i].selected = !self.sites[i].selected;
                true
            }
            Row::AddCustom | Row::Start => false,
        }
    }

    /// Insert a selected entry just before the sentinel. Blank names are ignored.
    pub fn insert_custom(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let at = self.sentinel_index();
        self.sites.insert(at, Site::new(name, true));
        true
    }

    pub fn selected_names(&self) -> Vec<&str> {
        self.sites[..self.sentinel_index()]
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_ends_with_sentinel() {
        let list = SiteList::default();
        assert_eq!(list.len(), DEFAULT_SITES.len() + 1);
        assert_eq!(list.sites().last().unwrap().name, ADD_CUSTOM_LABEL);
        assert!(list.sites().iter().all(|s| !s.selected));
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.current_row(), Row::Site(0));
    }

    #[test]
    fn test_cursor_clamps_at_top() {
        let mut list = SiteList::default();
        list.move_up();
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamps_at_start_slot() {
        let mut list = SiteList::new(["a.com"]);
        list.move_down();
        assert_eq!(list.current_row(), Row::AddCustom);
        list.move_down();
        assert_eq!(list.current_row(), Row::Start);
        assert_eq!(list.cursor(), list.len());
        list.move_down();
        assert_eq!(list.cursor(), list.len());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut list = SiteList::default();
        list.move_down();
        assert!(list.toggle());
        assert!(list.sites()[1].selected);
        assert!(list.toggle());
        assert!(!list.sites()[1].selected);
    }

    #[test]
    fn test_toggle_ignores_sentinel_and_start() {
        let mut list = SiteList::new(["a.com"]);
        list.move_down();
        assert!(!list.toggle());
        assert!(!list.sites()[1].selected);
        list.move_down();
        let before = list.clone();
        assert!(!list.toggle());
        assert_eq!(list, before);
    }

    #[test]
    fn test_insert_custom_before_sentinel() {
        let mut list = SiteList::default();
        let before = list.len();
        assert!(list.insert_custom("  example.com  "));
        assert_eq!(list.len(), before + 1);
        let n = list.len();
        assert_eq!(list.sites()[n - 2], Site::new("example.com", true));
        assert_eq!(list.sites()[n - 1].name, ADD_CUSTOM_LABEL);
    }

    #[test]
    fn test_insert_blank_is_ignored() {
        let mut list = SiteList::default();
        let before = list.clone();
        assert!(!list.insert_custom("   "));
        assert_eq!(list, before);
    }

    #[test]
    fn test_sentinel_is_positional() {
        let mut list = SiteList::new(Vec::<String>::new());
        assert!(list.insert_custom(ADD_CUSTOM_LABEL));
        assert_eq!(list.current_row(), Row::Site(0));
        list.move_down();
        assert_eq!(list.current_row(), Row::AddCustom);
    }

    #[test]
    fn test_selected_names() {
        let mut list = SiteList::new(["a.com", "b.com"]);
        list.move_down();
        list.toggle();
        list.insert_custom("c.com");
        assert_eq!(list.selected_names(), vec!["b.com", "c.com"]);
    }
}
