// src/core/menu.rs

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::constants::{DEFAULT_BREAK_HINT, DEFAULT_BREAK_KEY, EMPTY_HINT, MIN_MENU_ENTRIES};
use crate::core::commons::{clean, clean_or};
use crate::core::entries::EntryRegistry;
use crate::core::error::{MenuError, MenuWarning};
use crate::core::system::{MenuSystem, SystemShared};
use crate::core::validation;
use crate::models::{Action, Entry};

/// The mutable state behind a [`Menu`] handle.
#[derive(Debug)]
pub(crate) struct MenuNode {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) entries: EntryRegistry,
    pub(crate) parent: Option<Weak<RefCell<MenuNode>>>,
    pub(crate) display_order: Vec<String>,
    pub(crate) finalized: bool,
    pub(crate) modified: bool,
    pub(crate) running: bool,
    pub(crate) killed: bool,
    pub(crate) choose_one: bool,
    pub(crate) main_menu: bool,
    pub(crate) reverse_sort: bool,
    pub(crate) skip_next_pause: bool,
}

impl MenuNode {
    pub(crate) fn new(id: i64, title: String, main_menu: bool) -> Self {
        Self {
            id,
            title,
            entries: EntryRegistry::default(),
            parent: None,
            display_order: Vec::new(),
            finalized: false,
            modified: false,
            running: false,
            killed: false,
            choose_one: false,
            main_menu,
            reverse_sort: false,
            skip_next_pause: false,
        }
    }

    /// A menu only counts as modified once it has been finalized.
    fn mark_modified(&mut self) {
        self.modified = self.finalized;
    }

    pub(crate) fn set_running(&mut self, value: bool) {
        self.running = value;
        self.skip_next_pause = false;
    }

    fn parent_node(&self) -> Option<Rc<RefCell<Self>>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}

/// A handle to one menu of a [`MenuSystem`].
///
/// Handles are cheap to clone and all point at the same menu, so actions can
/// capture them and reshape menus while the menu system is running.
#[derive(Clone)]
pub struct Menu {
    pub(crate) node: Rc<RefCell<MenuNode>>,
    pub(crate) system: Weak<SystemShared>,
}

impl Menu {
    pub(crate) fn new(node: MenuNode, system: Weak<SystemShared>) -> Self {
        Self {
            node: Rc::new(RefCell::new(node)),
            system,
        }
    }

    // --- Queries ---

    /// Unique within the menu system.
    pub fn id(&self) -> i64 {
        self.node.borrow().id
    }

    /// Shown as the last part of the breadcrumb.
    pub fn title(&self) -> String {
        self.node.borrow().title.clone()
    }

    /// The key that quits this menu, once a break entry is set.
    pub fn quit_value(&self) -> Option<String> {
        self.node.borrow().entries.quit_value().map(str::to_string)
    }

    /// True for the first menu created in its menu system.
    pub fn is_main_menu(&self) -> bool {
        self.node.borrow().main_menu
    }

    /// True while the menu's input loop is open.
    pub fn is_running(&self) -> bool {
        self.node.borrow().running
    }

    /// True once the menu passed validation.
    pub fn is_finalized(&self) -> bool {
        self.node.borrow().finalized
    }

    /// True when the last finalize failed; the menu refuses to run.
    pub fn is_killed(&self) -> bool {
        self.node.borrow().killed
    }

    /// True when the menu closes after a single choice.
    pub fn is_choose_one(&self) -> bool {
        self.node.borrow().choose_one
    }

    /// True when keys are listed in descending order.
    pub fn is_sort_descending(&self) -> bool {
        self.node.borrow().reverse_sort
    }

    /// A copy of the regular entry registered under `key`.
    pub fn entry(&self, key: &str) -> Option<Entry> {
        self.node.borrow().entries.get(clean(key)).cloned()
    }

    /// A copy of the break entry.
    pub fn break_entry(&self) -> Option<Entry> {
        self.node.borrow().entries.break_entry().cloned()
    }

    /// Number of entries, the break entry included.
    pub fn entry_count(&self) -> usize {
        self.node.borrow().entries.len()
    }

    /// Keys in the order they are rendered. Empty until finalized.
    pub fn display_order(&self) -> Vec<String> {
        self.node.borrow().display_order.clone()
    }

    /// The menu this one was added to as a submenu.
    pub fn parent(&self) -> Option<Self> {
        let parent = self.node.borrow().parent_node()?;
        Some(Self {
            node: parent,
            system: self.system.clone(),
        })
    }

    /// True when both handles point at the same menu.
    pub fn same_menu(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Titles from the outermost ancestor down to this menu.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut titles = vec![self.title()];
        let mut current = self.node.borrow().parent_node();
        while let Some(node) = current {
            let node = node.borrow();
            titles.push(node.title.clone());
            current = node.parent_node();
        }
        titles.reverse();
        titles
    }

    // --- Entry registry ---

    /// Adds an entry running `action`. Re-adding a key replaces its entry;
    /// the duplicate is reported when the menu is next finalized.
    pub fn add_entry(
        &self,
        key: &str,
        hint: &str,
        action: impl Fn() + 'static,
    ) -> Result<(), MenuError> {
        self.add_entry_action(key, hint, Action::call(action))
    }

    /// Same as [`Menu::add_entry`] for an already built [`Action`].
    pub fn add_entry_action(&self, key: &str, hint: &str, action: Action) -> Result<(), MenuError> {
        let result = self.insert_entry(key, hint, action, false, "add_entry");
        self.reported(result)
    }

    fn insert_entry(
        &self,
        key: &str,
        hint: &str,
        action: Action,
        is_sub_menu_entry: bool,
        operation: &'static str,
    ) -> Result<(), MenuError> {
        let key = clean(key);
        let mut node = self.node.borrow_mut();
        if key.is_empty() {
            return Err(MenuError::EmptyKey {
                menu: node.title.clone(),
                operation,
            });
        }
        let (hint, _) = clean_or(hint, EMPTY_HINT);
        let mut entry = Entry::new(key.to_string(), hint, action);
        entry.is_sub_menu_entry = is_sub_menu_entry;
        node.entries.insert(entry);
        node.mark_modified();
        Ok(())
    }

    /// Removes the entry under `key`. The break entry stays, and a menu is
    /// never shrunk below two entries.
    pub fn remove_entry(&self, key: &str) -> Result<(), MenuError> {
        let result = self.try_remove_entry(key);
        self.reported(result)
    }

    fn try_remove_entry(&self, key: &str) -> Result<(), MenuError> {
        let key = clean(key);
        let mut node = self.node.borrow_mut();
        let menu = node.title.clone();
        if key.is_empty() {
            return Err(MenuError::EmptyKey {
                menu,
                operation: "remove_entry",
            });
        }
        if node.entries.quit_value() == Some(key) {
            return Err(MenuError::BreakEntryProtected {
                menu,
                key: key.to_string(),
            });
        }
        if node.entries.len() <= MIN_MENU_ENTRIES {
            return Err(MenuError::TooFewEntries {
                menu,
                key: key.to_string(),
                minimum: MIN_MENU_ENTRIES,
            });
        }
        if node.entries.remove(key).is_none() {
            return Err(MenuError::UnknownKey {
                menu,
                key: key.to_string(),
            });
        }
        node.mark_modified();
        Ok(())
    }

    /// Changes an entry's hint, its key, or both.
    ///
    /// Valid shapes: `("hint", "old", "")`, `("", "old", "new")` and
    /// `("hint", "old", "new")`. A re-keyed entry keeps its action and its
    /// submenu flag.
    pub fn change_entry(&self, new_hint: &str, old_key: &str, new_key: &str) -> Result<(), MenuError> {
        let result = self.try_change_entry(new_hint, old_key, new_key);
        self.reported(result)
    }

    fn try_change_entry(&self, new_hint: &str, old_key: &str, new_key: &str) -> Result<(), MenuError> {
        let (old_key, new_key, new_hint) = (clean(old_key), clean(new_key), clean(new_hint));
        let mut node = self.node.borrow_mut();
        let menu = node.title.clone();

        // --- 1. Reject what cannot be changed ---
        if old_key.is_empty() {
            return Err(MenuError::EmptyKey {
                menu,
                operation: "change_entry",
            });
        }
        if node.entries.quit_value() == Some(old_key) {
            return Err(MenuError::BreakEntryProtected {
                menu,
                key: old_key.to_string(),
            });
        }
        let existing = node
            .entries
            .get(old_key)
            .cloned()
            .ok_or_else(|| MenuError::UnknownKey {
                menu: menu.clone(),
                key: old_key.to_string(),
            })?;
        if old_key == new_key {
            return Err(MenuError::SameKey {
                menu,
                key: old_key.to_string(),
            });
        }
        if node.entries.quit_value() == Some(new_key) {
            return Err(MenuError::BreakEntryProtected {
                menu,
                key: new_key.to_string(),
            });
        }

        // --- 2. Rekey, with or without a new hint ---
        if !new_key.is_empty() {
            let hint = if new_hint.is_empty() {
                existing.hint.clone()
            } else {
                new_hint.to_string()
            };
            // Insert first so a rekey onto an existing key counts as a duplicate.
            let mut moved = Entry::new(new_key.to_string(), hint, existing.action);
            moved.is_sub_menu_entry = existing.is_sub_menu_entry;
            node.entries.insert(moved);
            node.entries.remove(old_key);
            node.mark_modified();
            return Ok(());
        }

        // --- 3. Hint only ---
        if new_hint.is_empty() {
            return Err(MenuError::NothingToChange {
                menu,
                key: old_key.to_string(),
            });
        }
        if let Some(entry) = node.entries.get_mut(old_key) {
            entry.hint = new_hint.to_string();
        }
        node.mark_modified();
        Ok(())
    }

    /// Rebinds a regular entry. Submenu entries and the break entry cannot be
    /// rebound here; use [`Menu::set_break_item`] for the latter.
    pub fn change_entry_action(&self, key: &str, action: impl Fn() + 'static) -> Result<(), MenuError> {
        let result = self.try_change_entry_action(key, Action::call(action));
        self.reported(result)
    }

    fn try_change_entry_action(&self, key: &str, action: Action) -> Result<(), MenuError> {
        let key = clean(key);
        let mut node = self.node.borrow_mut();
        let menu = node.title.clone();
        if key.is_empty() {
            return Err(MenuError::EmptyKey {
                menu,
                operation: "change_entry_action",
            });
        }
        if node.entries.quit_value() == Some(key) {
            return Err(MenuError::BreakEntryProtected {
                menu,
                key: key.to_string(),
            });
        }
        let entry = node.entries.get_mut(key).ok_or_else(|| MenuError::UnknownKey {
            menu: menu.clone(),
            key: key.to_string(),
        })?;
        if entry.is_sub_menu_entry {
            return Err(MenuError::SubMenuActionLocked {
                menu,
                key: key.to_string(),
            });
        }
        entry.action = action;
        node.mark_modified();
        Ok(())
    }

    /// Sets or replaces the break entry, whose key quits this menu.
    ///
    /// A blank key falls back to [`DEFAULT_BREAK_KEY`]; the menu still works
    /// but the returned warning flags the misconfiguration.
    pub fn set_break_item(
        &self,
        key: &str,
        hint: &str,
        action: impl Fn() + 'static,
    ) -> Option<MenuWarning> {
        let (key, defaulted) = clean_or(key, DEFAULT_BREAK_KEY);
        let (hint, _) = clean_or(hint, DEFAULT_BREAK_HINT);
        let menu = {
            let mut node = self.node.borrow_mut();
            node.entries
                .set_break_entry(Entry::new(key.clone(), hint, Action::call(action)));
            node.mark_modified();
            node.title.clone()
        };

        if !defaulted {
            return None;
        }
        let warning = MenuWarning::DefaultBreakKey { menu, key };
        self.alert(&warning.to_string());
        Some(warning)
    }

    /// Hangs `child` under this menu behind `key`.
    ///
    /// A menu has at most one parent, and the main menu is never a submenu,
    /// which keeps the menu graph a tree.
    pub fn add_sub_menu(&self, child: &Self, key: &str, hint: &str) -> Result<(), MenuError> {
        let result = self.try_add_sub_menu(child, key, hint);
        self.reported(result)
    }

    fn try_add_sub_menu(&self, child: &Self, key: &str, hint: &str) -> Result<(), MenuError> {
        let menu = self.title();

        // --- 1. The child must be free to hang below this menu ---
        if child.is_main_menu() {
            return Err(MenuError::SubMenuIsMainMenu {
                menu,
                sub_menu: child.title(),
            });
        }
        if self.same_menu(child) {
            return Err(MenuError::SelfSubMenu { menu });
        }
        if let Some(parent) = child.parent() {
            return Err(MenuError::AlreadyParented {
                sub_menu: child.title(),
                parent: parent.title(),
            });
        }
        if self.has_ancestor(child) {
            return Err(MenuError::CyclicSubMenu {
                menu,
                sub_menu: child.title(),
            });
        }

        // --- 2. Link both ways; the parent link stays weak ---
        self.insert_entry(key, hint, Action::StartMenu(child.clone()), true, "add_sub_menu")?;
        child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        Ok(())
    }

    fn has_ancestor(&self, candidate: &Self) -> bool {
        let mut current = self.parent();
        while let Some(menu) = current {
            if menu.same_menu(candidate) {
                return true;
            }
            current = menu.parent();
        }
        false
    }

    // --- Menu properties ---

    /// Renames the menu. Blank titles are refused.
    pub fn change_title(&self, new_title: &str) -> Result<(), MenuError> {
        let new_title = clean(new_title);
        let result = if new_title.is_empty() {
            Err(MenuError::EmptyTitle { menu: self.title() })
        } else {
            self.node.borrow_mut().title = new_title.to_string();
            Ok(())
        };
        self.reported(result)
    }

    /// Replaces the automatically assigned id. Fails while the menu runs or
    /// when another menu of the same system already owns `id`.
    pub fn set_id(&self, id: i64) -> Result<(), MenuError> {
        let system = self.system()?;
        let result = self.try_set_id(&system, id);
        self.reported(result)
    }

    fn try_set_id(&self, system: &MenuSystem, id: i64) -> Result<(), MenuError> {
        let (menu, current, running) = {
            let node = self.node.borrow();
            (node.title.clone(), node.id, node.running)
        };
        if running {
            return Err(MenuError::MenuRunning { menu, id: current });
        }
        if let Some(owner) = system
            .menus()
            .into_iter()
            .find(|other| !other.same_menu(self) && other.id() == id)
        {
            return Err(MenuError::IdInUse {
                menu,
                id,
                owner: owner.title(),
            });
        }
        self.node.borrow_mut().id = id;
        Ok(())
    }

    /// When set, any valid choice exits the menu after its action ran.
    pub fn set_choose_one(&self, value: bool) {
        self.node.borrow_mut().choose_one = value;
    }

    /// Descending order puts the break entry first.
    pub fn set_sort_descending(&self, value: bool) {
        let mut node = self.node.borrow_mut();
        if node.reverse_sort != value {
            node.reverse_sort = value;
            node.mark_modified();
        }
    }

    /// Skips the pause after the action currently running. Meant for actions
    /// that start a menu directly instead of through [`Menu::add_sub_menu`].
    /// Cleared after one use or when the menu closes.
    pub fn skip_next_pause(&self) {
        self.node.borrow_mut().skip_next_pause = true;
    }

    // --- Finalization ---

    /// Validates the menu and locks in its display order.
    pub fn finalize(&self) -> Result<(), MenuError> {
        let kill_phrase = self.system()?.kill_phrase();
        let result = validation::finalize(&mut self.node.borrow_mut(), &kill_phrase);
        self.settle(result)
    }

    /// Re-finalizes a menu whose entries changed. Fails on a menu that was
    /// never finalized.
    pub fn reset(&self) -> Result<(), MenuError> {
        let kill_phrase = self.system()?.kill_phrase();
        let result = validation::reset(&mut self.node.borrow_mut(), &kill_phrase);
        self.settle(result)
    }

    fn settle(&self, result: Result<Vec<MenuWarning>, MenuError>) -> Result<(), MenuError> {
        let warnings = self.reported(result)?;
        if !warnings.is_empty() {
            let report: Vec<String> = warnings.iter().map(ToString::to_string).collect();
            self.alert(&report.join("\n"));
        }
        Ok(())
    }

    // --- Running ---

    /// Runs this menu's input loop on its menu system.
    pub fn start(&self) -> Result<(), MenuError> {
        self.system()?.start(self)
    }

    pub(crate) fn system(&self) -> Result<MenuSystem, MenuError> {
        self.system
            .upgrade()
            .map(MenuSystem::from_shared)
            .ok_or_else(|| MenuError::SystemDropped { menu: self.title() })
    }

    fn alert(&self, message: &str) {
        if let Ok(system) = self.system() {
            system.alert(message);
        }
    }

    fn reported<T>(&self, result: Result<T, MenuError>) -> Result<T, MenuError> {
        if let Err(e) = &result {
            self.alert(&e.to_string());
        }
        result
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.try_borrow() {
            Ok(node) => f
                .debug_struct("Menu")
                .field("id", &node.id)
                .field("title", &node.title)
                .finish(),
            Err(_) => f.write_str("Menu { <in use> }"),
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parent = match self.parent() {
            Some(parent) => format!("'{}', ID: {}", parent.title(), parent.id()),
            None => "<no parent>".to_string(),
        };
        let node = self.node.borrow();
        writeln!(f, "Menu '{}':", node.title)?;
        writeln!(f, "  ID : {}", node.id)?;
        writeln!(f, "  Break Value : '{}'", node.entries.quit_value().unwrap_or(""))?;
        writeln!(f, "  ChooseOne Menu : {}", node.choose_one)?;
        writeln!(f, "  Sort Descending : {}", node.reverse_sort)?;
        writeln!(f, "  Parent Menu : {}", parent)?;
        writeln!(f, ">> menu entries:")?;
        let mut entries: Vec<&Entry> = node.entries.iter().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        for entry in entries {
            writeln!(f, "  '{}'={}", entry.key, entry.hint)?;
        }
        Ok(())
    }
}
