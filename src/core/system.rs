// src/core/system.rs

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use colored::Colorize;
use log::{debug, warn};

use crate::constants::UNNAMED_MENU_TITLE;
use crate::core::commons::{clean, clean_or};
use crate::core::error::MenuError;
use crate::core::menu::{Menu, MenuNode};
use crate::models::MenuOptions;
use crate::state::Navigation;
use crate::system::console::{Console, StdConsole};

/// State shared by every handle of one menu system.
pub(crate) struct SystemShared {
    options: RefCell<MenuOptions>,
    registry: RefCell<Vec<Menu>>,
    navigation: RefCell<Navigation>,
    last_id: Cell<i64>,
    console: RefCell<Box<dyn Console>>,
}

/// Owns the options, the console and every menu created through it.
///
/// Cloning yields another handle on the same system. Menus only hold a weak
/// reference back, so dropping the last `MenuSystem` handle tears down all of
/// its menus.
#[derive(Clone)]
pub struct MenuSystem {
    shared: Rc<SystemShared>,
}

impl MenuSystem {
    /// A menu system on stdin/stdout with default options.
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }

    /// A menu system on `console` with default options.
    pub fn with_console(console: impl Console + 'static) -> Self {
        Self::with_options(MenuOptions::default(), console)
    }

    /// A menu system on `console` with the given options.
    pub fn with_options(options: MenuOptions, console: impl Console + 'static) -> Self {
        Self {
            shared: Rc::new(SystemShared {
                options: RefCell::new(options),
                registry: RefCell::new(Vec::new()),
                navigation: RefCell::new(Navigation::default()),
                last_id: Cell::new(0),
                console: RefCell::new(Box::new(console)),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Rc<SystemShared>) -> Self {
        Self { shared }
    }

    // --- Menus ---

    /// Creates and registers an empty menu. The first menu created is the
    /// main menu. Ids count down from -1 and skip ids taken by `set_id`.
    pub fn create_menu(&self, title: &str) -> Menu {
        let (title, _) = clean_or(title, UNNAMED_MENU_TITLE);
        let id = self.next_menu_id();
        let main_menu = self.shared.registry.borrow().is_empty();
        let menu = Menu::new(
            MenuNode::new(id, title, main_menu),
            Rc::downgrade(&self.shared),
        );
        debug!("Created menu '{}' with id {}", menu.title(), id);
        self.shared.registry.borrow_mut().push(menu.clone());
        menu
    }

    fn next_menu_id(&self) -> i64 {
        let taken: Vec<i64> = self.menus().iter().map(Menu::id).collect();
        let mut id = self.shared.last_id.get() - 1;
        while taken.contains(&id) {
            id -= 1;
        }
        self.shared.last_id.set(id);
        id
    }

    /// Every menu created so far, in creation order.
    pub fn menus(&self) -> Vec<Menu> {
        self.shared.registry.borrow().clone()
    }

    /// The first menu created, if any.
    pub fn main_menu(&self) -> Option<Menu> {
        self.shared.registry.borrow().first().cloned()
    }

    /// The menu currently using `id`.
    pub fn find_menu(&self, id: i64) -> Option<Menu> {
        self.menus().into_iter().find(|menu| menu.id() == id)
    }

    /// Starts the main menu. Returns when it closes, or right away with
    /// [`MenuError::NoMainMenu`] when no menu was created.
    pub fn start_main_menu(&self) -> Result<(), MenuError> {
        match self.main_menu() {
            Some(main) => self.start(&main),
            None => {
                let err = MenuError::NoMainMenu;
                self.alert(&err.to_string());
                Err(err)
            }
        }
    }

    // --- Kill switch ---

    /// True after the user typed the kill phrase, until [`MenuSystem::unkill`].
    pub fn was_killed(&self) -> bool {
        self.shared.navigation.borrow().kill_switch()
    }

    /// Clears the kill switch so menus can run again.
    pub fn unkill(&self) {
        self.shared.navigation.borrow_mut().set_kill_switch(false);
    }

    pub(crate) fn navigation(&self) -> RefMut<'_, Navigation> {
        self.shared.navigation.borrow_mut()
    }

    // --- Options ---

    /// A snapshot of the current options.
    pub fn options(&self) -> MenuOptions {
        self.shared.options.borrow().clone()
    }

    /// Edits the options in place. Changes show from the next render on.
    /// `edit` must not call back into this menu system.
    pub fn update_options(&self, edit: impl FnOnce(&mut MenuOptions)) {
        edit(&mut *self.shared.options.borrow_mut());
    }

    pub(crate) fn kill_phrase(&self) -> String {
        self.shared.options.borrow().kill_phrase().to_string()
    }

    // --- Console ---

    pub(crate) fn write(&self, text: &str) {
        let mut console = self.shared.console.borrow_mut();
        if let Err(e) = console.write_str(text).and_then(|()| console.flush()) {
            warn!("Could not write to the console: {}", e);
        }
    }

    /// Next input line, `None` once input is exhausted or unreadable.
    pub(crate) fn read_line(&self) -> Option<String> {
        match self.shared.console.borrow_mut().read_line() {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not read from the console: {}", e);
                None
            }
        }
    }

    /// Asks the user for one line of text. Returns it trimmed; an empty
    /// answer means the user cancelled.
    pub fn prompt_line(&self, prompt: &str) -> String {
        let prompt = match clean(prompt) {
            "" => t!("prompt.default"),
            cleaned => cleaned,
        };
        self.write(&format!(t!("prompt.info.cancels"), prompt = prompt));
        self.write("\n=> ");
        let input = self
            .read_line()
            .map(|line| clean(&line).to_string())
            .unwrap_or_default();
        if input.is_empty() {
            self.write(t!("prompt.info.canceled"));
            self.write("\n");
        }
        input
    }

    /// Prints `additional` and waits for the user to press return.
    pub fn wait_for_input(&self, additional: &str) {
        self.write(&format!("{}\n{}\n", additional, t!("runtime.info.press_return")));
        let _ = self.read_line();
    }

    /// Reports a problem to the log and, depending on the options, to the
    /// user.
    pub(crate) fn alert(&self, message: &str) {
        warn!("{}", message);
        let (display, pause) = {
            let options = self.shared.options.borrow();
            (options.alerts_display(), options.alerts_pause())
        };
        if !display {
            return;
        }
        self.write(&format!(
            "\n\n{}\n{}\n",
            t!("alert.banner").yellow().bold(),
            message.yellow()
        ));
        if pause {
            self.wait_for_input(t!("alert.read_above"));
        }
    }
}

impl Default for MenuSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MenuSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuSystem")
            .field("menus", &self.shared.registry.borrow().len())
            .field("navigation", &self.shared.navigation.borrow())
            .finish()
    }
}
