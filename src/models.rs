// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::constants::{
    DEFAULT_FUNC_BRACKET_BOTTOM, DEFAULT_FUNC_BRACKET_TOP, DEFAULT_KILL_PHRASE,
    DEFAULT_MENU_PROMPT, DEFAULT_MENU_SEPARATOR,
};
use crate::core::commons::{clean, clean_or};
use crate::core::menu::Menu;

// --- ENTRY MODELS ---

/// What happens when the user picks an entry.
///
/// Host code binds closures; submenu entries carry the menu they open, so the
/// runner can start it on the same menu system.
#[derive(Clone)]
pub enum Action {
    /// Runs a host closure.
    Call(Rc<dyn Fn()>),
    /// Starts another menu (submenu entries).
    StartMenu(Menu),
}

impl Action {
    /// Wraps a closure.
    pub fn call(f: impl Fn() + 'static) -> Self {
        Self::Call(Rc::new(f))
    }

    /// An action that does nothing. Handy for break entries.
    pub fn noop() -> Self {
        Self::call(|| {})
    }

    /// True when both actions are the very same binding.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Call(a), Self::Call(b)) => Rc::ptr_eq(a, b),
            (Self::StartMenu(a), Self::StartMenu(b)) => a.same_menu(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(_) => f.write_str("Action::Call(..)"),
            Self::StartMenu(menu) => write!(f, "Action::StartMenu(id: {})", menu.id()),
        }
    }
}

/// A single selectable line of a menu.
#[derive(Clone, Debug)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) hint: String,
    pub(crate) is_sub_menu_entry: bool,
    pub(crate) action: Action,
}

impl Entry {
    pub(crate) fn new(key: String, hint: String, action: Action) -> Self {
        Self {
            key,
            hint,
            is_sub_menu_entry: false,
            action,
        }
    }

    /// The text the user types to pick this entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The help text printed beside the key.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// True when the entry was registered through `add_sub_menu`.
    pub fn is_sub_menu_entry(&self) -> bool {
        self.is_sub_menu_entry
    }

    /// The bound action.
    pub fn action(&self) -> &Action {
        &self.action
    }
}

// --- OPTIONS MODELS ---

/// Side the entry rows are aligned to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Cells padded on the right.
    #[default]
    Left,
    /// Cells padded on the left.
    Right,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Behaviour toggles shared by every menu of a `MenuSystem`.
///
/// Deserializes from TOML with every field optional; values read from a file
/// should go through [`MenuOptions::normalized`] so the setter rules apply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MenuOptions {
    kill_phrase: String,
    menu_prompt: String,
    menu_separator: String,
    func_bracket_top: String,
    func_bracket_bottom: String,
    pause_on_output: bool,
    echo_menu_and_key: bool,
    alerts_display: bool,
    alerts_pause: bool,
    alignment: Alignment,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            kill_phrase: DEFAULT_KILL_PHRASE.to_string(),
            menu_prompt: DEFAULT_MENU_PROMPT.to_string(),
            menu_separator: DEFAULT_MENU_SEPARATOR.to_string(),
            func_bracket_top: DEFAULT_FUNC_BRACKET_TOP.to_string(),
            func_bracket_bottom: DEFAULT_FUNC_BRACKET_BOTTOM.to_string(),
            pause_on_output: true,
            echo_menu_and_key: true,
            alerts_display: true,
            alerts_pause: true,
            alignment: Alignment::Left,
        }
    }
}

impl MenuOptions {
    /// Re-applies every setter so values loaded from a file obey the same
    /// trimming and default rules as values set in code.
    pub fn normalized(mut self) -> Self {
        let raw = self.clone();
        self.set_kill_phrase(&raw.kill_phrase);
        self.set_menu_prompt(&raw.menu_prompt);
        self.set_menu_separator(&raw.menu_separator);
        self.set_func_bracket_top(&raw.func_bracket_top);
        self.set_func_bracket_bottom(&raw.func_bracket_bottom);
        self
    }

    /// Input that closes every open menu. An empty phrase disables it.
    pub fn kill_phrase(&self) -> &str {
        &self.kill_phrase
    }

    /// Sets the kill phrase; surrounding whitespace is dropped.
    pub fn set_kill_phrase(&mut self, value: &str) {
        self.kill_phrase = clean(value).to_string();
    }

    /// Prompt printed after each render.
    pub fn menu_prompt(&self) -> &str {
        &self.menu_prompt
    }

    /// Sets the prompt. Spaces are kept (so `" "` is a valid prompt), an
    /// empty value restores the default.
    pub fn set_menu_prompt(&mut self, value: &str) {
        let value = value.trim_matches(&['\t', '\r', '\n'][..]);
        self.menu_prompt = if value.is_empty() {
            DEFAULT_MENU_PROMPT.to_string()
        } else {
            value.to_string()
        };
    }

    /// Separator between breadcrumb titles.
    pub fn menu_separator(&self) -> &str {
        &self.menu_separator
    }

    /// Sets the breadcrumb separator; blank restores the default.
    pub fn set_menu_separator(&mut self, value: &str) {
        self.menu_separator = clean_or(value, DEFAULT_MENU_SEPARATOR).0;
    }

    /// Printed before an entry's action runs.
    pub fn func_bracket_top(&self) -> &str {
        &self.func_bracket_top
    }

    /// Sets the opening bracket. May be empty.
    pub fn set_func_bracket_top(&mut self, value: &str) {
        self.func_bracket_top = clean(value).to_string();
    }

    /// Printed after an entry's action returns.
    pub fn func_bracket_bottom(&self) -> &str {
        &self.func_bracket_bottom
    }

    /// Sets the closing bracket. May be empty.
    pub fn set_func_bracket_bottom(&mut self, value: &str) {
        self.func_bracket_bottom = clean(value).to_string();
    }

    /// Whether the user must press return after an action's output.
    pub fn pause_on_output(&self) -> bool {
        self.pause_on_output
    }

    /// See [`MenuOptions::pause_on_output`].
    pub fn set_pause_on_output(&mut self, value: bool) {
        self.pause_on_output = value;
    }

    /// Whether brackets name the menu and the key that ran the action.
    pub fn echo_menu_and_key(&self) -> bool {
        self.echo_menu_and_key
    }

    /// See [`MenuOptions::echo_menu_and_key`].
    pub fn set_echo_menu_and_key(&mut self, value: bool) {
        self.echo_menu_and_key = value;
    }

    /// Whether validation problems are printed when they happen.
    pub fn alerts_display(&self) -> bool {
        self.alerts_display
    }

    /// See [`MenuOptions::alerts_display`].
    pub fn set_alerts_display(&mut self, value: bool) {
        self.alerts_display = value;
    }

    /// Whether a printed alert waits for acknowledgement.
    pub fn alerts_pause(&self) -> bool {
        self.alerts_pause
    }

    /// See [`MenuOptions::alerts_pause`].
    pub fn set_alerts_pause(&mut self, value: bool) {
        self.alerts_pause = value;
    }

    /// Alignment of the entry rows.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// See [`MenuOptions::alignment`].
    pub fn set_alignment(&mut self, value: Alignment) {
        self.alignment = value;
    }

    /// Explains every option field.
    pub fn info() -> String {
        [
            t!("options.info.echo_menu_and_key"),
            t!("options.info.kill_phrase"),
            t!("options.info.menu_prompt"),
            t!("options.info.menu_separator"),
            t!("options.info.pause_on_output"),
            t!("options.info.alerts_display"),
            t!("options.info.alerts_pause"),
            t!("options.info.func_bracket_top"),
            t!("options.info.func_bracket_bottom"),
            t!("options.info.alignment"),
        ]
        .join("\n\n")
    }
}

impl fmt::Display for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Self::default();
        let rows: [(&str, String, String); 10] = [
            (
                "echo_menu_and_key",
                self.echo_menu_and_key.to_string(),
                defaults.echo_menu_and_key.to_string(),
            ),
            ("kill_phrase", self.kill_phrase.clone(), defaults.kill_phrase),
            ("menu_prompt", self.menu_prompt.clone(), defaults.menu_prompt),
            (
                "menu_separator",
                self.menu_separator.clone(),
                defaults.menu_separator,
            ),
            (
                "pause_on_output",
                self.pause_on_output.to_string(),
                defaults.pause_on_output.to_string(),
            ),
            (
                "alerts_display",
                self.alerts_display.to_string(),
                defaults.alerts_display.to_string(),
            ),
            (
                "alerts_pause",
                self.alerts_pause.to_string(),
                defaults.alerts_pause.to_string(),
            ),
            (
                "func_bracket_top",
                self.func_bracket_top.clone(),
                defaults.func_bracket_top,
            ),
            (
                "func_bracket_bottom",
                self.func_bracket_bottom.clone(),
                defaults.func_bracket_bottom,
            ),
            (
                "alignment",
                self.alignment.to_string(),
                defaults.alignment.to_string(),
            ),
        ];

        writeln!(f, "Menu Options")?;
        for (name, current, default) in rows {
            writeln!(
                f,
                "{}:\n  current value = '{}' (default is: '{}')",
                name, current, default
            )?;
        }
        Ok(())
    }
}
