// src/constants.rs

/// Default phrase that exits every open menu at once.
pub const DEFAULT_KILL_PHRASE: &str = "Bye!";

/// Default prompt printed after a menu is rendered.
pub const DEFAULT_MENU_PROMPT: &str = ">>: ";

/// Default separator between breadcrumb titles.
pub const DEFAULT_MENU_SEPARATOR: &str = ":";

/// Default string printed before an entry's action runs.
pub const DEFAULT_FUNC_BRACKET_TOP: &str = "*..............";

/// Default string printed after an entry's action returns.
pub const DEFAULT_FUNC_BRACKET_BOTTOM: &str = "..............*";

/// Break key substituted when `set_break_item` receives a blank key.
pub const DEFAULT_BREAK_KEY: &str = "QQ.QQ";

/// Break hint substituted when `set_break_item` receives a blank hint.
pub const DEFAULT_BREAK_HINT: &str = "Quit this Menu";

/// Hint substituted for blank entry hints.
pub const EMPTY_HINT: &str = "Menu hint not specified";

/// Title substituted for blank menu titles.
pub const UNNAMED_MENU_TITLE: &str = "UnNamedMenu";

/// Rule printed between the breadcrumb and the entry rows.
pub const MENU_RULE: &str = "------------------------------";

/// Banner printed under the entries when the kill phrase is disabled.
pub const KILL_BANNER_DISABLED: &str = "==============================";

/// A menu never shrinks below this many entries, break entry included.
pub const MIN_MENU_ENTRIES: usize = 2;

/// Characters stripped from keys, hints and titles.
pub const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// Name of the directory holding juusmenu configuration (inside the system config dir).
pub const CONFIG_DIR_NAME: &str = "juusmenu";

/// Name of the options file inside the configuration directory.
pub const OPTIONS_FILENAME: &str = "options.toml";
