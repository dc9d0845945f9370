// src/core/error.rs

use std::fmt;
use thiserror::Error;

/// Broad classes of [`MenuError`], for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value handed to a construction call was rejected.
    Validation,
    /// The operation is not allowed in the menu's current state.
    InvalidState,
    /// An id is already owned by another menu.
    Collision,
    /// The menu graph or a menu's entries are malformed.
    Structural,
    /// The menu system cannot run at all.
    Fatal,
}

/// Everything a menu operation can refuse, each reported to the user as an
/// alert before it is returned.
#[derive(Error, Debug)]
pub enum MenuError {
    /// A key trimmed down to nothing.
    #[error("{operation}: Menu '{menu}', empty key sent in, nothing done.")]
    EmptyKey {
        /// Title of the menu.
        menu: String,
        /// The call that received the key.
        operation: &'static str,
    },
    /// A title trimmed down to nothing.
    #[error("Menu '{menu}', empty title sent in, title not changed.")]
    EmptyTitle {
        /// Title of the menu.
        menu: String,
    },
    /// No regular entry uses the key.
    #[error("Menu '{menu}', key '{key}' does not exist.")]
    UnknownKey {
        /// Title of the menu.
        menu: String,
        /// The missing key.
        key: String,
    },
    /// The break entry is only changed through `set_break_item`.
    #[error("Menu '{menu}', key '{key}' is the menu break key and cannot be changed this way.")]
    BreakEntryProtected {
        /// Title of the menu.
        menu: String,
        /// The break key.
        key: String,
    },
    /// A removal would leave the menu too small.
    #[error("Menu '{menu}', removing '{key}' would leave fewer than {minimum} entries.")]
    TooFewEntries {
        /// Title of the menu.
        menu: String,
        /// The key that was to be removed.
        key: String,
        /// Entries a menu keeps at least, the break entry included.
        minimum: usize,
    },
    /// A rekey onto the key the entry already has.
    #[error("Menu '{menu}', old key and new key are the same value '{key}'.")]
    SameKey {
        /// Title of the menu.
        menu: String,
        /// The unchanged key.
        key: String,
    },
    /// Neither a new key nor a new hint was given.
    #[error("Menu '{menu}', key '{key}': neither a new hint nor a new key was given.")]
    NothingToChange {
        /// Title of the menu.
        menu: String,
        /// The entry's key.
        key: String,
    },
    /// Submenu entries always start their submenu.
    #[error("Menu '{menu}', key '{key}' belongs to a submenu; its action cannot be replaced.")]
    SubMenuActionLocked {
        /// Title of the menu.
        menu: String,
        /// The submenu entry's key.
        key: String,
    },
    /// The main menu cannot hang below another menu.
    #[error("Menu '{menu}' requested submenu '{sub_menu}', which is the main menu.")]
    SubMenuIsMainMenu {
        /// Title of the parent.
        menu: String,
        /// Title of the main menu.
        sub_menu: String,
    },
    /// A menu was added below itself.
    #[error("Menu '{menu}' cannot be added as a submenu of itself.")]
    SelfSubMenu {
        /// Title of the menu.
        menu: String,
    },
    /// A menu has at most one parent.
    #[error("Submenu '{sub_menu}' is already assigned to menu '{parent}'.")]
    AlreadyParented {
        /// Title of the submenu.
        sub_menu: String,
        /// Title of its current parent.
        parent: String,
    },
    /// The submenu is already above the parent.
    #[error("Submenu '{sub_menu}' is an ancestor of menu '{menu}'; adding it would form a cycle.")]
    CyclicSubMenu {
        /// Title of the parent.
        menu: String,
        /// Title of the would-be submenu.
        sub_menu: String,
    },
    /// Another menu owns the requested id.
    #[error("Menu '{menu}' requested id {id}, which is already assigned to menu '{owner}'. Id not changed.")]
    IdInUse {
        /// Title of the menu.
        menu: String,
        /// The requested id.
        id: i64,
        /// Title of the menu owning it.
        owner: String,
    },
    /// Ids are fixed while a menu runs.
    #[error("Menu '{menu}' (id {id}) is running; its id cannot change.")]
    MenuRunning {
        /// Title of the menu.
        menu: String,
        /// Its current id.
        id: i64,
    },
    /// Without a break entry the loop could never end.
    #[error("Menu '{menu}' has no break entry to quit the menu loop.")]
    MissingBreakEntry {
        /// Title of the menu.
        menu: String,
    },
    /// The break key would be shadowed by the kill phrase.
    #[error("Menu '{menu}' has a break key '{key}' which conflicts with the kill phrase.")]
    BreakKeyIsKillPhrase {
        /// Title of the menu.
        menu: String,
        /// The break key.
        key: String,
    },
    /// An entry would be shadowed by the kill phrase.
    #[error("Menu '{menu}' has an entry key '{key}' which conflicts with the kill phrase.")]
    EntryKeyIsKillPhrase {
        /// Title of the menu.
        menu: String,
        /// The clashing key.
        key: String,
    },
    /// `reset` before any `finalize`.
    #[error("Menu '{menu}' cannot be reset, it has never been finalized.")]
    NotFinalized {
        /// Title of the menu.
        menu: String,
    },
    /// `start` could not finalize the menu.
    #[error("Menu '{menu}' was not started: {source}")]
    StartRefused {
        /// Title of the menu.
        menu: String,
        /// Why finalization failed.
        #[source]
        source: Box<MenuError>,
    },
    /// `start_main_menu` on a system without menus.
    #[error("No main menu is registered; create a menu before starting the menu system.")]
    NoMainMenu,
    /// The menu outlived its menu system.
    #[error("The menu system owning menu '{menu}' no longer exists.")]
    SystemDropped {
        /// Title of the menu.
        menu: String,
    },
}

impl MenuError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyKey { .. }
            | Self::EmptyTitle { .. }
            | Self::UnknownKey { .. }
            | Self::BreakEntryProtected { .. }
            | Self::TooFewEntries { .. }
            | Self::SameKey { .. }
            | Self::NothingToChange { .. }
            | Self::SubMenuActionLocked { .. } => ErrorKind::Validation,
            Self::MenuRunning { .. } | Self::NotFinalized { .. } => ErrorKind::InvalidState,
            Self::IdInUse { .. } => ErrorKind::Collision,
            Self::SubMenuIsMainMenu { .. }
            | Self::SelfSubMenu { .. }
            | Self::AlreadyParented { .. }
            | Self::CyclicSubMenu { .. }
            | Self::MissingBreakEntry { .. }
            | Self::BreakKeyIsKillPhrase { .. }
            | Self::EntryKeyIsKillPhrase { .. }
            | Self::StartRefused { .. } => ErrorKind::Structural,
            Self::NoMainMenu | Self::SystemDropped { .. } => ErrorKind::Fatal,
        }
    }
}

/// Irregularities that leave a menu usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuWarning {
    /// An entry shares the break key, so the break entry always wins.
    UnreachableEntry {
        /// Title of the menu.
        menu: String,
        /// The shadowed key.
        key: String,
    },
    /// A key was registered more than once; the last registration won.
    DuplicateKey {
        /// Title of the menu.
        menu: String,
        /// The repeated key.
        key: String,
        /// Registrations since the last validation.
        count: usize,
    },
    /// `set_break_item` got a blank key and used the default one.
    DefaultBreakKey {
        /// Title of the menu.
        menu: String,
        /// The key used instead.
        key: String,
    },
}

impl fmt::Display for MenuWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreachableEntry { menu, key } => write!(
                f,
                t!("validation.warning.unreachable"),
                menu = menu,
                key = key
            ),
            Self::DuplicateKey { menu, key, count } => write!(
                f,
                t!("validation.warning.duplicate"),
                menu = menu,
                key = key,
                count = count
            ),
            Self::DefaultBreakKey { menu, key } => write!(
                f,
                t!("validation.warning.default_break"),
                menu = menu,
                key = key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_id_in_use() {
        let err = MenuError::IdInUse {
            menu: "Second".to_string(),
            id: 7,
            owner: "First".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Menu 'Second' requested id 7, which is already assigned to menu 'First'. Id not changed."
        );
        assert_eq!(err.kind(), ErrorKind::Collision);
    }

    #[test]
    fn test_start_refused_keeps_its_cause() {
        let err = MenuError::StartRefused {
            menu: "Root".to_string(),
            source: Box::new(MenuError::MissingBreakEntry {
                menu: "Root".to_string(),
            }),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("no break entry"));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_warning_display_names_the_key() {
        let warning = MenuWarning::DuplicateKey {
            menu: "Root".to_string(),
            key: "1".to_string(),
            count: 3,
        };
        let text = warning.to_string();
        assert!(text.contains("'Root'"));
        assert!(text.contains("'1'"));
        assert!(text.contains('3'));
    }
}
