// src/core/validation.rs

//! Structural checks and display ordering for a single menu.
//!
//! A menu moves `unfinalized -> validating -> finalized | killed`. Hard errors
//! make the menu unusable until it is reconfigured; warnings are reported but
//! the menu keeps working.

use log::debug;

use crate::core::entries::EntryRegistry;
use crate::core::error::{MenuError, MenuWarning};
use crate::core::menu::MenuNode;

/// Checks a menu's entries against the current kill phrase.
///
/// Occurrence counters are cleared once warnings are computed, so a menu that
/// is mutated and re-finalized many times only reports fresh duplicates.
pub fn validate(
    title: &str,
    entries: &mut EntryRegistry,
    kill_phrase: &str,
) -> Result<Vec<MenuWarning>, MenuError> {
    // --- Errors: the menu cannot run ---
    let quit_value = entries
        .quit_value()
        .ok_or_else(|| MenuError::MissingBreakEntry {
            menu: title.to_string(),
        })?
        .to_string();

    if !kill_phrase.is_empty() {
        if quit_value == kill_phrase {
            return Err(MenuError::BreakKeyIsKillPhrase {
                menu: title.to_string(),
                key: quit_value,
            });
        }
        if entries.contains(kill_phrase) {
            return Err(MenuError::EntryKeyIsKillPhrase {
                menu: title.to_string(),
                key: kill_phrase.to_string(),
            });
        }
    }

    // --- Warnings: the menu runs, maybe not as intended ---
    let mut warnings = Vec::new();
    if entries.contains(&quit_value) {
        warnings.push(MenuWarning::UnreachableEntry {
            menu: title.to_string(),
            key: quit_value.clone(),
        });
    }
    for (key, count) in entries.duplicates() {
        warnings.push(MenuWarning::DuplicateKey {
            menu: title.to_string(),
            key,
            count,
        });
    }

    entries.reset_occurrences();
    Ok(warnings)
}

/// Sorted keys with the break key last, or everything reversed (break key
/// first) for descending menus. Entries hidden by the break key are skipped.
pub fn display_order(entries: &EntryRegistry, reverse: bool) -> Vec<String> {
    let quit_value = entries.quit_value();
    let mut order: Vec<String> = entries
        .keys()
        .filter(|key| Some(*key) != quit_value)
        .map(str::to_string)
        .collect();
    order.sort();
    if let Some(quit) = quit_value {
        order.push(quit.to_string());
    }
    if reverse {
        order.reverse();
    }
    order
}

/// Validates and locks in the display order. No-op on a finalized menu.
pub(crate) fn finalize(
    node: &mut MenuNode,
    kill_phrase: &str,
) -> Result<Vec<MenuWarning>, MenuError> {
    if node.finalized {
        return Ok(Vec::new());
    }

    let warnings = match validate(&node.title, &mut node.entries, kill_phrase) {
        Ok(warnings) => warnings,
        Err(e) => {
            node.killed = true;
            return Err(e);
        }
    };

    node.display_order = display_order(&node.entries, node.reverse_sort);
    node.finalized = true;
    node.modified = false;
    node.killed = false;
    debug!(
        "Menu '{}' (id {}) finalized with order {:?}",
        node.title, node.id, node.display_order
    );
    Ok(warnings)
}

/// Throws away the display order of a finalized menu and finalizes again.
pub(crate) fn reset(node: &mut MenuNode, kill_phrase: &str) -> Result<Vec<MenuWarning>, MenuError> {
    if !node.finalized {
        return Err(MenuError::NotFinalized {
            menu: node.title.clone(),
        });
    }
    debug!("Resetting menu '{}' (id {})", node.title, node.id);
    node.display_order.clear();
    node.finalized = false;
    finalize(node, kill_phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Entry};
    use proptest::prelude::*;

    fn registry(keys: &[&str], quit: Option<&str>) -> EntryRegistry {
        let mut registry = EntryRegistry::default();
        for key in keys {
            registry.insert(Entry::new(key.to_string(), "hint".to_string(), Action::noop()));
        }
        if let Some(quit) = quit {
            registry.set_break_entry(Entry::new(quit.to_string(), "Quit".to_string(), Action::noop()));
        }
        registry
    }

    #[test]
    fn test_missing_break_entry_is_an_error() {
        let mut entries = registry(&["1"], None);
        let err = validate("Root", &mut entries, "Bye!").unwrap_err();
        assert!(matches!(err, MenuError::MissingBreakEntry { .. }));
    }

    #[test]
    fn test_kill_phrase_collisions_are_errors() {
        let mut entries = registry(&["1"], Some("Bye!"));
        assert!(matches!(
            validate("Root", &mut entries, "Bye!"),
            Err(MenuError::BreakKeyIsKillPhrase { .. })
        ));

        let mut entries = registry(&["Bye!"], Some("q"));
        assert!(matches!(
            validate("Root", &mut entries, "Bye!"),
            Err(MenuError::EntryKeyIsKillPhrase { .. })
        ));

        // An empty kill phrase disables both checks.
        let mut entries = registry(&["1"], Some("q"));
        assert!(validate("Root", &mut entries, "").is_ok());
    }

    #[test]
    fn test_warnings_for_duplicates_and_hidden_entries() {
        let mut entries = registry(&["1", "1", "q"], Some("q"));
        let warnings = validate("Root", &mut entries, "Bye!").unwrap();
        assert!(warnings.contains(&MenuWarning::UnreachableEntry {
            menu: "Root".to_string(),
            key: "q".to_string()
        }));
        assert!(warnings.contains(&MenuWarning::DuplicateKey {
            menu: "Root".to_string(),
            key: "1".to_string(),
            count: 2
        }));

        // Counters were cleared: a second pass has nothing new to say about "1".
        let warnings = validate("Root", &mut entries, "Bye!").unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_display_order_ascending_and_descending() {
        let entries = registry(&["b", "a", "c"], Some("q"));
        assert_eq!(display_order(&entries, false), vec!["a", "b", "c", "q"]);
        assert_eq!(display_order(&entries, true), vec!["q", "c", "b", "a"]);
    }

    #[test]
    fn test_display_order_hides_entry_shadowed_by_break_key() {
        let entries = registry(&["1", "q"], Some("q"));
        assert_eq!(display_order(&entries, false), vec!["1", "q"]);
    }

    proptest! {
        #[test]
        fn prop_break_key_is_last_and_rest_is_sorted(
            keys in proptest::collection::hash_set("[a-z0-9]{1,4}", 0..12),
            reverse in any::<bool>(),
        ) {
            let quit = "QUIT";
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            let entries = registry(&key_refs, Some(quit));
            let order = display_order(&entries, reverse);

            prop_assert_eq!(order.len(), keys.len() + 1);
            let (edge, rest) = if reverse {
                (order.first().unwrap(), &order[1..])
            } else {
                (order.last().unwrap(), &order[..order.len() - 1])
            };
            prop_assert_eq!(edge.as_str(), quit);

            let mut expected: Vec<String> = keys.iter().cloned().collect();
            expected.sort();
            if reverse {
                expected.reverse();
            }
            prop_assert_eq!(rest.to_vec(), expected);
        }
    }
}
