// src/core/runner.rs

//! The interactive loop behind [`MenuSystem::start`].
//!
//! Nested menus run as nested `start` calls on the same thread. No `RefCell`
//! borrow is held while an action runs, so actions are free to start menus,
//! reshape them or change options.

use std::rc::Rc;

use log::{debug, info, trace};

use crate::core::commons::clean;
use crate::core::error::MenuError;
use crate::core::menu::Menu;
use crate::core::render::{self, Bracket};
use crate::core::system::MenuSystem;
use crate::models::Action;

/// What one line of input resolved to.
enum Choice {
    Kill,
    Quit(Action),
    Entry { action: Action, is_sub_menu: bool },
    Invalid,
}

/// Whether the loop keeps reading after a choice was handled.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Unwind,
}

impl MenuSystem {
    /// Runs `menu` until its break key, the kill phrase, a drop-down past it,
    /// or the end of input.
    ///
    /// Starting a menu that is already open further up does not nest a second
    /// loop; every menu above it closes instead and it becomes current again.
    pub fn start(&self, menu: &Menu) -> Result<(), MenuError> {
        let (id, running) = {
            let node = menu.node.borrow();
            (node.id, node.running)
        };

        // --- 1. Already open further up: close everything above it ---
        if running {
            debug!("Menu '{}' is already open, dropping down to it", menu.title());
            self.navigation().request_drop_down(id);
            return Ok(());
        }

        // --- 2. Validate before showing anything ---
        self.prepare(menu)?;

        // --- 3. First render, then hold the running flag until we return ---
        debug!("Starting menu '{}' (id {})", menu.title(), id);
        self.display_menu(menu);
        menu.node.borrow_mut().set_running(true);
        let _running = scopeguard::guard(Rc::clone(&menu.node), |node| {
            node.borrow_mut().set_running(false);
        });

        // --- 4. Read and handle choices ---
        while let Some(line) = self.read_line() {
            let input = clean(&line);
            let flow = match self.classify(menu, input) {
                Choice::Kill => {
                    self.write(t!("runtime.info.stopping"));
                    self.write("\n");
                    info!("Kill phrase entered in menu '{}'", menu.title());
                    self.navigation().set_kill_switch(true);
                    Flow::Unwind
                }
                Choice::Quit(action) => {
                    // The break action may itself start menus.
                    self.invoke(&action);
                    Flow::Unwind
                }
                Choice::Entry { action, is_sub_menu } => {
                    self.dispatch(menu, input, &action, is_sub_menu)
                }
                Choice::Invalid => {
                    let prompt = self.options().menu_prompt().to_string();
                    self.write(&format!(
                        t!("runtime.error.invalid_choice"),
                        prompt = prompt,
                        input = input
                    ));
                    self.write(&format!("\n{}", prompt));
                    Flow::Continue
                }
            };
            if flow == Flow::Unwind {
                break;
            }
        }

        // --- 5. Unwind ---
        // A drop-down aimed here is over once this menu is gone.
        self.navigation().settle(id);
        debug!("Closing menu '{}' (id {})", menu.title(), id);
        Ok(())
    }

    /// Finalizes a new menu, or re-finalizes one that changed since.
    fn prepare(&self, menu: &Menu) -> Result<(), MenuError> {
        let (finalized, modified) = {
            let node = menu.node.borrow();
            (node.finalized, node.modified)
        };
        let outcome = match (finalized, modified) {
            (true, true) => menu.reset(),
            (false, _) => menu.finalize(),
            (true, false) => Ok(()),
        };
        outcome.map_err(|source| {
            let err = MenuError::StartRefused {
                menu: menu.title(),
                source: Box::new(source),
            };
            self.alert(&err.to_string());
            err
        })
    }

    fn classify(&self, menu: &Menu, input: &str) -> Choice {
        let kill_phrase = self.kill_phrase();
        if !kill_phrase.is_empty() && input == kill_phrase {
            return Choice::Kill;
        }
        let node = menu.node.borrow();
        if let Some(break_entry) = node.entries.break_entry() {
            if break_entry.key == input {
                return Choice::Quit(break_entry.action.clone());
            }
        }
        match node.entries.get(input) {
            Some(entry) => Choice::Entry {
                action: entry.action.clone(),
                is_sub_menu: entry.is_sub_menu_entry,
            },
            None => Choice::Invalid,
        }
    }

    fn dispatch(&self, menu: &Menu, key: &str, action: &Action, is_sub_menu: bool) -> Flow {
        trace!("Menu '{}': dispatching '{}' ({:?})", menu.title(), key, action);
        if !is_sub_menu && !menu.is_choose_one() {
            self.print_bracket(menu, Bracket::Top, key);
        }

        self.invoke(action);

        // The action may have reshaped this menu.
        let modified = menu.node.borrow().modified;
        if modified {
            // A failed reset kills the menu; the alert was already raised.
            let _ = menu.reset();
        }

        // Ask about the drop-down first: reaching its target must clear it
        // whatever else closes the menu.
        let id = menu.id();
        if self.navigation().dropping_down(id) {
            return Flow::Unwind;
        }
        let last_exit = self.navigation().take_last_exit();
        if menu.is_killed() || self.was_killed() || menu.is_choose_one() {
            return Flow::Unwind;
        }

        // Close the output of the choice, then show the menu again.
        let skip_pause = std::mem::take(&mut menu.node.borrow_mut().skip_next_pause);
        if skip_pause {
            self.print_bracket(menu, Bracket::Partial, key);
            if self.options().pause_on_output() {
                self.write(&format!(
                    t!("runtime.info.pause_bypassed"),
                    title = menu.title()
                ));
                self.write("\n");
            }
        } else if !is_sub_menu {
            let kind = if last_exit {
                Bracket::Partial
            } else {
                Bracket::Bottom
            };
            self.print_bracket(menu, kind, key);
        }

        self.display_menu(menu);
        Flow::Continue
    }

    fn invoke(&self, action: &Action) {
        match action {
            Action::Call(f) => f(),
            Action::StartMenu(child) => {
                // Refusals were already reported as alerts.
                if let Err(e) = self.start(child) {
                    debug!("Submenu did not run: {}", e);
                }
            }
        }
    }

    fn print_bracket(&self, menu: &Menu, kind: Bracket, choice: &str) {
        let options = self.options();
        self.write(&render::bracket(&options, kind, &menu.title(), choice));
        if kind == Bracket::Bottom && options.pause_on_output() {
            self.wait_for_input("");
        }
    }

    fn display_menu(&self, menu: &Menu) {
        let breadcrumb = menu.breadcrumb();
        let rows: Vec<(String, String)> = {
            let node = menu.node.borrow();
            node.display_order
                .iter()
                .filter_map(|key| {
                    let entry = match node.entries.break_entry() {
                        Some(break_entry) if &break_entry.key == key => Some(break_entry),
                        _ => node.entries.get(key),
                    };
                    entry.map(|entry| (entry.key.clone(), entry.hint.clone()))
                })
                .collect()
        };
        self.write(&render::render_menu(&breadcrumb, &rows, &self.options()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuOptions;
    use crate::system::console::{ScriptedConsole, Transcript};
    use std::cell::Cell;

    fn scripted(lines: &[&str], pause_on_output: bool) -> (MenuSystem, Transcript) {
        let console = ScriptedConsole::new(lines.iter().copied());
        let transcript = console.transcript();
        let mut options = MenuOptions::default();
        options.set_pause_on_output(pause_on_output);
        options.set_alerts_pause(false);
        (MenuSystem::with_options(options, console), transcript)
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let inner = Rc::clone(&hits);
        (hits, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_choice_runs_action_once_then_break_key_quits() {
        let (system, transcript) = scripted(&["2", "q"], false);
        let main = system.create_menu("Main");
        let (one, count_one) = counter();
        let (two, count_two) = counter();
        let (quit, count_quit) = counter();
        main.add_entry("1", "One", count_one).unwrap();
        main.add_entry("2", "Two", count_two).unwrap();
        main.set_break_item("q", "Quit", count_quit);

        system.start_main_menu().unwrap();

        assert_eq!((one.get(), two.get(), quit.get()), (0, 1, 1));
        let out = transcript.contents();
        assert!(out.contains("*..............  >> Menu: 'Main' - choice: '2'"));
        assert!(out.contains("..............*  << Menu: 'Main' - choice: '2'"));
        assert_eq!(transcript.count("\nMain\n"), 2);
        assert!(!main.is_running());
    }

    #[test]
    fn test_kill_phrase_closes_every_open_menu() {
        let (system, transcript) = scripted(&["s", "t", "Bye!", "left over"], false);
        let main = system.create_menu("Main");
        let sub = system.create_menu("Sub");
        let deeper = system.create_menu("Deeper");
        let (quits, count_quit) = counter();
        let count_quit = Rc::new(count_quit);
        for menu in [&main, &sub, &deeper] {
            menu.add_entry("1", "One", || {}).unwrap();
            let hook = Rc::clone(&count_quit);
            menu.set_break_item("q", "Quit", move || (*hook)());
        }
        main.add_sub_menu(&sub, "s", "Sub").unwrap();
        sub.add_sub_menu(&deeper, "t", "Deeper").unwrap();

        system.start_main_menu().unwrap();

        assert!(system.was_killed());
        assert_eq!(quits.get(), 0);
        assert!(transcript.contents().contains(t!("runtime.info.stopping")));
        assert!(transcript.contents().contains("\nMain : Sub : Deeper\n"));
        assert_eq!(system.read_line().as_deref(), Some("left over"));
        assert!(!main.is_running() && !sub.is_running() && !deeper.is_running());
    }

    #[test]
    fn test_starting_an_open_menu_drops_down_to_it() {
        let (system, transcript) = scripted(&["s", "m", "q"], false);
        let main = system.create_menu("Main");
        let sub = system.create_menu("Sub");
        let (quit, count_quit) = counter();
        main.set_break_item("q", "Quit", count_quit);
        main.add_sub_menu(&sub, "s", "Sub").unwrap();
        let target = main.clone();
        sub.add_entry("m", "Back to main", move || {
            let _ = target.start();
        })
        .unwrap();
        sub.set_break_item("b", "Back", || {});

        system.start_main_menu().unwrap();

        assert_eq!(quit.get(), 1);
        let out = transcript.contents();
        assert!(!out.contains("<< Menu: 'Sub' - choice: 'm'"));
        assert_eq!(transcript.count("\nMain\n"), 2);
        assert!(!system.navigation().drop_down().active);
        assert!(!system.navigation().take_last_exit());
    }

    #[test]
    fn test_drop_down_target_skips_its_pause() {
        // With pauses on, a bottom bracket would eat "q" as its pause line.
        let (system, transcript) = scripted(&["d", "m", "q"], true);
        let main = system.create_menu("Main");
        let sub = system.create_menu("Sub");
        let (quit, count_quit) = counter();
        main.set_break_item("q", "Quit", count_quit);
        let direct = sub.clone();
        main.add_entry("d", "Start sub directly", move || {
            let _ = direct.start();
        })
        .unwrap();
        let target = main.clone();
        sub.add_entry("m", "Back to main", move || {
            let _ = target.start();
        })
        .unwrap();
        sub.set_break_item("b", "Back", || {});

        system.start_main_menu().unwrap();

        assert_eq!(quit.get(), 1);
        assert!(transcript.contents().contains("<< Menu: 'Main' - choice: 'd'"));
        assert!(!transcript.contents().contains(t!("runtime.info.press_return")));
    }

    #[test]
    fn test_choose_one_menu_exits_after_a_single_choice() {
        let (system, transcript) = scripted(&["p", "a", "q"], false);
        let main = system.create_menu("Main");
        let pick = system.create_menu("Pick");
        let (picked, count_picked) = counter();
        main.set_break_item("q", "Quit", || {});
        main.add_sub_menu(&pick, "p", "Pick one").unwrap();
        pick.set_choose_one(true);
        pick.add_entry("a", "Alpha", count_picked).unwrap();
        pick.add_entry("b", "Beta", || {}).unwrap();
        pick.set_break_item("c", "Cancel", || {});

        system.start_main_menu().unwrap();

        assert_eq!(picked.get(), 1);
        assert!(!transcript.contents().contains(">> Menu: 'Pick'"));
        assert_eq!(transcript.count("\nMain\n"), 2);
    }

    #[test]
    fn test_entries_added_by_an_action_are_live_on_next_prompt() {
        let (system, transcript) = scripted(&["1", "9", "q"], false);
        let main = system.create_menu("Main");
        let (nine, count_nine) = counter();
        let count_nine = Rc::new(count_nine);
        let this = main.clone();
        main.add_entry("1", "Add a nine", move || {
            let hook = Rc::clone(&count_nine);
            this.add_entry("9", "Nine", move || (*hook)()).unwrap();
        })
        .unwrap();
        main.set_break_item("q", "Quit", || {});

        system.start_main_menu().unwrap();

        assert_eq!(nine.get(), 1);
        assert!(transcript.contents().contains("9 :  Nine"));
        assert!(!transcript.contents().contains("is not a valid menu choice"));
    }

    #[test]
    fn test_end_of_input_closes_the_menu() {
        let (system, _) = scripted(&["1"], false);
        let main = system.create_menu("Main");
        let (one, count_one) = counter();
        main.add_entry("1", "One", count_one).unwrap();
        main.set_break_item("q", "Quit", || {});

        system.start_main_menu().unwrap();

        assert_eq!(one.get(), 1);
        assert!(!main.is_running());
        assert!(!system.was_killed());
    }

    #[test]
    fn test_invalid_choice_is_reported_and_prompt_repeated() {
        let (system, transcript) = scripted(&[" zz ", "q"], false);
        let main = system.create_menu("Main");
        main.add_entry("1", "One", || {}).unwrap();
        main.set_break_item("q", "Quit", || {});

        system.start_main_menu().unwrap();

        let out = transcript.contents();
        assert!(out.contains("'zz' is not a valid menu choice"));
        assert!(out.contains("valid menu choice...\n>>: "));
    }

    #[test]
    fn test_menu_without_break_entry_refuses_to_start() {
        let (system, transcript) = scripted(&["1"], false);
        let main = system.create_menu("Main");
        main.add_entry("1", "One", || {}).unwrap();

        let err = system.start_main_menu().unwrap_err();

        assert!(matches!(err, MenuError::StartRefused { .. }));
        assert!(main.is_killed());
        assert!(!main.is_running());
        assert!(!transcript.contents().contains("\nMain\n"));
        // Nothing was read.
        assert_eq!(system.read_line().as_deref(), Some("1"));
    }

    #[test]
    fn test_skip_next_pause_is_used_once() {
        let (system, transcript) = scripted(&["d", "q"], true);
        let main = system.create_menu("Main");
        let (quit, count_quit) = counter();
        let this = main.clone();
        main.add_entry("d", "Direct", move || this.skip_next_pause())
            .unwrap();
        main.set_break_item("q", "Quit", count_quit);

        system.start_main_menu().unwrap();

        assert_eq!(quit.get(), 1);
        assert!(!main.node.borrow().skip_next_pause);
        assert!(transcript.contents().contains("<< Menu: 'Main' - choice: 'd'"));
        assert!(transcript.contents().contains("skip_next_pause"));
    }

    #[test]
    fn test_bottom_bracket_pauses_when_enabled() {
        let (system, transcript) = scripted(&["1", "", "q"], true);
        let main = system.create_menu("Main");
        let (quit, count_quit) = counter();
        main.add_entry("1", "One", || {}).unwrap();
        main.set_break_item("q", "Quit", count_quit);

        system.start_main_menu().unwrap();

        assert_eq!(quit.get(), 1);
        assert_eq!(transcript.count(t!("runtime.info.press_return")), 1);
    }

    #[test]
    fn test_running_flag_is_cleared_when_an_action_panics() {
        let (system, _) = scripted(&["boom"], false);
        let main = system.create_menu("Main");
        main.add_entry("boom", "Panics", || std::panic::panic_any("action failed"))
            .unwrap();
        main.set_break_item("q", "Quit", || {});

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            system.start_main_menu()
        }));

        assert!(outcome.is_err());
        assert!(!main.is_running());
    }

    #[test]
    fn test_drop_down_into_a_choose_one_menu_does_not_close_its_parent() {
        let (system, transcript) = scripted(&["p", "d", "x", "1", "q"], false);
        let main = system.create_menu("Main");
        let pick = system.create_menu("Pick");
        let deep = system.create_menu("Deep");
        let (one, count_one) = counter();
        let (quit, count_quit) = counter();
        main.add_entry("1", "One", count_one).unwrap();
        main.set_break_item("q", "Quit", count_quit);
        main.add_sub_menu(&pick, "p", "Pick one").unwrap();
        pick.set_choose_one(true);
        pick.add_sub_menu(&deep, "d", "Deep").unwrap();
        pick.set_break_item("c", "Cancel", || {});
        let target = pick.clone();
        deep.add_entry("x", "Back to pick", move || {
            let _ = target.start();
        })
        .unwrap();
        deep.set_break_item("b", "Back", || {});

        system.start_main_menu().unwrap();

        assert_eq!((one.get(), quit.get()), (1, 1));
        assert_eq!(transcript.count("\nMain\n"), 3);
        assert!(transcript.contents().contains("..............*  << Menu: 'Main' - choice: '1'"));
        assert_eq!(system.navigation().drop_down(), crate::state::DropDown::default());
        assert!(system.read_line().is_none());
    }

    #[test]
    fn test_failed_reset_after_an_action_closes_the_menu() {
        let (system, transcript) = scripted(&["1", "2", "q"], false);
        let main = system.create_menu("Main");
        let this = main.clone();
        main.add_entry("1", "Add the kill phrase as a key", move || {
            let _ = this.add_entry("Bye!", "Clashes", || {});
        })
        .unwrap();
        main.add_entry("2", "Two", || {}).unwrap();
        main.set_break_item("q", "Quit", || {});

        system.start_main_menu().unwrap();

        assert!(main.is_killed());
        assert!(!main.is_running());
        assert!(transcript.contents().contains(t!("alert.banner")));
        assert_eq!(system.read_line().as_deref(), Some("2"));
    }
}
