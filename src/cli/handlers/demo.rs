// src/cli/handlers/demo.rs

//! The demo menu tree shipped with the `juusmenu` binary. It exercises every
//! feature of the engine: submenus, a drop-down back to the main menu, a
//! choose-one menu started from an action, and entries edited at runtime.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::core::menu::Menu;
use crate::core::system::MenuSystem;
use crate::models::{Alignment, MenuOptions};
use crate::system::console::StdConsole;

/// Runs the demo on the terminal until the user quits the main menu.
///
/// After the kill phrase the user is asked whether to leave; answering no
/// clears the kill switch and opens the main menu again.
pub fn handle(options: MenuOptions) -> Result<()> {
    let system = MenuSystem::with_options(options, StdConsole);
    build(&system)?;

    loop {
        system.start_main_menu()?;
        if !system.was_killed() {
            break;
        }
        if Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("demo.prompt.leave"))
            .default(true)
            .interact()?
        {
            break;
        }
        system.unkill();
    }

    println!("\n{}", t!("demo.info.goodbye").green());
    Ok(())
}

/// Builds the demo menus on `system` and returns the main menu.
pub fn build(system: &MenuSystem) -> Result<Menu> {
    let main = system.create_menu(t!("demo.menu.main"));
    let settings = system.create_menu(t!("demo.menu.settings"));
    let workshop = system.create_menu(t!("demo.menu.workshop"));
    let confirm = system.create_menu(t!("demo.menu.confirm"));

    build_main(system, &main, &confirm)?;
    build_settings(system, &settings, &main)?;
    build_workshop(system, &workshop)?;
    build_confirm(&confirm)?;

    main.add_sub_menu(&settings, "s", t!("demo.entry.settings"))?;
    main.add_sub_menu(&workshop, "w", t!("demo.entry.workshop"))?;
    Ok(main)
}

fn build_main(system: &MenuSystem, main: &Menu, confirm: &Menu) -> Result<()> {
    main.add_entry("1", t!("demo.entry.hello"), || {
        println!("{}", t!("demo.info.hello").cyan());
    })?;

    let sys = system.clone();
    main.add_entry("2", t!("demo.entry.name"), move || {
        let name = sys.prompt_line(t!("demo.prompt.name"));
        if !name.is_empty() {
            println!(t!("demo.info.greet"), name = name.cyan());
        }
    })?;

    // Started from an action rather than as a submenu, so the pause after it
    // is skipped by hand.
    let (this, choice) = (main.clone(), confirm.clone());
    main.add_entry("c", t!("demo.entry.confirm"), move || {
        this.skip_next_pause();
        let _ = choice.start();
    })?;

    main.set_break_item("q", t!("demo.entry.quit"), || {});
    Ok(())
}

fn build_settings(system: &MenuSystem, settings: &Menu, main: &Menu) -> Result<()> {
    let sys = system.clone();
    settings.add_entry("a", t!("demo.entry.align"), move || {
        sys.update_options(|options| {
            let next = match options.alignment() {
                Alignment::Left => Alignment::Right,
                Alignment::Right => Alignment::Left,
            };
            options.set_alignment(next);
        });
        println!(t!("demo.info.now"), value = sys.options().alignment());
    })?;

    let sys = system.clone();
    settings.add_entry("p", t!("demo.entry.pause"), move || {
        sys.update_options(|options| options.set_pause_on_output(!options.pause_on_output()));
        println!(t!("demo.info.now"), value = sys.options().pause_on_output());
    })?;

    let sys = system.clone();
    settings.add_entry("e", t!("demo.entry.echo"), move || {
        sys.update_options(|options| options.set_echo_menu_and_key(!options.echo_menu_and_key()));
        println!(t!("demo.info.now"), value = sys.options().echo_menu_and_key());
    })?;

    let sys = system.clone();
    settings.add_entry("o", t!("demo.entry.show_options"), move || {
        println!("{}", sys.options());
    })?;

    // The main menu is already open, so this drops back down to it.
    let target = main.clone();
    settings.add_entry("m", t!("demo.entry.back_to_main"), move || {
        let _ = target.start();
    })?;

    settings.set_break_item("b", t!("demo.entry.back"), || {});
    Ok(())
}

fn build_workshop(system: &MenuSystem, workshop: &Menu) -> Result<()> {
    let added = Rc::new(Cell::new(0_u32));

    let (this, count) = (workshop.clone(), Rc::clone(&added));
    workshop.add_entry("+", t!("demo.entry.add"), move || {
        let next = count.get() + 1;
        let key = format!("x{}", next);
        let hint = format!(t!("demo.entry.added"), number = next);
        let added = this.add_entry(&key, &hint, move || {
            println!(t!("demo.info.added_ran"), number = next);
        });
        if added.is_ok() {
            count.set(next);
        }
    })?;

    let (this, count) = (workshop.clone(), Rc::clone(&added));
    workshop.add_entry("-", t!("demo.entry.remove"), move || {
        let last = count.get();
        if last == 0 {
            println!("{}", t!("demo.info.nothing_to_remove"));
        } else if this.remove_entry(&format!("x{}", last)).is_ok() {
            count.set(last - 1);
        }
    })?;

    let (this, sys) = (workshop.clone(), system.clone());
    workshop.add_entry("t", t!("demo.entry.rename"), move || {
        let title = sys.prompt_line(t!("demo.prompt.title"));
        if !title.is_empty() {
            let _ = this.change_title(&title);
        }
    })?;

    let this = workshop.clone();
    workshop.add_entry("r", t!("demo.entry.reverse"), move || {
        this.set_sort_descending(!this.is_sort_descending());
    })?;

    let this = workshop.clone();
    workshop.add_entry("i", t!("demo.entry.describe"), move || {
        println!("{}", this);
    })?;

    workshop.set_break_item("b", t!("demo.entry.back"), || {});
    Ok(())
}

fn build_confirm(confirm: &Menu) -> Result<()> {
    confirm.set_choose_one(true);
    confirm.add_entry("y", t!("demo.entry.yes"), || {
        println!("{}", t!("demo.info.confirmed").green());
    })?;
    confirm.add_entry("n", t!("demo.entry.no"), || {
        println!("{}", t!("demo.info.declined").yellow());
    })?;
    confirm.set_break_item("c", t!("demo.entry.cancel"), || {});
    Ok(())
}
