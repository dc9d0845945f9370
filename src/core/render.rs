// src/core/render.rs

//! Text of everything the runner prints: the menu screen and the brackets
//! around an action's output. Nothing here touches the console.

use crate::constants::{KILL_BANNER_DISABLED, MENU_RULE};
use crate::models::MenuOptions;
use crate::system::aligner::ColumnAligner;

/// Which bracket to print around an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// Before the action runs.
    Top,
    /// After the action returns; followed by a pause when enabled.
    Bottom,
    /// After the action returns, never followed by a pause.
    Partial,
}

/// The full menu screen, ending with the prompt (no trailing newline).
///
/// `breadcrumb` runs from the outermost ancestor down to the rendered menu;
/// `rows` are `(key, hint)` pairs in display order.
pub fn render_menu(breadcrumb: &[String], rows: &[(String, String)], options: &MenuOptions) -> String {
    let separator = format!(" {} ", options.menu_separator());
    let mut out = String::from("\n");
    out.push_str(&breadcrumb.join(&separator));
    out.push('\n');
    out.push_str(MENU_RULE);
    out.push('\n');

    let mut aligner = ColumnAligner::new(options.alignment());
    for (key, hint) in rows {
        aligner.push_line(&format!("{}\t: \t{}", key, hint));
    }
    out.push_str(&aligner.flush());

    out.push_str(&kill_banner(options.kill_phrase()));
    out.push('\n');
    out.push_str(options.menu_prompt());
    out
}

/// The line under the entries that advertises the kill phrase.
pub fn kill_banner(kill_phrase: &str) -> String {
    if kill_phrase.is_empty() {
        return KILL_BANNER_DISABLED.to_string();
    }
    format!(
        "===============  '{}' immediately exits all Menus  =========",
        kill_phrase
    )
}

/// The bracket text for `kind`. `title` and `choice` are echoed when
/// `echo_menu_and_key` is on.
pub fn bracket(options: &MenuOptions, kind: Bracket, title: &str, choice: &str) -> String {
    match kind {
        Bracket::Top => format!(
            "\n\n\n{}{}\n",
            options.func_bracket_top(),
            runner_line(options, ">>", title, choice)
        ),
        Bracket::Bottom | Bracket::Partial => format!(
            "{}{}\n",
            options.func_bracket_bottom(),
            runner_line(options, "<<", title, choice)
        ),
    }
}

fn runner_line(options: &MenuOptions, indicator: &str, title: &str, choice: &str) -> String {
    if !options.echo_menu_and_key() {
        return String::new();
    }
    format!("  {} Menu: '{}' - choice: '{}'\n", indicator, title, choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Alignment;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, h)| (k.to_string(), h.to_string()))
            .collect()
    }

    #[test]
    fn test_render_menu_left_aligned() {
        let options = MenuOptions::default();
        let breadcrumb = vec!["Main".to_string(), "Tools".to_string()];
        let screen = render_menu(
            &breadcrumb,
            &rows(&[("1", "Run"), ("10", "Build"), ("q", "Quit")]),
            &options,
        );

        let expected = format!(
            "\nMain : Tools\n{}\n1  :  Run\n10 :  Build\nq  :  Quit\n\
             ===============  'Bye!' immediately exits all Menus  =========\n>>: ",
            MENU_RULE
        );
        assert_eq!(screen, expected);
    }

    #[test]
    fn test_render_menu_right_aligned_and_kill_disabled() {
        let mut options = MenuOptions::default();
        options.set_alignment(Alignment::Right);
        options.set_kill_phrase("");
        let screen = render_menu(
            &["Main".to_string()],
            &rows(&[("1", "Run"), ("10", "Build")]),
            &options,
        );

        assert!(screen.contains("\n  1 : Run\n 10 : Build\n"));
        assert!(screen.contains(KILL_BANNER_DISABLED));
        assert!(!screen.contains("immediately exits"));
    }

    #[test]
    fn test_brackets_with_and_without_echo() {
        let mut options = MenuOptions::default();
        let top = bracket(&options, Bracket::Top, "Main", "2");
        assert_eq!(
            top,
            "\n\n\n*..............  >> Menu: 'Main' - choice: '2'\n\n"
        );
        let bottom = bracket(&options, Bracket::Bottom, "Main", "2");
        assert_eq!(bottom, "..............*  << Menu: 'Main' - choice: '2'\n\n");
        assert_eq!(bracket(&options, Bracket::Partial, "Main", "2"), bottom);

        options.set_echo_menu_and_key(false);
        assert_eq!(bracket(&options, Bracket::Top, "Main", "2"), "\n\n\n*..............\n");
        assert_eq!(bracket(&options, Bracket::Bottom, "Main", "2"), "..............*\n");
    }
}
