// build.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_LANG: &str = "en";

fn main() {
    // --- 1. Pick the message table: `lang_*` features first, then JUUSMENU_LANG ---
    let mut requested: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(|lang| lang.to_lowercase())
        })
        .collect();
    requested.sort();

    let lang = match requested.first() {
        Some(first) => {
            if requested.len() > 1 {
                println!(
                    "cargo:warning=Several language features enabled ({:?}). Using '{}'.",
                    requested, first
                );
            }
            first.clone()
        }
        None => env::var("JUUSMENU_LANG").unwrap_or_else(|_| FALLBACK_LANG.to_string()),
    };

    println!("cargo:rustc-env=JUUSMENU_LANG_EFFECTIVE={}", lang);
    println!("cargo:rerun-if-env-changed=JUUSMENU_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    // --- 2. English is always loaded; it fills any key a translation lacks ---
    let mut messages = read_table(&format!("locales/{}.toml", FALLBACK_LANG))
        .expect("Failed to load fallback message table: locales/en.toml");

    if lang != FALLBACK_LANG {
        let path = format!("locales/{}.toml", lang);
        match read_table(&path) {
            Some(specific) => messages.extend(specific),
            None => println!(
                "cargo:warning=Message table '{}' not found. Falling back to '{}'.",
                path, FALLBACK_LANG
            ),
        }
    }

    // --- 3. Generate the `t!` macro; unknown keys become compile errors ---
    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, value) in &messages {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        code.push_str(&format!("    (\"{}\") => {{ \"{}\" }};\n", key, escaped));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing message key: \", $key)) }};\n",
    );
    code.push('}');

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is always set for build scripts");
    fs::write(Path::new(&out_dir).join("translations.rs"), code)
        .expect("Failed to write generated translations.rs");
}

fn read_table(path: &str) -> Option<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).ok()?;
    let table = toml::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e));
    Some(table)
}
