//! nameforge CLI — driving adapter for the naming engine.
//!
//! Subcommands:
//! - `inspect <name>... [--preset file] [--template tpl]` — decompose names
//! - `apply <name> <category>=<value>...` — edit categories and print the result
//! - `check [--preset file] [--template tpl]` — validate the configuration
//! - `info [--preset file]` — print the active template and vocabularies

use std::process;

use nameforge::{CategoryId, CategoryKind, Engine, EngineConfig, UserSettings};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "inspect" => cmd_inspect(&args[2..]),
        "apply" => cmd_apply(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "info" => cmd_info(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_inspect(args: &[String]) -> Result<(), String> {
    let (names, options) = split_options(args)?;
    if names.is_empty() {
        return Err("inspect requires at least one name".into());
    }

    let engine = build_engine(&options)?;
    for name in names {
        let inspection = engine
            .inspect(name)
            .map_err(|e| format!("inspect failed: {e}"))?;
        let json = serde_json::to_string_pretty(&inspection)
            .map_err(|e| format!("serialize failed: {e}"))?;
        println!("{name}:");
        println!("{json}");
    }
    Ok(())
}

fn cmd_apply(args: &[String]) -> Result<(), String> {
    let (positional, options) = split_options(args)?;
    let [name, edits @ ..] = positional.as_slice() else {
        return Err("apply requires a name and at least one category=value edit".into());
    };
    if edits.is_empty() {
        return Err("apply requires at least one category=value edit".into());
    }

    let engine = build_engine(&options)?;
    let mut current = (*name).to_owned();
    for edit in edits {
        let (id, value) = parse_edit(edit)?;
        current = engine
            .apply_category_edit(&current, id, value)
            .map_err(|e| format!("edit failed: {e}"))?;
    }
    println!("{current}");
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let (positional, options) = split_options(args)?;
    if !positional.is_empty() {
        return Err(format!("unexpected argument \"{}\"", positional[0]));
    }

    let engine = build_engine(&options)?;
    println!("Template valid: {}", engine.structure().template());
    Ok(())
}

fn cmd_info(args: &[String]) -> Result<(), String> {
    let (positional, options) = split_options(args)?;
    if !positional.is_empty() {
        return Err(format!("unexpected argument \"{}\"", positional[0]));
    }

    let engine = build_engine(&options)?;
    let config = engine.config();

    println!("Template:    {}", config.template);
    println!("Main group:  {}", config.main_group);
    println!("Digit width: {}", config.numeric_width);

    println!("\nCategories:");
    for category in engine.catalog().categories() {
        let optional = if engine.structure().is_optional_category(category.id) {
            "optional"
        } else {
            "mandatory"
        };
        match &category.kind {
            CategoryKind::Enumerated { values, .. } => {
                println!("  [{}] ({optional}): {}", category.id, values.join(", "));
            }
            CategoryKind::FixedWidthDigits { width } => {
                println!("  [{}] ({optional}): {width} digits", category.id);
            }
            CategoryKind::FreeText => {
                println!("  [{}] ({optional}): free text", category.id);
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Engine assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Options {
    preset_path: Option<String>,
    template: Option<String>,
}

fn build_engine(options: &Options) -> Result<Engine, String> {
    let mut config = match &options.preset_path {
        Some(path) => load_settings(path)?.active_engine_config(),
        None => EngineConfig::default(),
    };
    if let Some(template) = &options.template {
        config.template = template.clone();
    }
    Engine::from_config(&config).map_err(|e| format!("configuration invalid: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Settings loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_settings(path: &str) -> Result<UserSettings, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

/// Separate `--preset`/`--template` options from positional arguments.
fn split_options(args: &[String]) -> Result<(Vec<&String>, Options), String> {
    let mut positional = Vec::new();
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--preset" => {
                i += 1;
                let path = args.get(i).ok_or("--preset requires a file path")?;
                options.preset_path = Some(path.clone());
            }
            "--template" => {
                i += 1;
                let template = args.get(i).ok_or("--template requires a template string")?;
                options.template = Some(template.clone());
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option \"{other}\""));
            }
            _ => positional.push(&args[i]),
        }
        i += 1;
    }

    Ok((positional, options))
}

fn parse_edit(pair: &str) -> Result<(CategoryId, &str), String> {
    let (token, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("invalid edit \"{pair}\", expected category=value"))?;
    let id = CategoryId::parse(token)
        .ok_or_else(|| format!("unknown category \"{token}\" in edit \"{pair}\""))?;
    Ok((id, value))
}

fn print_usage() {
    eprintln!(
        "Usage: nameforge <command> [options]

Commands:
  inspect <name>...                  Decompose names against the template
  apply <name> <category=value>...   Edit categories and print the result
  check                              Validate the active configuration
  info                               Print the active template and vocabularies
  help                               Show this help

Options:
  --preset <file>      Load a JSON or YAML settings document
  --template <tpl>     Override the template"
    );
}
