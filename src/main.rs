use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use stone_i18n::{Params, Translator, catalogs_from_json_str};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("stone-i18n")
        .version("0.1.0")
        .about("Translate a message using JSON catalogs")
        .arg(
            Arg::new("message")
                .help("Source message to translate")
                .required_unless_present("list")
                .index(1),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .short('c')
                .help("Catalog JSON file (repeatable, later files merge over earlier ones)")
                .action(ArgAction::Append)
                .required(true),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Candidate locale, in order of preference (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("param")
                .long("param")
                .short('p')
                .help("Placeholder value as name=value (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("plural")
                .long("plural")
                .help("Plural source message, used with --count"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .help("Count selecting the plural form")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("lazy")
                .long("lazy")
                .help("Translate through a lazy string created before the locale is selected")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the registered locales and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show locale resolution details")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let translator = Translator::new();
    for path in matches.get_many::<String>("catalog").into_iter().flatten() {
        let json = fs::read_to_string(Path::new(path))
            .map_err(|e| format!("Failed to read catalog '{}': {}", path, e))?;
        let catalogs = catalogs_from_json_str(&json)
            .map_err(|e| format!("Failed to load catalog '{}': {}", path, e))?;
        debug!("Loaded {} locales from {}", catalogs.len(), path);
        translator.add_catalogs(catalogs);
    }

    if matches.get_flag("list") {
        for locale in translator.list_catalogs() {
            println!("{}", locale);
        }
        return Ok(());
    }

    let mut params = Params::new();
    for pair in matches.get_many::<String>("param").into_iter().flatten() {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid parameter '{}', expected name=value", pair))?;
        params.insert(name, value);
    }

    let message = matches
        .get_one::<String>("message")
        .ok_or("Missing message")?;
    let count = matches.get_one::<u64>("count").copied();
    let plural = matches
        .get_one::<String>("plural")
        .map(String::as_str)
        .unwrap_or(message);

    // A lazy string is created before the locale is chosen and still picks it up
    let lazy = matches.get_flag("lazy").then(|| match count {
        Some(n) => translator.lazy_ngettext_with(message, plural, n, params.clone()),
        None => translator.lazy_gettext_with(message, params.clone()),
    });

    let candidates: Vec<String> = matches
        .get_many::<String>("locale")
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    if !candidates.is_empty() {
        let locale = translator.set_best_matching_locale(candidates);
        info!("Using locale '{}'", locale);
    }

    let translated = match (lazy, count) {
        (Some(lazy), _) => lazy.to_string(),
        (None, Some(n)) => translator.ngettext_with(message, plural, n, &params),
        (None, None) => translator.gettext_with(message, &params),
    };
    println!("{}", translated);

    Ok(())
}
