// fsmspell-cli: shared utilities for the command-line hosts.

use std::path::PathBuf;
use std::process;

use fsmspell::{DictionarySource, SpellConfig, SpellSession, Suggestion};
use fsmspell_core::position::LineIndex;
use fsmspell_core::token::Verdict;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a word list file.
const WORDLIST_ENV: &str = "FSMSPELL_WORDLIST";

/// Line that separates buffer snapshots on `fsmspell-watch` input.
pub const SNAPSHOT_SEPARATOR: &str = "---";

/// Install a stderr `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so a missing word
/// list is reported without any flags.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Find the word list and build a session around it.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `FSMSPELL_WORDLIST` environment variable
/// 3. `~/.config/fsmspell/words.txt`
/// 4. `/usr/share/dict/words`
///
/// If no candidate exists the first one is loaded anyway, which yields a
/// degraded session (every word flagged) and a logged warning.
pub fn load_session(dict_path: Option<&str>, config: SpellConfig) -> Result<SpellSession, String> {
    let search_paths = build_search_paths(dict_path);
    let chosen = search_paths
        .iter()
        .find(|p| p.is_file())
        .or_else(|| search_paths.first())
        .cloned()
        .ok_or_else(|| "no word list search paths".to_string())?;

    tracing::debug!(path = %chosen.display(), "using word list");
    Ok(SpellSession::from_source(DictionarySource::file(chosen), config))
}

/// Build the list of word list files to try, most specific first.
pub fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(WORDLIST_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".config").join("fsmspell").join("words.txt"));
    }

    paths.push(PathBuf::from("/usr/share/dict/words"));
    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Load a JSON configuration file, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&str>) -> Result<SpellConfig, String> {
    let Some(path) = path else {
        return Ok(SpellConfig::default());
    };
    let text =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    SpellConfig::from_json_str(&text).map_err(|e| format!("{path}: {e}"))
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Extract an option taking a value (`-x VALUE`, `--long VALUE` or
/// `--long=VALUE`). The last occurrence wins.
///
/// Returns `(value, remaining_args)`.
pub fn take_option(
    args: &[String],
    short: &str,
    long: &str,
) -> Result<(Option<String>, Vec<String>), String> {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();
    let inline = format!("{long}=");

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&inline) {
            value = Some(val.to_string());
        } else if arg == short || arg == long {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`; exits on a missing value.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    take_option(args, "-d", "--dict-path").unwrap_or_else(|e| fatal(&e))
}

/// Remove a boolean flag from `args`, reporting whether it was present.
pub fn take_flag(args: &mut Vec<String>, short: Option<&str>, long: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != long && Some(a.as_str()) != short);
    args.len() != before
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// `C: line:col text` for a valid word, `W: line:col text` otherwise.
pub fn format_verdict(index: &LineIndex, buffer: &str, verdict: &Verdict) -> String {
    let tag = if verdict.is_valid { 'C' } else { 'W' };
    let pos = index.char_position(buffer, verdict.offset());
    format!("{tag}: {}:{} {}", pos.line, pos.column, verdict.token.text)
}

pub fn format_suggestion(suggestion: &Suggestion) -> String {
    format!("S: {} ({:.3})", suggestion.word, suggestion.score)
}

/// Split `fsmspell-watch` input into buffer snapshots.
///
/// Snapshots are separated by a line holding only `---`. Lines inside a
/// snapshot are joined with `\n`; a trailing `\r` on the separator is
/// ignored.
pub fn split_snapshots(input: &str) -> Vec<String> {
    let mut snapshots = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in input.lines() {
        if line.trim_end_matches('\r') == SNAPSHOT_SEPARATOR {
            snapshots.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    snapshots.push(current.join("\n"));
    snapshots
}
