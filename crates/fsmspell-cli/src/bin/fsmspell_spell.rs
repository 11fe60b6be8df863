// fsmspell-spell: Check the spelling of a whole buffer.
//
// Reads FILE (or stdin) as one buffer, runs a single check pass and prints
// one line per word in buffer order:
//   C: line:col word    (correct)
//   W: line:col word    (misspelled)
//
// Usage:
//   fsmspell-spell [-d WORDLIST] [OPTIONS] [FILE]
//
// Options:
//   -d, --dict-path PATH   Word list, one word per line
//   -s, --suggest          Also print suggestions for misspelled words
//   -w, --wrong-only       Print only misspelled words
//   --config PATH          JSON engine configuration
//   -h, --help             Print help

use std::io::{self, Read, Write};

use fsmspell_core::position::LineIndex;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = fsmspell_cli::parse_dict_path(&args);

    if fsmspell_cli::wants_help(&args) {
        println!("fsmspell-spell: Check the spelling of a whole buffer.");
        println!();
        println!("Usage: fsmspell-spell [-d WORDLIST] [OPTIONS] [FILE]");
        println!();
        println!("Reads FILE, or stdin when no FILE is given. Prints:");
        println!("  C: line:col word    (correct)");
        println!("  W: line:col word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Word list, one word per line");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  -w, --wrong-only       Print only misspelled words");
        println!("  --config PATH          JSON engine configuration");
        println!("  -h, --help             Print this help");
        return;
    }

    fsmspell_cli::init_tracing();

    let (config_path, mut args) = fsmspell_cli::take_option(&args, "--config", "--config")
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    let show_suggestions = fsmspell_cli::take_flag(&mut args, Some("-s"), "--suggest");
    let wrong_only = fsmspell_cli::take_flag(&mut args, Some("-w"), "--wrong-only");
    if let Some(unknown) = args.iter().find(|a| a.starts_with('-') && a.len() > 1) {
        fsmspell_cli::fatal(&format!("unknown option {unknown}"));
    }

    let buffer = match args.first() {
        Some(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| fsmspell_cli::fatal(&format!("failed to read {path}: {e}"))),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .unwrap_or_else(|e| fsmspell_cli::fatal(&format!("error reading stdin: {e}")));
            text
        }
    };

    let config = fsmspell_cli::load_config(config_path.as_deref())
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    let mut session = fsmspell_cli::load_session(dict_path.as_deref(), config)
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));

    let update = session.update(&buffer);
    let index = LineIndex::new(&buffer);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for verdict in &update.changed {
        if wrong_only && verdict.is_valid {
            continue;
        }
        let _ = writeln!(out, "{}", fsmspell_cli::format_verdict(&index, &buffer, verdict));
        if show_suggestions && !verdict.is_valid {
            for suggestion in session.suggest(&verdict.token.text) {
                let _ = writeln!(out, "{}", fsmspell_cli::format_suggestion(&suggestion));
            }
        }
    }
}
