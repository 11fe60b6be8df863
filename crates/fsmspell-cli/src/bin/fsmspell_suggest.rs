// fsmspell-suggest: Generate spelling suggestions for words.
//
// Takes words from the command line, or from stdin (one per line), and
// prints the closest dictionary words for each misspelled one. Correctly
// spelled words are printed as-is.
//
// Usage:
//   fsmspell-suggest [-d WORDLIST] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH      Word list, one word per line
//   -n, --max-suggestions N   Maximum number of suggestions (default: 5)
//   -c, --cutoff X            Minimum similarity in [0, 1] (default: 0.6)
//   -h, --help                Print help

use std::io::{self, BufRead, Write};

use fsmspell::{SpellConfig, SpellSession, SuggestOptions};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = fsmspell_cli::parse_dict_path(&args);

    if fsmspell_cli::wants_help(&args) {
        println!("fsmspell-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: fsmspell-suggest [-d WORDLIST] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH      Word list, one word per line");
        println!("  -n, --max-suggestions N   Maximum number of suggestions (default: 5)");
        println!("  -c, --cutoff X            Minimum similarity in [0, 1] (default: 0.6)");
        println!("  -h, --help                Print this help");
        return;
    }

    fsmspell_cli::init_tracing();

    let (max, args) = fsmspell_cli::take_option(&args, "-n", "--max-suggestions")
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    let (cutoff, args) = fsmspell_cli::take_option(&args, "-c", "--cutoff")
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    let words: Vec<String> = args.into_iter().filter(|a| !a.starts_with('-')).collect();

    let mut options = SuggestOptions::default();
    if let Some(max) = max {
        options.max_suggestions = max
            .parse()
            .unwrap_or_else(|_| fsmspell_cli::fatal("invalid number for --max-suggestions"));
    }
    if let Some(cutoff) = cutoff {
        options.cutoff = cutoff
            .parse()
            .unwrap_or_else(|_| fsmspell_cli::fatal("invalid number for --cutoff"));
    }
    if let Err(e) = options.validate() {
        fsmspell_cli::fatal(&e.to_string());
    }

    let config = SpellConfig {
        suggestions: options,
        ..SpellConfig::default()
    };
    let session = fsmspell_cli::load_session(dict_path.as_deref(), config)
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let suggest_word = |word: &str, session: &SpellSession, out: &mut dyn Write| {
        if session.check(word) {
            let _ = writeln!(out, "{word} (correct)");
            return;
        }
        let suggestions = session.suggest(word);
        if suggestions.is_empty() {
            let _ = writeln!(out, "{word}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{word}:");
            for s in &suggestions {
                let _ = writeln!(out, "  {} ({:.3})", s.word, s.score);
            }
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            suggest_word(word, &session, &mut out);
        }
    } else {
        for word in &words {
            suggest_word(word, &session, &mut out);
        }
    }
}
