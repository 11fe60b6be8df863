// fsmspell-watch: Replay a sequence of buffer edits through the diff engine.
//
// Reads successive snapshots of one buffer from stdin, separated by a line
// containing only `---`, and feeds each to the engine as if the user had
// edited the buffer into that state. For every pass it prints:
//   # pass N: T tokens, C changed, K classified, R removed
//   C: line:col word    (changed, correct)
//   W: line:col word    (changed, misspelled)
//   R: offset           (a word that started here is gone)
//
// Usage:
//   fsmspell-watch [-d WORDLIST] [OPTIONS] < edits.txt
//
// Options:
//   -d, --dict-path PATH   Word list, one word per line
//   --aligned              Align tokens across edits instead of keying by offset
//   --config PATH          JSON engine configuration
//   -h, --help             Print help

use std::io::{self, Read, Write};

use fsmspell_core::enums::DiffStrategy;
use fsmspell_core::position::LineIndex;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = fsmspell_cli::parse_dict_path(&args);

    if fsmspell_cli::wants_help(&args) {
        println!("fsmspell-watch: Replay buffer edits through the incremental checker.");
        println!();
        println!("Usage: fsmspell-watch [-d WORDLIST] [OPTIONS] < edits.txt");
        println!();
        println!("Snapshots on stdin are separated by a line containing only ---.");
        println!("Per snapshot prints the changed words and the removed offsets:");
        println!("  C: line:col word    (correct)");
        println!("  W: line:col word    (misspelled)");
        println!("  R: offset           (removed)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Word list, one word per line");
        println!("  --aligned              Align tokens across edits instead of keying by offset");
        println!("  --config PATH          JSON engine configuration");
        println!("  -h, --help             Print this help");
        return;
    }

    fsmspell_cli::init_tracing();

    let (config_path, mut args) = fsmspell_cli::take_option(&args, "--config", "--config")
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    let aligned = fsmspell_cli::take_flag(&mut args, None, "--aligned");
    if let Some(unknown) = args.first() {
        fsmspell_cli::fatal(&format!("unexpected argument {unknown}"));
    }

    let mut config = fsmspell_cli::load_config(config_path.as_deref())
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));
    if aligned {
        config.diff_strategy = DiffStrategy::Aligned;
    }
    let mut session = fsmspell_cli::load_session(dict_path.as_deref(), config)
        .unwrap_or_else(|e| fsmspell_cli::fatal(&e));

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .unwrap_or_else(|e| fsmspell_cli::fatal(&format!("error reading stdin: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for (pass, buffer) in fsmspell_cli::split_snapshots(&input).iter().enumerate() {
        let update = session.update(buffer);
        let index = LineIndex::new(buffer);
        let stats = update.stats;
        let _ = writeln!(
            out,
            "# pass {}: {} tokens, {} changed, {} classified, {} removed",
            pass + 1,
            stats.tokens,
            stats.changed,
            stats.classified,
            stats.removed
        );
        for verdict in &update.changed {
            let _ = writeln!(out, "{}", fsmspell_cli::format_verdict(&index, buffer, verdict));
        }
        for offset in &update.removed_offsets {
            let _ = writeln!(out, "R: {offset}");
        }
    }
}
