// Criterion benchmarks for fsmspell.
//
// Uses a generated word list so the benchmarks run anywhere. Set
// FSMSPELL_WORDLIST to a newline-separated word list to benchmark against a
// real dictionary instead.
//
// Run:
//   cargo bench -p fsmspell
//   FSMSPELL_WORDLIST=/usr/share/dict/words cargo bench -p fsmspell

use criterion::{Criterion, criterion_group, criterion_main};
use fsmspell::{DiffEngine, Dictionary, DictionarySource, Suggester, tokenize};
use fsmspell_core::character::CharPolicy;
use fsmspell_core::enums::DiffStrategy;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SYLLABLES: &[&str] = &[
    "ka", "ma", "sa", "la", "ta", "pa", "na", "ba", "ri", "ko", "lu", "ng", "to", "di", "we",
];

/// Deterministic pseudo-words built from syllables.
fn generated_words(count: usize) -> Vec<String> {
    let mut words = Vec::with_capacity(count);
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..count {
        let syllables = 1 + (state % 4) as usize;
        let mut word = String::new();
        for _ in 0..syllables {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            word.push_str(SYLLABLES[(state % SYLLABLES.len() as u64) as usize]);
        }
        words.push(word);
    }
    words
}

fn load_dictionary() -> Dictionary {
    if let Ok(path) = std::env::var("FSMSPELL_WORDLIST") {
        let dict = Dictionary::load(DictionarySource::file(path));
        if !dict.is_empty() {
            return dict;
        }
    }
    Dictionary::from_words(generated_words(50_000))
}

/// A buffer of roughly `words` words with every tenth word misspelled.
fn sample_buffer(dict: &Dictionary, words: usize) -> String {
    let vocabulary: Vec<&str> = dict.words().take(2_000).collect();
    let mut buffer = String::new();
    for i in 0..words {
        let word = vocabulary[i % vocabulary.len()];
        if i % 10 == 9 {
            buffer.push_str(&word.chars().rev().collect::<String>());
        } else {
            buffer.push_str(word);
        }
        buffer.push(if i % 12 == 11 { '\n' } else { ' ' });
    }
    buffer
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_tokenize(c: &mut Criterion) {
    let dict = load_dictionary();
    let buffer = sample_buffer(&dict, 5_000);
    let policy = CharPolicy::default();

    c.bench_function("tokenize_5000_words", |b| {
        b.iter(|| std::hint::black_box(tokenize(&buffer, &policy)));
    });
}

/// Full first pass, then the common case: one word edited in the middle.
fn bench_update(c: &mut Criterion) {
    let dict = load_dictionary();
    let buffer = sample_buffer(&dict, 5_000);
    let mid = buffer.len() / 2;
    let split = buffer[mid..].find(' ').map_or(mid, |i| mid + i);
    let mut edited = buffer.clone();
    edited.insert_str(split, "x");

    c.bench_function("update_first_pass_5000_words", |b| {
        b.iter(|| {
            let mut engine = DiffEngine::new(CharPolicy::default());
            std::hint::black_box(engine.update(&buffer, &dict));
        });
    });

    for strategy in [DiffStrategy::Offset, DiffStrategy::Aligned] {
        let mut engine = DiffEngine::with_strategy(CharPolicy::default(), strategy);
        engine.update(&buffer, &dict);
        let mut flip = false;
        c.bench_function(&format!("update_single_edit_{strategy:?}"), |b| {
            b.iter(|| {
                flip = !flip;
                let text = if flip { &edited } else { &buffer };
                std::hint::black_box(engine.update(text, &dict));
            });
        });
    }
}

/// Front insertion: every offset shifts.
fn bench_update_insert_front(c: &mut Criterion) {
    let dict = load_dictionary();
    let buffer = sample_buffer(&dict, 2_000);
    let shifted = format!("a {buffer}");

    for strategy in [DiffStrategy::Offset, DiffStrategy::Aligned] {
        let mut engine = DiffEngine::with_strategy(CharPolicy::default(), strategy);
        engine.update(&buffer, &dict);
        let mut flip = false;
        c.bench_function(&format!("update_insert_front_{strategy:?}"), |b| {
            b.iter(|| {
                flip = !flip;
                let text = if flip { &shifted } else { &buffer };
                std::hint::black_box(engine.update(text, &dict));
            });
        });
    }
}

fn bench_suggest(c: &mut Criterion) {
    let dict = load_dictionary();
    let suggester = Suggester::new(&dict, CharPolicy::default());
    let misspelled = ["kamasa", "salamta", "riko", "tolupa", "ngakawe"];

    c.bench_function("suggest_5_misspelled", |b| {
        b.iter(|| {
            for word in &misspelled {
                std::hint::black_box(suggester.suggest_default(word));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_update,
    bench_update_insert_front,
    bench_suggest,
);
criterion_main!(benches);
