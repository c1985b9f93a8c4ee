//! Pipeline Benchmarking Tool
//!
//! Measures each stage of the analysis pipeline on a large text file, such as
//! a book collection or an article dump, to give realistic throughput numbers.
//!
//! ## What It Benchmarks
//!
//! 1. **Normalization** at several batch sizes (parallel line sanitizing)
//! 2. **Tokenization** of the normalized text
//! 3. **Grouping** words by frequency
//! 4. **Full Pipeline**: everything above plus report rendering
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/tally_bench /path/to/corpus.txt
//!
//! # Only time the given batch sizes
//! ./target/release/tally_bench /path/to/corpus.txt 100 5000
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Normalize (task limit 500) ===
//! --------------------------------
//! Mode        : Normalize
//! Elapsed     : 0.118 s
//! Throughput  : 1.342 GiB/s
//! --------------------------------
//! ```
//!
//! Build in release mode and use an input of 100MB+ for stable numbers.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use wordtally_core::analyzer::frequency::group;
use wordtally_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
use wordtally_core::analyzer::tokenizer::word_count;
use wordtally_core::{load, AnalysisStats, Analyzer, AnalyzerConfig};
use wordtally_types::format::group_thousands;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;
const DEFAULT_LIMITS: [usize; 4] = [50, 500, 5_000, usize::MAX];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("Usage: tally_bench <path> [task_limit...]");
    };

    let limits: Vec<usize> = args
        .map(|a| a.parse::<usize>().with_context(|| format!("bad task limit {a:?}")))
        .collect::<Result<_>>()?;
    let limits = if limits.is_empty() {
        DEFAULT_LIMITS.to_vec()
    } else {
        limits
    };

    println!("Loading file...");
    let document = load(&path).with_context(|| format!("could not load {}", path.display()))?;
    let lines = document.lines();
    let bytes: usize = lines.iter().map(|l| l.len() + 1).sum();

    println!("File size: {}", fmt_bytes(bytes as u64));
    println!("Lines:     {}", group_thousands(lines.len() as u64));
    println!("Threads:   {}\n", rayon::current_num_threads());

    for &limit in &limits {
        bench_normalize(lines, limit, bytes)?;
    }

    let normalized = TextNormalizer::default().normalize(lines)?;
    bench_tokenize(normalized.as_str());
    bench_group(normalized.as_str());
    bench_pipeline(lines, bytes)?;

    Ok(())
}

fn bench_normalize(lines: &[String], task_limit: usize, bytes: usize) -> Result<()> {
    let normalizer = TextNormalizer::new(NormalizerConfig { task_limit });
    let mut out = String::with_capacity(bytes);

    let label = if task_limit == usize::MAX {
        "single batch".to_string()
    } else {
        format!("task limit {}", group_thousands(task_limit as u64))
    };
    println!("=== Normalize ({label}) ===");

    warmup(|| {
        let _ = normalizer.normalize_into(lines, &mut out);
    });

    let mut batches = 0usize;
    let mut failure = None;
    let elapsed = measure(|| match normalizer.normalize_into(lines, &mut out) {
        Ok(n) => batches = n,
        Err(e) => failure = Some(e),
    });
    if let Some(err) = failure {
        return Err(err.into());
    }

    print_perf("Normalize", bytes, elapsed, 0);
    println!("Batches     : {}\n", group_thousands(batches as u64));
    Ok(())
}

fn bench_tokenize(text: &str) {
    println!("=== Tokenize ===");

    warmup(|| {
        std::hint::black_box(word_count(text).0);
    });

    let mut words = 0u64;
    let elapsed = measure(|| {
        words = word_count(text).0 as u64;
        std::hint::black_box(words);
    });

    print_perf("Tokenize", text.len(), elapsed, words);
}

fn bench_group(text: &str) {
    let (total, words) = word_count(text);

    println!("=== Group ===");

    warmup(|| {
        std::hint::black_box(group(words.as_slice()).unique_count);
    });

    let mut unique = 0usize;
    let elapsed = measure(|| {
        unique = group(words.as_slice()).unique_count;
        std::hint::black_box(unique);
    });

    print_perf("Group", text.len(), elapsed, total as u64);
    println!("Unique      : {}\n", group_thousands(unique as u64));
}

fn bench_pipeline(lines: &[String], bytes: usize) -> Result<()> {
    let analyzer = Analyzer::with_config(AnalyzerConfig::default());

    println!("=== Pipeline (report) ===");

    warmup(|| {
        let _ = std::hint::black_box(analyzer.analyze(lines));
    });

    let mut stats = AnalysisStats::default();
    let mut failure = None;
    let elapsed = measure(|| match analyzer.analyze(lines) {
        Ok(analysis) => stats = analysis.stats,
        Err(e) => failure = Some(e),
    });
    if let Some(err) = failure {
        return Err(err.into());
    }

    print_perf("Pipeline", bytes, elapsed, stats.total_words as u64);
    println!("Retained    : {:.2}% of characters", stats.retained_ratio());
    println!("Mean freq   : {:.2} per word", stats.mean_frequency());
    Ok(())
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, words: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if words > 0 {
        println!("Words       : {}", group_thousands(words));
        println!("Words/sec   : {}", group_thousands((words as f64 / secs) as u64));
    }

    println!("--------------------------------");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}
