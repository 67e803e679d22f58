use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use kruti_engine::converter::explain;
use kruti_engine::docx::DocxConverter;
use kruti_engine::settings::{init_custom, settings};
use kruti_engine::trace_init::init_tracing;
use kruti_engine::Converter;

#[derive(Parser)]
#[command(name = "krutitool", about = "Unicode Hindi to Kruti Dev 010 conversion")]
struct Cli {
    /// TOML file overriding the built-in settings
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Write a JSON trace to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text given as an argument or on stdin
    Convert {
        /// Text to convert (reads stdin when omitted)
        text: Option<String>,
        /// List codepoints that had no mapping on stderr
        #[arg(long)]
        report: bool,
        /// Print font segments as JSON instead of plain text
        #[arg(long)]
        segments: bool,
    },

    /// Convert a plain-text, .docx or .doc file
    File {
        /// Input file
        input: PathBuf,
        /// Output file (.docx for Word input)
        output: PathBuf,
    },

    /// Show how each syllable of the text is converted
    Explain {
        /// Text to explain
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert words from a file and record the results to JSONL
    Snapshot {
        /// Path to the input file (one word or phrase per line)
        input_file: String,
        /// Path to the output JSONL file
        output_file: String,
    },

    /// Compare current output against a saved snapshot
    DiffSnapshot {
        /// Path to the input file (one word or phrase per line)
        input_file: String,
        /// Path to the baseline JSONL snapshot file
        baseline_file: String,
    },
}

/// A single snapshot entry (one per input line).
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    input: String,
    output: String,
}

macro_rules! die {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        process::exit(1);
    }};
}

fn load_settings(path: &Path) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| die!("Failed to read settings {}: {}", path.display(), e));
    init_custom(content)
        .unwrap_or_else(|e| die!("Invalid settings {}: {}", path.display(), e));
}

fn read_inputs(input_file: &str) -> Vec<String> {
    let file = fs::File::open(input_file)
        .unwrap_or_else(|e| die!("Failed to open input file {}: {}", input_file, e));
    BufReader::new(file)
        .lines()
        .map(|l| l.unwrap_or_else(|e| die!("Failed to read line: {}", e)))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

fn run_snapshot(converter: &Converter, inputs: &[String]) -> Vec<SnapshotEntry> {
    let outputs = converter.convert_batch(inputs, settings().batch.workers);
    inputs
        .iter()
        .zip(outputs)
        .map(|(input, output)| SnapshotEntry {
            input: input.clone(),
            output,
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| die!("JSON serialization failed: {}", e))
}

fn is_word_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx") || e.eq_ignore_ascii_case("doc"))
}

fn convert_plain_file(converter: &Converter, input: &Path, output: &Path) {
    let content = fs::read_to_string(input)
        .unwrap_or_else(|e| die!("Failed to read {}: {}", input.display(), e));
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let converted = converter.convert_batch(&lines, settings().batch.workers);

    let file = fs::File::create(output)
        .unwrap_or_else(|e| die!("Failed to create output file {}: {}", output.display(), e));
    let mut writer = BufWriter::new(file);
    for line in &converted {
        writer
            .write_all(line.as_bytes())
            .unwrap_or_else(|e| die!("Failed to write: {}", e));
    }
    writer
        .flush()
        .unwrap_or_else(|e| die!("Failed to write: {}", e));
    eprintln!(
        "Converted {} lines: {} -> {}",
        lines.len(),
        input.display(),
        output.display()
    );
}

fn main() {
    let cli = Cli::parse();
    if let Some(path) = &cli.settings {
        load_settings(path);
    }
    let _trace = cli.trace_dir.as_deref().map(init_tracing);
    let converter = Converter::default();

    match cli.command {
        Command::Convert {
            text,
            report,
            segments,
        } => {
            let text = text.unwrap_or_else(|| {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .unwrap_or_else(|e| die!("Failed to read stdin: {}", e));
                buf
            });

            if segments {
                println!("{}", to_json(&converter.convert_segments(&text), true));
                return;
            }

            let converted = converter.convert(&text);
            print!("{}", converted.text());
            if !converted.text().ends_with('\n') {
                println!();
            }
            if report {
                for u in converted.unmapped() {
                    eprintln!("unmapped U+{:04X} {} at {}", u.ch as u32, u.ch, u.offset);
                }
            }
        }

        Command::File { input, output } => {
            if is_word_document(&input) {
                let report = DocxConverter::default()
                    .convert_file(&input, &output)
                    .unwrap_or_else(|e| die!("Failed to convert {}: {}", input.display(), e));
                eprintln!(
                    "Converted {} parts ({} runs, {} split, {} unmapped): {} -> {}",
                    report.parts.len(),
                    report.runs_converted,
                    report.runs_split,
                    report.unmapped,
                    input.display(),
                    output.display()
                );
            } else {
                convert_plain_file(&converter, &input, &output);
            }
        }

        Command::Explain { text, json } => {
            let result = converter.explain(&text);
            if json {
                println!("{}", to_json(&result, true));
            } else {
                print!("{}", explain::format_text(&result));
            }
        }

        Command::Snapshot {
            input_file,
            output_file,
        } => {
            let inputs = read_inputs(&input_file);

            let file = fs::File::create(&output_file)
                .unwrap_or_else(|e| die!("Failed to create output file {}: {}", output_file, e));
            let mut writer = BufWriter::new(file);

            for entry in run_snapshot(&converter, &inputs) {
                writeln!(writer, "{}", to_json(&entry, false))
                    .unwrap_or_else(|e| die!("Failed to write: {}", e));
            }
            writer
                .flush()
                .unwrap_or_else(|e| die!("Failed to write: {}", e));

            eprintln!(
                "Snapshot written: {} inputs -> {}",
                inputs.len(),
                output_file
            );
        }

        Command::DiffSnapshot {
            input_file,
            baseline_file,
        } => {
            let inputs = read_inputs(&input_file);

            let baseline_content = fs::read_to_string(&baseline_file).unwrap_or_else(|e| {
                die!("Failed to read baseline file {}: {}", baseline_file, e)
            });
            let mut baseline: HashMap<String, String> = HashMap::new();
            for line in baseline_content.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                let entry: SnapshotEntry = serde_json::from_str(line)
                    .unwrap_or_else(|e| die!("Failed to parse baseline JSONL: {}", e));
                baseline.insert(entry.input, entry.output);
            }

            let mut changed = 0usize;
            let mut same = 0usize;
            let mut new_count = 0usize;
            let total = inputs.len();

            for current in run_snapshot(&converter, &inputs) {
                match baseline.get(&current.input) {
                    Some(base) if *base == current.output => same += 1,
                    Some(base) => {
                        changed += 1;
                        println!(
                            "  CHANGED: {} -> {} (was: {})",
                            current.input, current.output, base
                        );
                    }
                    None => {
                        new_count += 1;
                        println!("  NEW:     {} -> {}", current.input, current.output);
                    }
                }
            }

            println!();
            println!("=== Summary ===");
            println!("  Total:    {total}");
            println!("  Same:     {same}");
            println!("  Changed:  {changed}");
            println!("  New:      {new_count}");

            if changed > 0 {
                process::exit(1);
            }
        }
    }
}
