//! freqout CLI: convert a two-track MIDI file to a BS2 program.
//!
//! Usage:
//!   freqout song.mid
//!   freqout song.mid -o song.bs2 --config settings.json

use freqout::{convert_file, ConversionSettings};
use std::{env, fs};

const DEFAULT_OUTPUT: &str = "program.bs2";

fn main() {
    let args: Vec<String> = env::args().collect();
    let input = args.get(1).filter(|a| !a.starts_with('-')).unwrap_or_else(|| {
        eprintln!("Usage: freqout <input.mid> [-o output.bs2] [--config settings.json]");
        std::process::exit(1);
    });

    let output = flag_value(&args, &["-o", "--output"]).unwrap_or(DEFAULT_OUTPUT);

    let settings = flag_value(&args, &["--config"]).map(|path| {
        let json = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        });
        ConversionSettings::from_json(&json).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        })
    });

    let result = convert_file(input, settings).unwrap_or_else(|e| {
        eprintln!("Failed to convert {}: {}", input, e);
        std::process::exit(1);
    });

    print!("{}", result.program);

    fs::write(output, &result.program).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", output, e);
        std::process::exit(1);
    });

    eprintln!(
        "Wrote {} instructions ({:.1} s at {:.1} BPM) to {}",
        result.instructions.len(),
        result.total_ms() as f64 / 1000.0,
        result.tempo.bpm(),
        output
    );
}

/// Value following the first of `names` on the command line
fn flag_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
