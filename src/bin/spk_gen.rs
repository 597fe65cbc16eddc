//! Generate a sample sparsepack value stream.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparsepack::logging::setup_logging;
use sparsepack::{Codec, Schema, Value, ValueKind};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "spk-gen")]
#[command(about = "Encode sample debug-info records into a sparsepack stream")]
#[command(after_help = "CSV FORMAT:\n  \
    When using --csv, each line is one record with one field per schema column\n  \
    - Lines starting with # are comments\n  \
    - Empty lines are skipped\n  \
    - float/double fields accept 0x-prefixed raw bit patterns\n  \
    - bool fields accept true/false/1/0\n\n\
KINDS:\n  \
    int, sint, float, double, long, bool, byte")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Comma-separated value kinds making up one record
    #[arg(short, long, default_value = "int,bool,byte,sint,double,long")]
    schema: Schema,

    /// Input CSV file with one record per line (overrides random generation)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of random records to generate
    #[arg(short, long, default_value = "1000")]
    records: usize,

    /// Integer strategy to encode with
    #[arg(short, long, value_enum, default_value_t = Codec::Sparse)]
    codec: Codec,

    /// Seed for random generation
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Flush to a byte boundary after every record, as scope writers do
    #[arg(long)]
    scopes: bool,

    /// Log filter directives (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log: String,

    /// Human readable logs instead of JSON
    #[arg(long)]
    pretty: bool,
}

/// Read records from a CSV file
fn read_csv(path: &Path, schema: &Schema) -> Result<Vec<Vec<Value>>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open CSV: {e}"))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let record = schema
            .parse_record(trimmed)
            .map_err(|e| format!("Line {}: {}", line_num + 1, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Random value shaped like real debug info: mostly zeros and small numbers
fn random_value(rng: &mut StdRng, kind: ValueKind) -> Value {
    let small = rng.random_range(0..100) < 80;
    match kind {
        ValueKind::Int => Value::Int(if small { rng.random_range(0..64) } else { rng.random() }),
        ValueKind::SignedInt => Value::SignedInt(if small { rng.random_range(-32..32) } else { rng.random() }),
        ValueKind::Float => Value::Float(if small {
            rng.random_range(-64..64i32) as f32 / 2.0
        } else {
            rng.random()
        }),
        ValueKind::Double => Value::Double(if small {
            f64::from(rng.random_range(-1024..1024i32)) / 8.0
        } else {
            rng.random()
        }),
        ValueKind::Long => Value::Long(if small { rng.random_range(-1000..1000) } else { rng.random() }),
        ValueKind::Bool => Value::Bool(rng.random_bool(0.2)),
        ValueKind::Byte => Value::Byte(if small { 0 } else { rng.random() }),
    }
}

fn generate_records(args: &Args) -> Vec<Vec<Value>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    (0..args.records)
        .map(|_| {
            args.schema
                .kinds()
                .iter()
                .map(|&kind| random_value(&mut rng, kind))
                .collect()
        })
        .collect()
}

/// Encode all records, returning the flushed bytes
fn encode(codec: Codec, records: &[Vec<Value>], scopes: bool) -> Vec<u8> {
    let mut out = codec.writer();
    for record in records {
        for value in record {
            value.write_to(out.as_mut());
        }
        if scopes {
            out.align();
        }
    }
    let len = out.position();
    out.buffer()[..len].to_vec()
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log, args.pretty);

    let (records, from_csv) = if let Some(csv_path) = &args.csv {
        match read_csv(csv_path, &args.schema) {
            Ok(r) => {
                println!("Reading {} records from CSV...", r.len());
                (r, true)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        (generate_records(&args), false)
    };

    let bytes = encode(args.codec, &records, args.scopes);
    let other = encode(args.codec.other(), &records, args.scopes);
    tracing::info!(records = records.len(), bytes = bytes.len(), from_csv, "encoded stream");

    let mut file = match File::create(&args.output) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: Failed to create {}: {e}", args.output.display());
            std::process::exit(1);
        }
    };
    if let Err(e) = file.write_all(&bytes) {
        eprintln!("Error: Failed to write data: {e}");
        std::process::exit(1);
    }

    let values = records.len() * args.schema.len();
    println!(
        "{} {} records (schema {})",
        if from_csv { "Encoded" } else { "Generated" },
        records.len(),
        args.schema
    );
    println!("Output: {} ({} bytes, {:?})", args.output.display(), bytes.len(), args.codec);
    if values > 0 {
        println!("Bits per value: {:.2}", (bytes.len() * 8) as f64 / values as f64);
    }
    println!("Same records with {:?}: {} bytes", args.codec.other(), other.len());
}
