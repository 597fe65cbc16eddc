//! Decode and print records from a sparsepack value stream.

use clap::Parser;
use serde::Serialize;
use sparsepack::logging::setup_logging;
use sparsepack::{Codec, Schema, Value};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spk-dump")]
#[command(about = "Decode records from a sparsepack stream")]
#[command(after_help = "The stream carries no header: the schema, record count and codec must \
    match what the producer wrote.")]
struct Args {
    /// Input file path
    input: PathBuf,

    /// Comma-separated value kinds making up one record
    #[arg(short, long, default_value = "int,bool,byte,sint,double,long")]
    schema: Schema,

    /// Number of records to decode
    #[arg(short, long)]
    records: usize,

    /// Integer strategy the stream was written with
    #[arg(short, long, value_enum, default_value_t = Codec::Sparse)]
    codec: Codec,

    /// Byte offset of the first record
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Print one JSON object per record
    #[arg(long)]
    json: bool,

    /// Log filter directives (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log: String,

    /// Human readable logs instead of JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct RecordLine<'a> {
    index: usize,
    offset: usize,
    values: &'a [Value],
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log, args.pretty);

    let data = match fs::read(&args.input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.input.display());
            std::process::exit(1);
        }
    };
    if args.offset > data.len() {
        eprintln!("Error: offset {} is past the end of a {}-byte file", args.offset, data.len());
        std::process::exit(1);
    }

    let mut input = args.codec.reader(&data, args.offset);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut decoded = 0;

    for index in 0..args.records {
        let offset = input.position();
        if offset >= data.len() {
            tracing::warn!(index, offset, "ran past the end of the stream");
            eprintln!("Warning: stream ended after {index} records");
            break;
        }
        let values = args.schema.read_record(input.as_mut());

        let written = if args.json {
            let line = RecordLine {
                index,
                offset,
                values: &values,
            };
            serde_json::to_string(&line)
                .map_err(io::Error::from)
                .and_then(|s| writeln!(out, "{s}"))
        } else {
            let fields: Vec<String> = values.iter().map(ToString::to_string).collect();
            writeln!(out, "{index:>6} @{offset:<6} {}", fields.join(","))
        };
        if let Err(e) = written {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }
        decoded += 1;
    }

    if let Err(e) = out.flush() {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
    tracing::debug!(end = input.position(), len = data.len(), "decode finished");
    eprintln!("Decoded {decoded} records, reader at byte {} of {}", input.position(), data.len());
}
