//! itemdb-reader - decode an ItemDB container into a delimited text report
//!
//! Usage:
//!   itemdb-reader [input] [output] [--encoding <label>] [--delimiter <char>]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use itemdb_reader::report::{self, ReportOptions};
use itemdb_reader::{ItemDbReader, ITEM_SCHEMA};

#[derive(Parser)]
#[command(name = "itemdb-reader")]
#[command(version)]
#[command(about = "Decode an ItemDB container into a delimited text report", long_about = None)]
struct Cli {
    /// Path to the ItemDB file
    #[arg(default_value = "items.dat")]
    input: PathBuf,

    /// Path of the report to write
    #[arg(default_value = "items.txt")]
    output: PathBuf,

    /// Text encoding of the report (any WHATWG label, e.g. utf-8, latin1)
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,

    /// Column delimiter
    #[arg(short, long, default_value_t = '|')]
    delimiter: char,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let encoding = report::parse_encoding(&cli.encoding)
        .ok_or_else(|| anyhow!("Unknown output encoding: {}", cli.encoding))?;
    let options = ReportOptions { encoding, delimiter: cli.delimiter };

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let db = ItemDbReader::new(BufReader::new(file), &ITEM_SCHEMA)
        .and_then(|reader| reader.read_all())
        .with_context(|| format!("Failed to decode {}", cli.input.display()))?;

    let out = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut out = BufWriter::new(out);
    report::write_report(&mut out, &db, &ITEM_SCHEMA, &options)
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!(
        "Successfully parsed {} items from ItemDB v{} and wrote to {}",
        db.count,
        db.version,
        cli.output.display()
    );
    Ok(())
}
