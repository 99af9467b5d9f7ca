use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use bootstrap_significance::order::{apply_order, parse_order};
use clap::Parser;
use log::info;

/// Rearrange source sentences following an order file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tokenized source sentences
    source: PathBuf,
    /// One order per line: source token indices
    order: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let source_reader = BufReader::new(File::open(&args.source)?);
    let order_reader = BufReader::new(File::open(&args.order)?);

    let stdout = io::stdout();
    let mut output_writer = BufWriter::new(stdout.lock());

    for (line_no, (line, order)) in source_reader.lines().zip(order_reader.lines()).enumerate() {
        let line = line?;
        let order = order?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match parse_order(&order, line_no + 1)
            .ok()
            .and_then(|order| apply_order(&words, &order))
        {
            Some(reordered) => writeln!(output_writer, "{}", reordered.join(" "))?,
            None => eprintln!("Error at line {}", line_no),
        }

        if line_no % 10000 == 0 {
            info!("processing line: {}", line_no);
        }
    }

    output_writer.flush()?;
    Ok(())
}
