// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod command_line_args;
mod transaction_reader;

use command_line_args::parse_args_or_exit;
use command_line_args::Arguments;
use fpgrowth::fp_growth;
use fpgrowth::FrequentItemsets;
use transaction_reader::TransactionReader;

use std::error::Error;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn write_itemsets(
    output: &mut dyn Write,
    itemsets: &FrequentItemsets,
    min_count: u32,
) -> io::Result<()> {
    writeln!(output, "MinSupport={}", min_count)?;
    writeln!(output, "Total number of Frequent Patterns is :{}", itemsets.len())?;
    writeln!(output, "Frequent Patterns and their Support")?;
    for (item, count) in itemsets.singles() {
        writeln!(output, "{}:{}", item, count)?;
    }
    for (itemset, count) in itemsets.sorted() {
        writeln!(output, "{}:{}", itemset.join(" "), count)?;
    }
    output.flush()
}

fn mine_fp_growth(args: &Arguments) -> Result<(), Box<dyn Error>> {
    info!("Mining data set: {}", args.input_file_path);
    let start = Instant::now();

    let timer = Instant::now();
    let transactions: Vec<Vec<String>> =
        TransactionReader::open(&args.input_file_path)?.collect::<Result<_, _>>()?;
    let min_count = args.min_count_for(transactions.len());
    info!(
        transactions = transactions.len(),
        min_count,
        "Loading dataset took {} ms.",
        timer.elapsed().as_millis()
    );

    let timer = Instant::now();
    let itemsets = fp_growth(&transactions, min_count);
    info!(
        "FPGrowth generated {} frequent itemsets ({} single items) in {} ms.",
        itemsets.len(),
        itemsets.singles().len(),
        timer.elapsed().as_millis()
    );

    match args.output_file_path {
        Some(ref path) => {
            let mut output = BufWriter::new(File::create(path)?);
            write_itemsets(&mut output, &itemsets, min_count)?;
        }
        None => {
            let stdout = io::stdout();
            let mut output = stdout.lock();
            write_itemsets(&mut output, &itemsets, min_count)?;
        }
    }

    info!("Total runtime: {} ms", start.elapsed().as_millis());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let arguments = parse_args_or_exit();

    if let Err(err) = mine_fp_growth(&arguments) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
