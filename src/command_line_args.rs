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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption};

pub struct Arguments {
    pub input_file_path: String,
    pub output_file_path: Option<String>,
    pub min_support: f64,
    pub min_count: Option<u32>,
}

impl Arguments {
    /// Absolute support threshold for a data set of `num_transactions`.
    pub fn min_count_for(&self, num_transactions: usize) -> u32 {
        match self.min_count {
            Some(min_count) => min_count,
            None => (self.min_support * num_transactions as f64) as u32,
        }
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_file_path: None,
        min_support: 0.25,
        min_count: None,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Frequent itemset mining with FP-Growth.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset, one comma separated transaction per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_file_path)
            .add_option(
                &["--output"],
                StoreOption,
                "File path in which to store frequent itemsets. Defaults to stdout.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range [0,1]. Default 0.25.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.min_count)
            .add_option(
                &["--min-count"],
                StoreOption,
                "Minimum itemset count. Overrides --min-support.",
            )
            .metavar("count");

        if env::args().count() == 1 {
            // Nothing useful to do if stderr is gone.
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    if args.min_support < 0.0 || args.min_support > 1.0 {
        eprintln!("Minimum itemset support must be in range [0,1]");
        process::exit(1);
    }

    args
}
