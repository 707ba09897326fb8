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

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("can't open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("can't read line {line} of {path}: {source}")]
    Read {
        path: String,
        line: usize,
        source: io::Error,
    },
}

/// Reads one transaction per line, items separated by commas. Tokens are
/// trimmed; lines without any token are skipped. Items repeated within a
/// line are kept.
pub struct TransactionReader<R> {
    reader: R,
    path: String,
    line_number: usize,
}

impl TransactionReader<BufReader<File>> {
    pub fn open(path: &str) -> Result<TransactionReader<BufReader<File>>, ReadError> {
        let file = File::open(path).map_err(|source| ReadError::Open {
            path: String::from(path),
            source,
        })?;
        Ok(TransactionReader::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R, path: &str) -> TransactionReader<R> {
        TransactionReader {
            reader,
            path: String::from(path),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = Result<Vec<String>, ReadError>;
    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_number += 1;
            let len = match self.reader.read_line(&mut line) {
                Ok(len) => len,
                Err(source) => {
                    return Some(Err(ReadError::Read {
                        path: self.path.clone(),
                        line: self.line_number,
                        source,
                    }))
                }
            };
            if len == 0 {
                return None;
            }
            let items = split_line(&line);
            if !items.is_empty() {
                return Some(Ok(items));
            }
        }
    }
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
