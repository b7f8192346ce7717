use std::io::Read;

use crate::command::OperationKind;
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

/// Raw script row. Amount is kept as text so the command layer decides what
/// a malformed number means.
#[derive(Debug, Deserialize)]
pub struct ScriptRow {
    pub op: OperationKind,
    pub account: String,
    pub amount: Option<String>,
    pub recipient: Option<String>,
}

/// Parses a bank operation script in CSV format, yielding each row with the
/// line it starts on.
pub struct CsvScriptParser<R> {
    header_err: Option<csv::Error>,
    iter: DeserializeRecordsIntoIter<R, ScriptRow>,
}

impl<R> CsvScriptParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        // consume the header up front so positions point at data rows
        let header_err = reader.headers().err();

        Self {
            header_err,
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvScriptParser<R>
where
    R: Read,
{
    type Item = (u64, Result<ScriptRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.header_err.take() {
            return Some((1, Err(err)));
        }
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
