//! Bootstraps the bank behind a CSV operation script. Shared by the binary and
//! the integration tests.

use std::io::{Read, Write};

use crate::{
    account::TransactionKind,
    bank::BankConfig,
    command::BankCommand,
    processor::{
        CommandProcessor, ProcessError, in_memory_processor::InMemoryCommandProcessor,
    },
};
use anyhow::Result;
use csv_parser::{CsvScriptParser, ScriptRow};
use csv_printer::{AccountRow, HistoryRow, print_rows};
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: BankConfig,
    /// Print every account history after the balances.
    pub show_history: bool,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvScriptParser::new(self.input);

        let mut processor = InMemoryCommandProcessor::new(self.config);

        for (line, row) in parser {
            let result = row
                .map_err(|err| ProcessError::CommandErr(err.into()))
                .and_then(|row| process_row(&mut processor, row));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        let bank = &processor.bank;
        print_rows(
            &mut *self.output,
            bank.accounts().map(|(id, acc)| AccountRow {
                id: id.index(),
                name: acc.name(),
                balance: acc.balance(),
            }),
        )?;

        if self.show_history {
            writeln!(self.output)?;
            print_rows(
                &mut *self.output,
                bank.accounts().flat_map(|(id, acc)| {
                    acc.history().iter().map(move |tx| {
                        let counterparty = tx.counterparty();
                        let (to, from) = match tx.kind {
                            TransactionKind::Received { .. } => (None, counterparty),
                            _ => (counterparty, None),
                        };
                        HistoryRow {
                            id: id.index(),
                            name: acc.name(),
                            kind: tx.kind.label(),
                            amount: tx.amount,
                            to,
                            from,
                        }
                    })
                }),
            )?;
        }
        Ok(())
    }
}

fn process_row(
    processor: &mut InMemoryCommandProcessor,
    row: ScriptRow,
) -> Result<(), ProcessError> {
    let command =
        BankCommand::parse_command(row.op, row.account, row.amount.as_deref(), row.recipient)?;
    processor.process_command(command)
}
