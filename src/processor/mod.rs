use thiserror::Error;

use crate::{
    account::AccountError,
    command::{BankCommand, CommandError},
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

pub trait CommandProcessor {
    fn process_command(&mut self, command: BankCommand) -> Result<(), ProcessError>;
}
