use crate::{
    bank::{AccountId, Bank, BankConfig},
    command::{BankCommand, CommandError},
};

use super::{CommandProcessor, ProcessError};

#[derive(Debug, Default)]
pub struct InMemoryCommandProcessor {
    pub bank: Bank,
}

impl InMemoryCommandProcessor {
    pub fn new(config: BankConfig) -> Self {
        Self {
            bank: Bank::new(config),
        }
    }

    fn resolve(&self, name: String) -> Result<AccountId, CommandError> {
        self.bank
            .find_by_name(&name)
            .ok_or(CommandError::UnknownAccount { name })
    }
}

impl CommandProcessor for InMemoryCommandProcessor {
    fn process_command(&mut self, command: BankCommand) -> Result<(), ProcessError> {
        match command {
            BankCommand::CreateAccount {
                name,
                initial_deposit,
            } => {
                self.bank.create_account(name, initial_deposit)?;
            }
            BankCommand::Deposit { account, amount } => {
                let id = self.resolve(account)?;
                self.bank.deposit(id, amount)?;
            }
            BankCommand::Withdraw { account, amount } => {
                let id = self.resolve(account)?;
                self.bank.withdraw(id, amount)?;
            }
            BankCommand::Transfer {
                account,
                amount,
                recipient,
            } => {
                let from = self.resolve(account)?;
                // unknown recipients are rejected by the bank, after balance checks
                let to = recipient.and_then(|name| self.bank.find_by_name(&name));
                self.bank.transfer(from, amount, to)?;
            }
        };
        Ok(())
    }
}
