use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{account::InvalidArgument, amount::parse_amount};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Deposit,
    #[serde(alias = "withdrawal")]
    Withdraw,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    CreateAccount {
        name: String,
        initial_deposit: Decimal,
    },
    Deposit {
        account: String,
        amount: Decimal,
    },
    Withdraw {
        account: String,
        amount: Decimal,
    },
    Transfer {
        account: String,
        amount: Decimal,
        recipient: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Invalid amount for {kind:?}: {source}")]
    InvalidAmount {
        kind: OperationKind,
        source: InvalidArgument,
    },
    #[error("Account `{name}` does not exist")]
    UnknownAccount { name: String },
    #[error("Malformed row: {0}")]
    MalformedRow(#[from] csv::Error),
}

impl BankCommand {
    /// Builds a command from the raw fields of a script row. Only the amount
    /// is checked here, names are resolved when the command is processed.
    pub fn parse_command(
        kind: OperationKind,
        account: String,
        amount: Option<&str>,
        recipient: Option<String>,
    ) -> Result<Self, CommandError> {
        let amount = Self::required_amount(kind, amount)?;
        Ok(match kind {
            OperationKind::Create => Self::CreateAccount {
                name: account,
                initial_deposit: amount,
            },
            OperationKind::Deposit => Self::Deposit { account, amount },
            OperationKind::Withdraw => Self::Withdraw { account, amount },
            OperationKind::Transfer => Self::Transfer {
                account,
                amount,
                recipient: recipient.filter(|name| !name.trim().is_empty()),
            },
        })
    }

    fn required_amount(kind: OperationKind, amount: Option<&str>) -> Result<Decimal, CommandError> {
        let Some(raw) = amount.filter(|raw| !raw.trim().is_empty()) else {
            return Err(CommandError::AmountRequired { kind });
        };
        parse_amount(raw).map_err(|source| CommandError::InvalidAmount { kind, source })
    }
}
