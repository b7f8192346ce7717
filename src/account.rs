use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdrawal,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer { to: String },
    Received { from: String },
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Transfer { .. } => "Transfer",
            TransactionKind::Received { .. } => "Received",
        }
    }
}

/// Single entry of an account history. Amount is always positive, direction
/// is given by the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

impl Transaction {
    /// Receiving account for `Transfer`, sending account for `Received`.
    pub fn counterparty(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Transfer { to } => Some(to.as_str()),
            TransactionKind::Received { from } => Some(from.as_str()),
            TransactionKind::Deposit | TransactionKind::Withdrawal => None,
        }
    }
}

/// Both sides of a transfer. Produced together, applied together.
#[derive(Debug)]
pub struct TransferTransactions {
    pub outgoing: Transaction,
    pub incoming: Transaction,
}

/// Decides whether a transfer is allowed to empty the sending account.
/// Withdrawals are always allowed to take the whole balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferPolicy {
    /// Transfer amount must be strictly less than the balance.
    #[default]
    RequireRemainder,
    /// Transfer amount may be equal to the balance.
    AllowFullBalance,
}

impl TransferPolicy {
    fn permits(self, amount: Decimal, balance: Decimal) -> bool {
        match self {
            TransferPolicy::RequireRemainder => amount < balance,
            TransferPolicy::AllowFullBalance => amount <= balance,
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Account name must not be blank")]
    BlankName,
    #[error("Amount must be a number")]
    NotANumber,
    #[error("Initial deposit must be greater than or equal to 0")]
    NegativeInitialDeposit,
    #[error("Amount of {operation:?} must be greater than 0")]
    NonPositiveAmount { operation: Operation },
    #[error("Recipient account does not exist")]
    MissingRecipient,
    #[error("Account does not exist")]
    UnknownAccount,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("Insufficient funds: {operation:?} of {requested} exceeds available balance {available}")]
    InsufficientFunds {
        operation: Operation,
        requested: Decimal,
        available: Decimal,
    },
    #[error("Balance would overflow")]
    BalanceOverflow,
    #[error("Amount {amount} cannot be represented exactly next to balance {balance}")]
    PrecisionLoss { amount: Decimal, balance: Decimal },
}

#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    balance: Decimal,
    history: Vec<Transaction>,
}

impl Account {
    /// Opens an account with a starting balance. The starting balance is not
    /// recorded in the history.
    pub fn open(name: impl Into<String>, initial_deposit: Decimal) -> Result<Self, AccountError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidArgument::BlankName.into());
        }
        if initial_deposit < Decimal::zero() {
            return Err(InvalidArgument::NegativeInitialDeposit.into());
        }
        Ok(Self {
            name,
            balance: initial_deposit,
            history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Chronological, read-only view of everything that changed the balance
    /// after the account was opened.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let tx = self.handle_deposit(amount)?;
        self.apply(tx);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let tx = self.handle_withdrawal(amount)?;
        self.apply(tx);
        Ok(())
    }

    /// Transfers under the default [`TransferPolicy`], so the sender can never
    /// send its whole balance this way.
    pub fn transfer(&mut self, amount: Decimal, recipient: &mut Account) -> Result<(), AccountError> {
        let txs = self.handle_transfer(amount, Some(&*recipient), TransferPolicy::default())?;
        self.apply(txs.outgoing);
        recipient.apply(txs.incoming);
        Ok(())
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<Transaction, AccountError> {
        ensure_positive(amount, Operation::Deposit)?;
        credited(self.balance, amount)?;
        Ok(Transaction {
            kind: TransactionKind::Deposit,
            amount,
        })
    }

    pub fn handle_withdrawal(&self, amount: Decimal) -> Result<Transaction, AccountError> {
        ensure_positive(amount, Operation::Withdrawal)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                operation: Operation::Withdrawal,
                requested: amount,
                available: self.balance,
            });
        }
        debited(self.balance, amount)?;
        Ok(Transaction {
            kind: TransactionKind::Withdrawal,
            amount,
        })
    }

    /// Validates a transfer to `recipient` and returns the pair of records to
    /// apply. Checks run in a fixed order: amount sign, sender balance, then
    /// recipient presence.
    pub fn handle_transfer(
        &self,
        amount: Decimal,
        recipient: Option<&Account>,
        policy: TransferPolicy,
    ) -> Result<TransferTransactions, AccountError> {
        ensure_positive(amount, Operation::Transfer)?;
        if !policy.permits(amount, self.balance) {
            return Err(AccountError::InsufficientFunds {
                operation: Operation::Transfer,
                requested: amount,
                available: self.balance,
            });
        }
        let recipient = recipient.ok_or(InvalidArgument::MissingRecipient)?;
        debited(self.balance, amount)?;
        credited(recipient.balance, amount)?;

        Ok(TransferTransactions {
            outgoing: Transaction {
                kind: TransactionKind::Transfer {
                    to: recipient.name.clone(),
                },
                amount,
            },
            incoming: Transaction {
                kind: TransactionKind::Received {
                    from: self.name.clone(),
                },
                amount,
            },
        })
    }

    /// Records a transaction produced by one of the `handle_*` methods.
    pub(crate) fn apply(&mut self, tx: Transaction) {
        match tx.kind {
            TransactionKind::Deposit | TransactionKind::Received { .. } => {
                self.balance += tx.amount;
            }
            TransactionKind::Withdrawal | TransactionKind::Transfer { .. } => {
                self.balance -= tx.amount;
            }
        }
        debug!(
            account = %self.name,
            kind = tx.kind.label(),
            amount = %tx.amount,
            balance = %self.balance,
            "Applied transaction"
        );
        self.history.push(tx);
    }
}

/// `balance + amount`, refused unless the sum is exact. `Decimal` rounds
/// results that need more than 28 significant digits instead of failing.
fn credited(balance: Decimal, amount: Decimal) -> Result<Decimal, AccountError> {
    let new_balance = balance
        .checked_add(amount)
        .ok_or(AccountError::BalanceOverflow)?;
    if new_balance - balance != amount {
        return Err(AccountError::PrecisionLoss { amount, balance });
    }
    Ok(new_balance)
}

/// `balance - amount`, refused unless the difference is exact.
fn debited(balance: Decimal, amount: Decimal) -> Result<Decimal, AccountError> {
    let new_balance = balance
        .checked_sub(amount)
        .ok_or(AccountError::BalanceOverflow)?;
    if balance - new_balance != amount {
        return Err(AccountError::PrecisionLoss { amount, balance });
    }
    Ok(new_balance)
}

fn ensure_positive(amount: Decimal, operation: Operation) -> Result<(), InvalidArgument> {
    if amount > Decimal::zero() {
        Ok(())
    } else {
        Err(InvalidArgument::NonPositiveAmount { operation })
    }
}
