use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use crate::account::{Account, AccountError, InvalidArgument, TransferPolicy};

/// Handle of an account owned by a [`Bank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(usize);

impl AccountId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BankConfig {
    pub transfer_policy: TransferPolicy,
}

#[derive(Debug, Default)]
pub struct Bank {
    config: BankConfig,
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new(config: BankConfig) -> Self {
        Self {
            config,
            accounts: Vec::new(),
        }
    }

    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        initial_deposit: Decimal,
    ) -> Result<AccountId, AccountError> {
        let account = Account::open(name, initial_deposit)?;
        let id = AccountId(self.accounts.len());
        debug!(%id, name = account.name(), %initial_deposit, "Account created");
        self.accounts.push(account);
        Ok(id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id.0)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id.0)
    }

    /// Accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = (AccountId, &Account)> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(idx, acc)| (AccountId(idx), acc))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Names are not unique, the most recently created match wins.
    pub fn find_by_name(&self, name: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .rposition(|acc| acc.name() == name)
            .map(AccountId)
    }

    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<(), AccountError> {
        self.account_mut(id)
            .ok_or(InvalidArgument::UnknownAccount)?
            .deposit(amount)
            .inspect_err(|err| debug!(%id, %amount, %err, "Deposit rejected"))
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<(), AccountError> {
        self.account_mut(id)
            .ok_or(InvalidArgument::UnknownAccount)?
            .withdraw(amount)
            .inspect_err(|err| debug!(%id, %amount, %err, "Withdrawal rejected"))
    }

    /// Moves `amount` between two accounts of this bank under the configured
    /// [`TransferPolicy`]. A missing or unknown recipient is reported only
    /// after the amount and balance checks pass. Transferring to the same
    /// account is allowed and records both entries on it.
    pub fn transfer(
        &mut self,
        from: AccountId,
        amount: Decimal,
        to: Option<AccountId>,
    ) -> Result<(), AccountError> {
        let sender = self.account(from).ok_or(InvalidArgument::UnknownAccount)?;
        let recipient = to.and_then(|id| self.account(id).map(|acc| (id, acc)));
        let txs = sender
            .handle_transfer(
                amount,
                recipient.map(|(_, acc)| acc),
                self.config.transfer_policy,
            )
            .inspect_err(|err| debug!(%from, %amount, %err, "Transfer rejected"))?;
        let Some((to, _)) = recipient else {
            return Err(InvalidArgument::MissingRecipient.into());
        };

        // both sides are validated, nothing below can fail
        self.accounts[from.0].apply(txs.outgoing);
        self.accounts[to.0].apply(txs.incoming);
        Ok(())
    }
}
