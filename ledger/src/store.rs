//! The keyed account store.

use {
    crate::{
        context::{AccountMeta, CallContext},
        error::LedgerError,
    },
    log::*,
    solana_clock::Clock,
    solana_pubkey::Pubkey,
    std::collections::HashMap,
};

/// A stored record: raw data plus the program that owns it.
///
/// `lamports` carries the record's storage deposit so closing a record can
/// refund it; how much the host charges to materialise a record is a host
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Account {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl Account {
    /// A fresh record owned by `owner` holding `data`.
    pub fn new(owner: Pubkey, data: Vec<u8>) -> Self {
        Self {
            lamports: 0,
            owner,
            data,
        }
    }
}

/// The canonical account map plus the clock every call observes.
///
/// All mutation goes through [`Ledger::execute`]: a call either commits every
/// write it staged or none of them.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<Pubkey, Account>,
    clock: Clock,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clock calls will observe.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Advance the observed wall-clock time.
    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        self.clock.unix_timestamp = unix_timestamp;
    }

    /// Read a committed account.
    pub fn account(&self, address: &Pubkey) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Materialise an account directly, bypassing call execution.
    ///
    /// This is the host's side of account creation (funding, external
    /// programs such as the token or metadata program); program code never
    /// calls it.
    pub fn insert_account(&mut self, address: Pubkey, account: Account) {
        self.accounts.insert(address, account);
    }

    /// Run one entrypoint call against the store.
    ///
    /// `instruction_accounts` is the caller-supplied account list with
    /// explicit signer/writable flags.  Writes are staged in an overlay and
    /// committed only if `f` returns `Ok`; on error nothing persists.
    pub fn execute<F>(
        &mut self,
        instruction_accounts: Vec<AccountMeta>,
        f: F,
    ) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut CallContext) -> Result<(), LedgerError>,
    {
        let mut ctx = CallContext::new(&self.accounts, self.clock.clone(), instruction_accounts);
        f(&mut ctx)?;
        let writes = ctx.into_writes();
        trace!("ledger execute: committing {} account write(s)", writes.len());
        for (address, account) in writes {
            match account {
                Some(account) => {
                    self.accounts.insert(address, account);
                }
                None => {
                    self.accounts.remove(&address);
                }
            }
        }
        Ok(())
    }
}
