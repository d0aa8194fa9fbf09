//! Per-call execution context: account frames, signer checks, and the write
//! overlay.

use {
    crate::{error::LedgerError, store::Account},
    log::*,
    solana_clock::Clock,
    solana_pubkey::Pubkey,
    std::collections::HashMap,
};

/// One entry of a caller-supplied account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account entry.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account entry.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// The account list of one (possibly nested) program invocation.
#[derive(Debug)]
struct Frame {
    accounts: Vec<AccountMeta>,
}

/// The view a program handler executes against: the current invocation's
/// account list, the shared uncommitted write overlay, and the clock.
///
/// Reads see staged writes first, then the committed store.  Writes require
/// the current frame to hold the target account writable.  Nothing reaches
/// the committed store until the enclosing [`crate::Ledger::execute`]
/// returns `Ok`.
pub struct CallContext<'a> {
    base: &'a HashMap<Pubkey, Account>,
    writes: HashMap<Pubkey, Option<Account>>,
    frames: Vec<Frame>,
    clock: Clock,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        base: &'a HashMap<Pubkey, Account>,
        clock: Clock,
        instruction_accounts: Vec<AccountMeta>,
    ) -> Self {
        Self {
            base,
            writes: HashMap::new(),
            frames: vec![Frame {
                accounts: instruction_accounts,
            }],
            clock,
        }
    }

    pub(crate) fn into_writes(self) -> HashMap<Pubkey, Option<Account>> {
        self.writes
    }

    /// The clock at the time the call started.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    fn frame(&self) -> &Frame {
        // A context always holds the frame it was created with.
        self.frames.last().expect("call context has no frame")
    }

    /// Fail `NotEnoughAccountKeys` unless the current frame holds at least
    /// `expected` accounts.
    pub fn check_number_of_instruction_accounts(
        &self,
        expected: usize,
    ) -> Result<(), LedgerError> {
        if self.frame().accounts.len() < expected {
            return Err(LedgerError::NotEnoughAccountKeys);
        }
        Ok(())
    }

    /// The current frame's full account list.  Forwarders use this to pass
    /// their remaining accounts through to a downstream program.
    pub fn instruction_accounts(&self) -> &[AccountMeta] {
        &self.frame().accounts
    }

    /// Address of instruction account `index` in the current frame.
    pub fn instruction_account_key(&self, index: usize) -> Result<&Pubkey, LedgerError> {
        self.frame()
            .accounts
            .get(index)
            .map(|meta| &meta.pubkey)
            .ok_or(LedgerError::NotEnoughAccountKeys)
    }

    /// Whether instruction account `index` signed this call.
    pub fn is_instruction_account_signer(&self, index: usize) -> Result<bool, LedgerError> {
        self.frame()
            .accounts
            .get(index)
            .map(|meta| meta.is_signer)
            .ok_or(LedgerError::NotEnoughAccountKeys)
    }

    /// Whether instruction account `index` was listed writable.
    pub fn is_instruction_account_writable(&self, index: usize) -> Result<bool, LedgerError> {
        self.frame()
            .accounts
            .get(index)
            .map(|meta| meta.is_writable)
            .ok_or(LedgerError::NotEnoughAccountKeys)
    }

    /// Read an account: staged writes shadow the committed store; a staged
    /// close reads as absent.
    pub fn account(&self, address: &Pubkey) -> Option<&Account> {
        match self.writes.get(address) {
            Some(staged) => staged.as_ref(),
            None => self.base.get(address),
        }
    }

    fn check_writable(&self, address: &Pubkey) -> Result<(), LedgerError> {
        let writable = self
            .frame()
            .accounts
            .iter()
            .any(|meta| meta.pubkey == *address && meta.is_writable);
        if !writable {
            return Err(LedgerError::AccountNotWritable);
        }
        Ok(())
    }

    /// Stage a write of `data` to `address`, owned by `owner`.
    ///
    /// The current frame must hold `address` writable.  An existing record's
    /// storage deposit is preserved across overwrites.
    pub fn set_account(
        &mut self,
        address: Pubkey,
        owner: Pubkey,
        data: Vec<u8>,
    ) -> Result<(), LedgerError> {
        self.check_writable(&address)?;
        let lamports = self.account(&address).map(|a| a.lamports).unwrap_or(0);
        self.writes.insert(
            address,
            Some(Account {
                lamports,
                owner,
                data,
            }),
        );
        Ok(())
    }

    /// Stage the removal of `address`, refunding its storage deposit to
    /// `refund`.  Both accounts must be held writable by the current frame.
    pub fn close_account(
        &mut self,
        address: &Pubkey,
        refund: &Pubkey,
    ) -> Result<(), LedgerError> {
        self.check_writable(address)?;
        self.check_writable(refund)?;
        let deposit = self.account(address).map(|a| a.lamports).unwrap_or(0);
        let mut refund_account = self.account(refund).cloned().unwrap_or_default();
        refund_account.lamports = refund_account
            .lamports
            .checked_add(deposit)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.writes.insert(*refund, Some(refund_account));
        self.writes.insert(*address, None);
        Ok(())
    }

    fn frame_holds_signer(&self, address: &Pubkey) -> bool {
        self.frame()
            .accounts
            .iter()
            .any(|meta| meta.pubkey == *address && meta.is_signer)
    }

    /// Invoke a nested program call over `accounts`, signing for
    /// `signer_addresses` in addition to the signatures the current frame
    /// already holds.
    ///
    /// `signer_addresses` is the derived-address capability: a program may
    /// sign for records derived from its own id.  Flagging any other account
    /// as signer without the parent holding that signature fails
    /// `PrivilegeEscalation`.  The nested call shares the write overlay, so
    /// its failure unwinds the entire outer call.
    pub fn invoke_signed<F>(
        &mut self,
        accounts: Vec<AccountMeta>,
        signer_addresses: &[Pubkey],
        f: F,
    ) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut Self) -> Result<(), LedgerError>,
    {
        for meta in &accounts {
            if meta.is_signer
                && !self.frame_holds_signer(&meta.pubkey)
                && !signer_addresses.contains(&meta.pubkey)
            {
                debug!(
                    "invoke_signed: unauthorized signer flag for {}",
                    meta.pubkey
                );
                return Err(LedgerError::PrivilegeEscalation);
            }
        }
        self.frames.push(Frame { accounts });
        let result = f(self);
        self.frames.pop();
        result
    }
}
