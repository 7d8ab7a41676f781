use anchor_lang::prelude::*;
use anchor_spl::token::{self, TransferChecked};

use crate::constants::POOL_SEED;
use crate::error::VestingError;

/// Moves value into and out of the pool vault.
pub trait Custody {
    /// Pulls `amount` from `from` into the vault.
    fn fund(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Pays `amount` out of the vault to `to`.
    fn release(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL token custody: a vault token account whose authority is the pool PDA.
pub struct VaultCustody<'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    pub vault: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub pool_bump: u8,
    /// Counterparty token account (issuer on fund, recipient on release).
    pub holder_token: AccountInfo<'info>,
    /// Owner of `holder_token`; signs funding transfers.
    pub holder: AccountInfo<'info>,
}

impl<'info> Custody for VaultCustody<'info> {
    fn fund(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*self.holder.key, *from, VestingError::InvalidTokenAccount);
        token::transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                TransferChecked {
                    from: self.holder_token.clone(),
                    mint: self.mint.clone(),
                    to: self.vault.clone(),
                    authority: self.holder.clone(),
                },
            ),
            amount,
            self.decimals,
        )
    }

    fn release(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*self.holder.key, *to, VestingError::InvalidTokenAccount);
        let bump = [self.pool_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[POOL_SEED, &bump]];
        token::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: self.vault.clone(),
                    mint: self.mint.clone(),
                    to: self.holder_token.clone(),
                    authority: self.pool.clone(),
                },
                signer_seeds,
            ),
            amount,
            self.decimals,
        )
    }
}
