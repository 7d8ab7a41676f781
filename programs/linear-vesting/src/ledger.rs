//! Grant funding and claim state transitions over the pool and its grants.
//!
//! Every operation validates and stages its writes first, then calls out to
//! custody, and only commits the staged state once the transfer succeeded.
//! A failure before the transfer leaves pool and grants exactly as they were;
//! on-chain, any later failure reverts the whole transaction.

use anchor_lang::prelude::*;

use crate::constants::MAX_BATCH_GRANTS;
use crate::custody::Custody;
use crate::error::VestingError;
use crate::state::{Authority, Capability, Grant, GrantRegistry, VestingPool};
use crate::utils::{digest, vesting};

/// Outcome of a committed `add_grants`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReceipt {
    pub grants: Vec<Grant>,
    pub total: u64,
    pub digest: [u8; 32],
}

/// Outcome of a committed `claim`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub amount: u64,
    pub total_claimed: u64,
}

/// Exclusive handle over the pool and the grants an instruction touches.
pub struct Ledger<'a, R: GrantRegistry + ?Sized> {
    pool: &'a mut VestingPool,
    registry: &'a mut R,
}

impl<'a, R: GrantRegistry + ?Sized> Ledger<'a, R> {
    pub fn new(pool: &'a mut VestingPool, registry: &'a mut R) -> Self {
        Self { pool, registry }
    }

    /// Creates one grant per recipient, funded by a single transfer of the
    /// batch sum from `caller`.
    pub fn add_grants<A, C>(
        &mut self,
        caller: &Pubkey,
        recipients: &[Pubkey],
        amounts: &[u64],
        authority: &A,
        custody: &mut C,
    ) -> std::result::Result<BatchReceipt, VestingError>
    where
        A: Authority + ?Sized,
        C: Custody + ?Sized,
    {
        if !authority.authorize(caller, Capability::Issuance) {
            return Err(VestingError::Unauthorized);
        }
        self.validate_batch(recipients, amounts)?;

        let mut total: u64 = 0;
        let mut grants = Vec::with_capacity(recipients.len());
        for (recipient, amount) in recipients.iter().zip(amounts) {
            total = total
                .checked_add(*amount)
                .ok_or(VestingError::MathOverflow)?;
            grants.push(Grant {
                recipient: *recipient,
                amount: *amount,
                total_claimed: 0,
                per_second_rate: self.pool.per_second_rate(*amount)?,
                bump: 0,
            });
        }

        let mut staged = self.pool.clone();
        staged.record_grants(total, grants.len() as u64)?;

        custody.fund(caller, total).map_err(|e| {
            msg!("add_grants: funding transfer of {} failed: {}", total, e);
            VestingError::FundingFailure
        })?;

        for g in &grants {
            self.registry.insert(*g).map_err(storage_failure)?;
        }
        *self.pool = staged;

        Ok(BatchReceipt {
            digest: digest::batch_digest(recipients, amounts),
            grants,
            total,
        })
    }

    /// Pays `caller` everything vested and not yet claimed at `now`.
    pub fn claim<C>(
        &mut self,
        caller: &Pubkey,
        now: i64,
        custody: &mut C,
    ) -> std::result::Result<ClaimReceipt, VestingError>
    where
        C: Custody + ?Sized,
    {
        // An absent grant reads as all zeros, so it never has anything vested.
        let grant = self
            .registry
            .get(caller)
            .map_err(storage_failure)?
            .unwrap_or_else(|| Grant::empty(*caller));
        let amount = vesting::claimable(self.pool, &grant, now)?;
        if amount == 0 {
            return Err(VestingError::NoClaimableAmount);
        }

        let mut staged_grant = grant;
        staged_grant.total_claimed = grant
            .total_claimed
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        let mut staged_pool = self.pool.clone();
        staged_pool.record_claim(amount)?;

        custody.release(caller, amount).map_err(|e| {
            msg!("claim: payout of {} failed: {}", amount, e);
            VestingError::TransferFailure
        })?;

        self.registry
            .update(staged_grant)
            .map_err(storage_failure)?;
        *self.pool = staged_pool;

        Ok(ClaimReceipt {
            amount,
            total_claimed: staged_grant.total_claimed,
        })
    }

    fn validate_batch(
        &self,
        recipients: &[Pubkey],
        amounts: &[u64],
    ) -> std::result::Result<(), VestingError> {
        if recipients.is_empty() {
            return Err(reject("empty batch"));
        }
        if recipients.len() > MAX_BATCH_GRANTS {
            return Err(reject("batch too large"));
        }
        if recipients.len() != amounts.len() {
            return Err(reject("recipients/amounts length mismatch"));
        }
        if amounts.iter().any(|a| *a == 0) {
            return Err(reject("zero amount"));
        }
        for r in recipients {
            if *r == Pubkey::default() {
                return Err(reject("default recipient key"));
            }
            if self.registry.exists(r).map_err(storage_failure)? {
                return Err(reject("recipient already has a grant"));
            }
        }
        let mut sorted = recipients.to_vec();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(reject("duplicate recipient in batch"));
        }
        Ok(())
    }
}

fn reject(reason: &str) -> VestingError {
    msg!("add_grants rejected: {}", reason);
    VestingError::InvalidBatch
}

fn storage_failure(e: anchor_lang::error::Error) -> VestingError {
    msg!("grant storage: {}", e);
    VestingError::GrantStorage
}
