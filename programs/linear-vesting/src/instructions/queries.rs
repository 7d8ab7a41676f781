use anchor_lang::prelude::*;

use crate::constants::{GRANT_SEED, POOL_SEED};
use crate::error::VestingError;
use crate::state::{Grant, GrantAccounts, GrantRegistry, GrantSnapshot, VestingPool};
use crate::utils::vesting;

// Read-only views. Unknown recipients read as an all-zero grant.

fn load_grant(ctx: &Context<ReadGrant>, recipient: Pubkey) -> Result<Grant> {
    let grants = GrantAccounts::single(
        ctx.accounts.pool.key(),
        recipient,
        ctx.accounts.grant.to_account_info(),
        ctx.bumps.grant,
    );
    let grant = grants.get(&recipient).map_err(|e| {
        msg!("grant storage: {}", e);
        error!(VestingError::GrantStorage)
    })?;
    Ok(grant.unwrap_or_else(|| Grant::empty(recipient)))
}

pub fn get_grant_handler(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<GrantSnapshot> {
    let grant = load_grant(&ctx, recipient)?;
    Ok(GrantSnapshot::from(&grant))
}

pub fn calculate_claimable_handler(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let grant = load_grant(&ctx, recipient)?;
    Ok(vesting::claimable(&ctx.accounts.pool, &grant, now)?)
}

pub fn vested_balance_handler(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let grant = load_grant(&ctx, recipient)?;
    Ok(vesting::vested_balance(&ctx.accounts.pool, &grant, now)?)
}

pub fn claimed_balance_handler(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
    Ok(load_grant(&ctx, recipient)?.total_claimed)
}

pub fn tokens_vested_per_day_handler(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
    let amount = load_grant(&ctx, recipient)?.amount;
    Ok(vesting::daily_rate(&ctx.accounts.pool, amount)?)
}

pub fn tokens_vested_per_day_for_amount_handler(
    ctx: Context<ReadPool>,
    amount: u64,
) -> Result<u64> {
    Ok(vesting::daily_rate(&ctx.accounts.pool, amount)?)
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct ReadGrant<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,

    /// CHECK: `recipient`'s grant PDA; may be uninitialized.
    #[account(seeds = [GRANT_SEED, pool.key().as_ref(), recipient.as_ref()], bump)]
    pub grant: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadPool<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,
}
