use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, ROLES_SEED, VAULT_SEED};
use crate::state::{AccessRoles, VestingPool};

pub fn initialize_handler(
    ctx: Context<InitializePool>,
    name: String,
    start_time: i64,
    vesting_duration: u64,
    admin: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mint = ctx.accounts.mint.key();

    let pool = &mut ctx.accounts.pool;
    pool.configure(name, mint, start_time, vesting_duration, now, ctx.bumps.pool)?;
    ctx.accounts.roles.bootstrap(admin)?;

    let pool = &ctx.accounts.pool;
    msg!(
        "pool {} vests {} from {} to {}",
        pool.name,
        pool.mint,
        pool.start_time,
        pool.end_time
    );
    emit!(PoolInitialized {
        pool: pool.key(),
        mint: pool.mint,
        admin,
        name: pool.name.clone(),
        start_time: pool.start_time,
        end_time: pool.end_time,
        vesting_duration: pool.vesting_duration,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = payer,
        space = VestingPool::SIZE,
        seeds = [POOL_SEED],
        bump
    )]
    pub pool: Account<'info, VestingPool>,

    #[account(
        init,
        payer = payer,
        space = AccessRoles::SIZE,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump
    )]
    pub roles: Box<Account<'info, AccessRoles>>,

    #[account(
        init,
        payer = payer,
        token::mint = mint,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub name: String,
    pub start_time: i64,
    pub end_time: i64,
    pub vesting_duration: u64,
}
