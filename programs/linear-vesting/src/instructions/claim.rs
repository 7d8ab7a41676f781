use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{GRANT_SEED, POOL_SEED, VAULT_SEED};
use crate::custody::VaultCustody;
use crate::error::VestingError;
use crate::ledger::Ledger;
use crate::state::{GrantAccounts, VestingPool};

pub fn claim_handler(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claimant = ctx.accounts.claimant.key();

    let mut custody = VaultCustody {
        token_program: ctx.accounts.token_program.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        decimals: ctx.accounts.mint.decimals,
        vault: ctx.accounts.vault.to_account_info(),
        pool: ctx.accounts.pool.to_account_info(),
        pool_bump: ctx.accounts.pool.bump,
        holder_token: ctx.accounts.claimant_token_account.to_account_info(),
        holder: ctx.accounts.claimant.to_account_info(),
    };

    let mut grant = GrantAccounts::single(
        ctx.accounts.pool.key(),
        claimant,
        ctx.accounts.grant.to_account_info(),
        ctx.bumps.grant,
    );

    let receipt = Ledger::new(&mut ctx.accounts.pool, &mut grant)
        .claim(&claimant, now, &mut custody)?;

    emit!(Claimed {
        recipient: claimant,
        amount: receipt.amount,
        total_claimed: receipt.total_claimed,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut, seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,

    /// CHECK: the claimant's grant PDA, read and written through
    /// `GrantAccounts`. May be uninitialized when no grant exists.
    #[account(
        mut,
        seeds = [GRANT_SEED, pool.key().as_ref(), claimant.key().as_ref()],
        bump
    )]
    pub grant: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        constraint = vault.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(constraint = mint.key() == pool.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    // Pre-created token account policy: the claimant brings their own.
    #[account(
        mut,
        constraint = claimant_token_account.mint == pool.mint @ VestingError::InvalidTokenMint,
        constraint = claimant_token_account.owner == claimant.key() @ VestingError::InvalidTokenAccount,
    )]
    pub claimant_token_account: Box<Account<'info, TokenAccount>>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct Claimed {
    pub recipient: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
    pub timestamp: i64,
}
