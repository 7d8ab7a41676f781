use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, ROLES_SEED, VAULT_SEED};
use crate::custody::VaultCustody;
use crate::error::VestingError;
use crate::ledger::Ledger;
use crate::state::{AccessRoles, GrantAccounts, GrantFunder, VestingPool};

/// `remaining_accounts[i]` must be the grant PDA of `recipients[i]`,
/// writable and not yet created; the issuer pays its rent.
pub fn add_grants_handler<'info>(
    ctx: Context<'_, '_, '_, 'info, AddGrants<'info>>,
    recipients: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let issuer = ctx.accounts.issuer.key();

    // Capture AccountInfos before the ledger takes the pool mutably.
    let mut custody = VaultCustody {
        token_program: ctx.accounts.token_program.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        decimals: ctx.accounts.mint.decimals,
        vault: ctx.accounts.vault.to_account_info(),
        pool: ctx.accounts.pool.to_account_info(),
        pool_bump: ctx.accounts.pool.bump,
        holder_token: ctx.accounts.issuer_token_account.to_account_info(),
        holder: ctx.accounts.issuer.to_account_info(),
    };

    let mut grants = GrantAccounts::bind(
        ctx.accounts.pool.key(),
        &recipients,
        ctx.remaining_accounts,
        GrantFunder {
            payer: ctx.accounts.issuer.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
    )?;

    let receipt = Ledger::new(&mut ctx.accounts.pool, &mut grants).add_grants(
        &issuer,
        &recipients,
        &amounts,
        &**ctx.accounts.roles,
        &mut custody,
    )?;

    for g in &receipt.grants {
        emit!(GrantCreated {
            recipient: g.recipient,
            amount: g.amount,
            per_second_rate: g.per_second_rate,
            created_at: now,
        });
    }
    emit!(GrantsAdded {
        issuer,
        count: receipt.grants.len() as u16,
        total: receipt.total,
        batch_digest: receipt.digest,
        grant_count: ctx.accounts.pool.grant_count,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AddGrants<'info> {
    #[account(mut, seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,

    #[account(seeds = [ROLES_SEED, pool.key().as_ref()], bump)]
    pub roles: Box<Account<'info, AccessRoles>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        constraint = vault.mint == pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(constraint = mint.key() == pool.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = issuer_token_account.mint == pool.mint @ VestingError::InvalidTokenMint,
        constraint = issuer_token_account.owner == issuer.key() @ VestingError::InvalidTokenAccount,
    )]
    pub issuer_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub issuer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct GrantCreated {
    pub recipient: Pubkey,
    pub amount: u64,
    pub per_second_rate: u64,
    pub created_at: i64,
}

#[event]
pub struct GrantsAdded {
    pub issuer: Pubkey,
    pub count: u16,
    pub total: u64,
    /// blake3 over the ordered (recipient, amount) pairs.
    pub batch_digest: [u8; 32],
    pub grant_count: u64,
}
