use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, ROLES_SEED};
use crate::state::{AccessRoles, VestingPool};

pub fn grant_issuer_handler(ctx: Context<SetIssuer>, issuer: Pubkey) -> Result<()> {
    let caller = ctx.accounts.admin.key();
    ctx.accounts.roles.add_issuer(&caller, issuer)?;
    emit!(IssuerUpdated {
        admin: caller,
        issuer,
        enabled: true,
    });
    Ok(())
}

pub fn revoke_issuer_handler(ctx: Context<SetIssuer>, issuer: Pubkey) -> Result<()> {
    let caller = ctx.accounts.admin.key();
    ctx.accounts.roles.remove_issuer(&caller, &issuer)?;
    emit!(IssuerUpdated {
        admin: caller,
        issuer,
        enabled: false,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetIssuer<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,

    #[account(mut, seeds = [ROLES_SEED, pool.key().as_ref()], bump)]
    pub roles: Account<'info, AccessRoles>,

    pub admin: Signer<'info>,
}

#[event]
pub struct IssuerUpdated {
    pub admin: Pubkey,
    pub issuer: Pubkey,
    pub enabled: bool,
}
