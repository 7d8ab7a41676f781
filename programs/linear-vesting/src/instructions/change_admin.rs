use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, ROLES_SEED};
use crate::state::{AccessRoles, VestingPool};

pub fn change_admin_handler(ctx: Context<ChangeAdmin>, new_admin: Pubkey) -> Result<()> {
    let caller = ctx.accounts.admin.key();
    let old_admin = ctx.accounts.roles.transfer_admin(&caller, new_admin)?;

    emit!(AdminChanged {
        old_admin,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ChangeAdmin<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Account<'info, VestingPool>,

    #[account(mut, seeds = [ROLES_SEED, pool.key().as_ref()], bump)]
    pub roles: Account<'info, AccessRoles>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminChanged {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
