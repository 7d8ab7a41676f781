#![allow(unexpected_cfgs)]

pub mod constants;
pub mod custody;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("HVZRZ3GfCgZUdM5eo5KcAfVHAuLfyUtWtBv7VMxXtAb9");

#[program]
pub mod linear_vesting {
    use super::*;

    /// Create the pool, its roles and vault. `admin` receives both
    /// the admin and issuance capabilities.
    pub fn initialize(
        ctx: Context<InitializePool>,
        name: String,
        start_time: i64,
        vesting_duration: u64,
        admin: Pubkey,
    ) -> Result<()> {
        initialize_pool::initialize_handler(ctx, name, start_time, vesting_duration, admin)
    }

    /// Fund and create a batch of grants in one transfer from the issuer.
    /// Each recipient's grant PDA is passed in `remaining_accounts`, in order.
    pub fn add_grants<'info>(
        ctx: Context<'_, '_, '_, 'info, AddGrants<'info>>,
        recipients: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        add_grants::add_grants_handler(ctx, recipients, amounts)
    }

    /// Pay the signer everything vested and not yet claimed.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        claim::claim_handler(ctx)
    }

    pub fn change_admin(ctx: Context<ChangeAdmin>, new_admin: Pubkey) -> Result<()> {
        change_admin::change_admin_handler(ctx, new_admin)
    }

    pub fn grant_issuer(ctx: Context<SetIssuer>, issuer: Pubkey) -> Result<()> {
        set_issuer::grant_issuer_handler(ctx, issuer)
    }

    pub fn revoke_issuer(ctx: Context<SetIssuer>, issuer: Pubkey) -> Result<()> {
        set_issuer::revoke_issuer_handler(ctx, issuer)
    }

    pub fn get_grant(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<GrantSnapshot> {
        queries::get_grant_handler(ctx, recipient)
    }

    pub fn calculate_claimable(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
        queries::calculate_claimable_handler(ctx, recipient)
    }

    pub fn vested_balance(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
        queries::vested_balance_handler(ctx, recipient)
    }

    pub fn claimed_balance(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
        queries::claimed_balance_handler(ctx, recipient)
    }

    pub fn tokens_vested_per_day(ctx: Context<ReadGrant>, recipient: Pubkey) -> Result<u64> {
        queries::tokens_vested_per_day_handler(ctx, recipient)
    }

    pub fn tokens_vested_per_day_for_amount(ctx: Context<ReadPool>, amount: u64) -> Result<u64> {
        queries::tokens_vested_per_day_for_amount_handler(ctx, amount)
    }
}
