use anchor_lang::prelude::*;

use crate::constants::MAX_ISSUERS;
use crate::error::VestingError;

/// Permissions consulted by privileged ledger operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Manage issuers and hand over administration.
    Admin,
    /// Create grants.
    Issuance,
}

/// Capability check the ledger consults before privileged writes.
pub trait Authority {
    fn authorize(&self, caller: &Pubkey, capability: Capability) -> bool;
}

/// PDA holding the pool's capability assignments.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AccessRoles {
    /// Sole holder of `Capability::Admin`.
    pub admin: Pubkey,
    /// Holders of `Capability::Issuance` (<= MAX_ISSUERS).
    pub issuers: Vec<Pubkey>,
}

impl AccessRoles {
    pub const SIZE: usize = 8 + 32 + 4 + MAX_ISSUERS * 32;

    /// Seeds the roles with one account holding both capabilities.
    pub fn bootstrap(&mut self, admin: Pubkey) -> std::result::Result<(), VestingError> {
        require_non_default(&admin)?;
        self.admin = admin;
        self.issuers = vec![admin];
        Ok(())
    }

    /// Moves the admin capability from `caller` to `new_admin`.
    pub fn transfer_admin(
        &mut self,
        caller: &Pubkey,
        new_admin: Pubkey,
    ) -> std::result::Result<Pubkey, VestingError> {
        if !self.authorize(caller, Capability::Admin) {
            return Err(VestingError::Unauthorized);
        }
        require_non_default(&new_admin)?;
        let old = self.admin;
        self.admin = new_admin;
        Ok(old)
    }

    /// Grants issuance to `issuer`. Granting an existing issuer is a no-op.
    pub fn add_issuer(
        &mut self,
        caller: &Pubkey,
        issuer: Pubkey,
    ) -> std::result::Result<(), VestingError> {
        if !self.authorize(caller, Capability::Admin) {
            return Err(VestingError::Unauthorized);
        }
        require_non_default(&issuer)?;
        if self.issuers.contains(&issuer) {
            return Ok(());
        }
        if self.issuers.len() >= MAX_ISSUERS {
            return Err(VestingError::IssuerListFull);
        }
        self.issuers.push(issuer);
        Ok(())
    }

    /// Revokes issuance from `issuer`. Revoking a non-issuer is a no-op.
    pub fn remove_issuer(
        &mut self,
        caller: &Pubkey,
        issuer: &Pubkey,
    ) -> std::result::Result<(), VestingError> {
        if !self.authorize(caller, Capability::Admin) {
            return Err(VestingError::Unauthorized);
        }
        self.issuers.retain(|k| k != issuer);
        Ok(())
    }
}

impl Authority for AccessRoles {
    fn authorize(&self, caller: &Pubkey, capability: Capability) -> bool {
        match capability {
            Capability::Admin => *caller == self.admin,
            Capability::Issuance => self.issuers.contains(caller),
        }
    }
}

fn require_non_default(key: &Pubkey) -> std::result::Result<(), VestingError> {
    if *key == Pubkey::default() {
        return Err(VestingError::InvalidConfiguration);
    }
    Ok(())
}
