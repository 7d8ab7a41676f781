use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::constants::{GRANT_SEED, MAX_BATCH_GRANTS};
use crate::error::VestingError;

/// One recipient's allocation and claim history.
/// PDA: `[GRANT_SEED, pool, recipient]`, created once and never closed.
#[account]
#[derive(InitSpace, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grant {
    pub recipient: Pubkey,
    /// Total units allocated; fixed at creation.
    pub amount: u64,
    /// Units paid out so far; never decreases.
    pub total_claimed: u64,
    /// `amount / vesting_duration`, computed once at creation.
    pub per_second_rate: u64,
    pub bump: u8,
}

impl Grant {
    pub const SIZE: usize = 8 + Self::INIT_SPACE;

    /// Stand-in for a recipient with no grant; every vesting query yields 0.
    pub fn empty(recipient: Pubkey) -> Self {
        Self {
            recipient,
            ..Self::default()
        }
    }

    pub fn address(pool: &Pubkey, recipient: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[GRANT_SEED, pool.as_ref(), recipient.as_ref()],
            &crate::ID,
        )
    }
}

/// Read-only view of a grant returned to clients.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrantSnapshot {
    pub amount: u64,
    pub total_claimed: u64,
    pub per_second_rate: u64,
}

impl From<&Grant> for GrantSnapshot {
    fn from(g: &Grant) -> Self {
        Self {
            amount: g.amount,
            total_claimed: g.total_claimed,
            per_second_rate: g.per_second_rate,
        }
    }
}

/// Grant storage keyed by recipient. Write-once per key, then only
/// `total_claimed` moves.
pub trait GrantRegistry {
    fn get(&self, recipient: &Pubkey) -> Result<Option<Grant>>;

    fn exists(&self, recipient: &Pubkey) -> Result<bool> {
        Ok(self.get(recipient)?.is_some())
    }

    /// Stores a new grant. The caller has checked the key is free.
    fn insert(&mut self, grant: Grant) -> Result<()>;

    /// Overwrites an existing grant.
    fn update(&mut self, grant: Grant) -> Result<()>;
}

/// Pays rent for grant PDAs created by `add_grants`.
pub struct GrantFunder<'info> {
    pub payer: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

struct GrantSlot<'info> {
    recipient: Pubkey,
    info: AccountInfo<'info>,
    bump: u8,
}

/// The grant PDAs handed to one instruction, each bound to its recipient.
/// Only these accounts are ever loaded.
pub struct GrantAccounts<'info> {
    pool: Pubkey,
    slots: Vec<GrantSlot<'info>>,
    funder: Option<GrantFunder<'info>>,
}

impl<'info> GrantAccounts<'info> {
    /// Binds `accounts[i]` to `recipients[i]`, checking each is that
    /// recipient's grant PDA.
    pub fn bind(
        pool: Pubkey,
        recipients: &[Pubkey],
        accounts: &[AccountInfo<'info>],
        funder: GrantFunder<'info>,
    ) -> std::result::Result<Self, VestingError> {
        if recipients.is_empty()
            || recipients.len() > MAX_BATCH_GRANTS
            || recipients.len() != accounts.len()
        {
            msg!(
                "add_grants rejected: {} recipients, {} grant accounts",
                recipients.len(),
                accounts.len()
            );
            return Err(VestingError::InvalidBatch);
        }

        let mut slots = Vec::with_capacity(recipients.len());
        for (recipient, info) in recipients.iter().zip(accounts) {
            let (address, bump) = Grant::address(&pool, recipient);
            if *info.key != address || !info.is_writable {
                msg!("add_grants rejected: bad grant account for {}", recipient);
                return Err(VestingError::InvalidBatch);
            }
            slots.push(GrantSlot {
                recipient: *recipient,
                info: info.clone(),
                bump,
            });
        }
        Ok(Self {
            pool,
            slots,
            funder: Some(funder),
        })
    }

    /// A single grant PDA whose seeds were already checked by the
    /// instruction's account constraints. Cannot create accounts.
    pub fn single(pool: Pubkey, recipient: Pubkey, info: AccountInfo<'info>, bump: u8) -> Self {
        Self {
            pool,
            slots: vec![GrantSlot {
                recipient,
                info,
                bump,
            }],
            funder: None,
        }
    }

    fn slot(&self, recipient: &Pubkey) -> Result<&GrantSlot<'info>> {
        self.slots
            .iter()
            .find(|s| s.recipient == *recipient)
            .ok_or_else(|| error!(VestingError::GrantStorage))
    }

    // Same sequence as Anchor's `init`: a PDA that was pre-funded with
    // lamports cannot go through `create_account`.
    fn create(&self, slot: &GrantSlot<'info>, funder: &GrantFunder<'info>) -> Result<()> {
        let bump = [slot.bump];
        let seeds: &[&[u8]] = &[
            GRANT_SEED,
            self.pool.as_ref(),
            slot.recipient.as_ref(),
            &bump,
        ];
        let signer_seeds = &[seeds];
        let space = Grant::SIZE as u64;
        let rent = Rent::get()?.minimum_balance(Grant::SIZE);

        let current = slot.info.lamports();
        if current == 0 {
            return system_program::create_account(
                CpiContext::new_with_signer(
                    funder.system_program.clone(),
                    CreateAccount {
                        from: funder.payer.clone(),
                        to: slot.info.clone(),
                    },
                    signer_seeds,
                ),
                rent,
                space,
                &crate::ID,
            );
        }

        let top_up = rent.saturating_sub(current);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    funder.system_program.clone(),
                    Transfer {
                        from: funder.payer.clone(),
                        to: slot.info.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                funder.system_program.clone(),
                Allocate {
                    account_to_allocate: slot.info.clone(),
                },
                signer_seeds,
            ),
            space,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                funder.system_program.clone(),
                Assign {
                    account_to_assign: slot.info.clone(),
                },
                signer_seeds,
            ),
            &crate::ID,
        )
    }
}

fn write_grant(info: &AccountInfo<'_>, grant: &Grant) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data;
    grant.try_serialize(&mut dst)
}

impl<'info> GrantRegistry for GrantAccounts<'info> {
    fn get(&self, recipient: &Pubkey) -> Result<Option<Grant>> {
        let slot = self.slot(recipient)?;
        if *slot.info.owner != crate::ID || slot.info.data_is_empty() {
            return Ok(None);
        }
        let data = slot.info.try_borrow_data()?;
        let mut buf: &[u8] = &data;
        Ok(Some(Grant::try_deserialize(&mut buf)?))
    }

    fn insert(&mut self, grant: Grant) -> Result<()> {
        let slot = self.slot(&grant.recipient)?;
        let funder = self
            .funder
            .as_ref()
            .ok_or_else(|| error!(VestingError::GrantStorage))?;
        self.create(slot, funder)?;
        write_grant(
            &slot.info,
            &Grant {
                bump: slot.bump,
                ..grant
            },
        )
    }

    fn update(&mut self, grant: Grant) -> Result<()> {
        let slot = self.slot(&grant.recipient)?;
        require_keys_eq!(*slot.info.owner, crate::ID, VestingError::GrantStorage);
        write_grant(
            &slot.info,
            &Grant {
                bump: slot.bump,
                ..grant
            },
        )
    }
}
