use anchor_lang::prelude::*;

/// Custom error codes for the linear vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Invalid pool configuration")]
    InvalidConfiguration,

    #[msg("Invalid grant batch")]
    InvalidBatch,

    #[msg("Funding transfer into the vault failed")]
    FundingFailure,

    #[msg("Nothing is claimable yet")]
    NoClaimableAmount,

    #[msg("Payout transfer from the vault failed")]
    TransferFailure,

    #[msg("Unauthorized: caller lacks the required capability")]
    Unauthorized,

    #[msg("Vesting duration is shorter than one day")]
    DegenerateDuration,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Claimed amount exceeds vested amount")]
    ClaimedExceedsVested,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Issuer list is full")]
    IssuerListFull,

    #[msg("Grant account could not be read or written")]
    GrantStorage,
}
