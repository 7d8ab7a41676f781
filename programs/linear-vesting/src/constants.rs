//! Program-wide constants.

/// PDA seed for the singleton pool account.
pub const POOL_SEED: &[u8] = b"pool";

/// PDA seed for a recipient's grant, followed by the pool and recipient keys.
pub const GRANT_SEED: &[u8] = b"grant";

/// PDA seed for the capability roles account, followed by the pool key.
pub const ROLES_SEED: &[u8] = b"roles";

/// PDA seed for the token vault, followed by the pool key.
pub const VAULT_SEED: &[u8] = b"vault";

/// Max grants created per `add_grants` call.
pub const MAX_BATCH_GRANTS: usize = 100;

/// Max accounts holding the issuance capability at once.
pub const MAX_ISSUERS: usize = 8;

/// Max pool name length in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Ten 365-day years in seconds.
pub const TEN_YEARS: u64 = 10 * 365 * SECONDS_PER_DAY;
