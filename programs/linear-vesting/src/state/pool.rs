use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, SECONDS_PER_DAY, TEN_YEARS};
use crate::error::VestingError;

/// Singleton pool PDA: the vesting window plus running totals.
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct VestingPool {
    /// Display label, set once.
    #[max_len(MAX_NAME_LEN)]
    pub name: String,
    /// Token mint vested by this pool.
    pub mint: Pubkey,
    /// Window open (Unix seconds, UTC).
    pub start_time: i64,
    /// Window close, `start_time + vesting_duration`.
    pub end_time: i64,
    /// Window length in seconds.
    pub vesting_duration: u64,
    /// Sum of all grant amounts ever created.
    pub total_amount: u64,
    /// Sum of all amounts ever paid out.
    pub total_claimed: u64,
    /// Number of grants created.
    pub grant_count: u64,
    /// Bump of the pool PDA, used to sign vault payouts.
    pub bump: u8,
}

impl VestingPool {
    pub const SIZE: usize = 8 + Self::INIT_SPACE;

    /// Validates the window and resets the pool to a fresh, empty state.
    pub fn configure(
        &mut self,
        name: String,
        mint: Pubkey,
        start_time: i64,
        vesting_duration: u64,
        now: i64,
        bump: u8,
    ) -> std::result::Result<(), VestingError> {
        if name.len() > MAX_NAME_LEN {
            return Err(VestingError::InvalidConfiguration);
        }
        if start_time == 0 || vesting_duration == 0 || start_time <= now {
            return Err(VestingError::InvalidConfiguration);
        }
        if exceeds_legacy_duration_bound(vesting_duration) {
            return Err(VestingError::InvalidConfiguration);
        }

        let span = i64::try_from(vesting_duration).map_err(|_| VestingError::MathOverflow)?;
        let end_time = start_time
            .checked_add(span)
            .ok_or(VestingError::MathOverflow)?;

        *self = VestingPool {
            name,
            mint,
            start_time,
            end_time,
            vesting_duration,
            total_amount: 0,
            total_claimed: 0,
            grant_count: 0,
            bump,
        };
        Ok(())
    }

    /// Truncating `amount / vesting_duration`.
    pub fn per_second_rate(&self, amount: u64) -> std::result::Result<u64, VestingError> {
        amount
            .checked_div(self.vesting_duration)
            .ok_or(VestingError::InvalidConfiguration)
    }

    /// Books a funded batch into the aggregate counters.
    pub fn record_grants(&mut self, sum: u64, count: u64) -> std::result::Result<(), VestingError> {
        let total_amount = self
            .total_amount
            .checked_add(sum)
            .ok_or(VestingError::MathOverflow)?;
        let grant_count = self
            .grant_count
            .checked_add(count)
            .ok_or(VestingError::MathOverflow)?;
        self.total_amount = total_amount;
        self.grant_count = grant_count;
        Ok(())
    }

    /// Books a payout into the aggregate counters.
    pub fn record_claim(&mut self, amount: u64) -> std::result::Result<(), VestingError> {
        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if total_claimed > self.total_amount {
            return Err(VestingError::ClaimedExceedsVested);
        }
        self.total_claimed = total_claimed;
        Ok(())
    }
}

/// Only sub-day windows are capped at ten years, so this never holds.
/// Kept as-is for compatibility with existing deployments.
#[allow(clippy::impossible_comparisons)]
fn exceeds_legacy_duration_bound(vesting_duration: u64) -> bool {
    vesting_duration < SECONDS_PER_DAY && vesting_duration > TEN_YEARS
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn configure(start_time: i64, vesting_duration: u64) -> std::result::Result<VestingPool, VestingError> {
        let mut pool = VestingPool::default();
        pool.configure(
            "Team".to_string(),
            Pubkey::new_unique(),
            start_time,
            vesting_duration,
            NOW,
            254,
        )?;
        Ok(pool)
    }

    #[test]
    fn window_end_is_start_plus_duration() {
        let pool = configure(NOW + 10, 100).unwrap();
        assert_eq!(pool.start_time, NOW + 10);
        assert_eq!(pool.end_time, NOW + 110);
        assert_eq!(pool.vesting_duration, 100);
        assert_eq!(pool.total_amount, 0);
        assert_eq!(pool.total_claimed, 0);
        assert_eq!(pool.grant_count, 0);
        assert_eq!(pool.bump, 254);
    }

    #[test]
    fn rejects_zero_start_and_zero_duration() {
        let mut pool = VestingPool::default();
        let err = pool
            .configure(String::new(), Pubkey::new_unique(), 0, 100, -10, 1)
            .unwrap_err();
        assert!(matches!(err, VestingError::InvalidConfiguration));
        assert!(matches!(
            configure(NOW + 10, 0),
            Err(VestingError::InvalidConfiguration)
        ));
    }

    #[test]
    fn start_must_be_strictly_in_the_future() {
        assert!(matches!(
            configure(NOW, 100),
            Err(VestingError::InvalidConfiguration)
        ));
        assert!(matches!(
            configure(NOW - 1, 100),
            Err(VestingError::InvalidConfiguration)
        ));
        assert!(configure(NOW + 1, 100).is_ok());
    }

    #[test]
    fn long_and_sub_day_windows_are_accepted() {
        assert!(configure(NOW + 1, 1).is_ok());
        assert!(configure(NOW + 1, TEN_YEARS + 1).is_ok());
        assert!(!exceeds_legacy_duration_bound(SECONDS_PER_DAY - 1));
        assert!(!exceeds_legacy_duration_bound(TEN_YEARS + 1));
    }

    #[test]
    fn rejects_long_name_and_overflowing_window() {
        let mut pool = VestingPool::default();
        let err = pool
            .configure("x".repeat(MAX_NAME_LEN + 1), Pubkey::new_unique(), NOW + 1, 100, NOW, 1)
            .unwrap_err();
        assert!(matches!(err, VestingError::InvalidConfiguration));

        // The longest accepted name still fits the allocated account.
        pool.configure("x".repeat(MAX_NAME_LEN), Pubkey::new_unique(), NOW + 1, 100, NOW, 1)
            .unwrap();
        let mut data = vec![0u8; VestingPool::SIZE];
        let mut dst: &mut [u8] = &mut data;
        pool.try_serialize(&mut dst).unwrap();
        assert!(dst.is_empty());

        assert!(matches!(
            configure(i64::MAX - 5, 100),
            Err(VestingError::MathOverflow)
        ));
        assert!(matches!(
            configure(NOW + 1, u64::MAX),
            Err(VestingError::MathOverflow)
        ));
    }

    #[test]
    fn claim_totals_cannot_pass_funded_totals() {
        let mut pool = configure(NOW + 1, 100).unwrap();
        pool.record_grants(600, 3).unwrap();
        pool.record_claim(600).unwrap();
        assert!(matches!(
            pool.record_claim(1),
            Err(VestingError::ClaimedExceedsVested)
        ));
        assert_eq!(pool.total_claimed, 600);
    }

    #[test]
    fn counters_use_checked_math() {
        let mut pool = configure(NOW + 1, 100).unwrap();
        pool.record_grants(u64::MAX, 1).unwrap();
        assert!(matches!(
            pool.record_grants(1, 1),
            Err(VestingError::MathOverflow)
        ));
        assert_eq!(pool.total_amount, u64::MAX);
        assert_eq!(pool.grant_count, 1);
    }
}
