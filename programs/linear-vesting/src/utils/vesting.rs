//! Linear vesting math over a pool window. Pure: "now" is always supplied by
//! the caller and nothing here mutates state.
//!
//! - vested(t)    = 0 before start, rate * (t - start) inside the window,
//!                  the full amount from end onward
//! - claimable(t) = vested(t) - claimed, never clamped

use crate::constants::SECONDS_PER_DAY;
use crate::error::VestingError;
use crate::state::{Grant, VestingPool};

/// Units unlocked but not yet paid out at `now`.
pub fn claimable(pool: &VestingPool, grant: &Grant, now: i64) -> Result<u64, VestingError> {
    if now < pool.start_time {
        return Ok(0);
    }
    let cap = now.min(pool.end_time);
    let elapsed = elapsed_secs(pool.start_time, cap)?;

    // The final branch hands out the full remainder, absorbing rate truncation.
    let vested = if elapsed >= pool.vesting_duration {
        grant.amount
    } else {
        grant
            .per_second_rate
            .checked_mul(elapsed)
            .ok_or(VestingError::MathOverflow)?
    };
    vested
        .checked_sub(grant.total_claimed)
        .ok_or(VestingError::ClaimedExceedsVested)
}

/// Units unlocked at `now`, regardless of what was already paid out.
pub fn vested_balance(pool: &VestingPool, grant: &Grant, now: i64) -> Result<u64, VestingError> {
    if now < pool.start_time {
        return Ok(0);
    }
    if now >= pool.end_time {
        return Ok(grant.amount);
    }
    let elapsed = elapsed_secs(pool.start_time, now)?;
    grant
        .per_second_rate
        .checked_mul(elapsed)
        .ok_or(VestingError::MathOverflow)
}

/// `amount / whole days in the window`, truncating at each step.
pub fn daily_rate(pool: &VestingPool, amount: u64) -> Result<u64, VestingError> {
    let days = pool.vesting_duration / SECONDS_PER_DAY;
    if days == 0 {
        return Err(VestingError::DegenerateDuration);
    }
    Ok(amount / days)
}

fn elapsed_secs(start: i64, until: i64) -> Result<u64, VestingError> {
    let d = until
        .checked_sub(start)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(d).map_err(|_| VestingError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;

    const T: i64 = 1_000_000;

    fn pool(vesting_duration: u64) -> VestingPool {
        VestingPool {
            name: "Test".to_string(),
            mint: Pubkey::default(),
            start_time: T,
            end_time: T + vesting_duration as i64,
            vesting_duration,
            total_amount: 0,
            total_claimed: 0,
            grant_count: 0,
            bump: 255,
        }
    }

    fn grant(pool: &VestingPool, amount: u64, total_claimed: u64) -> Grant {
        Grant {
            recipient: Pubkey::default(),
            amount,
            total_claimed,
            per_second_rate: pool.per_second_rate(amount).unwrap(),
            bump: 0,
        }
    }

    #[test]
    fn nothing_vests_before_start() {
        let p = pool(100);
        let g = grant(&p, 1_000, 0);
        for now in [0, T - 100, T - 1] {
            assert_eq!(claimable(&p, &g, now).unwrap(), 0);
            assert_eq!(vested_balance(&p, &g, now).unwrap(), 0);
        }
    }

    #[test]
    fn zero_elapsed_at_start() {
        let p = pool(100);
        let g = grant(&p, 1_000, 0);
        assert_eq!(claimable(&p, &g, T).unwrap(), 0);
        assert_eq!(vested_balance(&p, &g, T).unwrap(), 0);
    }

    #[test]
    fn halfway_then_remainder_after_end() {
        let p = pool(100);
        let g = grant(&p, 1_000, 0);
        assert_eq!(g.per_second_rate, 10);
        assert_eq!(claimable(&p, &g, T + 50).unwrap(), 500);

        let claimed = grant(&p, 1_000, 500);
        assert_eq!(claimable(&p, &claimed, T + 50).unwrap(), 0);
        assert_eq!(claimable(&p, &claimed, T + 150).unwrap(), 500);
    }

    #[test]
    fn truncation_is_recovered_at_end() {
        // 1_001 / 100 truncates to 10 per second.
        let p = pool(100);
        let g = grant(&p, 1_001, 0);
        assert_eq!(claimable(&p, &g, T + 99).unwrap(), 990);
        assert_eq!(claimable(&p, &g, T + 100).unwrap(), 1_001);
        assert_eq!(vested_balance(&p, &g, T + 100).unwrap(), 1_001);

        // Rate rounds to zero when amount < duration; everything unlocks at end.
        let small = grant(&p, 99, 0);
        assert_eq!(claimable(&p, &small, T + 99).unwrap(), 0);
        assert_eq!(claimable(&p, &small, T + 10_000).unwrap(), 99);
    }

    #[test]
    fn vested_is_claimed_plus_claimable() {
        let p = pool(1_000);
        for claimed in [0, 70, 300] {
            let g = grant(&p, 7_777, claimed);
            for now in [T + 300, T + 999, T + 1_000, T + 5_000] {
                let vested = vested_balance(&p, &g, now).unwrap();
                let c = claimable(&p, &g, now).unwrap();
                assert_eq!(vested, g.total_claimed + c, "now = {now}");
            }
        }
    }

    #[test]
    fn over_claimed_grant_is_surfaced() {
        let p = pool(100);
        let g = grant(&p, 1_000, 600);
        assert!(matches!(
            claimable(&p, &g, T + 50),
            Err(VestingError::ClaimedExceedsVested)
        ));
    }

    #[test]
    fn rate_times_elapsed_overflow_is_an_error() {
        let p = pool(100);
        let mut g = grant(&p, 1_000, 0);
        g.per_second_rate = u64::MAX;
        assert!(matches!(
            claimable(&p, &g, T + 2),
            Err(VestingError::MathOverflow)
        ));
        assert!(matches!(
            vested_balance(&p, &g, T + 2),
            Err(VestingError::MathOverflow)
        ));
    }

    #[test]
    fn daily_rate_truncates_per_step() {
        let p = pool(10 * SECONDS_PER_DAY);
        assert_eq!(daily_rate(&p, 1_000).unwrap(), 100);
        // 36 hours => one whole day.
        let p = pool(SECONDS_PER_DAY + SECONDS_PER_DAY / 2);
        assert_eq!(daily_rate(&p, 1_000).unwrap(), 1_000);
    }

    #[test]
    fn daily_rate_under_one_day_is_degenerate() {
        let p = pool(12 * 60 * 60);
        assert!(matches!(
            daily_rate(&p, 1_000),
            Err(VestingError::DegenerateDuration)
        ));
    }
}
