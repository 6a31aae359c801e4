use soroban_sdk::{token, Env};

use crate::constants::*;
use crate::storage::*;

pub fn to_i128(amount: u128) -> i128 {
    i128::try_from(amount).unwrap_or_else(|_| panic!("amount overflow"))
}

/// `collateral >= 1.2 * borrow`, evaluated in basis points.
pub fn meets_collateral_requirement(collateral: u128, borrow_amount: u128) -> bool {
    match (
        collateral.checked_mul(BPS_DENOMINATOR),
        borrow_amount.checked_mul(MIN_COLLATERAL_RATIO_BPS),
    ) {
        (Some(have), Some(need)) => have >= need,
        _ => panic!("amount overflow"),
    }
}

/// Simple interest on principal, floored:
/// `principal * rate_bps * elapsed / (10_000 * SECONDS_PER_YEAR)`.
pub fn simple_interest(principal: u128, rate_bps: u32, elapsed: u64) -> u128 {
    let rate_time = (rate_bps as u128) * (elapsed as u128);
    mul_div_floor(principal, rate_time, BPS_DENOMINATOR * SECONDS_PER_YEAR)
}

/// `a * b / d` rounded down. Splitting `a` into `q * d + r` keeps the
/// intermediate products far below `u128::MAX` for any token amount.
fn mul_div_floor(a: u128, b: u128, d: u128) -> u128 {
    let whole = (a / d).checked_mul(b);
    let part = (a % d).checked_mul(b).map(|v| v / d);
    match (whole, part) {
        (Some(whole), Some(part)) => whole
            .checked_add(part)
            .unwrap_or_else(|| panic!("interest overflow")),
        _ => panic!("interest overflow"),
    }
}

/// Interest earned since the last accrual that has not been written yet.
pub fn pending_interest(env: &Env, loan: &Loan) -> u128 {
    let now = env.ledger().timestamp();
    if !loan.active || now <= loan.last_accrual_timestamp {
        return 0;
    }
    simple_interest(
        loan.borrowed_amount,
        loan.rate_bps,
        now - loan.last_accrual_timestamp,
    )
}

/// Contract balance of `asset` that is not collateral in custody.
pub fn available_liquidity(env: &Env, asset: Stablecoin) -> u128 {
    let token = token::Client::new(env, &token_address(env, asset));
    let balance = token.balance(&env.current_contract_address());
    let balance = if balance > 0 { balance as u128 } else { 0 };
    match asset {
        Stablecoin::Usdc => balance.saturating_sub(read_total_collateral(env)),
        Stablecoin::Eurc => balance,
    }
}
