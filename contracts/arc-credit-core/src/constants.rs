pub const BPS_DENOMINATOR: u128 = 10_000u128;
/// 120% minimum collateralization at origination.
pub const MIN_COLLATERAL_RATIO_BPS: u128 = 12_000u128;
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;
pub const MAX_CREDIT_SCORE: u32 = 100;
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
