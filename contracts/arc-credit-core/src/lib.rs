#![no_std]

mod constants;
mod contract;
mod events;
mod helpers;
mod storage;

pub use constants::{MAX_CREDIT_SCORE, MIN_COLLATERAL_RATIO_BPS, SECONDS_PER_YEAR};
pub use contract::{ArcCreditCore, ArcCreditCoreClient};
pub use events::{InterestAccrued, LoanCreated, LoanRepaid};
pub use storage::{Loan, Stablecoin};
