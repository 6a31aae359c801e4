use soroban_sdk::{contract, contractimpl, token, Address, Env};

use crate::constants::*;
use crate::events::*;
use crate::helpers::*;
use crate::storage::*;

/// Collateralized lending ledger: one active loan per borrower, collateral in
/// USDC, principal disbursed and repaid in USDC or EURC.
#[contract]
pub struct ArcCreditCore;

#[contractimpl]
impl ArcCreditCore {
    pub fn initialize(env: Env, admin: Address, usdc: Address, eurc: Address, rate_model: Address) {
        if is_initialized(&env) {
            panic!("already initialized");
        }
        admin.require_auth();
        if usdc == eurc {
            panic!("invalid assets");
        }
        let storage = env.storage().persistent();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Usdc, &usdc);
        storage.set(&DataKey::Eurc, &eurc);
        storage.set(&DataKey::RateModel, &rate_model);
        write_total_collateral(&env, 0);
        write_total_borrowed(&env, Stablecoin::Usdc, 0);
        write_total_borrowed(&env, Stablecoin::Eurc, 0);
        bump_core_ttl(&env);
    }

    /// Open a loan: pull `collateral` USDC through the borrower's allowance,
    /// price it from the rate model and disburse `borrow_amount` of `stablecoin`.
    pub fn request_loan_in_stablecoin(
        env: Env,
        borrower: Address,
        collateral: u128,
        borrow_amount: u128,
        credit_score: u32,
        stablecoin: Stablecoin,
    ) {
        ensure_initialized(&env);
        borrower.require_auth();
        if borrow_amount == 0 {
            panic!("invalid amount");
        }
        if credit_score > MAX_CREDIT_SCORE {
            panic!("invalid credit score");
        }
        if read_active_loan(&env, &borrower).is_some() {
            panic!("active loan exists");
        }
        if !meets_collateral_requirement(collateral, borrow_amount) {
            panic!("insufficient collateral");
        }
        if available_liquidity(&env, stablecoin) < borrow_amount {
            panic!("insufficient liquidity");
        }

        let this = env.current_contract_address();
        token::Client::new(&env, &collateral_token(&env)).transfer_from(
            &this,
            &borrower,
            &this,
            &to_i128(collateral),
        );

        let rate_bps = rate_model(&env).calculate_borrow_rate(&credit_score);
        let loan = Loan {
            collateral_amount: collateral,
            borrowed_amount: borrow_amount,
            borrowed_asset: stablecoin,
            interest_accrued: 0,
            credit_score,
            rate_bps,
            last_accrual_timestamp: env.ledger().timestamp(),
            active: true,
        };
        write_loan(&env, &borrower, &loan);
        write_total_collateral(&env, read_total_collateral(&env).saturating_add(collateral));
        write_total_borrowed(
            &env,
            stablecoin,
            read_total_borrowed(&env, stablecoin).saturating_add(borrow_amount),
        );

        token::Client::new(&env, &token_address(&env, stablecoin)).transfer(
            &this,
            &borrower,
            &to_i128(borrow_amount),
        );

        LoanCreated {
            borrower,
            collateral_amount: collateral,
            borrowed_amount: borrow_amount,
            credit_score,
            rate_bps,
            asset: stablecoin,
        }
        .publish(&env);
    }

    /// Roll a borrower's interest forward to now. Anyone may call it; without
    /// an active loan it does nothing. Returns the accrued interest.
    pub fn accrue_interest(env: Env, borrower: Address) -> u128 {
        ensure_initialized(&env);
        match read_active_loan(&env, &borrower) {
            Some(loan) => accrue(&env, &borrower, loan).interest_accrued,
            None => 0,
        }
    }

    /// Settle the borrower's loan in full and release the collateral.
    pub fn repay_loan(env: Env, borrower: Address) {
        ensure_initialized(&env);
        borrower.require_auth();
        let loan = match read_active_loan(&env, &borrower) {
            Some(loan) => accrue(&env, &borrower, loan),
            None => panic!("no active loan"),
        };
        let asset = loan.borrowed_asset;
        let owed = loan.total_owed();
        let this = env.current_contract_address();

        token::Client::new(&env, &token_address(&env, asset)).transfer_from(
            &this,
            &borrower,
            &this,
            &to_i128(owed),
        );

        write_loan(
            &env,
            &borrower,
            &Loan::closed(asset, env.ledger().timestamp()),
        );
        write_total_collateral(
            &env,
            read_total_collateral(&env).saturating_sub(loan.collateral_amount),
        );
        write_total_borrowed(
            &env,
            asset,
            read_total_borrowed(&env, asset).saturating_sub(loan.borrowed_amount),
        );

        token::Client::new(&env, &collateral_token(&env)).transfer(
            &this,
            &borrower,
            &to_i128(loan.collateral_amount),
        );

        LoanRepaid {
            borrower,
            principal: loan.borrowed_amount,
            interest: loan.interest_accrued,
            collateral_returned: loan.collateral_amount,
            asset,
        }
        .publish(&env);
    }

    /// `(collateral, borrowed, interest, credit_score, active)` as of the last
    /// accrual. Unknown borrowers read as all zeros.
    pub fn get_loan_status(env: Env, borrower: Address) -> (u128, u128, u128, u32, bool) {
        match read_loan(&env, &borrower) {
            Some(loan) => (
                loan.collateral_amount,
                loan.borrowed_amount,
                loan.interest_accrued,
                loan.credit_score,
                loan.active,
            ),
            None => (0, 0, 0, 0, false),
        }
    }

    pub fn get_loan(env: Env, borrower: Address) -> Option<Loan> {
        read_loan(&env, &borrower)
    }

    /// Principal plus interest up to now, including interest not yet accrued.
    pub fn get_total_owed(env: Env, borrower: Address) -> u128 {
        match read_active_loan(&env, &borrower) {
            Some(loan) => loan
                .total_owed()
                .saturating_add(pending_interest(&env, &loan)),
            None => 0,
        }
    }

    pub fn get_available_liquidity(env: Env, asset: Stablecoin) -> u128 {
        ensure_initialized(&env);
        available_liquidity(&env, asset)
    }

    pub fn get_total_collateral(env: Env) -> u128 {
        read_total_collateral(&env)
    }

    pub fn get_total_borrowed(env: Env, asset: Stablecoin) -> u128 {
        read_total_borrowed(&env, asset)
    }

    pub fn get_token(env: Env, asset: Stablecoin) -> Address {
        token_address(&env, asset)
    }

    pub fn get_rate_model(env: Env) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::RateModel)
            .expect("rate model not set")
    }

    pub fn get_admin(env: Env) -> Address {
        read_admin(&env)
    }

    /// Add lendable reserve. Anyone may fund.
    pub fn fund_reserves(env: Env, funder: Address, asset: Stablecoin, amount: u128) {
        ensure_initialized(&env);
        funder.require_auth();
        if amount == 0 {
            panic!("invalid amount");
        }
        token::Client::new(&env, &token_address(&env, asset)).transfer(
            &funder,
            &env.current_contract_address(),
            &to_i128(amount),
        );
        ReservesFunded {
            funder,
            asset,
            amount,
        }
        .publish(&env);
    }

    /// Admin: withdraw lendable reserve. Collateral in custody is never available.
    pub fn withdraw_reserves(env: Env, admin: Address, asset: Stablecoin, amount: u128, to: Address) {
        require_admin(&env, &admin);
        if amount == 0 {
            panic!("invalid amount");
        }
        if available_liquidity(&env, asset) < amount {
            panic!("insufficient liquidity");
        }
        token::Client::new(&env, &token_address(&env, asset)).transfer(
            &env.current_contract_address(),
            &to,
            &to_i128(amount),
        );
        ReservesWithdrawn { to, asset, amount }.publish(&env);
    }

    /// Admin: swap the rate model. Open loans keep the rate they were priced at.
    pub fn set_rate_model(env: Env, admin: Address, rate_model: Address) {
        require_admin(&env, &admin);
        env.storage()
            .persistent()
            .set(&DataKey::RateModel, &rate_model);
        NewRateModel { model: rate_model }.publish(&env);
    }

    pub fn set_admin(env: Env, admin: Address, new_admin: Address) {
        require_admin(&env, &admin);
        env.storage().persistent().set(&DataKey::Admin, &new_admin);
        NewAdmin { admin: new_admin }.publish(&env);
    }
}

/// Adds simple interest for the time since the last accrual and persists it.
/// The window only moves when interest was actually added, so sub-unit
/// amounts keep accumulating time instead of being dropped.
fn accrue(env: &Env, borrower: &Address, mut loan: Loan) -> Loan {
    let added = pending_interest(env, &loan);
    if added == 0 {
        return loan;
    }
    loan.interest_accrued = loan.interest_accrued.saturating_add(added);
    loan.last_accrual_timestamp = env.ledger().timestamp();
    write_loan(env, borrower, &loan);
    InterestAccrued {
        borrower: borrower.clone(),
        interest_added: added,
        interest_accrued: loan.interest_accrued,
    }
    .publish(env);
    loan
}
