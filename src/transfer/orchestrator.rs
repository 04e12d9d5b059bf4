//! Transfer orchestration
//!
//! Drives a single transfer attempt end to end: validation, account
//! resolution, per-account currency conversion, balance sufficiency and the
//! atomic ledger commit. A failure at any step is terminal for the attempt
//! and leaves the ledger untouched; retries are the caller's concern.

use rust_decimal::Decimal;

use crate::domain::{Money, TransferError};
use crate::rates::RateSource;
use crate::transfer::{
    validator, AccountLookup, CurrencyCatalog, LedgerCommitter, TransferOutcome, TransferRequest,
};

/// Orchestrates money transfers between two accounts.
pub struct TransferService<A, C, R, L> {
    accounts: A,
    currencies: C,
    rates: R,
    ledger: L,
}

impl<A, C, R, L> TransferService<A, C, R, L>
where
    A: AccountLookup,
    C: CurrencyCatalog,
    R: RateSource,
    L: LedgerCommitter,
{
    pub fn new(accounts: A, currencies: C, rates: R, ledger: L) -> Self {
        Self {
            accounts,
            currencies,
            rates,
            ledger,
        }
    }

    /// Execute a transfer. On success both balance updates and the
    /// transaction record are durable; on any failure none of them are.
    pub async fn transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, TransferError> {
        validator::validate(request, &self.currencies).await?;

        // Source is resolved before the target is ever queried, so a missing
        // source account is reported first.
        let source = self
            .accounts
            .find_by_id(&request.source_account_id)
            .await?
            .ok_or_else(|| TransferError::AccountNotFound(request.source_account_id.clone()))?;

        let target = self
            .accounts
            .find_by_id(&request.target_account_id)
            .await?
            .ok_or_else(|| TransferError::AccountNotFound(request.target_account_id.clone()))?;

        // The two conversions are independent: source and target may each be
        // denominated in a third currency, so they are not inverses.
        let amount_in_source = self
            .amount_in_account_currency(request, &source.currency)
            .await?;
        let amount_in_target = self
            .amount_in_account_currency(request, &target.currency)
            .await?;

        // Sufficiency is checked against the converted source-currency
        // amount, not the raw request amount.
        if source.balance < amount_in_source {
            return Err(TransferError::InsufficientFunds {
                requested: Money::new(request.amount, &request.currency),
                available: Money::new(source.balance, &source.currency),
            });
        }

        let record = self
            .ledger
            .commit(&source, &target, amount_in_source, amount_in_target, request)
            .await?;

        Ok(TransferOutcome::completed(request, &record))
    }

    /// Amount the transfer applies to an account held in `account_currency`.
    /// When the request is already denominated in that currency no rate is
    /// fetched.
    async fn amount_in_account_currency(
        &self,
        request: &TransferRequest,
        account_currency: &str,
    ) -> Result<Decimal, TransferError> {
        if request.currency.eq_ignore_ascii_case(account_currency) {
            Ok(request.amount)
        } else {
            let converted = self
                .rates
                .convert(request.amount, &request.currency, account_currency)
                .await?;
            Ok(converted)
        }
    }
}
