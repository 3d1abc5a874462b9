//! Common posting patterns expressed through a [`TransactionBuilder`]

use crate::ledger::{Posting, TransactionBuilder};
use crate::money::Money;
use crate::traits::TransactionService;
use crate::types::*;

/// Parameters for posting an invoice that carries sales tax
pub struct InvoiceWithTaxParams<'a> {
    pub receivable_account: &'a GlAccount,
    pub revenue_account: &'a GlAccount,
    pub tax_payable_account: &'a GlAccount,
    pub net_amount: Money,
    /// Tax rate in percent, e.g. `18` for 18%
    pub tax_rate: Money,
}

/// Record a sale: increase cash or receivables and revenue
pub fn record_sale<S: TransactionService>(
    builder: &mut TransactionBuilder<S>,
    cash_or_receivable_account: &GlAccount,
    revenue_account: &GlAccount,
    amount: Money,
) -> LedgerResult<()> {
    builder.process_operations([
        Posting::increase(cash_or_receivable_account, amount.clone()),
        Posting::increase(revenue_account, amount),
    ])?;
    Ok(())
}

/// Record an expense paid from cash: increase the expense, decrease cash
pub fn record_expense_payment<S: TransactionService>(
    builder: &mut TransactionBuilder<S>,
    expense_account: &GlAccount,
    cash_account: &GlAccount,
    amount: Money,
) -> LedgerResult<()> {
    builder.process_operations([
        Posting::increase(expense_account, amount.clone()),
        Posting::decrease(cash_account, amount),
    ])?;
    Ok(())
}

/// Record a customer payment against receivables
pub fn record_payment_received<S: TransactionService>(
    builder: &mut TransactionBuilder<S>,
    cash_account: &GlAccount,
    receivable_account: &GlAccount,
    amount: Money,
) -> LedgerResult<()> {
    builder.process_operations([
        Posting::increase(cash_account, amount.clone()),
        Posting::decrease(receivable_account, amount),
    ])?;
    Ok(())
}

/// Move an amount between two accounts of the same kind
pub fn record_transfer<S: TransactionService>(
    builder: &mut TransactionBuilder<S>,
    from_account: &GlAccount,
    to_account: &GlAccount,
    amount: Money,
) -> LedgerResult<()> {
    builder.process_operations([
        Posting::decrease(from_account, amount.clone()),
        Posting::increase(to_account, amount),
    ])?;
    Ok(())
}

/// Post an invoice with tax and return the tax amount.
///
/// Tax is `net_amount * tax_rate / 100`, rounded half away from zero to
/// cents. A zero tax produces no tax line. Either every line is posted or,
/// on error, none is.
pub fn record_invoice_with_tax<S: TransactionService>(
    builder: &mut TransactionBuilder<S>,
    params: InvoiceWithTaxParams<'_>,
) -> LedgerResult<Money> {
    let tax_amount = (&params.net_amount * &params.tax_rate).checked_div(&Money::from(100))?;
    let total_amount = &params.net_amount + &tax_amount;

    let mut postings = vec![
        Posting::increase(params.receivable_account, total_amount),
        Posting::increase(params.revenue_account, params.net_amount),
    ];
    if !tax_amount.is_zero() {
        postings.push(Posting::increase(
            params.tax_payable_account,
            tax_amount.clone(),
        ));
    }
    builder.process_operations(postings)?;

    Ok(tax_amount)
}
