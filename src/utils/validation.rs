//! Validation utilities

use crate::money::Money;
use crate::types::*;

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount {
            amount: amount.clone(),
        })
    }
}

/// Validate that an account belongs to the given accounting organization
pub fn validate_account_organization(
    account: &GlAccount,
    organization_id: OrganizationId,
) -> LedgerResult<()> {
    if account.accounting_organization_id != organization_id {
        return Err(LedgerError::CrossOrganization {
            account_id: account.id,
            account_organization_id: account.accounting_organization_id,
            expected_organization_id: organization_id,
        });
    }

    Ok(())
}
