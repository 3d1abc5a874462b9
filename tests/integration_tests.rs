//! Integration tests for ledger-engine

use ledger_engine::{
    patterns, resolve_is_debit, utils::MemoryTransactionService, AccountClass, AccountType,
    GlAccount, LedgerConfig, LedgerError, LedgerTransaction, Money, TransactionBuilder,
};
use proptest::prelude::*;

const ORG: i64 = 1;

fn cash() -> GlAccount {
    GlAccount::new(100, ORG, "Cash", AccountType::new("Bank", true))
}

fn revenue() -> GlAccount {
    GlAccount::new(400, ORG, "Revenue", AccountType::new("Income", false))
}

fn inventory() -> GlAccount {
    GlAccount::new(130, ORG, "Inventory", AccountType::from_class(AccountClass::Asset))
}

fn m(s: &str) -> Money {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_cash_sale_balances_and_commits() {
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make(service.clone(), ORG).await.unwrap();

    builder
        .increase(&cash(), m("100.00"))
        .unwrap()
        .increase(&revenue(), m("100.00"))
        .unwrap();

    assert_eq!(builder.transaction().trial_balance(), m("0.00"));
    assert!(builder.transaction().is_valid());

    let id = builder.commit().await.unwrap();
    let stored = service.get_transaction(id).unwrap().unwrap();
    assert_eq!(stored.transaction.records().len(), 2);
    assert_eq!(stored.transaction.organization_id(), ORG);
}

#[tokio::test]
async fn test_single_sided_posting_is_invalid() {
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make(service, ORG).await.unwrap();

    builder.increase(&cash(), m("100.00")).unwrap();
    assert!(!builder.transaction().is_valid());
}

#[tokio::test]
async fn test_two_debits_do_not_balance() {
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make(service, ORG).await.unwrap();

    builder.increase(&cash(), m("100.00")).unwrap();
    builder.increase(&inventory(), m("100.00")).unwrap();

    assert_eq!(builder.transaction().trial_balance(), m("-200.00"));
    assert!(!builder.transaction().is_valid());
}

#[tokio::test]
async fn test_second_commit_fails_regardless_of_intervening_calls() {
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make(service.clone(), ORG).await.unwrap();
    builder.increase(&cash(), m("20")).unwrap();
    builder.increase(&revenue(), m("20")).unwrap();
    builder.commit().await.unwrap();

    assert!(matches!(
        builder.increase(&cash(), m("5")),
        Err(LedgerError::AlreadyProcessed)
    ));
    builder.description("late edit");

    assert_eq!(builder.commit().await, Err(LedgerError::AlreadyProcessed));
    assert_eq!(service.committed_count().unwrap(), 1);
}

#[tokio::test]
async fn test_persistence_failure_is_surfaced_and_retry_uses_new_builder() {
    let service = MemoryTransactionService::new();
    service.set_unavailable(true).unwrap();
    assert!(matches!(
        TransactionBuilder::make(service.clone(), ORG).await,
        Err(LedgerError::Persistence(_))
    ));

    service.set_unavailable(false).unwrap();
    let mut builder = TransactionBuilder::make(service.clone(), ORG).await.unwrap();
    builder.increase(&cash(), m("10")).unwrap();
    builder.increase(&revenue(), m("10")).unwrap();

    service.set_unavailable(true).unwrap();
    assert!(matches!(
        builder.commit().await,
        Err(LedgerError::Persistence(_))
    ));
    assert!(!builder.is_processed());
    assert_eq!(service.committed_count().unwrap(), 0);

    service.set_unavailable(false).unwrap();
    let mut retry = TransactionBuilder::make(service.clone(), ORG).await.unwrap();
    retry.increase(&cash(), m("10")).unwrap();
    retry.increase(&revenue(), m("10")).unwrap();
    assert_eq!(retry.commit().await.unwrap(), 1);
}

#[tokio::test]
async fn test_cross_organization_account_never_reaches_transaction() {
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make(service, ORG).await.unwrap();
    let foreign = GlAccount::new(900, 2, "Other Cash", AccountType::new("Bank", true));

    assert!(matches!(
        builder.increase(&foreign, m("1")),
        Err(LedgerError::CrossOrganization { .. })
    ));
    assert!(matches!(
        builder.decrease(&foreign, m("1")),
        Err(LedgerError::CrossOrganization { .. })
    ));
    assert!(builder.transaction().is_empty());
}

#[tokio::test]
async fn test_config_from_json_controls_validation() {
    let config: LedgerConfig =
        serde_json::from_str(r#"{"validate_before_commit": false}"#).unwrap();
    let service = MemoryTransactionService::new();
    let mut builder = TransactionBuilder::make_with_config(service, ORG, config)
        .await
        .unwrap();

    builder.increase(&cash(), m("3")).unwrap();
    let err = builder.commit().await.unwrap_err();
    assert!(err.to_string().starts_with("Persistence error"));
}

#[tokio::test]
async fn test_invoice_then_payment_workflow() {
    let service = MemoryTransactionService::new();
    let receivable = GlAccount::new(
        120,
        ORG,
        "Accounts Receivable",
        AccountType::from_class(AccountClass::Asset),
    );
    let tax_payable = GlAccount::new(
        220,
        ORG,
        "Sales Tax Payable",
        AccountType::from_class(AccountClass::Liability),
    );

    let mut invoice = TransactionBuilder::make(service.clone(), ORG).await.unwrap();
    invoice.reference("INV-2024-001");
    let tax = patterns::record_invoice_with_tax(
        &mut invoice,
        patterns::InvoiceWithTaxParams {
            receivable_account: &receivable,
            revenue_account: &revenue(),
            tax_payable_account: &tax_payable,
            net_amount: m("10000"),
            tax_rate: m("18"),
        },
    )
    .unwrap();
    assert_eq!(tax, m("1800"));
    invoice.commit().await.unwrap();

    let mut payment = TransactionBuilder::make(service.clone(), ORG).await.unwrap();
    patterns::record_payment_received(&mut payment, &cash(), &receivable, m("11800")).unwrap();
    payment.commit().await.unwrap();

    let committed = service.transactions_for_organization(ORG).unwrap();
    assert_eq!(committed.len(), 2);
    assert_eq!(
        committed[0].transaction.reference.as_deref(),
        Some("INV-2024-001")
    );
    assert!(committed.iter().all(|c| c.transaction.is_valid()));
}

#[test]
fn test_decimal_exactness() {
    let sum = m("0.10") + m("0.20");
    assert_eq!(sum, m("0.30"));
    assert!((m("0.30") - sum).is_zero());
}

proptest! {
    #[test]
    fn prop_trial_balance_is_signed_sum(
        postings in prop::collection::vec((any::<bool>(), any::<bool>(), 1i64..1_000_000), 0..20)
    ) {
        let mut transaction = LedgerTransaction::new(ORG);
        let mut expected_cents = 0i64;

        for (index, (increase_is_debit, is_increase, cents)) in postings.iter().enumerate() {
            let is_debit = resolve_is_debit(*increase_is_debit, *is_increase);
            transaction
                .add_record(index as i64, Money::from_cents(*cents), is_debit)
                .unwrap();
            expected_cents += if is_debit { -cents } else { *cents };
        }

        prop_assert_eq!(transaction.trial_balance(), Money::from_cents(expected_cents));
        prop_assert_eq!(
            transaction.is_valid(),
            !postings.is_empty() && expected_cents == 0
        );
    }

    #[test]
    fn prop_non_positive_amounts_rejected(cents in -1_000_000i64..=0, is_debit in any::<bool>()) {
        let mut transaction = LedgerTransaction::new(ORG);
        transaction.add_record(1, Money::from(1), true).unwrap();

        let result = transaction.add_record(2, Money::from_cents(cents), is_debit);
        let rejected = matches!(result, Err(LedgerError::InvalidAmount { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(transaction.len(), 1);
    }

    #[test]
    fn prop_mirrored_postings_balance(cents in 1i64..10_000_000) {
        let mut transaction = LedgerTransaction::new(ORG);
        let amount = Money::from_cents(cents);
        transaction.add_record(1, amount.clone(), resolve_is_debit(true, true)).unwrap();
        transaction.add_record(2, amount, resolve_is_debit(false, true)).unwrap();
        prop_assert!(transaction.is_valid());
    }
}
