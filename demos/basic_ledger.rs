//! Basic ledger usage example

use ledger_engine::utils::MemoryTransactionService;
use ledger_engine::{
    patterns, AccountClass, AccountType, GlAccount, LedgerError, Money, TransactionBuilder,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Ledger Engine - Basic Ledger Example\n");

    let organization_id = 1;
    let service = MemoryTransactionService::new();

    // 1. Accounts as they would come from the chart of accounts
    let cash = GlAccount::new(
        1000,
        organization_id,
        "Cash",
        AccountType::from_class(AccountClass::Asset),
    );
    let equity = GlAccount::new(
        3000,
        organization_id,
        "Owner's Equity",
        AccountType::from_class(AccountClass::Equity),
    );
    let revenue = GlAccount::new(
        4000,
        organization_id,
        "Sales Revenue",
        AccountType::from_class(AccountClass::Income),
    );
    let rent = GlAccount::new(
        6000,
        organization_id,
        "Rent Expense",
        AccountType::from_class(AccountClass::Expense),
    );

    // 2. Owner invests cash in the business
    let mut investment = TransactionBuilder::make(service.clone(), organization_id).await?;
    investment
        .description("Initial owner investment")
        .increase(&cash, Money::from(50000))?
        .increase(&equity, Money::from(50000))?;
    let id = investment.commit().await?;
    println!("  Recorded owner investment as transaction {id}");

    // 3. A cash sale
    let mut sale = TransactionBuilder::make(service.clone(), organization_id).await?;
    sale.description("Cash sale");
    patterns::record_sale(&mut sale, &cash, &revenue, "1250.50".parse::<Money>()?)?;
    let id = sale.commit().await?;
    println!("  Recorded cash sale as transaction {id}");

    // 4. Rent paid
    let mut payment = TransactionBuilder::make(service.clone(), organization_id).await?;
    payment.description("Monthly rent");
    patterns::record_expense_payment(&mut payment, &rent, &cash, Money::from(15000))?;
    let id = payment.commit().await?;
    println!("  Recorded rent payment as transaction {id}");

    // 5. Committing twice is refused
    match payment.commit().await {
        Err(LedgerError::AlreadyProcessed) => println!("  Second commit refused: already processed"),
        other => println!("  Unexpected result: {other:?}"),
    }

    // 6. An unbalanced posting never reaches storage
    let mut broken = TransactionBuilder::make(service.clone(), organization_id).await?;
    broken.increase(&cash, Money::from(10))?;
    if let Err(e) = broken.commit().await {
        println!("  Unbalanced transaction refused: {e}");
    }

    println!("\nCommitted transactions:");
    for committed in service.transactions_for_organization(organization_id)? {
        let transaction = &committed.transaction;
        println!(
            "  #{} {:<26} debits {:>10} credits {:>10}",
            committed.id,
            transaction.description.as_deref().unwrap_or("-"),
            transaction.total_debits(),
            transaction.total_credits(),
        );
    }

    Ok(())
}
