//! Debit/credit resolution from account type metadata

use crate::types::*;

/// Whether an operation on an account is realized as a debit.
///
/// An increase on a debit-increasing type is a debit and a decrease is a
/// credit; credit-increasing types are the mirror image.
pub fn resolve_is_debit(increase_is_debit: bool, is_increase: bool) -> bool {
    increase_is_debit == is_increase
}

/// Entry side for applying `operation` to an account of `account_type`
pub fn resolve_entry_type(account_type: &AccountType, operation: Operation) -> EntryType {
    EntryType::from_is_debit(resolve_is_debit(
        account_type.increase_is_debit,
        operation.is_increase(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, true, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(false, false, true)]
    fn test_truth_table(
        #[case] increase_is_debit: bool,
        #[case] is_increase: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(resolve_is_debit(increase_is_debit, is_increase), expected);
    }

    #[rstest]
    #[case(AccountClass::Asset, Operation::Increase, EntryType::Debit)]
    #[case(AccountClass::Asset, Operation::Decrease, EntryType::Credit)]
    #[case(AccountClass::Expense, Operation::Increase, EntryType::Debit)]
    #[case(AccountClass::Liability, Operation::Increase, EntryType::Credit)]
    #[case(AccountClass::Equity, Operation::Decrease, EntryType::Debit)]
    #[case(AccountClass::Income, Operation::Increase, EntryType::Credit)]
    #[case(AccountClass::Income, Operation::Decrease, EntryType::Debit)]
    fn test_entry_type_by_class(
        #[case] class: AccountClass,
        #[case] operation: Operation,
        #[case] expected: EntryType,
    ) {
        let account_type = AccountType::from_class(class);
        assert_eq!(resolve_entry_type(&account_type, operation), expected);
    }

    #[test]
    fn test_decrease_is_opposite_of_increase() {
        for increase_is_debit in [true, false] {
            let account_type = AccountType::new("Any", increase_is_debit);
            assert_eq!(
                resolve_entry_type(&account_type, Operation::Decrease),
                resolve_entry_type(&account_type, Operation::Increase).opposite()
            );
        }
    }
}
