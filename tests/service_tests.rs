use budget_tracker::{
    core::{
        ledger_manager::{EditDraft, LedgerManager},
        services::{
            EditState, ExpenseForm, IncomeForm, PeriodFilter, Submission, SummaryService,
        },
        time::FixedClock,
    },
    domain::{EntryKind, ExpenseEntry, IncomeEntry},
    errors::LedgerError,
    ledger::Ledger,
    storage::MemoryStorage,
};
use chrono::NaiveDate;

fn manager() -> LedgerManager {
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    );
    let (manager, _) = LedgerManager::open(Box::new(MemoryStorage::new()), Box::new(clock));
    manager
}

fn income(source: &str, amount: &str) -> IncomeForm {
    IncomeForm {
        source: source.into(),
        amount: amount.into(),
    }
}

fn expense(title: &str, amount: &str, category: &str) -> ExpenseForm {
    ExpenseForm {
        title: title.into(),
        amount: amount.into(),
        category: category.into(),
    }
}

fn always(answer: bool) -> impl FnMut(&str) -> bool {
    move |_: &str| answer
}

#[test]
fn salary_then_two_expenses_produce_expected_views() {
    let mut manager = manager();
    manager.submit_income(&income("SALARY", "5000")).unwrap();
    manager.submit_expense(&expense("Lunch", "1200", "Food")).unwrap();
    manager.submit_expense(&expense("Bus", "300", "Transport")).unwrap();

    let totals = manager.totals();
    assert_eq!(totals.income, 5000.0);
    assert_eq!(totals.expense, 1500.0);
    assert_eq!(totals.balance, 3500.0);

    let breakdown: Vec<(String, f64)> = manager
        .category_breakdown()
        .into_iter()
        .map(|row| (row.category, row.total))
        .collect();
    assert_eq!(
        breakdown,
        vec![("Food".to_string(), 1200.0), ("Transport".to_string(), 300.0)]
    );

    let monthly = manager.monthly_summary();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month.to_string(), "03/2024");
    assert_eq!(monthly[0].balance, 3500.0);

    let found = manager.view_by_search("food");
    assert!(found.incomes.is_empty());
    assert_eq!(found.expenses.len(), 1);
    assert_eq!(found.expenses[0].entry.title, "Lunch");
}

#[test]
fn undated_entries_count_in_totals_but_not_in_groups() {
    let mut ledger = Ledger::default();
    ledger.push_income(IncomeEntry::new("Salary", 100.0, "01/02/2024 09:00 AM"));
    ledger.push_income(IncomeEntry::new("Bonus", 50.0, "20/02/2024 10:00 AM"));
    ledger.push_income(IncomeEntry {
        date: None,
        ..IncomeEntry::new("Cash", 7.0, "")
    });
    ledger.push_expense(ExpenseEntry::new("Rent", 40.0, "Housing", "03/01/2023 08:00 AM"));

    let totals = SummaryService::totals(&ledger);
    assert_eq!(totals.income, 157.0);

    let grouped = SummaryService::group_by_month(&ledger.incomes);
    assert_eq!(grouped.len(), 1);
    let grouped_total: f64 = grouped.values().flatten().map(|entry| entry.amount).sum();
    assert_eq!(grouped_total, 150.0);

    let rows = SummaryService::monthly_summary(&ledger);
    let months: Vec<String> = rows.iter().map(|row| row.month.to_string()).collect();
    assert_eq!(months, vec!["01/2023", "02/2024"]);
    assert_eq!(rows[1].income_total, 150.0);
    assert_eq!(rows[0].expense_total, 40.0);
    assert_eq!(SummaryService::available_years(&ledger), vec![2024, 2023]);
}

#[test]
fn deleting_shifts_later_entries_down() {
    let mut manager = manager();
    for source in ["A", "B", "C"] {
        manager.submit_income(&income(source, "10")).unwrap();
    }

    let removed = manager
        .remove_at(EntryKind::Income, 1, &mut always(true))
        .unwrap()
        .expect("confirmed");
    assert_eq!(removed.value, 1);
    let sources: Vec<&str> = manager
        .ledger()
        .incomes
        .iter()
        .map(|entry| entry.source.as_str())
        .collect();
    assert_eq!(sources, vec!["A", "C"]);

    assert!(matches!(
        manager.remove_at(EntryKind::Income, 5, &mut always(true)),
        Err(LedgerError::InvalidIndex(5))
    ));
}

#[test]
fn declined_delete_keeps_the_entry() {
    let mut manager = manager();
    manager.submit_expense(&expense("Lunch", "12", "Food")).unwrap();
    let result = manager
        .remove_at(EntryKind::Expense, 0, &mut always(false))
        .unwrap();
    assert!(result.is_none());
    assert_eq!(manager.ledger().expenses.len(), 1);
}

#[test]
fn rows_from_a_filtered_view_address_the_right_entry() {
    let mut manager = manager();
    manager.submit_expense(&expense("Lunch", "12", "Food")).unwrap();
    manager.submit_expense(&expense("Taxi", "30", "Transport")).unwrap();
    manager.submit_expense(&expense("Dinner", "20", "Food")).unwrap();

    let target = {
        let view = manager.view_by_search("dinner");
        assert_eq!(view.expenses[0].index, 2);
        view.expenses[0].id
    };
    manager
        .remove(EntryKind::Expense, target, &mut always(true))
        .unwrap();
    let titles: Vec<&str> = manager
        .ledger()
        .expenses
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Lunch", "Taxi"]);
}

#[test]
fn edit_cycle_updates_in_place() {
    let mut manager = manager();
    manager.submit_expense(&expense("Lunch", "12", "Food")).unwrap();
    manager.submit_expense(&expense("Taxi", "30", "Transport")).unwrap();

    let draft = manager.begin_edit_at(EntryKind::Expense, 0).unwrap();
    assert_eq!(
        draft,
        EditDraft::Expense(expense("Lunch", "12", "Food"))
    );
    let id = manager.ledger().expenses[0].id;
    assert_eq!(manager.edit_state(EntryKind::Expense), EditState::Editing(id));
    assert_eq!(manager.edit_state(EntryKind::Income), EditState::Idle);

    let outcome = manager
        .submit_expense(&expense("Brunch", "15", "Food"))
        .unwrap();
    assert_eq!(outcome.value, Submission::Updated(id));
    assert_eq!(manager.ledger().expenses.len(), 2);
    assert_eq!(manager.ledger().expenses[0].title, "Brunch");
    assert_eq!(manager.edit_state(EntryKind::Expense), EditState::Idle);
}

#[test]
fn cancelled_edit_appends_on_next_submit() {
    let mut manager = manager();
    manager.submit_income(&income("A", "1")).unwrap();
    manager.begin_edit_at(EntryKind::Income, 0).unwrap();
    manager.cancel_edit(EntryKind::Income);

    let outcome = manager.submit_income(&income("B", "2")).unwrap();
    assert!(matches!(outcome.value, Submission::Created(_)));
    assert_eq!(manager.ledger().incomes.len(), 2);
    assert_eq!(manager.ledger().incomes[0].source, "A");
}

#[test]
fn invalid_forms_are_rejected_without_side_effects() {
    let mut manager = manager();
    assert!(manager.submit_income(&income("", "100")).is_err());
    assert!(manager.submit_income(&income("Gift", "-1")).is_err());
    assert!(manager.submit_expense(&expense("Tea", "abc", "Food")).is_err());
    assert!(manager.ledger().is_empty());
}

#[test]
fn period_views_and_editability() {
    let mut manager = manager();
    manager.submit_income(&income("Salary", "10")).unwrap();

    let current = PeriodFilter::parse("2024", "3").unwrap();
    assert_eq!(manager.view_by_period(&current).incomes.len(), 1);
    assert!(manager.is_current_period(&current));
    assert!(manager.is_current_period(&PeriodFilter::all()));

    let past = PeriodFilter::parse("2023", "all").unwrap();
    assert!(manager.view_by_period(&past).is_empty());
    assert!(!manager.is_current_period(&past));
}
