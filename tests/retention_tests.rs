mod common;

use chrono::NaiveDate;
use common::{env_at, manager_on, utc};
use ledger_core::ledger::{
    filter_retained, filter_retained_targets, retention_cutoff, Entry, EntryInput, Target,
};

#[test]
fn filter_keeps_exactly_the_in_window_entries_in_order() {
    let cutoff = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let entries = vec![
        Entry::new(10.0, "A", utc(2024, 3, 31, 23, 59)),
        Entry::new(20.0, "B", utc(2024, 4, 1, 0, 0)),
        Entry::new(30.0, "C", utc(2023, 12, 25, 12, 0)),
        Entry::new(40.0, "D", utc(2025, 1, 2, 8, 30)),
    ];

    let kept = filter_retained(&entries, cutoff);

    let categories: Vec<&str> = kept.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(categories, vec!["B", "D"]);
    // an entry dated exactly on the cutoff day survives
    assert_eq!(kept[0].amount, 20.0);
    // the input collection is untouched
    assert_eq!(entries.len(), 4);
}

#[test]
fn targets_are_pruned_by_their_month_start() {
    let cutoff = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    let targets = vec![
        Target::new("Groceries", "2024-03", 300.0),
        Target::new("Groceries", "2024-05", 250.0),
        Target::new("Rent", "not-a-month", 900.0),
    ];

    let kept = filter_retained_targets(&targets, cutoff);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].month, "2024-05");
}

#[test]
fn cutoff_advances_with_the_clock() {
    let cutoff = retention_cutoff(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    assert_eq!(cutoff, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());

    let later = retention_cutoff(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
    assert_eq!(later, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
}

#[test]
fn out_of_window_entry_is_silently_discarded() {
    let mut env = env_at(utc(2025, 6, 15, 12, 0));
    env.manager
        .register("alice", "a-long-enough-password")
        .expect("register");

    // cutoff is 2024-04-15; this entry falls well before it
    let stale = EntryInput::dated("50", "Coffee", "2024-01-01");
    let id = env.manager.add_income("alice", &stale).expect("add income");

    assert!(id.is_none());
    let ledger = env.manager.accounts().ledger("alice").expect("ledger");
    assert!(ledger.income.is_empty());
}

#[test]
fn malformed_input_is_silently_discarded() {
    let mut env = env_at(utc(2025, 6, 15, 12, 0));
    env.manager
        .register("bob", "a-long-enough-password")
        .expect("register");

    for input in [
        EntryInput::new("not-a-number", "Food"),
        EntryInput::new("NaN", "Food"),
        EntryInput::new("12.5", "   "),
        EntryInput::dated("12.5", "Food", "12/31/2024"),
    ] {
        let id = env.manager.add_expense("bob", &input).expect("add expense");
        assert!(id.is_none());
    }
    let ledger = env.manager.accounts().ledger("bob").expect("ledger");
    assert!(ledger.expenses.is_empty());
}

#[test]
fn load_prunes_stale_entries_and_saves_the_clean_document() {
    let env = env_at(utc(2025, 6, 15, 12, 0));
    let mut manager = env.manager;
    manager
        .register("carol", "a-long-enough-password")
        .expect("register");
    manager
        .add_income("carol", &EntryInput::new("100", "Salary"))
        .expect("add income");

    // splice a stale entry into the persisted document behind the manager's back
    let path = env.base.join("accounts.json");
    let raw = std::fs::read_to_string(&path).expect("read accounts");
    let mut doc: serde_json::Value = serde_json::from_str(&raw).expect("parse accounts");
    doc["carol"]["ledger"]["income"]
        .as_array_mut()
        .expect("income array")
        .push(serde_json::json!({
            "amount": 55.0,
            "category": "Stale",
            "date": "2023-01-01T00:00:00Z",
        }));
    std::fs::write(&path, serde_json::to_string_pretty(&doc).expect("render")).expect("write");

    let mut reloaded = manager_on(&env.base, &env.clock);
    assert_eq!(
        reloaded.accounts().ledger("carol").expect("ledger").income.len(),
        2
    );

    reloaded.refresh("carol").expect("refresh");

    let ledger = reloaded.accounts().ledger("carol").expect("ledger");
    assert_eq!(ledger.income.len(), 1);
    assert_eq!(ledger.income[0].category, "Salary");

    // the save wrote the pruned document back
    let raw = std::fs::read_to_string(&path).expect("read accounts");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("parse accounts");
    assert_eq!(
        doc["carol"]["ledger"]["income"]
            .as_array()
            .expect("income array")
            .len(),
        1
    );
}

#[test]
fn target_overwrite_keeps_a_single_record() {
    let mut env = env_at(utc(2024, 5, 10, 9, 0));
    env.manager
        .register("dana", "a-long-enough-password")
        .expect("register");

    env.manager
        .set_target("dana", "Groceries", "2024-05", 300.0)
        .expect("set target");
    env.manager
        .set_target("dana", "Groceries", "2024-05", 250.0)
        .expect("set target again");

    let targets = &env.manager.accounts().ledger("dana").expect("ledger").targets;
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].amount, 250.0);
}
