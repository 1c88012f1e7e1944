// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory application state and its named mutators.
//!
//! Every mutation goes through a method on [`Store`]. Expense and income
//! changes are published as [`LedgerEvent`]s to the subscribed
//! [`LedgerObserver`]s (the health scorer is one). Persisting the snapshot
//! is the caller's job; [`Store::is_dirty`] says whether it is needed.

use crate::models::*;
use crate::utils::{month_key, shift_month};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(t) => *t,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn current_month(&self) -> String {
        month_key(self.today())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    ExpenseAdded,
    ExpenseUpdated,
    ExpenseDeleted,
    IncomeAdded,
    IncomeUpdated,
    IncomeDeleted,
    /// Several changes applied inside [`Store::batch`].
    Batch,
    /// Explicit recompute request with no data change.
    Refresh,
}

#[derive(Debug, Clone)]
pub struct LedgerEvent {
    pub change: LedgerChange,
    pub id: Option<Id>,
    pub at: NaiveDateTime,
}

pub trait LedgerObserver {
    fn on_ledger_change(&mut self, data: &mut Snapshot, event: &LedgerEvent);
}

pub struct Store {
    data: Snapshot,
    clock: Clock,
    observers: Vec<Box<dyn LedgerObserver>>,
    dirty: bool,
    batching: bool,
    pending: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

fn insert<E: Entity>(items: &mut Vec<E>, draft: E::Draft, now: NaiveDateTime) -> Id {
    let id = new_id();
    items.push(E::create(id.clone(), draft, now));
    id
}

fn patch<E: Entity>(items: &mut [E], id: &str, p: E::Patch) -> bool {
    match items.iter_mut().find(|e| e.id() == id) {
        Some(e) => {
            e.apply(p);
            true
        }
        None => false,
    }
}

fn remove<E: Entity>(items: &mut Vec<E>, id: &str) -> Option<E> {
    let pos = items.iter().position(|e| e.id() == id)?;
    Some(items.remove(pos))
}

impl Store {
    pub fn new(data: Snapshot) -> Self {
        Self {
            data,
            clock: Clock::System,
            observers: Vec::new(),
            dirty: false,
            batching: false,
            pending: false,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.data
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.data
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_month(&self) -> String {
        self.clock.current_month()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Runs `f` with notifications held back, then publishes a single
    /// [`LedgerChange::Batch`] if the ledger changed inside it.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.batching;
        self.batching = true;
        let out = f(self);
        self.batching = outer;
        if !outer && std::mem::take(&mut self.pending) {
            self.notify(LedgerChange::Batch, None);
        }
        out
    }

    /// Publishes a [`LedgerChange::Refresh`] so observers recompute.
    pub fn refresh(&mut self) {
        self.dirty = true;
        self.notify(LedgerChange::Refresh, None);
    }

    fn notify(&mut self, change: LedgerChange, id: Option<Id>) {
        if self.batching {
            self.pending = true;
            return;
        }
        let event = LedgerEvent {
            change,
            id,
            at: self.clock.now(),
        };
        for obs in self.observers.iter_mut() {
            obs.on_ledger_change(&mut self.data, &event);
        }
    }

    fn touched(&mut self, found: bool) -> bool {
        self.dirty |= found;
        found
    }

    // ---- categories ----

    pub fn add_category(&mut self, draft: CategoryDraft) -> Id {
        let id = insert(&mut self.data.categories, draft, self.clock.now());
        debug!(%id, "category added");
        self.dirty = true;
        id
    }

    pub fn update_category(&mut self, id: &str, p: CategoryPatch) -> bool {
        let found = patch(&mut self.data.categories, id, p);
        self.touched(found)
    }

    /// Budgets and expenses pointing at the category are left as they are.
    pub fn delete_category(&mut self, id: &str) -> bool {
        let found = remove(&mut self.data.categories, id).is_some();
        self.touched(found)
    }

    // ---- budgets ----

    pub fn add_budget(&mut self, draft: BudgetDraft) -> Id {
        let id = insert(&mut self.data.budgets, draft, self.clock.now());
        debug!(%id, "budget added");
        self.dirty = true;
        id
    }

    pub fn update_budget(&mut self, id: &str, p: BudgetPatch) -> bool {
        let found = patch(&mut self.data.budgets, id, p);
        self.touched(found)
    }

    pub fn delete_budget(&mut self, id: &str) -> bool {
        let found = remove(&mut self.data.budgets, id).is_some();
        self.touched(found)
    }

    /// Copies every budget of `to_month`'s previous month into `to_month`
    /// unless the category already has one there. Returns how many were copied.
    pub fn copy_previous_month_budgets(&mut self, to_month: &str) -> crate::error::Result<usize> {
        let to_month = crate::utils::parse_month(to_month)?;
        let first = crate::utils::parse_date(&format!("{}-01", to_month))?;
        let from_month = shift_month(first, -1);

        let to_copy: Vec<BudgetDraft> = self
            .data
            .budgets
            .iter()
            .filter(|b| b.month == from_month)
            .filter(|b| self.data.budget_for(&b.category_id, &to_month).is_none())
            .map(|b| BudgetDraft {
                category_id: b.category_id.clone(),
                amount: b.amount,
                month: to_month.clone(),
                spent: Decimal::ZERO,
            })
            .collect();

        let mut copied = 0;
        for draft in to_copy {
            // a month may itself hold duplicates; keep the guard per insert
            if self.data.budget_for(&draft.category_id, &to_month).is_some() {
                continue;
            }
            self.add_budget(draft);
            copied += 1;
        }
        debug!(from = %from_month, to = %to_month, copied, "budgets copied");
        Ok(copied)
    }

    fn adjust_budget_spent(&mut self, category_id: &str, month: &str, delta: Decimal) {
        if category_id.is_empty() {
            return;
        }
        if let Some(b) = self
            .data
            .budgets
            .iter_mut()
            .find(|b| b.category_id == category_id && b.month == month)
        {
            b.spent = match b.spent.checked_add(delta) {
                Some(spent) => spent,
                None => {
                    warn!(budget = %b.id, %delta, "budget spent out of range, saturating");
                    b.spent.saturating_add(delta)
                }
            };
            debug!(budget = %b.id, %delta, spent = %b.spent, "budget spent adjusted");
        }
    }

    // ---- expenses ----

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Id {
        let category_id = draft.category_id.clone();
        let month = month_key(draft.date);
        let amount = draft.amount;
        let id = insert(&mut self.data.expenses, draft, self.clock.now());
        self.adjust_budget_spent(&category_id, &month, amount);
        debug!(%id, %amount, "expense added");
        self.dirty = true;
        self.notify(LedgerChange::ExpenseAdded, Some(id.clone()));
        id
    }

    /// The old amount leaves its budget and the new amount joins the
    /// budget matching the updated category and month.
    pub fn update_expense(&mut self, id: &str, p: ExpensePatch) -> bool {
        let Some(old) = self.data.expenses.iter().find(|e| e.id == id).cloned() else {
            return false;
        };
        patch(&mut self.data.expenses, id, p);
        let new = self
            .data
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .unwrap_or_else(|| old.clone());
        self.adjust_budget_spent(&old.category_id, &old.month(), -old.amount);
        self.adjust_budget_spent(&new.category_id, &new.month(), new.amount);
        debug!(%id, "expense updated");
        self.dirty = true;
        self.notify(LedgerChange::ExpenseUpdated, Some(id.to_string()));
        true
    }

    pub fn delete_expense(&mut self, id: &str) -> bool {
        let Some(old) = remove(&mut self.data.expenses, id) else {
            return false;
        };
        self.adjust_budget_spent(&old.category_id, &old.month(), -old.amount);
        debug!(%id, "expense deleted");
        self.dirty = true;
        self.notify(LedgerChange::ExpenseDeleted, Some(id.to_string()));
        true
    }

    // ---- incomes ----

    pub fn add_income(&mut self, draft: IncomeDraft) -> Id {
        let id = insert(&mut self.data.incomes, draft, self.clock.now());
        debug!(%id, "income added");
        self.dirty = true;
        self.notify(LedgerChange::IncomeAdded, Some(id.clone()));
        id
    }

    pub fn update_income(&mut self, id: &str, p: IncomePatch) -> bool {
        if !patch(&mut self.data.incomes, id, p) {
            return false;
        }
        self.dirty = true;
        self.notify(LedgerChange::IncomeUpdated, Some(id.to_string()));
        true
    }

    pub fn delete_income(&mut self, id: &str) -> bool {
        if remove(&mut self.data.incomes, id).is_none() {
            return false;
        }
        self.dirty = true;
        self.notify(LedgerChange::IncomeDeleted, Some(id.to_string()));
        true
    }

    // ---- savings goals ----

    pub fn add_savings_goal(&mut self, draft: SavingsGoalDraft) -> Id {
        let id = insert(&mut self.data.savings_goals, draft, self.clock.now());
        self.dirty = true;
        id
    }

    pub fn update_savings_goal(&mut self, id: &str, p: SavingsGoalPatch) -> bool {
        let found = patch(&mut self.data.savings_goals, id, p);
        self.touched(found)
    }

    pub fn delete_savings_goal(&mut self, id: &str) -> bool {
        let found = remove(&mut self.data.savings_goals, id).is_some();
        self.touched(found)
    }

    // ---- audit records ----

    pub fn add_investment_calculation(&mut self, draft: InvestmentCalculationDraft) -> Id {
        let id = insert(
            &mut self.data.investment_calculations,
            draft,
            self.clock.now(),
        );
        self.dirty = true;
        id
    }

    pub fn delete_investment_calculation(&mut self, id: &str) -> bool {
        let found = remove(&mut self.data.investment_calculations, id).is_some();
        self.touched(found)
    }

    pub fn add_financial_forecast(&mut self, draft: FinancialForecastDraft) -> Id {
        let id = insert(&mut self.data.financial_forecasts, draft, self.clock.now());
        self.dirty = true;
        id
    }

    pub fn delete_financial_forecast(&mut self, id: &str) -> bool {
        let found = remove(&mut self.data.financial_forecasts, id).is_some();
        self.touched(found)
    }

    // ---- profile ----

    pub fn update_user(&mut self, p: UserPatch) {
        self.data.user.apply(p);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Counter(Rc<Cell<usize>>);

    impl LedgerObserver for Counter {
        fn on_ledger_change(&mut self, _data: &mut Snapshot, _event: &LedgerEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn store_with_food_budget() -> (Store, Id, Id) {
        let mut store = Store::default();
        let food = store.add_category(CategoryDraft {
            name: "Food".into(),
            icon: "utensils".into(),
            color: "#ef4444".into(),
        });
        let budget = store.add_budget(BudgetDraft {
            category_id: food.clone(),
            amount: dec("500"),
            month: "2025-08".into(),
            spent: Decimal::ZERO,
        });
        (store, food, budget)
    }

    fn spent(store: &Store, budget: &str) -> Decimal {
        store
            .snapshot()
            .budgets
            .iter()
            .find(|b| b.id == budget)
            .unwrap()
            .spent
    }

    #[test]
    fn add_expense_bumps_matching_budget_only() {
        let (mut store, food, budget) = store_with_food_budget();
        store.add_expense(ExpenseDraft::new(dec("45.50"), date("2025-08-03"), food.clone()));
        assert_eq!(spent(&store, &budget), dec("45.50"));

        // other month: nothing to touch and nothing created
        store.add_expense(ExpenseDraft::new(dec("10"), date("2025-09-01"), food));
        assert_eq!(spent(&store, &budget), dec("45.50"));
        assert_eq!(store.snapshot().budgets.len(), 1);
    }

    #[test]
    fn update_expense_moves_amount_between_budgets() {
        let (mut store, food, august) = store_with_food_budget();
        let september = store.add_budget(BudgetDraft {
            category_id: food.clone(),
            amount: dec("500"),
            month: "2025-09".into(),
            spent: Decimal::ZERO,
        });
        let id = store.add_expense(ExpenseDraft::new(dec("100"), date("2025-08-10"), food));
        assert!(store.update_expense(
            &id,
            ExpensePatch {
                amount: Some(dec("120")),
                date: Some(date("2025-09-02")),
                ..Default::default()
            }
        ));
        assert_eq!(spent(&store, &august), Decimal::ZERO);
        assert_eq!(spent(&store, &september), dec("120"));
    }

    #[test]
    fn oversized_amounts_saturate_spent_and_scoring() {
        let (store, food, budget) = store_with_food_budget();
        let now = date("2025-08-20").and_hms_opt(12, 0, 0).unwrap();
        let mut store = store.with_clock(Clock::Fixed(now));
        store.subscribe(Box::new(crate::health::HealthScorer::default()));
        store.add_expense(ExpenseDraft::new(Decimal::MAX, date("2025-08-05"), food.clone()));
        store.add_expense(ExpenseDraft::new(dec("1"), date("2025-08-06"), food));
        assert_eq!(spent(&store, &budget), Decimal::MAX);
        assert_eq!(store.snapshot().financial_health_scores.len(), 2);
    }

    #[test]
    fn missing_ids_are_silent_noops() {
        let mut store = Store::default();
        assert!(!store.update_expense("nope", ExpensePatch::default()));
        assert!(!store.delete_income("nope"));
        assert!(!store.delete_category("nope"));
        assert!(!store.is_dirty());
    }

    #[test]
    fn ledger_changes_notify_observers_once_per_mutation() {
        let hits = Rc::new(Cell::new(0));
        let mut store = Store::default();
        store.subscribe(Box::new(Counter(hits.clone())));
        let id = store.add_income(IncomeDraft::new(dec("10"), date("2025-08-01"), "Salary"));
        store.update_income(&id, IncomePatch::default());
        store.delete_income(&id);
        store.add_category(CategoryDraft {
            name: "x".into(),
            icon: String::new(),
            color: String::new(),
        });
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn batch_publishes_a_single_event() {
        let hits = Rc::new(Cell::new(0));
        let mut store = Store::default();
        store.subscribe(Box::new(Counter(hits.clone())));
        store.batch(|s| {
            s.add_income(IncomeDraft::new(dec("1"), date("2025-08-01"), "a"));
            s.add_expense(ExpenseDraft::new(dec("1"), date("2025-08-01"), ""));
        });
        assert_eq!(hits.get(), 1);

        store.batch(|s| {
            s.add_category(CategoryDraft {
                name: "y".into(),
                icon: String::new(),
                color: String::new(),
            });
        });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn copy_previous_month_skips_existing_categories() {
        let (mut store, food, _) = store_with_food_budget();
        let rent = store.add_category(CategoryDraft {
            name: "Rent".into(),
            icon: "home".into(),
            color: "#eab308".into(),
        });
        store.add_budget(BudgetDraft {
            category_id: rent.clone(),
            amount: dec("1200"),
            month: "2025-08".into(),
            spent: dec("1200"),
        });
        store.add_budget(BudgetDraft {
            category_id: rent,
            amount: dec("1300"),
            month: "2025-09".into(),
            spent: Decimal::ZERO,
        });

        let copied = store.copy_previous_month_budgets("2025-09").unwrap();
        assert_eq!(copied, 1);
        let copied_food = store.snapshot().budget_for(&food, "2025-09").unwrap();
        assert_eq!(copied_food.amount, dec("500"));
        assert_eq!(copied_food.spent, Decimal::ZERO);
        assert_eq!(store.copy_previous_month_budgets("2025-09").unwrap(), 0);
    }
}
