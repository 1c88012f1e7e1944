// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type Id = String;

pub fn new_id() -> Id {
    Uuid::new_v4().simple().to_string()
}

/// A stored record with an id, created from a draft and merged with a patch.
pub trait Entity {
    type Draft;
    type Patch;

    fn create(id: Id, draft: Self::Draft, now: NaiveDateTime) -> Self;
    fn id(&self) -> &str;
    fn apply(&mut self, patch: Self::Patch);
}

macro_rules! merge {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = v;
            }
        )+
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("Unknown frequency '{}'", other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    Sip,
    Lumpsum,
    Retirement,
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sip => "sip",
            Self::Lumpsum => "lumpsum",
            Self::Retirement => "retirement",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub currency: String, // display symbol, e.g. "$"
    pub theme: Theme,
    pub notifications: bool,
    pub monthly_alerts: bool,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: "1".into(),
            name: "Guest".into(),
            email: String::new(),
            currency: "$".into(),
            theme: Theme::Light,
            notifications: true,
            monthly_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub currency: Option<String>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub monthly_alerts: Option<bool>,
}

impl User {
    pub fn apply(&mut self, patch: UserPatch) {
        merge!(self, patch; name, email, currency, theme, notifications, monthly_alerts);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Entity for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    fn create(id: Id, d: CategoryDraft, _now: NaiveDateTime) -> Self {
        Self {
            id,
            name: d.name,
            icon: d.icon,
            color: d.color,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: CategoryPatch) {
        merge!(self, patch; name, icon, color);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Id,
    pub category_id: Id,
    pub amount: Decimal,
    pub month: String, // YYYY-MM
    pub spent: Decimal,
}

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub category_id: Id,
    pub amount: Decimal,
    pub month: String,
    pub spent: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub category_id: Option<Id>,
    pub amount: Option<Decimal>,
    pub month: Option<String>,
    pub spent: Option<Decimal>,
}

impl Entity for Budget {
    type Draft = BudgetDraft;
    type Patch = BudgetPatch;

    fn create(id: Id, d: BudgetDraft, _now: NaiveDateTime) -> Self {
        Self {
            id,
            category_id: d.category_id,
            amount: d.amount,
            month: d.month,
            spent: d.spent,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: BudgetPatch) {
        merge!(self, patch; category_id, amount, month, spent);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Id,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<Frequency>,
    pub is_one_time: bool,
    pub is_planned: bool,
    /// Receipt photo as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Expense {
    pub fn month(&self) -> String {
        crate::utils::month_key(self.date)
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Id,
    pub notes: Option<String>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<Frequency>,
    pub is_one_time: bool,
    pub is_planned: bool,
    pub receipt_image: Option<String>,
}

impl ExpenseDraft {
    pub fn new(amount: Decimal, date: NaiveDate, category_id: impl Into<Id>) -> Self {
        Self {
            amount,
            date,
            category_id: category_id.into(),
            notes: None,
            is_recurring: false,
            recurring_frequency: None,
            is_one_time: false,
            is_planned: false,
            receipt_image: None,
        }
    }
}

/// Nested options clear a field with `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<Id>,
    pub notes: Option<Option<String>>,
    pub is_recurring: Option<bool>,
    pub recurring_frequency: Option<Option<Frequency>>,
    pub is_one_time: Option<bool>,
    pub is_planned: Option<bool>,
    pub receipt_image: Option<Option<String>>,
}

impl Entity for Expense {
    type Draft = ExpenseDraft;
    type Patch = ExpensePatch;

    fn create(id: Id, d: ExpenseDraft, _now: NaiveDateTime) -> Self {
        Self {
            id,
            amount: d.amount,
            date: d.date,
            category_id: d.category_id,
            notes: d.notes,
            is_recurring: d.is_recurring,
            recurring_frequency: d.recurring_frequency,
            is_one_time: d.is_one_time,
            is_planned: d.is_planned,
            receipt_image: d.receipt_image,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: ExpensePatch) {
        merge!(self, patch;
            amount, date, category_id, notes, is_recurring,
            recurring_frequency, is_one_time, is_planned, receipt_image,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: Id,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<Frequency>,
}

#[derive(Debug, Clone)]
pub struct IncomeDraft {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub source: String,
    pub notes: Option<String>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<Frequency>,
}

impl IncomeDraft {
    pub fn new(amount: Decimal, date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            source: source.into(),
            notes: None,
            is_recurring: false,
            recurring_frequency: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub notes: Option<Option<String>>,
    pub is_recurring: Option<bool>,
    pub recurring_frequency: Option<Option<Frequency>>,
}

impl Entity for Income {
    type Draft = IncomeDraft;
    type Patch = IncomePatch;

    fn create(id: Id, d: IncomeDraft, _now: NaiveDateTime) -> Self {
        Self {
            id,
            amount: d.amount,
            date: d.date,
            source: d.source,
            notes: d.notes,
            is_recurring: d.is_recurring,
            recurring_frequency: d.recurring_frequency,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: IncomePatch) {
        merge!(self, patch; amount, date, source, notes, is_recurring, recurring_frequency);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: Id,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub monthly_deposit: Decimal,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct SavingsGoalDraft {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub monthly_deposit: Decimal,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct SavingsGoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub monthly_deposit: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Entity for SavingsGoal {
    type Draft = SavingsGoalDraft;
    type Patch = SavingsGoalPatch;

    fn create(id: Id, d: SavingsGoalDraft, _now: NaiveDateTime) -> Self {
        Self {
            id,
            name: d.name,
            target_amount: d.target_amount,
            current_amount: d.current_amount,
            monthly_deposit: d.monthly_deposit,
            start_date: d.start_date,
            target_date: d.target_date,
            icon: d.icon,
            color: d.color,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: SavingsGoalPatch) {
        merge!(self, patch;
            name, target_amount, current_amount, monthly_deposit,
            start_date, target_date, icon, color,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentCalculation {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: CalculationKind,
    pub amount: Decimal,
    pub duration: u32, // months
    pub interest_rate: f64,
    pub result: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct InvestmentCalculationDraft {
    pub kind: CalculationKind,
    pub amount: Decimal,
    pub duration: u32,
    pub interest_rate: f64,
    pub result: i64,
}

impl Entity for InvestmentCalculation {
    type Draft = InvestmentCalculationDraft;
    type Patch = ();

    fn create(id: Id, d: InvestmentCalculationDraft, now: NaiveDateTime) -> Self {
        Self {
            id,
            kind: d.kind,
            amount: d.amount,
            duration: d.duration,
            interest_rate: d.interest_rate,
            result: d.result,
            created_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, _patch: ()) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialForecast {
    pub id: Id,
    pub name: String,
    pub income_growth: f64,
    pub inflation: f64,
    pub investment_returns: f64,
    pub additional_savings: Decimal,
    pub additional_investment: Decimal,
    pub years: u32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct FinancialForecastDraft {
    pub name: String,
    pub income_growth: f64,
    pub inflation: f64,
    pub investment_returns: f64,
    pub additional_savings: Decimal,
    pub additional_investment: Decimal,
    pub years: u32,
}

impl Entity for FinancialForecast {
    type Draft = FinancialForecastDraft;
    type Patch = ();

    fn create(id: Id, d: FinancialForecastDraft, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: d.name,
            income_growth: d.income_growth,
            inflation: d.inflation,
            investment_returns: d.investment_returns,
            additional_savings: d.additional_savings,
            additional_investment: d.additional_investment,
            years: d.years,
            created_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, _patch: ()) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthScore {
    pub score: i64,
    pub date: NaiveDateTime,
    pub savings_ratio: f64,
    pub budget_adherence: f64,
    pub debt_ratio: f64,
    pub investment_ratio: f64,
}

/// Everything that gets persisted under the storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub user: User,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub savings_goals: Vec<SavingsGoal>,
    pub investment_calculations: Vec<InvestmentCalculation>,
    pub financial_forecasts: Vec<FinancialForecast>,
    pub financial_health_scores: Vec<FinancialHealthScore>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.budgets.is_empty()
            && self.expenses.is_empty()
            && self.incomes.is_empty()
            && self.savings_goals.is_empty()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// First budget for (category, month); duplicates are not prevented.
    pub fn budget_for(&self, category_id: &str, month: &str) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.category_id == category_id && b.month == month)
    }
}
