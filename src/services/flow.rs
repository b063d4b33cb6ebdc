//! Flow classification
//!
//! Master category names are free text; their flow is inferred from a
//! prioritized keyword table using plain substring containment, first match
//! wins. Transactions take an explicit override first, then their category's
//! master flow, then the sign of the amount.

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Flow, MasterCategory, MasterFlow, Transaction};

/// Keyword table in priority order
const FLOW_KEYWORDS: &[(MasterFlow, &[&str])] = &[
    (MasterFlow::Interest, &["interest", "yield", "dividend"]),
    (MasterFlow::In, &["income", "inflow", "gain", "earning"]),
    (
        MasterFlow::Out,
        &[
            "expense",
            "spend",
            "cost",
            "fee",
            "fees",
            "essential",
            "discretionary",
        ],
    ),
    (
        MasterFlow::Transfers,
        &["transfer", "movement", "move", "rebalanc", "growth"],
    ),
];

/// Infer the flow of a master category from its name
pub fn master_flow(name: &str) -> MasterFlow {
    let name = name.to_lowercase();
    FLOW_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(flow, _)| *flow)
        .unwrap_or(MasterFlow::Other)
}

/// Flow of a budget line whose category sits under a master with this flow
///
/// Lines have no amount to fall back on, so an unrecognised master is
/// budgeted as spending.
pub fn line_flow(master: MasterFlow) -> Flow {
    master.as_flow().unwrap_or(Flow::Out)
}

/// Classifies transactions and lines against one category snapshot
pub struct FlowClassifier {
    category_flows: HashMap<CategoryId, MasterFlow>,
}

impl FlowClassifier {
    pub fn new(categories: &[Category], master_categories: &[MasterCategory]) -> Self {
        let master_flows: HashMap<_, _> = master_categories
            .iter()
            .map(|m| (m.id, master_flow(&m.name)))
            .collect();

        let category_flows = categories
            .iter()
            .filter_map(|c| {
                master_flows
                    .get(&c.master_category_id)
                    .map(|flow| (c.id, *flow))
            })
            .collect();

        Self { category_flows }
    }

    /// Master flow of a category, `None` when the category or its master is
    /// missing from the snapshot
    pub fn category_flow(&self, category_id: CategoryId) -> Option<MasterFlow> {
        self.category_flows.get(&category_id).copied()
    }

    /// Flow of a budget line for `category_id`
    pub fn line_flow(&self, category_id: CategoryId) -> Option<Flow> {
        self.category_flow(category_id).map(line_flow)
    }

    /// Resolve the flow of a transaction
    pub fn transaction_flow(&self, transaction: &Transaction) -> Flow {
        if let Some(flow_override) = transaction.flow_override {
            return flow_override.as_flow();
        }

        transaction
            .category_id
            .and_then(|id| self.category_flow(id))
            .and_then(|master| master.as_flow())
            .unwrap_or_else(|| Flow::from_sign(transaction.amount.cents()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, FlowOverride, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_master_flow_keywords() {
        assert_eq!(master_flow("Interest & Dividends"), MasterFlow::Interest);
        assert_eq!(master_flow("Savings Yield"), MasterFlow::Interest);
        assert_eq!(master_flow("Income"), MasterFlow::In);
        assert_eq!(master_flow("Capital Gains"), MasterFlow::In);
        assert_eq!(master_flow("Essential Expenses"), MasterFlow::Out);
        assert_eq!(master_flow("Bank Fees"), MasterFlow::Out);
        assert_eq!(master_flow("Discretionary"), MasterFlow::Out);
        assert_eq!(master_flow("Transfers"), MasterFlow::Transfers);
        assert_eq!(master_flow("Portfolio Rebalancing"), MasterFlow::Transfers);
        assert_eq!(master_flow("Wealth Growth"), MasterFlow::Transfers);
        assert_eq!(master_flow("Miscellaneous"), MasterFlow::Other);
    }

    #[test]
    fn test_master_flow_priority_first_match_wins() {
        // Both "interest" and "income" match; interest is checked first
        assert_eq!(master_flow("Interest Income"), MasterFlow::Interest);
        // "income" beats "transfer"
        assert_eq!(master_flow("Income Transfers"), MasterFlow::In);
        // "cost" beats "move"
        assert_eq!(master_flow("Moving Costs"), MasterFlow::Out);
    }

    #[test]
    fn test_master_flow_case_insensitive() {
        assert_eq!(master_flow("INCOME"), MasterFlow::In);
    }

    #[test]
    fn test_line_flow_defaults_other_to_out() {
        assert_eq!(line_flow(MasterFlow::Other), Flow::Out);
        assert_eq!(line_flow(MasterFlow::Transfers), Flow::Transfer);
    }

    fn classifier_fixture() -> (FlowClassifier, Category, Category, Category) {
        let income = MasterCategory::new("Income");
        let transfers = MasterCategory::new("Transfers");
        let misc = MasterCategory::new("Misc");
        let salary = Category::new("Salary", income.id);
        let savings = Category::new("To Savings", transfers.id);
        let odds = Category::new("Odds and ends", misc.id);
        let classifier = FlowClassifier::new(
            &[salary.clone(), savings.clone(), odds.clone()],
            &[income, transfers, misc],
        );
        (classifier, salary, savings, odds)
    }

    fn txn(cents: i64) -> Transaction {
        Transaction::new(
            AccountId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_override_wins() {
        let (classifier, salary, _, _) = classifier_fixture();
        let t = txn(-500)
            .with_category(salary.id)
            .with_flow_override(FlowOverride::Fees);
        assert_eq!(classifier.transaction_flow(&t), Flow::Out);

        let t = txn(500).with_flow_override(FlowOverride::Transfer);
        assert_eq!(classifier.transaction_flow(&t), Flow::Transfer);
    }

    #[test]
    fn test_category_flow_used() {
        let (classifier, salary, savings, _) = classifier_fixture();
        assert_eq!(
            classifier.transaction_flow(&txn(-100).with_category(salary.id)),
            Flow::In
        );
        assert_eq!(
            classifier.transaction_flow(&txn(-100).with_category(savings.id)),
            Flow::Transfer
        );
    }

    #[test]
    fn test_other_master_falls_back_to_sign() {
        let (classifier, _, _, odds) = classifier_fixture();
        assert_eq!(
            classifier.transaction_flow(&txn(-100).with_category(odds.id)),
            Flow::Out
        );
        assert_eq!(
            classifier.transaction_flow(&txn(100).with_category(odds.id)),
            Flow::In
        );
    }

    #[test]
    fn test_unresolved_category_falls_back_to_sign() {
        let (classifier, _, _, _) = classifier_fixture();
        assert_eq!(
            classifier.transaction_flow(&txn(0).with_category(CategoryId::new())),
            Flow::In
        );
        assert_eq!(classifier.transaction_flow(&txn(-1)), Flow::Out);
    }

    #[test]
    fn test_category_with_missing_master_is_unresolved() {
        let orphan = Category::new("Orphan", crate::models::MasterCategoryId::new());
        let classifier = FlowClassifier::new(&[orphan.clone()], &[]);
        assert_eq!(classifier.category_flow(orphan.id), None);
        assert_eq!(classifier.line_flow(orphan.id), None);
    }
}
