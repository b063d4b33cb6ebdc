//! Category Rollup Report
//!
//! Totals an arbitrary set of transactions over the master → category →
//! sub-category hierarchy. The caller chooses the amount each transaction
//! contributes, so the same builder serves signed base-currency totals,
//! absolute spend, or anything else.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{
    Category, CategoryId, MasterCategory, MasterCategoryId, MasterFlow, Money, SubCategory,
    SubCategoryId, Transaction,
};
use crate::services::flow::master_flow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryRollup {
    pub sub_category_id: SubCategoryId,
    pub name: String,
    pub total: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRollup {
    pub category_id: CategoryId,
    pub name: String,
    /// Includes transactions with no (or an unknown) sub-category
    pub total: Money,
    pub transaction_count: usize,
    pub sub_categories: Vec<SubCategoryRollup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterRollup {
    pub master_category_id: MasterCategoryId,
    pub name: String,
    pub flow: MasterFlow,
    pub total: Money,
    pub transaction_count: usize,
    pub categories: Vec<CategoryRollup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryRollupReport {
    pub rollups: Vec<MasterRollup>,
    /// Transactions whose category or master does not resolve
    pub uncategorised_total: Money,
    pub uncategorised_count: usize,
}

impl CategoryRollupReport {
    /// Sum of every master total plus the uncategorised total
    pub fn grand_total(&self) -> Money {
        self.rollups.iter().map(|m| m.total).sum::<Money>() + self.uncategorised_total
    }
}

/// Build the rollup tree for `transactions`, taking each one's contribution
/// from `amount_of`
pub fn build_category_rollups<'t, F>(
    transactions: impl IntoIterator<Item = &'t Transaction>,
    masters: &[MasterCategory],
    categories: &[Category],
    sub_categories: &[SubCategory],
    amount_of: F,
) -> CategoryRollupReport
where
    F: Fn(&Transaction) -> Money,
{
    let master_map: HashMap<MasterCategoryId, &MasterCategory> =
        masters.iter().map(|m| (m.id, m)).collect();
    let category_map: HashMap<CategoryId, &Category> =
        categories.iter().map(|c| (c.id, c)).collect();
    let sub_map: HashMap<SubCategoryId, &SubCategory> =
        sub_categories.iter().map(|s| (s.id, s)).collect();

    let mut masters_out: HashMap<MasterCategoryId, MasterRollup> = HashMap::new();
    let mut report = CategoryRollupReport::default();

    for txn in transactions {
        let amount = amount_of(txn);

        let resolved = txn.category_id.and_then(|id| {
            let category = category_map.get(&id)?;
            let master = master_map.get(&category.master_category_id)?;
            Some((*master, *category))
        });
        let Some((master, category)) = resolved else {
            report.uncategorised_total += amount;
            report.uncategorised_count += 1;
            continue;
        };

        let master_node = masters_out.entry(master.id).or_insert_with(|| MasterRollup {
            master_category_id: master.id,
            name: master.name.clone(),
            flow: master_flow(&master.name),
            total: Money::zero(),
            transaction_count: 0,
            categories: Vec::new(),
        });
        master_node.total += amount;
        master_node.transaction_count += 1;

        let category_node = match master_node
            .categories
            .iter_mut()
            .position(|c| c.category_id == category.id)
        {
            Some(i) => &mut master_node.categories[i],
            None => {
                master_node.categories.push(CategoryRollup {
                    category_id: category.id,
                    name: category.name.clone(),
                    total: Money::zero(),
                    transaction_count: 0,
                    sub_categories: Vec::new(),
                });
                let last = master_node.categories.len() - 1;
                &mut master_node.categories[last]
            }
        };
        category_node.total += amount;
        category_node.transaction_count += 1;

        // A sub-category filed under a different category is not trusted
        let sub_category = txn
            .sub_category_id
            .and_then(|id| sub_map.get(&id))
            .filter(|s| s.category_id == category.id);
        if let Some(sub_category) = sub_category {
            match category_node
                .sub_categories
                .iter_mut()
                .find(|s| s.sub_category_id == sub_category.id)
            {
                Some(node) => {
                    node.total += amount;
                    node.transaction_count += 1;
                }
                None => category_node.sub_categories.push(SubCategoryRollup {
                    sub_category_id: sub_category.id,
                    name: sub_category.name.clone(),
                    total: amount,
                    transaction_count: 1,
                }),
            }
        }
    }

    let mut rollups: Vec<MasterRollup> = masters_out.into_values().collect();
    for master in &mut rollups {
        for category in &mut master.categories {
            category
                .sub_categories
                .sort_by(|a, b| {
                    b.total
                        .cmp(&a.total)
                        .then_with(|| a.name.cmp(&b.name))
                        .then_with(|| a.sub_category_id.cmp(&b.sub_category_id))
                });
        }
        master.categories.sort_by(|a, b| {
            b.total
                .abs()
                .cmp(&a.total.abs())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.category_id.cmp(&b.category_id))
        });
    }
    rollups.sort_by(|a, b| {
        b.total
            .abs()
            .cmp(&a.total.abs())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.master_category_id.cmp(&b.master_category_id))
    });

    report.rollups = rollups;
    report
}

/// Format the rollup for terminal display
pub fn format_terminal(report: &CategoryRollupReport, heading: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", heading));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    for master in &report.rollups {
        output.push_str(&format!(
            "\n{:<40} {:>12} {:>5}\n",
            master.name.to_uppercase(),
            master.total,
            master.transaction_count
        ));
        for category in &master.categories {
            output.push_str(&format!(
                "  {:<38} {:>12} {:>5}\n",
                category.name, category.total, category.transaction_count
            ));
            for sub in &category.sub_categories {
                output.push_str(&format!(
                    "    {:<36} {:>12} {:>5}\n",
                    sub.name, sub.total, sub.transaction_count
                ));
            }
        }
    }

    if report.uncategorised_count > 0 {
        output.push_str(&format!(
            "\n{:<40} {:>12} {:>5}\n",
            "UNCATEGORISED", report.uncategorised_total, report.uncategorised_count
        ));
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!("{:<40} {:>12}\n", "TOTAL", report.grand_total()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use chrono::NaiveDate;

    struct Tree {
        masters: Vec<MasterCategory>,
        categories: Vec<Category>,
        subs: Vec<SubCategory>,
    }

    fn tree() -> Tree {
        let expenses = MasterCategory::new("Essential Expenses");
        let income = MasterCategory::new("Income");
        let food = Category::new("Food", expenses.id);
        let rent = Category::new("Rent", expenses.id);
        let salary = Category::new("Salary", income.id);
        let coffee = SubCategory::new("Coffee", food.id);
        let takeaway = SubCategory::new("Takeaway", food.id);
        Tree {
            masters: vec![expenses, income],
            categories: vec![food, rent, salary],
            subs: vec![coffee, takeaway],
        }
    }

    fn txn(cents: i64) -> Transaction {
        Transaction::new(
            AccountId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_rollup_hierarchy_and_sorting() {
        let t = tree();
        let (food, rent, salary) = (&t.categories[0], &t.categories[1], &t.categories[2]);
        let (coffee, takeaway) = (&t.subs[0], &t.subs[1]);

        let transactions = vec![
            txn(-300).with_category(food.id).with_sub_category(coffee.id),
            txn(-200).with_category(food.id).with_sub_category(coffee.id),
            txn(-1_200).with_category(food.id).with_sub_category(takeaway.id),
            txn(-100).with_category(food.id),
            txn(-95_000).with_category(rent.id),
            txn(250_000).with_category(salary.id),
        ];

        let report = build_category_rollups(&transactions, &t.masters, &t.categories, &t.subs, |t| {
            t.amount
        });

        assert_eq!(report.rollups.len(), 2);
        assert_eq!(report.rollups[0].name, "Income");
        assert_eq!(report.rollups[0].flow, MasterFlow::In);

        let expenses = &report.rollups[1];
        assert_eq!(expenses.total.cents(), -96_800);
        assert_eq!(expenses.transaction_count, 5);
        assert_eq!(expenses.categories[0].name, "Rent");

        let food_node = &expenses.categories[1];
        assert_eq!(food_node.total.cents(), -1_800);
        assert_eq!(food_node.transaction_count, 4);
        // Descending signed total: -500 before -1200
        assert_eq!(food_node.sub_categories[0].name, "Coffee");
        assert_eq!(food_node.sub_categories[0].total.cents(), -500);
        assert_eq!(food_node.sub_categories[0].transaction_count, 2);
        assert_eq!(food_node.sub_categories[1].name, "Takeaway");
    }

    #[test]
    fn test_uncategorised_conserves_totals() {
        let t = tree();
        let orphan = Category::new("Orphan", MasterCategoryId::new());
        let mut categories = t.categories.clone();
        categories.push(orphan.clone());

        let transactions = vec![
            txn(-1_000).with_category(t.categories[0].id),
            txn(-250),
            txn(-75).with_category(CategoryId::new()),
            txn(-30).with_category(orphan.id),
            txn(5_000).with_category(t.categories[2].id),
        ];

        let report =
            build_category_rollups(&transactions, &t.masters, &categories, &t.subs, |t| t.amount);

        assert_eq!(report.uncategorised_total.cents(), -355);
        assert_eq!(report.uncategorised_count, 3);
        let input_total: Money = transactions.iter().map(|t| t.amount).sum();
        assert_eq!(report.grand_total(), input_total);
    }

    #[test]
    fn test_amount_selector_applied() {
        let t = tree();
        let transactions = vec![
            txn(-1_000).with_category(t.categories[0].id),
            txn(400).with_category(t.categories[0].id),
        ];
        let report = build_category_rollups(&transactions, &t.masters, &t.categories, &t.subs, |t| {
            t.amount.abs()
        });
        assert_eq!(report.rollups[0].total.cents(), 1_400);
    }

    #[test]
    fn test_mismatched_sub_category_counts_only_at_category() {
        let t = tree();
        let stray = SubCategory::new("Stray", t.categories[1].id);
        let mut subs = t.subs.clone();
        subs.push(stray.clone());

        let transactions = vec![txn(-500)
            .with_category(t.categories[0].id)
            .with_sub_category(stray.id)];
        let report =
            build_category_rollups(&transactions, &t.masters, &t.categories, &subs, |t| t.amount);

        let food_node = &report.rollups[0].categories[0];
        assert_eq!(food_node.total.cents(), -500);
        assert!(food_node.sub_categories.is_empty());
    }

    #[test]
    fn test_same_name_masters_ordered_by_id() {
        let first = MasterCategory::new("Household");
        let second = MasterCategory::new("Household");
        let a = Category::new("Bills", first.id);
        let b = Category::new("Bills", second.id);
        let transactions = vec![
            txn(-1_000).with_category(b.id),
            txn(-1_000).with_category(a.id),
        ];
        let masters = vec![second.clone(), first.clone()];
        let categories = vec![b, a];

        let mut expected = vec![first.id, second.id];
        expected.sort();

        for _ in 0..5 {
            let report = build_category_rollups(&transactions, &masters, &categories, &[], |t| t.amount);
            let order: Vec<_> = report.rollups.iter().map(|m| m.master_category_id).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn test_empty_input() {
        let t = tree();
        let report = build_category_rollups(
            std::iter::empty(),
            &t.masters,
            &t.categories,
            &t.subs,
            |t| t.amount,
        );
        assert!(report.rollups.is_empty());
        assert_eq!(report.grand_total(), Money::zero());
    }
}
