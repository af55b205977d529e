//! Canonical category labels used by the bank table

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of labels the bank table maps descriptions to.
///
/// Resolvers store labels as text so custom tables may use others; this set
/// is what table checks compare against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Payroll")]
    Payroll,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Credit Card Payment")]
    CreditCardPayment,
    #[serde(rename = "3rd Party Transfer")]
    ThirdPartyTransfer,
    #[serde(rename = "Canceled Transfer")]
    CanceledTransfer,
    #[serde(rename = "Medical Reimbursement")]
    MedicalReimbursement,
    #[serde(rename = "Work Expenses Reimbursement")]
    WorkExpensesReimbursement,
    #[serde(rename = "Deferred Payment")]
    DeferredPayment,
    #[serde(rename = "Monthly Payment")]
    MonthlyPayment,
    #[serde(rename = "Intra account transfers")]
    IntraAccountTransfers,
    #[serde(rename = "Compensation Credit")]
    CompensationCredit,
    #[serde(rename = "Cash Withdrawal")]
    CashWithdrawal,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Payroll,
        Category::Investment,
        Category::CreditCardPayment,
        Category::ThirdPartyTransfer,
        Category::CanceledTransfer,
        Category::MedicalReimbursement,
        Category::WorkExpensesReimbursement,
        Category::DeferredPayment,
        Category::MonthlyPayment,
        Category::IntraAccountTransfers,
        Category::CompensationCredit,
        Category::CashWithdrawal,
    ];

    /// Label as it appears in tables and results
    pub fn label(&self) -> &'static str {
        match self {
            Category::Payroll => "Payroll",
            Category::Investment => "Investment",
            Category::CreditCardPayment => "Credit Card Payment",
            Category::ThirdPartyTransfer => "3rd Party Transfer",
            Category::CanceledTransfer => "Canceled Transfer",
            Category::MedicalReimbursement => "Medical Reimbursement",
            Category::WorkExpensesReimbursement => "Work Expenses Reimbursement",
            Category::DeferredPayment => "Deferred Payment",
            Category::MonthlyPayment => "Monthly Payment",
            Category::IntraAccountTransfers => "Intra account transfers",
            Category::CompensationCredit => "Compensation Credit",
            Category::CashWithdrawal => "Cash Withdrawal",
        }
    }

    /// Exact-match lookup; labels are compared literally.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
        }
    }

    #[test]
    fn test_from_label_is_literal() {
        assert_eq!(Category::from_label("payroll"), None);
        assert_eq!(Category::from_label("Intra Account Transfers"), None);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Category::ThirdPartyTransfer).unwrap();
        assert_eq!(json, "\"3rd Party Transfer\"");
    }
}
