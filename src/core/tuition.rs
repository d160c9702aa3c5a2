use crate::models::{PaymentRecord, StudentProfile, TuitionStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub paid: u64,
    pub outstanding: u64,
}

/// Paid vs. not-yet-paid amounts of a payment history.
pub fn ledger_totals(payments: &[PaymentRecord]) -> LedgerTotals {
    payments.iter().fold(LedgerTotals::default(), |mut acc, p| {
        if p.status.is_settled() {
            acc.paid = acc.paid.saturating_add(p.amount);
        } else {
            acc.outstanding = acc.outstanding.saturating_add(p.amount);
        }
        acc
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutstandingTuition {
    pub id: String,
    pub name: String,
    pub nim: String,
    pub status: TuitionStatus,
    pub due: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TuitionSummary {
    pub paid: usize,
    pub unpaid: usize,
    pub pending: usize,
    /// Unpaid before pending, roster order otherwise.
    pub outstanding: Vec<OutstandingTuition>,
}

pub fn tuition_summary(students: &[StudentProfile]) -> TuitionSummary {
    let count = |status: TuitionStatus| students.iter().filter(|s| s.tuition_status == status).count();

    let mut outstanding: Vec<OutstandingTuition> = students
        .iter()
        .filter(|s| s.tuition_status != TuitionStatus::Paid)
        .map(|s| OutstandingTuition {
            id: s.id.clone(),
            name: s.name.clone(),
            nim: s.nim.clone(),
            status: s.tuition_status,
            due: s.tuition_date.clone(),
            amount: ledger_totals(&s.payments).outstanding,
        })
        .collect();
    outstanding.sort_by_key(|o| o.status != TuitionStatus::Unpaid);

    TuitionSummary {
        paid: count(TuitionStatus::Paid),
        unpaid: count(TuitionStatus::Unpaid),
        pending: count(TuitionStatus::Pending),
        outstanding,
    }
}
