use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

/// One tuition invoice and its settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub academic_year: String,
    /// "Ganjil" | "Genap"
    pub semester: String,
    pub invoice_date: String,
    pub due_date: String,
    #[serde(default)]
    pub payment_date: Option<String>,
    /// Rupiah, no minor units.
    pub amount: u64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub ref_number: Option<String>,
    #[serde(default)]
    pub invoice_url: Option<String>,
}
