use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Status of a submitted insurance claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Approved,
    Pending,
    Denied,
    Processing,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Approved => "approved",
            ClaimStatus::Pending => "pending",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Processing => "processing",
        }
    }
}

/// A reimbursement request tracked through approval states
///
/// Invariants: `approved_amount` is 0 unless status is Approved;
/// `denial_reason` is Some only when status is Denied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub claim_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub payer: String,
    pub claim_amount: f64,
    pub approved_amount: f64,
    pub status: ClaimStatus,
    pub processing_days: u32,
    pub denial_reason: Option<String>,
    pub submitted_date: NaiveDate,
}

/// Payment state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Partial,
    Overdue,
    Sent,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Sent => "sent",
        }
    }
}

/// One billable service entry on an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: String,
    pub description: String,
    pub procedure_code: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Check,
    Cash,
    Transfer,
    Insurance,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Check => "check",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Insurance => "insurance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

/// A recorded payment against an invoice, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// The root struct for an invoice
///
/// Invariants: `total = subtotal - discount + tax` and
/// `balance_due = total - amount_paid`. Re-established by
/// `billing::recompute_totals` on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub facility_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub status: InvoiceStatus,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateLayout {
    Standard,
    Compact,
    Detailed,
}

impl TemplateLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateLayout::Standard => "standard",
            TemplateLayout::Compact => "compact",
            TemplateLayout::Detailed => "detailed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    Checkbox,
}

/// One configurable field on an invoice template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateField {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub visible: bool,
}

/// A reusable invoice layout/branding/field-schema definition
///
/// Invariant: `fields` is never empty for a saved template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTemplate {
    pub template_id: String,
    pub name: String,
    pub layout: TemplateLayout,
    pub primary_color: String,
    pub accent_color: String,
    pub font: String,
    pub fields: Vec<TemplateField>,
    pub is_default: bool,
    pub updated_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub unit_cost: f64,
    pub supplier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub email: bool,
    pub sms: bool,
    pub low_stock: bool,
    pub claim_updates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: String,
    pub clinic_name: String,
    pub notifications: NotificationPrefs,
}

/// Generate a short prefixed record id, e.g. "inv-483920"
pub fn short_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    format!("{}-{:06}", prefix, rng.random_range(0..1_000_000u32))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date literal")
}

/// Mock claim for tests and demos
pub fn mock_claim() -> InsuranceClaim {
    InsuranceClaim {
        claim_id: "clm-000101".to_string(),
        patient_id: "pat-000001".to_string(),
        patient_name: "Jane Doe".to_string(),
        payer: "medicare".to_string(),
        claim_amount: 850.0,
        approved_amount: 0.0,
        status: ClaimStatus::Pending,
        processing_days: 4,
        denial_reason: None,
        submitted_date: date(2025, 5, 12),
    }
}

/// Mock invoice with consistent totals for tests and demos
///
/// Line items 200 + 150 + 100, discount 50, tax rate 8.5:
/// subtotal 450, tax 34.00, total 434.00, nothing paid yet.
pub fn mock_invoice() -> Invoice {
    Invoice {
        invoice_id: "inv-000201".to_string(),
        patient_id: "pat-000001".to_string(),
        patient_name: "Jane Doe".to_string(),
        facility_name: "Lakeside Family Practice".to_string(),
        issue_date: date(2025, 5, 1),
        due_date: date(2025, 5, 31),
        line_items: vec![
            LineItem {
                line_item_id: "li-1".to_string(),
                description: "Office visit".to_string(),
                procedure_code: "99213".to_string(),
                quantity: 1,
                unit_price: 200.0,
                total: 200.0,
            },
            LineItem {
                line_item_id: "li-2".to_string(),
                description: "Lab panel".to_string(),
                procedure_code: "80053".to_string(),
                quantity: 1,
                unit_price: 150.0,
                total: 150.0,
            },
            LineItem {
                line_item_id: "li-3".to_string(),
                description: "Immunization".to_string(),
                procedure_code: "90471".to_string(),
                quantity: 2,
                unit_price: 50.0,
                total: 100.0,
            },
        ],
        discount: 50.0,
        tax_rate: 8.5,
        subtotal: 450.0,
        tax: 34.0,
        total: 434.0,
        amount_paid: 0.0,
        balance_due: 434.0,
        status: InvoiceStatus::Sent,
        payments: vec![],
    }
}

/// Mock template for tests and demos
pub fn mock_template() -> InvoiceTemplate {
    InvoiceTemplate {
        template_id: "tpl-000301".to_string(),
        name: "Standard Clinic".to_string(),
        layout: TemplateLayout::Standard,
        primary_color: "#1a6fb0".to_string(),
        accent_color: "#e8f1f8".to_string(),
        font: "Inter".to_string(),
        fields: vec![
            TemplateField {
                key: "patient_name".to_string(),
                label: "Patient".to_string(),
                field_type: FieldType::Text,
                required: true,
                visible: true,
            },
            TemplateField {
                key: "visit_date".to_string(),
                label: "Visit date".to_string(),
                field_type: FieldType::Date,
                required: false,
                visible: true,
            },
        ],
        is_default: true,
        updated_date: date(2025, 4, 20),
    }
}

/// Mock inventory item for tests and demos
pub fn mock_inventory_item() -> InventoryItem {
    InventoryItem {
        item_id: "itm-000401".to_string(),
        name: "Nitrile gloves (M)".to_string(),
        category: "Supplies".to_string(),
        current_stock: 40,
        min_stock: 25,
        max_stock: 200,
        unit: "box".to_string(),
        expiry_date: date(2026, 11, 30),
        unit_cost: 7.5,
        supplier: "MedSource".to_string(),
    }
}

/// Mock user profile for tests and demos
pub fn mock_profile() -> UserProfile {
    UserProfile {
        user_id: "usr-000501".to_string(),
        name: "Alice Smith".to_string(),
        email: "alice.smith@example.com".to_string(),
        role: "Practice Manager".to_string(),
        phone: "555-0134".to_string(),
        clinic_name: "Lakeside Family Practice".to_string(),
        notifications: NotificationPrefs {
            email: true,
            sms: false,
            low_stock: true,
            claim_updates: true,
        },
    }
}
