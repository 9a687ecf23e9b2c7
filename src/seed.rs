use std::fs::File;
use std::io::{BufWriter, Write};

use chrono::{Duration, NaiveDate};
use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::*;
use fake::{Fake, Faker};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::billing::compute_totals;
use crate::schema::*;

const PAYERS: [&str; 4] = ["medicare", "united_health_group", "anthem", "cigna"];
const PROCEDURES: [(&str, &str); 5] = [
    ("99213", "Office visit"),
    ("80053", "Metabolic panel"),
    ("90471", "Immunization"),
    ("97602", "Wound care"),
    ("71046", "Chest X-ray"),
];
const CATEGORIES: [&str; 4] = ["Supplies", "Medication", "Equipment", "Lab"];
const DENIAL_REASONS: [&str; 3] = [
    "Service not covered under plan",
    "Out of network",
    "Missing prior authorization",
];

fn fake_date_around(base: NaiveDate, spread_days: i64) -> NaiveDate {
    let mut rng = rand::rng();
    base + Duration::days(rng.random_range(-spread_days..=spread_days))
}

/// Generate a realistic fake insurance claim
///
/// Status-dependent fields follow the record invariants: only approved
/// claims carry an approved amount, only denied ones a reason.
pub fn fake_claim(today: NaiveDate) -> InsuranceClaim {
    let mut rng = rand::rng();
    let status = *[
        ClaimStatus::Approved,
        ClaimStatus::Pending,
        ClaimStatus::Denied,
        ClaimStatus::Processing,
    ]
    .choose(&mut rng)
    .unwrap_or(&ClaimStatus::Pending);
    let claim_amount: f64 = (120.0..2400.0).fake();
    let approved_amount = if status == ClaimStatus::Approved {
        claim_amount * rng.random_range(0.6..=1.0)
    } else {
        0.0
    };
    let denial_reason = if status == ClaimStatus::Denied {
        DENIAL_REASONS.choose(&mut rng).map(|r| r.to_string())
    } else {
        None
    };
    InsuranceClaim {
        claim_id: short_id("clm"),
        patient_id: short_id("pat"),
        patient_name: format!("{} {}", FirstName().fake::<String>(), LastName().fake::<String>()),
        payer: PAYERS.choose(&mut rng).unwrap_or(&"medicare").to_string(),
        claim_amount,
        approved_amount,
        status,
        processing_days: (1..30).fake(),
        denial_reason,
        submitted_date: fake_date_around(today, 45),
    }
}

pub fn fake_line_item() -> LineItem {
    let mut rng = rand::rng();
    let (code, description) = PROCEDURES
        .choose(&mut rng)
        .copied()
        .unwrap_or(("99213", "Office visit"));
    let quantity: u32 = (1..4).fake();
    let unit_price: f64 = (40.0..400.0).fake();
    LineItem {
        line_item_id: short_id("li"),
        description: description.to_string(),
        procedure_code: code.to_string(),
        quantity,
        unit_price,
        total: unit_price * f64::from(quantity),
    }
}

/// Generate a fake invoice whose derived fields satisfy the totals and
/// balance invariants
pub fn fake_invoice(today: NaiveDate) -> Invoice {
    let mut rng = rand::rng();
    let line_items: Vec<LineItem> = (0..rng.random_range(1..=4)).map(|_| fake_line_item()).collect();
    let subtotal: f64 = line_items.iter().map(|l| l.total).sum();
    let discount = if rng.random_bool(0.3) {
        (subtotal * 0.1).round()
    } else {
        0.0
    };
    let tax_rate: f64 = (0.0..9.5).fake();
    let totals = compute_totals(&line_items, discount, tax_rate);

    // seed some invoices paid in full, some partially, the rest untouched
    let amount_paid = match rng.random_range(0..3) {
        0 => totals.total,
        1 => (totals.total * rng.random_range(0.2..0.8) * 100.0).round() / 100.0,
        _ => 0.0,
    };
    let issue_date = fake_date_around(today, 40);
    let due_date = issue_date + Duration::days(30);
    let status = if amount_paid >= totals.total {
        InvoiceStatus::Paid
    } else if amount_paid > 0.0 {
        InvoiceStatus::Partial
    } else if due_date < today {
        InvoiceStatus::Overdue
    } else {
        InvoiceStatus::Sent
    };
    let payments = if amount_paid > 0.0 {
        vec![Payment {
            amount: amount_paid,
            method: *[
                PaymentMethod::Card,
                PaymentMethod::Check,
                PaymentMethod::Cash,
                PaymentMethod::Transfer,
                PaymentMethod::Insurance,
            ]
            .choose(&mut rng)
            .unwrap_or(&PaymentMethod::Card),
            reference: Some(format!("AUTH-{:04}", rng.random_range(0..10_000u16))),
            status: PaymentStatus::Completed,
            date: issue_date + Duration::days(rng.random_range(1..20)),
            notes: None,
        }]
    } else {
        vec![]
    };

    Invoice {
        invoice_id: short_id("inv"),
        patient_id: short_id("pat"),
        patient_name: format!("{} {}", FirstName().fake::<String>(), LastName().fake::<String>()),
        facility_name: CompanyName().fake(),
        issue_date,
        due_date,
        line_items,
        discount,
        tax_rate,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        amount_paid,
        balance_due: totals.total - amount_paid,
        status,
        payments,
    }
}

pub fn fake_inventory_item(today: NaiveDate) -> InventoryItem {
    let mut rng = rand::rng();
    let min_stock: u32 = (5..40).fake();
    let max_stock = min_stock + rng.random_range(40..300u32);
    InventoryItem {
        item_id: short_id("itm"),
        name: format!("{} {}", Word().fake::<String>(), Word().fake::<String>()),
        category: CATEGORIES.choose(&mut rng).unwrap_or(&"Supplies").to_string(),
        current_stock: rng.random_range(0..=max_stock + 20),
        min_stock,
        max_stock,
        unit: ["box", "pack", "bottle", "unit"]
            .choose(&mut rng)
            .unwrap_or(&"unit")
            .to_string(),
        expiry_date: today + Duration::days(rng.random_range(-30..720)),
        unit_cost: (1.0..80.0).fake(),
        supplier: CompanyName().fake(),
    }
}

pub fn fake_template(today: NaiveDate) -> InvoiceTemplate {
    let mut rng = rand::rng();
    InvoiceTemplate {
        template_id: short_id("tpl"),
        name: format!("{} Layout", Word().fake::<String>()),
        layout: *[
            TemplateLayout::Standard,
            TemplateLayout::Compact,
            TemplateLayout::Detailed,
        ]
        .choose(&mut rng)
        .unwrap_or(&TemplateLayout::Standard),
        primary_color: format!("#{:06x}", rng.random_range(0..0xffffffu32)),
        accent_color: format!("#{:06x}", rng.random_range(0..0xffffffu32)),
        font: ["Inter", "Helvetica", "Georgia"]
            .choose(&mut rng)
            .unwrap_or(&"Inter")
            .to_string(),
        fields: vec![
            TemplateField {
                key: "patient_name".to_string(),
                label: "Patient".to_string(),
                field_type: FieldType::Text,
                required: true,
                visible: true,
            },
            TemplateField {
                key: "total".to_string(),
                label: "Total".to_string(),
                field_type: FieldType::Number,
                required: true,
                visible: true,
            },
        ],
        is_default: false,
        updated_date: fake_date_around(today, 60),
    }
}

pub fn fake_profile() -> UserProfile {
    UserProfile {
        user_id: short_id("usr"),
        name: format!("{} {}", FirstName().fake::<String>(), LastName().fake::<String>()),
        email: FreeEmail().fake(),
        role: "Practice Manager".to_string(),
        phone: format!("555-{:04}", Faker.fake::<u16>() % 10_000),
        clinic_name: CompanyName().fake(),
        notifications: NotificationPrefs {
            email: true,
            sms: false,
            low_stock: true,
            claim_updates: true,
        },
    }
}

/// The full mock dataset standing in for a future backend
pub struct Dataset {
    pub claims: Vec<InsuranceClaim>,
    pub invoices: Vec<Invoice>,
    pub templates: Vec<InvoiceTemplate>,
    pub inventory: Vec<InventoryItem>,
    pub profile: UserProfile,
}

/// Seed a dataset of n records per collection
pub fn seed_dataset(n: usize, today: NaiveDate) -> Dataset {
    let mut templates: Vec<InvoiceTemplate> =
        (0..n.clamp(1, 6)).map(|_| fake_template(today)).collect();
    templates[0].is_default = true;
    Dataset {
        claims: (0..n).map(|_| fake_claim(today)).collect(),
        invoices: (0..n).map(|_| fake_invoice(today)).collect(),
        templates,
        inventory: (0..n).map(|_| fake_inventory_item(today)).collect(),
        profile: fake_profile(),
    }
}

/// Write n fake invoices to a JSONL file
///
/// Used to generate a dataset the binary can load back with `--invoices`
pub fn write_fake_invoices_jsonl(path: &str, n: usize, today: NaiveDate) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for _ in 0..n {
        let invoice = fake_invoice(today);
        let json = serde_json::to_string(&invoice)?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

/// Write n fake claims to a JSONL file
pub fn write_fake_claims_jsonl(path: &str, n: usize, today: NaiveDate) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for _ in 0..n {
        let claim = fake_claim(today);
        let json = serde_json::to_string(&claim)?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Generated claims must satisfy the record invariants
    #[test]
    fn test_fake_claims_hold_invariants() {
        for _ in 0..50 {
            let claim = fake_claim(today());
            if claim.status != ClaimStatus::Approved {
                assert_eq!(claim.approved_amount, 0.0);
            }
            assert_eq!(
                claim.denial_reason.is_some(),
                claim.status == ClaimStatus::Denied
            );
            assert!(claim.claim_amount > 0.0);
        }
    }

    /// Generated invoices must satisfy the totals and balance invariants
    #[test]
    fn test_fake_invoices_hold_invariants() {
        for _ in 0..50 {
            let invoice = fake_invoice(today());
            let expected = compute_totals(&invoice.line_items, invoice.discount, invoice.tax_rate);
            assert!((invoice.total - expected.total).abs() < 1e-9);
            assert!((invoice.balance_due - (invoice.total - invoice.amount_paid)).abs() < 1e-9);
            if invoice.status == InvoiceStatus::Paid {
                assert!(invoice.balance_due <= 1e-9);
            }
            if invoice.status == InvoiceStatus::Partial {
                assert!(invoice.amount_paid > 0.0 && invoice.balance_due > 0.0);
            }
        }
    }

    #[test]
    fn test_seed_dataset_shape() {
        let dataset = seed_dataset(8, today());
        assert_eq!(dataset.claims.len(), 8);
        assert_eq!(dataset.invoices.len(), 8);
        assert_eq!(dataset.inventory.len(), 8);
        assert!(!dataset.templates.is_empty());
        assert_eq!(
            dataset.templates.iter().filter(|t| t.is_default).count(),
            1
        );
        assert!(dataset.templates.iter().all(|t| !t.fields.is_empty()));
    }
}
