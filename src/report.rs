use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{Table, row};

use crate::claims::claim_stats;
use crate::inventory::{StockLevel, expiring_soon, inventory_summary, stock_level};
use crate::schema::{
    ClaimStatus, InsuranceClaim, InventoryItem, Invoice, InvoiceStatus, InvoiceTemplate,
};

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn claim_status_badge(status: ClaimStatus) -> String {
    match status {
        ClaimStatus::Approved => status.as_str().green().to_string(),
        ClaimStatus::Pending => status.as_str().yellow().to_string(),
        ClaimStatus::Denied => status.as_str().red().to_string(),
        ClaimStatus::Processing => status.as_str().cyan().to_string(),
    }
}

fn invoice_status_badge(status: InvoiceStatus) -> String {
    match status {
        InvoiceStatus::Paid => status.as_str().green().to_string(),
        InvoiceStatus::Partial => status.as_str().yellow().to_string(),
        InvoiceStatus::Overdue => status.as_str().red().to_string(),
        InvoiceStatus::Sent => status.as_str().cyan().to_string(),
    }
}

/// Claims screen: stat cards, then the tracked list
pub fn print_claims_screen(claims: &[InsuranceClaim]) {
    let stats = claim_stats(claims);
    println!("\n--- Claims ---");
    println!(
        "total: {}  approved: {}  pending: {}  denied: {}  processing: {}",
        stats.total,
        stats.approved.to_string().green(),
        stats.pending.to_string().yellow(),
        stats.denied.to_string().red(),
        stats.processing.to_string().cyan(),
    );
    println!(
        "claimed: {}  approved: {}  approval rate: {:.1}%  avg processing: {:.1}d",
        money(stats.total_claimed),
        money(stats.total_approved),
        stats.approval_rate,
        stats.avg_processing_days,
    );

    let mut table = Table::new();
    table.add_row(row![
        "Claim", "Patient", "Payer", "Amount", "Approved", "Status", "Submitted"
    ]);
    for claim in claims {
        table.add_row(row![
            claim.claim_id,
            claim.patient_name,
            claim.payer,
            money(claim.claim_amount),
            money(claim.approved_amount),
            claim_status_badge(claim.status),
            claim.submitted_date,
        ]);
    }
    table.printstd();
}

/// Invoice detail: header, line items, payment history
pub fn print_invoice_detail(invoice: &Invoice) {
    println!(
        "\n--- Invoice {} [{}] ---",
        invoice.invoice_id,
        invoice_status_badge(invoice.status)
    );
    println!(
        "{} at {}  issued {}  due {}",
        invoice.patient_name, invoice.facility_name, invoice.issue_date, invoice.due_date
    );

    let mut items = Table::new();
    items.add_row(row!["Code", "Description", "Qty", "Unit", "Total"]);
    for line in &invoice.line_items {
        items.add_row(row![
            line.procedure_code,
            line.description,
            line.quantity,
            money(line.unit_price),
            money(line.total),
        ]);
    }
    items.printstd();

    println!(
        "subtotal: {}  discount: {}  tax ({}%): {}  total: {}",
        money(invoice.subtotal),
        money(invoice.discount),
        invoice.tax_rate,
        money(invoice.tax),
        money(invoice.total),
    );
    println!(
        "paid: {}  balance due: {}",
        money(invoice.amount_paid),
        money(invoice.balance_due).bold(),
    );

    if invoice.payments.is_empty() {
        println!("no payments recorded");
    } else {
        let mut payments = Table::new();
        payments.add_row(row!["Date", "Amount", "Method", "Reference", "Status"]);
        for payment in &invoice.payments {
            payments.add_row(row![
                payment.date,
                money(payment.amount),
                payment.method.as_str(),
                payment.reference.as_deref().unwrap_or("-"),
                format!("{:?}", payment.status).to_lowercase(),
            ]);
        }
        payments.printstd();
    }
}

/// Static view for an invoice id missing from the store
pub fn print_invoice_not_found(invoice_id: &str) {
    println!("\n--- Invoice {} ---", invoice_id);
    println!("{}", "Invoice not found.".red());
    println!("Back to: practiceadmin invoices");
}

/// Inventory table with classification badges and the summary widget
pub fn print_inventory_table(items: &[&InventoryItem], today: NaiveDate) {
    let owned: Vec<InventoryItem> = items.iter().map(|i| (*i).clone()).collect();
    let summary = inventory_summary(&owned, today);
    println!("\n--- Inventory ---");
    println!(
        "items: {}  stock value: {}  low stock: {}  expiring soon: {}",
        summary.item_count,
        money(summary.total_value),
        summary.low_stock.to_string().red(),
        summary.expiring_soon.to_string().yellow(),
    );

    let mut table = Table::new();
    table.add_row(row![
        "Item", "Category", "Stock", "Min/Max", "Level", "Expiry", "Supplier"
    ]);
    for item in items {
        let level = match stock_level(item) {
            StockLevel::Low => "LOW".red().to_string(),
            StockLevel::High => "HIGH".yellow().to_string(),
            StockLevel::Normal => "ok".normal().to_string(),
        };
        let expiry = if expiring_soon(item, today) {
            item.expiry_date.to_string().red().to_string()
        } else {
            item.expiry_date.to_string()
        };
        table.add_row(row![
            item.name,
            item.category,
            format!("{} {}", item.current_stock, item.unit),
            format!("{}/{}", item.min_stock, item.max_stock),
            level,
            expiry,
            item.supplier,
        ]);
    }
    table.printstd();
}

/// Template listing
pub fn print_templates(templates: &[InvoiceTemplate]) {
    println!("\n--- Invoice templates ---");
    let mut table = Table::new();
    table.add_row(row!["Template", "Name", "Layout", "Fields", "Default", "Updated"]);
    for template in templates {
        table.add_row(row![
            template.template_id,
            template.name,
            template.layout.as_str(),
            template.fields.len(),
            if template.is_default { "yes".green().to_string() } else { String::new() },
            template.updated_date,
        ]);
    }
    table.printstd();
}

/// Days-past-due buckets for an unpaid invoice
pub fn aging_bucket(invoice: &Invoice, today: NaiveDate) -> usize {
    let past_due = (today - invoice.due_date).num_days();
    match past_due {
        i64::MIN..=30 => 0,
        31..=60 => 1,
        61..=90 => 2,
        _ => 3,
    }
}

/// AR aging summary over invoices still carrying a balance
pub fn print_aging_summary(invoices: &[Invoice], today: NaiveDate) {
    let mut buckets = [0.0f64; 4];
    for invoice in invoices.iter().filter(|i| i.balance_due > 0.0) {
        buckets[aging_bucket(invoice, today)] += invoice.balance_due;
    }
    println!("\n--- AR aging ---");
    println!(
        "0-30d: {}  31-60d: {}  61-90d: {}  90+d: {}",
        money(buckets[0]),
        money(buckets[1]),
        money(buckets[2]).yellow(),
        money(buckets[3]).red(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::mock_invoice;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_money_format() {
        assert_eq!(money(434.0), "$434.00");
        assert_eq!(money(0.5), "$0.50");
    }

    #[test]
    fn test_aging_buckets() {
        let mut invoice = mock_invoice();

        invoice.due_date = today() + Duration::days(10); // not yet due
        assert_eq!(aging_bucket(&invoice, today()), 0);

        invoice.due_date = today() - Duration::days(30);
        assert_eq!(aging_bucket(&invoice, today()), 0);

        invoice.due_date = today() - Duration::days(31);
        assert_eq!(aging_bucket(&invoice, today()), 1);

        invoice.due_date = today() - Duration::days(75);
        assert_eq!(aging_bucket(&invoice, today()), 2);

        invoice.due_date = today() - Duration::days(120);
        assert_eq!(aging_bucket(&invoice, today()), 3);
    }
}
