use chrono::NaiveDate;

use crate::schema::{Invoice, InvoiceStatus, LineItem, Payment, PaymentMethod, PaymentStatus};
use crate::validation::ValidationErrors;

/// Sub-cent slack for balance comparisons on f64 money
const BALANCE_EPSILON: f64 = 1e-9;

/// Derived monetary breakdown for an invoice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub taxable: f64,
    pub tax: f64,
    pub total: f64,
}

pub fn subtotal(line_items: &[LineItem]) -> f64 {
    line_items.iter().map(|line| line.total).sum()
}

/// Compute the invoice totals from its inputs
///
/// tax applies to the post-discount base. The arithmetic is deliberately
/// unclamped: a discount larger than the subtotal yields a negative taxable
/// base, and form validation keeps such a discount from being stored.
pub fn compute_totals(line_items: &[LineItem], discount: f64, tax_rate: f64) -> Totals {
    let subtotal = subtotal(line_items);
    let taxable = subtotal - discount;
    let tax = taxable * (tax_rate / 100.0);
    Totals {
        subtotal,
        taxable,
        tax,
        total: taxable + tax,
    }
}

/// Re-establish the derived fields after any change to line items,
/// discount, or tax rate. Idempotent for unchanged inputs.
pub fn recompute_totals(invoice: &mut Invoice) {
    let totals = compute_totals(&invoice.line_items, invoice.discount, invoice.tax_rate);
    invoice.subtotal = totals.subtotal;
    invoice.tax = totals.tax;
    invoice.total = totals.total;
    invoice.balance_due = invoice.total - invoice.amount_paid;
}

/// Replace the discount, rejecting one that exceeds the current subtotal
pub fn set_discount(invoice: &mut Invoice, discount: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if discount < 0.0 {
        errors.add("discount", "Discount cannot be negative");
    } else if discount > subtotal(&invoice.line_items) {
        errors.add("discount", "Discount cannot exceed the subtotal");
    }
    errors.into_result()?;
    invoice.discount = discount;
    recompute_totals(invoice);
    Ok(())
}

/// Replace the tax rate percentage
pub fn set_tax_rate(invoice: &mut Invoice, tax_rate: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if tax_rate < 0.0 {
        errors.add("tax_rate", "Tax rate cannot be negative");
    }
    errors.into_result()?;
    invoice.tax_rate = tax_rate;
    recompute_totals(invoice);
    Ok(())
}

/// Append a line item and recompute
pub fn add_line_item(invoice: &mut Invoice, line: LineItem) {
    invoice.line_items.push(line);
    recompute_totals(invoice);
}

/// Payment modal input before validation
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub amount: f64,
    pub method: Option<PaymentMethod>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Record a payment against an invoice
///
/// Validation: amount must be positive and no greater than the balance due,
/// and a method must be selected. On rejection the invoice is untouched and
/// the caller gets field-keyed messages for inline rendering.
///
/// On acceptance the payment is appended with Completed status and today's
/// date, amounts are updated, and the status is derived from the new
/// balance. Status only moves forward (Sent/Overdue -> Partial -> Paid);
/// there is no payment reversal, so it is never downgraded here.
pub fn record_payment(
    invoice: &mut Invoice,
    form: PaymentForm,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if form.amount <= 0.0 {
        errors.add("amount", "Amount must be greater than zero");
    } else if form.amount > invoice.balance_due {
        errors.add("amount", "Amount cannot exceed the balance due");
    }
    if form.method.is_none() {
        errors.add("method", "Select a payment method");
    }
    errors.into_result()?;

    let method = form.method.unwrap_or(PaymentMethod::Cash); // validated Some above
    invoice.payments.push(Payment {
        amount: form.amount,
        method,
        reference: form.reference,
        status: PaymentStatus::Completed,
        date: today,
        notes: form.notes,
    });
    invoice.amount_paid += form.amount;
    invoice.balance_due -= form.amount;

    if invoice.balance_due <= BALANCE_EPSILON {
        invoice.status = InvoiceStatus::Paid;
    } else if invoice.amount_paid > 0.0 {
        invoice.status = InvoiceStatus::Partial;
    }
    Ok(())
}
