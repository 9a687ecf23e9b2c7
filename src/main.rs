use anyhow::Result;
use chrono::Utc;

use practiceadmin::billing::{PaymentForm, record_payment};
use practiceadmin::config::{self, Screen};
use practiceadmin::inventory::{InventorySort, filter_inventory, sort_inventory};
use practiceadmin::logging::log_event;
use practiceadmin::reader::load_jsonl;
use practiceadmin::report;
use practiceadmin::schema::{InsuranceClaim, Invoice, PaymentMethod};
use practiceadmin::seed::{seed_dataset, write_fake_invoices_jsonl};
use practiceadmin::store::{MemoryStore, Store};
use practiceadmin::templates::TemplateManager;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::config();
    let today = Utc::now().date_naive();

    let mut dataset = seed_dataset(config.seed_count, today);
    if let Some(path) = &config.claims {
        dataset.claims = load_jsonl::<InsuranceClaim>(path).await?;
        if config.verbose {
            log_event("loader", "-", "claims_loaded", path);
        }
    }
    if let Some(path) = &config.invoices {
        dataset.invoices = load_jsonl::<Invoice>(path).await?;
        if config.verbose {
            log_event("loader", "-", "invoices_loaded", path);
        }
    }
    if let Some(path) = &config.export {
        write_fake_invoices_jsonl(path, config.seed_count, today)?;
        if config.verbose {
            log_event("seed", "-", "invoices_exported", path);
        }
    }

    let invoice_store = MemoryStore::with_records(
        dataset
            .invoices
            .into_iter()
            .map(|i| (i.invoice_id.clone(), i)),
    );
    let claim_store = MemoryStore::with_records(
        dataset
            .claims
            .into_iter()
            .map(|c| (c.claim_id.clone(), c)),
    );

    match config.screen {
        Screen::Dashboard => {
            let claims = claim_store.list().await?;
            report::print_claims_screen(&claims);
            let invoices = invoice_store.list().await?;
            report::print_aging_summary(&invoices, today);
            let mut view = filter_inventory(&dataset.inventory, "", None);
            sort_inventory(&mut view, InventorySort::Expiry);
            report::print_inventory_table(&view, today);
        }
        Screen::Claims => {
            let claims = claim_store.list().await?;
            report::print_claims_screen(&claims);
        }
        Screen::Invoices => {
            if let Some(invoice_id) = &config.invoice_id {
                match invoice_store.fetch(invoice_id).await? {
                    Some(invoice) => report::print_invoice_detail(&invoice),
                    None => report::print_invoice_not_found(invoice_id),
                }
            } else {
                let mut invoices = invoice_store.list().await?;
                invoices.sort_by(|a, b| a.invoice_id.cmp(&b.invoice_id));
                report::print_aging_summary(&invoices, today);

                // demo flow: record a card payment against the first open
                // invoice and show the updated detail
                if let Some(open) = invoices.iter_mut().find(|i| i.balance_due > 0.0) {
                    let amount = (open.balance_due / 2.0 * 100.0).round() / 100.0;
                    let form = PaymentForm {
                        amount,
                        method: Some(PaymentMethod::Card),
                        reference: Some("DEMO".to_string()),
                        notes: None,
                    };
                    if record_payment(open, form, today).is_ok() {
                        if config.verbose {
                            log_event(
                                "invoices",
                                &open.invoice_id,
                                "payment_recorded",
                                &format!("Recorded demo payment of ${:.2}", amount),
                            );
                        }
                        invoice_store
                            .save(&open.invoice_id.clone(), open.clone())
                            .await?;
                    }
                }
                for invoice in &invoices {
                    report::print_invoice_detail(invoice);
                }
            }
        }
        Screen::Inventory => {
            let mut view = filter_inventory(&dataset.inventory, "", None);
            sort_inventory(&mut view, InventorySort::Name);
            report::print_inventory_table(&view, today);
        }
        Screen::Templates => {
            let manager = TemplateManager::new(dataset.templates);
            report::print_templates(manager.templates());
        }
        Screen::Profile => {
            let profile = dataset.profile;
            println!("\n--- Profile ---");
            println!("{} <{}> {}", profile.name, profile.email, profile.role);
            println!("{}  {}", profile.clinic_name, profile.phone);
            println!(
                "notifications: email={} sms={} low_stock={} claim_updates={}",
                profile.notifications.email,
                profile.notifications.sms,
                profile.notifications.low_stock,
                profile.notifications.claim_updates,
            );
        }
    }

    Ok(())
}
