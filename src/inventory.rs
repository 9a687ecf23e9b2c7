use chrono::NaiveDate;

use crate::schema::InventoryItem;

/// Days-to-expiry window that flags an item as expiring soon
const EXPIRY_WINDOW_DAYS: i64 = 90;

/// Stock classification for one inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Normal,
    High,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Low => "low",
            StockLevel::Normal => "normal",
            StockLevel::High => "high",
        }
    }
}

/// Classify an item's stock against its thresholds
///
/// Low when current <= min, high when current >= max. A single enum keeps
/// the two flags mutually exclusive; low wins if the thresholds overlap.
pub fn stock_level(item: &InventoryItem) -> StockLevel {
    if item.current_stock <= item.min_stock {
        StockLevel::Low
    } else if item.current_stock >= item.max_stock {
        StockLevel::High
    } else {
        StockLevel::Normal
    }
}

/// Whether the item expires within the 90-day window of `today`
///
/// Already-expired items count as expiring.
pub fn expiring_soon(item: &InventoryItem, today: NaiveDate) -> bool {
    (item.expiry_date - today).num_days() <= EXPIRY_WINDOW_DAYS
}

/// Sort key for the inventory table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySort {
    Name,
    Stock,
    Expiry,
    Category,
}

/// Filter the inventory for display
///
/// Case-insensitive substring match over name and supplier, AND an optional
/// category equality filter.
pub fn filter_inventory<'a>(
    items: &'a [InventoryItem],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a InventoryItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let text_match = needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.supplier.to_lowercase().contains(&needle);
            let category_match = category.is_none_or(|c| item.category == c);
            text_match && category_match
        })
        .collect()
}

/// Stable sort of a filtered view, applied after filtering
pub fn sort_inventory(items: &mut [&InventoryItem], key: InventorySort) {
    match key {
        InventorySort::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        InventorySort::Stock => items.sort_by(|a, b| a.current_stock.cmp(&b.current_stock)),
        InventorySort::Expiry => items.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date)),
        InventorySort::Category => items.sort_by(|a, b| a.category.cmp(&b.category)),
    }
}

/// Summary widget numbers above the inventory table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_value: f64,
    pub low_stock: usize,
    pub expiring_soon: usize,
}

pub fn inventory_summary(items: &[InventoryItem], today: NaiveDate) -> InventorySummary {
    let mut summary = InventorySummary {
        item_count: items.len(),
        ..Default::default()
    };
    for item in items {
        summary.total_value += item.unit_cost * f64::from(item.current_stock);
        if stock_level(item) == StockLevel::Low {
            summary.low_stock += 1;
        }
        if expiring_soon(item, today) {
            summary.expiring_soon += 1;
        }
    }
    summary
}
