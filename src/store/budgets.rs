use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::BudgetMap;

/// Read the budget document. A missing file is an empty map; entries that
/// are not positive numbers are dropped.
pub(crate) fn read_budgets(path: &Path) -> Result<BudgetMap> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No budget file at {}, starting empty", path.display());
            return Ok(BudgetMap::new());
        }
        Err(e) => return Err(Error::storage(path, e)),
    };

    if text.trim().is_empty() {
        return Ok(BudgetMap::new());
    }

    let doc: Map<String, Value> = serde_json::from_str(&text)?;
    let mut budgets = BudgetMap::new();
    for (category, value) in &doc {
        let Some(amount) = value_to_decimal(value) else {
            warn!("Ignoring budget for '{category}': not a number ({value})");
            continue;
        };
        if let Err(e) = budgets.set(category, amount) {
            warn!("Ignoring budget: {e}");
        }
    }
    debug!("Loaded {} budgets", budgets.len());
    Ok(budgets)
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Overwrite the budget document with `budgets` as a flat JSON object.
pub(crate) fn write_budgets(path: &Path, budgets: &BudgetMap) -> Result<()> {
    let mut doc = Map::new();
    for (category, amount) in budgets.iter() {
        let number = Number::from_str(&amount.normalize().to_string())
            .map_err(|_| Error::InvalidData(format!("budget for '{category}' out of range")))?;
        doc.insert(category.to_string(), Value::Number(number));
    }
    let text = serde_json::to_string_pretty(&Value::Object(doc))?;
    fs::write(path, text).map_err(|e| Error::storage(path, e))
}
