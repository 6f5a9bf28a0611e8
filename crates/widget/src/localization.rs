//! Currency formatting seam.

use offerkit_core::Amount;

/// Locale-aware currency formatting provided by the host.
pub trait Localization: Send + Sync {
    fn format_currency(&self, amount: &Amount) -> String;
}

/// Formats amounts as `<symbol><whole>.<cents>`, e.g. `$2.50`.
///
/// Used where no host formatter is available (demo, tests).
#[derive(Debug, Clone)]
pub struct SymbolCurrency {
    symbol: String,
}

impl SymbolCurrency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Localization for SymbolCurrency {
    fn format_currency(&self, amount: &Amount) -> String {
        let (whole, fraction) = amount
            .as_str()
            .split_once('.')
            .unwrap_or((amount.as_str(), ""));
        let whole = if whole.is_empty() { "0" } else { whole };
        format!("{}{}.{:0<2}", self.symbol, whole, fraction)
    }
}
