/// Fractional digits kept for open/high/low/close prices
pub const PRICE_SCALE: u32 = 6;

/// Total significant digits a stored price may carry (`DECIMAL(20, 6)`)
pub const PRICE_MAX_DIGITS: u32 = 20;

/// Maximum length of a stored ticker symbol
pub const MAX_SYMBOL_LEN: usize = 8;

/// Maximum length of a ticker display name
pub const MAX_DISPLAY_NAME_LEN: usize = 20;

/// Date format used for day-precision values in storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of years fetched when a ticker is first tracked
pub const DEFAULT_HISTORY_YEARS: u32 = 5;
