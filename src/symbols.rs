// Visual symbols used in log and diagnostic messages
// Using generic names that represent meaning rather than the specific emoji

/// Status and feedback symbols
pub const SYMBOL_INDICATOR_WARNING: &str = "⚠️";

/// Process and action symbols
pub const SYMBOL_ACTION_MIX: &str = "🧩";
pub const SYMBOL_ACTION_SEED: &str = "🌱";
