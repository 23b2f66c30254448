/// Translation key for the collapsed token label of a multi-asset protocol.
pub const MULTIPLE_ASSETS_KEY: &str = "defi_overview.multiple_assets";

/// Translation key for the overview balances task title.
pub const BALANCES_TASK_TITLE_KEY: &str = "actions.defi.balances.task.title";

/// Translation key for the overview balances error title.
pub const BALANCES_ERROR_TITLE_KEY: &str = "actions.defi.balances.error.title";

/// Translation key for the overview balances error message.
pub const BALANCES_ERROR_MESSAGE_KEY: &str = "actions.defi.balances.error.description";

/// Translation key for a protocol adapter error title.
pub const PROTOCOL_ERROR_TITLE_KEY: &str = "actions.defi.protocol.error.title";

/// Translation key for a protocol adapter error message.
pub const PROTOCOL_ERROR_MESSAGE_KEY: &str = "actions.defi.protocol.error.description";

/// Route for the deposits view, filtered by protocol.
pub const DEPOSITS_ROUTE: &str = "/defi/deposits";

/// Route for the liabilities view, filtered by protocol.
pub const LIABILITIES_ROUTE: &str = "/defi/liabilities";

/// Capacity of the engine's event broadcast channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
