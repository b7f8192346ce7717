/// Account state and the rules guarding every balance change.
/// Operations are validated first, producing transaction records, and only
/// then applied, so a rejected operation never leaves partial state behind.
pub mod account;

/// Conversions from raw input into decimal amounts.
pub mod amount;

/// Registry that creates accounts and addresses them by handle.
pub mod bank;

/// Bank commands built from raw script rows.
pub mod command;

/// Command processor interface, plus "in memory" implementation backed by [`bank::Bank`].
pub mod processor;

/// CSV script runner used by the binary and by the integration tests.
pub mod bin_utils;
