// =============================================================================
// API Module — REST surface for the dashboard client
// =============================================================================

pub mod rest;
