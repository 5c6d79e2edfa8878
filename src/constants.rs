// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Content hub boundaries
// ---------------------------------------------------------------------------

/// GraphQL endpoint used when `CONTENT_HUB_ENDPOINT` is not set.
pub const DEFAULT_HUB_ENDPOINT: &str = "https://graphql.datocms.com/";

/// Header that asks the hub to include draft (unpublished) records.
///
/// Sent only when the build runs in preview mode.
pub const INCLUDE_DRAFTS_HEADER: &str = "X-Include-Drafts";

/// Largest `first:` argument the hub accepts on a collection query.
pub const HUB_MAX_PAGE_SIZE: u32 = 100;

/// How many success stories the homepage shows.
pub const SUCCESS_STORIES_LIMIT: usize = 4;

/// Default seconds to wait for the hub before treating the call as failed.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const ENV_HUB_TOKEN: &str = "CONTENT_HUB_TOKEN";
pub const ENV_HUB_ENDPOINT: &str = "CONTENT_HUB_ENDPOINT";
pub const ENV_PREVIEW_SECRET: &str = "CONTENT_HUB_PREVIEW_SECRET";

// ---------------------------------------------------------------------------
// Render layer
// ---------------------------------------------------------------------------

/// Text of the affordance shown on pages built in preview mode.
pub const PREVIEW_BANNER_TEXT: &str = "You are viewing draft content (preview mode)";

/// Route prefix for customer success stories.
pub const CUSTOMER_ROUTE_PREFIX: &str = "/customers/";

/// DOM id of the script element carrying the serialized page artifact.
pub const PAGE_DATA_ELEMENT_ID: &str = "__PAGE_DATA__";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
