//! Immutable per-request context consumed by targeting predicates.

use serde::{Deserialize, Serialize};

use crate::core::errors::{AdsError, Result};

/// The (customer, marketplace) pair a single selection call runs against.
///
/// `customer_id` may be absent for unrecognized visitors; `marketplace_id`
/// is always non-empty, enforced by the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    customer_id: Option<String>,
    marketplace_id: String,
}

impl RequestContext {
    /// Builds a context, rejecting an empty marketplace id.
    pub fn new(customer_id: Option<&str>, marketplace_id: &str) -> Result<Self> {
        if marketplace_id.is_empty() {
            return Err(AdsError::InvalidRequest {
                details: "marketplace id must not be empty".to_string(),
            });
        }
        Ok(Self {
            customer_id: customer_id.map(str::to_string),
            marketplace_id: marketplace_id.to_string(),
        })
    }

    /// The customer this request is for, if recognized.
    #[must_use]
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// The marketplace the advertisement will render on. Never empty.
    #[must_use]
    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }
}
