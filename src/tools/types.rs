//! Common types shared across tools for type safety without dependencies

use serde_json::Value;

/// JSON-LD nodes flattened out of arrays and `@graph` containers.
pub type Jsonld = Vec<Value>;
