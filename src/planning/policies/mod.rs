mod access_policy;

pub use access_policy::{disabled_tooltip, AccessAction, AccessPolicy, Capability};
