//! Deterministic name identity.
//!
//! Every string maps to the same v5 UUID in a fixed application namespace,
//! so inputs and matched terms can be joined across processes without
//! coordination.

use std::sync::OnceLock;
use uuid::Uuid;

static NAMESPACE: OnceLock<Uuid> = OnceLock::new();

fn namespace() -> &'static Uuid {
    NAMESPACE.get_or_init(|| Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"nameres.dev"))
}

/// v5 UUID of `s` in the application namespace.
pub fn uuid_for(s: &str) -> Uuid {
    Uuid::new_v5(namespace(), s.as_bytes())
}
