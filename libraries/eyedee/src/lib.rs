//! Unique ids for records that were created on this device and have not (yet) been given an id
//! by a remote service.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["self", "crypto"])]
    fn randomUUID() -> String;
}

/// Every local id starts with this, so it can never be mistaken for a numeric remote id.
pub const LOCAL_PREFIX: &str = "local-";

pub fn get_uuid() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        randomUUID()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Uuid::new_v4().to_string()
    }
}

/// A fresh local id: [`LOCAL_PREFIX`] followed by the 32 hex digits of a v4 uuid.
pub fn local_id() -> String {
    let uuid = get_uuid();
    let mut id = String::with_capacity(LOCAL_PREFIX.len() + 32);
    id.push_str(LOCAL_PREFIX);
    id.extend(uuid.chars().filter(|c| *c != '-'));
    id
}

pub fn is_local_id(id: &str) -> bool {
    id.strip_prefix(LOCAL_PREFIX)
        .is_some_and(|rest| rest.len() == 32 && rest.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_uuid() {
        let uuid1 = get_uuid();
        let uuid2 = get_uuid();

        assert_ne!(uuid1, uuid2);
        assert_eq!(uuid1.len(), 36);
        assert!(uuid1.chars().filter(|&c| c == '-').count() == 4);
    }

    #[test]
    fn test_local_id() {
        let a = local_id();
        let b = local_id();

        assert_ne!(a, b);
        assert!(a.starts_with(LOCAL_PREFIX));
        assert_eq!(a.len(), LOCAL_PREFIX.len() + 32);
        assert!(is_local_id(&a));
    }

    #[test]
    fn test_is_local_id_rejects_remote_ids() {
        assert!(!is_local_id("101"));
        assert!(!is_local_id("local-"));
        assert!(!is_local_id("local-not-hex-at-all-zzzzzzzzzzzzzzzz"));
    }
}
