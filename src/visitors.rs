#[cfg(target_arch = "wasm32")]
use gloo_net::http::Request;
#[cfg(any(target_arch = "wasm32", test))]
use serde::Deserialize;

use crate::storage::KeyValueStore;

const LOCAL_VISITS_KEY: &str = "local-visits";

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone, Debug, PartialEq, Deserialize)]
struct CounterPayload {
    value: u64,
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_remote_count(url: &str) -> Result<u64, String> {
    let response = Request::post(url)
        .send()
        .await
        .map_err(|err| format!("counter request failed: {err}"))?;
    if !response.ok() {
        return Err(format!("counter request failed: status {}", response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|err| format!("counter read failed: {err}"))?;
    parse_counter_payload(&text)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_remote_count(url: &str) -> Result<u64, String> {
    Err(format!("counter request unavailable off-browser: {url}"))
}

#[cfg(any(target_arch = "wasm32", test))]
fn parse_counter_payload(body: &str) -> Result<u64, String> {
    serde_json::from_str::<CounterPayload>(body)
        .map(|payload| payload.value)
        .map_err(|err| format!("counter decode failed: {err}"))
}

pub fn resolve_visit_count(remote: Result<u64, String>, store: &impl KeyValueStore) -> u64 {
    match remote {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("visitors: {err}; using local counter");
            bump_local_visits(store)
        }
    }
}

fn bump_local_visits(store: &impl KeyValueStore) -> u64 {
    let previous = store
        .get(LOCAL_VISITS_KEY)
        .map(|value| parse_leading_count(&value))
        .unwrap_or(0);
    let next = previous.saturating_add(1);
    if let Err(err) = store.set(LOCAL_VISITS_KEY, &next.to_string()) {
        tracing::warn!("visitors: {err}");
    }
    next
}

fn parse_leading_count(value: &str) -> u64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn remote_value_wins_and_leaves_local_alone() {
        let store = MemoryStore::with(&[("local-visits", "7")]);
        assert_eq!(resolve_visit_count(Ok(1520), &store), 1520);
        assert_eq!(store.get("local-visits").as_deref(), Some("7"));
    }

    #[test]
    fn failure_bumps_local_counter() {
        let store = MemoryStore::with(&[("local-visits", "41")]);
        let shown = resolve_visit_count(Err("offline".to_string()), &store);
        assert_eq!(shown, 42);
        assert_eq!(store.get("local-visits").as_deref(), Some("42"));
    }

    #[test]
    fn failure_without_history_starts_at_one() {
        let store = MemoryStore::default();
        assert_eq!(resolve_visit_count(Err("503".to_string()), &store), 1);
        assert_eq!(resolve_visit_count(Err("503".to_string()), &store), 2);
    }

    #[test]
    fn malformed_local_value_counts_as_zero() {
        let store = MemoryStore::with(&[("local-visits", "abc")]);
        assert_eq!(resolve_visit_count(Err("down".to_string()), &store), 1);
        let store = MemoryStore::with(&[("local-visits", "12px")]);
        assert_eq!(resolve_visit_count(Err("down".to_string()), &store), 13);
    }

    #[test]
    fn payload_requires_integer_value() {
        assert_eq!(parse_counter_payload(r#"{"value": 99, "name": "x"}"#), Ok(99));
        assert!(parse_counter_payload(r#"{"count": 99}"#).is_err());
        assert!(parse_counter_payload("<html>").is_err());
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
