//! Lenient intake of a client snapshot from untyped JSON.

use serde_json::Value;

use crate::client::Client;

/// Build a client collection from an arbitrary JSON value.
///
/// A missing value or anything other than an array yields an empty
/// collection. Array entries that do not deserialize are skipped.
pub fn clients_from_snapshot(snapshot: Option<&Value>) -> Vec<Client> {
    let Some(Value::Array(items)) = snapshot else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: i64) -> Value {
        json!({
            "id": id,
            "name": format!("Client {id}"),
            "phone": "0551234567",
            "registered_by": 1,
            "registered_at": "2026-03-01T10:00:00Z"
        })
    }

    #[test]
    fn missing_snapshot_is_empty() {
        assert!(clients_from_snapshot(None).is_empty());
    }

    #[test]
    fn non_array_snapshot_is_empty() {
        assert!(clients_from_snapshot(Some(&json!({"clients": []}))).is_empty());
        assert!(clients_from_snapshot(Some(&json!("clients"))).is_empty());
        assert!(clients_from_snapshot(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_in_order() {
        let snapshot = json!([entry(1), {"name": "no id"}, 42, entry(3)]);
        let ids: Vec<_> = clients_from_snapshot(Some(&snapshot))
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn unknown_status_string_drops_the_entry() {
        let mut bad = entry(2);
        bad["transfer_status"] = json!("archived");
        let snapshot = json!([entry(1), bad]);
        assert_eq!(clients_from_snapshot(Some(&snapshot)).len(), 1);
    }
}
