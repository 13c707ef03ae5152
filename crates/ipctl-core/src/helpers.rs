// ── Generic resource helpers ──
//
// Lookups and bulk operations shared by every resource.

use std::future::Future;

use serde_json::Value;

use crate::error::CoreError;

/// Return the first item whose key equals `name`.
pub fn find_by_name<T, K>(
    items: impl IntoIterator<Item = T>,
    name: &str,
    key_fn: K,
) -> Result<T, CoreError>
where
    K: Fn(&T) -> &str,
{
    items
        .into_iter()
        .find(|item| key_fn(item) == name)
        .ok_or_else(|| CoreError::NameNotFound {
            name: name.to_owned(),
        })
}

/// Delete every item in order, stopping at the first failure.
///
/// Items already deleted stay deleted; there is no rollback.
pub async fn delete_all<T, I, F, Fut, E>(
    items: &[T],
    id_fn: I,
    mut delete_fn: F,
) -> Result<(), CoreError>
where
    I: Fn(&T) -> &str,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Into<CoreError>,
{
    for item in items {
        let id = id_fn(item).to_owned();
        tracing::debug!(id = %id, "deleting");
        delete_fn(id).await.map_err(Into::into)?;
    }
    Ok(())
}

/// A read group without a write group is rejected by the platform.
pub fn validate_gbac_rules(read: &[Value], write: &[Value]) -> Result<(), CoreError> {
    if !read.is_empty() && write.is_empty() {
        return Err(CoreError::Validation(
            "write group must be configured, when read group present".into(),
        ));
    }
    Ok(())
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "1", name: "alpha" },
            Item { id: "2", name: "beta" },
            Item { id: "3", name: "beta" },
        ]
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let found = find_by_name(items(), "beta", |i| i.name).unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn find_by_name_reports_missing_name() {
        let err = find_by_name(items(), "gamma", |i| i.name).unwrap_err();
        assert_eq!(err.to_string(), "item with name 'gamma' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn find_by_name_in_empty_collection_is_not_found() {
        let empty: Vec<Item> = Vec::new();
        let err = find_by_name(empty, "alpha", |i| i.name).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "item with name 'alpha' not found");
    }

    #[tokio::test]
    async fn delete_all_stops_at_first_failure() {
        let seen = RefCell::new(Vec::new());
        let result = delete_all(&items(), |i| i.id, |id| {
            seen.borrow_mut().push(id.clone());
            async move {
                if id == "2" {
                    Err(CoreError::Api {
                        message: "locked".into(),
                        status: Some(409),
                    })
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "locked");
        assert_eq!(*seen.borrow(), vec!["1".to_owned(), "2".to_owned()]);
    }

    #[tokio::test]
    async fn delete_all_on_empty_is_noop() {
        let empty: Vec<Item> = Vec::new();
        delete_all(&empty, |i| i.id, |_| async { Err::<(), _>(CoreError::Cancelled) })
            .await
            .unwrap();
    }

    #[test]
    fn gbac_requires_write_when_read_present() {
        let err = validate_gbac_rules(&[json!("ops")], &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "write group must be configured, when read group present"
        );
        validate_gbac_rules(&[json!("ops")], &[json!("admins")]).unwrap();
        validate_gbac_rules(&[], &[]).unwrap();
        validate_gbac_rules(&[], &[json!("admins")]).unwrap();
    }
}
