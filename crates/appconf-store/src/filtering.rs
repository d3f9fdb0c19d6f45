//! Filter evaluation and ordering for backends that search in memory.

use std::cmp::Ordering;

use serde_json::Value;

use crate::{Filter, SearchRequest, SortOrder};

/// Checks if a document matches the given filter.
pub fn matches_filter(data: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::MatchAll => true,
        Filter::Equals(field, value) => data.get(field) == Some(value),
        Filter::In(field, values) => data.get(field).is_some_and(|v| values.contains(v)),
        Filter::And(filters) => filters.iter().all(|f| matches_filter(data, f)),
    }
}

/// Compares two JSON values for sorting purposes.
pub fn compare_json_values(a: &Value, b: &Value) -> Ordering {
    fn type_order(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(ba), Value::Bool(bb)) => ba.cmp(bb),
        (Value::Number(na), Value::Number(nb)) => {
            let fa = na.as_f64().unwrap_or(0.0);
            let fb = nb.as_f64().unwrap_or(0.0);
            fa.partial_cmp(&fb).unwrap_or(Ordering::Equal)
        },
        (Value::String(sa), Value::String(sb)) => sa.cmp(sb),
        (Value::Array(aa), Value::Array(ab)) => aa.len().cmp(&ab.len()),
        (Value::Object(oa), Value::Object(ob)) => oa.len().cmp(&ob.len()),
        _ => type_order(a).cmp(&type_order(b)),
    }
}

/// Applies a search request to a set of candidate documents.
///
/// Filters first, then sorts (missing sort fields order as `null`), then truncates
/// to the request limit. Without a sort the candidate order is preserved.
pub fn apply_search<I>(documents: I, request: &SearchRequest) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut matched: Vec<Value> = documents
        .into_iter()
        .filter(|doc| matches_filter(doc, &request.filter))
        .collect();

    if let Some((field, order)) = request.sort.as_ref() {
        matched.sort_by(|a, b| {
            let ordering = compare_json_values(
                a.get(field).unwrap_or(&Value::Null),
                b.get(field).unwrap_or(&Value::Null),
            );
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    matched.truncate(request.limit);
    matched
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_matches_equals() {
        let doc = json!({"Server": "srv1"});
        assert!(matches_filter(&doc, &Filter::Equals("Server".to_owned(), json!("srv1"))));
        assert!(!matches_filter(&doc, &Filter::Equals("Server".to_owned(), json!("srv2"))));
        assert!(!matches_filter(&doc, &Filter::Equals("Missing".to_owned(), json!("srv1"))));
    }

    #[test]
    fn test_matches_in() {
        let doc = json!({"Path": "/b"});
        let filter = Filter::In("Path".to_owned(), vec![json!("/a"), json!("/b")]);
        assert!(matches_filter(&doc, &filter));
        let filter = Filter::In("Path".to_owned(), vec![json!("/a")]);
        assert!(!matches_filter(&doc, &filter));
        let filter = Filter::In("Path".to_owned(), vec![]);
        assert!(!matches_filter(&doc, &filter));
    }

    #[test]
    fn test_matches_and() {
        let doc = json!({"Path": "/a", "Server": "srv1"});
        let both = Filter::And(vec![
            Filter::In("Path".to_owned(), vec![json!("/a")]),
            Filter::Equals("Server".to_owned(), json!("srv1")),
        ]);
        assert!(matches_filter(&doc, &both));
        let wrong_server = Filter::And(vec![
            Filter::In("Path".to_owned(), vec![json!("/a")]),
            Filter::Equals("Server".to_owned(), json!("srv2")),
        ]);
        assert!(!matches_filter(&doc, &wrong_server));
    }

    #[test]
    fn test_compare_json_values() {
        assert_eq!(compare_json_values(&json!("/a"), &json!("/b")), Ordering::Less);
        assert_eq!(compare_json_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_json_values(&json!(null), &json!("/a")), Ordering::Less);
        assert_eq!(compare_json_values(&json!(true), &json!(false)), Ordering::Greater);
    }

    #[test]
    fn test_apply_search_sorts_and_truncates() {
        let docs = vec![json!({"Path": "/c"}), json!({"Path": "/a"}), json!({"Path": "/b"})];
        let request = SearchRequest::new().sort("Path", SortOrder::Ascending).limit(2);
        let result = apply_search(docs, &request);
        assert_eq!(result, vec![json!({"Path": "/a"}), json!({"Path": "/b"})]);
    }

    #[test]
    fn test_apply_search_descending() {
        let docs = vec![json!({"Path": "/a"}), json!({"Path": "/c"}), json!({"Path": "/b"})];
        let request = SearchRequest::new().sort("Path", SortOrder::Descending);
        let paths: Vec<_> = apply_search(docs, &request)
            .into_iter()
            .map(|d| d["Path"].clone())
            .collect();
        assert_eq!(paths, vec![json!("/c"), json!("/b"), json!("/a")]);
    }
}
