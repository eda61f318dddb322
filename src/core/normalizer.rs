use crate::models::{FlatRow, FlatTable};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Flatten export entries into a table with one row per entry
///
/// Nested objects become `parent.child` columns and arrays become
/// `parent.<index>` columns. Rows are sparse: each holds only the cells its
/// own entry produced, so storage grows with the number of leaves rather
/// than rows times columns. `FlatTable::columns` lists the union.
pub fn normalize(entries: &[Value]) -> FlatTable {
    let mut columns = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let rows = entries
        .iter()
        .map(|entry| {
            let mut cells = Vec::new();
            flatten_into(None, entry, &mut cells);

            // Column order follows first appearance across entries
            for (column, _) in &cells {
                if !seen.contains(column) {
                    seen.insert(column.clone());
                    columns.push(column.clone());
                }
            }

            FlatRow::new(cells.into_iter().collect::<BTreeMap<_, _>>())
        })
        .collect();

    tracing::debug!("Normalized {} entries into {} columns", entries.len(), columns.len());

    FlatTable { columns, rows }
}

fn flatten_into(prefix: Option<&str>, value: &Value, out: &mut Vec<(String, Option<Value>)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let column = join(prefix, key);
                flatten_into(Some(column.as_str()), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let column = join(prefix, &index.to_string());
                flatten_into(Some(column.as_str()), child, out);
            }
        }
        Value::Null => {
            if let Some(column) = prefix {
                out.push((column.to_string(), None));
            }
        }
        scalar => {
            if let Some(column) = prefix {
                out.push((column.to_string(), Some(scalar.clone())));
            }
        }
    }
}

#[inline]
fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(p) => format!("{}.{}", p, key),
        None => key.to_string(),
    }
}
