//! Row filtering and projection for [`crate::types::Table`].

use tracing::{debug, warn};

use crate::config::FilterConfig;
use crate::error::ConfigError;
use crate::types::{Table, Value};

/// Returns a new [`Table`] holding the rows of `source` that match `config`, projected onto the
/// primary column followed by the operation columns.
///
/// A row is kept when its primary column is present and the per-column checks of
/// `config.predicate`, combined with `config.combinator`, pass. Kept rows carry the primary
/// value as-is; operation-column values that are absent become the `"NULL"` sentinel.
///
/// A column listed more than once keeps its first position in the output header and the value of
/// its last write. In particular, when the primary column is also an operation column, its
/// normalized operation value replaces the primary value.
///
/// Column names that do not exist in `source` read as absent in every row.
///
/// # Errors
///
/// Returns [`ConfigError::MissingPrimaryColumn`] or [`ConfigError::MissingOperationColumns`] when
/// either part of the configuration is empty. No table is produced in that case.
///
/// # Examples
///
/// ```rust
/// use sheet_filter::config::{Combinator, FilterConfig, NullPredicate};
/// use sheet_filter::processing::apply_filter;
/// use sheet_filter::types::{Table, Value};
///
/// let source = Table::new(
///     vec!["id".into(), "a".into()],
///     vec![
///         vec![Value::Int64(1), Value::Null],
///         vec![Value::Int64(2), Value::Int64(3)],
///     ],
/// );
/// let cfg = FilterConfig::new("id", ["a"], Combinator::And, NullPredicate::IsNull);
///
/// let out = apply_filter(&source, &cfg).unwrap();
/// assert_eq!(out.rows, vec![vec![Value::Int64(1), Value::from("NULL")]]);
/// ```
pub fn apply_filter(source: &Table, config: &FilterConfig) -> Result<Table, ConfigError> {
    config.validate()?;

    let primary_idx = lookup(source, &config.primary_column);
    let op_idxs: Vec<Option<usize>> = config
        .operation_columns
        .iter()
        .map(|c| lookup(source, c))
        .collect();
    let (columns, op_slots) = projection(config);

    let rows: Vec<Vec<Value>> = source
        .rows
        .iter()
        .filter(|row| row_matches(row, primary_idx, &op_idxs, config))
        .map(|row| {
            let mut out = vec![Value::Null; columns.len()];
            out[0] = Table::cell(row, primary_idx).clone();
            for (&slot, &idx) in op_slots.iter().zip(op_idxs.iter()) {
                out[slot] = Table::cell(row, idx).normalized();
            }
            out
        })
        .collect();

    debug!(
        rows_in = source.row_count(),
        rows_out = rows.len(),
        combinator = %config.combinator,
        predicate = %config.predicate,
        "applied filter"
    );

    Ok(Table::new(columns, rows))
}

fn lookup(source: &Table, column: &str) -> Option<usize> {
    let idx = source.index_of(column);
    if idx.is_none() {
        warn!(column, "filter column not found; reading it as absent");
    }
    idx
}

fn row_matches(
    row: &[Value],
    primary_idx: Option<usize>,
    op_idxs: &[Option<usize>],
    config: &FilterConfig,
) -> bool {
    if Table::cell(row, primary_idx).is_absent() {
        return false;
    }
    config.combinator.combine(
        op_idxs
            .iter()
            .map(|&idx| config.predicate.check(Table::cell(row, idx).is_absent())),
    )
}

/// Output header plus, for each operation column, the output slot it writes to.
fn projection(config: &FilterConfig) -> (Vec<String>, Vec<usize>) {
    let mut columns = vec![config.primary_column.clone()];
    let mut slots = Vec::with_capacity(config.operation_columns.len());
    for name in &config.operation_columns {
        let slot = match columns.iter().position(|c| c == name) {
            Some(slot) => slot,
            None => {
                columns.push(name.clone());
                columns.len() - 1
            }
        };
        slots.push(slot);
    }
    (columns, slots)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::apply_filter;
    use crate::config::{Combinator, FilterConfig, NullPredicate};
    use crate::error::ConfigError;
    use crate::types::{Table, Value};

    fn null() -> Value {
        Value::from("NULL")
    }

    fn sample_table() -> Table {
        Table::new(
            vec!["id".to_string(), "a".to_string(), "b".to_string()],
            vec![
                vec![Value::Int64(1), Value::Null, Value::Int64(2)],
                vec![Value::Int64(2), Value::Int64(3), Value::Null],
                vec![Value::Int64(3), Value::Null, Value::Null],
            ],
        )
    }

    fn cfg(combinator: Combinator, predicate: NullPredicate) -> FilterConfig {
        FilterConfig::new("id", ["a", "b"], combinator, predicate)
    }

    #[test]
    fn not_null_or_keeps_rows_with_any_value() {
        let out = apply_filter(
            &sample_table(),
            &cfg(Combinator::Or, NullPredicate::IsNotNull),
        )
        .unwrap();

        assert_eq!(out.columns, vec!["id", "a", "b"]);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::Int64(1), null(), Value::Int64(2)],
                vec![Value::Int64(2), Value::Int64(3), null()],
            ]
        );
    }

    #[test]
    fn not_null_and_can_return_empty_table() {
        let out = apply_filter(
            &sample_table(),
            &cfg(Combinator::And, NullPredicate::IsNotNull),
        )
        .unwrap();
        assert_eq!(out.columns, vec!["id", "a", "b"]);
        assert!(out.rows.is_empty());
    }

    #[test]
    fn null_and_keeps_rows_missing_every_value() {
        let out = apply_filter(&sample_table(), &cfg(Combinator::And, NullPredicate::IsNull))
            .unwrap();
        assert_eq!(out.rows, vec![vec![Value::Int64(3), null(), null()]]);
    }

    #[test]
    fn null_or_keeps_rows_missing_any_value() {
        let out = apply_filter(&sample_table(), &cfg(Combinator::Or, NullPredicate::IsNull))
            .unwrap();
        let ids: Vec<&Value> = out.rows.iter().map(|r| &r[0]).collect();
        assert_eq!(ids, vec![&Value::Int64(1), &Value::Int64(2), &Value::Int64(3)]);
    }

    #[test]
    fn rows_with_absent_primary_are_always_dropped() {
        let source = Table::new(
            vec!["id".to_string(), "a".to_string()],
            vec![
                vec![Value::Null, Value::Int64(1)],
                vec![Value::from(""), Value::Int64(2)],
                vec![Value::from("k"), Value::Int64(3)],
            ],
        );
        let c = FilterConfig::new("id", ["a"], Combinator::Or, NullPredicate::IsNotNull);
        let out = apply_filter(&source, &c).unwrap();
        assert_eq!(out.rows, vec![vec![Value::from("k"), Value::Int64(3)]]);
    }

    #[test]
    fn projection_drops_unselected_columns_and_keeps_order() {
        let source = Table::new(
            vec!["x".to_string(), "id".to_string(), "a".to_string()],
            vec![
                vec![Value::from("drop"), Value::Int64(9), Value::Int64(1)],
                vec![Value::from("drop"), Value::Int64(4), Value::Int64(2)],
            ],
        );
        let c = FilterConfig::new("id", ["a"], Combinator::And, NullPredicate::IsNotNull);
        let out = apply_filter(&source, &c).unwrap();
        assert_eq!(out.columns, vec!["id", "a"]);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::Int64(9), Value::Int64(1)],
                vec![Value::Int64(4), Value::Int64(2)],
            ]
        );
    }

    #[test]
    fn duplicate_operation_columns_are_checked_independently_but_projected_once() {
        let c = FilterConfig::new("id", ["a", "a"], Combinator::And, NullPredicate::IsNotNull);
        let out = apply_filter(&sample_table(), &c).unwrap();
        assert_eq!(out.columns, vec!["id", "a"]);
        assert_eq!(out.rows, vec![vec![Value::Int64(2), Value::Int64(3)]]);
    }

    #[test]
    fn primary_listed_as_operation_column_is_last_write_wins() {
        let source = Table::new(
            vec!["id".to_string(), "a".to_string()],
            vec![vec![Value::Float64(1.0), Value::Null]],
        );
        let c = FilterConfig::new("id", ["a", "id"], Combinator::Or, NullPredicate::IsNotNull);
        let out = apply_filter(&source, &c).unwrap();
        assert_eq!(out.columns, vec!["id", "a"]);
        assert_eq!(out.rows, vec![vec![Value::Float64(1.0), null()]]);
    }

    #[test]
    fn unknown_operation_column_reads_as_absent() {
        let c = FilterConfig::new("id", ["nope"], Combinator::And, NullPredicate::IsNull);
        let out = apply_filter(&sample_table(), &c).unwrap();
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.columns, vec!["id", "nope"]);
        assert!(out.rows.iter().all(|r| r[1] == null()));
    }

    #[test]
    fn unknown_primary_column_drops_every_row() {
        let c = FilterConfig::new("ID", ["a"], Combinator::Or, NullPredicate::IsNull);
        let out = apply_filter(&sample_table(), &c).unwrap();
        assert!(out.rows.is_empty());
    }

    #[test]
    fn missing_config_is_an_error() {
        let ds = sample_table();
        let no_primary = FilterConfig::new("", ["a"], Combinator::And, NullPredicate::IsNull);
        let no_ops =
            FilterConfig::new("id", Vec::<String>::new(), Combinator::And, NullPredicate::IsNull);

        assert!(matches!(
            apply_filter(&ds, &no_primary),
            Err(ConfigError::MissingPrimaryColumn)
        ));
        assert!(matches!(
            apply_filter(&ds, &no_ops),
            Err(ConfigError::MissingOperationColumns)
        ));
    }

    #[test]
    fn source_is_left_untouched() {
        let ds = sample_table();
        let before = ds.clone();
        let _ = apply_filter(&ds, &cfg(Combinator::Or, NullPredicate::IsNotNull)).unwrap();
        assert_eq!(ds, before);
    }
}
