use std::collections::BTreeSet;

use proptest::prelude::*;

use sheet_filter::config::{Combinator, FilterConfig, NullPredicate};
use sheet_filter::processing::apply_filter;
use sheet_filter::types::{Table, Value};
use sheet_filter::ConfigError;

const COLUMNS: [&str; 4] = ["id", "a", "b", "c"];

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Utf8(String::new())),
        Just(Value::Utf8(" ".to_string())),
        (-5i64..5).prop_map(Value::Int64),
        "[a-z]{1,3}".prop_map(Value::Utf8),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(value_strategy(), COLUMNS.len()), 0..24).prop_map(
        |rows| Table::new(COLUMNS.iter().map(|c| c.to_string()).collect(), rows),
    )
}

fn config_strategy() -> impl Strategy<Value = FilterConfig> {
    (
        prop::sample::select(COLUMNS.to_vec()),
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "id", "missing"]), 1..5),
        prop_oneof![Just(Combinator::And), Just(Combinator::Or)],
        prop_oneof![Just(NullPredicate::IsNull), Just(NullPredicate::IsNotNull)],
    )
        .prop_map(|(primary, ops, combinator, predicate)| {
            FilterConfig::new(primary, ops, combinator, predicate)
        })
}

/// Source rows that survive, identified by position.
fn kept_positions(source: &Table, config: &FilterConfig) -> Vec<usize> {
    let primary = source.index_of(&config.primary_column);
    source
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| Table::cell(row, primary).is_present())
        .filter(|(_, row)| {
            let checks = config.operation_columns.iter().map(|c| {
                let absent = Table::cell(row, source.index_of(c)).is_absent();
                config.predicate.check(absent)
            });
            config.combinator.combine(checks)
        })
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn kept_rows_have_a_present_primary_value(source in table_strategy(), config in config_strategy()) {
        let out = apply_filter(&source, &config).unwrap();
        for row in &out.rows {
            prop_assert!(row[0].is_present());
        }
    }

    #[test]
    fn filtering_is_idempotent(source in table_strategy(), config in config_strategy()) {
        let first = apply_filter(&source, &config).unwrap();
        let second = apply_filter(&source, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rows_have_exactly_the_selected_keys(source in table_strategy(), config in config_strategy()) {
        let out = apply_filter(&source, &config).unwrap();

        let expected: BTreeSet<&str> = std::iter::once(config.primary_column.as_str())
            .chain(config.operation_columns.iter().map(String::as_str))
            .collect();
        let actual: BTreeSet<&str> = out.columns.iter().map(String::as_str).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(out.columns.len(), expected_len(&config));
        for row in &out.rows {
            prop_assert_eq!(row.len(), out.columns.len());
        }
    }

    #[test]
    fn operation_cells_are_never_absent(source in table_strategy(), config in config_strategy()) {
        let out = apply_filter(&source, &config).unwrap();
        for row in &out.rows {
            prop_assert!(row.iter().all(Value::is_present));
        }
    }

    #[test]
    fn rows_keep_source_order(source in table_strategy(), config in config_strategy()) {
        let out = apply_filter(&source, &config).unwrap();
        let positions = kept_positions(&source, &config);
        prop_assert_eq!(out.row_count(), positions.len());

        let primary = source.index_of(&config.primary_column);
        for (row, &pos) in out.rows.iter().zip(positions.iter()) {
            prop_assert_eq!(&row[0], &source.rows[pos][primary.unwrap()].normalized());
        }
    }

    #[test]
    fn and_result_is_subset_of_or_result(source in table_strategy(), config in config_strategy()) {
        let mut and_cfg = config.clone();
        and_cfg.combinator = Combinator::And;
        and_cfg.predicate = NullPredicate::IsNotNull;
        let mut or_cfg = and_cfg.clone();
        or_cfg.combinator = Combinator::Or;

        let and_rows: BTreeSet<usize> = kept_positions(&source, &and_cfg).into_iter().collect();
        let or_rows: BTreeSet<usize> = kept_positions(&source, &or_cfg).into_iter().collect();
        prop_assert!(and_rows.is_subset(&or_rows));

        let and_out = apply_filter(&source, &and_cfg).unwrap();
        let or_out = apply_filter(&source, &or_cfg).unwrap();
        prop_assert!(and_out.row_count() <= or_out.row_count());
    }
}

fn expected_len(config: &FilterConfig) -> usize {
    std::iter::once(&config.primary_column)
        .chain(config.operation_columns.iter())
        .collect::<BTreeSet<_>>()
        .len()
}

#[test]
fn missing_config_produces_no_table() {
    let source = Table::new(vec!["id".to_string()], vec![vec![Value::Int64(1)]]);

    let no_primary = FilterConfig::new("", ["id"], Combinator::Or, NullPredicate::IsNull);
    assert!(matches!(
        apply_filter(&source, &no_primary),
        Err(ConfigError::MissingPrimaryColumn)
    ));

    let no_ops = FilterConfig::new("id", Vec::<&str>::new(), Combinator::Or, NullPredicate::IsNull);
    assert!(matches!(
        apply_filter(&source, &no_ops),
        Err(ConfigError::MissingOperationColumns)
    ));
}

fn example_source() -> Table {
    Table::new(
        vec!["id".to_string(), "a".to_string(), "b".to_string()],
        vec![
            vec![Value::Int64(1), Value::Null, Value::Int64(2)],
            vec![Value::Int64(2), Value::Int64(3), Value::Null],
            vec![Value::Int64(3), Value::Null, Value::Null],
        ],
    )
}

#[test]
fn documented_example_or() {
    let cfg = FilterConfig::from_inputs("id", "a,b", "or", "not-null").unwrap();
    let out = apply_filter(&example_source(), &cfg).unwrap();
    assert_eq!(
        out.rows,
        vec![
            vec![Value::Int64(1), Value::from("NULL"), Value::Int64(2)],
            vec![Value::Int64(2), Value::Int64(3), Value::from("NULL")],
        ]
    );
}

#[test]
fn documented_example_and() {
    let cfg = FilterConfig::from_inputs("id", "a,b", "and", "not-null").unwrap();
    let out = apply_filter(&example_source(), &cfg).unwrap();
    assert!(out.rows.is_empty());
}
