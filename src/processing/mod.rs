//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::Table`] values produced by loading. It is
//! purely in-memory: [`apply_filter`] scans the source once and returns a new derived table,
//! leaving the source unchanged.
//!
//! ## Example: keep rows that have a value in `a` or `b`
//!
//! ```rust
//! use sheet_filter::config::{Combinator, FilterConfig, NullPredicate};
//! use sheet_filter::processing::apply_filter;
//! use sheet_filter::types::{Table, Value};
//!
//! let source = Table::new(
//!     vec!["id".into(), "a".into(), "b".into()],
//!     vec![
//!         vec![Value::Int64(1), Value::Null, Value::Int64(2)],
//!         vec![Value::Int64(2), Value::Int64(3), Value::Null],
//!         vec![Value::Int64(3), Value::Null, Value::Null],
//!     ],
//! );
//! let cfg = FilterConfig::new("id", ["a", "b"], Combinator::Or, NullPredicate::IsNotNull);
//!
//! let out = apply_filter(&source, &cfg).unwrap();
//! assert_eq!(out.row_count(), 2);
//! assert_eq!(out.rows[0][1], Value::from("NULL"));
//! ```

pub mod filter;

pub use filter::apply_filter;
