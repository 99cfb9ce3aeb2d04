//! Column sorting: the three-state direction cycle and the ordering of rows
//! by a column's field.

use crate::data_table::Column;
use crate::record::{Record, Value};
use std::cmp::Ordering;

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which column the table is sorted by, if any.
///
/// A direction never exists without a column and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        column: String,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn column(&self) -> Option<&str> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { column, .. } => Some(column),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { direction, .. } => Some(*direction),
        }
    }

    /// The state after the header of column `key` is activated.
    ///
    /// The same column cycles Ascending, Descending, Unsorted. Any other
    /// sortable column starts at Ascending. Unknown and non-sortable columns
    /// leave the state unchanged.
    pub fn activate<R>(&self, key: &str, columns: &[Column<R>]) -> SortState {
        match find_column(columns, key) {
            Some(col) if col.sortable => {}
            _ => return self.clone(),
        }
        match self {
            SortState::Sorted { column, direction } if column == key => match direction {
                SortDirection::Ascending => SortState::Sorted {
                    column: column.clone(),
                    direction: SortDirection::Descending,
                },
                SortDirection::Descending => SortState::Unsorted,
            },
            _ => SortState::Sorted {
                column: key.to_string(),
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// First column whose key is `key`.
pub(crate) fn find_column<'a, R>(columns: &'a [Column<R>], key: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|c| c.key == key)
}

/// Display order of `rows` as indices into `rows`.
///
/// Returns `0..rows.len()` when nothing sortable is active. Ties keep their
/// input order.
pub fn sort_order<R: Record>(rows: &[R], columns: &[Column<R>], state: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let (key, direction) = match state {
        SortState::Unsorted => return order,
        SortState::Sorted { column, direction } => (column, *direction),
    };
    let field = match find_column(columns, key) {
        Some(col) if col.sortable => &col.field,
        _ => return order,
    };

    let keys = sort_keys(rows.iter().map(|row| row.field(field)).collect());
    order.sort_by(|&a, &b| {
        missing_last(keys[a].as_ref(), keys[b].as_ref(), direction, SortKey::cmp)
    });
    order
}

/// A column's values reduced to one comparable kind.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn cmp(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => number_cmp(*a, *b),
            (SortKey::Text(a), SortKey::Text(b)) => locale_cmp(a, b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Numbers stay numeric only when every present value is a number, text
/// stays text only when every present value is text; any other column is
/// compared by display strings. One kind per column keeps the order total.
fn sort_keys(values: Vec<Option<Value>>) -> Vec<Option<SortKey>> {
    let present = || values.iter().flatten();
    let numeric = present().all(|v| matches!(v, Value::Number(_)));
    let textual = present().all(|v| matches!(v, Value::Text(_)));
    if !numeric && !textual {
        tracing::trace!("mixed column: sorting by display text");
    }
    values
        .into_iter()
        .map(|value| {
            value.map(|v| match v {
                Value::Number(n) if numeric => SortKey::Number(n),
                Value::Text(s) if textual => SortKey::Text(s),
                other => SortKey::Text(other.to_string()),
            })
        })
        .collect()
}

/// Compare two field values for sorting in `direction`.
///
/// Missing values trail in both directions. Only the comparison of present
/// values is reversed for descending order. Values of different kinds
/// compare by their display strings.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    missing_last(a, b, direction, compare_present)
}

fn missing_last<T>(
    a: Option<&T>,
    b: Option<&T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = cmp(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => locale_cmp(a, b),
        (Value::Number(a), Value::Number(b)) => number_cmp(*a, *b),
        _ => locale_cmp(&a.to_string(), &b.to_string()),
    }
}

/// Numeric order with every NaN equal to every other NaN and after all
/// numbers.
fn number_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Case-insensitive text ordering that still separates case variants.
///
/// Strings are first compared case-folded ("apple" < "Banana"). Strings that
/// fold equal are compared char by char with lowercase before uppercase
/// ("ada" < "Ada"), then by code point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let case = |s: &str| s.chars().map(|c| (!c.is_lowercase(), c)).collect::<Vec<_>>();
    fold(a).cmp(&fold(b)).then_with(|| case(a).cmp(&case(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;
    use std::collections::BTreeMap;

    type Row = BTreeMap<String, Value>;

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name").sortable(true),
            Column::new("salary", "Salary").sortable(true),
            Column::new("email", "Email"),
        ]
    }

    fn names(rows: &[Row], order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| rows[i].field("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    fn sorted(column: &str, direction: SortDirection) -> SortState {
        SortState::Sorted {
            column: column.to_string(),
            direction,
        }
    }

    #[test]
    fn one_click_sorts_ascending() {
        let rows = vec![record([("name", "B".into())]), record([("name", "A".into())])];
        let cols = columns();
        let state = SortState::Unsorted.activate("name", &cols);
        assert_eq!(names(&rows, &sort_order(&rows, &cols, &state)), ["A", "B"]);
    }

    #[test]
    fn direction_cycles_through_three_states() {
        let cols = columns();
        let s1 = SortState::Unsorted.activate("name", &cols);
        assert_eq!(s1, sorted("name", SortDirection::Ascending));
        let s2 = s1.activate("name", &cols);
        assert_eq!(s2, sorted("name", SortDirection::Descending));
        let s3 = s2.activate("name", &cols);
        assert_eq!(s3, SortState::Unsorted);
        assert_eq!(s3.column(), None);
        assert_eq!(s3.direction(), None);
    }

    #[test]
    fn another_column_resets_to_ascending() {
        let cols = columns();
        let state = sorted("name", SortDirection::Descending).activate("salary", &cols);
        assert_eq!(state, sorted("salary", SortDirection::Ascending));
    }

    #[test]
    fn non_sortable_and_unknown_columns_are_ignored() {
        let cols = columns();
        let state = sorted("name", SortDirection::Ascending);
        assert_eq!(state.activate("email", &cols), state);
        assert_eq!(state.activate("nope", &cols), state);
        assert_eq!(SortState::Unsorted.activate("email", &cols), SortState::Unsorted);
    }

    #[test]
    fn passthrough_for_unknown_or_unsortable_active_column() {
        let rows = vec![
            record([("name", "C".into()), ("email", "a".into())]),
            record([("name", "A".into()), ("email", "b".into())]),
        ];
        let cols = columns();
        assert_eq!(sort_order(&rows, &cols, &sorted("email", SortDirection::Descending)), [0, 1]);
        assert_eq!(sort_order(&rows, &cols, &sorted("gone", SortDirection::Ascending)), [0, 1]);
    }

    #[test]
    fn descending_reverses_and_missing_values_trail_both_ways() {
        let rows = vec![
            record([("name", "n1".into()), ("salary", 300.into())]),
            record([("name", "n2".into())]),
            record([("name", "n3".into()), ("salary", 100.into())]),
            record([("name", "n4".into()), ("salary", 200.into())]),
        ];
        let cols = columns();
        let asc = sort_order(&rows, &cols, &sorted("salary", SortDirection::Ascending));
        let desc = sort_order(&rows, &cols, &sorted("salary", SortDirection::Descending));
        assert_eq!(asc, [2, 3, 0, 1]);
        assert_eq!(desc, [0, 3, 2, 1]);

        let mut present_asc = asc[..3].to_vec();
        present_asc.reverse();
        assert_eq!(present_asc, desc[..3]);
    }

    #[test]
    fn sorting_sorted_input_again_is_a_no_op() {
        let rows = vec![
            record([("name", "A".into())]),
            record([("name", "b".into())]),
            record([("name", "C".into())]),
        ];
        let cols = columns();
        assert_eq!(sort_order(&rows, &cols, &sorted("name", SortDirection::Ascending)), [0, 1, 2]);
    }

    #[test]
    fn three_clicks_restore_original_order() {
        let rows = vec![
            record([("name", "Carol".into())]),
            record([("name", "alice".into())]),
            record([("name", "Bob".into())]),
        ];
        let cols = columns();
        let mut state = SortState::Unsorted;
        for _ in 0..3 {
            state = state.activate("name", &cols);
        }
        assert_eq!(sort_order(&rows, &cols, &state), [0, 1, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            record([("name", "x".into()), ("salary", 1.into())]),
            record([("name", "y".into()), ("salary", 1.into())]),
            record([("name", "z".into()), ("salary", 0.into())]),
        ];
        let cols = columns();
        assert_eq!(sort_order(&rows, &cols, &sorted("salary", SortDirection::Ascending)), [2, 0, 1]);
        assert_eq!(sort_order(&rows, &cols, &sorted("salary", SortDirection::Descending)), [0, 1, 2]);
    }

    #[test]
    fn numbers_compare_numerically() {
        let a = Value::Number(9.0);
        let b = Value::Number(10.0);
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Ascending), Ordering::Less);
    }

    #[test]
    fn mixed_values_compare_as_text() {
        let a = Value::Bool(true);
        let b = Value::Text("false".into());
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Ascending), Ordering::Greater);
    }

    fn value_column() -> Vec<Column<Row>> {
        vec![Column::new("v", "V").sortable(true)]
    }

    fn sorted_values(rows: &[Row], direction: SortDirection) -> Vec<Option<Value>> {
        sort_order(rows, &value_column(), &sorted("v", direction))
            .into_iter()
            .map(|i| rows[i].field("v"))
            .collect()
    }

    #[test]
    fn mixed_column_sorts_by_display_text() {
        let rows = vec![
            record([("v", 9.into())]),
            record([("v", 10.into())]),
            record([("v", "5".into())]),
        ];
        let order = sort_order(&rows, &value_column(), &sorted("v", SortDirection::Ascending));
        assert_eq!(order, [1, 2, 0]);
    }

    #[test]
    fn large_mixed_column_sorts_without_panicking() {
        let rows: Vec<Row> = (0..240)
            .map(|i| {
                let n = (i * 37) % 101;
                match i % 5 {
                    0 => record([("v", n.to_string().into())]),
                    1 => record([("name", "missing".into())]),
                    2 => record([("v", (i % 2 == 0).into())]),
                    _ => record([("v", n.into())]),
                }
            })
            .collect();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let values = sorted_values(&rows, direction);
            let present: Vec<String> = values.iter().flatten().map(|v| v.to_string()).collect();
            assert_eq!(present.len(), 192);
            assert!(values[192..].iter().all(Option::is_none));
            for pair in present.windows(2) {
                let ord = locale_cmp(&pair[0], &pair[1]);
                match direction {
                    SortDirection::Ascending => assert_ne!(ord, Ordering::Greater),
                    SortDirection::Descending => assert_ne!(ord, Ordering::Less),
                }
            }
        }
    }

    #[test]
    fn nan_sorts_after_numbers_and_before_missing() {
        let rows: Vec<Row> = (0..210)
            .map(|i| match i % 7 {
                0 => record([("v", f64::NAN.into())]),
                1 => record([("name", "missing".into())]),
                _ => record([("v", ((i * 53) % 97).into())]),
            })
            .collect();
        let values = sorted_values(&rows, SortDirection::Ascending);
        let numbers: Vec<f64> = values
            .iter()
            .map_while(|v| match v {
                Some(Value::Number(n)) if !n.is_nan() => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(numbers.len(), 150);
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
        assert!(values[150..180]
            .iter()
            .all(|v| matches!(v, Some(Value::Number(n)) if n.is_nan())));
        assert!(values[180..].iter().all(Option::is_none));

        let desc = sorted_values(&rows, SortDirection::Descending);
        assert!(desc[..30].iter().all(|v| matches!(v, Some(Value::Number(n)) if n.is_nan())));
        assert!(desc[180..].iter().all(Option::is_none));
    }

    #[test]
    fn locale_ordering_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("ada", "Ada"), Ordering::Less);
        assert_eq!(locale_cmp("Ada", "ada"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
