use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::model::{FilterColumn, FilterValue, FvDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per column
// ---------------------------------------------------------------------------

/// Permitted values for one column. Empty means "no filter" (show all).
pub type Selection = BTreeSet<FilterValue>;

/// How many values a filter widget may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Multiple,
    Single,
}

/// Per-column selection state. A column that is absent or has an empty set
/// does not constrain anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    selections: BTreeMap<FilterColumn, Selection>,
}

impl FilterState {
    /// The current selection for `column` (empty when unfiltered).
    pub fn selection(&self, column: FilterColumn) -> Option<&Selection> {
        self.selections.get(&column)
    }

    pub fn is_selected(&self, column: FilterColumn, value: &FilterValue) -> bool {
        self.selections
            .get(&column)
            .is_some_and(|sel| sel.contains(value))
    }

    /// Whether `column` currently narrows anything.
    pub fn is_active(&self, column: FilterColumn) -> bool {
        self.selections.get(&column).is_some_and(|sel| !sel.is_empty())
    }

    /// Flip `value` in the selection of `column`.
    ///
    /// In [`SelectionMode::Single`] picking a new value replaces the selection
    /// and picking the selected value again clears it.
    pub fn toggle(&mut self, column: FilterColumn, value: &FilterValue, mode: SelectionMode) {
        let selected = self.selections.entry(column).or_default();
        if selected.contains(value) {
            selected.remove(value);
            return;
        }
        if mode == SelectionMode::Single {
            selected.clear();
        }
        selected.insert(value.clone());
    }

    /// Replace the selection of `column` wholesale.
    pub fn set(&mut self, column: FilterColumn, values: Selection) {
        self.selections.insert(column, values);
    }

    pub fn clear(&mut self, column: FilterColumn) {
        self.selections.remove(&column);
    }
}

// ---------------------------------------------------------------------------
// Filter chain
// ---------------------------------------------------------------------------

/// Keep the rows of `rows` whose `column` value is in `selected`, preserving
/// order. An empty selection returns `rows` unchanged.
pub fn apply_filter(
    dataset: &FvDataset,
    rows: &[usize],
    column: FilterColumn,
    selected: &Selection,
) -> Vec<usize> {
    if selected.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .copied()
        .filter(|&i| dataset.records[i].matches(column, selected))
        .collect()
}

/// Run `rows` through the chain columns that precede `stop` (all of them when
/// `stop` is not a chain column).
fn apply_chain_until(
    dataset: &FvDataset,
    filters: &FilterState,
    stop: Option<FilterColumn>,
) -> Vec<usize> {
    let mut rows = dataset.all_rows();
    for column in FilterColumn::CHAIN {
        if Some(column) == stop {
            break;
        }
        if let Some(selected) = filters.selection(column) {
            rows = apply_filter(dataset, &rows, column, selected);
        }
    }
    rows
}

/// Indices of records passing team → position → sprint → date.
pub fn filtered_indices(dataset: &FvDataset, filters: &FilterState) -> Vec<usize> {
    apply_chain_until(dataset, filters, None)
}

/// Values offered for `column`: the distinct values left once the filters
/// before it in the chain are applied. Athlete columns see the whole chain.
pub fn options_for(dataset: &FvDataset, filters: &FilterState, column: FilterColumn) -> Selection {
    let stop = FilterColumn::CHAIN.contains(&column).then_some(column);
    apply_chain_until(dataset, filters, stop)
        .into_iter()
        .map(|i| dataset.records[i].value(column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::Sprint;

    fn sample() -> FvDataset {
        let mut recs = vec![
            record("A", "Winger", "DUPONT Jean", 9.5, 7.9),
            record("B", "Centre", "MARTIN Paul", 9.1, 8.2),
            record("A", "Centre", "DURAND Luc", 8.7, 7.1),
            record("A", "Winger", "LEROY Marc", 9.9, 6.8),
            record("B", "Prop", "PETIT Hugo", 7.9, 9.0),
        ];
        recs[3].sprint = Sprint::Number(2);
        FvDataset::from_records(recs)
    }

    fn text(values: &[&str]) -> Selection {
        values.iter().map(|v| FilterValue::Text(v.to_string())).collect()
    }

    #[test]
    fn empty_selection_is_identity() {
        let ds = sample();
        let rows = vec![4, 0, 2];
        assert_eq!(apply_filter(&ds, &rows, FilterColumn::Team, &Selection::new()), rows);
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let ds = sample();
        let rows = apply_filter(&ds, &ds.all_rows(), FilterColumn::Team, &text(&["A"]));
        assert_eq!(rows, vec![0, 2, 3]);
    }

    #[test]
    fn filter_is_idempotent() {
        let ds = sample();
        let sel = text(&["Centre", "Prop"]);
        let once = apply_filter(&ds, &ds.all_rows(), FilterColumn::Position, &sel);
        let twice = apply_filter(&ds, &once, FilterColumn::Position, &sel);
        assert_eq!(once, twice);
        assert_eq!(once, vec![1, 2, 4]);
    }

    #[test]
    fn team_only_ignores_position() {
        let ds = sample();
        let mut filters = FilterState::default();
        filters.set(FilterColumn::Team, text(&["A"]));
        filters.set(FilterColumn::Position, Selection::new());
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2, 3]);
    }

    #[test]
    fn chain_composes_columns() {
        let ds = sample();
        let mut filters = FilterState::default();
        filters.set(FilterColumn::Team, text(&["A"]));
        filters.set(FilterColumn::Position, text(&["Winger"]));
        filters.set(FilterColumn::Sprint, [FilterValue::Integer(2)].into());
        assert_eq!(filtered_indices(&ds, &filters), vec![3]);

        filters.set(FilterColumn::Team, text(&["B"]));
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn options_cascade_from_earlier_filters() {
        let ds = sample();
        let mut filters = FilterState::default();
        filters.set(FilterColumn::Team, text(&["B"]));

        assert_eq!(
            options_for(&ds, &filters, FilterColumn::Position),
            text(&["Centre", "Prop"])
        );
        // The team widget itself still lists every team.
        assert_eq!(options_for(&ds, &filters, FilterColumn::Team), text(&["A", "B"]));
        assert_eq!(
            options_for(&ds, &filters, FilterColumn::FullName),
            text(&["MARTIN Paul", "PETIT Hugo"])
        );
    }

    #[test]
    fn single_mode_replaces_selection() {
        let mut filters = FilterState::default();
        let one = FilterValue::Integer(1);
        let two = FilterValue::Integer(2);

        filters.toggle(FilterColumn::Sprint, &one, SelectionMode::Single);
        filters.toggle(FilterColumn::Sprint, &two, SelectionMode::Single);
        let expected: Selection = [two.clone()].into();
        assert_eq!(filters.selection(FilterColumn::Sprint), Some(&expected));

        filters.toggle(FilterColumn::Sprint, &two, SelectionMode::Single);
        assert!(!filters.is_active(FilterColumn::Sprint));
    }

    #[test]
    fn multiple_mode_accumulates() {
        let mut filters = FilterState::default();
        let a = FilterValue::Text("A".into());
        let b = FilterValue::Text("B".into());
        filters.toggle(FilterColumn::Team, &a, SelectionMode::Multiple);
        filters.toggle(FilterColumn::Team, &b, SelectionMode::Multiple);
        assert!(filters.is_selected(FilterColumn::Team, &a));
        assert!(filters.is_selected(FilterColumn::Team, &b));

        filters.clear(FilterColumn::Team);
        assert!(filters.selection(FilterColumn::Team).is_none());
    }
}
