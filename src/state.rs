use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::analysis::profile::{ProfileLine, fit_profile};
use crate::analysis::quadrant::{QuadrantGroups, partition};
use crate::color::ColorMap;
use crate::config::Settings;
use crate::data::filter::{
    FilterState, Selection, SelectionMode, apply_filter, filtered_indices, options_for,
};
use crate::data::model::{AthleteKey, FilterColumn, FilterValue, FvDataset, TestRecord};

/// A fitted profile line and the athlete it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteProfile {
    pub athlete: String,
    pub line: ProfileLine,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one viewer session owns, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<FvDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Per-column filter selections, athlete selection included.
    pub filters: FilterState,

    /// Rows passing team → position → sprint → date (cached).
    pub visible_indices: Vec<usize>,

    /// Visible rows of the selected athletes (cached). Empty while no athlete
    /// is selected.
    pub athlete_indices: Vec<usize>,

    /// Colours of the selected athletes.
    pub color_map: ColorMap,

    /// Whether athlete names are drawn next to quadrant points.
    pub show_labels: bool,

    pub settings: Settings,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            dataset: None,
            source: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            athlete_indices: Vec::new(),
            color_map: ColorMap::default(),
            show_labels: settings.show_labels,
            settings,
            status_message: None,
        }
    }

    /// Load `path`, replacing the current dataset on success. On failure the
    /// previous dataset stays and the error is reported in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} test records from {}", dataset.len(), path.display());
                self.set_dataset(dataset, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Install a new dataset and reset every selection.
    pub fn set_dataset(&mut self, dataset: FvDataset, source: Option<PathBuf>) {
        self.filters = FilterState::default();
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// The column currently identifying athletes.
    pub fn athlete_column(&self) -> FilterColumn {
        self.settings.athlete_key.column()
    }

    pub fn mode_for(&self, column: FilterColumn) -> SelectionMode {
        match column {
            FilterColumn::Sprint => self.settings.sprint_selection,
            FilterColumn::Date => self.settings.date_selection,
            _ => SelectionMode::Multiple,
        }
    }

    /// Recompute the cached views after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.athlete_indices.clear();
            return;
        };

        self.visible_indices = filtered_indices(ds, &self.filters);
        let column = self.settings.athlete_key.column();
        self.athlete_indices = match self.filters.selection(column) {
            Some(selected) if !selected.is_empty() => {
                apply_filter(ds, &self.visible_indices, column, selected)
            }
            _ => Vec::new(),
        };

        let key = self.settings.athlete_key;
        let names: BTreeSet<String> = self
            .athlete_indices
            .iter()
            .map(|&i| ds.records[i].athlete(key).to_string())
            .collect();
        self.color_map = ColorMap::new(&names);

        log::debug!(
            "{} of {} rows visible, {} athlete rows",
            self.visible_indices.len(),
            ds.len(),
            self.athlete_indices.len()
        );
    }

    /// Values offered by the widget of `column`.
    pub fn options(&self, column: FilterColumn) -> Selection {
        self.dataset
            .as_ref()
            .map(|ds| options_for(ds, &self.filters, column))
            .unwrap_or_default()
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &FilterValue) {
        let mode = self.mode_for(column);
        self.filters.toggle(column, value, mode);
        self.refilter();
    }

    /// Select every value currently offered for `column`.
    pub fn select_all(&mut self, column: FilterColumn) {
        let options = self.options(column);
        self.filters.set(column, options);
        self.refilter();
    }

    /// Clear the selection of `column` (no filtering on it).
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.clear(column);
        self.refilter();
    }

    /// Switch the athlete identity column. Name selections are dropped since
    /// they no longer refer to the same values.
    pub fn set_athlete_key(&mut self, key: AthleteKey) {
        if self.settings.athlete_key == key {
            return;
        }
        self.settings.athlete_key = key;
        self.filters.clear(FilterColumn::FullName);
        self.filters.clear(FilterColumn::Surname);
        self.refilter();
    }

    /// Switch the cardinality of the sprint or date filter. Going to single
    /// mode keeps at most the first selected value.
    pub fn set_selection_mode(&mut self, column: FilterColumn, mode: SelectionMode) {
        match column {
            FilterColumn::Sprint => self.settings.sprint_selection = mode,
            FilterColumn::Date => self.settings.date_selection = mode,
            _ => return,
        }
        if mode == SelectionMode::Single {
            if let Some(first) = self.filters.selection(column).and_then(|s| s.first()).cloned() {
                self.filters.set(column, [first].into());
            }
        }
        self.refilter();
    }

    // -- Derived views --

    pub fn records(&self, rows: &[usize]) -> Vec<&TestRecord> {
        match &self.dataset {
            Some(ds) => rows.iter().map(|&i| &ds.records[i]).collect(),
            None => Vec::new(),
        }
    }

    /// The visible rows split by quadrant.
    pub fn quadrant_groups(&self) -> QuadrantGroups {
        self.dataset
            .as_ref()
            .map(|ds| partition(ds, &self.visible_indices))
            .unwrap_or_default()
    }

    /// One profile line per selected athlete row. Rows whose profile cannot
    /// be fitted are skipped.
    pub fn profiles(&self) -> Vec<AthleteProfile> {
        let key = self.settings.athlete_key;
        let records = self.records(&self.athlete_indices);
        let labels = profile_labels(&records, key);

        records
            .iter()
            .zip(labels)
            .filter_map(|(rec, label)| {
                let name = rec.athlete(key);
                match fit_profile(label, rec.v0, rec.f0, self.settings.profile_samples) {
                    Ok(line) => Some(AthleteProfile {
                        athlete: name.to_string(),
                        line,
                    }),
                    Err(e) => {
                        log::warn!("Skipping profile of {name}: {e}");
                        None
                    }
                }
            })
            .collect()
    }
}

fn label_counts(labels: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }
    counts
}

fn session_label(rec: &TestRecord) -> String {
    format!("sprint {}, {}", rec.sprint, rec.test_date.format("%d/%m/%Y"))
}

/// Legend labels for a list of test rows, unique within the list. An athlete
/// with one row is named alone; repeated athletes get sprint and date, then
/// team, then an ordinal, until no two labels are equal.
fn profile_labels(records: &[&TestRecord], key: AthleteKey) -> Vec<String> {
    let names: Vec<String> = records.iter().map(|rec| rec.athlete(key).to_string()).collect();
    let counts = label_counts(&names);
    let with_session: Vec<String> = records
        .iter()
        .zip(&names)
        .map(|(rec, name)| match counts[name.as_str()] {
            1 => name.clone(),
            _ => format!("{name} ({})", session_label(rec)),
        })
        .collect();

    let counts = label_counts(&with_session);
    let with_team: Vec<String> = records
        .iter()
        .zip(&with_session)
        .map(|(rec, label)| match counts[label.as_str()] {
            1 => label.clone(),
            _ => format!("{} ({}, {})", rec.athlete(key), rec.team, session_label(rec)),
        })
        .collect();

    let counts = label_counts(&with_team);
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    with_team
        .iter()
        .map(|label| {
            if counts[label.as_str()] == 1 {
                return label.clone();
            }
            let nth = seen.entry(label.as_str()).or_default();
            *nth += 1;
            format!("{label} #{nth}")
        })
        .collect()
}
