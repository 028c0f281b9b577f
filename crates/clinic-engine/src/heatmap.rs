//! No-show counts by department and age bin.

use std::collections::BTreeMap;

use clinic_model::{AgeBin, Appointment, Department};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::view::FilteredView;

/// One non-zero heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub department: Department,
    pub age_bin: AgeBin,
    pub count: usize,
}

/// Sparse `(department, age_bin) -> count` map.
///
/// Keys are ordered by department then bin. Cells that were never hit are
/// absent and read as zero through [`Heatmap::get`]. Records whose age falls
/// outside every bin are tallied in `unbinned` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    cells: BTreeMap<(Department, AgeBin), usize>,
    unbinned: usize,
}

impl Heatmap {
    /// Count every record given, regardless of status.
    pub fn from_records<'r>(records: impl IntoIterator<Item = &'r Appointment>) -> Self {
        let mut heatmap = Self::default();
        for record in records {
            match AgeBin::from_age(record.age) {
                Some(bin) => *heatmap.cells.entry((record.department, bin)).or_default() += 1,
                None => heatmap.unbinned += 1,
            }
        }
        heatmap
    }

    /// Count the No-Show rows of `view`.
    pub fn no_shows(view: &FilteredView<'_>) -> Self {
        Self::from_records(view.records().filter(|r| r.is_no_show()))
    }

    pub fn get(&self, department: Department, age_bin: AgeBin) -> usize {
        self.cells.get(&(department, age_bin)).copied().unwrap_or(0)
    }

    /// Sum of all binned cells.
    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    pub fn unbinned(&self) -> usize {
        self.unbinned
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of non-zero cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn max_count(&self) -> usize {
        self.cells.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        self.cells
            .iter()
            .map(|(&(department, age_bin), &count)| HeatmapCell {
                department,
                age_bin,
                count,
            })
    }

    pub fn cells(&self) -> Vec<HeatmapCell> {
        self.iter().collect()
    }

    /// Every department by every bin, zeros included.
    pub fn dense_grid(&self) -> Vec<(Department, [usize; AgeBin::ALL.len()])> {
        Department::ALL
            .iter()
            .map(|&department| {
                let row = AgeBin::ALL.map(|bin| self.get(department, bin));
                (department, row)
            })
            .collect()
    }
}

impl Serialize for Heatmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Heatmap", 3)?;
        state.serialize_field("cells", &self.cells())?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("unbinned", &self.unbinned)?;
        state.end()
    }
}
