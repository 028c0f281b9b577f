use clinic_model::{Appointment, RecordTable};

/// A filtered, order-preserving view over a [`RecordTable`].
///
/// The view stores row indices into the table rather than copies, so every
/// column of the source stays reachable through [`FilteredView::records`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a RecordTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view containing every row of `table`.
    pub fn all(table: &'a RecordTable) -> Self {
        Self {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    /// Indices must be ascending and in range; callers inside the crate
    /// only derive them from existing views.
    pub(crate) fn from_indices(table: &'a RecordTable, indices: Vec<usize>) -> Self {
        Self { table, indices }
    }

    pub fn table(&self) -> &'a RecordTable {
        self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Appointment> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&idx| &records[idx])
    }

    /// First `n` rows of the view.
    pub fn head(&self, n: usize) -> Vec<&'a Appointment> {
        self.records().take(n).collect()
    }

    /// Appointment ids in view order.
    pub fn appointment_ids(&self) -> Vec<i64> {
        self.records().map(|r| r.appointment_id).collect()
    }

    /// Narrow the view to rows satisfying `predicate`, keeping order.
    pub fn subset<F>(&self, mut predicate: F) -> FilteredView<'a>
    where
        F: FnMut(&Appointment) -> bool,
    {
        let records = self.table.records();
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&idx| predicate(&records[idx]))
            .collect();
        Self::from_indices(self.table, indices)
    }

    /// Rows whose status is No-Show.
    pub fn no_shows(&self) -> FilteredView<'a> {
        self.subset(Appointment::is_no_show)
    }
}
