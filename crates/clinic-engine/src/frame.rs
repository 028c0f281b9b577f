//! Materialize views as polars frames.

use clinic_ingest::{names, wait_time_column};
use clinic_model::RecordTable;
use polars::prelude::*;

use crate::view::FilteredView;

/// Build a frame holding the rows of `view`, in view order.
///
/// Required columns are always written; optional ones only when the source
/// table had them. Column names use the canonical snake_case spelling.
pub fn view_to_frame(view: &FilteredView<'_>) -> PolarsResult<DataFrame> {
    let table = view.table();
    let present = table.columns();
    let records: Vec<_> = view.records().collect();

    let mut columns = vec![
        Series::new(
            names::APPOINTMENT_ID.into(),
            records.iter().map(|r| r.appointment_id).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            names::AGE.into(),
            records.iter().map(|r| r.age).collect::<Vec<u32>>(),
        )
        .into_column(),
    ];
    if present.gender {
        columns.push(
            Series::new(
                names::GENDER.into(),
                records.iter().map(|r| r.gender.clone()).collect::<Vec<Option<String>>>(),
            )
            .into_column(),
        );
    }
    columns.push(
        Series::new(
            names::DEPARTMENT.into(),
            records
                .iter()
                .map(|r| r.department.as_str())
                .collect::<Vec<&str>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            wait_time_column(table.wait_unit()).into(),
            records.iter().map(|r| r.wait_time).collect::<Vec<u32>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            names::STATUS.into(),
            records.iter().map(|r| r.status.as_str()).collect::<Vec<&str>>(),
        )
        .into_column(),
    );
    if present.previous_no_shows {
        columns.push(
            Series::new(
                names::PREVIOUS_NO_SHOWS.into(),
                records
                    .iter()
                    .map(|r| r.previous_no_shows)
                    .collect::<Vec<Option<u32>>>(),
            )
            .into_column(),
        );
    }
    if present.insurance {
        columns.push(
            Series::new(
                names::INSURANCE.into(),
                records
                    .iter()
                    .map(|r| r.insurance.clone())
                    .collect::<Vec<Option<String>>>(),
            )
            .into_column(),
        );
    }
    if present.chronic_condition {
        columns.push(
            Series::new(
                names::CHRONIC_CONDITION.into(),
                records
                    .iter()
                    .map(|r| r.chronic_condition)
                    .collect::<Vec<Option<bool>>>(),
            )
            .into_column(),
        );
    }
    if present.sms_received {
        columns.push(
            Series::new(
                names::SMS_RECEIVED.into(),
                records
                    .iter()
                    .map(|r| r.sms_received)
                    .collect::<Vec<Option<bool>>>(),
            )
            .into_column(),
        );
    }

    DataFrame::new(columns)
}

pub fn table_to_frame(table: &RecordTable) -> PolarsResult<DataFrame> {
    view_to_frame(&FilteredView::all(table))
}
