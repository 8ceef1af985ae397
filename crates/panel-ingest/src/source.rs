//! Year table sources and the per-group loader.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use panel_model::{YearColumn, YearTable};

use crate::csv::{ExtractRef, read_raw_table};
use crate::error::{IngestError, Result};
use crate::labels::load_value_labels;
use crate::layout::SourceLayout;
use crate::typing::type_column;

/// Produces the table for one group and year.
///
/// `year_index` is the 1-based position of `year_label` in the requested
/// sequence and must be stamped on the returned table.
pub trait YearTableSource: Sync {
    fn load_year(&self, group: &str, year_label: &str, year_index: usize) -> Result<YearTable>;
}

/// Reads CSV extracts laid out according to a [`SourceLayout`].
#[derive(Debug, Clone)]
pub struct CsvSource {
    layout: SourceLayout,
}

impl CsvSource {
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }
}

impl YearTableSource for CsvSource {
    fn load_year(&self, group: &str, year_label: &str, year_index: usize) -> Result<YearTable> {
        let path = self.layout.data_path(group, year_label);
        let extract = ExtractRef {
            group,
            year_label,
            path: &path,
        };
        if !path.is_file() {
            return Err(extract.not_found());
        }

        let raw = read_raw_table(&extract, &self.layout)?;
        let labels_path = self.layout.labels_path(&path);
        let labels = load_value_labels(&labels_path)?;

        let mut columns = Vec::with_capacity(raw.headers.len());
        for (name, values) in raw.headers.into_iter().zip(raw.columns) {
            let data = type_column(values, labels.get(&name));
            if data.is_all_missing() {
                warn!(
                    group,
                    year_label,
                    column = %name,
                    type_tag = %data.type_tag(),
                    "Column has no values; its default type may be reported as type drift"
                );
            }
            columns.push(YearColumn::new(name, data));
        }

        for variable in labels.keys() {
            if !columns.iter().any(|c| &c.name == variable) {
                debug!(
                    group,
                    year_label,
                    variable = %variable,
                    "Value labels declared for a column not in the extract"
                );
            }
        }

        YearTable::new(year_index, year_label, columns)
            .map_err(|e| extract.format_error(e.to_string()))
    }
}

/// Loads every year of one file group, in the order of `year_labels`.
///
/// With `parallel` set, years load on the rayon pool; the result order is
/// still that of `year_labels`. Any failed year fails the whole group, and
/// the error reported is that of the earliest failing year.
pub fn load_years<S>(
    source: &S,
    group: &str,
    year_labels: &[String],
    parallel: bool,
) -> Result<Vec<YearTable>>
where
    S: YearTableSource + ?Sized,
{
    let span = info_span!("load", group, years = year_labels.len());
    let _guard = span.enter();
    let start = Instant::now();

    let load_one = |(idx, label): (usize, &String)| -> Result<YearTable> {
        let table = source.load_year(group, label, idx + 1)?;
        debug!(
            group,
            year_label = %label,
            rows = table.height(),
            columns = table.width(),
            "Loaded year table"
        );
        Ok(table)
    };

    let results: Vec<Result<YearTable>> = if parallel {
        year_labels.par_iter().enumerate().map(load_one).collect()
    } else {
        year_labels.iter().enumerate().map(load_one).collect()
    };
    let tables = results.into_iter().collect::<Result<Vec<_>>>()?;

    if let Some(table) = tables
        .iter()
        .enumerate()
        .find(|(idx, table)| table.year_index() != idx + 1)
        .map(|(_, table)| table)
    {
        return Err(IngestError::InvalidSource {
            group: group.to_string(),
            year_label: table.year_label().to_string(),
            message: format!("source stamped year index {}", table.year_index()),
        });
    }

    info!(
        group,
        years = tables.len(),
        rows = tables.iter().map(YearTable::height).sum::<usize>(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(tables)
}
