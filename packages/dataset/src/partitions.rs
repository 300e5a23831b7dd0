//! Column-wise partitioned CSV tables.
//!
//! The arrest table is split into several files that each hold a subset of
//! the columns. Every file's first column is the shared row index; joining
//! lines rows up by that index and concatenates their remaining columns.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::DatasetError;

/// One partition file, split into its index column and data columns.
#[derive(Debug, Clone)]
pub struct Partition {
    path: PathBuf,
    columns: Vec<String>,
    index: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Partition {
    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The partitions joined into a single header row plus data rows.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    /// Column names of the joined table.
    pub headers: StringRecord,
    /// Joined rows, in the first partition's order.
    pub rows: Vec<StringRecord>,
    /// File each column was taken from, for error reporting.
    pub sources: Vec<PathBuf>,
}

/// Reads a partition file whose first column is the row index.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or parsed, or has no
/// index column.
pub fn read_partition(path: &Path) -> Result<Partition, DatasetError> {
    let csv_err = |source| DatasetError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.is_empty() {
        return Err(DatasetError::PartitionMismatch {
            path: path.display().to_string(),
            message: "file contains no header row".to_string(),
        });
    }

    let mut index = Vec::new();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        index.push(record.get(0).unwrap_or_default().trim().to_owned());
        rows.push(record.iter().skip(1).collect::<StringRecord>());
    }

    log::debug!(
        "Read {} rows x {} columns from {}",
        rows.len(),
        headers.len() - 1,
        path.display()
    );

    Ok(Partition {
        path: path.to_path_buf(),
        columns: headers.into_iter().skip(1).collect(),
        index,
        rows,
    })
}

/// Joins partitions column-wise on their shared index.
///
/// A column name already contributed by an earlier partition is skipped.
///
/// # Errors
///
/// Returns [`DatasetError::PartitionMismatch`] if the partitions disagree
/// on row count or index labels, and [`DatasetError::Empty`] if no
/// partitions are given.
pub fn join_partitions(partitions: &[Partition]) -> Result<JoinedTable, DatasetError> {
    let (base, rest) = partitions
        .split_first()
        .ok_or(DatasetError::Empty { what: "arrest partitions" })?;

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut headers = StringRecord::new();
    let mut sources = Vec::new();
    // For each partition: which of its column positions survive the join.
    let mut kept: Vec<Vec<usize>> = Vec::with_capacity(partitions.len());

    for partition in partitions {
        let mut keep = Vec::new();
        for (pos, column) in partition.columns.iter().enumerate() {
            if seen.insert(column.as_str()) {
                headers.push_field(column);
                sources.push(partition.path.clone());
                keep.push(pos);
            } else {
                log::debug!(
                    "Skipping duplicate column '{column}' from {}",
                    partition.path.display()
                );
            }
        }
        kept.push(keep);
    }

    // Position of each base index label within every other partition.
    let mut alignments: Vec<Vec<usize>> = Vec::with_capacity(rest.len());
    for partition in rest {
        if partition.len() != base.len() {
            return Err(DatasetError::PartitionMismatch {
                path: partition.path.display().to_string(),
                message: format!(
                    "{} rows, but {} has {}",
                    partition.len(),
                    base.path.display(),
                    base.len()
                ),
            });
        }

        let positions: HashMap<&str, usize> = partition
            .index
            .iter()
            .enumerate()
            .map(|(pos, label)| (label.as_str(), pos))
            .collect();

        let alignment = base
            .index
            .iter()
            .map(|label| {
                positions
                    .get(label.as_str())
                    .copied()
                    .ok_or_else(|| DatasetError::PartitionMismatch {
                        path: partition.path.display().to_string(),
                        message: format!("index label '{label}' is missing"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        alignments.push(alignment);
    }

    let rows = (0..base.len())
        .map(|row| {
            let mut joined = StringRecord::with_capacity(0, headers.len());
            for &pos in &kept[0] {
                joined.push_field(base.rows[row].get(pos).unwrap_or_default());
            }
            for ((partition, alignment), keep) in rest.iter().zip(&alignments).zip(&kept[1..]) {
                let source = &partition.rows[alignment[row]];
                for &pos in keep {
                    joined.push_field(source.get(pos).unwrap_or_default());
                }
            }
            joined
        })
        .collect();

    Ok(JoinedTable {
        headers,
        rows,
        sources,
    })
}
