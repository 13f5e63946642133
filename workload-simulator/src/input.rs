//! Workload file handling
//!
//! A workload is stored as two CSV files: the operations file given on the
//! command line (`kind,a,b` rows, where `kind` is `range` or `update`) and a
//! sibling array file (`index,value` rows) named `<stem>.array.csv`.

use crate::models::{ArrayRow, Operation, OperationRow, Workload};
use num_bigint::BigUint;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading, writing or replaying workloads
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}: row {row}: {message}")]
    Parse {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error(transparent)]
    Memo(#[from] range_memo::Error),

    #[error("strategy {strategy} answered {got} for [{low}, {high}], expected {expected}")]
    Mismatch {
        strategy: &'static str,
        low: usize,
        high: usize,
        expected: u64,
        got: u64,
    },

    #[error("splay memo answered fib({n}) = {got}, lru memo answered {expected}")]
    FibMismatch {
        n: u64,
        expected: BigUint,
        got: BigUint,
    },

    #[error("invalid workload parameter: {0}")]
    InvalidConfig(String),
}

/// Path of the array file stored next to an operations file
pub fn array_path(ops_path: &Path) -> PathBuf {
    let stem = ops_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workload".to_string());
    ops_path.with_file_name(format!("{stem}.array.csv"))
}

/// Write `workload` to `ops_path` and its sibling array file
pub fn write_workload(workload: &Workload, ops_path: &Path) -> Result<(), WorkloadError> {
    let mut writer = csv::Writer::from_path(ops_path)?;
    for op in &workload.operations {
        let row = match *op {
            Operation::RangeQuery { low, high } => OperationRow {
                kind: op.kind().to_string(),
                a: low as u64,
                b: high as u64,
            },
            Operation::PointUpdate { index, value } => OperationRow {
                kind: op.kind().to_string(),
                a: index as u64,
                b: value,
            },
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(array_path(ops_path))?;
    for (index, &value) in workload.array.iter().enumerate() {
        writer.serialize(ArrayRow { index, value })?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a workload previously written by [`write_workload`]
///
/// Array rows must be dense and in index order. Operations are checked against
/// the array length so a replay never goes out of bounds.
pub fn read_workload(ops_path: &Path) -> Result<Workload, WorkloadError> {
    let array_file = array_path(ops_path);
    let mut array = Vec::new();
    let mut reader = csv::Reader::from_path(&array_file)?;
    for (row, record) in reader.deserialize::<ArrayRow>().enumerate() {
        let record = record?;
        if record.index != row {
            return Err(parse_error(
                &array_file,
                row,
                format!("expected index {row}, found {}", record.index),
            ));
        }
        array.push(record.value);
    }

    let len = array.len();
    let mut operations = Vec::new();
    let mut reader = csv::Reader::from_path(ops_path)?;
    for (row, record) in reader.deserialize::<OperationRow>().enumerate() {
        let record = record?;
        let a = to_index(record.a, ops_path, row)?;
        let op = match record.kind.trim() {
            "range" => {
                let b = to_index(record.b, ops_path, row)?;
                if a > b || b >= len {
                    return Err(parse_error(
                        ops_path,
                        row,
                        format!("range [{a}, {b}] is not within an array of {len}"),
                    ));
                }
                Operation::RangeQuery { low: a, high: b }
            }
            "update" => {
                if a >= len {
                    return Err(parse_error(
                        ops_path,
                        row,
                        format!("index {a} is not within an array of {len}"),
                    ));
                }
                Operation::PointUpdate {
                    index: a,
                    value: record.b,
                }
            }
            other => {
                return Err(parse_error(
                    ops_path,
                    row,
                    format!("unknown operation kind '{other}'"),
                ))
            }
        };
        operations.push(op);
    }

    Ok(Workload { array, operations })
}

fn to_index(value: u64, path: &Path, row: usize) -> Result<usize, WorkloadError> {
    usize::try_from(value)
        .map_err(|_| parse_error(path, row, format!("{value} does not fit in usize")))
}

fn parse_error(path: &Path, row: usize, message: String) -> WorkloadError {
    WorkloadError::Parse {
        path: path.to_path_buf(),
        row,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{WorkloadConfig, WorkloadGenerator};
    use std::fs;

    /// Helper function to create a temp directory for tests
    fn create_temp_dir(test_name: &str) -> PathBuf {
        let temp_dir = std::env::temp_dir().join(format!("workload_input_test_{test_name}"));
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        temp_dir
    }

    #[test]
    fn test_array_path_is_sibling() {
        assert_eq!(
            array_path(Path::new("/tmp/run/ops.csv")),
            PathBuf::from("/tmp/run/ops.array.csv")
        );
    }

    #[test]
    fn test_written_workload_reads_back() {
        let dir = create_temp_dir("read_back");
        let path = dir.join("workload.csv");
        let workload = WorkloadGenerator::new(WorkloadConfig {
            array_len: 20,
            queries: 100,
            seed: Some(11),
            ..Default::default()
        })
        .unwrap()
        .generate();

        write_workload(&workload, &path).unwrap();
        assert!(array_path(&path).exists());
        assert_eq!(read_workload(&path).unwrap(), workload);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_out_of_bounds_operation_is_rejected() {
        let dir = create_temp_dir("out_of_bounds");
        let path = dir.join("bad.csv");
        fs::write(array_path(&path), "index,value\n0,5\n1,6\n").unwrap();
        fs::write(&path, "kind,a,b\nrange,0,1\nupdate,2,9\n").unwrap();

        match read_workload(&path) {
            Err(WorkloadError::Parse { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let dir = create_temp_dir("unknown_kind");
        let path = dir.join("bad.csv");
        fs::write(array_path(&path), "index,value\n0,5\n").unwrap();
        fs::write(&path, "kind,a,b\ndelete,0,0\n").unwrap();

        let err = read_workload(&path).unwrap_err();
        assert!(err.to_string().contains("unknown operation kind 'delete'"));
        let _ = fs::remove_dir_all(&dir);
    }
}
