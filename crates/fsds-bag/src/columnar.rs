//! Parquet encoding of the row types.
//!
//! Each table is written as a single record batch. Text columns are `Utf8`,
//! `YYYYMMDD` dates and small codes are `Int32`, `cik` is `Int64` and fact
//! values are `Float64`. Reading checks names and types and rejects nulls in
//! columns the row type requires.

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
  array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray},
  datatypes::{DataType, Field, Schema, SchemaRef},
  record_batch::RecordBatch,
};
use fsds_core::{
  SubmissionHeader,
  record::{NumRecord, PreNumRecord, PreRecord, SubmissionRecord},
};
use parquet::arrow::{ArrowWriter, arrow_reader::ParquetRecordBatchReaderBuilder};
use tracing::debug;

use crate::{Error, Result};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A row type with a fixed Arrow schema.
pub trait ColumnarRecord: Sized {
  fn schema() -> SchemaRef;

  /// One array per schema field, in schema order.
  fn to_columns(rows: &[Self]) -> Vec<ArrayRef>;

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>>;
}

/// Write `rows` to a new parquet file at `path`.
pub fn write_parquet<T: ColumnarRecord>(path: &Path, rows: &[T]) -> Result<()> {
  let batch = RecordBatch::try_new(T::schema(), T::to_columns(rows))?;
  let file = File::create(path)?;
  let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
  writer.write(&batch)?;
  writer.close()?;
  debug!("wrote {} rows to {}", rows.len(), path.display());
  Ok(())
}

/// Read every row of the parquet file at `path`.
pub fn read_parquet<T: ColumnarRecord>(path: &Path) -> Result<Vec<T>> {
  let file = File::open(path)?;
  let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
  let mut rows = Vec::new();
  for batch in reader {
    rows.extend(T::from_batch(&batch?)?);
  }
  debug!("read {} rows from {}", rows.len(), path.display());
  Ok(rows)
}

// ─── Column helpers ──────────────────────────────────────────────────────────

fn field(name: &str, data_type: DataType, nullable: bool) -> Field {
  Field::new(name, data_type, nullable)
}

fn utf8<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
  Arc::new(values.map(Some).collect::<StringArray>())
}

fn opt_utf8<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
  Arc::new(values.collect::<StringArray>())
}

fn int32(values: impl Iterator<Item = Option<i32>>) -> ArrayRef {
  Arc::new(values.collect::<Int32Array>())
}

fn int64(values: impl Iterator<Item = Option<i64>>) -> ArrayRef {
  Arc::new(values.collect::<Int64Array>())
}

fn float64(values: impl Iterator<Item = Option<f64>>) -> ArrayRef {
  Arc::new(values.collect::<Float64Array>())
}

/// Look up a column by name and downcast it.
fn column<'a, A: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a A> {
  batch
    .column_by_name(name)
    .ok_or_else(|| Error::MissingColumn(name.to_owned()))?
    .as_any()
    .downcast_ref::<A>()
    .ok_or_else(|| Error::ColumnType(name.to_owned()))
}

/// Like [`column`], but the column must not contain nulls.
fn required<'a, A: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a A> {
  let array = column::<A>(batch, name)?;
  if array.null_count() > 0 {
    return Err(Error::NullValue(name.to_owned()));
  }
  Ok(array)
}

fn opt_string(array: &StringArray, i: usize) -> Option<String> {
  array.is_valid(i).then(|| array.value(i).to_owned())
}

fn opt_i32(array: &Int32Array, i: usize) -> Option<i32> {
  array.is_valid(i).then(|| array.value(i))
}

fn opt_f64(array: &Float64Array, i: usize) -> Option<f64> {
  array.is_valid(i).then(|| array.value(i))
}

// ─── sub.txt ─────────────────────────────────────────────────────────────────

impl ColumnarRecord for SubmissionRecord {
  fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
      field("adsh", DataType::Utf8, false),
      field("cik", DataType::Int64, false),
      field("name", DataType::Utf8, false),
      field("sic", DataType::Int32, true),
      field("countryba", DataType::Utf8, true),
      field("form", DataType::Utf8, false),
      field("period", DataType::Int32, true),
      field("fye", DataType::Utf8, true),
      field("fy", DataType::Int32, true),
      field("fp", DataType::Utf8, true),
      field("filed", DataType::Int32, true),
      field("prevrpt", DataType::Int32, true),
      field("instance", DataType::Utf8, true),
    ]))
  }

  fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
    vec![
      utf8(rows.iter().map(|r| r.adsh.as_str())),
      int64(rows.iter().map(|r| Some(r.cik))),
      utf8(rows.iter().map(|r| r.name.as_str())),
      int32(rows.iter().map(|r| r.sic)),
      opt_utf8(rows.iter().map(|r| r.countryba.as_deref())),
      utf8(rows.iter().map(|r| r.form.as_str())),
      int32(rows.iter().map(|r| r.period)),
      opt_utf8(rows.iter().map(|r| r.fye.as_deref())),
      int32(rows.iter().map(|r| r.fy)),
      opt_utf8(rows.iter().map(|r| r.fp.as_deref())),
      int32(rows.iter().map(|r| r.filed)),
      int32(rows.iter().map(|r| r.prevrpt)),
      opt_utf8(rows.iter().map(|r| r.instance.as_deref())),
    ]
  }

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
    let adsh = required::<StringArray>(batch, "adsh")?;
    let cik = required::<Int64Array>(batch, "cik")?;
    let name = required::<StringArray>(batch, "name")?;
    let sic = column::<Int32Array>(batch, "sic")?;
    let countryba = column::<StringArray>(batch, "countryba")?;
    let form = required::<StringArray>(batch, "form")?;
    let period = column::<Int32Array>(batch, "period")?;
    let fye = column::<StringArray>(batch, "fye")?;
    let fy = column::<Int32Array>(batch, "fy")?;
    let fp = column::<StringArray>(batch, "fp")?;
    let filed = column::<Int32Array>(batch, "filed")?;
    let prevrpt = column::<Int32Array>(batch, "prevrpt")?;
    let instance = column::<StringArray>(batch, "instance")?;

    Ok(
      (0..batch.num_rows())
        .map(|i| SubmissionRecord {
          adsh:      adsh.value(i).to_owned(),
          cik:       cik.value(i),
          name:      name.value(i).to_owned(),
          sic:       opt_i32(sic, i),
          countryba: opt_string(countryba, i),
          form:      form.value(i).to_owned(),
          period:    opt_i32(period, i),
          fye:       opt_string(fye, i),
          fy:        opt_i32(fy, i),
          fp:        opt_string(fp, i),
          filed:     opt_i32(filed, i),
          prevrpt:   opt_i32(prevrpt, i),
          instance:  opt_string(instance, i),
        })
        .collect(),
    )
  }
}

/// Reads the indexer's columns out of a full `sub.txt` parquet file; other
/// columns are ignored.
impl ColumnarRecord for SubmissionHeader {
  fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
      field("adsh", DataType::Utf8, false),
      field("cik", DataType::Int64, false),
      field("name", DataType::Utf8, false),
      field("form", DataType::Utf8, false),
      field("filed", DataType::Int32, true),
      field("period", DataType::Int32, true),
    ]))
  }

  fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
    vec![
      utf8(rows.iter().map(|r| r.adsh.as_str())),
      int64(rows.iter().map(|r| Some(r.cik))),
      utf8(rows.iter().map(|r| r.name.as_str())),
      utf8(rows.iter().map(|r| r.form.as_str())),
      int32(rows.iter().map(|r| r.filed)),
      int32(rows.iter().map(|r| r.period)),
    ]
  }

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
    let adsh = required::<StringArray>(batch, "adsh")?;
    let cik = required::<Int64Array>(batch, "cik")?;
    let name = required::<StringArray>(batch, "name")?;
    let form = required::<StringArray>(batch, "form")?;
    let filed = column::<Int32Array>(batch, "filed")?;
    let period = column::<Int32Array>(batch, "period")?;

    Ok(
      (0..batch.num_rows())
        .map(|i| SubmissionHeader {
          adsh:   adsh.value(i).to_owned(),
          cik:    cik.value(i),
          name:   name.value(i).to_owned(),
          form:   form.value(i).to_owned(),
          filed:  opt_i32(filed, i),
          period: opt_i32(period, i),
        })
        .collect(),
    )
  }
}

// ─── pre.txt ─────────────────────────────────────────────────────────────────

impl ColumnarRecord for PreRecord {
  fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
      field("adsh", DataType::Utf8, false),
      field("report", DataType::Int32, false),
      field("line", DataType::Int32, false),
      field("stmt", DataType::Utf8, false),
      field("inpth", DataType::Int32, false),
      field("rfile", DataType::Utf8, false),
      field("tag", DataType::Utf8, false),
      field("version", DataType::Utf8, false),
      field("plabel", DataType::Utf8, false),
      field("negating", DataType::Int32, false),
    ]))
  }

  fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
    vec![
      utf8(rows.iter().map(|r| r.adsh.as_str())),
      int32(rows.iter().map(|r| Some(r.report))),
      int32(rows.iter().map(|r| Some(r.line))),
      utf8(rows.iter().map(|r| r.stmt.as_str())),
      int32(rows.iter().map(|r| Some(r.inpth))),
      utf8(rows.iter().map(|r| r.rfile.as_str())),
      utf8(rows.iter().map(|r| r.tag.as_str())),
      utf8(rows.iter().map(|r| r.version.as_str())),
      utf8(rows.iter().map(|r| r.plabel.as_str())),
      int32(rows.iter().map(|r| Some(r.negating))),
    ]
  }

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
    let adsh = required::<StringArray>(batch, "adsh")?;
    let report = required::<Int32Array>(batch, "report")?;
    let line = required::<Int32Array>(batch, "line")?;
    let stmt = required::<StringArray>(batch, "stmt")?;
    let inpth = required::<Int32Array>(batch, "inpth")?;
    let rfile = required::<StringArray>(batch, "rfile")?;
    let tag = required::<StringArray>(batch, "tag")?;
    let version = required::<StringArray>(batch, "version")?;
    let plabel = required::<StringArray>(batch, "plabel")?;
    let negating = required::<Int32Array>(batch, "negating")?;

    Ok(
      (0..batch.num_rows())
        .map(|i| PreRecord {
          adsh:     adsh.value(i).to_owned(),
          report:   report.value(i),
          line:     line.value(i),
          stmt:     stmt.value(i).to_owned(),
          inpth:    inpth.value(i),
          rfile:    rfile.value(i).to_owned(),
          tag:      tag.value(i).to_owned(),
          version:  version.value(i).to_owned(),
          plabel:   plabel.value(i).to_owned(),
          negating: negating.value(i),
        })
        .collect(),
    )
  }
}

// ─── num.txt ─────────────────────────────────────────────────────────────────

fn num_fields() -> Vec<Field> {
  vec![
    field("adsh", DataType::Utf8, false),
    field("tag", DataType::Utf8, false),
    field("version", DataType::Utf8, false),
    field("ddate", DataType::Int32, false),
    field("qtrs", DataType::Int32, false),
    field("uom", DataType::Utf8, false),
    field("coreg", DataType::Utf8, true),
    field("value", DataType::Float64, true),
    field("footnote", DataType::Utf8, true),
  ]
}

impl ColumnarRecord for NumRecord {
  fn schema() -> SchemaRef { Arc::new(Schema::new(num_fields())) }

  fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
    vec![
      utf8(rows.iter().map(|r| r.adsh.as_str())),
      utf8(rows.iter().map(|r| r.tag.as_str())),
      utf8(rows.iter().map(|r| r.version.as_str())),
      int32(rows.iter().map(|r| Some(r.ddate))),
      int32(rows.iter().map(|r| Some(r.qtrs))),
      utf8(rows.iter().map(|r| r.uom.as_str())),
      opt_utf8(rows.iter().map(|r| r.coreg.as_deref())),
      float64(rows.iter().map(|r| r.value)),
      opt_utf8(rows.iter().map(|r| r.footnote.as_deref())),
    ]
  }

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
    let adsh = required::<StringArray>(batch, "adsh")?;
    let tag = required::<StringArray>(batch, "tag")?;
    let version = required::<StringArray>(batch, "version")?;
    let ddate = required::<Int32Array>(batch, "ddate")?;
    let qtrs = required::<Int32Array>(batch, "qtrs")?;
    let uom = required::<StringArray>(batch, "uom")?;
    let coreg = column::<StringArray>(batch, "coreg")?;
    let value = column::<Float64Array>(batch, "value")?;
    let footnote = column::<StringArray>(batch, "footnote")?;

    Ok(
      (0..batch.num_rows())
        .map(|i| NumRecord {
          adsh:     adsh.value(i).to_owned(),
          tag:      tag.value(i).to_owned(),
          version:  version.value(i).to_owned(),
          ddate:    ddate.value(i),
          qtrs:     qtrs.value(i),
          uom:      uom.value(i).to_owned(),
          coreg:    opt_string(coreg, i),
          value:    opt_f64(value, i),
          footnote: opt_string(footnote, i),
        })
        .collect(),
    )
  }
}

// ─── Joined ──────────────────────────────────────────────────────────────────

impl ColumnarRecord for PreNumRecord {
  fn schema() -> SchemaRef {
    let mut fields = num_fields();
    fields.extend([
      field("report", DataType::Int32, false),
      field("line", DataType::Int32, false),
      field("stmt", DataType::Utf8, false),
      field("inpth", DataType::Int32, false),
      field("rfile", DataType::Utf8, false),
      field("plabel", DataType::Utf8, false),
      field("negating", DataType::Int32, false),
    ]);
    Arc::new(Schema::new(fields))
  }

  fn to_columns(rows: &[Self]) -> Vec<ArrayRef> {
    vec![
      utf8(rows.iter().map(|r| r.adsh.as_str())),
      utf8(rows.iter().map(|r| r.tag.as_str())),
      utf8(rows.iter().map(|r| r.version.as_str())),
      int32(rows.iter().map(|r| Some(r.ddate))),
      int32(rows.iter().map(|r| Some(r.qtrs))),
      utf8(rows.iter().map(|r| r.uom.as_str())),
      opt_utf8(rows.iter().map(|r| r.coreg.as_deref())),
      float64(rows.iter().map(|r| r.value)),
      opt_utf8(rows.iter().map(|r| r.footnote.as_deref())),
      int32(rows.iter().map(|r| Some(r.report))),
      int32(rows.iter().map(|r| Some(r.line))),
      utf8(rows.iter().map(|r| r.stmt.as_str())),
      int32(rows.iter().map(|r| Some(r.inpth))),
      utf8(rows.iter().map(|r| r.rfile.as_str())),
      utf8(rows.iter().map(|r| r.plabel.as_str())),
      int32(rows.iter().map(|r| Some(r.negating))),
    ]
  }

  fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
    let adsh = required::<StringArray>(batch, "adsh")?;
    let tag = required::<StringArray>(batch, "tag")?;
    let version = required::<StringArray>(batch, "version")?;
    let ddate = required::<Int32Array>(batch, "ddate")?;
    let qtrs = required::<Int32Array>(batch, "qtrs")?;
    let uom = required::<StringArray>(batch, "uom")?;
    let coreg = column::<StringArray>(batch, "coreg")?;
    let value = column::<Float64Array>(batch, "value")?;
    let footnote = column::<StringArray>(batch, "footnote")?;
    let report = required::<Int32Array>(batch, "report")?;
    let line = required::<Int32Array>(batch, "line")?;
    let stmt = required::<StringArray>(batch, "stmt")?;
    let inpth = required::<Int32Array>(batch, "inpth")?;
    let rfile = required::<StringArray>(batch, "rfile")?;
    let plabel = required::<StringArray>(batch, "plabel")?;
    let negating = required::<Int32Array>(batch, "negating")?;

    Ok(
      (0..batch.num_rows())
        .map(|i| PreNumRecord {
          adsh:     adsh.value(i).to_owned(),
          tag:      tag.value(i).to_owned(),
          version:  version.value(i).to_owned(),
          ddate:    ddate.value(i),
          qtrs:     qtrs.value(i),
          uom:      uom.value(i).to_owned(),
          coreg:    opt_string(coreg, i),
          value:    opt_f64(value, i),
          footnote: opt_string(footnote, i),
          report:   report.value(i),
          line:     line.value(i),
          stmt:     stmt.value(i).to_owned(),
          inpth:    inpth.value(i),
          rfile:    rfile.value(i).to_owned(),
          plabel:   plabel.value(i).to_owned(),
          negating: negating.value(i),
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::test_data;

  #[test]
  fn header_reads_subset_of_full_sub_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub.txt.parquet");
    write_parquet(&path, &test_data::sub()).unwrap();

    let headers: Vec<SubmissionHeader> = read_parquet(&path).unwrap();
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[0].adsh, test_data::APPLE);
    assert_eq!(headers[0].period, Some(20200229));
    assert_eq!(headers[1].filed, Some(20200501));
  }

  #[test]
  fn missing_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pre.txt.parquet");
    write_parquet(&path, &test_data::pre()).unwrap();

    let err = read_parquet::<NumRecord>(&path).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "ddate"));
  }

  #[test]
  fn empty_table_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("num.txt.parquet");
    write_parquet::<NumRecord>(&path, &[]).unwrap();
    assert!(read_parquet::<NumRecord>(&path).unwrap().is_empty());
  }
}
