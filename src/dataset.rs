//! Loading point sets from headerless CSV tables.
//!
//! A keyed table carries an integer join key in its first column and numeric features in the
//! remaining ones. Two keyed tables are combined with [`inner_join`] into a [`PointSet`], whose rows
//! are ordered by ascending key.

use crate::{memory::Primitive, EuclideanDistance, KMeans, KMeansError, Result};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Rows of a headerless numeric table, each with a join key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyedTable {
    keys: Vec<i64>,
    values: Vec<f64>,
    width: usize,
}

impl KeyedTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = csv_reader().from_path(path)?;
        Self::from_csv(reader)
    }

    /// Wrapping `r` in a [`std::io::BufReader`] is not needed, the csv reader buffers itself.
    pub fn from_reader<R: io::Read>(r: R) -> Result<Self> {
        Self::from_csv(csv_reader().from_reader(r))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut table = KeyedTable::default();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let mut fields = record.iter();
            let key = match fields.next() {
                Some(field) => parse_key(field, line + 1)?,
                None => continue,
            };
            let width = push_row(&mut table.values, fields, line + 1)?;
            check_width(&mut table.width, table.keys.is_empty(), width, line + 1)?;
            table.keys.push(key);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Amount of feature columns (the key column not included).
    pub fn width(&self) -> usize { self.width }

    pub fn key(&self, idx: usize) -> i64 { self.keys[idx] }

    pub fn row(&self, idx: usize) -> &[f64] {
        &self.values[idx * self.width..(idx + 1) * self.width]
    }
}

/// Dense point set [row-major], one row per key, ascending by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    pub keys: Vec<i64>,
    pub samples: Vec<f64>,
    pub sample_dims: usize,
}

impl PointSet {
    /// Reads a headerless table that has no key column. Rows keep their file order.
    pub fn from_unkeyed_reader<R: io::Read>(r: R) -> Result<Self> {
        let mut points = PointSet::default();
        for (line, record) in csv_reader().from_reader(r).records().enumerate() {
            let record = record?;
            let width = push_row(&mut points.samples, record.iter(), line + 1)?;
            check_width(&mut points.sample_dims, points.keys.is_empty(), width, line + 1)?;
            points.keys.push(line as i64);
        }
        Ok(points)
    }

    pub fn from_unkeyed_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_unkeyed_reader(file)
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Converts the point set into the k-means sample set, keeping the row order.
    pub fn into_kmeans<T: Primitive>(self) -> Result<KMeans<T>> {
        let samples = self.samples.iter()
            .map(|&v| T::from(v).ok_or_else(|| KMeansError::InvalidData(format!("{} does not fit the sample type", v))))
            .collect::<Result<Vec<T>>>()?;
        KMeans::new(samples, self.keys.len(), self.sample_dims, EuclideanDistance)
    }
}

/// Joins two keyed tables on their key.
///
/// Only keys present in both tables are kept. A key occurring several times produces one row per
/// matching pair, left rows first. Rows are sorted by ascending key; the order among rows with the
/// same key is kept. Each resulting row holds the left row's features followed by the right row's.
pub fn inner_join(left: &KeyedTable, right: &KeyedTable) -> PointSet {
    let mut right_rows: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for idx in 0..right.len() {
        right_rows.entry(right.key(idx)).or_default().push(idx);
    }

    let mut pairs: Vec<(i64, usize, usize)> = (0..left.len())
        .flat_map(|l| {
            let key = left.key(l);
            right_rows.get(&key).into_iter().flatten().map(move |&r| (key, l, r))
        })
        .collect();
    pairs.sort_by_key(|&(key, _, _)| key);

    let sample_dims = left.width() + right.width();
    let mut points = PointSet {
        keys: Vec::with_capacity(pairs.len()),
        samples: Vec::with_capacity(pairs.len() * sample_dims),
        sample_dims,
    };
    for (key, l, r) in pairs {
        points.keys.push(key);
        points.samples.extend_from_slice(left.row(l));
        points.samples.extend_from_slice(right.row(r));
    }
    tracing::debug!(left = left.len(), right = right.len(), joined = points.len(), "joined tables");
    points
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(csv::Trim::All);
    builder
}

fn parse_key(field: &str, line: usize) -> Result<i64> {
    let value = parse_value(field, line)?;
    if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(KMeansError::InvalidData(format!("line {}: key {:?} is not an integer", line, field)));
    }
    Ok(value as i64)
}

fn parse_value(field: &str, line: usize) -> Result<f64> {
    let value: f64 = field.parse()
        .map_err(|_| KMeansError::InvalidData(format!("line {}: {:?} is not a number", line, field)))?;
    if !value.is_finite() {
        return Err(KMeansError::InvalidData(format!("line {}: {:?} is not finite", line, field)));
    }
    Ok(value)
}

fn push_row<'r>(values: &mut Vec<f64>, fields: impl Iterator<Item = &'r str>, line: usize) -> Result<usize> {
    let before = values.len();
    for field in fields {
        values.push(parse_value(field, line)?);
    }
    Ok(values.len() - before)
}

fn check_width(expected: &mut usize, first_row: bool, width: usize, line: usize) -> Result<()> {
    if first_row {
        *expected = width;
    } else if *expected != width {
        return Err(KMeansError::InvalidData(format!(
            "line {}: expected {} values, got {}", line, *expected, width
        )));
    }
    Ok(())
}
