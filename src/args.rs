//! Positional arguments of the `kmeans-pp` driver.

use crate::{KMeansError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_ITER: usize = 200;

/// Extensions accepted for input tables.
pub const INPUT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    pub k: usize,
    pub max_iter: usize,
    pub epsilon: f64,
    pub file_1: PathBuf,
    pub file_2: PathBuf,
}

impl Arguments {
    /// Parses `k [max_iter] eps file1 file2`. With four values `max_iter` defaults to
    /// [`DEFAULT_MAX_ITER`].
    ///
    /// Every failure is a [`KMeansError::InvalidArgument`]. `k` is not compared against the amount of
    /// points here.
    pub fn from_free_args<S: AsRef<str>>(free: &[S]) -> Result<Self> {
        let free: Vec<&str> = free.iter().map(AsRef::as_ref).collect();
        let (k, max_iter, epsilon, file_1, file_2) = match free[..] {
            [k, epsilon, file_1, file_2] => (k, None, epsilon, file_1, file_2),
            [k, max_iter, epsilon, file_1, file_2] => (k, Some(max_iter), epsilon, file_1, file_2),
            _ => return Err(invalid(format!("expected 4 or 5 arguments, got {}", free.len()))),
        };

        let k = positive_int("k", k)?;
        let max_iter = match max_iter {
            Some(max_iter) => positive_int("max_iter", max_iter)?,
            None => DEFAULT_MAX_ITER,
        };
        let epsilon: f64 = epsilon.parse()
            .map_err(|_| invalid(format!("eps: {:?} is not a number", epsilon)))?;
        if !(epsilon >= 0.0) {
            return Err(invalid(format!("eps has to be non-negative, got {}", epsilon)));
        }

        Ok(Self {
            k,
            max_iter,
            epsilon,
            file_1: input_file(file_1)?,
            file_2: input_file(file_2)?,
        })
    }
}

fn invalid(msg: String) -> KMeansError {
    KMeansError::InvalidArgument(msg)
}

fn positive_int(name: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid(format!("{}: expected a positive integer, got {:?}", name, value))),
    }
}

fn input_file(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    let known_ext = path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| INPUT_EXTENSIONS.contains(&ext));
    if !known_ext {
        return Err(invalid(format!("{}: expected a .csv or .txt file", path.display())));
    }
    if !path.is_file() {
        return Err(invalid(format!("{}: no such file", path.display())));
    }
    Ok(path.to_path_buf())
}
