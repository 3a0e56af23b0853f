//! Text output of a clustering run.

use crate::memory::Primitive;
use std::io;

/// Writes the chosen centroid indices on one line, then one line per centroid with each coordinate
/// printed with 4 decimals. All values are comma-separated.
pub fn write_result<T: Primitive>(
    mut w: impl io::Write,
    centroid_indices: &[usize],
    centroids: &[T],
    sample_dims: usize,
) -> io::Result<()> {
    write_joined(&mut w, centroid_indices.iter(), |w, idx| write!(w, "{}", idx))?;
    if sample_dims == 0 {
        return Ok(());
    }
    for centroid in centroids.chunks_exact(sample_dims) {
        write_joined(&mut w, centroid.iter(), |w, v| write!(w, "{:.4}", v))?;
    }
    Ok(())
}

fn write_joined<W, I, F>(w: &mut W, items: I, mut write_item: F) -> io::Result<()>
where
    W: io::Write,
    I: Iterator,
    F: FnMut(&mut W, I::Item) -> io::Result<()>,
{
    for (i, item) in items.enumerate() {
        if i != 0 {
            write!(w, ",")?;
        }
        write_item(w, item)?;
    }
    writeln!(w)
}
