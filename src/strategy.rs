use crate::corpus::Source;
use crate::error::{Error, Result};
use crate::memcpy;

/// How the destination buffer is populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Reserve the final capacity, then append partition by partition.
    ReserveExtend,
    /// Resize to the final length, then `copy_from_slice` at a running offset.
    ResizeCopy,
    /// Same offsets as `ResizeCopy`, byte-level `copy_nonoverlapping` transfer.
    ResizeMemcpy,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::ReserveExtend, Strategy::ResizeCopy, Strategy::ResizeMemcpy];

    pub const fn label(self) -> &'static str {
        match self {
            Strategy::ReserveExtend => "reserve + extend",
            Strategy::ResizeCopy => "resize + copy_from_slice",
            Strategy::ResizeMemcpy => "resize + memcpy",
        }
    }

    /// Fills `dst` with the concatenation of every partition of `src` in
    /// index order. Returns the number of elements written.
    #[inline]
    pub fn run<S: Source>(self, src: &S, dst: &mut Vec<S::Elem>) -> Result<usize> {
        let total = src.total();
        let written = match self {
            Strategy::ReserveExtend => reserve_extend(src, total, dst),
            Strategy::ResizeCopy => resize_copy(src, total, dst, |to, from| to.copy_from_slice(from))?,
            Strategy::ResizeMemcpy => resize_copy(src, total, dst, memcpy)?,
        };

        if written != total || dst.len() != total {
            return Err(Error::LengthMismatch(total, written));
        }
        Ok(written)
    }
}

fn reserve_extend<S: Source>(src: &S, total: usize, dst: &mut Vec<S::Elem>) -> usize {
    dst.clear();
    dst.reserve(total);
    for id in 0..src.partitions() {
        match src.partition(id) {
            Some(part) if !part.is_empty() => dst.extend_from_slice(part),
            _ => continue,
        }
    }
    dst.len()
}

fn resize_copy<S, F>(src: &S, total: usize, dst: &mut Vec<S::Elem>, mut copy: F) -> Result<usize>
where
    S: Source,
    F: FnMut(&mut [S::Elem], &[S::Elem]),
{
    dst.clear();
    dst.resize(total, S::Elem::default());

    let mut offset = 0;
    for id in 0..src.partitions() {
        let part = match src.partition(id) {
            Some(part) if !part.is_empty() => part,
            _ => continue,
        };
        let end = offset + part.len();
        if end > total {
            return Err(Error::PartitionOverflow { partition: id, offset, len: part.len(), capacity: total });
        }
        copy(&mut dst[offset..end], part);
        offset = end;
    }
    Ok(offset)
}
