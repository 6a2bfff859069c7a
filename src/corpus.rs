//! Synthetic source corpora.
//!
//! [`InvLists`] mimics the inverted lists of an IVF index: `nlist` opaque
//! byte buffers, each holding `list_size(i)` vectors of `dim` `f32` values.
//! [`FlatBuffer`] is a single contiguous `f64` sequence.

use crate::config::CorpusConfig;
use crate::error::{Error, Result};
use bytes::Bytes;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

/// Anything the copy strategies can gather from.
pub trait Source {
    type Elem: Copy + Default;

    fn partitions(&self) -> usize;

    /// Final destination length in elements.
    fn total(&self) -> usize;

    /// Elements of partition `id`, or `None` if the partition holds no codes.
    fn partition(&self, id: usize) -> Option<&[Self::Elem]>;
}

// Owner that keeps partition codes in an f32 allocation so the bytes stay aligned.
struct F32Codes(Vec<f32>);

impl AsRef<[u8]> for F32Codes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        // SAFETY: f32 has no padding and u8 has alignment 1
        unsafe {
            core::slice::from_raw_parts(
                self.0.as_ptr().cast::<u8>(),
                self.0.len() * core::mem::size_of::<f32>(),
            )
        }
    }
}

#[inline]
fn into_codes(values: Vec<f32>) -> Bytes {
    if values.is_empty() {
        Bytes::new()
    } else {
        Bytes::from_owner(F32Codes(values))
    }
}

#[derive(Clone, Debug)]
pub struct InvLists {
    lists: Vec<Bytes>,
    dim: usize,
}

impl InvLists {
    /// Assigns each of `ntotal` vectors to a uniformly random list and fills
    /// the lists with uniform values in `[-1, 1)`. List sizes are binomial,
    /// not equal.
    pub fn random(config: &CorpusConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sizes = vec![0usize; config.nlist];
        for _ in 0..config.ntotal {
            sizes[rng.gen_range(0..config.nlist)] += 1;
        }

        let lists = Self::with_sizes(&sizes, config.dim, &mut rng)?;
        info!(nlist = config.nlist, ntotal = lists.ntotal(), dim = config.dim, "generated inverted lists");
        Ok(lists)
    }

    /// Fixed list sizes, random contents.
    pub fn with_sizes<R: Rng>(sizes: &[usize], dim: usize, rng: &mut R) -> Result<Self> {
        if sizes.is_empty() {
            return Err(Error::InvalidConfig("nlist"));
        }
        if dim == 0 {
            return Err(Error::InvalidConfig("dim"));
        }

        let lists = sizes
            .iter()
            .map(|&size| -> Result<Bytes> {
                let len = size.checked_mul(dim).ok_or(Error::Overflow("list size * dim"))?;
                let values = (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
                Ok(into_codes(values))
            })
            .collect::<Result<Vec<_>>>()?;

        if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
            debug!(min, max, empty = sizes.iter().filter(|&&s| s == 0).count(), "list size spread");
        }
        Ok(Self { lists, dim })
    }

    /// Fixed contents; each inner vector must hold a whole number of vectors.
    pub fn from_vectors(lists: Vec<Vec<f32>>, dim: usize) -> Result<Self> {
        if lists.is_empty() {
            return Err(Error::InvalidConfig("nlist"));
        }
        if dim == 0 {
            return Err(Error::InvalidConfig("dim"));
        }
        if let Some(bad) = lists.iter().position(|l| l.len() % dim != 0) {
            return Err(Error::Misaligned(bad));
        }
        Ok(Self { lists: lists.into_iter().map(into_codes).collect(), dim })
    }

    /// Wraps externally produced codes. Every buffer must be `f32`-aligned
    /// and hold a whole number of `dim`-wide vectors.
    pub fn from_codes(lists: Vec<Bytes>, dim: usize) -> Result<Self> {
        if lists.is_empty() {
            return Err(Error::InvalidConfig("nlist"));
        }
        if dim == 0 {
            return Err(Error::InvalidConfig("dim"));
        }
        let stride = dim * core::mem::size_of::<f32>();
        for (id, codes) in lists.iter().enumerate() {
            let aligned = codes.as_ptr() as usize % core::mem::align_of::<f32>() == 0;
            if codes.len() % stride != 0 || (!codes.is_empty() && !aligned) {
                return Err(Error::Misaligned(id));
            }
        }
        Ok(Self { lists, dim })
    }

    #[inline(always)]
    pub fn nlist(&self) -> usize {
        self.lists.len()
    }

    #[inline(always)]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vectors in list `id`.
    #[inline]
    pub fn list_size(&self, id: usize) -> usize {
        self.lists[id].len() / (self.dim * core::mem::size_of::<f32>())
    }

    pub fn ntotal(&self) -> usize {
        (0..self.nlist()).map(|id| self.list_size(id)).sum()
    }

    /// Raw codes of list `id`; `None` for an empty list.
    #[inline]
    pub fn codes(&self, id: usize) -> Option<&[u8]> {
        let codes = &self.lists[id];
        if codes.is_empty() {
            None
        } else {
            Some(&codes[..])
        }
    }

    #[inline]
    pub fn vectors(&self, id: usize) -> Option<&[f32]> {
        let codes = self.codes(id)?;
        // SAFETY: every bit pattern is a valid f32; alignment checked on construction
        let (head, floats, tail) = unsafe { codes.align_to::<f32>() };
        debug_assert!(head.is_empty() && tail.is_empty());
        Some(floats)
    }
}

impl Source for InvLists {
    type Elem = f32;

    #[inline]
    fn partitions(&self) -> usize {
        self.nlist()
    }

    fn total(&self) -> usize {
        self.ntotal() * self.dim
    }

    #[inline]
    fn partition(&self, id: usize) -> Option<&[f32]> {
        self.vectors(id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlatBuffer {
    data: Vec<f64>,
}

impl FlatBuffer {
    /// `data[i] = i * 0.001`
    pub fn linear(len: usize) -> Self {
        let data = (0..len).map(|i| i as f64 * 0.001).collect();
        Self { data }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size_in_mib(&self) -> usize {
        self.data.len() * core::mem::size_of::<f64>() / (1024 * 1024)
    }
}

impl Source for FlatBuffer {
    type Elem = f64;

    #[inline(always)]
    fn partitions(&self) -> usize {
        1
    }

    #[inline(always)]
    fn total(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn partition(&self, id: usize) -> Option<&[f64]> {
        (id == 0).then_some(self.data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use proptest::prelude::*;

    #[test]
    fn random_sizes_sum_to_total() {
        let lists = InvLists::random(&CorpusConfig::new(10_000, 37, 3).with_seed(7)).unwrap();
        assert_eq!(lists.nlist(), 37);
        assert_eq!(lists.ntotal(), 10_000);
        assert_eq!(lists.total(), 30_000);
    }

    #[test]
    fn random_sizes_are_uneven() {
        let lists = InvLists::random(&CorpusConfig::new(10_000, 100, 1).with_seed(42)).unwrap();
        let sizes: Vec<_> = (0..lists.nlist()).map(|id| lists.list_size(id)).collect();
        assert!(sizes.iter().any(|&s| s != 100));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let cfg = CorpusConfig::new(500, 8, 4).with_seed(3);
        let a = InvLists::random(&cfg).unwrap();
        let b = InvLists::random(&cfg).unwrap();
        for id in 0..a.nlist() {
            assert_eq!(a.vectors(id), b.vectors(id));
        }
    }

    #[test]
    fn values_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let lists = InvLists::with_sizes(&[5, 0, 9], 4, &mut rng).unwrap();
        for id in 0..lists.nlist() {
            for &v in lists.vectors(id).unwrap_or_default() {
                assert!((-1.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn empty_list_has_no_codes() {
        let mut rng = StdRng::seed_from_u64(1);
        let lists = InvLists::with_sizes(&[2, 0, 1], 3, &mut rng).unwrap();
        assert_eq!(lists.list_size(1), 0);
        assert!(lists.codes(1).is_none());
        assert!(lists.vectors(1).is_none());
        assert_eq!(lists.codes(0).map(<[u8]>::len), Some(2 * 3 * 4));
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn codes_are_native_f32_bytes() {
        let lists = InvLists::from_vectors(vec![vec![1.0, -2.0]], 2).unwrap();
        assert_eq!(lists.codes(0).unwrap(), hex!("0000803f000000c0"));
    }

    #[test]
    fn from_codes_checks_layout() {
        let good = Bytes::from_owner(F32Codes(vec![0.5; 4]));
        let lists = InvLists::from_codes(vec![good.clone(), Bytes::new()], 2).unwrap();
        assert_eq!(lists.list_size(0), 2);
        assert_eq!(lists.vectors(0).unwrap(), &[0.5; 4]);

        assert!(matches!(InvLists::from_codes(vec![good.slice(0..12)], 2), Err(Error::Misaligned(0))));
        assert!(matches!(InvLists::from_codes(vec![good.slice(1..9)], 2), Err(Error::Misaligned(0))));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(InvLists::random(&CorpusConfig::new(5, 0, 2)), Err(Error::InvalidConfig("nlist"))));
        assert!(matches!(InvLists::from_vectors(vec![vec![]], 0), Err(Error::InvalidConfig("dim"))));
        assert!(matches!(InvLists::from_vectors(vec![vec![1.0; 3]], 2), Err(Error::Misaligned(0))));
        assert!(matches!(InvLists::random(&CorpusConfig::new(usize::MAX, 3, 2)), Err(Error::Overflow(_))));
    }

    #[test]
    fn oversized_list_is_rejected_before_allocating() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(matches!(
            InvLists::with_sizes(&[1, usize::MAX / 2], 4, &mut rng),
            Err(Error::Overflow("list size * dim"))
        ));
    }

    #[test]
    fn flat_is_linear_in_index() {
        let flat = FlatBuffer::linear(10_000);
        for (i, &v) in flat.as_slice().iter().enumerate() {
            assert_eq!(v.to_bits(), (i as f64 * 0.001).to_bits());
        }
        assert_eq!(flat.as_slice()[1000], 1.0);
        assert_eq!(flat.partitions(), 1);
        assert!(flat.partition(1).is_none());
    }

    #[test]
    fn flat_size_banner() {
        assert_eq!(FlatBuffer::linear(1024 * 1024 / 8 * 3).size_in_mib(), 3);
    }

    proptest! {
        #[test]
        fn sizes_sum_for_any_shape(ntotal in 0usize..2000, nlist in 1usize..64, dim in 1usize..6, seed in any::<u64>()) {
            let lists = InvLists::random(&CorpusConfig::new(ntotal, nlist, dim).with_seed(seed)).unwrap();
            prop_assert_eq!(lists.ntotal(), ntotal);
            prop_assert_eq!(lists.total(), ntotal * dim);
        }
    }
}
