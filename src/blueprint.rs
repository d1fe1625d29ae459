//! Trait schema mapping named, ranged values onto contiguous bit ranges of a
//! genotype.
//!
//! A [`Blueprint`] is an ordered list of genes. Each gene occupies the
//! minimum number of bits covering its `[min, max]` range, carries the target
//! bit pattern the population is evolved toward, and a transform turning the
//! raw decoded integer into the final trait value. Gene order determines both
//! the bit-range assignment and the order of decoded output.
//!
//! # Example
//!
//! ```rust
//! use genoform::Blueprint;
//!
//! # fn main() -> Result<(), genoform::Error> {
//! let mut blueprint = Blueprint::new();
//! blueprint.add_trait("red", 0, 255, 128)?.add_flag("glossy", true)?;
//!
//! assert_eq!(blueprint.size(), 9); // 8 bits + 1 bit
//! # Ok(())
//! # }
//! ```

use crate::{Error, genotype::Genotype};
use log::trace;
use std::fmt;
use std::ops::Index;

/// Decode transform applied to a gene's raw integer value.
pub type Transform = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// One named trait within a blueprint.
pub struct Gene {
    name: String,
    min: i64,
    max: i64,
    size: u32,
    target: Vec<bool>,
    transform: Transform,
}

impl Gene {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Bit width of this gene.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Target bit pattern, big-endian.
    pub fn target(&self) -> &[bool] {
        &self.target
    }
}

impl fmt::Debug for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gene")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("size", &self.size)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// An ordered schema of traits plus the concatenated target bit pattern
/// (`model`) genotypes are scored against.
///
/// Built once per run; appending a gene rebuilds the model. Never mutated by
/// [`Population`](crate::Population) or [`Genotype`].
#[derive(Debug, Default)]
pub struct Blueprint {
    genes: Vec<Gene>,
    model: Vec<bool>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a numeric trait spanning `[min, max]` with the default linear
    /// decode transform `raw * (max - min) / (2^size - 1) + min`.
    ///
    /// The gene's bit size is the minimum width representing the range:
    /// `floor(log2(max - min)) + 1`. `value` is the target in raw
    /// (pre-transform) integer units, encoded big-endian and zero-padded to
    /// that width; a value wider than the width errors with
    /// [`Error::TargetOutOfRange`] rather than truncating. `min >= max`
    /// errors with [`Error::InvalidTraitRange`].
    pub fn add_trait(
        &mut self,
        name: &str,
        min: i64,
        max: i64,
        value: u64,
    ) -> Result<&mut Self, Error> {
        let bits = Self::bits_for_range(name, min, max)?;
        let span = (max as i128 - min as i128) as f64;
        let denom = if bits >= 64 {
            u64::MAX as f64
        } else {
            ((1u64 << bits) - 1) as f64
        };
        let lo = min as f64;
        self.push_gene(name, min, max, bits, value, Box::new(move |raw| lo + (raw * span) / denom))
    }

    /// Appends a numeric trait with a caller-supplied decode transform
    /// applied to the raw integer in place of the default linear map.
    pub fn add_trait_with(
        &mut self,
        name: &str,
        min: i64,
        max: i64,
        value: u64,
        transform: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Result<&mut Self, Error> {
        let bits = Self::bits_for_range(name, min, max)?;
        self.push_gene(name, min, max, bits, value, Box::new(transform))
    }

    /// Appends a boolean trait as a 1-bit `[0, 1]` gene decoding to
    /// `0.0`/`1.0`.
    pub fn add_flag(&mut self, name: &str, value: bool) -> Result<&mut Self, Error> {
        self.add_trait(name, 0, 1, u64::from(value))
    }

    fn bits_for_range(name: &str, min: i64, max: i64) -> Result<u32, Error> {
        if min >= max {
            return Err(Error::InvalidTraitRange {
                name: name.to_string(),
                min,
                max,
            });
        }
        let span = (max as i128 - min as i128) as u128;
        Ok(128 - span.leading_zeros())
    }

    fn push_gene(
        &mut self,
        name: &str,
        min: i64,
        max: i64,
        bits: u32,
        value: u64,
        transform: Transform,
    ) -> Result<&mut Self, Error> {
        if bits < 64 && value >> bits != 0 {
            return Err(Error::TargetOutOfRange {
                name: name.to_string(),
                value,
                bits,
            });
        }

        let target: Vec<bool> = (0..bits).rev().map(|i| (value >> i) & 1 == 1).collect();
        trace!("trait `{name}` [{min}, {max}] occupies {bits} bits, target {value}");

        self.genes.push(Gene {
            name: name.to_string(),
            min,
            max,
            size: bits,
            target,
            transform,
        });
        self.rebuild_model();
        Ok(self)
    }

    fn rebuild_model(&mut self) {
        self.model = self
            .genes
            .iter()
            .flat_map(|gene| gene.target.iter().copied())
            .collect();
    }

    /// Total bit length: the sum of all gene sizes.
    pub fn size(&self) -> usize {
        self.genes.iter().map(|gene| gene.size as usize).sum()
    }

    /// The concatenated target bit pattern across all genes, in gene order.
    pub fn model(&self) -> &[bool] {
        &self.model
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Decodes a genotype into named trait values, preserving gene
    /// declaration order.
    ///
    /// Each gene's bit range is read as a big-endian unsigned integer and
    /// passed through the gene's transform. Pure; errors with
    /// [`Error::IncompatibleModel`] when the genotype length differs from
    /// [`size`](Self::size).
    pub fn decode(&self, genotype: &Genotype) -> Result<Decoded, Error> {
        if genotype.data.len() != self.size() {
            return Err(Error::IncompatibleModel {
                genotype: genotype.data.len(),
                blueprint: self.size(),
            });
        }

        let mut entries = Vec::with_capacity(self.genes.len());
        let mut index = 0;
        for gene in &self.genes {
            let slice = &genotype.data[index..index + gene.size as usize];
            let raw = slice
                .iter()
                .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
            entries.push((gene.name.clone(), (gene.transform)(raw as f64)));
            index += gene.size as usize;
        }

        Ok(Decoded { entries })
    }
}

/// Decoded trait values in gene declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    entries: Vec<(String, f64)>,
}

impl Decoded {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, value)| (n.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for Decoded {
    type Output = f64;

    fn index(&self, name: &str) -> &f64 {
        match self.entries.iter().find(|(n, _)| n == name) {
            Some((_, value)) => value,
            None => panic!("no trait named `{name}`"),
        }
    }
}
