//! Bidirectional mapping between transcriptions and CTC class indices.
//!
//! The vocabulary is built once from an alphabet and is immutable: index 0
//! is the non-emitting blank required by CTC, the alphabet characters occupy
//! 1..=n, and the last index is the unknown symbol substituted for
//! out-of-vocabulary characters during encoding.
//!
//! Decoding applies the CTC collapse rule: a symbol is emitted only when its
//! index is non-blank and differs from the immediately preceding raw index.
//! The collapse is intentionally lossy for inputs with adjacent repeated
//! characters and no intervening blank; that mirrors how a CTC-trained
//! model's argmax output is turned back into text.

use crate::core::config::AlphabetConfig;
use crate::core::errors::{DatasetError, DatasetResult};
use std::collections::HashMap;
use tracing::warn;

/// Class index of the CTC blank. The blank must sit at position 0.
pub const BLANK_INDEX: u32 = 0;

const BLANK_CHAR: char = '\0';
const UNKNOWN_CHAR: char = '\u{FFFD}';

/// Immutable string/class-index codec for CTC training and decoding.
#[derive(Debug, Clone)]
pub struct LabelCodec {
    voc: Vec<char>,
    dict: HashMap<char, u32>,
    unknown_index: u32,
}

impl LabelCodec {
    /// Builds a codec from an ordered alphabet.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the alphabet repeats a character
    /// or contains one of the two reserved symbols; a vocabulary with an
    /// ambiguous inverse mapping would silently mis-encode labels.
    pub fn new(alphabet: &str) -> DatasetResult<Self> {
        let mut voc = vec![BLANK_CHAR];
        voc.extend(alphabet.chars());
        voc.push(UNKNOWN_CHAR);

        let mut dict = HashMap::with_capacity(voc.len());
        for (i, &c) in voc.iter().enumerate() {
            if dict.insert(c, i as u32).is_some() {
                return Err(DatasetError::config(format!(
                    "duplicate or reserved character {c:?} in alphabet"
                )));
            }
        }
        let unknown_index = (voc.len() - 1) as u32;

        Ok(Self {
            voc,
            dict,
            unknown_index,
        })
    }

    /// Builds a codec from an [`AlphabetConfig`].
    pub fn from_config(config: &AlphabetConfig) -> DatasetResult<Self> {
        Self::new(&config.alphabet)
    }

    /// Size of the index space: alphabet characters plus blank and unknown.
    pub fn num_classes(&self) -> usize {
        self.voc.len()
    }

    /// Class index substituted for out-of-vocabulary characters.
    pub fn unknown_index(&self) -> u32 {
        self.unknown_index
    }

    /// Class index of a character, if it is in the vocabulary.
    pub fn index_of(&self, c: char) -> Option<u32> {
        self.dict.get(&c).copied()
    }

    /// Encodes a batch of transcriptions into one flat index sequence plus
    /// per-text character counts.
    ///
    /// Characters outside the vocabulary are substituted with the unknown
    /// index and logged; encoding never fails. The outputs satisfy
    /// `lengths.iter().sum::<u32>() as usize == flat.len()`.
    pub fn encode<S: AsRef<str>>(&self, texts: &[S]) -> (Vec<u32>, Vec<u32>) {
        let mut lengths = Vec::with_capacity(texts.len());
        let mut flat = Vec::new();

        for text in texts {
            let mut count: u32 = 0;
            for c in text.as_ref().chars() {
                count += 1;
                match self.dict.get(&c) {
                    Some(&index) => flat.push(index),
                    None => {
                        warn!(character = %c, "character is out of vocabulary");
                        flat.push(self.unknown_index);
                    }
                }
            }
            lengths.push(count);
        }

        debug_assert_eq!(lengths.iter().sum::<u32>() as usize, flat.len());
        (flat, lengths)
    }

    /// Decodes a flat index sequence back into one string per claimed length.
    ///
    /// The flat sequence is split into consecutive slices, one per entry of
    /// `lengths`, and each slice is collapsed CTC-style.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::LengthMismatch`] when the lengths do not sum
    /// to the sequence size (never silent truncation), and
    /// [`DatasetError::ClassOutOfRange`] for indices outside the vocabulary.
    pub fn decode(&self, flat: &[u32], lengths: &[u32]) -> DatasetResult<Vec<String>> {
        let expected: usize = lengths.iter().map(|&l| l as usize).sum();
        if expected != flat.len() {
            return Err(DatasetError::LengthMismatch {
                expected,
                actual: flat.len(),
            });
        }

        let mut texts = Vec::with_capacity(lengths.len());
        let mut offset = 0;
        for &length in lengths {
            let length = length as usize;
            texts.push(self.collapse(&flat[offset..offset + length])?);
            offset += length;
        }
        Ok(texts)
    }

    /// Decodes a single index sequence, collapsing CTC-style.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ClassOutOfRange`] for indices outside the
    /// vocabulary.
    pub fn decode_single(&self, flat: &[u32]) -> DatasetResult<String> {
        self.collapse(flat)
    }

    /// Encodes then decodes a label corpus and returns the pairs that did
    /// not survive the round trip.
    ///
    /// Labels with adjacent repeated characters or out-of-vocabulary
    /// characters are expected to differ; this surfaces them for inspection
    /// before training.
    ///
    /// # Errors
    ///
    /// Propagates decode errors, which cannot occur for codec-produced
    /// encodings.
    pub fn audit<S: AsRef<str>>(&self, texts: &[S]) -> DatasetResult<Vec<(String, String)>> {
        let (flat, lengths) = self.encode(texts);
        let decoded = self.decode(&flat, &lengths)?;
        Ok(texts
            .iter()
            .zip(decoded)
            .filter(|(original, roundtrip)| original.as_ref() != roundtrip)
            .map(|(original, roundtrip)| (original.as_ref().to_string(), roundtrip))
            .collect())
    }

    fn collapse(&self, sequence: &[u32]) -> DatasetResult<String> {
        let mut text = String::new();
        let mut previous: Option<u32> = None;
        for &index in sequence {
            let symbol = self
                .voc
                .get(index as usize)
                .ok_or(DatasetError::ClassOutOfRange {
                    index: index as usize,
                    num_classes: self.voc.len(),
                })?;
            if index != BLANK_INDEX && previous != Some(index) {
                text.push(*symbol);
            }
            previous = Some(index);
        }
        Ok(text)
    }
}
