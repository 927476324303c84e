// buffer.rs - Packed bit vector holding one generation of cell states

/// Bit `i` set means cell `i` is alive. Stored as 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    words: Vec<u64>,
    len: usize,
}

#[inline(always)]
fn word_index(i: usize) -> usize {
    i >> 6
}

#[inline(always)]
fn bit_mask(i: usize) -> u64 {
    1u64 << (i & 63)
}

impl BitBuffer {
    /// All-dead buffer of `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Buffer of `len` cells with the given indices alive.
    /// Indices past `len` are ignored.
    pub fn from_indices(len: usize, alive: impl IntoIterator<Item = usize>) -> Self {
        let mut buffer = Self::new(len);
        for i in alive.into_iter().filter(|&i| i < len) {
            buffer.set(i, true);
        }
        buffer
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Panics if `i >= len`, like slice indexing.
    #[inline(always)]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {i} out of range for length {}", self.len);
        self.words[word_index(i)] & bit_mask(i) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, alive: bool) {
        assert!(i < self.len, "bit index {i} out of range for length {}", self.len);
        let word = &mut self.words[word_index(i)];
        if alive {
            *word |= bit_mask(i);
        } else {
            *word &= !bit_mask(i);
        }
    }

    /// Flips bit `i` and returns its new value
    pub fn toggle(&mut self, i: usize) -> bool {
        let alive = !self.get(i);
        self.set(i, alive);
        alive
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    pub fn copy_from(&mut self, other: &BitBuffer) {
        debug_assert_eq!(self.len, other.len);
        self.words.copy_from_slice(&other.words);
    }

    /// Number of live cells
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of live cells in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let offset = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some((w << 6) + offset)
            })
        })
    }

    pub fn as_words(&self) -> &[u64] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_dead() {
        let buffer = BitBuffer::new(130);
        assert_eq!(buffer.len(), 130);
        assert_eq!(buffer.as_words().len(), 3);
        assert_eq!(buffer.count_ones(), 0);
        assert!((0..130).all(|i| !buffer.get(i)));
    }

    #[test]
    fn test_set_get_across_word_boundaries() {
        let mut buffer = BitBuffer::new(200);
        for i in [0, 63, 64, 127, 128, 199] {
            buffer.set(i, true);
        }
        assert_eq!(buffer.count_ones(), 6);
        assert!(buffer.get(63) && buffer.get(64));
        assert!(!buffer.get(62) && !buffer.get(65));

        buffer.set(64, false);
        assert!(!buffer.get(64));
        assert_eq!(buffer.count_ones(), 5);
    }

    #[test]
    fn test_toggle_returns_new_state() {
        let mut buffer = BitBuffer::new(16);
        assert!(buffer.toggle(5));
        assert!(buffer.get(5));
        assert!(!buffer.toggle(5));
        assert!(!buffer.get(5));
    }

    #[test]
    fn test_iter_ones_matches_from_indices() {
        let alive = vec![1, 4, 5, 10, 64, 100];
        let buffer = BitBuffer::from_indices(128, alive.iter().copied().chain([500]));
        assert_eq!(buffer.iter_ones().collect::<Vec<_>>(), alive);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut a = BitBuffer::from_indices(70, [3, 69]);
        let mut b = BitBuffer::new(70);
        b.copy_from(&a);
        assert_eq!(a, b);
        a.clear();
        assert_eq!(a.count_ones(), 0);
        assert_eq!(b.count_ones(), 2);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        BitBuffer::new(8).get(8);
    }
}
