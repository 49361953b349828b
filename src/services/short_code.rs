/// Character set for generating short codes.
pub const ALPHABET_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Source of random bytes: given `n`, returns `n` bytes.
///
/// Same shape as the sources in `nanoid::rngs`. Bytes are masked to six bits
/// and values outside the alphabet are discarded, so a source that never
/// yields a byte whose low six bits are below 62 will never finish a code.
pub type RandomSource = fn(usize) -> Vec<u8>;

/// Generator for random short codes.
///
/// Holds no state besides its randomness source, so it is `Copy` and can be
/// shared freely between request handlers. It makes no uniqueness promise;
/// collisions are handled where codes are stored.
#[derive(Clone, Copy)]
pub struct ShortCodeGenerator {
    random: RandomSource,
}

impl ShortCodeGenerator {
    /// Generator backed by nanoid's OS-seeded source
    pub fn new() -> Self {
        Self::with_random(nanoid::rngs::default)
    }

    /// Generator backed by a caller-supplied source
    pub fn with_random(random: RandomSource) -> Self {
        Self { random }
    }

    /// Generate a code of exactly `length` characters from [`ALPHABET_CHARS`].
    pub fn generate(&self, length: usize) -> String {
        // nanoid requests zero bytes for a zero-length id and never returns
        if length == 0 {
            return String::new();
        }

        nanoid::format(self.random, ALPHABET_CHARS, length)
    }
}

impl Default for ShortCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
