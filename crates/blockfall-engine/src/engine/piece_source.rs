use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::core::PieceKind;

/// Supplies the kind of every spawned piece.
pub trait PieceSource {
    /// Returns the kind of the next piece to spawn.
    fn next_kind(&mut self) -> PieceKind;
}

/// Draws piece kinds uniformly at random.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSource, RandomPieces};
///
/// let mut a = RandomPieces::seeded(7);
/// let mut b = RandomPieces::seeded(7);
/// for _ in 0..16 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieces<R = Pcg64> {
    rng: R,
}

impl RandomPieces<Pcg64> {
    /// Creates a reproducible source from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(Pcg64::seed_from_u64(seed))
    }

    /// Creates a source seeded from the operating system's random data.
    pub fn from_entropy() -> Result<Self, EntropyError> {
        let rng = Pcg64::try_from_os_rng().map_err(|e| EntropyError {
            message: e.to_string(),
        })?;
        Ok(Self::from_rng(rng))
    }
}

impl<R> RandomPieces<R>
where
    R: Rng,
{
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> PieceSource for RandomPieces<R>
where
    R: Rng,
{
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// The operating system could not provide random data.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("failed to seed piece generator from OS entropy: {message}")]
pub struct EntropyError {
    message: String,
}

/// Replays a fixed list of piece kinds, starting over at the end.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceSource, ScriptedPieces};
///
/// let mut source = ScriptedPieces::new([PieceKind::I, PieceKind::O]).unwrap();
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::O);
/// assert_eq!(source.next_kind(), PieceKind::I);
///
/// assert!(ScriptedPieces::new([]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedPieces {
    pub fn new<I>(kinds: I) -> Result<Self, EmptyScriptError>
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let kinds: Vec<_> = kinds.into_iter().collect();
        if kinds.is_empty() {
            return Err(EmptyScriptError);
        }
        Ok(Self { kinds, next: 0 })
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// A scripted piece source was given no pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("scripted piece list must not be empty")]
pub struct EmptyScriptError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_covers_every_kind() {
        let mut source = RandomPieces::seeded(1234);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[usize::from(source.next_kind().id()) - 1] = true;
        }
        assert!(seen.iter().all(|&s| s), "{seen:?}");
    }

    #[test]
    fn test_random_is_roughly_uniform() {
        let mut source = RandomPieces::seeded(42);
        let mut counts = [0_u32; PieceKind::LEN];
        for _ in 0..7000 {
            counts[usize::from(source.next_kind().id()) - 1] += 1;
        }
        for count in counts {
            assert!((700..=1300).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = RandomPieces::seeded(1);
        let mut b = RandomPieces::seeded(2);
        let a: Vec<_> = (0..32).map(|_| a.next_kind()).collect();
        let b: Vec<_> = (0..32).map(|_| b.next_kind()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut source = ScriptedPieces::new([PieceKind::I, PieceKind::O]).unwrap();
        let kinds: Vec<_> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            kinds,
            [
                PieceKind::I,
                PieceKind::O,
                PieceKind::I,
                PieceKind::O,
                PieceKind::I
            ]
        );
    }

    #[test]
    fn test_scripted_rejects_empty_list() {
        let err = ScriptedPieces::new([]).unwrap_err();
        assert_eq!(err, EmptyScriptError);
        assert_eq!(err.to_string(), "scripted piece list must not be empty");
    }
}
