//! Deterministic hash-based identity for types and members.
//!
//! [`TypeHash`] is a 64-bit hash computed from qualified names (types) or
//! owner + name + parameter signature (members). Because hashes are computed
//! rather than allocated, a snapshot can be rebuilt with edits and every
//! unchanged type and member keeps its identity.
//!
//! # Examples
//!
//! ```
//! use synthfix_core::TypeHash;
//!
//! let base = TypeHash::from_name("Shapes.Base");
//! assert_eq!(base, TypeHash::from_name("Shapes.Base"));
//!
//! let int_hash = TypeHash::from_name("int");
//! let m1 = TypeHash::from_member(base, "Scale", &[int_hash]);
//! let m2 = TypeHash::from_member(base, "Scale", &[]);
//! assert_ne!(m1, m2);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// Different entity kinds produce distinct hashes even if they share a name.
pub mod hash_constants {
    /// Separator constant for chained components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for member hashes.
    pub const MEMBER: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for operator hashes.
    pub const OPERATOR: u64 = 0x3e9f5d2a8c7b1403;

    /// Domain marker for type parameter hashes.
    pub const TYPE_PARAM: u64 = 0x1a095090689d4647;

    /// Parameter position mixing constants.
    /// Each position gets a unique constant so parameter order matters.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a type, member or type parameter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a member hash from owner type, member name and parameter hashes.
    ///
    /// Fields and properties pass an empty parameter list.
    #[inline]
    pub fn from_member(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::MEMBER ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Create an operator hash from owner type, operator token and parameter hashes.
    ///
    /// Uses a separate domain constant so `operator <` never collides with a
    /// method that happens to be named `<` in some other language.
    #[inline]
    pub fn from_operator(owner: TypeHash, token: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::OPERATOR ^ owner.0 ^ xxh64(token.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Create a type parameter hash scoped to its owner.
    ///
    /// `T` on `Box<T>` and `T` on `List<T>` are different parameters.
    #[inline]
    pub fn from_type_param(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::TYPE_PARAM ^ owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a hash for a generic instantiation from its definition and arguments.
    ///
    /// Argument order matters: `Pair<int, string>` differs from `Pair<string, int>`.
    #[inline]
    pub fn from_instance(definition: TypeHash, args: &[TypeHash]) -> Self {
        TypeHash(mix_params(definition.0, args))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

fn mix_params(seed: u64, params: &[TypeHash]) -> u64 {
    let mut hash = seed;
    for (i, param) in params.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps this non-commutative, unlike a plain XOR fold
        hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
