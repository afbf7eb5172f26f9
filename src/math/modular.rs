//! Scalar arithmetic over Z_q

/// Default modulus q = 2^60 - 2^14 + 1 (NTT-friendly prime).
///
/// q - 1 is divisible by 2^14, so negacyclic NTTs exist for ring dimensions up to 8192.
pub const DEFAULT_Q: u64 = 1152921504606830593;

/// Moduli must stay below 2^MAX_MODULUS_BITS so Montgomery reduction and
/// lazy butterfly sums fit their integer widths.
pub const MAX_MODULUS_BITS: u32 = 62;

/// Miller-Rabin witnesses that are deterministic for every u64
const PRIME_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Modular arithmetic operations over Z_q
pub struct ModQ;

impl ModQ {
    /// Add two reduced values modulo q
    #[inline]
    pub fn add(a: u64, b: u64, q: u64) -> u64 {
        let sum = a + b;
        if sum >= q {
            sum - q
        } else {
            sum
        }
    }

    /// Subtract two reduced values modulo q
    #[inline]
    pub fn sub(a: u64, b: u64, q: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            q - (b - a)
        }
    }

    /// Multiply two values modulo q
    #[inline]
    pub fn mul(a: u64, b: u64, q: u64) -> u64 {
        let prod = (a as u128) * (b as u128);
        (prod % (q as u128)) as u64
    }

    /// Convert a signed integer to its representation in Z_q
    #[inline]
    pub fn from_signed(val: i64, q: u64) -> u64 {
        if val >= 0 {
            (val as u64) % q
        } else {
            let abs = val.unsigned_abs() % q;
            if abs == 0 {
                0
            } else {
                q - abs
            }
        }
    }

    /// Convert from Z_q to signed representation in [-q/2, q/2]
    #[inline]
    pub fn to_signed(val: u64, q: u64) -> i64 {
        if val <= q / 2 {
            val as i64
        } else {
            -((q - val) as i64)
        }
    }

    /// Modular exponentiation by square-and-multiply
    pub fn pow(mut base: u64, mut exp: u64, q: u64) -> u64 {
        let mut result = 1u64;
        base %= q;
        while exp > 0 {
            if exp & 1 == 1 {
                result = Self::mul(result, base, q);
            }
            exp >>= 1;
            base = Self::mul(base, base, q);
        }
        result
    }

    /// Deterministic Miller-Rabin primality test over u64
    pub fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        for &p in &PRIME_WITNESSES {
            if n % p == 0 {
                return n == p;
            }
        }

        let s = (n - 1).trailing_zeros();
        let d = (n - 1) >> s;

        'witness: for &a in &PRIME_WITNESSES {
            let mut x = Self::pow(a, d, n);
            if x == 1 || x == n - 1 {
                continue;
            }
            for _ in 1..s {
                x = Self::mul(x, x, n);
                if x == n - 1 {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }
}
