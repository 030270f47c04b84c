//! Persistent prime list with factorization-driven GCD and LCM.
//!
//! The cache grows monotonically and never admits a gap: every prime below
//! the largest cached one is itself cached, so a factorization walk over
//! the list can never skip a divisor.

/// Monotonically growing list of primes in ascending order.
#[derive(Debug, Clone, Default)]
pub struct PrimeCache {
    primes: Vec<i64>,
}

impl PrimeCache {
    pub fn new() -> Self {
        Self { primes: Vec::new() }
    }

    /// Number of primes cached so far.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn primes(&self) -> &[i64] {
        &self.primes
    }

    /// Prime factorization of `v` in ascending order; empty for `v < 2`.
    ///
    /// Walks the cached primes up to `⌊√v⌋`, extending the cache with newly
    /// verified primes when it runs out. When no cached or grown prime
    /// divides `v`, `v` itself is prime.
    pub fn factorize(&mut self, v: i64) -> Vec<i64> {
        if v < 2 {
            return Vec::new();
        }
        let limit = isqrt(v);
        let mut index = 0;
        loop {
            let p = match self.primes.get(index).copied() {
                Some(p) => p,
                None => match self.extend(limit) {
                    Some(p) => p,
                    None => break,
                },
            };
            if p > limit {
                break;
            }
            if v % p == 0 {
                let mut factors = vec![p];
                factors.extend(self.factorize(v / p));
                return factors;
            }
            index += 1;
        }
        vec![v]
    }

    /// Append the next prime after the current largest, unless every prime
    /// up to `limit` is already cached. Candidates are verified against the
    /// cached primes, which cover everything below them.
    fn extend(&mut self, limit: i64) -> Option<i64> {
        let mut candidate = self.primes.last().map_or(2, |last| last + 1);
        loop {
            if candidate > limit {
                return None;
            }
            if self.verify_prime(candidate) {
                self.primes.push(candidate);
                return Some(candidate);
            }
            candidate += 1;
        }
    }

    fn verify_prime(&self, candidate: i64) -> bool {
        for &p in &self.primes {
            if p * p > candidate {
                break;
            }
            if candidate % p == 0 {
                return false;
            }
        }
        true
    }

    /// GCD via the prime factorization of `a`: every factor of `a` that
    /// still divides the residual of `b` is multiplied into the result.
    pub fn gcd(&mut self, a: i64, b: i64) -> i64 {
        let mut g = 1;
        let mut residual = b.abs();
        for p in self.factorize(a.abs()) {
            if residual % p == 0 {
                g *= p;
                residual /= p;
            }
        }
        g
    }

    /// Variadic GCD, folded pairwise.
    pub fn gcd_all(&mut self, values: &[i64]) -> i64 {
        let mut iter = values.iter().copied();
        let first = match iter.next() {
            Some(v) => v,
            None => return 1,
        };
        iter.fold(first.abs().max(1), |acc, v| self.gcd(acc, v))
    }

    /// LCM; the division happens first to keep the product small.
    pub fn lcm(&mut self, a: i64, b: i64) -> i64 {
        (a / self.gcd(a, b)) * b
    }

    /// Variadic LCM, folded pairwise from 1.
    pub fn lcm_all(&mut self, values: &[i64]) -> i64 {
        values.iter().copied().fold(1, |acc, v| self.lcm(acc, v))
    }
}

/// Integer square root, exact for the i64 range.
fn isqrt(v: i64) -> i64 {
    let mut r = (v as f64).sqrt() as i64;
    while r > 0 && r.saturating_mul(r) > v {
        r -= 1;
    }
    while (r + 1).saturating_mul(r + 1) <= v {
        r += 1;
    }
    r
}
