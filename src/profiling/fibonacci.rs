/// Largest `n` whose Fibonacci number fits in a `u64` (`fib(93) = 12200160415121876738`).
pub const MAX_FIB_N: u64 = 93;

/// Naive doubly recursive Fibonacci: `fib(0) = 0`, `fib(1) = 1`,
/// `fib(n) = fib(n - 1) + fib(n - 2)`.
///
/// Exponential time on purpose; it is the profiling workload. Kept out of
/// line so every recursion level shows up as its own frame in a profile.
/// Inputs above [`MAX_FIB_N`] overflow; configuration rejects them.
#[inline(never)]
pub fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
    }

    #[test]
    fn follows_the_recurrence() {
        for n in 2..=25 {
            assert_eq!(fibonacci(n), fibonacci(n - 1) + fibonacci(n - 2), "n = {n}");
        }
        assert_eq!(fibonacci(20), 6765);
    }

    #[test]
    fn max_fib_n_is_the_last_u64_term() {
        // Iterative check; the recursive version would never finish at n = 93
        let (mut prev, mut cur): (u64, u64) = (0, 1);
        for _ in 1..MAX_FIB_N {
            let next = prev.checked_add(cur).expect("fits up to MAX_FIB_N");
            (prev, cur) = (cur, next);
        }

        assert_eq!(cur, 12_200_160_415_121_876_738);
        assert!(prev.checked_add(cur).is_none());
    }

    #[test]
    fn fib_45() {
        assert_eq!(fibonacci(45), 1_134_903_170);
    }
}
