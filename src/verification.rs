use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{Result, SortError};

/// Index `i` of the first adjacent pair with `xs[i - 1] > xs[i]`.
pub fn find_inversion<X, F>(xs: &[X], cmp: F) -> Option<usize>
where
    F: Fn(&X, &X) -> Ordering,
{
    (1..xs.len()).find(|&i| cmp(&xs[i - 1], &xs[i]) == Ordering::Greater)
}

pub fn is_sorted<X, F>(xs: &[X], cmp: F) -> bool
where
    F: Fn(&X, &X) -> Ordering,
{
    find_inversion(xs, cmp).is_none()
}

/// Number of pairs `i < j` with `xs[i] > xs[j]`, by merge counting.
///
/// Equal elements never form an inversion. The input is left untouched.
pub fn count_inversions<X, F>(xs: &[X], cmp: F) -> u64
where
    F: Fn(&X, &X) -> Ordering,
{
    let mut refs: Vec<&X> = xs.iter().collect();
    let mut aux: Vec<&X> = refs.clone();
    merge_count(&mut refs, &mut aux, 0, xs.len(), &cmp)
}

fn merge_count<'a, X, F>(
    a: &mut [&'a X],
    aux: &mut [&'a X],
    from: usize,
    to: usize,
    cmp: &F,
) -> u64
where
    F: Fn(&X, &X) -> Ordering,
{
    if to - from < 2 {
        return 0;
    }
    let mid = from + (to - from) / 2;
    let mut count = merge_count(a, aux, from, mid, cmp) + merge_count(a, aux, mid, to, cmp);

    aux[from..to].copy_from_slice(&a[from..to]);
    let (mut i, mut j) = (from, mid);
    for k in from..to {
        if i >= mid {
            a[k] = aux[j];
            j += 1;
        } else if j >= to {
            a[k] = aux[i];
            i += 1;
        } else if cmp(aux[j], aux[i]) == Ordering::Less {
            // aux[j] jumps every element still waiting in the left half.
            count += (mid - i) as u64;
            a[k] = aux[j];
            j += 1;
        } else {
            a[k] = aux[i];
            i += 1;
        }
    }
    count
}

pub trait OutputVerifier<X> {
    fn verify(&self, xs: &[X]) -> Result<()>;
}

/// Checks that an array is in order, reporting the first violation.
pub struct SortednessVerifier<F> {
    pub description: String,
    cmp: F,
}

impl<F> SortednessVerifier<F> {
    pub fn new(description: &str, cmp: F) -> Self {
        Self {
            description: description.to_string(),
            cmp,
        }
    }
}

impl<X, F> OutputVerifier<X> for SortednessVerifier<F>
where
    X: Debug,
    F: Fn(&X, &X) -> Ordering,
{
    fn verify(&self, xs: &[X]) -> Result<()> {
        match find_inversion(xs, &self.cmp) {
            None => Ok(()),
            Some(index) => Err(SortError::NotSorted {
                description: self.description.clone(),
                index,
                previous: format!("{:?}", xs[index - 1]),
                current: format!("{:?}", xs[index]),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn brute_force(xs: &[i32]) -> u64 {
        let mut count = 0;
        for i in 0..xs.len() {
            for j in i + 1..xs.len() {
                if xs[i] > xs[j] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_find_inversion() {
        assert_eq!(find_inversion(&[1, 2, 2, 3], i32::cmp), None);
        assert_eq!(find_inversion(&[1, 3, 2, 4, 0], i32::cmp), Some(2));
        assert_eq!(find_inversion::<i32, _>(&[], i32::cmp), None);
        assert!(is_sorted(&["a", "b"], |a: &&str, b: &&str| a.cmp(b)));
    }

    #[test]
    fn test_count_inversions_small() {
        assert_eq!(count_inversions(&[3, 4, 2, 1], i32::cmp), 5);
        assert_eq!(count_inversions(&[4, 3, 2, 1], i32::cmp), 6);
        assert_eq!(count_inversions(&[2, 2, 2], i32::cmp), 0);
        assert_eq!(count_inversions::<i32, _>(&[], i32::cmp), 0);
    }

    #[test]
    fn test_count_inversions_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 7, 33, 100] {
            let xs: Vec<i32> = (0..n).map(|_| rng.random_range(0..20)).collect();
            assert_eq!(count_inversions(&xs, i32::cmp), brute_force(&xs));
        }
    }

    #[test]
    fn test_verifier_reports_first_violation() {
        let verifier = SortednessVerifier::new("test", i32::cmp);
        assert!(verifier.verify(&[1, 2, 3]).is_ok());
        assert_eq!(
            verifier.verify(&[1, 5, 4, 0]),
            Err(SortError::NotSorted {
                description: "test".to_string(),
                index: 2,
                previous: "5".to_string(),
                current: "4".to_string(),
            })
        );
    }
}
