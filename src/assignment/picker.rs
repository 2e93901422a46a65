use entity::user;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use super::Candidate;

/// Picks up to two reviewers for a fresh pull request.
///
/// Two or fewer candidates are taken as-is. Beyond that the draw is biased
/// toward members with fewer open reviews: weight `1 / (1 + open_reviews)`.
/// The second draw reuses the weights computed up front minus the first
/// winner; loads are not recomputed between draws.
pub fn select_reviewers<R: Rng + ?Sized>(
    candidates: Vec<Candidate>,
    rng: &mut R,
) -> Vec<user::Model> {
    if candidates.len() <= 2 {
        return candidates.into_iter().map(|c| c.user).collect();
    }

    let mut pool = Vec::with_capacity(candidates.len());
    let mut weights = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        weights.push(1.0 / (1.0 + candidate.open_reviews as f64));
        pool.push(candidate.user);
    }

    let mut selected = Vec::with_capacity(2);

    let dist = WeightedIndex::new(&weights).expect("candidate weights are positive");
    let first = dist.sample(rng);
    selected.push(pool.swap_remove(first));
    weights.swap_remove(first);

    let dist = WeightedIndex::new(&weights).expect("candidate weights are positive");
    selected.push(pool.swap_remove(dist.sample(rng)));

    selected
}

/// Uniform pick of a replacement reviewer. Reassignment and the
/// deactivation cascade both use this; only initial assignment is weighted.
pub fn pick_replacement<'a, R: Rng + ?Sized>(
    candidates: &'a [user::Model],
    rng: &mut R,
) -> Option<&'a user::Model> {
    candidates.choose(rng)
}
