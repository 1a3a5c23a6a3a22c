//! Shuffled-bag sampling: every pool member is shown once per epoch before
//! any repeats, and a fresh epoch never opens on the value just shown.

use rand::Rng;
use rand::seq::SliceRandom;

/// Draw the next value from `bag`, refilling it from `pool` when exhausted.
///
/// The stored bag may contain members that are no longer in the pool (the
/// configuration changed since it was filled); those are dropped before the
/// emptiness check so a stale bag reshuffles from the current pool instead
/// of replaying dead entries. On refill, if the shuffle happens to lead with
/// `excluded` and the pool has alternatives, the head is swapped with a
/// uniformly chosen later slot.
///
/// `pool` must be non-empty.
pub fn draw<T, R>(pool: &[T], bag: Vec<T>, excluded: Option<&T>, rng: &mut R) -> (T, Vec<T>)
where
    T: Clone + PartialEq,
    R: Rng,
{
    let mut bag: Vec<T> = bag.into_iter().filter(|v| pool.contains(v)).collect();

    if bag.is_empty() {
        bag = pool.to_vec();
        bag.shuffle(rng);
        if pool.len() > 1 && excluded == Some(&bag[0]) {
            let swap_with = rng.gen_range(1..bag.len());
            bag.swap(0, swap_with);
        }
    }

    let drawn = bag.remove(0);
    (drawn, bag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_epoch_draws_every_member_once() {
        let pool = vec!['a', 'b', 'c', 'd', 'e'];
        let mut rng = rng(7);
        let mut bag = Vec::new();
        let mut seen = HashSet::new();
        for _ in 0..pool.len() {
            let (drawn, rest) = draw(&pool, bag, None, &mut rng);
            assert!(seen.insert(drawn), "repeat within epoch");
            bag = rest;
        }
        assert_eq!(seen.len(), pool.len());
        assert!(bag.is_empty());
    }

    #[test]
    fn test_no_adjacent_repeat_across_epochs() {
        let pool = vec!['a', 'b', 'c'];
        for seed in 0..50 {
            let mut rng = rng(seed);
            let mut bag = Vec::new();
            let mut prev: Option<char> = None;
            for _ in 0..30 {
                let (drawn, rest) = draw(&pool, bag, prev.as_ref(), &mut rng);
                assert_ne!(Some(drawn), prev, "adjacent repeat with seed {seed}");
                prev = Some(drawn);
                bag = rest;
            }
        }
    }

    #[test]
    fn test_single_member_pool_repeats() {
        let pool = vec!['z'];
        let mut rng = rng(3);
        let (first, bag) = draw(&pool, Vec::new(), None, &mut rng);
        let (second, _) = draw(&pool, bag, Some(&first), &mut rng);
        assert_eq!(first, 'z');
        assert_eq!(second, 'z');
    }

    #[test]
    fn test_stale_members_filtered_before_draw() {
        let pool = vec!['a', 'b'];
        let stale_bag = vec!['x', 'a', 'y'];
        let mut rng = rng(11);
        let (drawn, rest) = draw(&pool, stale_bag, None, &mut rng);
        assert_eq!(drawn, 'a');
        assert!(rest.is_empty());
    }

    #[test]
    fn test_fully_stale_bag_triggers_reshuffle() {
        let pool = vec!['a', 'b', 'c'];
        let stale_bag = vec!['x', 'y'];
        let mut rng = rng(13);
        let (drawn, rest) = draw(&pool, stale_bag, None, &mut rng);
        assert!(pool.contains(&drawn));
        assert_eq!(rest.len(), pool.len() - 1);
        for v in &rest {
            assert!(pool.contains(v));
        }
    }

    #[test]
    fn test_refill_is_a_permutation_of_the_pool() {
        let pool: Vec<char> = ('a'..='j').collect();
        let mut rng = rng(17);
        let (drawn, rest) = draw(&pool, Vec::new(), None, &mut rng);
        let mut epoch: Vec<char> = std::iter::once(drawn).chain(rest).collect();
        epoch.sort_unstable();
        assert_eq!(epoch, pool);
    }
}
