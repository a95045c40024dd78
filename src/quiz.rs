use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

/// Which questions a quiz draws from. The game sends category id 0 for "all categories".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

/// Picks uniformly among the candidates whose id is not in `previous`.
pub fn pick_unseen<R>(candidates: Vec<Question>, previous: &[i64], rng: &mut R) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let seen: HashSet<i64> = previous.iter().copied().collect();
    candidates
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .choose(rng)
}
