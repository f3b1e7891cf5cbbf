use crate::model::Quote;
use rand::Rng;

/// Uniform pick by index. `None` on an empty list.
pub fn pick<'a, R: Rng + ?Sized>(quotes: &'a [Quote], rng: &mut R) -> Option<&'a Quote> {
    if quotes.is_empty() {
        return None;
    }
    quotes.get(rng.gen_range(0..quotes.len()))
}
