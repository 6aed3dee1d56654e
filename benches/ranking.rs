use criterion::{criterion_group, criterion_main, Criterion};
use review_analyzer::filter::{ReviewFilter, ReviewQuery};
use review_analyzer::locations::ALLOWED_LOCATIONS;
use review_analyzer::sentiment::{rank, LexiconScorer};
use review_analyzer::Review;
use std::hint::black_box;

const BODIES: &[&str] = &[
    "The staff were wonderful and the food was great!",
    "Terrible service, the room was dirty and the manager was rude.",
    "It was fine. Nothing special but not bad either.",
    "Absolutely LOVED it, would definitely come back",
    "The view was nice but the parking was a nightmare",
];

fn sample_reviews(n: usize) -> Vec<Review> {
    (0..n)
        .map(|i| {
            Review::create(
                ALLOWED_LOCATIONS[i % ALLOWED_LOCATIONS.len()].to_string(),
                BODIES[i % BODIES.len()].to_string(),
            )
        })
        .collect()
}

fn bench_lexicon_score(c: &mut Criterion) {
    let scorer = LexiconScorer::new();
    c.bench_function("lexicon_polarity_scores", |b| {
        b.iter(|| scorer.polarity_scores(black_box(BODIES[1])))
    });
}

fn bench_rank_1000(c: &mut Criterion) {
    let scorer = LexiconScorer::new();
    let reviews = sample_reviews(1000);
    c.bench_function("rank_1000_reviews", |b| {
        b.iter(|| rank(black_box(reviews.clone()), &scorer).unwrap())
    });
}

fn bench_filter_then_rank(c: &mut Criterion) {
    let scorer = LexiconScorer::new();
    let reviews = sample_reviews(1000);
    let filter = ReviewFilter::from_query(&ReviewQuery {
        location: Some("Denver, Colorado".to_string()),
        start_date: None,
        end_date: None,
    })
    .unwrap();
    c.bench_function("filter_then_rank_1000", |b| {
        b.iter(|| rank(filter.apply(black_box(reviews.clone())), &scorer).unwrap())
    });
}

criterion_group!(benches, bench_lexicon_score, bench_rank_1000, bench_filter_then_rank);
criterion_main!(benches);
