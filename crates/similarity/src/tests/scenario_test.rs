//! Ranking scenarios over small in-memory catalogues

use crate::models::{Dataset, FeatureRow};
use crate::pipeline::SimilarityIndex;
use crate::query::find_similar;
use crate::scorer::{compute_similarity, ScoringWeights};

fn movie(title: &str, genres: &[&str], rating: f64) -> FeatureRow {
    let genres = genres.join(" ");
    FeatureRow {
        title: title.to_string(),
        features: genres.clone(),
        genres,
        imdb_rating: rating,
    }
}

fn wonderland_catalogue() -> Dataset {
    Dataset::new(vec![
        movie("Alice in Wonderland", &["Fantasy", "Adventure"], 7.5),
        movie("Wonderland Tales", &["Fantasy"], 6.0),
        movie("Action Hero", &["Action"], 8.0),
    ])
}

#[test]
fn test_shared_genre_outranks_higher_rating() {
    let index = SimilarityIndex::build(wonderland_catalogue(), ScoringWeights::default());

    let results = index.similar_to("Alice in Wonderland", 2).unwrap();
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();

    assert_eq!(titles, vec!["Wonderland Tales", "Action Hero"]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn test_wonderland_scores() {
    let dataset = wonderland_catalogue();
    let matrix = compute_similarity(&dataset, ScoringWeights::default()).matrix;

    // idf(fantasy) = ln(4/3) + 1, idf(adventure) = ln(2) + 1
    let fantasy = (4.0f64 / 3.0).ln() + 1.0;
    let adventure = 2.0f64.ln() + 1.0;
    let cosine = fantasy / (fantasy * fantasy + adventure * adventure).sqrt();

    // Ratings 7.5, 6.0, 8.0 scale to 0.75, 0.0, 1.0
    let expected_tales = 0.8 * cosine;
    let expected_hero = 0.2;
    let expected_self = 0.8 + 0.2 * 0.75;

    assert!((matrix.get(0, 1).unwrap() - expected_tales).abs() < 1e-9);
    assert!((matrix.get(0, 2).unwrap() - expected_hero).abs() < 1e-9);
    assert!((matrix.get(0, 0).unwrap() - expected_self).abs() < 1e-9);
}

#[test]
fn test_rating_bonus_is_column_wise() {
    let dataset = wonderland_catalogue();
    let matrix = compute_similarity(&dataset, ScoringWeights::default()).matrix;

    // Text similarity is symmetric, so any asymmetry comes from the column
    // rating: [i][j] - [j][i] == 0.2 * (scaled_j - scaled_i)
    let scaled = [0.75, 0.0, 1.0];
    for i in 0..3 {
        for j in 0..3 {
            let diff = matrix.get(i, j).unwrap() - matrix.get(j, i).unwrap();
            assert!((diff - 0.2 * (scaled[j] - scaled[i])).abs() < 1e-9);
        }
    }
}

#[test]
fn test_identical_ratings_get_same_bonus() {
    let dataset = Dataset::new(vec![
        movie("A", &["Drama"], 7.0),
        movie("B", &["Comedy"], 7.0),
        movie("C", &["Horror"], 7.0),
    ]);
    let matrix = compute_similarity(&dataset, ScoringWeights::default()).matrix;

    // No shared genres and a constant rating column: every off-diagonal is 0
    for i in 0..3 {
        for j in 0..3 {
            let value = matrix.get(i, j).unwrap();
            assert!(value.is_finite());
            if i != j {
                assert_eq!(value, 0.0);
            }
        }
    }
}

#[test]
fn test_text_only_weights() {
    let weights = ScoringWeights::new(1.0, 0.0).unwrap();
    let dataset = wonderland_catalogue();
    let matrix = compute_similarity(&dataset, weights).matrix;

    assert_eq!(matrix.get(0, 2), Some(0.0));
    assert!((matrix.get(1, 1).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_query_excludes_self_for_every_row() {
    let dataset = Dataset::new(vec![
        movie("A", &["Drama", "Romance"], 3.0),
        movie("B", &["Drama"], 9.9),
        movie("C", &[], 1.0),
        movie("D", &["Romance", "Comedy"], 6.5),
        movie("E", &["Comedy"], 9.9),
    ]);
    let matrix = compute_similarity(&dataset, ScoringWeights::default()).matrix;

    for row in dataset.iter() {
        let results = find_similar(&dataset, &matrix, &row.title, 10).unwrap();
        assert_eq!(results.len(), dataset.len() - 1);
        assert!(results.iter().all(|r| r.title != row.title));

        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
