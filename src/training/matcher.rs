use crate::models::training::QaPair;
use crate::training::sequence;
use log::debug;
use std::collections::HashSet;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.72;

fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Share of the trained question's distinct tokens that also appear in the question.
fn keyword_overlap(question: &str, trained: &str) -> f64 {
    let trained_words: HashSet<&str> = trained.split_whitespace().collect();
    let question_words: HashSet<&str> = question.split_whitespace().collect();
    let shared = trained_words.intersection(&question_words).count();
    (shared as f64) / (trained_words.len().max(1) as f64)
}

/// Average of the sequence ratio and the keyword overlap, both on normalized text.
pub fn score(question: &str, trained: &str) -> f64 {
    let question = normalize(question);
    let trained = normalize(trained);
    let seq_score = sequence::ratio(&question, &trained);
    let overlap = keyword_overlap(&question, &trained);
    (seq_score + overlap) / 2.0
}

/// Best-scoring pair, if any pair scores above zero. Ties keep the earliest pair.
pub fn best_match<'a>(question: &str, pairs: &'a [QaPair]) -> Option<(&'a QaPair, f64)> {
    let mut best: Option<(&QaPair, f64)> = None;

    for qa in pairs {
        let combined = score(question, &qa.question);
        debug!("Trained pair {} scored {:.4}", qa.id, combined);
        let best_score = best.map(|(_, s)| s).unwrap_or(0.0);
        if combined > best_score {
            best = Some((qa, combined));
        }
    }

    best
}

pub fn find_answer(question: &str, pairs: &[QaPair], threshold: f64) -> Option<String> {
    match best_match(question, pairs) {
        Some((qa, best_score)) if best_score >= threshold => {
            debug!("Trained pair {} accepted ({:.4} >= {:.2})", qa.id, best_score, threshold);
            Some(qa.answer.clone())
        }
        _ => None,
    }
}
