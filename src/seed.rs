// src/seed.rs

use crate::{error::AppError, models::question::NewQuestion, store::QuestionStore};

/// (question, A, B, C, D, correct)
const SAMPLE_QUESTIONS: [(&str, &str, &str, &str, &str, &str); 10] = [
    ("What is the capital of France?", "London", "Berlin", "Paris", "Madrid", "C"),
    ("Which planet is known as the Red Planet?", "Venus", "Mars", "Jupiter", "Saturn", "B"),
    ("What is 2 + 2?", "3", "4", "5", "6", "B"),
    (
        "Who wrote \"Romeo and Juliet\"?",
        "Charles Dickens",
        "Mark Twain",
        "William Shakespeare",
        "Jane Austen",
        "C",
    ),
    (
        "What is the largest ocean on Earth?",
        "Atlantic Ocean",
        "Indian Ocean",
        "Arctic Ocean",
        "Pacific Ocean",
        "D",
    ),
    ("In which year did World War II end?", "1943", "1944", "1945", "1946", "C"),
    ("What is the smallest prime number?", "0", "1", "2", "3", "C"),
    (
        "Which programming language is known for its use in web development?",
        "Python",
        "JavaScript",
        "C++",
        "Java",
        "B",
    ),
    ("What is the chemical symbol for gold?", "Go", "Gd", "Au", "Ag", "C"),
    ("How many continents are there on Earth?", "5", "6", "7", "8", "C"),
];

pub fn sample_questions() -> Vec<NewQuestion> {
    SAMPLE_QUESTIONS
        .iter()
        .map(|(text, a, b, c, d, correct)| NewQuestion {
            question_text: text.to_string(),
            option_a: a.to_string(),
            option_b: b.to_string(),
            option_c: c.to_string(),
            option_d: d.to_string(),
            correct_option: correct.to_string(),
        })
        .collect()
}

/// Replaces the whole question bank with the sample set. Returns how many were inserted.
pub async fn reset_with_samples(store: &dyn QuestionStore) -> Result<usize, AppError> {
    tracing::info!("Clearing existing questions...");
    store.clear().await?;

    tracing::info!("Inserting sample questions...");
    let questions = sample_questions();
    for question in &questions {
        store.insert(question).await?;
    }

    Ok(questions.len())
}
