use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uuid::Uuid;

use prelims_core::history::{merge_mistakes, push_newest};
use prelims_core::model::{Paper, Question, QuizResult};
use prelims_core::statistics::{classify_subjects, compute_lifetime_stats};

const SUBJECTS: [&str; 5] = ["Indian Polity", "Environment", "Indian Economy", "Ancient India", "Reasoning"];

fn make_result(i: u32) -> QuizResult {
    QuizResult {
        id: Uuid::nil(),
        total: 10,
        correct: i % 11,
        wrong: (10 - i % 11) / 2,
        subject: Some(SUBJECTS[i as usize % SUBJECTS.len()].to_string()),
        time_spent: 600,
        ..Default::default()
    }
}

fn make_question(i: usize) -> Question {
    Question {
        id: i.to_string().into(),
        paper: Paper::Gs1,
        subject: "Indian Polity".into(),
        topic: "General".into(),
        year: "Model".into(),
        difficulty: "Medium".into(),
        kind: "standard".into(),
        text: String::new(),
        options: vec!["A".into(), "B".into()],
        correct: 0,
        explanation: String::new(),
        tags: vec![],
        notes: None,
        linked_concepts: vec![],
        img_url: None,
        parent_text: None,
    }
}

fn bench_lifetime_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifetime_stats");

    let history: Vec<QuizResult> = (0..50).map(make_result).collect();
    group.bench_function("history_50", |b| {
        b.iter(|| {
            let stats = compute_lifetime_stats(black_box(&history), 10);
            classify_subjects(&stats.subjects)
        })
    });

    group.finish();
}

fn bench_history_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_writes");

    group.bench_function("push_newest_capped", |b| {
        let seed: Vec<QuizResult> = (0..50).map(make_result).collect();
        b.iter(|| {
            let mut history = seed.clone();
            push_newest(&mut history, make_result(7), Some(50));
            history
        })
    });

    let bank: Vec<Question> = (0..100).map(make_question).collect();
    let batch: Vec<Question> = (90..120).map(make_question).collect();
    group.bench_function("merge_mistakes_full_bank", |b| {
        b.iter(|| {
            let mut bank = bank.clone();
            merge_mistakes(&mut bank, black_box(&batch), 100)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lifetime_stats, bench_history_writes);
criterion_main!(benches);
