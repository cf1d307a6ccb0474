//! Subject catalogue: which bank file holds which subject.

use std::collections::BTreeSet;

use crate::model::{Paper, Question};

/// (subject, bank file stem) for General Studies paper 1.
pub const GS1_SUBJECTS: &[(&str, &str)] = &[
    ("Indian Polity", "polity"),
    ("Modern India", "modern_history"),
    ("Ancient India", "ancient_history"),
    ("Medieval India", "medieval_history"),
    ("Art & Culture", "art_culture"),
    ("World Geography", "world_geo"),
    ("Indian Geography", "indian_geo"),
    ("Environment", "environment"),
    ("Indian Economy", "economy"),
    ("Science & Tech", "science_tech"),
    ("Intl. Relations", "ir"),
    ("Miscellaneous", "misc"),
];

/// (subject, bank file stem) for CSAT.
pub const CSAT_SUBJECTS: &[(&str, &str)] = &[
    ("Mathematics", "csat_math"),
    ("Reasoning", "csat_reasoning"),
    ("Passages", "csat_passage"),
];

pub fn subjects(paper: Paper) -> &'static [(&'static str, &'static str)] {
    match paper {
        Paper::Gs1 => GS1_SUBJECTS,
        Paper::Csat => CSAT_SUBJECTS,
    }
}

/// Bank file name (`polity.json`) for a subject, if it is catalogued.
pub fn file_for_subject(subject: &str) -> Option<String> {
    GS1_SUBJECTS
        .iter()
        .chain(CSAT_SUBJECTS)
        .find(|(name, _)| *name == subject)
        .map(|(_, stem)| format!("{stem}.json"))
}

/// Every catalogued bank file, GS1 first.
pub fn all_bank_files() -> Vec<String> {
    GS1_SUBJECTS
        .iter()
        .chain(CSAT_SUBJECTS)
        .map(|(_, stem)| format!("{stem}.json"))
        .collect()
}

/// Distinct topics seen for a subject in loaded questions, sorted.
pub fn topics_for_subject(questions: &[Question], subject: &str) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.subject == subject)
        .map(|q| q.topic.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::question_in;

    #[test]
    fn catalogue_lookup() {
        assert_eq!(file_for_subject("Indian Polity").as_deref(), Some("polity.json"));
        assert_eq!(file_for_subject("Passages").as_deref(), Some("csat_passage.json"));
        assert_eq!(file_for_subject("Astrology"), None);
        assert_eq!(all_bank_files().len(), 15);
        assert_eq!(subjects(Paper::Csat).len(), 3);
    }

    #[test]
    fn csat_files_infer_csat_paper() {
        for (_, stem) in CSAT_SUBJECTS {
            assert_eq!(Paper::infer_from_source(stem), Paper::Csat);
        }
        for (_, stem) in GS1_SUBJECTS {
            assert_eq!(Paper::infer_from_source(stem), Paper::Gs1);
        }
    }

    #[test]
    fn topics_are_distinct_and_sorted() {
        let questions = vec![
            question_in("1", "Indian Polity", "Parliament", Paper::Gs1),
            question_in("2", "Indian Polity", "Judiciary", Paper::Gs1),
            question_in("3", "Indian Polity", "Parliament", Paper::Gs1),
            question_in("4", "Environment", "Wetlands", Paper::Gs1),
        ];
        assert_eq!(
            topics_for_subject(&questions, "Indian Polity"),
            vec!["Judiciary", "Parliament"]
        );
    }
}
