use crate::enrich::{Mode, Pipeline, note_word};
use crate::store::NoteStore;

/// Outcome of a bulk run.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub processed: usize,
    pub errors: Vec<String>,
}

impl BulkReport {
    fn record(&mut self, count: usize, word: Option<&str>, error: impl std::fmt::Display) {
        let message = match word {
            Some(word) => format!("{word}: {error}"),
            None => format!("Word number {count}: {error}"),
        };
        tracing::warn!("{}", message);
        self.errors.push(message);
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return format!("Defined {} notes", self.processed);
        }
        format!(
            "Bulk operation finished with some errors ({} of {} notes):\n{}",
            self.errors.len(),
            self.processed,
            self.errors.join("\n")
        )
    }
}

/// Define the notes one after another. Every loaded note is saved, even
/// when defining it failed.
pub async fn run_bulk<S>(pipeline: &Pipeline<'_>, store: &S, ids: &[u64]) -> BulkReport
where
    S: NoteStore,
{
    let mut report = BulkReport::default();

    if ids.is_empty() {
        tracing::info!("No cards selected.");
        return report;
    }

    let max = ids.len();
    for (index, &id) in ids.iter().enumerate() {
        let count = index + 1;
        report.processed = count;

        let mut note = match store.load(id).await {
            Ok(note) => note,
            Err(e) => {
                report.record(count, None, e);
                continue;
            }
        };

        let word = note_word(&note, pipeline.config);
        tracing::info!("{}/{} {}", count, max, word.as_deref().unwrap_or_default());

        if let Err(e) = pipeline.define_note(&mut note, Mode::Bulk).await {
            report.record(count, word.as_deref(), e);
        }

        if let Err(e) = store.save(&note).await {
            report.record(count, word.as_deref(), format!("Failed to save note: {e}"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_name_the_word_or_position() {
        let mut report = BulkReport::default();
        report.record(1, Some("lvoe"), "Word 'lvoe' not found in Oxford Learner's Dictionaries");
        report.record(2, None, "There is no word in the source field");
        report.processed = 2;

        assert_eq!(
            report.errors,
            [
                "lvoe: Word 'lvoe' not found in Oxford Learner's Dictionaries",
                "Word number 2: There is no word in the source field",
            ]
        );
        assert!(report.summary().starts_with("Bulk operation finished with some errors (2 of 2 notes)"));
    }
}
