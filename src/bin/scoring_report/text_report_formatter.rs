use std::io::{self, Write};

use pronunciation_rs::Report;

const ID_WIDTH: usize = 24;

pub fn write_summary(out: &mut impl Write, report: &Report) -> io::Result<()> {
    let width = ID_WIDTH;
    writeln!(
        out,
        "{:<width$} {:>8} {:>9}  needs practice",
        "attempt", "accuracy", "phonemes"
    )?;
    for attempt in &report.attempts {
        let needs_practice = if attempt.mispronounced_words.is_empty() {
            "-".to_string()
        } else {
            attempt.mispronounced_words.join(", ")
        };
        writeln!(
            out,
            "{:<width$} {:>7}% {:>9}  {}",
            truncate(&attempt.id, width),
            attempt.accuracy_percent,
            format!(
                "{}/{}",
                attempt.correct_phoneme_count, attempt.total_phoneme_count
            ),
            needs_practice
        )?;
        for word in attempt.words.iter().filter(|w| !w.phoneme_errors.is_empty()) {
            let errors = word
                .phoneme_errors
                .iter()
                .map(|error| {
                    format!(
                        "{} {}/{}@{}",
                        error.outcome.as_str(),
                        error.expected,
                        error.actual,
                        error.position
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "    {} ({}): {errors}", word.word, word.status.as_str())?;
        }
    }

    for failure in &report.failures {
        writeln!(
            out,
            "{:<width$} {:>8} {:>9}  {}",
            truncate(&failure.id, width),
            "failed",
            "-",
            failure.error
        )?;
    }

    let aggregates = &report.aggregates;
    writeln!(out)?;
    writeln!(
        out,
        "attempts: {} scored, {} failed",
        aggregates.counts.scored, aggregates.counts.failed
    )?;
    writeln!(
        out,
        "words: {} correct, {} partial, {} mispronounced",
        aggregates.status_counts.correct,
        aggregates.status_counts.partial,
        aggregates.status_counts.mispronounced
    )?;
    if let Some(accuracy) = &aggregates.accuracy {
        writeln!(
            out,
            "accuracy: mean {:.3}, p50 {:.3}, p90 {:.3}",
            accuracy.mean, accuracy.p50, accuracy.p90
        )?;
    }
    if !aggregates.most_missed_words.is_empty() {
        let missed = aggregates
            .most_missed_words
            .iter()
            .map(|missed| format!("{} ({})", missed.word, missed.count))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "most missed: {missed}")?;
    }
    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
