use crate::analyzers::types::SubjectSummary;
use crate::analyzers::utility::{mean, stddev};
use crate::records::{GradeRecord, Score};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Records belonging to `user_id`, in parse order.
pub fn records_for_user<'a>(records: &'a [GradeRecord], user_id: &str) -> Vec<&'a GradeRecord> {
    records.iter().filter(|r| r.user_id == user_id).collect()
}

/// Groups records by subject, subjects in sorted order.
pub fn group_by_subject<'a, I>(records: I) -> BTreeMap<&'a str, Vec<&'a GradeRecord>>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let mut groups: BTreeMap<&str, Vec<&GradeRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.subject.as_str()).or_default().push(record);
    }
    groups
}

/// Rolls up one subject's records.
///
/// Only numeric scores enter the average. Dates that did not normalize to
/// `YYYY-MM-DD` are ignored when picking the latest date.
pub fn summarize_subject(subject: &str, records: &[&GradeRecord]) -> SubjectSummary {
    let numeric: Vec<f64> = records.iter().filter_map(|r| r.score.as_numeric()).collect();
    let passes = records.iter().filter(|r| r.score == Score::Pass).count();
    let absences = records.iter().filter(|r| r.score == Score::Absent).count();

    let latest_date = records
        .iter()
        .filter_map(|r| NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").ok())
        .max()
        .map(|d| d.format("%Y-%m-%d").to_string());

    let average = mean(&numeric);
    let sd = average.map_or(0.0, |avg| stddev(&numeric, avg));

    SubjectSummary {
        subject: subject.to_string(),
        numeric_count: numeric.len(),
        average,
        stddev: sd,
        passes,
        absences,
        latest_date,
    }
}

/// Filters to `user_id` and summarizes each subject they have records in.
pub fn summarize_subjects(records: &[GradeRecord], user_id: &str) -> Vec<SubjectSummary> {
    group_by_subject(records_for_user(records, user_id))
        .into_iter()
        .map(|(subject, group)| summarize_subject(subject, &group))
        .collect()
}
