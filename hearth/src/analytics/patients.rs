use crate::models::{Note, Patient};

/// Patients whose name contains `term`, ignoring case, in input order.
///
/// An empty term keeps every patient.
pub fn filter_patients<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    if term.is_empty() {
        return patients.iter().collect();
    }

    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// The first `count` notes as stored (newest first in a well-kept record).
pub fn recent_notes(patient: &Patient, count: usize) -> &[Note] {
    let end = count.min(patient.notes.len());
    &patient.notes[..end]
}

/// Split comma-separated tag input, trimming pieces and dropping empty ones.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeedDataset;

    fn names(patients: &[&Patient]) -> Vec<String> {
        patients.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let data = SeedDataset::embedded().unwrap();
        let two = &data.patients[..2];

        // "benj-am-in" matches too
        assert_eq!(
            names(&filter_patients(two, "am")),
            vec!["Amelia Chen", "Benjamin Carter"]
        );
        assert_eq!(names(&filter_patients(two, "AME")), vec!["Amelia Chen"]);
        assert_eq!(
            names(&filter_patients(&data.patients, "car")),
            vec!["Benjamin Carter"]
        );
    }

    #[test]
    fn test_empty_term_keeps_everyone_in_order() {
        let data = SeedDataset::embedded().unwrap();
        let all = filter_patients(&data.patients, "");
        assert_eq!(
            names(&all),
            vec!["Amelia Chen", "Benjamin Carter", "Chloe Davis"]
        );
    }

    #[test]
    fn test_filter_results_are_a_subsequence() {
        let data = SeedDataset::embedded().unwrap();
        for term in ["a", "e", "ch", "zz", " ", "DAVIS"] {
            let hits = filter_patients(&data.patients, term);
            let mut cursor = data.patients.iter();
            for hit in &hits {
                assert!(hit.name.to_lowercase().contains(&term.to_lowercase()));
                assert!(
                    cursor.any(|p| p.id == hit.id),
                    "result order must follow input order for {term:?}"
                );
            }
        }
        assert!(filter_patients(&data.patients, "zz").is_empty());
    }

    #[test]
    fn test_recent_notes_caps_at_available() {
        let data = SeedDataset::embedded().unwrap();
        let amelia = &data.patients[0];
        assert_eq!(recent_notes(amelia, 2).len(), 2);
        assert_eq!(recent_notes(amelia, 1)[0].id, "n001");
        assert_eq!(recent_notes(&data.patients[1], 2).len(), 1);
        assert!(recent_notes(amelia, 0).is_empty());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags("anxiety, progress,, breakthrough ,  "),
            vec!["anxiety", "progress", "breakthrough"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }
}
