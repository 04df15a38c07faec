//! Static subject/topic catalog and supported explanation languages.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// A subject and the topics offered for it in the picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subject {
    pub name: &'static str,
    pub topics: &'static [&'static str],
}

pub const SUBJECTS: &[Subject] = &[
    Subject {
        name: "General",
        topics: &["Critical Thinking", "Study Techniques", "Time Management", "Climate Change"],
    },
    Subject {
        name: "Physics",
        topics: &["Newton's Laws of Motion", "Gravity", "Electricity", "Light and Optics", "Thermodynamics"],
    },
    Subject {
        name: "Chemistry",
        topics: &["Atomic Structure", "Chemical Bonding", "Acids and Bases", "Periodic Table"],
    },
    Subject {
        name: "Biology",
        topics: &["Photosynthesis", "Cell Structure", "Genetics", "Human Digestive System"],
    },
    Subject {
        name: "Mathematics",
        topics: &["Algebra Basics", "Trigonometry", "Limits", "Probability"],
    },
    Subject {
        name: "Computer Science",
        topics: &["Algorithms", "Data Structures", "Operating Systems", "Computer Networks"],
    },
];

/// Languages the explanation can be requested in.
pub const LANGUAGES: &[&str] = &["English", "Hindi"];

/// Topics for `subject`; unknown subjects have none.
pub fn topics_for(subject: &str) -> &'static [&'static str] {
    SUBJECTS.iter().find(|s| s.name == subject).map_or(&[][..], |s| s.topics)
}
