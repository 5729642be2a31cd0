// src/extractors/profile.rs
use crate::extractors::entry::EntryKind;
use crate::extractors::fields;
use crate::extractors::section::{Section, SectionMap, SectionSegmenter};
use crate::profile::{Certification, Contact, Education, Experience, ProfileRecord};

/// Turns raw profile text into a [`ProfileRecord`].
///
/// Parsing is a pure function of the input: no state is kept between calls,
/// so one parser can be shared freely.
pub struct ProfileParser {
    segmenter: SectionSegmenter,
}

impl ProfileParser {
    pub fn new() -> Self {
        Self { segmenter: SectionSegmenter::new() }
    }

    pub fn parse(&self, text: &str) -> ProfileRecord {
        let sections = self.segmenter.segment(text);
        let record = self.build_record(&sections);
        tracing::info!(
            "Parsed profile: {} experience, {} education, {} certification entries",
            record.experience.len(),
            record.education.len(),
            record.certifications.len()
        );
        record
    }

    /// Maps every resolved section to its typed value.
    pub fn build_record(&self, sections: &SectionMap) -> ProfileRecord {
        ProfileRecord {
            contact: parse_contact(sections.get(Section::Contact)),
            summary: sections.get(Section::Summary).trim().to_string(),
            experience: Experience::extract_all(sections.get(Section::Experience)),
            education: Education::extract_all(sections.get(Section::Education)),
            skills: parse_list(sections.get(Section::Skills)),
            certifications: Certification::extract_all(sections.get(Section::Certifications)),
            languages: parse_list(sections.get(Section::Languages)),
            other: sections.get(Section::Other).trim().to_string(),
        }
    }
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_contact(text: &str) -> Contact {
    Contact {
        name: fields::first_line(text),
        email: fields::extract_email(text),
        location: fields::extract_location(text),
        linkedin_url: fields::extract_linkedin_url(text),
    }
}

/// One item per line. Blank lines are kept as empty items.
pub fn parse_list(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(|item| item.trim().to_string()).collect()
}
