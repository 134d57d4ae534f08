// `### Lecture <n>: <title>` 開始一堂課，直到下一個標題或內容結尾

use crate::domain::model::{CourseDefaults, Lecture, Resource};
use once_cell::sync::Lazy;
use regex::Regex;

const LECTURE_MARKER: &str = "### Lecture";
const PROPERTY_PREFIX: &str = "- **";
const RESOURCE_PREFIX: &str = "- [";

static HEADER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^### Lecture\b(?:\s*\d+)?\s*:?").expect("valid header regex"));
static PROPERTY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \*\*(.+?)\*\*:\s*(.+)").expect("valid property regex"));
static RESOURCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[(.+?)\]\((.+?)\)").expect("valid resource regex"));

enum ScanState {
    Outside,
    InLecture(Lecture),
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Header(String),
    Property { key: String, value: &'a str },
    Resource(Resource),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with(LECTURE_MARKER) {
        return LineKind::Header(lecture_title(line));
    }

    // 屬性行優先，符合前綴但格式不對的行不再當作資源
    if line.starts_with(PROPERTY_PREFIX) {
        return match PROPERTY_LINE.captures(line) {
            Some(caps) => {
                let value = caps.get(2).map_or("", |m| m.as_str().trim());
                LineKind::Property {
                    key: caps[1].to_lowercase(),
                    value,
                }
            }
            None => LineKind::Other,
        };
    }

    if line.starts_with(RESOURCE_PREFIX) && line.contains("](") {
        if let Some(caps) = RESOURCE_LINE.captures(line) {
            return LineKind::Resource(Resource {
                title: caps[1].to_string(),
                url: caps[2].to_string(),
            });
        }
    }

    LineKind::Other
}

/// Header line with the marker and lecture number removed.
pub fn lecture_title(line: &str) -> String {
    match HEADER_PREFIX.find(line) {
        Some(prefix) => line[prefix.end()..].trim().to_string(),
        None => line.trim().to_string(),
    }
}

/// Leading integer of a duration value, e.g. `"30 min"` is 30.
pub fn parse_duration(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..digits_end].parse().ok()
}

fn apply_property(lecture: &mut Lecture, key: &str, value: &str) {
    match key {
        "duration" => match parse_duration(value) {
            Some(minutes) => lecture.duration = minutes,
            None => tracing::debug!(
                "Ignoring non-numeric duration '{}' in lecture '{}'",
                value,
                lecture.title
            ),
        },
        "type" => lecture.lecture_type = value.to_string(),
        "video" => lecture.video_url = value.to_string(),
        "presentation" => lecture.presentation_url = value.to_string(),
        "materials" => lecture.materials_url = value.to_string(),
        "description" => lecture.description = value.to_string(),
        _ => {}
    }
}

/// Extracts lectures from `body` in source order.
pub fn extract_lectures(body: &str, defaults: &CourseDefaults) -> Vec<Lecture> {
    let mut lectures = Vec::new();
    let mut state = ScanState::Outside;

    for line in body.lines() {
        let kind = classify(line);

        if let LineKind::Header(title) = kind {
            let next = ScanState::InLecture(Lecture::new(title, defaults));
            if let ScanState::InLecture(finished) = std::mem::replace(&mut state, next) {
                lectures.push(finished);
            }
            continue;
        }

        let ScanState::InLecture(lecture) = &mut state else {
            continue;
        };

        match kind {
            LineKind::Property { key, value } => apply_property(lecture, &key, value),
            LineKind::Resource(resource) => lecture.resources.push(resource),
            LineKind::Header(_) | LineKind::Other => {}
        }
    }

    if let ScanState::InLecture(finished) = state {
        lectures.push(finished);
    }

    lectures
}
