use crate::core::frontmatter::{parse_frontmatter, split_frontmatter, Frontmatter};
use crate::core::lectures::extract_lectures;
use crate::domain::model::{CourseDefaults, Lecture, Module, SourceDocument};

/// 由 frontmatter 與講座清單組成模組，缺少的欄位使用預設值
pub fn assemble_module(
    frontmatter: &Frontmatter,
    lectures: Vec<Lecture>,
    defaults: &CourseDefaults,
) -> Module {
    Module {
        title: frontmatter
            .text("title")
            .unwrap_or_else(|| defaults.module_title.clone()),
        description: frontmatter.text("description").unwrap_or_default(),
        order: frontmatter
            .integer("order")
            .unwrap_or(defaults.module_order),
        completed: false,
        lectures,
    }
}

/// Parses one source document into a module.
pub fn parse_module(content: &str, defaults: &CourseDefaults) -> Module {
    let split = split_frontmatter(content);
    let frontmatter = parse_frontmatter(&split.metadata);
    let lectures = extract_lectures(&split.body, defaults);
    assemble_module(&frontmatter, lectures, defaults)
}

/// Stable sort by `order`; equal orders keep their current relative order.
pub fn order_modules(modules: &mut [Module]) {
    modules.sort_by_key(|module| module.order);
}

/// Builds the ordered module list. Documents are processed by file name
/// before the stable sort on `order`, so file name breaks ties.
pub fn build_course(mut documents: Vec<SourceDocument>, defaults: &CourseDefaults) -> Vec<Module> {
    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let mut modules: Vec<Module> = documents
        .iter()
        .map(|doc| {
            let module = parse_module(&doc.content, defaults);
            tracing::debug!(
                "📖 {} -> '{}' (order {}, {} lectures)",
                doc.file_name,
                module.title,
                module.order,
                module.lectures.len()
            );
            module
        })
        .collect();

    order_modules(&mut modules);
    modules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(file_name: &str, content: &str) -> SourceDocument {
        SourceDocument {
            file_name: file_name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_module_without_frontmatter_uses_defaults() {
        let module = parse_module("### Lecture 1: Intro", &CourseDefaults::default());

        assert_eq!(module.title, "Untitled Module");
        assert_eq!(module.description, "");
        assert_eq!(module.order, 999);
        assert!(!module.completed);
        assert_eq!(module.lectures.len(), 1);
    }

    #[test]
    fn test_unparseable_order_falls_back_to_sentinel() {
        let module = parse_module(
            "```yaml\ntitle: X\norder: first\n```",
            &CourseDefaults::default(),
        );

        assert_eq!(module.title, "X");
        assert_eq!(module.order, 999);
    }

    #[test]
    fn test_malformed_frontmatter_uses_defaults() {
        let module = parse_module(
            "```yaml\ntitle: [oops\n```\n### Lecture 1: Still parsed",
            &CourseDefaults::default(),
        );

        assert_eq!(module.title, "Untitled Module");
        assert_eq!(module.lectures[0].title, "Still parsed");
    }

    #[test]
    fn test_build_course_orders_by_order_then_file_name() {
        let a = "```yaml\norder: 2\ntitle: \"B\"\n```\n### Lecture 1: Intro\n- **Duration**: 30";
        let b = "```yaml\norder: 1\ntitle: \"A\"\n```\nNo lectures here.";

        let modules = build_course(
            vec![doc("b.md", b), doc("a.md", a)],
            &CourseDefaults::default(),
        );

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].title, "A");
        assert_eq!(modules[0].order, 1);
        assert!(modules[0].lectures.is_empty());
        assert_eq!(modules[1].title, "B");
        assert_eq!(modules[1].order, 2);
        assert_eq!(modules[1].lectures.len(), 1);
        assert_eq!(modules[1].lectures[0].title, "Intro");
        assert_eq!(modules[1].lectures[0].duration, 30);
    }

    #[test]
    fn test_equal_orders_keep_file_name_order() {
        let modules = build_course(
            vec![
                doc("03.md", "```yaml\ntitle: Third\norder: 5\n```"),
                doc("01.md", "```yaml\ntitle: First\norder: 5\n```"),
                doc("02.md", "```yaml\ntitle: Second\norder: 5\n```"),
                doc("00.md", "```yaml\ntitle: Early\norder: 0\n```"),
            ],
            &CourseDefaults::default(),
        );

        let titles: Vec<&str> = modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Early", "First", "Second", "Third"]);
    }

    #[test]
    fn test_build_course_with_no_documents() {
        assert!(build_course(Vec::new(), &CourseDefaults::default()).is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let content = "\
```yaml
title: Warehousing
description: Dimensional modelling
order: 3
```
### Lecture 1: Facts
- **Duration**: 50
- **Type**: Семинар
- **Video**: https://video.example/facts
- [Kimball](https://example.com/kimball)
### Lecture 2: Dimensions
";
        let modules = vec![parse_module(content, &CourseDefaults::default())];

        let json = serde_json::to_string_pretty(&modules).unwrap();
        let parsed: Vec<Module> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, modules);
        assert_eq!(parsed[0].lectures[0].lecture_type, "Семинар");
        assert_eq!(parsed[0].lectures[0].resources[0].url, "https://example.com/kimball");
    }
}
