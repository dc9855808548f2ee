use crate::builtins::{self, Category};
use crate::lang::{Language, Message};

/// Commands, the function catalogue by category, and examples.
pub fn general(language: Language) -> String {
    let mut out = Message::CommandsHelp.text(language);
    out.push_str("\n\n");
    out.push_str(&Message::CategoriesHelp.text(language));
    out.push('\n');

    for category in Category::ALL {
        let names: Vec<&str> = builtins::all()
            .filter(|f| f.category == category && f.alias_of.is_none())
            .map(|f| f.name)
            .collect();
        out.push_str(&format!(
            "  {}: {}\n",
            category.title(language),
            names.join(", ")
        ));
    }

    out.push('\n');
    out.push_str(&Message::ExamplesHelp.text(language));
    out.push('\n');
    out.push_str(&Message::FunctionHelpHint.text(language));
    out
}

/// A block of the paged reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Operators,
    Functions(Category),
}

const PAGES: &[&[Section]] = &[
    &[Section::Operators, Section::Functions(Category::Math)],
    &[Section::Functions(Category::Statistics)],
    &[Section::Functions(Category::Finance)],
    &[
        Section::Functions(Category::Settings),
        Section::Functions(Category::Console),
        Section::Functions(Category::Layout),
    ],
    &[Section::Functions(Category::Style)],
];

pub fn page_count() -> usize {
    PAGES.len()
}

/// One page of the reference, numbered from 1.
pub fn page(number: usize, language: Language) -> Result<String, Message> {
    let total = page_count();
    let sections = number
        .checked_sub(1)
        .and_then(|index| PAGES.get(index))
        .ok_or(Message::NoSuchHelpPage {
            page: number,
            total,
        })?;

    let mut out = Message::HelpPage {
        page: number,
        total,
    }
    .text(language);
    out.push('\n');

    for section in sections.iter() {
        out.push('\n');
        match section {
            Section::Operators => {
                out.push_str(&format!(
                    "=== {} ===\n",
                    Message::OperatorsHeader.text(language).to_uppercase()
                ));
                out.push_str(&Message::OperatorsHelp.text(language));
                out.push('\n');
            }
            Section::Functions(category) => {
                out.push_str(&format!(
                    "=== {} ===\n",
                    category.title(language).to_uppercase()
                ));
                out.push_str(&function_table(*category, language));
            }
        }
    }

    out.push('\n');
    out.push_str(&Message::PageNavigation.text(language));
    Ok(out)
}

fn aliases_of(name: &str) -> Vec<&'static str> {
    builtins::ALIASES
        .iter()
        .filter(|(_, target)| *target == name)
        .map(|(alias, _)| *alias)
        .collect()
}

fn function_table(category: Category, language: Language) -> String {
    let functions: Vec<_> = builtins::all()
        .filter(|f| f.category == category && f.alias_of.is_none())
        .collect();

    // Styles share one summary; listing them by name is enough.
    if category == Category::Style {
        let names: Vec<&str> = functions.iter().map(|f| f.name).collect();
        return format!("  {}\n", names.join(", "));
    }

    let rows: Vec<(String, &str)> = functions
        .iter()
        .map(|f| {
            let mut names = vec![f.name];
            names.extend(aliases_of(f.name));
            (names.join(", "), f.summary(language))
        })
        .collect();
    let width = rows.iter().map(|(names, _)| names.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|(names, summary)| {
            let padding = width - names.chars().count();
            format!("  {}{}   {}\n", names, " ".repeat(padding), summary)
        })
        .collect()
}

/// Help for one function or alias, or `None` if no such builtin exists.
pub fn function(name: &str, language: Language) -> Option<String> {
    let builtin = builtins::lookup(name)?;
    let canonical = builtins::lookup(builtin.canonical()).unwrap_or(builtin);

    let mut out = format!("{}: {}\n", builtin.name, canonical.summary(language));
    out.push_str(&format!(
        "  {}\n",
        builtin.arity.describe().text(language)
    ));

    if let Some(target) = builtin.alias_of {
        out.push_str(&format!(
            "  {}\n",
            Message::AliasOf(target.to_string()).text(language)
        ));
    } else {
        let aliases = aliases_of(builtin.name);
        if !aliases.is_empty() {
            out.push_str(&format!("  pt: {}\n", aliases.join(", ")));
        }
    }

    Some(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_help_lists_every_category() {
        let text = general(Language::En);
        assert!(text.contains("Finance: pv, fv, pmt"));
        assert!(text.contains("Text style: black, red"));
        assert!(text.contains("set lang en"));
    }

    #[test]
    fn function_help_mentions_aliases() {
        let text = function("sqrt", Language::En).expect("sqrt has help");
        assert!(text.starts_with("sqrt: square root"));
        assert!(text.contains("takes exactly 1 argument"));
        assert!(text.contains("pt: raiz"));

        let alias = function("raiz", Language::Pt).expect("raiz has help");
        assert!(alias.contains("sinônimo de sqrt"));
    }

    #[test]
    fn first_page_lists_operators_and_math() {
        let text = page(1, Language::En).expect("page 1 exists");
        assert!(text.starts_with("Page 1 of 5"));
        assert!(text.contains("=== OPERATORS ==="));
        assert!(text.contains("  ^   power: a ^ b (groups to the right)"));
        assert!(text.contains("=== MATH ==="));
        let sqrt = text
            .lines()
            .find(|line| line.trim_start().starts_with("sqrt, raiz"))
            .expect("sqrt row");
        assert!(sqrt.ends_with("   square root"));
        assert!(text.ends_with("for details."));
    }

    #[test]
    fn every_page_renders_in_both_languages() {
        for number in 1..=page_count() {
            for language in [Language::En, Language::Pt] {
                assert!(page(number, language).is_ok(), "page {}", number);
            }
        }
        assert!(page(3, Language::Pt)
            .expect("page 3 exists")
            .contains("pv, vp"));
    }

    #[test]
    fn missing_pages_are_reported() {
        assert_eq!(
            page(0, Language::En),
            Err(Message::NoSuchHelpPage { page: 0, total: 5 })
        );
        assert_eq!(
            page(9, Language::En).map_err(|m| m.text(Language::En)),
            Err("Page 9 does not exist. Available pages: 1 to 5".to_string())
        );
    }

    #[test]
    fn unknown_topic_has_no_help() {
        assert_eq!(function("nope", Language::En), None);
    }
}
