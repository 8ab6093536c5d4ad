//! Resource naming: English pluralisation and case conversion
//!
//! Entity schemas are declared with a snake_case singular name
//! (`working_unit`). Everything the engine derives from it goes through
//! this module:
//!
//! - REST collection path: `working-units`
//! - route segment: `working-unit`
//! - translation key segment: `workingUnit`

/// English pluralisation of entity names
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular noun to its plural form
    ///
    /// Only the last `_`/`-` separated word is inflected.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("order"), "orders");
    /// assert_eq!(Pluralizer::pluralize("order_status"), "order_statuses");
    /// assert_eq!(Pluralizer::pluralize("user_address"), "user_addresses");
    /// assert_eq!(Pluralizer::pluralize("delivery"), "deliveries");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        let (head, word) = split_last_word(singular);
        if word.is_empty() {
            return singular.to_string();
        }
        format!("{head}{}", Self::pluralize_word(word))
    }

    fn pluralize_word(word: &str) -> String {
        if let Some(plural) = irregular_plural(word) {
            return plural.to_string();
        }

        let len = word.len();
        match word {
            // consonant + y -> ies
            w if w.ends_with('y') && len > 1 && !ends_with_vowel_then(w, 'y') => {
                format!("{}ies", &w[..len - 1])
            }

            // sibilants -> es
            w if w.ends_with('s')
                || w.ends_with("sh")
                || w.ends_with("ch")
                || w.ends_with('x')
                || w.ends_with('z') =>
            {
                format!("{w}es")
            }

            w if w.ends_with("fe") && len > 2 => format!("{}ves", &w[..len - 2]),

            w if w.ends_with('f') && !w.ends_with("ff") && len > 1 => {
                format!("{}ves", &w[..len - 1])
            }

            // consonant + o -> oes, with the usual loanword exceptions
            w if w.ends_with('o') && len > 1 => {
                if ends_with_vowel_then(w, 'o') || matches!(w, "photo" | "piano" | "halo" | "memo")
                {
                    format!("{w}s")
                } else {
                    format!("{w}es")
                }
            }

            w => format!("{w}s"),
        }
    }
}

/// Plural kebab-case REST collection segment for a snake_case entity name
///
/// ```
/// use depot::core::pluralize::resource_path;
///
/// assert_eq!(resource_path("working_unit"), "working-units");
/// assert_eq!(resource_path("order_status"), "order-statuses");
/// ```
pub fn resource_path(name: &str) -> String {
    to_kebab_case(&Pluralizer::pluralize(&to_snake_case(name)))
}

/// `WorkingUnit` / `working_unit` / `workingUnit` -> `working_unit`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '-' || c == ' ' || c == '_' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// `working_unit` -> `working-unit`
pub fn to_kebab_case(name: &str) -> String {
    to_snake_case(name).replace('_', "-")
}

/// `working_unit` -> `workingUnit`
pub fn to_camel_case(name: &str) -> String {
    let snake = to_snake_case(name);
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;
    for c in snake.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn split_last_word(name: &str) -> (&str, &str) {
    match name.rfind(['_', '-']) {
        Some(pos) => name.split_at(pos + 1),
        None => ("", name),
    }
}

fn ends_with_vowel_then(word: &str, last: char) -> bool {
    let mut rev = word.chars().rev();
    rev.next() == Some(last) && matches!(rev.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("datum", "data"),
    ("criterion", "criteria"),
];

fn irregular_plural(word: &str) -> Option<&'static str> {
    IRREGULAR
        .iter()
        .find(|(singular, _)| *singular == word)
        .map(|(_, plural)| *plural)
}
