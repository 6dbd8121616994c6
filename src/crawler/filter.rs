//! Parenthesis filter for serialized page content
//!
//! Links inside parenthetical asides (pronunciations, etymologies, "see
//! also" notes) are not part of an article's first-link chain, so the prose
//! inside parentheses is removed before links are searched for. Markup tags
//! are left intact, including parentheses that appear in tag attributes.

/// Removes parenthesized spans from marked-up text, keeping tags
///
/// Two counters are tracked while scanning: tag depth (`<` / `>`) and paren
/// depth (`(` / `)`). Paren depth only changes while tag depth is zero. A
/// character is kept iff paren depth is zero at that point; prose delimiters
/// are never kept, so both are dropped together with their contents.
///
/// An unmatched `(` suppresses the rest of the text.
///
/// # Examples
///
/// ```
/// use philo_walk::crawler::strip_parentheses;
///
/// assert_eq!(strip_parentheses("a(b(c)d)e"), "ae");
/// assert_eq!(
///     strip_parentheses(r#"<a title="(x)">keep</a>(drop)"#),
///     r#"<a title="(x)">keep</a>"#
/// );
/// ```
pub fn strip_parentheses(text: &str) -> String {
    let mut tag_depth: i64 = 0;
    let mut paren_depth: i64 = 0;
    let mut cleaned = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '<' => tag_depth += 1,
            '>' => tag_depth -= 1,
            '(' if tag_depth == 0 => {
                paren_depth += 1;
                continue;
            }
            ')' if tag_depth == 0 => {
                paren_depth -= 1;
                continue;
            }
            _ => {}
        }

        if paren_depth == 0 {
            cleaned.push(c);
        }
    }

    cleaned
}
