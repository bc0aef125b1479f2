//! Command-line word splitting.
//!
//! Words are separated by unquoted whitespace. Single quotes keep their
//! contents literally; double quotes keep whitespace and honour `\"` and
//! `\\`; outside quotes a backslash escapes the next character.

use crate::error::ShellError;

pub fn split_words(line: &str) -> Result<Vec<String>, ShellError> {
    let mut words = Vec::new();
    let mut current = String::new();
    // A word has started even if it is empty, e.g. `''`.
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(unterminated('"')),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated('"')),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(ch) => current.push(ch),
                    None => {
                        return Err(ShellError::Parse {
                            message: "no character after trailing backslash".to_string(),
                        });
                    }
                }
            }
            ch => {
                in_word = true;
                current.push(ch);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated(quote: char) -> ShellError {
    ShellError::Parse { message: format!("unterminated {} quote", quote) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        split_words(line).unwrap()
    }

    #[test]
    fn test_plain_whitespace() {
        assert_eq!(words("  ls   -l\t/docs  "), vec!["ls", "-l", "/docs"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(words("mv 'my file' \"other file\""), vec!["mv", "my file", "other file"]);
        assert_eq!(words("cd a'b c'd"), vec!["cd", "ab cd"]);
        assert_eq!(words("ls ''"), vec!["ls", ""]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(words(r"cd my\ dir"), vec!["cd", "my dir"]);
        assert_eq!(words(r#"ls "a \"q\" \n""#), vec!["ls", r#"a "q" \n"#]);
        assert_eq!(words(r"ls 'no \escape'"), vec!["ls", r"no \escape"]);
    }

    #[test]
    fn test_unterminated_quotes_fail() {
        assert!(matches!(split_words("cd 'docs"), Err(ShellError::Parse { .. })));
        assert!(matches!(split_words("cd \"docs"), Err(ShellError::Parse { .. })));
        assert!(matches!(split_words("cd docs\\"), Err(ShellError::Parse { .. })));
    }
}
