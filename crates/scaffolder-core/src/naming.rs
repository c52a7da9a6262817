//! App name transformations

/// Package name form of an app name: lowercase words joined by single hyphens.
///
/// Every run of non-alphanumeric characters becomes one hyphen, and hyphens at
/// either end are dropped. Blank input yields an empty string.
pub fn normalize_name(app_name: &str) -> String {
    let mut out = String::with_capacity(app_name.len());
    let mut pending_hyphen = false;

    for c in app_name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Display title of an app name, e.g. `myCoolApp` -> `My Cool App`
pub fn title_case(app_name: &str) -> String {
    words(app_name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Split on non-alphanumerics and on lower-to-upper case boundaries
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }

        if c.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        current.push(c);
        prev_lower_or_digit = c.is_lowercase() || c.is_numeric();
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_spaces() {
        assert_eq!(normalize_name("My Cool App"), "my-cool-app");
    }

    #[test]
    fn test_normalize_name_collapses_runs_and_trims() {
        assert_eq!(normalize_name("  --Hello__World!!  "), "hello-world");
        assert_eq!(normalize_name("a.b/c"), "a-b-c");
    }

    #[test]
    fn test_normalize_name_blank() {
        assert_eq!(normalize_name("  "), "");
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("!!!"), "");
    }

    #[test]
    fn test_normalize_name_keeps_digits() {
        assert_eq!(normalize_name("App 2 Go"), "app-2-go");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my cool app"), "My Cool App");
        assert_eq!(title_case("myCoolApp"), "My Cool App");
        assert_eq!(title_case("my-cool_app"), "My Cool App");
        assert_eq!(title_case("HTTP server"), "HTTP Server");
        assert_eq!(title_case("   "), "");
    }
}
